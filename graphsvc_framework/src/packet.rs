use std::{
	any::{
		type_name,
		Any,
	},
	fmt,
	sync::Arc,
};
use thiserror::Error;


/// An error returned when a value can't be extracted from a `Packet`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
	#[error("The packet is empty")]
	Empty,
	#[error("Expected a packet holding {expected}, but it holds {stored}")]
	TypeMismatch {
		expected: &'static str,
		stored: &'static str,
	},
}


/// Type-erased, reference-counted value container.
///
/// Cloning a `Packet` clones the reference, not the value, so every clone
/// observes the same underlying object. The concrete type is hidden until
/// it is recovered with [`Packet::get`], which checks it at run time.
#[derive(Clone, Default)]
pub struct Packet(Option<PacketInner>);

#[derive(Clone)]
struct PacketInner {
	value: Arc<dyn Any + Send + Sync>,
	type_name: &'static str,
}

impl Packet {

	/// Wraps `value` in a new packet.
	pub fn new<V: Any + Send + Sync>(value: V) -> Packet {
		return Packet(Some(PacketInner {
			value: Arc::new(value),
			type_name: type_name::<V>(),
		}));
	}

	/// Creates a packet that holds nothing.
	pub fn empty() -> Packet {
		return Packet(None);
	}

	pub fn is_empty(&self) -> bool {
		return self.0.is_none();
	}

	/// Name of the stored value's type, or `None` for an empty packet.
	pub fn type_name(&self) -> Option<&'static str> {
		return self.0.as_ref().map(|inner| inner.type_name);
	}

	/// Borrows the stored value as a `V`, failing if the packet is empty or
	/// holds a different type.
	pub fn get<V: Any>(&self) -> Result<&V, PacketError> {
		let inner = self.0.as_ref().ok_or(PacketError::Empty)?;
		return inner.value.downcast_ref::<V>().ok_or(PacketError::TypeMismatch {
			expected: type_name::<V>(),
			stored: inner.type_name,
		});
	}

	/// Returns true if both packets refer to the same stored value.
	pub fn ptr_eq(&self, other: &Packet) -> bool {
		return match (&self.0, &other.0) {
			(Some(a), Some(b)) => Arc::ptr_eq(&a.value, &b.value),
			(None, None) => true,
			_ => false,
		};
	}

}

impl fmt::Debug for Packet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		return match self.type_name() {
			Some(type_name) => write!(f, "Packet<{}>", type_name),
			None => write!(f, "Packet(empty)"),
		};
	}
}

/// Builds the packet the typed service setters store: the packet holds the
/// `Arc<T>` itself, which lets `T` be a trait object.
pub fn make_service_packet<T: ?Sized + Send + Sync + 'static>(object: Arc<T>) -> Packet {
	return Packet::new::<Arc<T>>(object);
}
