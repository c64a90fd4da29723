use std::{
	collections::BTreeMap,
	sync::Arc,
};
use serde::{
	Serialize,
	Deserialize,
};
use thiserror::Error;
use tracing::{
	debug,
	error,
};
use crate::{
	descriptor::{
		ServiceDescriptor,
		ServiceDescriptorBase,
	},
	packet::{
		make_service_packet,
		Packet,
	},
};

/// Mapping of service keys to the packets holding their objects
pub type ServiceMap = BTreeMap<String, Packet>;

/// An error returned when a service binding is rejected.
///
/// Both variants are invalid-argument errors: the caller passed nothing to
/// store, and the previous binding (if any) is left in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceRegistrationError {
	#[error("set_object called for {key} with an empty object")]
	EmptyObject {
		key: &'static str,
	},
	#[error("set_packet called for {key} with an empty packet")]
	EmptyPacket {
		key: &'static str,
	},
}

impl ServiceRegistrationError {
	/// Key of the service the rejected call targeted
	pub fn key(&self) -> &'static str {
		return match self {
			ServiceRegistrationError::EmptyObject { key } => *key,
			ServiceRegistrationError::EmptyPacket { key } => *key,
		};
	}
}

/// Describes a single binding held by a registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescription {
	pub key: String,
	pub type_name: String,
}


/// # Keyed store of shared service objects for one graph instance.
///
/// Objects are stored as type-erased [`Packet`]s and recovered through typed
/// [`ServiceDescriptor`]s. The registry only owns its share of each object;
/// dropping it never frees an object someone else still holds.
///
/// ## Inheritance
///
/// A nested graph builds its registry with [`ServiceRegistry::inherit`],
/// which copies the parent's bindings as they are at that moment. The copy
/// shares the objects but not the map: later writes to either registry are
/// invisible to the other.
///
/// ## Concurrency
///
/// There is no internal locking. Populate the registry from one place before
/// execution starts, then share it read-only (e.g. behind an `Arc`).
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
	service_packets: ServiceMap,
}

impl ServiceRegistry {

	/// Creates an empty registry.
	pub fn new() -> ServiceRegistry {
		return ServiceRegistry::default();
	}

	/// Creates a registry holding a snapshot of `parent`'s bindings, or an
	/// empty one when there is no parent.
	pub fn inherit(parent: Option<&ServiceRegistry>) -> ServiceRegistry {
		return match parent {
			Some(parent) => {
				debug!(services = parent.len(), "Inheriting services from parent registry");
				ServiceRegistry {
					service_packets: parent.service_packets().clone(),
				}
			},
			None => ServiceRegistry::new(),
		};
	}

	/// Binds `object` to `service`, replacing any previous binding.
	///
	/// Passing `None` fails with [`ServiceRegistrationError::EmptyObject`]
	/// and leaves the registry untouched.
	pub fn set_object<T>(&mut self, service: &ServiceDescriptor<T>, object: impl Into<Option<Arc<T>>>) -> Result<(), ServiceRegistrationError>
	where
		T: ?Sized + Send + Sync + 'static,
	{
		let object = match object.into() {
			Some(object) => object,
			None => return Err(ServiceRegistrationError::EmptyObject { key: service.key() }),
		};
		return self.set_packet(service.base(), make_service_packet(object));
	}

	/// Binds an already type-erased packet to `service`. Every typed setter
	/// ends up here.
	pub fn set_packet(&mut self, service: &ServiceDescriptorBase, packet: Packet) -> Result<(), ServiceRegistrationError> {
		if packet.is_empty() {
			return Err(ServiceRegistrationError::EmptyPacket { key: service.key() });
		}

		let replaced = self.service_packets.insert(String::from(service.key()), packet);
		debug!(key = service.key(), replaced = replaced.is_some(), "Service bound");
		return Ok(());
	}

	/// Looks up the object bound to `service`. Absence is not an error.
	///
	/// # Panics
	///
	/// Panics if the key is bound to something other than an `Arc<T>`. That
	/// can only happen if a packet was stored through `set_packet` under the
	/// wrong descriptor, which is a bug in the caller, not a runtime state.
	pub fn get_object<T>(&self, service: &ServiceDescriptor<T>) -> Option<Arc<T>>
	where
		T: ?Sized + Send + Sync + 'static,
	{
		let packet = self.service_packets.get(service.key())?;
		return match packet.get::<Arc<T>>() {
			Ok(object) => Some(Arc::clone(object)),
			Err(err) => {
				error!(key = service.key(), %err, "Service binding does not hold the expected type");
				panic!("GraphService {} is not usable as the requested type: {}", service.key(), err);
			},
		};
	}

	/// Returns the packet bound to `service`, or an empty packet.
	pub fn get_packet(&self, service: &ServiceDescriptorBase) -> Packet {
		return self.service_packets.get(service.key()).cloned().unwrap_or_default();
	}

	/// Read-only view of every binding
	pub fn service_packets(&self) -> &ServiceMap {
		return &self.service_packets;
	}

	pub fn contains(&self, service: &ServiceDescriptorBase) -> bool {
		return self.service_packets.contains_key(service.key());
	}

	pub fn contains_key(&self, key: &str) -> bool {
		return self.service_packets.contains_key(key);
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		return self.service_packets.keys().map(String::as_str);
	}

	pub fn len(&self) -> usize {
		return self.service_packets.len();
	}

	pub fn is_empty(&self) -> bool {
		return self.service_packets.is_empty();
	}

	/// Lists the bindings in key order
	pub fn describe(&self) -> Vec<ServiceDescription> {
		return self.service_packets.iter().map(|(key, packet)| ServiceDescription {
			key: String::clone(key),
			type_name: String::from(packet.type_name().unwrap_or_default()),
		}).collect();
	}

}
