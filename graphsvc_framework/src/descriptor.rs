use std::{
	cmp::Ordering,
	fmt,
	hash::{
		Hash,
		Hasher,
	},
	marker::PhantomData,
	ops::Deref,
};


/// Untyped half of a service descriptor. Two descriptors name the same
/// service iff their keys are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceDescriptorBase {
	key: &'static str,
}

impl ServiceDescriptorBase {
	pub const fn new(key: &'static str) -> ServiceDescriptorBase {
		return ServiceDescriptorBase { key };
	}

	pub const fn key(&self) -> &'static str {
		return self.key;
	}
}

impl fmt::Display for ServiceDescriptorBase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		return f.write_str(self.key);
	}
}


/// Identifies a service of type `T`.
///
/// The type parameter only exists at compile time to make `set_object` and
/// `get_object` type-safe; at run time a descriptor is just its key. `T` may
/// be unsized, so `ServiceDescriptor<dyn Logger>` describes a service shared
/// as `Arc<dyn Logger>`.
///
/// ```
/// use graphsvc_framework::ServiceDescriptor;
///
/// struct ThreadPool;
/// const THREAD_POOL: ServiceDescriptor<ThreadPool> = ServiceDescriptor::new("thread_pool");
/// assert_eq!(THREAD_POOL.key(), "thread_pool");
/// ```
pub struct ServiceDescriptor<T: ?Sized + 'static> {
	base: ServiceDescriptorBase,
	_type: PhantomData<fn() -> *const T>,
}

impl<T: ?Sized + 'static> ServiceDescriptor<T> {
	pub const fn new(key: &'static str) -> ServiceDescriptor<T> {
		return ServiceDescriptor {
			base: ServiceDescriptorBase::new(key),
			_type: PhantomData,
		};
	}

	pub const fn key(&self) -> &'static str {
		return self.base.key;
	}

	pub const fn base(&self) -> &ServiceDescriptorBase {
		return &self.base;
	}
}

// Implemented by hand so none of these require anything of `T`

impl<T: ?Sized + 'static> Clone for ServiceDescriptor<T> {
	fn clone(&self) -> Self {
		return *self;
	}
}

impl<T: ?Sized + 'static> Copy for ServiceDescriptor<T> {}

impl<T: ?Sized + 'static> fmt::Debug for ServiceDescriptor<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		return f.debug_struct("ServiceDescriptor")
			.field("key", &self.base.key)
			.field("type", &std::any::type_name::<T>())
			.finish();
	}
}

impl<T: ?Sized + 'static, U: ?Sized + 'static> PartialEq<ServiceDescriptor<U>> for ServiceDescriptor<T> {
	fn eq(&self, other: &ServiceDescriptor<U>) -> bool {
		return self.base == other.base;
	}
}

impl<T: ?Sized + 'static> Eq for ServiceDescriptor<T> {}

impl<T: ?Sized + 'static> PartialOrd for ServiceDescriptor<T> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		return Some(self.cmp(other));
	}
}

impl<T: ?Sized + 'static> Ord for ServiceDescriptor<T> {
	fn cmp(&self, other: &Self) -> Ordering {
		return self.base.cmp(&other.base);
	}
}

impl<T: ?Sized + 'static> Hash for ServiceDescriptor<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.base.hash(state);
	}
}

impl<T: ?Sized + 'static> Deref for ServiceDescriptor<T> {
	type Target = ServiceDescriptorBase;

	fn deref(&self) -> &Self::Target {
		return &self.base;
	}
}

impl<T: ?Sized + 'static> From<ServiceDescriptor<T>> for ServiceDescriptorBase {
	fn from(descriptor: ServiceDescriptor<T>) -> Self {
		return descriptor.base;
	}
}


/// Implemented by types that declare their own descriptor, usually through
/// `#[graph_service("key")]`.
pub trait GraphService: Send + Sync + 'static {
	const SERVICE: ServiceDescriptor<Self>;
}
