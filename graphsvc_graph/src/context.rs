use std::sync::Arc;

use uuid::Uuid;

use graphsvc_framework::{
	Packet,
	ServiceDescriptor,
	ServiceDescriptorBase,
	ServiceRegistry,
};

use crate::error::GraphServiceError;

/// Read-only view of a graph's services, handed to nodes when the graph
/// starts running.
///
/// A context holds the bindings as they were when it was created. Cloning it
/// is cheap and it can be shared freely between worker threads.
#[derive(Debug, Clone)]
pub struct ServiceContext {
	graph_id: Uuid,
	node: Option<Arc<str>>,
	registry: Arc<ServiceRegistry>,
}

impl ServiceContext {
	pub(crate) fn new(graph_id: Uuid, registry: Arc<ServiceRegistry>) -> ServiceContext {
		return ServiceContext {
			graph_id,
			node: None,
			registry,
		};
	}

	/// Returns a copy of this context that names `node` in its errors
	pub fn for_node(&self, node: impl Into<String>) -> ServiceContext {
		return ServiceContext {
			graph_id: self.graph_id,
			node: Some(Arc::from(node.into())),
			registry: Arc::clone(&self.registry),
		};
	}

	pub fn graph_id(&self) -> Uuid {
		return self.graph_id;
	}

	pub fn node(&self) -> Option<&str> {
		return self.node.as_deref();
	}

	pub fn get_object<T>(&self, service: &ServiceDescriptor<T>) -> Option<Arc<T>>
	where
		T: ?Sized + Send + Sync + 'static,
	{
		return self.registry.get_object(service);
	}

	/// Like `get_object`, but treats absence as an error for services the
	/// node can't do without.
	pub fn require_object<T>(&self, service: &ServiceDescriptor<T>) -> Result<Arc<T>, GraphServiceError>
	where
		T: ?Sized + Send + Sync + 'static,
	{
		return self.registry.get_object(service).ok_or_else(|| GraphServiceError::MissingService {
			node: String::from(self.node().unwrap_or("graph")),
			key: String::from(service.key()),
		});
	}

	pub fn get_packet(&self, service: &ServiceDescriptorBase) -> Packet {
		return self.registry.get_packet(service);
	}

	pub fn registry(&self) -> &ServiceRegistry {
		return &self.registry;
	}
}
