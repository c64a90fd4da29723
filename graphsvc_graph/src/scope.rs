use std::sync::Arc;

use serde::{
	Deserialize,
	Serialize,
};
use tracing::{
	debug,
	info,
	warn,
};
use uuid::Uuid;

use graphsvc_framework::{
	Packet,
	ServiceDescriptor,
	ServiceDescriptorBase,
	ServiceRegistry,
};

use crate::{
	config::{
		GraphServicesConfig,
		LateRegistrationPolicy,
		NestedRegistrationPolicy,
	},
	context::ServiceContext,
	error::GraphServiceError,
	requests::NodeServiceRequests,
};

/// Lifecycle of a graph as far as its services are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GraphPhase {
	Registering,
	Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScopeKind {
	Root,
	Nested {
		depth: usize,
	},
}


/// # Services of one graph instance.
///
/// The scope owns the graph's [`ServiceRegistry`] and decides which writes
/// reach it. The registry itself accepts any non-empty binding; the rules
/// below belong to the graph:
///
/// - A nested scope starts from a snapshot of its parent's bindings and, by
///   default, refuses keys its parent did not provide.
/// - Once [`start_run`](GraphServiceScope::start_run) succeeds the graph is
///   running. Late registrations are allowed by default (last write wins)
///   and can be turned off with [`LateRegistrationPolicy::Reject`].
///
/// Running nodes read through [`ServiceContext`]s. Writes made while contexts
/// are alive copy the registry first, so a context never observes a binding
/// change.
#[derive(Debug)]
pub struct GraphServiceScope {
	graph_id: Uuid,
	parent_id: Option<Uuid>,
	kind: ScopeKind,
	phase: GraphPhase,
	config: GraphServicesConfig,
	registry: Arc<ServiceRegistry>,
}

impl GraphServiceScope {

	/// Creates the scope of a top-level graph with no services.
	pub fn root(config: GraphServicesConfig) -> GraphServiceScope {
		let scope = GraphServiceScope {
			graph_id: Uuid::new_v4(),
			parent_id: None,
			kind: ScopeKind::Root,
			phase: GraphPhase::Registering,
			config,
			registry: Arc::new(ServiceRegistry::new()),
		};
		debug!(graph_id = %scope.graph_id, ?config, "Created root graph service scope");
		return scope;
	}

	/// Creates the scope of a graph nested in this one. The nested scope
	/// inherits this scope's config and a snapshot of its bindings.
	pub fn nested(&self) -> GraphServiceScope {
		let depth = match self.kind {
			ScopeKind::Root => 1,
			ScopeKind::Nested { depth } => depth + 1,
		};
		let scope = GraphServiceScope {
			graph_id: Uuid::new_v4(),
			parent_id: Some(self.graph_id),
			kind: ScopeKind::Nested { depth },
			phase: GraphPhase::Registering,
			config: self.config,
			registry: Arc::new(ServiceRegistry::inherit(Some(self.registry.as_ref()))),
		};
		debug!(
			graph_id = %scope.graph_id,
			parent_id = %self.graph_id,
			depth,
			services = scope.registry.len(),
			"Created nested graph service scope"
		);
		return scope;
	}

	pub fn graph_id(&self) -> Uuid {
		return self.graph_id;
	}

	pub fn parent_id(&self) -> Option<Uuid> {
		return self.parent_id;
	}

	pub fn kind(&self) -> ScopeKind {
		return self.kind;
	}

	pub fn is_nested(&self) -> bool {
		return matches!(self.kind, ScopeKind::Nested { .. });
	}

	pub fn phase(&self) -> GraphPhase {
		return self.phase;
	}

	pub fn config(&self) -> &GraphServicesConfig {
		return &self.config;
	}

	pub fn registry(&self) -> &ServiceRegistry {
		return &self.registry;
	}

	/// Binds `object` to `service` if the graph's policy allows it.
	pub fn set_service_object<T>(&mut self, service: &ServiceDescriptor<T>, object: impl Into<Option<Arc<T>>>) -> Result<(), GraphServiceError>
	where
		T: ?Sized + Send + Sync + 'static,
	{
		self.check_registration(service.base())?;
		Arc::make_mut(&mut self.registry).set_object(service, object)?;
		return Ok(());
	}

	/// Binds a type-erased packet to `service` if the graph's policy allows it.
	pub fn set_service_packet(&mut self, service: &ServiceDescriptorBase, packet: Packet) -> Result<(), GraphServiceError> {
		self.check_registration(service)?;
		Arc::make_mut(&mut self.registry).set_packet(service, packet)?;
		return Ok(());
	}

	pub fn get_service_object<T>(&self, service: &ServiceDescriptor<T>) -> Option<Arc<T>>
	where
		T: ?Sized + Send + Sync + 'static,
	{
		return self.registry.get_object(service);
	}

	pub fn get_service_packet(&self, service: &ServiceDescriptorBase) -> Packet {
		return self.registry.get_packet(service);
	}

	fn check_registration(&self, service: &ServiceDescriptorBase) -> Result<(), GraphServiceError> {
		if self.phase == GraphPhase::Running {
			match self.config.late_registration {
				LateRegistrationPolicy::Reject => {
					return Err(GraphServiceError::Running { key: String::from(service.key()) });
				},
				LateRegistrationPolicy::Allow => {
					warn!(graph_id = %self.graph_id, key = service.key(), "Service registered while the graph is running");
				},
			}
		}

		if self.is_nested()
			&& self.config.nested_registration == NestedRegistrationPolicy::RejectNew
			&& !self.registry.contains(service)
		{
			return Err(GraphServiceError::NestedScope { key: String::from(service.key()) });
		}

		return Ok(());
	}

	/// Checks that every service a node can't run without has been provided.
	/// Missing optional services are only logged.
	pub fn validate_requests(&self, nodes: &[NodeServiceRequests]) -> Result<(), GraphServiceError> {
		for node in nodes {
			for request in node.requests.iter() {
				if self.registry.contains_key(&request.key) {
					continue;
				}
				if request.optional {
					debug!(graph_id = %self.graph_id, node = %node.node, key = %request.key, "Optional service not provided");
				} else {
					return Err(GraphServiceError::MissingService {
						node: String::clone(&node.node),
						key: String::clone(&request.key),
					});
				}
			}
		}
		return Ok(());
	}

	/// Ends the registration phase. Fails without changing phase if a node
	/// requires a service that isn't registered.
	pub fn start_run(&mut self, nodes: &[NodeServiceRequests]) -> Result<ServiceContext, GraphServiceError> {
		if self.phase == GraphPhase::Running {
			return Err(GraphServiceError::AlreadyRunning);
		}
		self.validate_requests(nodes)?;

		self.phase = GraphPhase::Running;
		info!(graph_id = %self.graph_id, services = self.registry.len(), nodes = nodes.len(), "Graph services ready");
		return Ok(self.context());
	}

	/// Returns the graph to its registration phase.
	pub fn finish_run(&mut self) -> Result<(), GraphServiceError> {
		if self.phase != GraphPhase::Running {
			return Err(GraphServiceError::NotRunning);
		}
		self.phase = GraphPhase::Registering;
		info!(graph_id = %self.graph_id, "Graph run finished");
		return Ok(());
	}

	/// Read-only view of the current bindings
	pub fn context(&self) -> ServiceContext {
		return ServiceContext::new(self.graph_id, Arc::clone(&self.registry));
	}

}
