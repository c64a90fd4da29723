use serde::{
	Deserialize,
	Serialize,
};

use graphsvc_framework::ServiceDescriptor;

/// A node's declaration that it uses a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
	pub key: String,

	/// Optional services may be absent when the graph starts; the node is
	/// expected to fall back on its own.
	#[serde(default)]
	pub optional: bool,
}

impl ServiceRequest {
	pub fn required<T: ?Sized + 'static>(service: &ServiceDescriptor<T>) -> ServiceRequest {
		return ServiceRequest {
			key: String::from(service.key()),
			optional: false,
		};
	}

	pub fn optional<T: ?Sized + 'static>(service: &ServiceDescriptor<T>) -> ServiceRequest {
		return ServiceRequest {
			key: String::from(service.key()),
			optional: true,
		};
	}
}

/// Every service request made by one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeServiceRequests {
	pub node: String,
	#[serde(default)]
	pub requests: Vec<ServiceRequest>,
}

impl NodeServiceRequests {
	pub fn new(node: impl Into<String>) -> NodeServiceRequests {
		return NodeServiceRequests {
			node: node.into(),
			requests: Vec::new(),
		};
	}

	/// Declares a service the node can't run without
	pub fn uses<T: ?Sized + 'static>(mut self, service: &ServiceDescriptor<T>) -> NodeServiceRequests {
		self.requests.push(ServiceRequest::required(service));
		return self;
	}

	/// Declares a service the node will use if the graph provides it
	pub fn may_use<T: ?Sized + 'static>(mut self, service: &ServiceDescriptor<T>) -> NodeServiceRequests {
		self.requests.push(ServiceRequest::optional(service));
		return self;
	}
}
