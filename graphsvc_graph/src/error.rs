use thiserror::Error;

use graphsvc_framework::ServiceRegistrationError;

/// An error returned by a graph service scope when a registration or run
/// transition breaks the graph's service policy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphServiceError {
	#[error(transparent)]
	Registration(#[from] ServiceRegistrationError),

	/// Nested graphs use the services of their parent graph and can't add their own.
	#[error("Service {key} cannot be registered in a nested graph; it must be registered on the top-level graph before the nested graph is created")]
	NestedScope {
		key: String,
	},

	#[error("Service {key} cannot be registered while the graph is running")]
	Running {
		key: String,
	},

	#[error("Service {key}, required by {node}, was not provided")]
	MissingService {
		node: String,
		key: String,
	},

	#[error("The graph is already running")]
	AlreadyRunning,

	#[error("The graph is not running")]
	NotRunning,
}
