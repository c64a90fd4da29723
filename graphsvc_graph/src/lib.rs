pub mod config;
pub mod context;
pub mod error;
pub mod requests;
pub mod scope;

#[cfg(test)]
mod tests;

pub use config::{
	ConfigError,
	GraphServicesConfig,
	LateRegistrationPolicy,
	NestedRegistrationPolicy,
};
pub use context::ServiceContext;
pub use error::GraphServiceError;
pub use requests::{
	NodeServiceRequests,
	ServiceRequest,
};
pub use scope::{
	GraphPhase,
	GraphServiceScope,
	ScopeKind,
};
pub use graphsvc_framework::*;
