use std::env;

use serde::{
	de::DeserializeOwned,
	Deserialize,
	Serialize,
};
use thiserror::Error;

pub const LATE_REGISTRATION_VAR: &str = "GRAPHSVC_LATE_REGISTRATION";
pub const NESTED_REGISTRATION_VAR: &str = "GRAPHSVC_NESTED_REGISTRATION";

/// What happens when a service is registered after the graph started running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateRegistrationPolicy {
	/// Last write wins, as during setup. Nodes that already hold a service
	/// context keep seeing the bindings they started with.
	#[default]
	Allow,
	Reject,
}

/// Which registrations a nested graph accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestedRegistrationPolicy {
	/// Only keys inherited from the parent may be re-bound.
	#[default]
	RejectNew,
	Allow,
}

/// Service policy applied by every scope of one graph hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphServicesConfig {
	pub late_registration: LateRegistrationPolicy,
	pub nested_registration: NestedRegistrationPolicy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Could not parse graph service config: {0}")]
	Json(#[from] serde_json::Error),
	#[error("Invalid value {value:?} for {var}")]
	InvalidValue {
		var: &'static str,
		value: String,
	},
}

impl GraphServicesConfig {

	/// Parses a JSON config. Missing fields keep their defaults.
	pub fn from_json_str(json: &str) -> Result<GraphServicesConfig, ConfigError> {
		return Ok(serde_json::from_str(json)?);
	}

	/// Builds a config from the defaults, overridden by
	/// `GRAPHSVC_LATE_REGISTRATION` and `GRAPHSVC_NESTED_REGISTRATION`.
	pub fn from_env() -> Result<GraphServicesConfig, ConfigError> {
		return GraphServicesConfig::from_lookup(|var| env::var(var).ok());
	}

	pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<GraphServicesConfig, ConfigError> {
		let mut config = GraphServicesConfig::default();
		if let Some(value) = lookup(LATE_REGISTRATION_VAR) {
			config.late_registration = parse_policy(LATE_REGISTRATION_VAR, value)?;
		}
		if let Some(value) = lookup(NESTED_REGISTRATION_VAR) {
			config.nested_registration = parse_policy(NESTED_REGISTRATION_VAR, value)?;
		}
		return Ok(config);
	}

}

/// Reads a policy name the same way it is spelled in JSON
fn parse_policy<T: DeserializeOwned>(var: &'static str, value: String) -> Result<T, ConfigError> {
	let normalized = value.trim().to_ascii_lowercase();
	return serde_json::from_value(serde_json::Value::String(normalized))
		.map_err(|_| ConfigError::InvalidValue { var, value });
}
