use std::collections::HashMap;

use crate::{
	config::{
		ConfigError,
		LATE_REGISTRATION_VAR,
		NESTED_REGISTRATION_VAR,
	},
	GraphServicesConfig,
	LateRegistrationPolicy,
	NestedRegistrationPolicy,
};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
	let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (String::from(*k), String::from(*v))).collect();
	return move |var: &str| vars.get(var).cloned();
}

#[test]
fn defaults_are_permissive_for_late_writes() {
	let config = GraphServicesConfig::default();
	assert_eq!(config.late_registration, LateRegistrationPolicy::Allow);
	assert_eq!(config.nested_registration, NestedRegistrationPolicy::RejectNew);
}

#[test]
fn json_fills_missing_fields_with_defaults() {
	let config = GraphServicesConfig::from_json_str(r#"{ "late_registration": "reject" }"#).unwrap();
	assert_eq!(config.late_registration, LateRegistrationPolicy::Reject);
	assert_eq!(config.nested_registration, NestedRegistrationPolicy::RejectNew);

	assert_eq!(GraphServicesConfig::from_json_str("{}").unwrap(), GraphServicesConfig::default());
}

#[test]
fn json_rejects_unknown_policies() {
	let result = GraphServicesConfig::from_json_str(r#"{ "nested_registration": "sometimes" }"#);
	assert!(matches!(result, Err(ConfigError::Json(_))));
}

#[test]
fn env_overrides() {
	let config = GraphServicesConfig::from_lookup(lookup(&[
		(LATE_REGISTRATION_VAR, " Reject "),
		(NESTED_REGISTRATION_VAR, "allow"),
	])).unwrap();
	assert_eq!(config.late_registration, LateRegistrationPolicy::Reject);
	assert_eq!(config.nested_registration, NestedRegistrationPolicy::Allow);

	assert_eq!(GraphServicesConfig::from_lookup(lookup(&[])).unwrap(), GraphServicesConfig::default());
}

#[test]
fn env_reports_bad_values() {
	match GraphServicesConfig::from_lookup(lookup(&[(NESTED_REGISTRATION_VAR, "maybe")])) {
		Err(ConfigError::InvalidValue { var, value }) => {
			assert_eq!(var, NESTED_REGISTRATION_VAR);
			assert_eq!(value, "maybe");
		},
		other => panic!("Expected InvalidValue, got {:?}", other),
	}
}
