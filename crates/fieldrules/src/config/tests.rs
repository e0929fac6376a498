use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_defaults() {
	let config = EngineConfig::default();
	assert_eq!(config.max_depth, 32);
	assert!(config.validate_nested);
	assert_eq!(EngineConfig::from_toml("").unwrap(), config);
}

#[test]
fn test_partial_document() {
	let config = EngineConfig::from_toml("validate_nested = false").unwrap();
	assert_eq!(
		config,
		EngineConfig {
			max_depth: 32,
			validate_nested: false,
		}
	);
}

#[test]
fn test_unknown_key_rejected() {
	let err = EngineConfig::from_toml("max_dept = 3").unwrap_err();
	assert!(matches!(err, ConfigError::Toml(_)), "{err}");
}

#[test]
fn test_zero_depth_rejected() {
	let err = EngineConfig::from_toml("max_depth = 0").unwrap_err();
	assert_eq!(err.to_string(), "invalid value for max_depth: must be at least 1");
}

#[test]
fn test_load_missing_file() {
	let err = EngineConfig::load("/definitely/not/here/fieldrules.toml").unwrap_err();
	let ConfigError::Io { path, .. } = err else {
		panic!("expected io error");
	};
	assert!(path.ends_with("fieldrules.toml"));
}

#[test]
fn test_load_file() {
	let path = std::env::temp_dir().join(format!("fieldrules-config-{}.toml", std::process::id()));
	std::fs::write(&path, "max_depth = 4\n").unwrap();
	let config = EngineConfig::load(&path);
	std::fs::remove_file(&path).unwrap();
	assert_eq!(config.unwrap().max_depth, 4);
}
