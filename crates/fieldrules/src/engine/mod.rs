//! The validation and transformation engine.
//!
//! An [`Engine`] owns a rule registry, a transform registry and its
//! configuration. Registration takes `&mut self`; the two walks take `&self`,
//! so a configured engine can be shared freely between threads.

use crate::config::{ConfigError, EngineConfig};
use crate::error::{Error, ErrorKind};
use crate::rules::{RuleContext, RuleRegistry};
use crate::transforms::TransformRegistry;
use crate::value::{Inspect, InspectMut, Value, ValueMut};

mod transform;
mod validate;

/// Dispatches field tags to registered rules and transforms.
#[derive(Debug, Clone)]
pub struct Engine {
	rules: RuleRegistry,
	transforms: TransformRegistry,
	config: EngineConfig,
}

impl Default for Engine {
	fn default() -> Self {
		Self::new()
	}
}

impl Engine {
	/// Creates an engine with every built-in rule and transform.
	pub fn new() -> Self {
		Self {
			rules: RuleRegistry::with_builtins(),
			transforms: TransformRegistry::with_builtins(),
			config: EngineConfig::default(),
		}
	}

	/// Creates an engine with the built-ins and the given configuration.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidValue`] when `config` fails
	/// [`EngineConfig::check`].
	pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
		let mut engine = Self::new();
		engine.set_config(config)?;
		Ok(engine)
	}

	/// Creates an engine with empty registries.
	pub fn empty() -> Self {
		Self {
			rules: RuleRegistry::new(),
			transforms: TransformRegistry::new(),
			config: EngineConfig::default(),
		}
	}

	pub fn rules(&self) -> &RuleRegistry {
		&self.rules
	}

	pub fn rules_mut(&mut self) -> &mut RuleRegistry {
		&mut self.rules
	}

	pub fn transforms(&self) -> &TransformRegistry {
		&self.transforms
	}

	pub fn transforms_mut(&mut self) -> &mut TransformRegistry {
		&mut self.transforms
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// Replaces the configuration, leaving the current one in place if
	/// `config` fails [`EngineConfig::check`].
	pub fn set_config(&mut self, config: EngineConfig) -> Result<(), ConfigError> {
		config.check()?;
		self.config = config;
		Ok(())
	}

	/// Registers or replaces a rule.
	pub fn register_rule<F>(&mut self, name: impl Into<Box<str>>, rule: F)
	where
		F: Fn(&Value<'_>, &RuleContext<'_>) -> Vec<String> + Send + Sync + 'static,
	{
		self.rules.register(name, rule);
	}

	/// Registers or replaces a transform. A new name runs at
	/// [`DEFAULT_PRIORITY`](crate::DEFAULT_PRIORITY); a replaced one keeps its
	/// priority.
	pub fn register_transform<F>(&mut self, name: impl Into<Box<str>>, transform: F)
	where
		F: Fn(&mut ValueMut<'_>) -> Result<(), String> + Send + Sync + 'static,
	{
		self.transforms.register(name, transform);
	}

	pub fn register_transform_with_priority<F>(
		&mut self,
		name: impl Into<Box<str>>,
		priority: i32,
		transform: F,
	) where
		F: Fn(&mut ValueMut<'_>) -> Result<(), String> + Send + Sync + 'static,
	{
		self.transforms
			.register_with_priority(name, priority, transform);
	}

	/// Checks every tagged field of `input` and reports all violations.
	///
	/// # Errors
	///
	/// [`ErrorKind::InvalidInput`] when `input` is `None` or not a record,
	/// [`ErrorKind::Validation`] when any rule reported a violation.
	pub fn validate<T: Inspect + ?Sized>(&self, input: &T) -> Result<(), Error> {
		let record = match input.view() {
			Value::Record(record) => record,
			Value::Absent => return Err(Error::invalid_input("invalid payload")),
			_ => return Err(Error::invalid_input("input must be a struct")),
		};
		let mut walk = validate::Walk::new(self);
		walk.record(record, "", 0);
		let violations = walk.finish();
		tracing::debug!(
			record = record.record_name(),
			failed_fields = violations.len(),
			"validated"
		);
		violations.into_result(ErrorKind::Validation, "validation failed")
	}

	/// Applies every field's transform tag in place, nested records first.
	///
	/// A failing transform stops the remaining transforms for that field
	/// only; siblings and later fields are still processed.
	///
	/// # Errors
	///
	/// [`ErrorKind::InvalidInput`] when `input` is `None` or not a record,
	/// [`ErrorKind::Transformation`] when any transform failed.
	pub fn transform<T: InspectMut + ?Sized>(&self, input: &mut T) -> Result<(), Error> {
		let record = match input.view_mut() {
			ValueMut::Record(record) => record,
			ValueMut::Absent => return Err(Error::invalid_input("invalid payload")),
			_ => return Err(Error::invalid_input("input must be a struct")),
		};
		let name = record.record_name();
		let mut walk = transform::Walk::new(self);
		walk.record(record, "", 0);
		let failures = walk.finish();
		tracing::debug!(record = name, failed_fields = failures.len(), "transformed");
		failures.into_result(ErrorKind::Transformation, "transformation failed")
	}
}

/// Joins a parent path and a field name.
fn qualify(prefix: &str, name: &str) -> String {
	if prefix.is_empty() {
		name.to_string()
	} else {
		format!("{prefix}.{name}")
	}
}

fn depth_exceeded(max_depth: usize) -> String {
	format!("exceeds maximum nesting depth of {max_depth}")
}
