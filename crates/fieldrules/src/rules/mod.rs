//! Named validation rules.
//!
//! A rule inspects one field value and returns the violations it found. An
//! empty vector means the value passed. Rules never see the record itself;
//! everything they need comes through the [`RuleContext`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use crate::tag::RuleTag;
use crate::value::Value;

mod builtins;

pub use builtins::register_builtins;

/// Signature shared by every rule.
pub type RuleFn = Arc<dyn Fn(&Value<'_>, &RuleContext<'_>) -> Vec<String> + Send + Sync>;

/// Per-invocation data handed to a rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
	path: &'a str,
	tag: &'a RuleTag<'a>,
}

impl<'a> RuleContext<'a> {
	pub fn new(path: &'a str, tag: &'a RuleTag<'a>) -> Self {
		Self { path, tag }
	}

	/// Qualified path of the field being checked, e.g. `Items[0].Name`.
	pub fn path(&self) -> &'a str {
		self.path
	}

	/// The field's whole validation tag.
	pub fn tag(&self) -> &'a RuleTag<'a> {
		self.tag
	}

	/// Shorthand for [`RuleTag::param`].
	pub fn param(&self, name: &str) -> Option<&'a str> {
		self.tag.param(name)
	}

	/// Parses the parameter `name`.
	///
	/// `Ok(None)` when the tag has no such parameter. A parameter that does
	/// not parse yields the violation message `invalid <name>: <raw>`.
	pub fn parsed_param<T: FromStr>(&self, name: &str) -> Result<Option<T>, String> {
		match self.param(name) {
			None => Ok(None),
			Some(raw) => raw
				.parse()
				.map(Some)
				.map_err(|_| format!("invalid {name}: {raw}")),
		}
	}
}

/// Name to rule mapping.
///
/// Registering a name that already exists replaces the previous rule.
#[derive(Clone, Default)]
pub struct RuleRegistry {
	rules: HashMap<Box<str>, RuleFn>,
}

impl RuleRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a registry holding the built-in rules.
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		register_builtins(&mut registry);
		registry
	}

	pub fn register<F>(&mut self, name: impl Into<Box<str>>, rule: F)
	where
		F: Fn(&Value<'_>, &RuleContext<'_>) -> Vec<String> + Send + Sync + 'static,
	{
		self.register_arc(name, Arc::new(rule));
	}

	pub fn register_arc(&mut self, name: impl Into<Box<str>>, rule: RuleFn) {
		let name = name.into();
		if self.rules.insert(name.clone(), rule).is_some() {
			tracing::debug!(domain = "rules", name = %name, "replaced rule");
		}
	}

	pub fn get(&self, name: &str) -> Option<&RuleFn> {
		self.rules.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.rules.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// Registered names, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<_> = self.rules.keys().map(AsRef::as_ref).collect();
		names.sort_unstable();
		names
	}
}

impl fmt::Debug for RuleRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RuleRegistry")
			.field("rules", &self.names())
			.finish()
	}
}
