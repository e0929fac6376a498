//! Named field transforms and their ordering.
//!
//! A transform rewrites a field in place. When a tag lists several
//! transforms they run by ascending priority, not declaration order, so
//! `"lowercase trim"` and `"trim lowercase"` behave the same. Transforms of
//! equal priority keep their declared order.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use crate::tag::transform_names;
use crate::value::ValueMut;

mod builtins;

pub use builtins::register_builtins;

/// Signature shared by every transform.
pub type TransformFn = Arc<dyn Fn(&mut ValueMut<'_>) -> Result<(), String> + Send + Sync>;

/// Priority of a transform registered without one. Higher than every
/// built-in, so custom transforms run after the built-ins by default.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Name to transform mapping, plus a priority table.
///
/// Priorities are stored apart from the functions: replacing a transform
/// with [`register`](Self::register) keeps whatever priority the name
/// already had.
#[derive(Clone, Default)]
pub struct TransformRegistry {
	transforms: HashMap<Box<str>, TransformFn>,
	priorities: HashMap<Box<str>, i32>,
}

impl TransformRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a registry holding the built-in transforms.
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		register_builtins(&mut registry);
		registry
	}

	pub fn register<F>(&mut self, name: impl Into<Box<str>>, transform: F)
	where
		F: Fn(&mut ValueMut<'_>) -> Result<(), String> + Send + Sync + 'static,
	{
		self.register_arc(name, Arc::new(transform));
	}

	pub fn register_with_priority<F>(&mut self, name: impl Into<Box<str>>, priority: i32, transform: F)
	where
		F: Fn(&mut ValueMut<'_>) -> Result<(), String> + Send + Sync + 'static,
	{
		let name = name.into();
		self.set_priority(name.clone(), priority);
		self.register_arc(name, Arc::new(transform));
	}

	pub fn register_arc(&mut self, name: impl Into<Box<str>>, transform: TransformFn) {
		let name = name.into();
		if self.transforms.insert(name.clone(), transform).is_some() {
			tracing::debug!(domain = "transforms", name = %name, "replaced transform");
		}
	}

	pub fn set_priority(&mut self, name: impl Into<Box<str>>, priority: i32) {
		self.priorities.insert(name.into(), priority);
	}

	/// Priority used when ordering `name`.
	pub fn priority(&self, name: &str) -> i32 {
		self.priorities.get(name).copied().unwrap_or(DEFAULT_PRIORITY)
	}

	pub fn get(&self, name: &str) -> Option<&TransformFn> {
		self.transforms.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.transforms.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.transforms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transforms.is_empty()
	}

	/// Registered names, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<_> = self.transforms.keys().map(AsRef::as_ref).collect();
		names.sort_unstable();
		names
	}

	/// Names from a transform tag in the order they will run.
	///
	/// Unregistered names are kept; [`plan`](Self::plan) drops them.
	pub fn order<'t>(&self, tag: &'t str) -> Vec<&'t str> {
		let mut names: Vec<_> = transform_names(tag).collect();
		names.sort_by_key(|name| self.priority(name));
		names
	}

	/// Resolves a transform tag to the functions to apply, in order.
	pub fn plan<'t>(&self, tag: &'t str) -> Vec<(&'t str, &TransformFn)> {
		self.order(tag)
			.into_iter()
			.filter_map(|name| match self.get(name) {
				Some(transform) => Some((name, transform)),
				None => {
					tracing::trace!(domain = "transforms", name, "unknown transform");
					None
				}
			})
			.collect()
	}
}

impl fmt::Debug for TransformRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let entries: Vec<_> = self
			.names()
			.into_iter()
			.map(|name| (name, self.priority(name)))
			.collect();
		f.debug_struct("TransformRegistry")
			.field("transforms", &entries)
			.finish()
	}
}
