//! Process-wide default engine.
//!
//! Convenience wrappers for code that does not want to thread an [`Engine`]
//! through. The engine starts with the built-ins and the default
//! configuration.
//!
//! Each call runs against a snapshot of the engine and holds no lock, so
//! rules and transforms may call back into this module. Registration builds
//! a new engine and swaps it in; calls already running keep the snapshot
//! they started with.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::config::{ConfigError, EngineConfig};
use crate::engine::Engine;
use crate::error::Error;
use crate::rules::{RuleContext, RuleFn};
use crate::transforms::TransformFn;
use crate::value::{Inspect, InspectMut, Value, ValueMut};

static ENGINE: LazyLock<ArcSwap<Engine>> =
	LazyLock::new(|| ArcSwap::from_pointee(Engine::new()));

/// Clones the current engine, applies `edit`, and swaps the result in.
/// Retries when another registration won the race.
fn update<R>(mut edit: impl FnMut(&mut Engine) -> R) -> R {
	loop {
		let cur = ENGINE.load_full();
		let mut next = Engine::clone(&cur);
		let out = edit(&mut next);
		let prev = ENGINE.compare_and_swap(&cur, Arc::new(next));
		if Arc::ptr_eq(&prev, &cur) {
			return out;
		}
	}
}

/// See [`Engine::validate`].
pub fn validate<T: Inspect + ?Sized>(input: &T) -> Result<(), Error> {
	ENGINE.load_full().validate(input)
}

/// See [`Engine::transform`].
pub fn transform<T: InspectMut + ?Sized>(input: &mut T) -> Result<(), Error> {
	ENGINE.load_full().transform(input)
}

pub fn register_rule<F>(name: impl Into<Box<str>>, rule: F)
where
	F: Fn(&Value<'_>, &RuleContext<'_>) -> Vec<String> + Send + Sync + 'static,
{
	let name = name.into();
	let rule: RuleFn = Arc::new(rule);
	update(|engine| engine.rules_mut().register_arc(name.clone(), Arc::clone(&rule)));
}

pub fn register_transform<F>(name: impl Into<Box<str>>, transform: F)
where
	F: Fn(&mut ValueMut<'_>) -> Result<(), String> + Send + Sync + 'static,
{
	let name = name.into();
	let transform: TransformFn = Arc::new(transform);
	update(|engine| {
		engine
			.transforms_mut()
			.register_arc(name.clone(), Arc::clone(&transform));
	});
}

pub fn register_transform_with_priority<F>(name: impl Into<Box<str>>, priority: i32, transform: F)
where
	F: Fn(&mut ValueMut<'_>) -> Result<(), String> + Send + Sync + 'static,
{
	let name = name.into();
	let transform: TransformFn = Arc::new(transform);
	update(|engine| {
		let transforms = engine.transforms_mut();
		transforms.set_priority(name.clone(), priority);
		transforms.register_arc(name.clone(), Arc::clone(&transform));
	});
}

/// Replaces the global engine's configuration.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] and keeps the current settings when
/// `config` fails [`EngineConfig::check`].
pub fn configure(config: EngineConfig) -> Result<(), ConfigError> {
	config.check()?;
	update(|engine| engine.set_config(config))
}

/// Runs `f` with the current global engine.
pub fn with_engine<R>(f: impl FnOnce(&Engine) -> R) -> R {
	f(&ENGINE.load())
}
