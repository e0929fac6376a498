//! The process-wide engine.
//!
//! Every test here shares one engine, so each registers names no other test
//! uses.

use std::sync::mpsc;
use std::time::Duration;

use fieldrules::{EngineConfig, Record, global};
use pretty_assertions::assert_eq;

use arc_swap as _;
use fieldrules_macros as _;
use indexmap as _;
use insta as _;
use parking_lot as _;
use proptest as _;
use regex as _;
use rstest as _;
use rustc_hash as _;
use serde as _;
use serde_json as _;
use thiserror as _;
use toml as _;
use tracing as _;
use url as _;

#[derive(Record)]
struct Ticket {
	#[validate("required ticket_code")]
	#[transform("trim shout")]
	code: String,
}

#[test]
fn test_builtins_available() {
	#[derive(Record)]
	struct Login {
		#[validate("required email")]
		#[transform("trim lowercase")]
		email: String,
	}

	let mut login = Login {
		email: "  Ada@Example.COM ".into(),
	};
	global::transform(&mut login).unwrap();
	assert_eq!(login.email, "ada@example.com");
	global::validate(&login).unwrap();
}

#[test]
fn test_registration_is_visible() {
	global::register_rule("ticket_code", |value, _| match value.as_str() {
		Some(s) if !s.starts_with("T-") => vec!["must start with T-".into()],
		_ => Vec::new(),
	});
	global::register_transform_with_priority("shout", 50, |value| {
		if let Some(s) = value.as_string_mut() {
			*s = s.to_uppercase();
		}
		Ok(())
	});

	let mut ticket = Ticket {
		code: " t-9 ".into(),
	};
	global::transform(&mut ticket).unwrap();
	assert_eq!(ticket.code, "T-9");
	global::validate(&ticket).unwrap();

	let bad = Ticket { code: "X-1".into() };
	let err = global::validate(&bad).unwrap_err();
	assert_eq!(err.field("code"), Some(&["must start with T-".to_string()][..]));

	global::with_engine(|engine| {
		assert!(engine.rules().contains("ticket_code"));
		assert_eq!(engine.transforms().priority("shout"), 50);
	});
}

#[test]
fn test_concurrent_calls() {
	global::register_transform("global_noop", |_| Ok(()));
	let handles: Vec<_> = (0..4)
		.map(|i| {
			std::thread::spawn(move || {
				#[derive(Record)]
				struct Job {
					#[validate("min_value=0")]
					id: i32,
				}
				global::validate(&Job { id: i }).is_ok()
			})
		})
		.collect();
	for handle in handles {
		assert!(handle.join().unwrap());
	}
}

#[test]
fn test_configure() {
	global::configure(EngineConfig {
		max_depth: 64,
		..EngineConfig::default()
	})
	.unwrap();
	global::with_engine(|engine| assert_eq!(engine.config().max_depth, 64));

	let err = global::configure(EngineConfig {
		max_depth: 0,
		..EngineConfig::default()
	})
	.unwrap_err();
	assert_eq!(err.to_string(), "invalid value for max_depth: must be at least 1");
	global::with_engine(|engine| assert_eq!(engine.config().max_depth, 64));
}

#[test]
fn test_rule_reenters_while_registering() {
	#[derive(Record)]
	struct Badge {
		#[validate("required")]
		code: String,
	}

	#[derive(Record)]
	struct Visitor {
		#[validate("badge_checked")]
		badge: String,
	}

	global::register_rule("badge_checked", |value, _| {
		std::thread::sleep(Duration::from_millis(50));
		let code = value.as_str().unwrap_or_default().to_string();
		match global::validate(&Badge { code }) {
			Ok(()) => Vec::new(),
			Err(_) => vec!["badge is not valid".into()],
		}
	});

	let (tx, rx) = mpsc::channel();
	let validating = {
		let tx = tx.clone();
		std::thread::spawn(move || {
			let result = global::validate(&Visitor { badge: String::new() });
			tx.send(result.map_err(|err| err.to_string())).unwrap();
		})
	};
	let registering = std::thread::spawn(move || {
		std::thread::sleep(Duration::from_millis(10));
		global::register_rule("badge_unrelated", |_, _| Vec::new());
		tx.send(Ok(())).unwrap();
	});

	let mut results = Vec::new();
	for _ in 0..2 {
		results.push(rx.recv_timeout(Duration::from_secs(5)).expect("global engine stalled"));
	}
	validating.join().unwrap();
	registering.join().unwrap();
	assert!(results.contains(&Err("validation failed - badge badge is not valid".to_string())));
	global::with_engine(|engine| assert!(engine.rules().contains("badge_unrelated")));
}
