//! Transformation through derived records.

use fieldrules::{Engine, ErrorKind, Record, ValueMut};
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

#[derive(Record, Debug, PartialEq)]
struct Contact {
	#[transform("trim lowercase")]
	email: String,
	#[transform("lowercase trim")]
	handle: String,
	#[transform("uppercase remove_whitespace")]
	code: String,
}

#[test]
fn test_priority_not_declaration_order() {
	let mut contact = Contact {
		email: "  ABC  ".into(),
		handle: "  ABC  ".into(),
		code: " ab c\td ".into(),
	};
	Engine::new().transform(&mut contact).unwrap();
	assert_eq!(
		contact,
		Contact {
			email: "abc".into(),
			handle: "abc".into(),
			code: "ABCD".into(),
		}
	);
}

#[test]
fn test_transform_is_idempotent() {
	let engine = Engine::new();
	let mut contact = Contact {
		email: " Mixed@Example.COM ".into(),
		handle: "\tHandle ".into(),
		code: "x y z".into(),
	};
	engine.transform(&mut contact).unwrap();
	let once = (contact.email.clone(), contact.handle.clone(), contact.code.clone());
	engine.transform(&mut contact).unwrap();
	assert_eq!((contact.email, contact.handle, contact.code), once);
}

#[test]
fn test_nested_and_sequence_records() {
	#[derive(Record)]
	#[record(rename_all = "PascalCase")]
	struct Item {
		#[transform("trim uppercase")]
		name: String,
		#[transform("trim")]
		tags: Vec<String>,
	}

	#[derive(Record)]
	#[record(rename_all = "PascalCase")]
	struct Order {
		#[transform("trim")]
		reference: String,
		primary: Option<Item>,
		items: Vec<Item>,
		boxed: Box<Item>,
	}

	let mut order = Order {
		reference: " R-1 ".into(),
		primary: Some(Item {
			name: " first ".into(),
			tags: vec![" a ".into()],
		}),
		items: vec![
			Item {
				name: " second ".into(),
				tags: vec![],
			},
			Item {
				name: "third ".into(),
				tags: vec![" b".into(), "c ".into()],
			},
		],
		boxed: Box::new(Item {
			name: " fourth".into(),
			tags: vec![],
		}),
	};
	Engine::new().transform(&mut order).unwrap();

	assert_eq!(order.reference, "R-1");
	let primary = order.primary.as_ref().unwrap();
	assert_eq!(primary.name, "FIRST");
	assert_eq!(primary.tags, ["a"]);
	assert_eq!(order.items[0].name, "SECOND");
	assert_eq!(order.items[1].name, "THIRD");
	assert_eq!(order.items[1].tags, ["b", "c"]);
	assert_eq!(order.boxed.name, "FOURTH");
}

#[test]
fn test_failures_are_qualified_and_siblings_continue() {
	#[derive(Record)]
	#[record(rename_all = "PascalCase")]
	struct Line {
		#[transform("digits_only")]
		sku: String,
		#[transform("trim")]
		label: String,
	}

	#[derive(Record)]
	#[record(rename_all = "PascalCase")]
	struct Cart {
		lines: Vec<Line>,
		#[transform("uppercase")]
		owner: String,
	}

	let mut engine = Engine::new();
	engine.register_transform("digits_only", |value| {
		let Some(s) = value.as_string_mut() else {
			return Ok(());
		};
		if s.chars().all(|c| c.is_ascii_digit()) {
			Ok(())
		} else {
			Err(format!("{s:?} is not numeric"))
		}
	});

	let mut cart = Cart {
		lines: vec![
			Line {
				sku: "123".into(),
				label: " ok ".into(),
			},
			Line {
				sku: "12x".into(),
				label: " still trimmed ".into(),
			},
		],
		owner: "ann".into(),
	};
	let err = engine.transform(&mut cart).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Transformation);
	assert_eq!(err.message(), "transformation failed");
	assert_eq!(
		err.field("Lines[1].Sku"),
		Some(&["\"12x\" is not numeric".to_string()][..])
	);
	assert_eq!(err.fields().len(), 1);
	assert_eq!(cart.lines[1].label, "still trimmed");
	assert_eq!(cart.owner, "ANN");
}

#[test]
fn test_custom_transform_default_priority() {
	#[derive(Record)]
	struct Slug {
		#[transform("hyphenate trim lowercase")]
		value: String,
	}

	let mut engine = Engine::new();
	engine.register_transform("hyphenate", |value| {
		if let Some(s) = value.as_string_mut() {
			*s = s.replace(' ', "-");
		}
		Ok(())
	});

	let mut slug = Slug {
		value: "  Hello Big World ".into(),
	};
	engine.transform(&mut slug).unwrap();
	assert_eq!(slug.value, "hello-big-world");
}

#[test]
fn test_custom_transform_explicit_priority() {
	#[derive(Record)]
	struct Padded {
		#[transform("trim mark")]
		value: String,
	}

	let mut engine = Engine::new();
	engine.register_transform_with_priority("mark", 0, |value| {
		if let Some(s) = value.as_string_mut() {
			s.push(' ');
		}
		Ok(())
	});

	let mut padded = Padded { value: "x".into() };
	engine.transform(&mut padded).unwrap();
	assert_eq!(padded.value, "x");
}

#[test]
fn test_numeric_fields_via_downcast() {
	#[derive(Record)]
	struct Reading {
		#[transform("clamp")]
		percent: i64,
	}

	let mut engine = Engine::new();
	engine.register_transform("clamp", |value| {
		if let Some(n) = value.downcast_mut::<i64>() {
			*n = (*n).clamp(0, 100);
		}
		Ok(())
	});

	let mut reading = Reading { percent: 140 };
	engine.transform(&mut reading).unwrap();
	assert_eq!(reading.percent, 100);
}

#[test]
fn test_readonly_fields_untouched() {
	#[derive(Record)]
	struct Frozen {
		#[transform("uppercase")]
		open: String,
		#[record(readonly)]
		#[validate("required")]
		shut: String,
	}

	let mut frozen = Frozen {
		open: "a".into(),
		shut: "b".into(),
	};
	let fields = frozen.fields_mut();
	assert!(matches!(fields[1].value, ValueMut::Immutable));
	drop(fields);

	Engine::new().transform(&mut frozen).unwrap();
	assert_eq!(frozen.open, "A");
	assert_eq!(frozen.shut, "b");
}

#[test]
fn test_non_record_input_rejected() {
	let mut list = vec![String::from(" a ")];
	let err = Engine::new().transform(&mut list).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidInput);
	assert_eq!(err.message(), "input must be a struct");
	assert_eq!(list, [" a "]);
}
