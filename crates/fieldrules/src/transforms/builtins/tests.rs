use proptest::prelude::*;

use super::*;
use crate::value::InspectMut;

fn apply(name: &str, value: &mut impl InspectMut) {
	let mut registry = TransformRegistry::new();
	register_builtins(&mut registry);
	let transform = registry.get(name).unwrap();
	transform(&mut value.view_mut()).unwrap();
}

#[test]
fn test_trim() {
	let mut s = String::from(" \t hi there \n");
	apply("trim", &mut s);
	assert_eq!(s, "hi there");
}

#[test]
fn test_remove_whitespace() {
	let mut s = String::from(" a b\tc\r\nd ");
	apply("remove_whitespace", &mut s);
	assert_eq!(s, "abcd");
}

#[test]
fn test_case_transforms() {
	let mut s = String::from("MiXeD");
	apply("lowercase", &mut s);
	assert_eq!(s, "mixed");
	apply("uppercase", &mut s);
	assert_eq!(s, "MIXED");
}

#[test]
fn test_sequences_are_mapped() {
	let mut tags = vec![String::from(" A "), String::from("b ")];
	apply("trim", &mut tags);
	apply("uppercase", &mut tags);
	assert_eq!(tags, ["A", "B"]);
}

#[test]
fn test_option_strings() {
	let mut some = Some(String::from(" Hi "));
	apply("trim", &mut some);
	assert_eq!(some.as_deref(), Some("Hi"));

	let mut none: Option<String> = None;
	apply("trim", &mut none);
	assert_eq!(none, None);
}

#[test]
fn test_non_strings_unchanged() {
	let mut n = 42i32;
	apply("uppercase", &mut n);
	assert_eq!(n, 42);
}

proptest! {
	#[test]
	fn test_builtins_are_idempotent(
		input in "[ \\ta-zA-Z0-9éß]{0,24}",
		name in prop::sample::select(vec!["trim", "remove_whitespace", "lowercase", "uppercase"]),
	) {
		let mut once = input.clone();
		apply(name, &mut once);
		let mut twice = once.clone();
		apply(name, &mut twice);
		prop_assert_eq!(once, twice);
	}
}
