use super::*;

#[test]
fn test_numeric_views_widen() {
	assert_eq!(7u8.view().as_f64(), Some(7.0));
	assert_eq!((-3i16).view().as_f64(), Some(-3.0));
	assert_eq!(2.5f32.view().as_f64(), Some(2.5));
	assert_eq!("x".view().as_f64(), None);
}

#[test]
fn test_string_len_counts_chars() {
	let s = String::from("héllo");
	assert_eq!(s.view().len(), Some(5));
}

#[test]
fn test_option_none_is_absent() {
	let none: Option<String> = None;
	assert!(matches!(none.view(), Value::Absent));
	assert!(none.view().is_empty());

	let some = Some(String::from("x"));
	assert_eq!(some.view().as_str(), Some("x"));
}

#[test]
fn test_vec_inspects_elements() {
	let tags = vec![String::from("a"), String::from("b")];
	let Value::Seq(items) = tags.view() else {
		panic!("expected sequence");
	};
	assert_eq!(items.len(), 2);
	assert_eq!(items[1].as_str(), Some("b"));
}

#[test]
fn test_empty_values() {
	assert!(String::new().view().is_empty());
	assert!(0i32.view().is_empty());
	assert!(0.0f64.view().is_empty());
	assert!(Vec::<String>::new().view().is_empty());
	assert!(!false.view().is_empty());
}

#[test]
fn test_borrowed_str_is_immutable() {
	let mut s: &str = "fixed";
	assert!(matches!(s.view_mut(), ValueMut::Immutable));
}

#[test]
fn test_downcast_numeric_payload() {
	let mut n = 41i64;
	let mut view = n.view_mut();
	*view.downcast_mut::<i64>().unwrap() += 1;
	assert!(view.downcast_mut::<u8>().is_none());
	drop(view);
	assert_eq!(n, 42);
}

#[test]
fn test_box_is_transparent() {
	let mut boxed = Box::new(String::from("abc"));
	if let ValueMut::Str(s) = boxed.view_mut() {
		s.push('d');
	}
	assert_eq!(*boxed, "abcd");
}
