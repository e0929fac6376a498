//! Built-in string transforms.

use super::TransformRegistry;
use crate::value::ValueMut;

const TRIM: i32 = 1;
const REMOVE_WHITESPACE: i32 = 2;
const LOWERCASE: i32 = 3;
const UPPERCASE: i32 = 4;

pub fn register_builtins(registry: &mut TransformRegistry) {
	registry.register_with_priority("trim", TRIM, |value| {
		map_strings(value, |s| {
			let trimmed = s.trim();
			if trimmed.len() != s.len() {
				*s = trimmed.to_owned();
			}
		});
		Ok(())
	});
	registry.register_with_priority("remove_whitespace", REMOVE_WHITESPACE, |value| {
		map_strings(value, |s| s.retain(|c| !matches!(c, ' ' | '\t' | '\n' | '\r')));
		Ok(())
	});
	registry.register_with_priority("lowercase", LOWERCASE, |value| {
		map_strings(value, |s| *s = s.to_lowercase());
		Ok(())
	});
	registry.register_with_priority("uppercase", UPPERCASE, |value| {
		map_strings(value, |s| *s = s.to_uppercase());
		Ok(())
	});
}

/// Applies `f` to a string, or to every string inside a sequence. Other
/// values are left alone.
fn map_strings(value: &mut ValueMut<'_>, f: impl Fn(&mut String) + Copy) {
	match value {
		ValueMut::Str(s) => f(s),
		ValueMut::Seq(items) => items.iter_mut().for_each(|item| map_strings(item, f)),
		_ => {}
	}
}

#[cfg(test)]
mod tests;
