//! Record abstraction and per-field descriptors.
//!
//! A record lists its fields as [`FieldSpec`] descriptors paired with a view
//! of the current value. `#[derive(Record)]` generates the descriptors from
//! `#[validate]`, `#[transform]` and `#[record]` attributes; manual
//! implementations can build them from `static` items:
//!
//! ```
//! use fieldrules::{Field, FieldMut, FieldSpec, Inspect, InspectMut, Record};
//!
//! struct Token {
//!     secret: String,
//! }
//!
//! static SECRET: FieldSpec = FieldSpec::new("Secret", "required min=16", "trim");
//!
//! impl Record for Token {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![Field::new(&SECRET, self.secret.view())]
//!     }
//!
//!     fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
//!         vec![FieldMut::new(&SECRET, self.secret.view_mut())]
//!     }
//! }
//! ```

use crate::value::{Value, ValueMut};

/// Static description of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
	/// Name used in error paths.
	pub name: &'static str,
	/// Validation tag: whitespace-separated `rule` or `rule=value` tokens.
	pub rules: &'static str,
	/// Transform tag: whitespace-separated transform names.
	pub transforms: &'static str,
}

impl FieldSpec {
	pub const fn new(name: &'static str, rules: &'static str, transforms: &'static str) -> Self {
		Self {
			name,
			rules,
			transforms,
		}
	}

	pub fn has_rules(&self) -> bool {
		!self.rules.trim().is_empty()
	}

	pub fn has_transforms(&self) -> bool {
		!self.transforms.trim().is_empty()
	}
}

/// A field descriptor paired with a read-only view of its value.
#[derive(Debug)]
pub struct Field<'a> {
	pub spec: &'static FieldSpec,
	pub value: Value<'a>,
}

impl<'a> Field<'a> {
	pub fn new(spec: &'static FieldSpec, value: Value<'a>) -> Self {
		Self { spec, value }
	}

	pub fn name(&self) -> &'static str {
		self.spec.name
	}
}

/// A field descriptor paired with a mutable view of its value.
#[derive(Debug)]
pub struct FieldMut<'a> {
	pub spec: &'static FieldSpec,
	pub value: ValueMut<'a>,
}

impl<'a> FieldMut<'a> {
	pub fn new(spec: &'static FieldSpec, value: ValueMut<'a>) -> Self {
		Self { spec, value }
	}

	pub fn name(&self) -> &'static str {
		self.spec.name
	}
}

/// A structured aggregate whose fields carry rule and transform metadata.
///
/// Fields are returned in declaration order; the engine walks them in that
/// order.
pub trait Record {
	/// Read-only views of every field.
	fn fields(&self) -> Vec<Field<'_>>;

	/// Mutable views of every field.
	fn fields_mut(&mut self) -> Vec<FieldMut<'_>>;

	/// Type name used in diagnostics.
	fn record_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}
