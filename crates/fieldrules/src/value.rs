//! Typed views over field values.
//!
//! The engine never sees concrete field types. Each field is exposed as a
//! [`Value`] for reading (rules) or a [`ValueMut`] for writing (transforms).
//! [`Inspect`] and [`InspectMut`] produce those views and are implemented for
//! the primitive and container types a record usually holds;
//! `#[derive(Record)]` implements both for the record type itself.

use std::any::Any;
use std::fmt;

use crate::record::Record;

/// Read-only view of a field value.
pub enum Value<'a> {
	Str(&'a str),
	Int(i64),
	Uint(u64),
	Float(f64),
	Bool(bool),
	/// Ordered sequence of element views.
	Seq(Vec<Value<'a>>),
	/// Nested record.
	Record(&'a dyn Record),
	/// An empty `Option`.
	Absent,
	/// A value the engine cannot interpret.
	Opaque,
}

impl<'a> Value<'a> {
	pub fn as_str(&self) -> Option<&'a str> {
		match self {
			Value::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Numeric value widened to `f64`, if this is a number.
	pub fn as_f64(&self) -> Option<f64> {
		match *self {
			Value::Int(v) => Some(v as f64),
			Value::Uint(v) => Some(v as f64),
			Value::Float(v) => Some(v),
			_ => None,
		}
	}

	/// Character count of a string or element count of a sequence.
	pub fn len(&self) -> Option<usize> {
		match self {
			Value::Str(s) => Some(s.chars().count()),
			Value::Seq(items) => Some(items.len()),
			_ => None,
		}
	}

	/// Returns true if this value counts as "not provided".
	///
	/// Empty strings, zero numbers, empty sequences and `None` are empty.
	/// Booleans and records never are.
	pub fn is_empty(&self) -> bool {
		match self {
			Value::Str(s) => s.is_empty(),
			Value::Int(v) => *v == 0,
			Value::Uint(v) => *v == 0,
			Value::Float(v) => *v == 0.0,
			Value::Seq(items) => items.is_empty(),
			Value::Absent => true,
			Value::Bool(_) | Value::Record(_) | Value::Opaque => false,
		}
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Str(_) => "string",
			Value::Int(_) => "int",
			Value::Uint(_) => "uint",
			Value::Float(_) => "float",
			Value::Bool(_) => "bool",
			Value::Seq(_) => "sequence",
			Value::Record(_) => "record",
			Value::Absent => "absent",
			Value::Opaque => "opaque",
		}
	}
}

impl fmt::Debug for Value<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
			Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
			Value::Uint(v) => f.debug_tuple("Uint").field(v).finish(),
			Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
			Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
			Value::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
			Value::Record(record) => f.debug_tuple("Record").field(&record.record_name()).finish(),
			Value::Absent => f.write_str("Absent"),
			Value::Opaque => f.write_str("Opaque"),
		}
	}
}

/// Mutable view of a field value.
pub enum ValueMut<'a> {
	Str(&'a mut String),
	/// Ordered sequence of element views.
	Seq(Vec<ValueMut<'a>>),
	/// Nested record.
	Record(&'a mut dyn Record),
	/// Any other owned value; custom transforms downcast it.
	Other(&'a mut dyn Any),
	/// An empty `Option`.
	Absent,
	/// Storage the engine must not write (borrowed or derived data).
	Immutable,
}

impl ValueMut<'_> {
	pub fn as_string_mut(&mut self) -> Option<&mut String> {
		match self {
			ValueMut::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Downcasts an [`ValueMut::Other`] payload.
	pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
		match self {
			ValueMut::Other(any) => any.downcast_mut::<T>(),
			_ => None,
		}
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			ValueMut::Str(_) => "string",
			ValueMut::Seq(_) => "sequence",
			ValueMut::Record(_) => "record",
			ValueMut::Other(_) => "other",
			ValueMut::Absent => "absent",
			ValueMut::Immutable => "immutable",
		}
	}
}

impl fmt::Debug for ValueMut<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ValueMut::Str(s) => f.debug_tuple("Str").field(s).finish(),
			ValueMut::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
			ValueMut::Record(record) => {
				f.debug_tuple("Record").field(&record.record_name()).finish()
			}
			ValueMut::Other(_) => f.write_str("Other(..)"),
			ValueMut::Absent => f.write_str("Absent"),
			ValueMut::Immutable => f.write_str("Immutable"),
		}
	}
}

/// Types that expose a read-only [`Value`].
pub trait Inspect {
	fn view(&self) -> Value<'_>;
}

/// Types that expose a mutable [`ValueMut`].
pub trait InspectMut {
	fn view_mut(&mut self) -> ValueMut<'_>;
}

macro_rules! impl_numeric {
	($variant:ident as $wide:ty: $($ty:ty),+ $(,)?) => {$(
		impl Inspect for $ty {
			fn view(&self) -> Value<'_> {
				Value::$variant(*self as $wide)
			}
		}

		impl InspectMut for $ty {
			fn view_mut(&mut self) -> ValueMut<'_> {
				ValueMut::Other(self)
			}
		}
	)+};
}

impl_numeric!(Int as i64: i8, i16, i32, i64, isize);
impl_numeric!(Uint as u64: u8, u16, u32, u64, usize);
impl_numeric!(Float as f64: f32, f64);

impl Inspect for bool {
	fn view(&self) -> Value<'_> {
		Value::Bool(*self)
	}
}

impl InspectMut for bool {
	fn view_mut(&mut self) -> ValueMut<'_> {
		ValueMut::Other(self)
	}
}

impl Inspect for char {
	fn view(&self) -> Value<'_> {
		Value::Opaque
	}
}

impl InspectMut for char {
	fn view_mut(&mut self) -> ValueMut<'_> {
		ValueMut::Other(self)
	}
}

impl Inspect for String {
	fn view(&self) -> Value<'_> {
		Value::Str(self)
	}
}

impl InspectMut for String {
	fn view_mut(&mut self) -> ValueMut<'_> {
		ValueMut::Str(self)
	}
}

impl Inspect for str {
	fn view(&self) -> Value<'_> {
		Value::Str(self)
	}
}

impl Inspect for &str {
	fn view(&self) -> Value<'_> {
		Value::Str(self)
	}
}

impl InspectMut for &str {
	fn view_mut(&mut self) -> ValueMut<'_> {
		ValueMut::Immutable
	}
}

impl<T: Inspect> Inspect for Vec<T> {
	fn view(&self) -> Value<'_> {
		self.as_slice().view()
	}
}

impl<T: InspectMut> InspectMut for Vec<T> {
	fn view_mut(&mut self) -> ValueMut<'_> {
		self.as_mut_slice().view_mut()
	}
}

impl<T: Inspect> Inspect for [T] {
	fn view(&self) -> Value<'_> {
		Value::Seq(self.iter().map(Inspect::view).collect())
	}
}

impl<T: InspectMut> InspectMut for [T] {
	fn view_mut(&mut self) -> ValueMut<'_> {
		ValueMut::Seq(self.iter_mut().map(InspectMut::view_mut).collect())
	}
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
	fn view(&self) -> Value<'_> {
		self.as_slice().view()
	}
}

impl<T: InspectMut, const N: usize> InspectMut for [T; N] {
	fn view_mut(&mut self) -> ValueMut<'_> {
		self.as_mut_slice().view_mut()
	}
}

impl<T: Inspect> Inspect for Option<T> {
	fn view(&self) -> Value<'_> {
		match self {
			Some(inner) => inner.view(),
			None => Value::Absent,
		}
	}
}

impl<T: InspectMut> InspectMut for Option<T> {
	fn view_mut(&mut self) -> ValueMut<'_> {
		match self {
			Some(inner) => inner.view_mut(),
			None => ValueMut::Absent,
		}
	}
}

impl Inspect for dyn Record + '_ {
	fn view(&self) -> Value<'_> {
		Value::Record(self)
	}
}

impl InspectMut for dyn Record + '_ {
	fn view_mut(&mut self) -> ValueMut<'_> {
		ValueMut::Record(self)
	}
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
	fn view(&self) -> Value<'_> {
		(**self).view()
	}
}

impl<T: InspectMut + ?Sized> InspectMut for Box<T> {
	fn view_mut(&mut self) -> ValueMut<'_> {
		(**self).view_mut()
	}
}

#[cfg(test)]
mod tests;
