//! Structured errors produced by validation and transformation.
//!
//! Every failing call yields one [`Error`]: a top-level message plus an
//! ordered map from field path to the messages gathered for that path.
//! Paths are qualified for nested records (`Address.City`) and sequence
//! elements (`Items[2].Name`).

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from field path to messages.
pub type FieldMessages = IndexMap<String, Vec<String>>;

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// The input was absent or not a record. Nothing was evaluated.
	InvalidInput,
	/// One or more rules reported violations.
	#[default]
	Validation,
	/// One or more transforms failed.
	Transformation,
}

/// Validation or transformation error.
///
/// Serializes as `{"message": ..., "fields": {...}}`, omitting `fields` when
/// no field-level messages were recorded. The [`ErrorKind`] is not written,
/// so a deserialized error reads as [`ErrorKind::Validation`] and compares
/// unequal to a source of another kind until restored with
/// [`Error::with_kind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Error {
	#[serde(skip)]
	kind: ErrorKind,
	message: String,
	#[serde(default, skip_serializing_if = "IndexMap::is_empty")]
	fields: FieldMessages,
}

impl Error {
	/// Creates an error from a message and field-level messages.
	///
	/// ```
	/// use fieldrules::{Error, FieldMessages};
	///
	/// let mut fields = FieldMessages::new();
	/// fields.insert("username".into(), vec!["must be at least 3 characters long".into()]);
	/// let err = Error::new("validation failed", fields);
	/// assert_eq!(err.to_string(), "validation failed - username must be at least 3 characters long");
	/// ```
	pub fn new(message: impl Into<String>, fields: FieldMessages) -> Self {
		Self {
			kind: ErrorKind::Validation,
			message: message.into(),
			fields,
		}
	}

	/// Creates an invalid-input error carrying no field messages.
	pub fn invalid_input(message: impl Into<String>) -> Self {
		Self::new(message, FieldMessages::new()).with_kind(ErrorKind::InvalidInput)
	}

	/// Sets the error kind.
	pub fn with_kind(mut self, kind: ErrorKind) -> Self {
		self.kind = kind;
		self
	}

	pub fn kind(&self) -> ErrorKind {
		self.kind
	}

	/// Top-level message, without field details.
	pub fn message(&self) -> &str {
		&self.message
	}

	/// All field-level messages, keyed by path.
	pub fn fields(&self) -> &FieldMessages {
		&self.fields
	}

	/// Messages recorded for one field path.
	pub fn field(&self, path: &str) -> Option<&[String]> {
		self.fields.get(path).map(Vec::as_slice)
	}

	pub fn into_fields(self) -> FieldMessages {
		self.fields
	}

	/// Serializes the error as JSON bytes.
	///
	/// Returns an empty buffer if serialization fails.
	pub fn to_json(&self) -> Vec<u8> {
		serde_json::to_vec(self).unwrap_or_default()
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.message)?;
		if self.fields.is_empty() {
			return Ok(());
		}

		f.write_str(" - ")?;
		for (i, (path, messages)) in self.fields.iter().enumerate() {
			if i > 0 {
				f.write_str("; ")?;
			}
			write!(f, "{path} {}", messages.join(", "))?;
		}
		Ok(())
	}
}

impl std::error::Error for Error {}

/// Serializes an error to JSON if it is an [`Error`].
///
/// Returns an empty buffer when `err` is `None` or some other error type.
///
/// ```
/// use fieldrules::{Error, serialize_error};
///
/// let err = Error::invalid_input("invalid payload");
/// assert_eq!(serialize_error(Some(&err)), br#"{"message":"invalid payload"}"#);
/// assert!(serialize_error(None).is_empty());
/// ```
pub fn serialize_error(err: Option<&(dyn std::error::Error + 'static)>) -> Vec<u8> {
	err.and_then(|err| err.downcast_ref::<Error>())
		.map(Error::to_json)
		.unwrap_or_default()
}

/// Accumulates per-field messages during one engine call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
	fields: FieldMessages,
}

impl Violations {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends one message under `path`.
	pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
		self.fields
			.entry(path.into())
			.or_default()
			.push(message.into());
	}

	/// Appends messages under `path`. Empty input leaves the set untouched.
	pub fn extend<I>(&mut self, path: &str, messages: I)
	where
		I: IntoIterator<Item = String>,
	{
		let mut messages = messages.into_iter().peekable();
		if messages.peek().is_none() {
			return;
		}
		self.fields
			.entry(path.to_string())
			.or_default()
			.extend(messages);
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Number of distinct field paths with messages.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Converts the set into a call result: `Ok` when empty, otherwise an
	/// [`Error`] of the given kind.
	pub fn into_result(self, kind: ErrorKind, message: &str) -> Result<(), Error> {
		if self.fields.is_empty() {
			return Ok(());
		}
		Err(Error::new(message, self.fields).with_kind(kind))
	}
}
