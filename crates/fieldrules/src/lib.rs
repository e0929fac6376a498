//! Declarative field validation and transformation.
//!
//! Fields of a record carry two tags: a validation tag of whitespace-separated
//! rules (`required min=3 email`) and a transform tag of named rewrites
//! (`trim lowercase`). An [`Engine`] walks a record, nested records included,
//! and dispatches each tag entry to a named rule or transform from its
//! registries.
//!
//! ```
//! use fieldrules::{Engine, Record};
//!
//! #[derive(Record)]
//! #[record(rename_all = "PascalCase")]
//! struct SignUp {
//!     #[validate("required min=3 max=20 alphanum")]
//!     #[transform("trim lowercase")]
//!     username: String,
//!     #[validate("required email")]
//!     email: String,
//!     #[validate("min_value=18")]
//!     age: u32,
//! }
//!
//! let engine = Engine::new();
//! let mut form = SignUp {
//!     username: "  JoHn_Doe ".into(),
//!     email: "john@example.com".into(),
//!     age: 15,
//! };
//!
//! engine.transform(&mut form).unwrap();
//! assert_eq!(form.username, "john_doe");
//!
//! let err = engine.validate(&form).unwrap_err();
//! assert_eq!(err.to_string(), "validation failed - Age must be at least 18");
//! ```
//!
//! Rules and transforms are plain closures:
//!
//! ```
//! use fieldrules::{Engine, Value};
//!
//! let mut engine = Engine::new();
//! engine.register_rule("even", |value, _ctx| match value {
//!     Value::Int(n) if n % 2 != 0 => vec!["must be even".into()],
//!     _ => Vec::new(),
//! });
//! engine.register_transform("collapse", |value| {
//!     if let Some(s) = value.as_string_mut() {
//!         *s = s.split_whitespace().collect::<Vec<_>>().join(" ");
//!     }
//!     Ok(())
//! });
//! ```

extern crate self as fieldrules;

pub mod config;
pub mod engine;
pub mod error;
pub mod global;
pub mod record;
pub mod rules;
pub mod tag;
pub mod transforms;
pub mod value;

pub use config::{ConfigError, EngineConfig};
pub use engine::Engine;
pub use error::{Error, ErrorKind, FieldMessages, Violations, serialize_error};
pub use fieldrules_macros::Record;
pub use record::{Field, FieldMut, FieldSpec, Record};
pub use rules::{RuleContext, RuleFn, RuleRegistry};
pub use tag::{RuleTag, Token};
pub use transforms::{DEFAULT_PRIORITY, TransformFn, TransformRegistry};
pub use value::{Inspect, InspectMut, Value, ValueMut};
