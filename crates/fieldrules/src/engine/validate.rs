use super::{Engine, depth_exceeded, qualify};
use crate::error::Violations;
use crate::record::Record;
use crate::rules::RuleContext;
use crate::tag::RuleTag;
use crate::value::Value;

pub(super) struct Walk<'e> {
	engine: &'e Engine,
	violations: Violations,
}

impl<'e> Walk<'e> {
	pub(super) fn new(engine: &'e Engine) -> Self {
		Self {
			engine,
			violations: Violations::new(),
		}
	}

	pub(super) fn finish(self) -> Violations {
		self.violations
	}

	pub(super) fn record(&mut self, record: &dyn Record, prefix: &str, depth: usize) {
		for field in record.fields() {
			let path = qualify(prefix, field.name());
			if field.spec.has_rules() {
				self.check(&field.value, field.spec.rules, &path);
			}
			if self.engine.config.validate_nested {
				self.descend(&field.value, &path, depth);
			}
		}
	}

	fn check(&mut self, value: &Value<'_>, rules: &str, path: &str) {
		let tag = RuleTag::parse(rules);
		let ctx = RuleContext::new(path, &tag);
		for token in tag.tokens() {
			match self.engine.rules.get(token.name) {
				Some(rule) => self.violations.extend(path, rule(value, &ctx)),
				None => tracing::trace!(domain = "rules", name = token.name, field = path, "unknown rule"),
			}
		}
	}

	fn descend(&mut self, value: &Value<'_>, path: &str, depth: usize) {
		match value {
			Value::Record(nested) => {
				let max_depth = self.engine.config.max_depth;
				if depth >= max_depth {
					self.violations.push(path, depth_exceeded(max_depth));
					return;
				}
				self.record(*nested, path, depth + 1);
			}
			Value::Seq(items) => {
				for (i, item) in items.iter().enumerate() {
					self.descend(item, &format!("{path}[{i}]"), depth);
				}
			}
			_ => {}
		}
	}
}
