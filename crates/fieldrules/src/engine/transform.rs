use super::{Engine, depth_exceeded, qualify};
use crate::error::Violations;
use crate::record::Record;
use crate::value::ValueMut;

pub(super) struct Walk<'e> {
	engine: &'e Engine,
	failures: Violations,
}

impl<'e> Walk<'e> {
	pub(super) fn new(engine: &'e Engine) -> Self {
		Self {
			engine,
			failures: Violations::new(),
		}
	}

	pub(super) fn finish(self) -> Violations {
		self.failures
	}

	pub(super) fn record(&mut self, record: &mut dyn Record, prefix: &str, depth: usize) {
		for mut field in record.fields_mut() {
			let path = qualify(prefix, field.name());
			self.descend(&mut field.value, &path, depth);
			if field.spec.has_transforms() {
				self.apply(&mut field.value, field.spec.transforms, &path);
			}
		}
	}

	fn descend(&mut self, value: &mut ValueMut<'_>, path: &str, depth: usize) {
		match value {
			ValueMut::Record(nested) => {
				let max_depth = self.engine.config.max_depth;
				if depth >= max_depth {
					self.failures.push(path, depth_exceeded(max_depth));
					return;
				}
				self.record(&mut **nested, path, depth + 1);
			}
			ValueMut::Seq(items) => {
				for (i, item) in items.iter_mut().enumerate() {
					self.descend(item, &format!("{path}[{i}]"), depth);
				}
			}
			_ => {}
		}
	}

	fn apply(&mut self, value: &mut ValueMut<'_>, transforms: &str, path: &str) {
		if matches!(value, ValueMut::Immutable) {
			tracing::trace!(domain = "transforms", field = path, "skipping immutable field");
			return;
		}
		for (name, transform) in self.engine.transforms.plan(transforms) {
			if let Err(message) = transform(&mut *value) {
				tracing::debug!(domain = "transforms", name, field = path, %message, "transform failed");
				self.failures.push(path, message);
				return;
			}
		}
	}
}
