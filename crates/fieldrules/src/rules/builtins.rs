//! Built-in validation rules.

use std::sync::LazyLock;

use parking_lot::Mutex;
use regex::Regex;
use rustc_hash::FxHashMap as HashMap;
use url::Url;

use super::{RuleContext, RuleRegistry};
use crate::value::Value;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("Invalid regex")
});

static IPV4: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^([0-9]{1,3}\.){3}[0-9]{1,3}$").expect("Invalid regex"));

static ISO_DATE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid regex"));

static TIME: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9]):([0-5][0-9])$").expect("Invalid regex")
});

/// Compiled `pattern=` expressions. `None` marks an expression that failed to
/// compile so the warning is logged once.
static PATTERNS: LazyLock<Mutex<HashMap<Box<str>, Option<Regex>>>> =
	LazyLock::new(|| Mutex::new(HashMap::default()));

/// Installs every built-in rule into `registry`.
pub fn register_builtins(registry: &mut RuleRegistry) {
	registry.register("required", required);
	registry.register("min", min_len);
	registry.register("max", max_len);
	registry.register("min_value", min_value);
	registry.register("max_value", max_value);
	registry.register("alphanum", alphanum);
	registry.register("alpha", alpha);
	registry.register("no_whitespace", no_whitespace);
	registry.register("email", email);
	registry.register("url", url);
	registry.register("ipv4", ipv4);
	registry.register("iso_date", iso_date);
	registry.register("time", time);
	registry.register("pattern", pattern);
	registry.register("contains", contains);
	registry.register("starts_with", starts_with);
}

fn fail(message: impl Into<String>) -> Vec<String> {
	vec![message.into()]
}

fn check(ok: bool, message: &str) -> Vec<String> {
	if ok { Vec::new() } else { fail(message) }
}

fn required(value: &Value<'_>, _: &RuleContext<'_>) -> Vec<String> {
	check(!value.is_empty(), "field is required")
}

fn min_len(value: &Value<'_>, ctx: &RuleContext<'_>) -> Vec<String> {
	let min: i64 = match ctx.parsed_param("min") {
		Ok(Some(min)) => min,
		Ok(None) => return Vec::new(),
		Err(message) => return fail(message),
	};
	match value {
		Value::Str(_) if value.len().is_some_and(|len| (len as i64) < min) => {
			fail(format!("length must be at least {min}"))
		}
		Value::Seq(items) if (items.len() as i64) < min => {
			fail(format!("must have at least {min} items"))
		}
		_ => Vec::new(),
	}
}

fn max_len(value: &Value<'_>, ctx: &RuleContext<'_>) -> Vec<String> {
	let max: i64 = match ctx.parsed_param("max") {
		Ok(Some(max)) => max,
		Ok(None) => return Vec::new(),
		Err(message) => return fail(message),
	};
	match value {
		Value::Str(_) if value.len().is_some_and(|len| (len as i64) > max) => {
			fail(format!("length must not exceed {max}"))
		}
		Value::Seq(items) if (items.len() as i64) > max => {
			fail(format!("must not exceed {max} items"))
		}
		_ => Vec::new(),
	}
}

fn min_value(value: &Value<'_>, ctx: &RuleContext<'_>) -> Vec<String> {
	let min: f64 = match ctx.parsed_param("min_value") {
		Ok(Some(min)) => min,
		Ok(None) => return Vec::new(),
		Err(message) => return fail(message),
	};
	match value.as_f64() {
		Some(n) if n < min => fail(format!("must be at least {min}")),
		_ => Vec::new(),
	}
}

fn max_value(value: &Value<'_>, ctx: &RuleContext<'_>) -> Vec<String> {
	let max: f64 = match ctx.parsed_param("max_value") {
		Ok(Some(max)) => max,
		Ok(None) => return Vec::new(),
		Err(message) => return fail(message),
	};
	match value.as_f64() {
		Some(n) if n > max => fail(format!("must not exceed {max}")),
		_ => Vec::new(),
	}
}

fn alphanum(value: &Value<'_>, _: &RuleContext<'_>) -> Vec<String> {
	let Some(s) = value.as_str() else {
		return Vec::new();
	};
	check(
		s.chars().all(|c| c.is_alphabetic() || c.is_numeric() || c == '_'),
		"must contain only letters, numbers, and underscores",
	)
}

fn alpha(value: &Value<'_>, _: &RuleContext<'_>) -> Vec<String> {
	let Some(s) = value.as_str() else {
		return Vec::new();
	};
	check(s.chars().all(char::is_alphabetic), "must contain only letters")
}

fn no_whitespace(value: &Value<'_>, _: &RuleContext<'_>) -> Vec<String> {
	let Some(s) = value.as_str() else {
		return Vec::new();
	};
	check(!s.contains([' ', '\t', '\n', '\r']), "must not contain whitespace")
}

fn email(value: &Value<'_>, _: &RuleContext<'_>) -> Vec<String> {
	let Some(s) = value.as_str() else {
		return Vec::new();
	};
	check(EMAIL.is_match(s), "invalid email format")
}

/// Accepts an absolute URL (`https://host/x`, `mailto:a@b`) or an absolute
/// path (`/x`). Empty strings pass; pair with `required` to reject them.
fn url(value: &Value<'_>, _: &RuleContext<'_>) -> Vec<String> {
	let Some(s) = value.as_str() else {
		return Vec::new();
	};
	if s.is_empty() {
		return Vec::new();
	}
	let ok = if s.starts_with('/') {
		!s.contains(char::is_whitespace)
	} else {
		Url::parse(s).is_ok()
	};
	check(ok, "must be a valid URL")
}

fn ipv4(value: &Value<'_>, _: &RuleContext<'_>) -> Vec<String> {
	let Some(s) = value.as_str() else {
		return Vec::new();
	};
	let ok = IPV4.is_match(s) && s.split('.').all(|octet| octet.parse::<u8>().is_ok());
	check(ok, "must be a valid IPv4 address")
}

fn iso_date(value: &Value<'_>, _: &RuleContext<'_>) -> Vec<String> {
	let Some(s) = value.as_str() else {
		return Vec::new();
	};
	check(ISO_DATE.is_match(s), "must be a valid ISO8601 date (YYYY-MM-DD)")
}

fn time(value: &Value<'_>, _: &RuleContext<'_>) -> Vec<String> {
	let Some(s) = value.as_str() else {
		return Vec::new();
	};
	check(TIME.is_match(s), "must be a valid time (HH:MM:SS)")
}

/// Matches against the `pattern=` expression, read with
/// [`RuleTag::delimited`](crate::RuleTag::delimited). An expression with
/// spaces must be ended by a comma; a comma inside the expression is written
/// `\,`. An expression that does not compile imposes no constraint.
fn pattern(value: &Value<'_>, ctx: &RuleContext<'_>) -> Vec<String> {
	let Some(s) = value.as_str() else {
		return Vec::new();
	};
	let Some(expr) = ctx.tag().delimited("pattern") else {
		return Vec::new();
	};
	match compiled(&expr, ctx.path()) {
		Some(re) => check(re.is_match(s), "invalid format"),
		None => Vec::new(),
	}
}

fn compiled(expr: &str, path: &str) -> Option<Regex> {
	let mut cache = PATTERNS.lock();
	if let Some(entry) = cache.get(expr) {
		return entry.clone();
	}
	let entry = match Regex::new(expr) {
		Ok(re) => Some(re),
		Err(error) => {
			tracing::warn!(domain = "rules", field = path, pattern = expr, %error, "ignoring invalid pattern");
			None
		}
	};
	cache.insert(expr.into(), entry.clone());
	entry
}

fn contains(value: &Value<'_>, ctx: &RuleContext<'_>) -> Vec<String> {
	let (Some(s), Some(needle)) = (value.as_str(), ctx.param("contains")) else {
		return Vec::new();
	};
	check(s.contains(needle), &format!("must contain '{needle}'"))
}

fn starts_with(value: &Value<'_>, ctx: &RuleContext<'_>) -> Vec<String> {
	let (Some(s), Some(prefix)) = (value.as_str(), ctx.param("starts_with")) else {
		return Vec::new();
	};
	check(s.starts_with(prefix), &format!("must start with '{prefix}'"))
}
