//! Tag parsing.
//!
//! A validation tag is a whitespace-separated list of tokens, each a bare
//! rule name (`required`) or a `name=value` pair (`min=3`). The rule name is
//! everything before the first `=`. Rules get the whole parsed tag so that
//! one rule can read parameters declared beside it.
//!
//! Transform tags are plain whitespace-separated names.

use indexmap::IndexMap;

/// One token of a validation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
	/// Rule name, the text before the first `=`.
	pub name: &'a str,
	/// Text after the first `=`, if the token has one.
	pub value: Option<&'a str>,
}

impl<'a> Token<'a> {
	pub fn parse(token: &'a str) -> Self {
		match token.split_once('=') {
			Some((name, value)) => Self {
				name,
				value: Some(value),
			},
			None => Self { name: token, value: None },
		}
	}
}

/// A parsed validation tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTag<'a> {
	raw: &'a str,
	tokens: Vec<Token<'a>>,
}

impl<'a> RuleTag<'a> {
	pub fn parse(raw: &'a str) -> Self {
		Self {
			raw,
			tokens: raw.split_whitespace().map(Token::parse).collect(),
		}
	}

	/// The tag exactly as declared.
	pub fn raw(&self) -> &'a str {
		self.raw
	}

	/// Tokens in declaration order.
	pub fn tokens(&self) -> &[Token<'a>] {
		&self.tokens
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Value of the first `name=value` token with this name.
	pub fn param(&self, name: &str) -> Option<&'a str> {
		self.tokens
			.iter()
			.find(|token| token.name == name && token.value.is_some())
			.and_then(|token| token.value)
	}

	/// Returns true if any token names `name`.
	pub fn has(&self, name: &str) -> bool {
		self.tokens.iter().any(|token| token.name == name)
	}

	/// Comma-delimited `key=value` view of the raw tag. See [`parse_params`].
	pub fn structured(&self) -> IndexMap<&'a str, &'a str> {
		parse_params(self.raw)
	}

	/// Value of a `name=` entry that may contain spaces, `=` and commas.
	///
	/// The value runs to the first unescaped comma. Without one it ends at
	/// the next whitespace, so the tokens after it stay separate rules.
	/// `\,` stands for a literal comma in either form.
	///
	/// ```
	/// use fieldrules::RuleTag;
	///
	/// let tag = RuleTag::parse(r"required pattern=^[0-9]{2\,3}$ min=2");
	/// assert_eq!(tag.delimited("pattern").as_deref(), Some("^[0-9]{2,3}$"));
	///
	/// let tag = RuleTag::parse("pattern=^hello world$, required");
	/// assert_eq!(tag.delimited("pattern").as_deref(), Some("^hello world$"));
	/// ```
	pub fn delimited(&self, name: &str) -> Option<String> {
		let raw = self.raw;
		let start = raw.match_indices(name).find_map(|(at, _)| {
			let after = at + name.len();
			let boundary = raw[..at].chars().next_back().is_none_or(char::is_whitespace);
			(boundary && raw[after..].starts_with('=')).then_some(after + 1)
		})?;

		let mut value = String::new();
		let mut chars = raw[start..].chars();
		while let Some(c) = chars.next() {
			match c {
				'\\' => match chars.next() {
					Some(',') => value.push(','),
					Some(next) => {
						value.push('\\');
						value.push(next);
					}
					None => value.push('\\'),
				},
				',' => return Some(value.trim().to_string()),
				_ => value.push(c),
			}
		}
		let value = value.trim_start();
		let end = value.find(char::is_whitespace).unwrap_or(value.len());
		Some(value[..end].to_string())
	}
}

/// Parses a comma-delimited `key=value` list.
///
/// Each comma-separated segment is split at its first `=`. The key is the
/// last whitespace-separated word on the left, so `required pattern=^a+$`
/// yields `pattern`; the value is everything up to the next comma, trimmed,
/// and may itself contain `=` or spaces. Later keys overwrite earlier ones.
///
/// ```
/// use fieldrules::tag::parse_params;
///
/// let params = parse_params("required pattern=^[a-z]+=?$, flags=i");
/// assert_eq!(params.get("pattern"), Some(&"^[a-z]+=?$"));
/// assert_eq!(params.get("flags"), Some(&"i"));
/// ```
pub fn parse_params(tag: &str) -> IndexMap<&str, &str> {
	let mut params = IndexMap::new();
	for segment in tag.split(',') {
		let Some((lhs, value)) = segment.split_once('=') else {
			continue;
		};
		let Some(key) = lhs.split_whitespace().last() else {
			continue;
		};
		params.insert(key, value.trim());
	}
	params
}

/// Splits a transform tag into names, in declaration order.
pub fn transform_names(tag: &str) -> impl Iterator<Item = &str> {
	tag.split_whitespace()
}
