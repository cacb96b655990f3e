//! Path pattern compilation.
//!
//! # Responsibilities
//! - Detect `{name}` / `{name:assertion}` placeholders in a route path
//! - Resolve assertions against the fixed assertion table
//! - Produce an anchored regex with one named group per placeholder
//!
//! # Design Decisions
//! - Paths without placeholders stay literal (compared by equality)
//! - Literal text around placeholders is escaped
//! - Unknown assertions and repeated capture names fail at compile time
//! - Pure: the same pattern always compiles to the same output

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::routing::error::RouteError;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([^:}]+)(?::([^}]+))?\}").expect("placeholder regex is valid")
});

/// Named constraint restricting what a placeholder may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assertion {
    /// Any non-slash run (no key).
    Any,
    /// `a`
    Alpha,
    /// `ai`
    AlphaNumeric,
    /// `h`: six hex-ish characters.
    Hex,
    /// `i`: ASCII digits only.
    Digits,
    /// `*`: greedy, may span slashes.
    CatchAll,
}

impl Assertion {
    /// Resolve an assertion key. `None` means the key is not in the table.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "a" => Some(Assertion::Alpha),
            "ai" => Some(Assertion::AlphaNumeric),
            "h" => Some(Assertion::Hex),
            "i" => Some(Assertion::Digits),
            "*" => Some(Assertion::CatchAll),
            _ => None,
        }
    }

    /// Regex fragment substituted for the placeholder.
    pub fn fragment(self) -> &'static str {
        match self {
            Assertion::Any => r"[^/]+",
            Assertion::Alpha => r"[a-zA-Z]+",
            Assertion::AlphaNumeric => r"[a-zA-Z0-9]+",
            Assertion::Hex => r"[a-fA-Z0-9]{6}",
            Assertion::Digits => r"[0-9]+",
            Assertion::CatchAll => r"\S.*",
        }
    }
}

/// Result of compiling a single path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<CompiledPattern>", into = "Option<CompiledPattern>")]
pub enum CompiledPath {
    /// No placeholders; matched by string equality.
    Literal,
    Pattern(CompiledPattern),
}

impl CompiledPath {
    pub fn is_literal(&self) -> bool {
        matches!(self, CompiledPath::Literal)
    }
}

impl From<Option<CompiledPattern>> for CompiledPath {
    fn from(pattern: Option<CompiledPattern>) -> Self {
        pattern.map_or(CompiledPath::Literal, CompiledPath::Pattern)
    }
}

impl From<CompiledPath> for Option<CompiledPattern> {
    fn from(path: CompiledPath) -> Self {
        match path {
            CompiledPath::Literal => None,
            CompiledPath::Pattern(pattern) => Some(pattern),
        }
    }
}

/// An anchored expression plus its capture names in source order.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "RawPattern", into = "RawPattern")]
pub struct CompiledPattern {
    regex: Regex,
    captures: Vec<String>,
}

/// Serialized shape of a [`CompiledPattern`].
#[derive(Serialize, Deserialize)]
struct RawPattern {
    regex: String,
    captures: Vec<String>,
}

impl TryFrom<RawPattern> for CompiledPattern {
    type Error = regex::Error;

    fn try_from(raw: RawPattern) -> Result<Self, Self::Error> {
        Ok(Self {
            regex: Regex::new(&raw.regex)?,
            captures: raw.captures,
        })
    }
}

impl From<CompiledPattern> for RawPattern {
    fn from(pattern: CompiledPattern) -> Self {
        Self {
            regex: pattern.regex.as_str().to_string(),
            captures: pattern.captures,
        }
    }
}

impl CompiledPattern {
    /// Build from an already generated expression, e.g. one read from a cache.
    pub fn from_parts(regex: &str, captures: Vec<String>) -> Result<Self, regex::Error> {
        RawPattern {
            regex: regex.to_string(),
            captures,
        }
        .try_into()
    }

    /// Regex source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn capture_names(&self) -> &[String] {
        &self.captures
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and extract every declared capture in declared order.
    pub fn captures(&self, path: &str) -> Option<Captures> {
        let caps = self.regex.captures(path)?;
        let values = self
            .captures
            .iter()
            .filter_map(|name| {
                caps.name(name)
                    .map(|m| (name.clone(), m.as_str().to_string()))
            })
            .collect();
        Some(Captures(values))
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.regex.as_str() == other.regex.as_str() && self.captures == other.captures
    }
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("regex", &self.regex.as_str())
            .field("captures", &self.captures)
            .finish()
    }
}

/// Captured path variables, ordered as declared in the pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures(Vec<(String, String)>);

impl Captures {
    /// Look up a captured value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Captures {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Serialize for Captures {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Returns true if `path` contains at least one placeholder.
pub fn has_placeholder(path: &str) -> bool {
    PLACEHOLDER.is_match(path)
}

/// Compile a route path into a literal marker or an anchored pattern.
pub fn compile_path(pattern: &str) -> Result<CompiledPath, RouteError> {
    if !has_placeholder(pattern) {
        return Ok(CompiledPath::Literal);
    }

    let mut expression = String::with_capacity(pattern.len() * 2);
    let mut captures: Vec<String> = Vec::new();
    let mut last = 0;

    expression.push('^');
    for caps in PLACEHOLDER.captures_iter(pattern) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let name = &caps[1];
        let assertion = match caps.get(2) {
            None => Assertion::Any,
            Some(key) => Assertion::from_key(key.as_str()).ok_or_else(|| {
                RouteError::InvalidAssertion {
                    pattern: pattern.to_string(),
                    assertion: key.as_str().to_string(),
                }
            })?,
        };

        if captures.iter().any(|c| c == name) {
            return Err(RouteError::DuplicateCapture {
                pattern: pattern.to_string(),
                name: name.to_string(),
            });
        }

        expression.push_str(&regex::escape(&pattern[last..whole.start()]));
        expression.push_str("(?P<");
        expression.push_str(name);
        expression.push('>');
        expression.push_str(assertion.fragment());
        expression.push(')');

        captures.push(name.to_string());
        last = whole.end();
    }
    expression.push_str(&regex::escape(&pattern[last..]));
    expression.push('$');

    let regex = Regex::new(&expression).map_err(|source| RouteError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    tracing::trace!(pattern, regex = %regex.as_str(), "Compiled route pattern");

    Ok(CompiledPath::Pattern(CompiledPattern { regex, captures }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(path: &str) -> CompiledPattern {
        match compile_path(path).unwrap() {
            CompiledPath::Pattern(p) => p,
            CompiledPath::Literal => panic!("expected a pattern for {path}"),
        }
    }

    #[test]
    fn test_static_paths_stay_literal() {
        assert!(compile_path("/home").unwrap().is_literal());
        assert!(compile_path("/").unwrap().is_literal());
        assert!(compile_path("/a{}").unwrap().is_literal());
    }

    #[test]
    fn test_capture_names_in_order() {
        let p = pattern("/hello/{name}");
        assert_eq!(p.capture_names(), ["name"]);

        let p = pattern("/user/{user}/posts/{post:i}");
        assert_eq!(p.capture_names(), ["user", "post"]);
        assert_eq!(p.as_str(), r"^/user/(?P<user>[^/]+)/posts/(?P<post>[0-9]+)$");
    }

    #[test]
    fn test_literal_text_is_escaped() {
        let p = pattern("/files/{name}.json");
        assert!(p.is_match("/files/report.json"));
        assert!(!p.is_match("/files/reportxjson"));
    }

    #[test]
    fn test_assertion_table() {
        let cases = [
            ("/x/{v:a}", "/x/abcXYZ", "/x/abc1"),
            ("/x/{v:ai}", "/x/abc123", "/x/abc-123"),
            ("/x/{v:h}", "/x/00ad45", "/x/white"),
            ("/x/{v:i}", "/x/2024", "/x/20a4"),
            ("/x/{v:i}", "/x/0042", "/x/\u{0663}\u{0664}"),
            ("/x/{v:*}", "/x/a/b/c", "/x/"),
            ("/x/{v}", "/x/any-thing", "/x/a/b"),
        ];
        for (pat, good, bad) in cases {
            let p = pattern(pat);
            assert!(p.is_match(good), "{pat} should match {good}");
            assert!(!p.is_match(bad), "{pat} should reject {bad}");
        }
    }

    #[test]
    fn test_digits_capture_parses() {
        let p = pattern("/users/{id:i}");
        let caps = p.captures("/users/1234").unwrap();
        assert_eq!(caps.get("id").unwrap().parse::<u64>().unwrap(), 1234);
        assert!(p.captures("/users/\u{0663}\u{0664}").is_none());
        assert!(p.captures("/users/\u{FF11}").is_none());
    }

    #[test]
    fn test_captures_extracted() {
        let p = pattern("/color/{code:h}");
        let caps = p.captures("/color/00ad45").unwrap();
        assert_eq!(caps.get("code"), Some("00ad45"));
        assert_eq!(caps.len(), 1);
        assert!(p.captures("/color/white").is_none());
    }

    #[test]
    fn test_unknown_assertion_fails() {
        let err = compile_path("/x/{id:uuid}").unwrap_err();
        assert!(matches!(
            err,
            RouteError::InvalidAssertion { ref assertion, .. } if assertion == "uuid"
        ));
    }

    #[test]
    fn test_duplicate_capture_rejected() {
        let err = compile_path("/{id}/{id}").unwrap_err();
        assert!(matches!(err, RouteError::DuplicateCapture { ref name, .. } if name == "id"));
    }

    #[test]
    fn test_non_identifier_name_rejected() {
        let err = compile_path("/x/{user-id}").unwrap_err();
        assert!(matches!(err, RouteError::InvalidPattern { .. }));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let a = compile_path("/users/{id:i}/{slug}").unwrap();
        let b = compile_path("/users/{id:i}/{slug}").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pattern_serde_shape() {
        let p = pattern("/hello-{name}");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["captures"], serde_json::json!(["name"]));
        assert_eq!(json["regex"], serde_json::json!(p.as_str()));

        let back: CompiledPattern = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }
}
