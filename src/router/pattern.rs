use crate::error::RouterError;
use regex::Regex;
use smallvec::SmallVec;
use std::fmt;

/// Number of captures kept inline before the capture list spills to the heap.
/// Route patterns rarely carry more than a handful of groups.
pub const MAX_INLINE_CAPTURES: usize = 8;

/// Ordered capture strings produced by a successful match.
///
/// Index 0 is the first parenthesized group of the pattern, not the whole
/// match.
pub type Captures = SmallVec<[String; MAX_INLINE_CAPTURES]>;

/// Strip exactly one leading `/` from a pattern or request path.
#[inline]
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// A compiled, fully anchored route pattern.
///
/// Patterns are written in the `regex` crate dialect relative to the site
/// root, e.g. `admin/renameUser/(\d+)/(\w+)=(\w+)`. The stored source never
/// starts with `/`, and matching always requires the whole path to match:
/// `test` matches `/test` but neither `/testing` nor `/a/test`.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a route pattern.
    ///
    /// One leading separator is stripped first. The source is validated on its
    /// own before anchoring, so an unbalanced group cannot escape the anchors.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Pattern`] if the source is not a valid regular
    /// expression.
    pub fn new(pattern: &str) -> Result<Self, RouterError> {
        let source = normalize_path(pattern).to_string();

        if let Err(e) = Regex::new(&source) {
            return Err(RouterError::Pattern {
                source: e,
                pattern: source,
            });
        }

        let mut anchored = String::with_capacity(source.len() + 6);
        anchored.push_str("^(?:");
        anchored.push_str(&source);
        anchored.push_str(")$");

        match Regex::new(&anchored) {
            Ok(regex) => Ok(Self { source, regex }),
            Err(e) => Err(RouterError::Pattern {
                source: e,
                pattern: source,
            }),
        }
    }

    /// The pattern as registered, without the leading separator.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of capture groups in the pattern.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// Match an already normalized path.
    ///
    /// Returns `None` on no match, otherwise the captures in pattern order.
    /// Trailing groups that did not participate in the match are dropped; an
    /// unmatched group followed by a matched one yields an empty string.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Captures> {
        let caps = self.regex.captures(path)?;
        let groups: SmallVec<[Option<&str>; MAX_INLINE_CAPTURES]> = caps
            .iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_str()))
            .collect();
        let used = groups
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1);
        Some(
            groups[..used]
                .iter()
                .map(|group| group.unwrap_or_default().to_string())
                .collect(),
        )
    }

    /// Match a raw request path, stripping one leading separator first.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<Captures> {
        self.captures(normalize_path(path))
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
