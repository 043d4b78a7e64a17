//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse patterns such as `/blog/{id}/comments` into segments
//! - Match a concrete path segment-by-segment, capturing placeholders
//! - Decide whether one pattern covers or overlaps the paths another one matches
//!
//! # Design Decisions
//! - Literal segments compare exactly (case-sensitive)
//! - Placeholders accept any non-empty segment
//! - Empty segments are ignored, so trailing slashes do not matter
//! - Segments are percent-decoded before comparison
//! - No regex in the match path

use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed route path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern. Placeholders are written `{name}` and must span a whole segment.
    pub fn parse(pattern: &str) -> Result<Self, String> {
        let mut segments = Vec::new();
        for part in pattern.split('/').filter(|s| !s.is_empty()) {
            if let Some(inner) = part.strip_prefix('{') {
                let name = inner
                    .strip_suffix('}')
                    .ok_or_else(|| format!("unterminated placeholder `{}`", part))?;
                if name.is_empty() || name.contains(['{', '}']) {
                    return Err(format!("invalid placeholder `{}`", part));
                }
                segments.push(Segment::Placeholder(name.to_string()));
            } else if part.contains(['{', '}']) {
                return Err(format!("placeholder must span a whole segment: `{}`", part));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }
        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match a concrete path, returning `(placeholder, value)` captures in order.
    pub fn matches(&self, path: &str) -> Option<Vec<(String, String)>> {
        let parts: Vec<Cow<'_, str>> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| urlencoding::decode(s).unwrap_or(Cow::Borrowed(s)))
            .collect();

        if parts.len() != self.segments.len() {
            return None;
        }

        let mut captures = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) => {
                    if *lit != part {
                        return None;
                    }
                }
                Segment::Placeholder(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    captures.push((name.clone(), part.into_owned()));
                }
            }
        }
        Some(captures)
    }

    /// True if at least one concrete path is matched by both patterns.
    pub fn overlaps(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    _ => true,
                })
    }

    /// True if `self`, declared before `other`, takes paths `other` is more specific for.
    ///
    /// The patterns must overlap, and at the first segment where exactly one side is a
    /// placeholder, that side is `self`.
    pub fn preempts(&self, other: &PathPattern) -> bool {
        self.overlaps(other)
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .find_map(|pair| match pair {
                    (Segment::Placeholder(_), Segment::Literal(_)) => Some(true),
                    (Segment::Literal(_), Segment::Placeholder(_)) => Some(false),
                    _ => None,
                })
                .unwrap_or(true)
    }

    /// True if every path `other` matches is also matched by `self`.
    pub fn covers(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(mine, theirs)| match (mine, theirs) {
                    (Segment::Placeholder(_), _) => true,
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Literal(_), Segment::Placeholder(_)) => false,
                })
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let pattern = PathPattern::parse("/blog/unpublished").unwrap();
        assert_eq!(pattern.matches("/blog/unpublished"), Some(vec![]));
        assert_eq!(pattern.matches("/blog/unpublished/"), Some(vec![]));
        assert!(pattern.matches("/blog/published").is_none());
        assert!(pattern.matches("/Blog/unpublished").is_none());
        assert!(pattern.matches("/blog").is_none());
    }

    #[test]
    fn test_placeholder_capture() {
        let pattern = PathPattern::parse("/blog/{id}/comments/{user_id}").unwrap();
        assert_eq!(
            pattern.matches("/blog/7/comments/9"),
            Some(vec![
                ("id".to_string(), "7".to_string()),
                ("user_id".to_string(), "9".to_string()),
            ])
        );
        assert!(pattern.matches("/blog/7/comments").is_none());
        assert!(pattern.matches("/blog/7/replies/9").is_none());
    }

    #[test]
    fn test_percent_decoding() {
        let pattern = PathPattern::parse("/blog/{id}").unwrap();
        assert_eq!(
            pattern.matches("/blog/a%20b"),
            Some(vec![("id".to_string(), "a b".to_string())])
        );
    }

    #[test]
    fn test_malformed_patterns() {
        assert!(PathPattern::parse("/blog/{id").is_err());
        assert!(PathPattern::parse("/blog/{}").is_err());
        assert!(PathPattern::parse("/blog/x{id}").is_err());
    }

    #[test]
    fn test_covers() {
        let dynamic = PathPattern::parse("/blog/{id}").unwrap();
        let fixed = PathPattern::parse("/blog/unpublished").unwrap();
        let nested = PathPattern::parse("/blog/{id}/comments").unwrap();

        assert!(dynamic.covers(&fixed));
        assert!(!fixed.covers(&dynamic));
        assert!(!dynamic.covers(&nested));
        assert!(dynamic.covers(&dynamic));
    }

    #[test]
    fn test_partial_overlap_preempts() {
        let generic = PathPattern::parse("/a/{x}/c").unwrap();
        let specific = PathPattern::parse("/a/b/{y}").unwrap();

        // `/a/b/c` is matched by both; neither covers the other.
        assert!(generic.overlaps(&specific));
        assert!(!generic.covers(&specific));
        assert!(!specific.covers(&generic));

        // Placeholder first at the divergence point: wrong order.
        assert!(generic.preempts(&specific));
        assert!(!specific.preempts(&generic));
    }

    #[test]
    fn test_disjoint_patterns_never_preempt() {
        let a = PathPattern::parse("/a/{x}/c").unwrap();
        let b = PathPattern::parse("/a/b/d").unwrap();
        let short = PathPattern::parse("/a/{x}").unwrap();

        assert!(!a.overlaps(&b));
        assert!(!a.preempts(&b));
        assert!(!short.preempts(&b));
    }
}
