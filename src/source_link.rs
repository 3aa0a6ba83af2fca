//! Links from declarations to their source files.
//!
//! Local source paths are mapped to a browsable remote location (a VCS web
//! viewer, say) by prefix substitution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{NodeBuilder, NodeKind};

/// Detail role carrying the remote source URL of a declaration.
pub const SOURCE_URL_KIND: &str = "SourceUrl";

/// Detail role carrying the `path:line:column` position of a declaration.
pub const SOURCE_POSITION_KIND: &str = "SourcePosition";

/// Mapping from a local path prefix to a remote URL prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLinkDefinition {
    /// Local path prefix
    pub path: String,
    /// Remote URL replacing the prefix
    pub url: String,
    /// Appended before the line number, e.g. `#L`
    #[serde(default)]
    pub line_suffix: Option<String>,
}

impl SourceLinkDefinition {
    /// Create a mapping without line anchors.
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
            line_suffix: None,
        }
    }

    /// Set the line suffix.
    pub fn with_line_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.line_suffix = Some(suffix.into());
        self
    }
}

/// Position of a declaration in a source file. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// Path of the source file
    pub path: String,
    /// Line number
    pub line: Option<u32>,
    /// Column, only meaningful with a line
    pub column: Option<u32>,
}

impl SourcePosition {
    /// Position of a whole file.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line: None,
            column: None,
        }
    }

    /// Set the line number.
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the column number.
    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (None, _) => write!(f, "{}", self.path),
            (Some(line), None) => write!(f, "{}:{}", self.path, line),
            (Some(line), Some(column)) => write!(f, "{}:{}:{}", self.path, line, column),
        }
    }
}

impl FromStr for SourcePosition {
    type Err = Error;

    /// Parse `path`, `path:line` or `path:line:column`.
    ///
    /// Numbers are taken from the right so paths may contain colons.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s.ends_with(':') {
            return Err(Error::InvalidSourcePosition(s.to_string()));
        }

        let (rest, last) = match s.rsplit_once(':') {
            Some((rest, last)) => match last.parse::<u32>() {
                Ok(n) => (rest, n),
                Err(_) => return Ok(Self::file(s)),
            },
            None => return Ok(Self::file(s)),
        };

        let position = match rest.rsplit_once(':') {
            Some((path, line)) => match line.parse::<u32>() {
                Ok(line) => Self::file(path).with_line(line).with_column(last),
                Err(_) => Self::file(rest).with_line(last),
            },
            None => Self::file(rest).with_line(last),
        };

        if position.path.is_empty() || position.line == Some(0) {
            return Err(Error::InvalidSourcePosition(s.to_string()));
        }
        Ok(position)
    }
}

/// Remote URL of a source location.
///
/// The first definition whose path prefixes `path` wins. The line suffix is
/// only added when both it and a line number are known.
pub fn source_url(path: &str, line: Option<u32>, links: &[SourceLinkDefinition]) -> Option<String> {
    let link = links.iter().find(|l| path.starts_with(&l.path))?;
    let mut url = format!("{}{}", link.url, &path[link.path.len()..]);
    if let (Some(suffix), Some(line)) = (&link.line_suffix, line) {
        url.push_str(suffix);
        url.push_str(&line.to_string());
    }
    Some(url)
}

/// Attach source URL and position details to a declaration.
pub fn append_source_link(
    node: NodeBuilder,
    position: &SourcePosition,
    links: &[SourceLinkDefinition],
) -> NodeBuilder {
    let mut node = node;
    if let Some(url) = source_url(&position.path, position.line, links) {
        node = node.with_detail(NodeBuilder::new(NodeKind::from(SOURCE_URL_KIND), url));
    }
    node.with_detail(NodeBuilder::new(
        NodeKind::from(SOURCE_POSITION_KIND),
        position.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> Vec<SourceLinkDefinition> {
        vec![
            SourceLinkDefinition::new("/work/app/src", "https://example.org/app/blob/main/src")
                .with_line_suffix("#L"),
            SourceLinkDefinition::new("/work", "https://example.org/all"),
        ]
    }

    #[test]
    fn test_first_matching_prefix_wins() {
        let url = source_url("/work/app/src/Foo.kt", Some(12), &links());
        assert_eq!(
            url.as_deref(),
            Some("https://example.org/app/blob/main/src/Foo.kt#L12")
        );
    }

    #[test]
    fn test_line_suffix_needs_line() {
        let url = source_url("/work/app/src/Foo.kt", None, &links());
        assert_eq!(
            url.as_deref(),
            Some("https://example.org/app/blob/main/src/Foo.kt")
        );
    }

    #[test]
    fn test_no_suffix_configured() {
        let url = source_url("/work/lib/Bar.kt", Some(3), &links());
        assert_eq!(url.as_deref(), Some("https://example.org/all/lib/Bar.kt"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(source_url("/tmp/Baz.kt", Some(1), &links()), None);
    }

    #[test]
    fn test_position_display() {
        assert_eq!(SourcePosition::file("a.kt").to_string(), "a.kt");
        assert_eq!(SourcePosition::file("a.kt").with_line(4).to_string(), "a.kt:4");
        assert_eq!(
            SourcePosition::file("a.kt").with_line(4).with_column(2).to_string(),
            "a.kt:4:2"
        );
    }

    #[test]
    fn test_position_parse() {
        let pos: SourcePosition = "src/a.kt:4:2".parse().unwrap();
        assert_eq!(pos, SourcePosition::file("src/a.kt").with_line(4).with_column(2));

        let pos: SourcePosition = "C:\\src\\a.kt:7".parse().unwrap();
        assert_eq!(pos, SourcePosition::file("C:\\src\\a.kt").with_line(7));

        let pos: SourcePosition = "a.kt".parse().unwrap();
        assert_eq!(pos, SourcePosition::file("a.kt"));
    }

    #[test]
    fn test_position_parse_errors() {
        assert!("".parse::<SourcePosition>().is_err());
        assert!("a.kt:".parse::<SourcePosition>().is_err());
        assert!(":3".parse::<SourcePosition>().is_err());
        assert!("a.kt:0".parse::<SourcePosition>().is_err());
    }

    #[test]
    fn test_append_source_link_details() {
        let position = SourcePosition::file("/work/app/src/Foo.kt").with_line(9);
        let node = append_source_link(
            NodeBuilder::new(NodeKind::Class, "Foo"),
            &position,
            &links(),
        )
        .build();

        let url = node.detail(&NodeKind::from(SOURCE_URL_KIND)).unwrap();
        assert_eq!(url.name(), "https://example.org/app/blob/main/src/Foo.kt#L9");
        let pos = node.detail(&NodeKind::from(SOURCE_POSITION_KIND)).unwrap();
        assert_eq!(pos.name(), "/work/app/src/Foo.kt:9");
    }
}
