//! Rendering options and configuration.

use std::fmt;
use std::str::FromStr;

use super::builder::OutputBuilder;
use super::{FrontMatterBuilder, HtmlBuilder, MarkdownBuilder};

/// Signatures whose text is at least this long get hard line breaks.
pub const DEFAULT_HARD_BREAK_THRESHOLD: usize = 62;

/// Layout token written into front matter.
pub const DEFAULT_LAYOUT: &str = "api";

/// Options for rendering content trees.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Signature text length from which soft line breaks become hard
    pub hard_break_threshold: usize,

    /// Layout token for front-matter output
    pub layout: String,

    /// Stylesheet linked from the HTML template
    pub stylesheet: Option<String>,

    /// Wrap HTML output in the page template
    pub include_template: bool,

    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Character to use for unordered list markers
    pub list_marker: char,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hard line break threshold.
    pub fn with_hard_break_threshold(mut self, threshold: usize) -> Self {
        self.hard_break_threshold = threshold;
        self
    }

    /// Set the front-matter layout token.
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Set or clear the HTML stylesheet.
    pub fn with_stylesheet(mut self, stylesheet: Option<String>) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Enable or disable the HTML page template.
    pub fn with_template(mut self, include: bool) -> Self {
        self.include_template = include;
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            hard_break_threshold: DEFAULT_HARD_BREAK_THRESHOLD,
            layout: DEFAULT_LAYOUT.to_string(),
            stylesheet: Some("style.css".to_string()),
            include_template: true,
            max_heading_level: 6,
            list_marker: '-',
        }
    }
}

/// Output format, selecting one of the builders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Standalone HTML
    #[default]
    Html,
    /// GitHub-flavored Markdown
    Markdown,
    /// Markdown with front matter for static site generators
    FrontMatter,
}

impl OutputFormat {
    /// Extension of generated files.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Markdown | OutputFormat::FrontMatter => "md",
        }
    }

    /// Extension used in links between generated pages.
    ///
    /// Static site generators serve front-matter pages as HTML.
    pub fn link_extension(&self) -> &'static str {
        match self {
            OutputFormat::Html | OutputFormat::FrontMatter => "html",
            OutputFormat::Markdown => "md",
        }
    }

    /// Create a fresh builder for one render.
    pub fn builder(&self, options: &RenderOptions) -> Box<dyn OutputBuilder + Send> {
        match self {
            OutputFormat::Html => Box::new(HtmlBuilder::new(options.clone())),
            OutputFormat::Markdown => Box::new(MarkdownBuilder::new(options.clone())),
            OutputFormat::FrontMatter => Box::new(FrontMatterBuilder::new(options.clone())),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "markdown" | "md" | "gfm" => Ok(OutputFormat::Markdown),
            "frontmatter" | "front-matter" | "hexo" => Ok(OutputFormat::FrontMatter),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "markdown",
            OutputFormat::FrontMatter => "frontmatter",
        };
        f.write_str(name)
    }
}
