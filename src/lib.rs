//! # sigdoc
//!
//! Declaration signature rendering for API documentation generators.
//!
//! This library turns semantic declaration nodes (classes, functions,
//! properties, ...) into a format-agnostic content tree and serializes that
//! tree to HTML, GitHub-flavored Markdown, or Markdown with front matter.
//!
//! ## Quick Start
//!
//! ```
//! use sigdoc::model::{NodeBuilder, NodeKind};
//! use sigdoc::{OutputFormat, Sigdoc};
//!
//! fn main() -> sigdoc::Result<()> {
//!     let function = NodeBuilder::new(NodeKind::Function, "f")
//!         .with_detail(NodeBuilder::parameter("x", NodeBuilder::type_ref("Int", vec![])))
//!         .with_detail(NodeBuilder::type_ref("Unit", vec![]))
//!         .build();
//!
//!     let markdown = Sigdoc::new()
//!         .with_format(OutputFormat::Markdown)
//!         .render(&[function])?;
//!     assert!(markdown.contains("fun f(x: Int): Unit"));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Kotlin signatures**: classes, functions, properties, generics and
//!   function types
//! - **Multiple output formats**: HTML, GFM Markdown, front-matter Markdown,
//!   JSON dumps of content trees
//! - **Long signature wrapping**: soft breaks turn hard past a length threshold
//! - **Parallel processing**: pages render independently on the Rayon pool

pub mod error;
pub mod model;
pub mod render;
pub mod signature;
pub mod source_link;

use std::sync::Arc;

pub use error::{Error, Result};
pub use model::{ContentBlock, ContentNode, DocumentationNode, LinkTarget, NodeBuilder, NodeKind};
pub use render::{JsonFormat, OutputBuilder, OutputFormat, PageContent, RenderOptions};
pub use signature::{KotlinSignatureRenderer, SignatureRenderer, UnknownKindPolicy};
pub use source_link::{source_url, SourceLinkDefinition, SourcePosition};

/// Render the signature of a single declaration to a content tree.
///
/// # Example
///
/// ```
/// use sigdoc::model::{NodeBuilder, NodeKind};
///
/// let class = NodeBuilder::new(NodeKind::Class, "Foo").build();
/// let block = sigdoc::render_signature(&class).unwrap();
/// assert_eq!(block.plain_text(), "class Foo");
/// ```
pub fn render_signature(node: &DocumentationNode) -> Result<ContentBlock> {
    KotlinSignatureRenderer::new().render(node)
}

/// Render a signature page for a group of declarations as HTML.
pub fn to_html(nodes: &[Arc<DocumentationNode>]) -> Result<String> {
    Sigdoc::new().with_format(OutputFormat::Html).render(nodes)
}

/// Render a signature page for a group of declarations as Markdown.
pub fn to_markdown(nodes: &[Arc<DocumentationNode>]) -> Result<String> {
    Sigdoc::new().with_format(OutputFormat::Markdown).render(nodes)
}

/// Builder for rendering declaration pages.
///
/// # Example
///
/// ```
/// use sigdoc::model::{NodeBuilder, NodeKind};
/// use sigdoc::{OutputFormat, Sigdoc, UnknownKindPolicy};
///
/// let class = NodeBuilder::new(NodeKind::Class, "Foo").build();
/// let html = Sigdoc::new()
///     .with_format(OutputFormat::Html)
///     .with_hard_break_threshold(80)
///     .with_unknown_kinds(UnknownKindPolicy::Reject)
///     .without_template()
///     .render(&[class])?;
/// assert!(html.contains("<div class=\"signature\">"));
/// # Ok::<(), sigdoc::Error>(())
/// ```
pub struct Sigdoc {
    renderer: Arc<dyn SignatureRenderer>,
    format: OutputFormat,
    options: RenderOptions,
}

impl Sigdoc {
    /// Create a builder with the Kotlin renderer and HTML output.
    pub fn new() -> Self {
        Self {
            renderer: Arc::new(KotlinSignatureRenderer::new()),
            format: OutputFormat::default(),
            options: RenderOptions::default(),
        }
    }

    /// Use a custom signature renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn SignatureRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Set how the Kotlin renderer treats kinds without a signature rule.
    pub fn with_unknown_kinds(mut self, policy: UnknownKindPolicy) -> Self {
        self.renderer = Arc::new(KotlinSignatureRenderer::new().with_unknown_kinds(policy));
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Replace the render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the signature length from which soft breaks become hard.
    pub fn with_hard_break_threshold(mut self, threshold: usize) -> Self {
        self.options = self.options.with_hard_break_threshold(threshold);
        self
    }

    /// Set the front-matter layout token.
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.options = self.options.with_layout(layout);
        self
    }

    /// Emit HTML fragments without the page template.
    pub fn without_template(mut self) -> Self {
        self.options = self.options.with_template(false);
        self
    }

    /// Assemble the signature page for a group of declarations.
    pub fn page(&self, nodes: &[Arc<DocumentationNode>]) -> Result<PageContent> {
        PageContent::for_nodes(nodes, self.renderer.as_ref())
    }

    /// Render the signature page for a group of declarations.
    pub fn render(&self, nodes: &[Arc<DocumentationNode>]) -> Result<String> {
        let page = self.page(nodes)?;
        let mut builder = self.format.builder(&self.options);
        Ok(render::render_page(builder.as_mut(), &page, &self.options))
    }

    /// Render one page per group of declarations, in parallel.
    pub fn render_all(&self, groups: &[Vec<Arc<DocumentationNode>>]) -> Result<Vec<String>> {
        let pages = groups
            .iter()
            .map(|nodes| self.page(nodes))
            .collect::<Result<Vec<_>>>()?;
        Ok(render::render_pages(&pages, self.format, &self.options))
    }
}

impl Default for Sigdoc {
    fn default() -> Self {
        Self::new()
    }
}
