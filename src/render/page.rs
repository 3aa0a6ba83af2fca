//! Page assembly and rendering.

use std::sync::Arc;

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{ContentBlock, DocumentationNode};
use crate::signature::SignatureRenderer;

use super::builder::{ContentWalker, OutputBuilder, PageInfo};
use super::{OutputFormat, RenderOptions};

/// Content of one generated page.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// Page title
    pub title: String,
    /// Page body
    pub content: ContentBlock,
}

impl PageContent {
    /// Create a page from a title and a body.
    pub fn new(title: impl Into<String>, content: ContentBlock) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }

    /// Build the signature page for a group of declarations.
    ///
    /// Each node contributes an anchor named after its display name followed
    /// by its signature.
    pub fn for_nodes(
        nodes: &[Arc<DocumentationNode>],
        renderer: &dyn SignatureRenderer,
    ) -> Result<Self> {
        let title = page_title(nodes, renderer)?.unwrap_or_default();
        let mut content = ContentBlock::new();
        for node in nodes {
            let name = renderer.render_name(node)?;
            let signature = renderer.render(node)?;
            content.anchor(name);
            content.signature(|s| {
                for child in signature.into_children() {
                    s.push(child);
                }
            });
        }
        log::debug!("Assembled page {:?} from {} nodes", title, nodes.len());
        Ok(Self { title, content })
    }
}

/// Title of the page documenting a single node.
///
/// A root node is titled by its own name. Deeper nodes get the dotted path
/// below the root followed by `" - "` and the root's name.
pub fn format_page_title(
    node: &Arc<DocumentationNode>,
    renderer: &dyn SignatureRenderer,
) -> Result<String> {
    let ancestors = node.ancestors();
    let Some(root) = ancestors.first() else {
        return renderer.render_name(node);
    };

    let mut names = Vec::new();
    for step in ancestors.iter().skip(1).chain(std::iter::once(node)) {
        let name = renderer.render_name(step)?;
        if !name.is_empty() {
            names.push(name);
        }
    }
    Ok(format!("{} - {}", names.join("."), root.name()))
}

/// Title of a page documenting a group of nodes.
///
/// `None` when there are no nodes. Nodes that disagree yield their distinct
/// titles joined with `", "`.
pub fn page_title(
    nodes: &[Arc<DocumentationNode>],
    renderer: &dyn SignatureRenderer,
) -> Result<Option<String>> {
    let mut titles: Vec<String> = Vec::new();
    for node in nodes {
        let title = format_page_title(node, renderer)?;
        if !titles.contains(&title) {
            titles.push(title);
        }
    }
    Ok(match titles.len() {
        0 => None,
        _ => Some(titles.join(", ")),
    })
}

/// Render one page with the given builder.
pub fn render_page<B: OutputBuilder + ?Sized>(
    builder: &mut B,
    page: &PageContent,
    options: &RenderOptions,
) -> String {
    let info = PageInfo {
        title: &page.title,
        layout: &options.layout,
    };
    builder.begin_page(&info);
    ContentWalker::new(builder, options).walk(page.content.children());
    builder.end_page(&info);
    builder.take_output()
}

/// Render pages in parallel, one fresh builder per page.
///
/// Results are in input order.
pub fn render_pages(
    pages: &[PageContent],
    format: OutputFormat,
    options: &RenderOptions,
) -> Vec<String> {
    pages
        .par_iter()
        .map(|page| {
            let mut builder = format.builder(options);
            render_page(builder.as_mut(), page, options)
        })
        .collect()
}

/// Render a page as standalone HTML.
pub fn to_html(page: &PageContent, options: &RenderOptions) -> String {
    render_with(OutputFormat::Html, page, options)
}

/// Render a page as GitHub-flavored Markdown.
pub fn to_markdown(page: &PageContent, options: &RenderOptions) -> String {
    render_with(OutputFormat::Markdown, page, options)
}

/// Render a page as Markdown with front matter.
pub fn to_front_matter(page: &PageContent, options: &RenderOptions) -> String {
    render_with(OutputFormat::FrontMatter, page, options)
}

fn render_with(format: OutputFormat, page: &PageContent, options: &RenderOptions) -> String {
    let mut builder = format.builder(options);
    render_page(builder.as_mut(), page, options)
}
