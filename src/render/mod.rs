//! Rendering module for serializing content trees to text formats.

mod builder;
mod escape;
mod frontmatter;
mod html;
mod json;
mod markdown;
mod options;
mod page;

pub use builder::{Container, ContentWalker, OutputBuilder, PageInfo};
pub use escape::{escape_html, escape_markdown, escape_markdown_html, escape_url, escape_yaml};
pub use frontmatter::FrontMatterBuilder;
pub use html::{DefaultHtmlTemplate, HtmlBuilder, HtmlTemplate};
pub use json::{to_json, JsonFormat};
pub use markdown::MarkdownBuilder;
pub use options::{OutputFormat, RenderOptions, DEFAULT_HARD_BREAK_THRESHOLD, DEFAULT_LAYOUT};
pub use page::{
    format_page_title, page_title, render_page, render_pages, to_front_matter, to_html,
    to_markdown, PageContent,
};
