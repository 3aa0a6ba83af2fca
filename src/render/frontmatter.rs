//! Markdown with front matter for static site generators.
//!
//! Output is GFM with a `---` metadata block on top. Signatures are wrapped
//! in a styled `div` and their tokens use the same HTML spans as the HTML
//! output, so this format deliberately mixes inline HTML into Markdown.

use super::builder::{Container, OutputBuilder, PageInfo};
use super::escape::{escape_html, escape_markdown_html, escape_yaml};
use super::markdown::MarkdownBuilder;
use super::RenderOptions;

/// Front-matter Markdown builder, decorating [`MarkdownBuilder`].
pub struct FrontMatterBuilder {
    inner: MarkdownBuilder,
    signature_depth: usize,
}

impl FrontMatterBuilder {
    /// Create a front-matter builder.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            inner: MarkdownBuilder::new(options),
            signature_depth: 0,
        }
    }

    /// Escape leaf text for the current position.
    ///
    /// A signature `div` starts an HTML block, whose content Markdown emits
    /// verbatim, so backslash escapes would show up literally there.
    fn escape(&self, text: &str) -> String {
        if self.signature_depth > 0 {
            escape_html(text)
        } else {
            escape_markdown_html(text)
        }
    }

    fn span(&mut self, class: &str, text: &str) {
        if self.inner.in_code() {
            self.inner.write_raw(text);
        } else {
            let span = format!("<span class=\"{}\">{}</span>", class, self.escape(text));
            self.inner.write_raw(&span);
        }
    }
}

impl OutputBuilder for FrontMatterBuilder {
    fn append_text(&mut self, text: &str) {
        if self.inner.in_code() {
            self.inner.write_raw(text);
        } else {
            let escaped = self.escape(text);
            self.inner.write_raw(&escaped);
        }
    }

    fn append_symbol(&mut self, text: &str) {
        self.span("symbol", text);
    }

    fn append_keyword(&mut self, text: &str) {
        self.span("keyword", text);
    }

    fn append_identifier(&mut self, text: &str, anchor: Option<&str>) {
        if self.inner.in_code() {
            self.inner.write_raw(text);
            return;
        }
        let id = anchor
            .map(|a| format!(" id=\"{}\"", escape_html(a)))
            .unwrap_or_default();
        let span = format!(
            "<span class=\"identifier\"{}>{}</span>",
            id,
            self.escape(text)
        );
        self.inner.write_raw(&span);
    }

    fn append_soft_line_break(&mut self, hard: bool) {
        if hard {
            self.inner.write_raw("<br/>");
        }
    }

    fn append_indented_soft_line_break(&mut self, hard: bool) {
        if hard {
            self.inner.write_raw("<br/>&nbsp;&nbsp;&nbsp;&nbsp;");
        }
    }

    fn append_line_break(&mut self) {
        self.inner.append_line_break();
    }

    fn append_anchor(&mut self, name: &str) {
        self.inner.append_anchor(name);
    }

    fn append_non_breaking_space(&mut self) {
        self.inner.append_non_breaking_space();
    }

    fn append_breadcrumb_separator(&mut self) {
        self.inner.append_breadcrumb_separator();
    }

    fn open(&mut self, container: Container<'_>) {
        match container {
            Container::Signature => {
                self.inner.ensure_block_start();
                self.inner.write_raw("<div class=\"signature\">");
                self.signature_depth += 1;
            }
            // Markdown link syntax is not parsed inside an HTML block.
            Container::Link(href) if self.signature_depth > 0 => {
                let open = format!("<a href=\"{}\">", escape_html(href));
                self.inner.write_raw(&open);
            }
            other => self.inner.open(other),
        }
    }

    fn close(&mut self, container: Container<'_>) {
        match container {
            Container::Signature => {
                self.inner.write_raw("</div>\n\n");
                self.signature_depth = self.signature_depth.saturating_sub(1);
            }
            Container::Link(_) if self.signature_depth > 0 => self.inner.write_raw("</a>"),
            other => self.inner.close(other),
        }
    }

    fn begin_page(&mut self, page: &PageInfo<'_>) {
        let header = format!(
            "---\ntitle: \"{}\"\nlayout: {}\n---\n\n",
            escape_yaml(page.title),
            page.layout
        );
        self.inner.write_raw(&header);
        self.inner.begin_page(page);
    }

    fn end_page(&mut self, page: &PageInfo<'_>) {
        self.inner.end_page(page);
    }

    fn take_output(&mut self) -> String {
        self.inner.take_output()
    }
}
