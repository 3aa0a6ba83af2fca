//! HTML output.

use std::sync::Arc;

use super::builder::{Container, OutputBuilder, PageInfo};
use super::escape::escape_html;
use super::RenderOptions;

/// Page header and footer around HTML output.
pub trait HtmlTemplate: Send + Sync {
    /// Write everything up to the start of the page body.
    fn append_header(&self, out: &mut String, title: &str, stylesheet: Option<&str>);

    /// Write everything after the page body.
    fn append_footer(&self, out: &mut String);
}

/// Minimal standalone HTML document template.
#[derive(Debug, Clone, Default)]
pub struct DefaultHtmlTemplate;

impl HtmlTemplate for DefaultHtmlTemplate {
    fn append_header(&self, out: &mut String, title: &str, stylesheet: Option<&str>) {
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        if !title.is_empty() {
            out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        }
        if let Some(href) = stylesheet {
            out.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">\n",
                escape_html(href)
            ));
        }
        out.push_str("</head>\n<body>\n");
    }

    fn append_footer(&self, out: &mut String) {
        out.push_str("</body>\n</html>\n");
    }
}

/// HTML output builder.
pub struct HtmlBuilder {
    out: String,
    options: RenderOptions,
    template: Arc<dyn HtmlTemplate>,
}

impl HtmlBuilder {
    /// Create an HTML builder with the default template.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            out: String::new(),
            options,
            template: Arc::new(DefaultHtmlTemplate),
        }
    }

    /// Replace the page template.
    pub fn with_template(mut self, template: Arc<dyn HtmlTemplate>) -> Self {
        self.template = template;
        self
    }

    fn span(&mut self, class: &str, text: &str) {
        self.out.push_str(&format!(
            "<span class=\"{}\">{}</span>",
            class,
            escape_html(text)
        ));
    }
}

impl OutputBuilder for HtmlBuilder {
    fn append_text(&mut self, text: &str) {
        self.out.push_str(&escape_html(text));
    }

    fn append_symbol(&mut self, text: &str) {
        self.span("symbol", text);
    }

    fn append_keyword(&mut self, text: &str) {
        self.span("keyword", text);
    }

    fn append_identifier(&mut self, text: &str, anchor: Option<&str>) {
        let id = anchor
            .map(|a| format!(" id=\"{}\"", escape_html(a)))
            .unwrap_or_default();
        self.out.push_str(&format!(
            "<span class=\"identifier\"{}>{}</span>",
            id,
            escape_html(text)
        ));
    }

    fn append_soft_line_break(&mut self, hard: bool) {
        if hard {
            self.out.push_str("<br/>");
        }
    }

    fn append_indented_soft_line_break(&mut self, hard: bool) {
        if hard {
            self.out.push_str("<br/>&nbsp;&nbsp;&nbsp;&nbsp;");
        }
    }

    fn append_line_break(&mut self) {
        self.out.push_str("<br/>");
    }

    fn append_anchor(&mut self, name: &str) {
        self.out
            .push_str(&format!("<a name=\"{}\"></a>", escape_html(name)));
    }

    fn append_non_breaking_space(&mut self) {
        self.out.push_str("&nbsp;");
    }

    fn append_breadcrumb_separator(&mut self) {
        self.out.push_str("&nbsp;/&nbsp;");
    }

    fn open(&mut self, container: Container<'_>) {
        match container {
            Container::Paragraph => self.out.push_str("<p>"),
            Container::Header(level) => self.out.push_str(&format!("<h{}>", level)),
            Container::Strong => self.out.push_str("<strong>"),
            Container::Emphasis => self.out.push_str("<em>"),
            Container::Strikethrough => self.out.push_str("<s>"),
            Container::Code => self.out.push_str("<code>"),
            Container::UnorderedList => self.out.push_str("<ul>\n"),
            Container::OrderedList => self.out.push_str("<ol>\n"),
            Container::ListItem => self.out.push_str("<li>"),
            Container::BlockCode(Some(language)) => self.out.push_str(&format!(
                "<pre><code class=\"lang-{}\">",
                escape_html(language)
            )),
            Container::BlockCode(None) => self.out.push_str("<pre><code>"),
            Container::Table(columns) => {
                self.out.push_str("<table>\n");
                if !columns.is_empty() {
                    self.out.push_str("<thead>\n<tr>");
                    for column in columns {
                        self.out
                            .push_str(&format!("<th>{}</th>", escape_html(column)));
                    }
                    self.out.push_str("</tr>\n</thead>\n");
                }
                self.out.push_str("<tbody>\n");
            }
            Container::TableRow => self.out.push_str("<tr>"),
            Container::TableCell => self.out.push_str("<td>"),
            Container::Link(href) => self
                .out
                .push_str(&format!("<a href=\"{}\">", escape_html(href))),
            Container::Signature => self.out.push_str("<div class=\"signature\">"),
        }
    }

    fn close(&mut self, container: Container<'_>) {
        match container {
            Container::Paragraph => self.out.push_str("</p>\n"),
            Container::Header(level) => self.out.push_str(&format!("</h{}>\n", level)),
            Container::Strong => self.out.push_str("</strong>"),
            Container::Emphasis => self.out.push_str("</em>"),
            Container::Strikethrough => self.out.push_str("</s>"),
            Container::Code => self.out.push_str("</code>"),
            Container::UnorderedList => self.out.push_str("</ul>\n"),
            Container::OrderedList => self.out.push_str("</ol>\n"),
            Container::ListItem => self.out.push_str("</li>\n"),
            Container::BlockCode(_) => self.out.push_str("</code></pre>\n"),
            Container::Table(_) => self.out.push_str("</tbody>\n</table>\n"),
            Container::TableRow => self.out.push_str("</tr>\n"),
            Container::TableCell => self.out.push_str("</td>"),
            Container::Link(_) => self.out.push_str("</a>"),
            Container::Signature => self.out.push_str("</div>\n"),
        }
    }

    fn begin_page(&mut self, page: &PageInfo<'_>) {
        if self.options.include_template {
            let template = Arc::clone(&self.template);
            template.append_header(&mut self.out, page.title, self.options.stylesheet.as_deref());
        }
    }

    fn end_page(&mut self, _page: &PageInfo<'_>) {
        if self.options.include_template {
            let template = Arc::clone(&self.template);
            template.append_footer(&mut self.out);
        }
    }

    fn take_output(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentBlock, LinkTarget};
    use crate::render::ContentWalker;

    fn render(block: &ContentBlock) -> String {
        let options = RenderOptions::new().with_template(false);
        let mut builder = HtmlBuilder::new(options.clone());
        ContentWalker::new(&mut builder, &options).walk(block.children());
        builder.take_output()
    }

    #[test]
    fn test_spans() {
        let mut block = ContentBlock::new();
        block
            .keyword("fun ")
            .identifier_with_anchor("f", "f()")
            .symbol("(");
        assert_eq!(
            render(&block),
            "<span class=\"keyword\">fun </span><span class=\"identifier\" id=\"f()\">f</span><span class=\"symbol\">(</span>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let mut block = ContentBlock::new();
        block.text("<script>alert(\"x\") & co</script>");
        let html = render(&block);
        assert_eq!(
            html,
            "&lt;script&gt;alert(&quot;x&quot;) &amp; co&lt;/script&gt;"
        );
    }

    #[test]
    fn test_block_code_language() {
        let mut block = ContentBlock::new();
        block.block_code(Some("kotlin"), |c| {
            c.text("val x = 1 < 2");
        });
        assert_eq!(
            render(&block),
            "<pre><code class=\"lang-kotlin\">val x = 1 &lt; 2</code></pre>\n"
        );
    }

    #[test]
    fn test_link_href_escaped() {
        let mut block = ContentBlock::new();
        block.link(LinkTarget::url("a.html?x=1&y=\"2\""), |l| {
            l.text("a");
        });
        assert_eq!(
            render(&block),
            "<a href=\"a.html?x=1&amp;y=&quot;2&quot;\">a</a>"
        );
    }

    #[test]
    fn test_breadcrumbs_and_spaces() {
        let mut block = ContentBlock::new();
        block.text("a").breadcrumb_separator().text("b").non_breaking_space();
        assert_eq!(render(&block), "a&nbsp;/&nbsp;b&nbsp;");
    }

    #[test]
    fn test_template_wraps_page() {
        let options = RenderOptions::new();
        let mut builder = HtmlBuilder::new(options);
        let page = PageInfo {
            title: "Foo <T>",
            layout: "api",
        };
        builder.begin_page(&page);
        builder.append_text("body");
        builder.end_page(&page);
        let html = builder.take_output();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Foo &lt;T&gt;</title>"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"style.css\">"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_custom_template() {
        struct Bare;
        impl HtmlTemplate for Bare {
            fn append_header(&self, out: &mut String, _title: &str, _stylesheet: Option<&str>) {
                out.push_str("[");
            }
            fn append_footer(&self, out: &mut String) {
                out.push_str("]");
            }
        }

        let mut builder = HtmlBuilder::new(RenderOptions::new()).with_template(Arc::new(Bare));
        let page = PageInfo {
            title: "",
            layout: "api",
        };
        builder.begin_page(&page);
        builder.append_text("x");
        builder.end_page(&page);
        assert_eq!(builder.take_output(), "[x]");
    }

    #[test]
    fn test_template_without_stylesheet() {
        let options = RenderOptions::new().with_stylesheet(None);
        let mut builder = HtmlBuilder::new(options);
        let page = PageInfo {
            title: "Foo",
            layout: "api",
        };
        builder.begin_page(&page);
        builder.end_page(&page);
        let html = builder.take_output();
        assert!(html.contains("<title>Foo</title>"));
        assert!(!html.contains("stylesheet"));
    }
}
