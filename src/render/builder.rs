//! The output builder contract and the content tree walker.
//!
//! An [`OutputBuilder`] is a stateful strategy that serializes content into
//! one text format. It owns the page buffer and is used for exactly one
//! render. The [`ContentWalker`] drives a builder over a content tree and owns
//! the traversal state, notably whether soft line breaks are currently hard.

use crate::model::ContentNode;

use super::RenderOptions;

/// A container being opened or closed by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container<'a> {
    /// A paragraph
    Paragraph,
    /// A header of the given level (1-6)
    Header(u8),
    /// Strong emphasis
    Strong,
    /// Emphasis
    Emphasis,
    /// Struck-through text
    Strikethrough,
    /// Inline code span
    Code,
    /// Bulleted list
    UnorderedList,
    /// Numbered list
    OrderedList,
    /// A list item
    ListItem,
    /// A code block with an optional language tag
    BlockCode(Option<&'a str>),
    /// A table with column headers
    Table(&'a [String]),
    /// A table row
    TableRow,
    /// A table cell
    TableCell,
    /// A link to the given raw href
    Link(&'a str),
    /// A declaration signature
    Signature,
}

/// Page-level metadata handed to the page wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo<'a> {
    /// Page title
    pub title: &'a str,
    /// Layout token for static site generators
    pub layout: &'a str,
}

/// Trait implemented by every output format.
///
/// Leaf methods receive raw text and must escape it for their format.
pub trait OutputBuilder {
    /// Append plain text.
    fn append_text(&mut self, text: &str);

    /// Append signature punctuation.
    fn append_symbol(&mut self, text: &str);

    /// Append a keyword.
    fn append_keyword(&mut self, text: &str);

    /// Append an identifier, optionally carrying an anchor id.
    fn append_identifier(&mut self, text: &str, anchor: Option<&str>);

    /// Append a soft line break. `hard` is set inside long signatures.
    fn append_soft_line_break(&mut self, hard: bool);

    /// Append an indented soft line break. `hard` is set inside long signatures.
    fn append_indented_soft_line_break(&mut self, hard: bool);

    /// Append a line break that is always visible.
    fn append_line_break(&mut self);

    /// Append a named anchor.
    fn append_anchor(&mut self, name: &str);

    /// Append a non-breaking space.
    fn append_non_breaking_space(&mut self);

    /// Append a breadcrumb separator.
    fn append_breadcrumb_separator(&mut self);

    /// Open a container.
    fn open(&mut self, container: Container<'_>);

    /// Close the most recently opened container.
    fn close(&mut self, container: Container<'_>);

    /// Write the page prologue (template header, front matter, ...).
    fn begin_page(&mut self, page: &PageInfo<'_>);

    /// Write the page epilogue.
    fn end_page(&mut self, page: &PageInfo<'_>);

    /// Take the accumulated output, leaving the builder empty.
    fn take_output(&mut self) -> String;
}

/// Recursive-descent walker feeding a content tree to an output builder.
pub struct ContentWalker<'b, B: OutputBuilder + ?Sized> {
    builder: &'b mut B,
    hard_break_threshold: usize,
    max_heading_level: u8,
}

impl<'b, B: OutputBuilder + ?Sized> ContentWalker<'b, B> {
    /// Create a walker over `builder`.
    pub fn new(builder: &'b mut B, options: &RenderOptions) -> Self {
        Self {
            builder,
            hard_break_threshold: options.hard_break_threshold,
            max_heading_level: options.max_heading_level.clamp(1, 6),
        }
    }

    /// Walk a sequence of top-level nodes.
    pub fn walk(&mut self, nodes: &[ContentNode]) {
        self.walk_nodes(nodes, false);
    }

    // `hard_breaks` is scoped to the call: leaving a signature returns to the
    // caller's value on every path.
    fn walk_nodes(&mut self, nodes: &[ContentNode], hard_breaks: bool) {
        for node in nodes {
            self.walk_node(node, hard_breaks);
        }
    }

    fn walk_node(&mut self, node: &ContentNode, hard_breaks: bool) {
        match node {
            ContentNode::Text { value } => self.builder.append_text(value),
            ContentNode::Symbol { value } => self.builder.append_symbol(value),
            ContentNode::Keyword { value } => self.builder.append_keyword(value),
            ContentNode::Identifier { value, anchor } => {
                self.builder.append_identifier(value, anchor.as_deref())
            }
            ContentNode::Anchor { name } => self.builder.append_anchor(name),
            ContentNode::LineBreak => self.builder.append_line_break(),
            ContentNode::SoftLineBreak => self.builder.append_soft_line_break(hard_breaks),
            ContentNode::IndentedSoftLineBreak => {
                self.builder.append_indented_soft_line_break(hard_breaks)
            }
            ContentNode::NonBreakingSpace => self.builder.append_non_breaking_space(),
            ContentNode::BreadcrumbSeparator => self.builder.append_breadcrumb_separator(),
            ContentNode::Link { target, children } => match target.href() {
                Some(href) => self.wrap(Container::Link(&href), children, hard_breaks),
                None => self.walk_nodes(children, hard_breaks),
            },
            ContentNode::Paragraph { children } => {
                self.wrap(Container::Paragraph, children, hard_breaks)
            }
            ContentNode::Header { level, children } => {
                let clamped = (*level).clamp(1, self.max_heading_level);
                if clamped != *level {
                    log::warn!("Header level {} clamped to {}", level, clamped);
                }
                self.wrap(Container::Header(clamped), children, hard_breaks)
            }
            ContentNode::Strong { children } => self.wrap(Container::Strong, children, hard_breaks),
            ContentNode::Emphasis { children } => {
                self.wrap(Container::Emphasis, children, hard_breaks)
            }
            ContentNode::Strikethrough { children } => {
                self.wrap(Container::Strikethrough, children, hard_breaks)
            }
            ContentNode::Code { children } => self.wrap(Container::Code, children, hard_breaks),
            ContentNode::UnorderedList { children } => {
                self.wrap(Container::UnorderedList, children, hard_breaks)
            }
            ContentNode::OrderedList { children } => {
                self.wrap(Container::OrderedList, children, hard_breaks)
            }
            ContentNode::ListItem { children } => {
                self.wrap(Container::ListItem, children, hard_breaks)
            }
            ContentNode::BlockCode { language, children } => {
                self.wrap(Container::BlockCode(language.as_deref()), children, hard_breaks)
            }
            ContentNode::Table { columns, children } => {
                self.wrap(Container::Table(columns), children, hard_breaks)
            }
            ContentNode::TableRow { children } => {
                self.wrap(Container::TableRow, children, hard_breaks)
            }
            ContentNode::TableCell { children } => {
                self.wrap(Container::TableCell, children, hard_breaks)
            }
            ContentNode::Signature { children } => {
                let length = node.text_length();
                if length == 0 {
                    return;
                }
                let hard = length >= self.hard_break_threshold;
                log::trace!("Signature length {} (hard breaks: {})", length, hard);
                self.wrap(Container::Signature, children, hard);
            }
        }
    }

    fn wrap(&mut self, container: Container<'_>, children: &[ContentNode], hard_breaks: bool) {
        self.builder.open(container);
        self.walk_nodes(children, hard_breaks);
        self.builder.close(container);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentBlock, LinkTarget};

    /// Records every builder call as a short event string.
    #[derive(Default)]
    struct RecordingBuilder {
        events: Vec<String>,
    }

    impl OutputBuilder for RecordingBuilder {
        fn append_text(&mut self, text: &str) {
            self.events.push(format!("text:{}", text));
        }
        fn append_symbol(&mut self, text: &str) {
            self.events.push(format!("symbol:{}", text));
        }
        fn append_keyword(&mut self, text: &str) {
            self.events.push(format!("keyword:{}", text));
        }
        fn append_identifier(&mut self, text: &str, _anchor: Option<&str>) {
            self.events.push(format!("identifier:{}", text));
        }
        fn append_soft_line_break(&mut self, hard: bool) {
            self.events.push(format!("soft:{}", hard));
        }
        fn append_indented_soft_line_break(&mut self, hard: bool) {
            self.events.push(format!("indented:{}", hard));
        }
        fn append_line_break(&mut self) {
            self.events.push("br".into());
        }
        fn append_anchor(&mut self, name: &str) {
            self.events.push(format!("anchor:{}", name));
        }
        fn append_non_breaking_space(&mut self) {
            self.events.push("nbsp".into());
        }
        fn append_breadcrumb_separator(&mut self) {
            self.events.push("crumb".into());
        }
        fn open(&mut self, container: Container<'_>) {
            self.events.push(format!("open:{:?}", container));
        }
        fn close(&mut self, container: Container<'_>) {
            self.events.push(format!("close:{:?}", container));
        }
        fn begin_page(&mut self, _page: &PageInfo<'_>) {}
        fn end_page(&mut self, _page: &PageInfo<'_>) {}
        fn take_output(&mut self) -> String {
            self.events.join("\n")
        }
    }

    fn walk(block: &ContentBlock) -> Vec<String> {
        let mut builder = RecordingBuilder::default();
        ContentWalker::new(&mut builder, &RenderOptions::default()).walk(block.children());
        builder.events
    }

    #[test]
    fn test_soft_break_outside_signature_is_soft() {
        let mut block = ContentBlock::new();
        block.text("a").soft_line_break();
        assert_eq!(walk(&block), vec!["text:a", "soft:false"]);
    }

    #[test]
    fn test_flag_resets_after_long_signature() {
        let mut block = ContentBlock::new();
        block.signature(|s| {
            s.text("x".repeat(70)).soft_line_break();
        });
        block.soft_line_break();
        let events = walk(&block);
        assert!(events.contains(&"soft:true".to_string()));
        assert_eq!(events.last().unwrap(), "soft:false");
    }

    #[test]
    fn test_empty_signature_is_skipped() {
        let mut block = ContentBlock::new();
        block.signature(|s| {
            s.soft_line_break();
        });
        assert!(walk(&block).is_empty());
    }

    #[test]
    fn test_unresolved_link_walks_children_only() {
        let mut block = ContentBlock::new();
        block.link(LinkTarget::unresolved("Foo"), |l| {
            l.identifier("Foo");
        });
        assert_eq!(walk(&block), vec!["identifier:Foo"]);
    }

    #[test]
    fn test_header_level_limited_by_options() {
        let mut block = ContentBlock::new();
        block.header(5, |h| {
            h.text("t");
        });
        let mut builder = RecordingBuilder::default();
        let options = RenderOptions::new().with_max_heading(3);
        ContentWalker::new(&mut builder, &options).walk(block.children());
        assert_eq!(builder.events[0], "open:Header(3)");
    }
}
