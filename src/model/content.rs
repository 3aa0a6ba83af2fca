//! Format-agnostic content tree.

use serde::{Deserialize, Serialize};

/// Target of a link node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkTarget {
    /// An absolute or relative URL
    Url {
        /// The URL
        url: String,
    },
    /// A page location produced by the location service
    Location {
        /// Path of the target page
        path: String,
        /// Optional anchor on that page
        anchor: Option<String>,
    },
    /// A reference the location service could not resolve
    Unresolved {
        /// The reference as written
        name: String,
    },
}

impl LinkTarget {
    /// Create a URL target.
    pub fn url(url: impl Into<String>) -> Self {
        LinkTarget::Url { url: url.into() }
    }

    /// Create a page location target.
    pub fn location(path: impl Into<String>, anchor: Option<String>) -> Self {
        LinkTarget::Location {
            path: path.into(),
            anchor,
        }
    }

    /// Create an unresolved target.
    pub fn unresolved(name: impl Into<String>) -> Self {
        LinkTarget::Unresolved { name: name.into() }
    }

    /// The raw (unescaped) href, or `None` when the target cannot be linked.
    pub fn href(&self) -> Option<String> {
        match self {
            LinkTarget::Url { url } if !url.is_empty() => Some(url.clone()),
            LinkTarget::Location { path, anchor } if !path.is_empty() => Some(match anchor {
                Some(anchor) => format!("{}#{}", path, anchor),
                None => path.clone(),
            }),
            _ => None,
        }
    }
}

/// A node of the content tree.
///
/// Leaf values hold raw semantic text. Escaping is the output builder's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentNode {
    /// Plain text
    Text {
        /// Raw text
        value: String,
    },
    /// Punctuation of a signature
    Symbol {
        /// Raw text
        value: String,
    },
    /// A language keyword
    Keyword {
        /// Raw text
        value: String,
    },
    /// A declared or referenced name
    Identifier {
        /// Raw text
        value: String,
        /// Anchor id attached to the identifier
        anchor: Option<String>,
    },
    /// A hyperlink around its children
    Link {
        /// Where the link points
        target: LinkTarget,
        /// Link content
        children: Vec<ContentNode>,
    },
    /// A paragraph
    Paragraph {
        /// Paragraph content
        children: Vec<ContentNode>,
    },
    /// A section header
    Header {
        /// Header level (1-6)
        level: u8,
        /// Header content
        children: Vec<ContentNode>,
    },
    /// Strong emphasis
    Strong {
        /// Content
        children: Vec<ContentNode>,
    },
    /// Emphasis
    Emphasis {
        /// Content
        children: Vec<ContentNode>,
    },
    /// Struck-through text
    Strikethrough {
        /// Content
        children: Vec<ContentNode>,
    },
    /// Inline code span
    Code {
        /// Content
        children: Vec<ContentNode>,
    },
    /// Bulleted list
    UnorderedList {
        /// List items
        children: Vec<ContentNode>,
    },
    /// Numbered list
    OrderedList {
        /// List items
        children: Vec<ContentNode>,
    },
    /// A list item
    ListItem {
        /// Item content
        children: Vec<ContentNode>,
    },
    /// A code block
    BlockCode {
        /// Language tag
        language: Option<String>,
        /// Code content
        children: Vec<ContentNode>,
    },
    /// A table with column headers
    Table {
        /// Column headers
        columns: Vec<String>,
        /// Table rows
        children: Vec<ContentNode>,
    },
    /// A table row
    TableRow {
        /// Row cells
        children: Vec<ContentNode>,
    },
    /// A table cell
    TableCell {
        /// Cell content
        children: Vec<ContentNode>,
    },
    /// A rendered declaration signature
    Signature {
        /// Signature tokens
        children: Vec<ContentNode>,
    },
    /// A named anchor
    Anchor {
        /// Anchor name
        name: String,
    },
    /// A line break that is always rendered
    LineBreak,
    /// A line break rendered only in long signatures
    SoftLineBreak,
    /// An indented line break rendered only in long signatures
    IndentedSoftLineBreak,
    /// A non-breaking space
    NonBreakingSpace,
    /// Separator between breadcrumb entries
    BreadcrumbSeparator,
}

impl ContentNode {
    /// Child nodes of a container, empty for leaves and markers.
    pub fn children(&self) -> &[ContentNode] {
        match self {
            ContentNode::Link { children, .. }
            | ContentNode::Paragraph { children }
            | ContentNode::Header { children, .. }
            | ContentNode::Strong { children }
            | ContentNode::Emphasis { children }
            | ContentNode::Strikethrough { children }
            | ContentNode::Code { children }
            | ContentNode::UnorderedList { children }
            | ContentNode::OrderedList { children }
            | ContentNode::ListItem { children }
            | ContentNode::BlockCode { children, .. }
            | ContentNode::Table { children, .. }
            | ContentNode::TableRow { children }
            | ContentNode::TableCell { children }
            | ContentNode::Signature { children } => children,
            _ => &[],
        }
    }

    /// Textual weight of this subtree: the sum of leaf value lengths in
    /// characters. Markup, link targets and markers count for nothing.
    pub fn text_length(&self) -> usize {
        match self {
            ContentNode::Text { value }
            | ContentNode::Symbol { value }
            | ContentNode::Keyword { value }
            | ContentNode::Identifier { value, .. } => value.chars().count(),
            other => other.children().iter().map(ContentNode::text_length).sum(),
        }
    }

    /// Concatenated leaf text of this subtree.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ContentNode::Text { value }
            | ContentNode::Symbol { value }
            | ContentNode::Keyword { value }
            | ContentNode::Identifier { value, .. } => out.push_str(value),
            other => other.children().iter().for_each(|c| c.collect_text(out)),
        }
    }
}

/// An ordered sequence of content nodes with compositional builders.
///
/// Leaf methods append and return `&mut Self` for chaining. Container
/// methods open a fresh block, hand it to the closure, and append the closed
/// container; whatever the closure returns is passed through so fallible
/// population can use `?`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentBlock {
    children: Vec<ContentNode>,
}

impl ContentBlock {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Child nodes in order.
    pub fn children(&self) -> &[ContentNode] {
        &self.children
    }

    /// Consume the block into its child nodes.
    pub fn into_children(self) -> Vec<ContentNode> {
        self.children
    }

    /// Check if the block has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Sum of leaf value lengths across the block.
    pub fn text_length(&self) -> usize {
        self.children.iter().map(ContentNode::text_length).sum()
    }

    /// Concatenated leaf text of the block.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(ContentNode::plain_text).collect()
    }

    /// Append a node.
    pub fn push(&mut self, node: ContentNode) -> &mut Self {
        self.children.push(node);
        self
    }

    /// Append plain text.
    pub fn text(&mut self, value: impl Into<String>) -> &mut Self {
        self.push(ContentNode::Text {
            value: value.into(),
        })
    }

    /// Append a symbol.
    pub fn symbol(&mut self, value: impl Into<String>) -> &mut Self {
        self.push(ContentNode::Symbol {
            value: value.into(),
        })
    }

    /// Append a keyword.
    pub fn keyword(&mut self, value: impl Into<String>) -> &mut Self {
        self.push(ContentNode::Keyword {
            value: value.into(),
        })
    }

    /// Append an identifier.
    pub fn identifier(&mut self, value: impl Into<String>) -> &mut Self {
        self.push(ContentNode::Identifier {
            value: value.into(),
            anchor: None,
        })
    }

    /// Append an identifier carrying an anchor id.
    pub fn identifier_with_anchor(
        &mut self,
        value: impl Into<String>,
        anchor: impl Into<String>,
    ) -> &mut Self {
        self.push(ContentNode::Identifier {
            value: value.into(),
            anchor: Some(anchor.into()),
        })
    }

    /// Append a named anchor.
    pub fn anchor(&mut self, name: impl Into<String>) -> &mut Self {
        self.push(ContentNode::Anchor { name: name.into() })
    }

    /// Append a hard line break.
    pub fn line_break(&mut self) -> &mut Self {
        self.push(ContentNode::LineBreak)
    }

    /// Append a soft line break.
    pub fn soft_line_break(&mut self) -> &mut Self {
        self.push(ContentNode::SoftLineBreak)
    }

    /// Append an indented soft line break.
    pub fn indented_soft_line_break(&mut self) -> &mut Self {
        self.push(ContentNode::IndentedSoftLineBreak)
    }

    /// Append a non-breaking space.
    pub fn non_breaking_space(&mut self) -> &mut Self {
        self.push(ContentNode::NonBreakingSpace)
    }

    /// Append a breadcrumb separator.
    pub fn breadcrumb_separator(&mut self) -> &mut Self {
        self.push(ContentNode::BreadcrumbSeparator)
    }

    fn container<R>(
        &mut self,
        body: impl FnOnce(&mut ContentBlock) -> R,
        close: impl FnOnce(Vec<ContentNode>) -> ContentNode,
    ) -> R {
        let mut inner = ContentBlock::new();
        let result = body(&mut inner);
        self.children.push(close(inner.children));
        result
    }

    /// Append a link populated by `body`.
    pub fn link<R>(&mut self, target: LinkTarget, body: impl FnOnce(&mut ContentBlock) -> R) -> R {
        self.container(body, |children| ContentNode::Link { target, children })
    }

    /// Append a paragraph populated by `body`.
    pub fn paragraph<R>(&mut self, body: impl FnOnce(&mut ContentBlock) -> R) -> R {
        self.container(body, |children| ContentNode::Paragraph { children })
    }

    /// Append a header populated by `body`. The level is clamped to 1-6.
    pub fn header<R>(&mut self, level: u8, body: impl FnOnce(&mut ContentBlock) -> R) -> R {
        let level = level.clamp(1, 6);
        self.container(body, |children| ContentNode::Header { level, children })
    }

    /// Append strong text populated by `body`.
    pub fn strong<R>(&mut self, body: impl FnOnce(&mut ContentBlock) -> R) -> R {
        self.container(body, |children| ContentNode::Strong { children })
    }

    /// Append emphasized text populated by `body`.
    pub fn emphasis<R>(&mut self, body: impl FnOnce(&mut ContentBlock) -> R) -> R {
        self.container(body, |children| ContentNode::Emphasis { children })
    }

    /// Append struck-through text populated by `body`.
    pub fn strikethrough<R>(&mut self, body: impl FnOnce(&mut ContentBlock) -> R) -> R {
        self.container(body, |children| ContentNode::Strikethrough { children })
    }

    /// Append an inline code span populated by `body`.
    pub fn code<R>(&mut self, body: impl FnOnce(&mut ContentBlock) -> R) -> R {
        self.container(body, |children| ContentNode::Code { children })
    }

    /// Append a bulleted list populated by `body`.
    pub fn unordered_list<R>(&mut self, body: impl FnOnce(&mut ContentBlock) -> R) -> R {
        self.container(body, |children| ContentNode::UnorderedList { children })
    }

    /// Append a numbered list populated by `body`.
    pub fn ordered_list<R>(&mut self, body: impl FnOnce(&mut ContentBlock) -> R) -> R {
        self.container(body, |children| ContentNode::OrderedList { children })
    }

    /// Append a list item populated by `body`.
    pub fn list_item<R>(&mut self, body: impl FnOnce(&mut ContentBlock) -> R) -> R {
        self.container(body, |children| ContentNode::ListItem { children })
    }

    /// Append a code block populated by `body`.
    pub fn block_code<R>(
        &mut self,
        language: Option<&str>,
        body: impl FnOnce(&mut ContentBlock) -> R,
    ) -> R {
        let language = language.filter(|l| !l.trim().is_empty()).map(str::to_string);
        self.container(body, |children| ContentNode::BlockCode { language, children })
    }

    /// Append a table with the given column headers, populated by `body`.
    pub fn table<R>(
        &mut self,
        columns: &[&str],
        body: impl FnOnce(&mut ContentBlock) -> R,
    ) -> R {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        self.container(body, |children| ContentNode::Table { columns, children })
    }

    /// Append a table row populated by `body`.
    pub fn table_row<R>(&mut self, body: impl FnOnce(&mut ContentBlock) -> R) -> R {
        self.container(body, |children| ContentNode::TableRow { children })
    }

    /// Append a table cell populated by `body`.
    pub fn table_cell<R>(&mut self, body: impl FnOnce(&mut ContentBlock) -> R) -> R {
        self.container(body, |children| ContentNode::TableCell { children })
    }

    /// Append a signature container populated by `body`.
    pub fn signature<R>(&mut self, body: impl FnOnce(&mut ContentBlock) -> R) -> R {
        self.container(body, |children| ContentNode::Signature { children })
    }
}

impl From<Vec<ContentNode>> for ContentBlock {
    fn from(children: Vec<ContentNode>) -> Self {
        Self { children }
    }
}
