//! GitHub-flavored Markdown output.

use super::builder::{Container, OutputBuilder, PageInfo};
use super::escape::{escape_html, escape_markdown, escape_url, longest_backtick_run};
use super::RenderOptions;

/// Markdown hard line break.
const HARD_BREAK: &str = "  \n";

/// Indentation marker for continuation lines of long signatures.
const INDENT: &str = "&nbsp;&nbsp;&nbsp;&nbsp;";

/// Open container whose output is assembled when it closes.
#[derive(Debug)]
enum FrameKind {
    Paragraph,
    Header(u8),
    Strong,
    Emphasis,
    Strikethrough,
    Code,
    BlockCode(Option<String>),
    List { ordered: bool, next: usize },
    ListItem,
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    TableRow { cells: Vec<String> },
    TableCell,
    Link(String),
    Signature,
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    buf: String,
}

/// GitHub-flavored Markdown output builder.
///
/// Inline containers are buffered per frame so that their content can be
/// post-processed (code fences sized to the content, table cells folded onto
/// one line, list item continuation lines indented).
pub struct MarkdownBuilder {
    out: String,
    frames: Vec<Frame>,
    options: RenderOptions,
}

impl MarkdownBuilder {
    /// Create a Markdown builder.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            out: String::new(),
            frames: Vec::new(),
            options,
        }
    }

    /// Buffer of the innermost open container.
    fn buf(&mut self) -> &mut String {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.buf,
            None => &mut self.out,
        }
    }

    /// Write pre-formatted text to the current buffer.
    pub(crate) fn write_raw(&mut self, text: &str) {
        self.buf().push_str(text);
    }

    /// Check if the builder is inside a code span or code block.
    pub(crate) fn in_code(&self) -> bool {
        self.frames
            .iter()
            .any(|f| matches!(f.kind, FrameKind::Code | FrameKind::BlockCode(_)))
    }

    fn in_table_cell(&self) -> bool {
        self.frames
            .iter()
            .any(|f| matches!(f.kind, FrameKind::TableCell))
    }

    /// Make sure the current buffer ends at a block boundary.
    pub(crate) fn ensure_block_start(&mut self) {
        ensure_block_start(self.buf());
    }

    fn append_escaped(&mut self, text: &str) {
        if self.in_code() {
            self.write_raw(text);
        } else {
            let escaped = escape_markdown(text);
            self.write_raw(&escaped);
        }
    }

    fn push_frame(&mut self, kind: FrameKind) {
        self.frames.push(Frame {
            kind,
            buf: String::new(),
        });
    }

    fn close_frame(&mut self, frame: Frame) {
        let Frame { kind, buf } = frame;
        match kind {
            FrameKind::Paragraph => {
                let content = buf.trim();
                if !content.is_empty() {
                    let content = content.to_string();
                    self.ensure_block_start();
                    self.write_raw(&content);
                    self.write_raw("\n\n");
                }
            }
            FrameKind::Header(level) => {
                let content = fold_lines(&buf);
                self.ensure_block_start();
                self.write_raw(&format!("{} {}\n\n", "#".repeat(level as usize), content));
            }
            FrameKind::Strong => self.write_delimited("**", &buf),
            FrameKind::Emphasis => self.write_delimited("*", &buf),
            FrameKind::Strikethrough => self.write_delimited("~~", &buf),
            FrameKind::Code => {
                if buf.is_empty() {
                    return;
                }
                // GFM splits table cells on `|` even inside code spans.
                let buf = if self.in_table_cell() {
                    buf.replace('|', "\\|")
                } else {
                    buf
                };
                let fence = "`".repeat(longest_backtick_run(&buf) + 1);
                let padding = if buf.starts_with('`') || buf.ends_with('`') {
                    " "
                } else {
                    ""
                };
                self.write_raw(&format!("{0}{1}{2}{1}{0}", fence, padding, buf));
            }
            FrameKind::BlockCode(language) => {
                let fence = "`".repeat((longest_backtick_run(&buf) + 1).max(3));
                self.ensure_block_start();
                self.write_raw(&format!(
                    "{}{}\n{}\n{}\n\n",
                    fence,
                    language.unwrap_or_default(),
                    buf.trim_end_matches('\n'),
                    fence
                ));
            }
            FrameKind::List { .. } => {
                if buf.is_empty() {
                    return;
                }
                self.ensure_block_start();
                self.write_raw(buf.trim_end_matches('\n'));
                self.write_raw("\n\n");
            }
            FrameKind::ListItem => {
                let marker = match self.frames.last_mut() {
                    Some(Frame {
                        kind: FrameKind::List { ordered: true, next },
                        ..
                    }) => {
                        let marker = format!("{}.", next);
                        *next += 1;
                        marker
                    }
                    _ => self.options.list_marker.to_string(),
                };
                let item = indent_list_item(&marker, buf.trim());
                self.write_raw(&item);
                self.write_raw("\n");
            }
            FrameKind::Table { columns, rows } => {
                if !buf.trim().is_empty() {
                    log::warn!("Dropping content outside of table rows: {:?}", buf.trim());
                }
                let table = format_table(&columns, &rows);
                if !table.is_empty() {
                    self.ensure_block_start();
                    self.write_raw(&table);
                    self.write_raw("\n");
                }
            }
            FrameKind::TableRow { cells } => match self.frames.last_mut() {
                Some(Frame {
                    kind: FrameKind::Table { rows, .. },
                    ..
                }) => rows.push(cells),
                _ => {
                    log::warn!("Table row outside of a table");
                    let line = cells.join(" | ");
                    self.write_raw(&line);
                    self.write_raw("\n");
                }
            },
            FrameKind::TableCell => {
                let content = fold_lines(&buf.replace(HARD_BREAK, "<br/>"));
                match self.frames.last_mut() {
                    Some(Frame {
                        kind: FrameKind::TableRow { cells },
                        ..
                    }) => cells.push(content),
                    _ => {
                        log::warn!("Table cell outside of a table row");
                        self.write_raw(&content);
                    }
                }
            }
            FrameKind::Link(href) => {
                let text = if buf.is_empty() {
                    escape_markdown(&href)
                } else {
                    buf
                };
                self.write_raw(&format!("[{}]({})", text, escape_url(&href)));
            }
            FrameKind::Signature => {
                let content = buf.trim();
                if !content.is_empty() {
                    let content = content.to_string();
                    self.ensure_block_start();
                    self.write_raw(&content);
                    self.write_raw("\n\n");
                }
            }
        }
    }

    /// Wrap `content` in `delimiter`, keeping edge whitespace outside so the
    /// delimiters stay flanking.
    fn write_delimited(&mut self, delimiter: &str, content: &str) {
        let inner = content.trim();
        if inner.is_empty() {
            self.write_raw(content);
            return;
        }
        let start = content.len() - content.trim_start().len();
        let end = start + inner.len();
        self.write_raw(&format!(
            "{0}{1}{2}{1}{3}",
            &content[..start],
            delimiter,
            inner,
            &content[end..]
        ));
    }
}

impl OutputBuilder for MarkdownBuilder {
    fn append_text(&mut self, text: &str) {
        self.append_escaped(text);
    }

    fn append_symbol(&mut self, text: &str) {
        self.append_escaped(text);
    }

    fn append_keyword(&mut self, text: &str) {
        self.append_escaped(text);
    }

    fn append_identifier(&mut self, text: &str, anchor: Option<&str>) {
        if let (Some(anchor), false) = (anchor, self.in_code()) {
            self.append_anchor(anchor);
        }
        self.append_escaped(text);
    }

    fn append_soft_line_break(&mut self, hard: bool) {
        if hard {
            self.append_line_break();
        }
    }

    fn append_indented_soft_line_break(&mut self, hard: bool) {
        if hard {
            self.append_line_break();
            if !self.in_code() {
                self.write_raw(INDENT);
            }
        }
    }

    fn append_line_break(&mut self) {
        if self.in_code() {
            self.write_raw("\n");
        } else {
            self.write_raw(HARD_BREAK);
        }
    }

    fn append_anchor(&mut self, name: &str) {
        let anchor = format!("<a name=\"{}\"></a>", escape_html(name));
        self.write_raw(&anchor);
    }

    fn append_non_breaking_space(&mut self) {
        if self.in_code() {
            self.write_raw(" ");
        } else {
            self.write_raw("&nbsp;");
        }
    }

    fn append_breadcrumb_separator(&mut self) {
        self.write_raw(" / ");
    }

    fn open(&mut self, container: Container<'_>) {
        let kind = match container {
            Container::Paragraph => FrameKind::Paragraph,
            Container::Header(level) => FrameKind::Header(level),
            Container::Strong => FrameKind::Strong,
            Container::Emphasis => FrameKind::Emphasis,
            Container::Strikethrough => FrameKind::Strikethrough,
            Container::Code => FrameKind::Code,
            Container::BlockCode(language) => FrameKind::BlockCode(language.map(str::to_string)),
            Container::UnorderedList => FrameKind::List {
                ordered: false,
                next: 1,
            },
            Container::OrderedList => FrameKind::List {
                ordered: true,
                next: 1,
            },
            Container::ListItem => FrameKind::ListItem,
            Container::Table(columns) => FrameKind::Table {
                columns: columns.to_vec(),
                rows: Vec::new(),
            },
            Container::TableRow => FrameKind::TableRow { cells: Vec::new() },
            Container::TableCell => FrameKind::TableCell,
            Container::Link(href) => FrameKind::Link(href.to_string()),
            Container::Signature => FrameKind::Signature,
        };
        self.push_frame(kind);
    }

    fn close(&mut self, _container: Container<'_>) {
        match self.frames.pop() {
            Some(frame) => self.close_frame(frame),
            None => log::warn!("Unbalanced container close ignored"),
        }
    }

    fn begin_page(&mut self, _page: &PageInfo<'_>) {}

    fn end_page(&mut self, _page: &PageInfo<'_>) {
        while let Some(frame) = self.frames.pop() {
            log::warn!("Closing unterminated {:?} at end of page", frame.kind);
            self.close_frame(frame);
        }
        let trimmed = self.out.trim_end().len();
        self.out.truncate(trimmed);
        if !self.out.is_empty() {
            self.out.push('\n');
        }
    }

    fn take_output(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

fn ensure_block_start(buf: &mut String) {
    if buf.is_empty() || buf.ends_with("\n\n") {
        return;
    }
    if buf.ends_with('\n') {
        buf.push('\n');
    } else {
        buf.push_str("\n\n");
    }
}

/// Fold multi-line content onto a single line.
fn fold_lines(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Prefix the first line with the list marker and indent the rest under it.
fn indent_list_item(marker: &str, content: &str) -> String {
    let indent = " ".repeat(marker.len() + 1);
    let mut item = String::new();
    for (i, line) in content.lines().enumerate() {
        if i == 0 {
            item.push_str(marker);
            item.push(' ');
        } else {
            item.push('\n');
            if !line.trim().is_empty() {
                item.push_str(&indent);
            }
        }
        item.push_str(line);
    }
    if item.is_empty() {
        item.push_str(marker);
    }
    item
}

/// Pipe-delimited table; empty when there is neither a column nor a row.
fn format_table(columns: &[String], rows: &[Vec<String>]) -> String {
    let width = rows
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(columns.len());
    if width == 0 {
        return String::new();
    }
    if rows.iter().any(|r| r.len() > columns.len()) && !columns.is_empty() {
        log::warn!("Table row has more cells than the {} columns", columns.len());
    }

    let mut table = String::new();
    let header: Vec<String> = (0..width)
        .map(|i| columns.get(i).map(|c| escape_markdown(c)).unwrap_or_default())
        .collect();
    push_row(&mut table, &header);
    table.push('|');
    for _ in 0..width {
        table.push_str(" --- |");
    }
    table.push('\n');
    for row in rows {
        let cells: Vec<String> = (0..width)
            .map(|i| row.get(i).cloned().unwrap_or_default())
            .collect();
        push_row(&mut table, &cells);
    }
    table
}

fn push_row(table: &mut String, cells: &[String]) {
    table.push('|');
    for cell in cells {
        table.push_str(&format!(" {} |", cell));
    }
    table.push('\n');
}
