use std::collections::HashMap;

use archive_core::fence_indented_code;
use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Characters escaped wherever they appear in text.
const ESCAPED: &[char] = &['\\', '`', '*', '_', '[', ']', '#'];

const CODE_INDENT: &str = "    ";
const NESTED_INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    pub keep_links: bool,
    pub keep_images: bool,
    pub keep_emphasis: bool,
    pub escape_markdown: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            keep_links: true,
            keep_images: true,
            keep_emphasis: true,
            escape_markdown: true,
        }
    }
}

/// HTML to Markdown without line wrapping.
///
/// `pre` blocks come out as four-space-indented text, never as fences; the
/// fencing pass in [`convert_body`] turns those into fenced blocks.
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    options: MarkdownOptions,
    image_rewrites: HashMap<String, String>,
}

impl MarkdownConverter {
    pub fn new(options: MarkdownOptions) -> Self {
        Self {
            options,
            image_rewrites: HashMap::new(),
        }
    }

    /// Image `src` values found in this table are replaced by the mapped value.
    pub fn with_image_rewrites(mut self, rewrites: HashMap<String, String>) -> Self {
        self.image_rewrites = rewrites;
        self
    }

    pub fn convert(&self, html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        self.convert_element(fragment.root_element())
    }

    /// Convert the children of `element`.
    pub fn convert_element(&self, element: ElementRef<'_>) -> String {
        let mut writer = MarkdownWriter::default();
        self.visit_children(element, &mut writer);
        writer.finish()
    }

    fn visit_node(&self, node: NodeRef<'_, Node>, out: &mut MarkdownWriter) {
        match node.value() {
            Node::Text(text) => out.push_text(text, self.options.escape_markdown),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    self.visit_element(element, out);
                }
            }
            _ => {}
        }
    }

    fn visit_children(&self, element: ElementRef<'_>, out: &mut MarkdownWriter) {
        for child in element.children() {
            self.visit_node(child, out);
        }
    }

    fn visit_element(&self, element: ElementRef<'_>, out: &mut MarkdownWriter) {
        let tag = element.value().name().to_ascii_lowercase();
        match tag.as_str() {
            "a" => self.handle_anchor(element, out),
            "img" => self.handle_image(element, out),
            "br" => out.hard_break(),
            "hr" => out.push_block("* * *", Break::Paragraph),
            "em" | "i" | "cite" | "dfn" => self.handle_emphasis(element, out, "_"),
            "strong" | "b" => self.handle_emphasis(element, out, "**"),
            "code" | "tt" | "kbd" | "samp" => {
                if has_line_breaks(element) {
                    self.handle_pre(element, out);
                } else {
                    self.handle_inline_code(element, out);
                }
            }
            "pre" => self.handle_pre(element, out),
            "blockquote" => self.handle_blockquote(element, out),
            "ul" => self.handle_list(element, out, false),
            "ol" => self.handle_list(element, out, true),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = usize::from(tag.as_bytes()[1] - b'0');
                self.handle_heading(element, out, level);
            }
            "tr" => self.handle_table_row(element, out),
            "table" | "thead" | "tbody" | "tfoot" | "dt" | "dd" => {
                out.block(Break::Line);
                self.visit_children(element, out);
                out.block(Break::Line);
            }
            "p" | "div" | "section" | "article" | "header" | "footer" | "nav" | "aside"
            | "main" | "figure" | "figcaption" | "address" | "center" | "dl" | "li" => {
                out.block(Break::Paragraph);
                self.visit_children(element, out);
                out.block(Break::Paragraph);
            }
            "script" | "style" | "noscript" | "iframe" | "template" | "head" | "title" => {}
            _ => self.visit_children(element, out),
        }
    }

    fn render_children(&self, element: ElementRef<'_>) -> String {
        let mut writer = MarkdownWriter::default();
        self.visit_children(element, &mut writer);
        writer.finish()
    }

    fn handle_anchor(&self, element: ElementRef<'_>, out: &mut MarkdownWriter) {
        let inner = self.render_children(element);
        let href = element
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|href| !href.is_empty() && !href.starts_with("javascript:"));

        let rendered = match href {
            Some(href) if self.options.keep_links && !inner.is_empty() => {
                format!("[{inner}]({})", link_target(href))
            }
            _ => inner,
        };
        out.push_inline(&rendered, edge_spacing(element));
    }

    fn handle_image(&self, element: ElementRef<'_>, out: &mut MarkdownWriter) {
        if !self.options.keep_images {
            return;
        }
        let Some(src) = element.value().attr("src").map(str::trim) else {
            return;
        };
        if src.is_empty() {
            return;
        }
        let target = self
            .image_rewrites
            .get(src)
            .map(String::as_str)
            .unwrap_or(src);
        let alt = element
            .value()
            .attr("alt")
            .map(|alt| escape_text(&collapse_whitespace(alt)))
            .unwrap_or_default();
        out.push_inline(&format!("![{alt}]({})", link_target(target)), (false, false));
    }

    fn handle_emphasis(&self, element: ElementRef<'_>, out: &mut MarkdownWriter, marker: &str) {
        let inner = self.render_children(element);
        if inner.is_empty() {
            let (leading, trailing) = edge_spacing(element);
            if leading || trailing {
                out.soft_space();
            }
            return;
        }
        let rendered = if self.options.keep_emphasis {
            format!("{marker}{inner}{marker}")
        } else {
            inner
        };
        out.push_inline(&rendered, edge_spacing(element));
    }

    fn handle_inline_code(&self, element: ElementRef<'_>, out: &mut MarkdownWriter) {
        let text = collapse_whitespace(&element.text().collect::<String>());
        if text.is_empty() {
            return;
        }
        let rendered = if text.contains('`') {
            format!("`` {text} ``")
        } else {
            format!("`{text}`")
        };
        out.push_inline(&rendered, edge_spacing(element));
    }

    fn handle_pre(&self, element: ElementRef<'_>, out: &mut MarkdownWriter) {
        let mut raw = String::new();
        collect_preformatted(*element, &mut raw);
        let block = indent_code(&raw);
        if !block.is_empty() {
            out.push_block(&block, Break::Paragraph);
        }
    }

    fn handle_blockquote(&self, element: ElementRef<'_>, out: &mut MarkdownWriter) {
        let inner = self.render_children(element);
        if inner.is_empty() {
            return;
        }
        let quoted = inner
            .lines()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        out.push_block(&quoted, Break::Paragraph);
    }

    fn handle_list(&self, element: ElementRef<'_>, out: &mut MarkdownWriter, ordered: bool) {
        let mut number = element
            .value()
            .attr("start")
            .and_then(|start| start.trim().parse::<u32>().ok())
            .unwrap_or(1);

        let mut items: Vec<String> = Vec::new();
        for child in element.children().filter_map(ElementRef::wrap) {
            if !child.value().name().eq_ignore_ascii_case("li") {
                // Lists nested without an enclosing <li> hang off the previous item.
                let nested = self.convert_element_outer(child);
                if nested.is_empty() {
                    continue;
                }
                let nested = prefix_item(NESTED_INDENT, &nested);
                match items.last_mut() {
                    Some(last) => {
                        last.push('\n');
                        last.push_str(&nested);
                    }
                    None => items.push(nested),
                }
                continue;
            }

            let item_md = self.render_children(child);
            if item_md.is_empty() {
                continue;
            }
            let marker = if ordered {
                let marker = format!("{number}. ");
                number += 1;
                marker
            } else {
                "* ".to_string()
            };
            items.push(prefix_item(&marker, &item_md));
        }

        if !items.is_empty() {
            out.push_block(&items.join("\n"), Break::Paragraph);
        }
    }

    fn convert_element_outer(&self, element: ElementRef<'_>) -> String {
        let mut writer = MarkdownWriter::default();
        self.visit_element(element, &mut writer);
        writer.finish()
    }

    fn handle_heading(&self, element: ElementRef<'_>, out: &mut MarkdownWriter, level: usize) {
        let inner = self.render_children(element);
        if inner.is_empty() {
            return;
        }
        let line = format!("{} {}", "#".repeat(level), inner.replace('\n', " "));
        out.push_block(&line, Break::Paragraph);
    }

    fn handle_table_row(&self, element: ElementRef<'_>, out: &mut MarkdownWriter) {
        let cells: Vec<String> = element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|cell| matches!(cell.value().name(), "td" | "th"))
            .map(|cell| self.render_children(cell).replace('\n', " "))
            .collect();
        if cells.iter().any(|cell| !cell.is_empty()) {
            out.push_block(&cells.join(" | "), Break::Line);
        }
    }
}

/// Convert a post body: Markdown conversion with image rewrites, then
/// fencing of indented code.
pub fn convert_body(html: &str, image_rewrites: &HashMap<String, String>) -> String {
    let markdown = MarkdownConverter::default()
        .with_image_rewrites(image_rewrites.clone())
        .convert(html);
    fence_indented_code(&markdown)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
enum Break {
    #[default]
    None,
    Line,
    Paragraph,
}

/// Accumulates Markdown while collapsing HTML whitespace.
#[derive(Debug, Default)]
struct MarkdownWriter {
    out: String,
    pending: Break,
    space: bool,
}

impl MarkdownWriter {
    fn at_line_start(&self) -> bool {
        self.pending != Break::None || self.out.is_empty() || self.out.ends_with('\n')
    }

    fn block(&mut self, brk: Break) {
        self.pending = self.pending.max(brk);
        self.space = false;
    }

    fn soft_space(&mut self) {
        if !self.at_line_start() {
            self.space = true;
        }
    }

    fn flush_break(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if pending == Break::None || self.out.is_empty() {
            return;
        }
        self.trim_trailing_spaces();
        let wanted = if pending == Break::Paragraph { 2 } else { 1 };
        let have = self.out.len() - self.out.trim_end_matches('\n').len();
        for _ in have..wanted {
            self.out.push('\n');
        }
        self.space = false;
    }

    /// Flush any pending separator before content is appended.
    fn begin_content(&mut self) {
        self.flush_break();
        if self.space && !self.at_line_start() {
            self.out.push(' ');
        }
        self.space = false;
    }

    fn trim_trailing_spaces(&mut self) {
        let keep = self.out.trim_end_matches([' ', '\t']).len();
        self.out.truncate(keep);
    }

    fn hard_break(&mut self) {
        self.flush_break();
        self.space = false;
        if self.out.is_empty() || self.out.ends_with("\n\n") {
            return;
        }
        self.trim_trailing_spaces();
        self.out.push('\n');
    }

    fn push_text(&mut self, text: &str, escape: bool) {
        let chars: Vec<char> = text.chars().collect();
        let mut escaped_dot = None;

        for (i, &ch) in chars.iter().enumerate() {
            if ch == '\u{a0}' {
                self.begin_content();
                self.out.push(' ');
                continue;
            }
            if ch.is_whitespace() {
                self.soft_space();
                continue;
            }

            self.begin_content();
            if escape {
                if self.out.is_empty() || self.out.ends_with('\n') {
                    match ch {
                        '>' => self.out.push('\\'),
                        '+' | '-' if chars.get(i + 1).is_none_or(|c| c.is_whitespace()) => {
                            self.out.push('\\')
                        }
                        _ if ch.is_ascii_digit() => escaped_dot = numbered_dot(&chars, i),
                        _ => {}
                    }
                }
                if ESCAPED.contains(&ch) || escaped_dot == Some(i) {
                    self.out.push('\\');
                }
            }
            self.out.push(ch);
        }
    }

    /// Append a pre-rendered inline fragment, keeping the whitespace that
    /// surrounded it in the source.
    fn push_inline(&mut self, rendered: &str, (leading, trailing): (bool, bool)) {
        if leading {
            self.soft_space();
        }
        if !rendered.is_empty() {
            self.begin_content();
            self.out.push_str(rendered);
        }
        if trailing {
            self.soft_space();
        }
    }

    fn push_block(&mut self, rendered: &str, brk: Break) {
        self.block(brk);
        self.flush_break();
        self.out.push_str(rendered);
        self.block(brk);
    }

    fn finish(self) -> String {
        self.out.trim_end().trim_start_matches('\n').to_string()
    }
}

/// Index of the `.` in a line-leading `12.` that would start an ordered list.
fn numbered_dot(chars: &[char], start: usize) -> Option<usize> {
    let digits = chars[start..]
        .iter()
        .take_while(|c| c.is_ascii_digit())
        .count();
    let dot = start + digits;
    (chars.get(dot) == Some(&'.')).then_some(dot)
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if ESCAPED.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn link_target(href: &str) -> String {
    href.replace(' ', "%20")
        .replace('(', "%28")
        .replace(')', "%29")
}

/// Whether the source text of `element` starts / ends with whitespace.
fn edge_spacing(element: ElementRef<'_>) -> (bool, bool) {
    let text: String = element.text().collect();
    (
        text.starts_with(char::is_whitespace),
        text.ends_with(char::is_whitespace),
    )
}

fn has_line_breaks(element: ElementRef<'_>) -> bool {
    element.descendants().any(|node| match node.value() {
        Node::Element(el) => el.name().eq_ignore_ascii_case("br"),
        _ => false,
    })
}

fn collect_preformatted(node: NodeRef<'_, Node>, raw: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => raw.push_str(text),
            Node::Element(el) if el.name().eq_ignore_ascii_case("br") => raw.push('\n'),
            Node::Element(_) => collect_preformatted(child, raw),
            _ => {}
        }
    }
}

/// Dedent preformatted text and indent every non-blank line by four spaces.
fn indent_code(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n").replace('\u{a0}', " ");
    let lines: Vec<&str> = normalized.lines().map(str::trim_end).collect();

    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return String::new();
    };
    let lines = &lines[first..=last];

    let common_indent = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{CODE_INDENT}{}", &line[common_indent..])
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn prefix_item(marker: &str, item: &str) -> String {
    let mut lines = item.lines();
    let mut rendered = format!("{marker}{}", lines.next().unwrap_or_default());
    for line in lines {
        rendered.push('\n');
        if !line.is_empty() {
            rendered.push_str(NESTED_INDENT);
            rendered.push_str(line);
        }
    }
    rendered
}
