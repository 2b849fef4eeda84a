//! Markdown rendering for template READMEs and other rich text.
//!
//! Parsing runs through pulldown-cmark with an explicit extension list (no
//! global plugin registration), producing a small document tree that the
//! [`Renderer`] maps to themed Iced widgets. Fenced code blocks are
//! highlighted with syntect by language token; tables map to themed rows.

use std::hash::{Hash, Hasher};

use iced::widget::text::Span;
use iced::widget::{Column, Row, container, rich_text, row, rule, span, text};
use iced::{Color, Element, Font, Length, Theme, font};

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::theme::ThemeColors;

/// Base text size for paragraphs and list items.
const TEXT_SIZE: f32 = 15.0;

/// Text size inside code blocks.
const CODE_SIZE: f32 = 13.0;

/// Markdown syntax extensions that can be enabled for a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    Tables,
    Strikethrough,
    TaskLists,
}

/// The GitHub-flavored subset the dashboard renders.
pub const GFM: &[Extension] = &[
    Extension::Tables,
    Extension::Strikethrough,
    Extension::TaskLists,
];

fn parser_options(extensions: &[Extension]) -> Options {
    let mut options = Options::empty();

    for extension in extensions {
        options.insert(match extension {
            Extension::Tables => Options::ENABLE_TABLES,
            Extension::Strikethrough => Options::ENABLE_STRIKETHROUGH,
            Extension::TaskLists => Options::ENABLE_TASKLISTS,
        });
    }

    options
}

/// A styled run of inline text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inline {
    pub text: String,
    pub emphasis: bool,
    pub strong: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub link: Option<String>,
}

/// A block-level element of the parsed document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    CodeBlock { language: Option<String>, code: String },
    List { ordered: bool, items: Vec<Vec<Block>> },
    BlockQuote(Vec<Block>),
    Table { header: Vec<Vec<Inline>>, rows: Vec<Vec<Vec<Inline>>> },
    Rule,
}

/// Derive the highlighting language token from a fence info string.
///
/// Accepts both bare tokens (`rust`) and class-style tokens
/// (`language-rust`); the result is lowercased. Returns `None` when the
/// fence carries no token.
pub fn detect_language(info: &str) -> Option<String> {
    let token = info.split_whitespace().next()?;
    let token = token.strip_prefix("language-").unwrap_or(token);

    if token.is_empty() {
        None
    } else {
        Some(token.to_ascii_lowercase())
    }
}

/// Parse a Markdown document with the given extensions.
pub fn parse_markdown(source: &str, extensions: &[Extension]) -> Vec<Block> {
    let mut parser = Parser::new_ext(source, parser_options(extensions));
    parse_blocks(&mut parser, None)
}

/// Parse Markdown in restricted inline mode.
///
/// Allowed constructs: paragraphs, emphasis, strong, links, preformatted
/// text, and code. Everything else is unwrapped - its children surface as
/// plain inline content. The result is a flat run of inlines; no block
/// wrapper is ever produced, so single-paragraph input renders inline.
pub fn parse_inline_markdown(source: &str) -> Vec<Inline> {
    let parser = Parser::new_ext(source, Options::empty());
    let mut collector = InlineCollector::default();
    let mut in_code_block = false;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(content) if in_code_block => collector.push(content.to_string(), true),
            Event::SoftBreak | Event::HardBreak => collector.push(" ".to_string(), false),
            other => collector.handle(other),
        }
    }

    collector.take()
}

/// Collects inline events into styled runs, tracking the active style stack.
#[derive(Default)]
struct InlineCollector {
    out: Vec<Inline>,
    emphasis: u32,
    strong: u32,
    strikethrough: u32,
    links: Vec<String>,
}

impl InlineCollector {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Emphasis) => self.emphasis += 1,
            Event::End(TagEnd::Emphasis) => self.emphasis = self.emphasis.saturating_sub(1),
            Event::Start(Tag::Strong) => self.strong += 1,
            Event::End(TagEnd::Strong) => self.strong = self.strong.saturating_sub(1),
            Event::Start(Tag::Strikethrough) => self.strikethrough += 1,
            Event::End(TagEnd::Strikethrough) => {
                self.strikethrough = self.strikethrough.saturating_sub(1);
            }
            Event::Start(Tag::Link { dest_url, .. }) => self.links.push(dest_url.to_string()),
            Event::End(TagEnd::Link) => {
                self.links.pop();
            }
            Event::Text(content) => self.push(content.to_string(), false),
            Event::Code(content) => self.push(content.to_string(), true),
            Event::SoftBreak => self.push(" ".to_string(), false),
            Event::HardBreak => self.push("\n".to_string(), false),
            // Unknown raw constructs render permissively as plain text
            Event::Html(content) | Event::InlineHtml(content) => {
                self.push(content.to_string(), false);
            }
            Event::TaskListMarker(checked) => {
                self.push(if checked { "[x] " } else { "[ ] " }.to_string(), false);
            }
            // Other start/end tags are unwrapped; their children still arrive
            _ => {}
        }
    }

    fn push(&mut self, content: String, code: bool) {
        if content.is_empty() {
            return;
        }

        self.out.push(Inline {
            text: content,
            emphasis: self.emphasis > 0,
            strong: self.strong > 0,
            strikethrough: self.strikethrough > 0,
            code,
            link: self.links.last().cloned(),
        });
    }

    fn take(&mut self) -> Vec<Inline> {
        std::mem::take(&mut self.out)
    }

    fn flush_into(&mut self, blocks: &mut Vec<Block>) {
        if !self.out.is_empty() {
            blocks.push(Block::Paragraph(self.take()));
        }
    }
}

/// Parse block-level events until the given end tag (or end of input).
///
/// Bare inline content (tight list items) accumulates into an implicit
/// paragraph that is flushed at the next block boundary.
fn parse_blocks<'e, I>(events: &mut I, until: Option<TagEnd>) -> Vec<Block>
where
    I: Iterator<Item = Event<'e>>,
{
    let mut blocks = Vec::new();
    let mut inline = InlineCollector::default();

    while let Some(event) = events.next() {
        match event {
            Event::End(end) if until.as_ref() == Some(&end) => break,
            Event::Start(Tag::Paragraph) => {
                inline.flush_into(&mut blocks);
                let content = parse_inlines(events, TagEnd::Paragraph);
                blocks.push(Block::Paragraph(content));
            }
            Event::Start(Tag::Heading { level, .. }) => {
                inline.flush_into(&mut blocks);
                let content = parse_inlines(events, TagEnd::Heading(level));
                blocks.push(Block::Heading {
                    level: heading_rank(level),
                    content,
                });
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                inline.flush_into(&mut blocks);
                let language = match &kind {
                    CodeBlockKind::Fenced(info) => detect_language(info),
                    CodeBlockKind::Indented => None,
                };
                blocks.push(Block::CodeBlock {
                    language,
                    code: collect_code(events),
                });
            }
            Event::Start(Tag::List(start)) => {
                inline.flush_into(&mut blocks);
                blocks.push(Block::List {
                    ordered: start.is_some(),
                    items: parse_list_items(events),
                });
            }
            Event::Start(Tag::BlockQuote(kind)) => {
                inline.flush_into(&mut blocks);
                let end = Tag::BlockQuote(kind).to_end();
                blocks.push(Block::BlockQuote(parse_blocks(events, Some(end))));
            }
            Event::Start(Tag::Table(_)) => {
                inline.flush_into(&mut blocks);
                blocks.push(parse_table(events));
            }
            Event::Rule => {
                inline.flush_into(&mut blocks);
                blocks.push(Block::Rule);
            }
            // Unknown containers are unwrapped; inline content inside them
            // accumulates through the collector
            other => inline.handle(other),
        }
    }

    inline.flush_into(&mut blocks);
    blocks
}

/// Parse inline events until the given end tag.
fn parse_inlines<'e, I>(events: &mut I, until: TagEnd) -> Vec<Inline>
where
    I: Iterator<Item = Event<'e>>,
{
    let mut collector = InlineCollector::default();

    for event in events.by_ref() {
        match event {
            Event::End(end) if end == until => break,
            other => collector.handle(other),
        }
    }

    collector.take()
}

/// Collect the text of a code block up to its end tag.
fn collect_code<'e, I>(events: &mut I) -> String
where
    I: Iterator<Item = Event<'e>>,
{
    let mut code = String::new();

    for event in events.by_ref() {
        match event {
            Event::Text(content) => code.push_str(&content),
            Event::End(TagEnd::CodeBlock) => break,
            _ => {}
        }
    }

    // The parser keeps the closing newline of the fence
    if code.ends_with('\n') {
        code.pop();
    }

    code
}

/// Parse the items of a list up to its end tag.
fn parse_list_items<'e, I>(events: &mut I) -> Vec<Vec<Block>>
where
    I: Iterator<Item = Event<'e>>,
{
    let mut items = Vec::new();

    while let Some(event) = events.next() {
        match event {
            Event::Start(Tag::Item) => items.push(parse_blocks(events, Some(TagEnd::Item))),
            Event::End(TagEnd::List(_)) => break,
            _ => {}
        }
    }

    items
}

/// Parse a table up to its end tag.
fn parse_table<'e, I>(events: &mut I) -> Block
where
    I: Iterator<Item = Event<'e>>,
{
    let mut header: Vec<Vec<Inline>> = Vec::new();
    let mut rows: Vec<Vec<Vec<Inline>>> = Vec::new();
    let mut current_row: Vec<Vec<Inline>> = Vec::new();

    while let Some(event) = events.next() {
        match event {
            Event::Start(Tag::TableCell) => {
                let cell = parse_blocks(events, Some(TagEnd::TableCell));
                current_row.push(flatten_inlines(cell));
            }
            Event::End(TagEnd::TableHead) => header = std::mem::take(&mut current_row),
            Event::End(TagEnd::TableRow) => rows.push(std::mem::take(&mut current_row)),
            Event::End(TagEnd::Table) => break,
            _ => {}
        }
    }

    Block::Table { header, rows }
}

/// Flatten nested blocks to a single inline run (table cells, headings).
fn flatten_inlines(blocks: Vec<Block>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::new();

    for block in blocks {
        match block {
            Block::Paragraph(mut inlines) | Block::Heading { content: mut inlines, .. } => {
                out.append(&mut inlines);
            }
            Block::CodeBlock { code, .. } => out.push(Inline {
                text: code,
                code: true,
                ..Inline::default()
            }),
            Block::List { items, .. } => {
                for item in items {
                    out.extend(flatten_inlines(item));
                }
            }
            Block::BlockQuote(inner) => out.extend(flatten_inlines(inner)),
            Block::Table { .. } | Block::Rule => {}
        }
    }

    out
}

fn heading_rank(level: pulldown_cmark::HeadingLevel) -> u8 {
    use pulldown_cmark::HeadingLevel::*;

    match level {
        H1 => 1,
        H2 => 2,
        H3 => 3,
        H4 => 4,
        H5 => 5,
        H6 => 6,
    }
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 26.0,
        2 => 22.0,
        3 => 19.0,
        4 => 17.0,
        _ => 16.0,
    }
}

/// A parsed document plus the content hash it was parsed from.
///
/// Re-parsing is keyed on the hash of (source, extensions): [`update`]
/// only does work when either changed. This is the change-detection
/// contract callers rely on instead of memoizing rendered output.
///
/// [`update`]: ParsedMarkdown::update
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMarkdown {
    hash: u64,
    blocks: Vec<Block>,
}

impl ParsedMarkdown {
    /// Parse a document.
    pub fn parse(source: &str, extensions: &[Extension]) -> Self {
        Self {
            hash: content_hash(source, extensions),
            blocks: parse_markdown(source, extensions),
        }
    }

    /// Re-parse only when the source or extensions changed.
    ///
    /// Returns whether a re-parse happened.
    pub fn update(&mut self, source: &str, extensions: &[Extension]) -> bool {
        let hash = content_hash(source, extensions);
        if hash == self.hash {
            return false;
        }

        self.hash = hash;
        self.blocks = parse_markdown(source, extensions);
        true
    }

    /// The parsed block tree.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

fn content_hash(source: &str, extensions: &[Extension]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    source.hash(&mut hasher);
    extensions.hash(&mut hasher);
    hasher.finish()
}

/// Colors used by the Markdown widgets, resolved from the theme per render.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownStyle {
    pub text: Color,
    pub muted: Color,
    pub link: Color,
    pub code_background: Color,
    pub code_text: Color,
    pub table_header: Color,
    pub row_alt: Color,
    pub border: Color,
    pub dark_code_theme: bool,
}

impl MarkdownStyle {
    /// Resolve the style from theme colors.
    pub fn from_theme(colors: &ThemeColors<'_>) -> Self {
        Self {
            text: colors.text(),
            muted: colors.text_muted(),
            link: colors.link(),
            code_background: colors.code_background(),
            code_text: colors.code_text(),
            table_header: colors.table_header(),
            row_alt: colors.row_background_alt(),
            border: colors.border_subtle(),
            dark_code_theme: colors.is_dark(),
        }
    }
}

/// Maps parsed documents to Iced widgets.
///
/// Owns the syntect syntax and theme sets plus the enabled extension list;
/// one instance lives in the application state and is threaded into every
/// render call.
pub struct Renderer {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
    extensions: Vec<Extension>,
}

impl Renderer {
    /// Create a renderer with the given extensions enabled.
    pub fn new(extensions: &[Extension]) -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
            extensions: extensions.to_vec(),
        }
    }

    /// The enabled extensions.
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// Parse a document with this renderer's extensions.
    pub fn parse(&self, source: &str) -> ParsedMarkdown {
        ParsedMarkdown::parse(source, &self.extensions)
    }

    /// Update a parsed document, re-parsing only on content change.
    pub fn update(&self, document: &mut ParsedMarkdown, source: &str) -> bool {
        document.update(source, &self.extensions)
    }

    /// Render a parsed document.
    ///
    /// `on_link` receives the destination of any activated link.
    pub fn view<'a, Message: Clone + 'a>(
        &'a self,
        document: &'a ParsedMarkdown,
        style: MarkdownStyle,
        on_link: fn(String) -> Message,
    ) -> Element<'a, Message> {
        let mut content = Column::new().spacing(12).width(Length::Fill);

        for block in document.blocks() {
            content = content.push(self.render_block(block, style, on_link));
        }

        content.into()
    }

    /// Render a restricted inline run (no block wrapping).
    pub fn view_inline<'a, Message: Clone + 'a>(
        &'a self,
        inlines: &'a [Inline],
        style: MarkdownStyle,
        on_link: fn(String) -> Message,
    ) -> Element<'a, Message> {
        render_inlines(inlines, TEXT_SIZE, style, on_link)
    }

    fn render_block<'a, Message: Clone + 'a>(
        &'a self,
        block: &'a Block,
        style: MarkdownStyle,
        on_link: fn(String) -> Message,
    ) -> Element<'a, Message> {
        match block {
            Block::Heading { level, content } => {
                render_inlines(content, heading_size(*level), style, on_link)
            }
            Block::Paragraph(content) => render_inlines(content, TEXT_SIZE, style, on_link),
            Block::CodeBlock { language, code } => {
                self.render_code_block(language.as_deref(), code, style)
            }
            Block::List { ordered, items } => self.render_list(*ordered, items, style, on_link),
            Block::BlockQuote(inner) => {
                let mut body = Column::new().spacing(8);
                for block in inner {
                    body = body.push(self.render_block(block, style, on_link));
                }

                container(body)
                    .padding(10)
                    .width(Length::Fill)
                    .style(move |_theme: &Theme| container::Style {
                        background: Some(iced::Background::Color(style.row_alt)),
                        border: iced::Border {
                            color: style.border,
                            width: 1.0,
                            radius: 4.0.into(),
                        },
                        ..Default::default()
                    })
                    .into()
            }
            Block::Table { header, rows } => self.render_table(header, rows, style, on_link),
            Block::Rule => rule::horizontal(1).into(),
        }
    }

    fn render_list<'a, Message: Clone + 'a>(
        &'a self,
        ordered: bool,
        items: &'a [Vec<Block>],
        style: MarkdownStyle,
        on_link: fn(String) -> Message,
    ) -> Element<'a, Message> {
        let mut list = Column::new().spacing(6);

        for (index, item) in items.iter().enumerate() {
            let marker = if ordered {
                format!("{}.", index + 1)
            } else {
                "\u{2022}".to_string()
            };

            let mut body = Column::new().spacing(6).width(Length::Fill);
            for block in item {
                body = body.push(self.render_block(block, style, on_link));
            }

            let marker_text = text(marker)
                .size(TEXT_SIZE)
                .style(move |_theme: &Theme| text::Style {
                    color: Some(style.muted),
                });

            list = list.push(row![marker_text, body].spacing(8));
        }

        list.into()
    }

    fn render_code_block<'a, Message: Clone + 'a>(
        &'a self,
        language: Option<&str>,
        code: &'a str,
        style: MarkdownStyle,
    ) -> Element<'a, Message> {
        let theme_name = if style.dark_code_theme {
            "base16-ocean.dark"
        } else {
            "InspiredGitHub"
        };

        let syntax = language.and_then(|token| self.syntaxes.find_syntax_by_token(token));

        let body: Element<'a, Message> = match (syntax, self.themes.themes.get(theme_name)) {
            (Some(syntax), Some(theme)) => {
                let mut highlighter = HighlightLines::new(syntax, theme);
                let mut lines = Column::new().spacing(2);

                for line in LinesWithEndings::from(code) {
                    let spans: Vec<Span<'static, std::convert::Infallible>> =
                        match highlighter.highlight_line(line, &self.syntaxes) {
                            Ok(regions) => regions
                                .into_iter()
                                .map(|(highlight, piece)| {
                                    let fg = highlight.foreground;
                                    span(piece.trim_end_matches('\n').to_string())
                                        .size(CODE_SIZE)
                                        .font(Font::MONOSPACE)
                                        .color(Color::from_rgba8(
                                            fg.r,
                                            fg.g,
                                            fg.b,
                                            fg.a as f32 / 255.0,
                                        ))
                                })
                                .collect(),
                            Err(_) => {
                                vec![
                                    span(line.trim_end_matches('\n').to_string())
                                        .size(CODE_SIZE)
                                        .font(Font::MONOSPACE)
                                        .color(style.code_text),
                                ]
                            }
                        };

                    lines = lines.push(rich_text(spans).on_link_click(iced::never));
                }

                lines.into()
            }
            // No syntax for the token (or none given): plain monospace
            _ => text(code)
                .size(CODE_SIZE)
                .font(Font::MONOSPACE)
                .style(move |_theme: &Theme| text::Style {
                    color: Some(style.code_text),
                })
                .into(),
        };

        container(body)
            .padding(12)
            .width(Length::Fill)
            .style(move |_theme: &Theme| container::Style {
                background: Some(iced::Background::Color(style.code_background)),
                border: iced::Border {
                    color: style.border,
                    width: 1.0,
                    radius: 6.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    fn render_table<'a, Message: Clone + 'a>(
        &'a self,
        header: &'a [Vec<Inline>],
        rows: &'a [Vec<Vec<Inline>>],
        style: MarkdownStyle,
        on_link: fn(String) -> Message,
    ) -> Element<'a, Message> {
        let mut table = Column::new().width(Length::Fill);

        if !header.is_empty() {
            let mut head = Row::new();
            for cell in header {
                head = head.push(
                    container(render_inlines(cell, TEXT_SIZE, style, on_link))
                        .padding(6)
                        .width(Length::FillPortion(1)),
                );
            }

            table = table.push(container(head).width(Length::Fill).style(
                move |_theme: &Theme| container::Style {
                    background: Some(iced::Background::Color(style.table_header)),
                    ..Default::default()
                },
            ));
        }

        for (index, cells) in rows.iter().enumerate() {
            let mut body_row = Row::new();
            for cell in cells {
                body_row = body_row.push(
                    container(render_inlines(cell, TEXT_SIZE, style, on_link))
                        .padding(6)
                        .width(Length::FillPortion(1)),
                );
            }

            let striped = index % 2 == 1;
            table = table.push(container(body_row).width(Length::Fill).style(
                move |_theme: &Theme| container::Style {
                    background: striped.then_some(iced::Background::Color(style.row_alt)),
                    ..Default::default()
                },
            ));
        }

        container(table)
            .width(Length::Fill)
            .style(move |_theme: &Theme| container::Style {
                border: iced::Border {
                    color: style.border,
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}

/// Render a run of inlines as rich text spans.
fn render_inlines<'a, Message: Clone + 'a>(
    inlines: &'a [Inline],
    size: f32,
    style: MarkdownStyle,
    on_link: fn(String) -> Message,
) -> Element<'a, Message> {
    let spans: Vec<Span<'static, String>> = inlines
        .iter()
        .map(|inline| {
            let mut styled = span(inline.text.clone()).size(size);

            let mut font = Font::default();
            if inline.strong {
                font.weight = font::Weight::Bold;
            }
            if inline.emphasis {
                font.style = font::Style::Italic;
            }
            if inline.code {
                font = Font::MONOSPACE;
                styled = styled
                    .background(style.code_background)
                    .color(style.code_text);
            }
            styled = styled.font(font);

            if inline.strikethrough {
                styled = styled.strikethrough(true);
            }

            if let Some(link) = &inline.link {
                styled = styled
                    .color(style.link)
                    .underline(true)
                    .link(link.clone());
            } else if !inline.code {
                styled = styled.color(style.text);
            }

            styled
        })
        .collect();

    rich_text(spans).on_link_click(on_link).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_mode_unwraps_paragraph() {
        let inlines = parse_inline_markdown("**bold** text");

        assert_eq!(inlines.len(), 2);
        assert_eq!(inlines[0].text, "bold");
        assert!(inlines[0].strong);
        assert_eq!(inlines[1].text, " text");
        assert!(!inlines[1].strong);
    }

    #[test]
    fn test_inline_mode_unwraps_disallowed_blocks() {
        let inlines = parse_inline_markdown("# Title");

        assert_eq!(inlines.len(), 1);
        assert_eq!(inlines[0].text, "Title");
    }

    #[test]
    fn test_inline_mode_keeps_links_and_code() {
        let inlines = parse_inline_markdown("see [docs](https://example.com) and `cargo`");

        let link = inlines.iter().find(|i| i.link.is_some()).unwrap();
        assert_eq!(link.text, "docs");
        assert_eq!(link.link.as_deref(), Some("https://example.com"));

        let code = inlines.iter().find(|i| i.code).unwrap();
        assert_eq!(code.text, "cargo");
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("rust"), Some("rust".to_string()));
        assert_eq!(detect_language("language-Go"), Some("go".to_string()));
        assert_eq!(detect_language("sh startline=3"), Some("sh".to_string()));
        assert_eq!(detect_language(""), None);
        assert_eq!(detect_language("language-"), None);
    }

    #[test]
    fn test_parse_heading_and_code_block() {
        let blocks = parse_markdown("# Hi\n\n```rust\nfn main() {}\n```", GFM);

        assert_eq!(blocks.len(), 2);
        match &blocks[0] {
            Block::Heading { level, content } => {
                assert_eq!(*level, 1);
                assert_eq!(content[0].text, "Hi");
            }
            other => panic!("expected heading, got {other:?}"),
        }
        match &blocks[1] {
            Block::CodeBlock { language, code } => {
                assert_eq!(language.as_deref(), Some("rust"));
                assert_eq!(code, "fn main() {}");
            }
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn test_tables_require_extension() {
        let source = "| a | b |\n| - | - |\n| 1 | 2 |";

        let with = parse_markdown(source, GFM);
        assert!(with.iter().any(|b| matches!(b, Block::Table { .. })));

        let without = parse_markdown(source, &[]);
        assert!(!without.iter().any(|b| matches!(b, Block::Table { .. })));
    }

    #[test]
    fn test_table_shape() {
        let blocks = parse_markdown("| a | b |\n| - | - |\n| 1 | 2 |\n| 3 | 4 |", GFM);

        match &blocks[0] {
            Block::Table { header, rows } => {
                assert_eq!(header.len(), 2);
                assert_eq!(header[0][0].text, "a");
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[1][1][0].text, "4");
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn test_list_items() {
        let blocks = parse_markdown("- one\n- two\n", GFM);

        match &blocks[0] {
            Block::List { ordered, items } => {
                assert!(!*ordered);
                assert_eq!(items.len(), 2);
                match &items[0][0] {
                    Block::Paragraph(inlines) => assert_eq!(inlines[0].text, "one"),
                    other => panic!("expected paragraph item, got {other:?}"),
                }
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_link_in_paragraph() {
        let blocks = parse_markdown("go [here](https://example.com) now", GFM);

        match &blocks[0] {
            Block::Paragraph(inlines) => {
                let link = inlines.iter().find(|i| i.link.is_some()).unwrap();
                assert_eq!(link.link.as_deref(), Some("https://example.com"));
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_update_reparses_only_on_change() {
        let mut document = ParsedMarkdown::parse("hello", GFM);

        assert!(!document.update("hello", GFM));
        assert!(document.update("changed", GFM));
        assert!(!document.update("changed", GFM));
        // Same source, different extensions: also a change
        assert!(document.update("changed", &[]));
    }

    #[test]
    fn test_strikethrough_with_extension() {
        let blocks = parse_markdown("~~gone~~", GFM);

        match &blocks[0] {
            Block::Paragraph(inlines) => assert!(inlines[0].strikethrough),
            other => panic!("expected paragraph, got {other:?}"),
        }
    }
}
