//! Plain Text PDF Renderer - flattening Markdown-to-PDF implementation.
//!
//! Renders Markdown to HTML with pulldown-cmark, strips every tag, and lays
//! the remaining plain text out with a single builtin Helvetica font:
//! left-aligned, fixed size, page margins, paginated. Markdown structure
//! (headings, lists, code blocks) is flattened to text; that fidelity loss is
//! part of this renderer's contract, not a bug.

use async_trait::async_trait;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfPageIndex,
};
use pulldown_cmark::{html, Options, Parser};

use crate::ports::{PdfRenderer, RenderError};

/// A4 page, portrait.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

/// Page margin on all four sides.
const MARGIN_MM: f32 = 18.0;

const FONT_SIZE_PT: f32 = 12.0;
const LINE_HEIGHT_PT: f32 = 14.0;
const LINE_HEIGHT_MM: f32 = LINE_HEIGHT_PT * 25.4 / 72.0;

/// Conservative wrap width for Helvetica 12pt inside the margins.
const MAX_CHARS_PER_LINE: usize = 90;

/// Flattening Markdown renderer over printpdf's builtin Helvetica.
///
/// Builtin fonts need no font files on disk, so the renderer works on
/// restricted deployments; the tradeoff is WinAnsi-only text, handled by
/// substituting unsupported characters.
#[derive(Debug, Clone, Default)]
pub struct PlainTextPdfRenderer;

impl PlainTextPdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PdfRenderer for PlainTextPdfRenderer {
    async fn render(&self, markdown: &str) -> Result<Vec<u8>, RenderError> {
        let text = markdown_to_plain_text(markdown);
        let lines = layout_lines(&text);

        let (doc, first_page, first_layer) = PdfDocument::new(
            "Documento Gerado",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "text",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::layout(e.to_string()))?;

        let lines_per_page = ((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM) as usize;

        for (page_number, chunk) in lines.chunks(lines_per_page.max(1)).enumerate() {
            let (page, layer) = if page_number == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text")
            };

            write_page(&doc, page, layer, &font, chunk);
        }

        doc.save_to_bytes()
            .map_err(|e| RenderError::encode(e.to_string()))
    }
}

/// Writes one page worth of lines, top-down from the upper margin.
fn write_page(
    doc: &PdfDocumentReference,
    page: PdfPageIndex,
    layer: PdfLayerIndex,
    font: &IndirectFontRef,
    lines: &[String],
) {
    let layer = doc.get_page(page).get_layer(layer);

    layer.begin_text_section();
    layer.set_font(font, FONT_SIZE_PT);
    layer.set_line_height(LINE_HEIGHT_PT);
    layer.set_text_cursor(Mm(MARGIN_MM), Mm(PAGE_HEIGHT_MM - MARGIN_MM));

    for line in lines {
        layer.write_text(line.clone(), font);
        layer.add_line_break();
    }

    layer.end_text_section();
}

/// Renders Markdown to HTML and strips every tag, leaving plain text.
fn markdown_to_plain_text(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(markdown, options);
    let mut html_body = String::new();
    html::push_html(&mut html_body, parser);

    decode_entities(&strip_tags(&html_body))
}

/// Removes `<...>` tag spans from an HTML fragment.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }

    text
}

/// Decodes the entities pulldown-cmark's HTML writer emits.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Splits the text into page lines: word-wrapped to the column width, with
/// characters outside the builtin font's WinAnsi range substituted.
fn layout_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text
        .lines()
        .map(sanitize_line)
        .flat_map(|line| wrap_line(&line, MAX_CHARS_PER_LINE))
        .collect();

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Replaces characters the builtin Helvetica cannot encode.
fn sanitize_line(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            '\t' => ' ',
            c if (' '..='~').contains(&c) => c,
            c if ('\u{00A0}'..='\u{00FF}').contains(&c) => c,
            _ => '?',
        })
        .collect()
}

/// Word-wraps one line to `width` characters, hard-splitting oversized words.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        return vec![line.trim_end().to_string()];
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len > width {
            wrapped.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len > width {
            // Hard-split a word that cannot fit on any line.
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(width) {
                if current_len > 0 {
                    wrapped.push(std::mem::take(&mut current));
                }
                current = piece.iter().collect();
                current_len = current.chars().count();
            }
            continue;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        wrapped.push(current);
    }

    if wrapped.is_empty() {
        wrapped.push(String::new());
    }

    wrapped
}
