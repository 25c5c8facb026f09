//! Teleprompter view: the live script laid out in short, widely spaced lines
//! and shown one page at a time.

use colored::Colorize;

/// Wraps `script` to `width` characters.
///
/// Every non-blank source line becomes a paragraph; paragraphs are separated
/// by one empty line. Words are kept whole where they fit, and text without
/// spaces (CJK) is broken by character.
pub fn layout(script: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in script.lines().map(str::trim).filter(|p| !p.is_empty()) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        wrap_paragraph(paragraph, width, &mut lines);
    }
    lines
}

fn wrap_paragraph(paragraph: &str, width: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut len = 0;
    for word in paragraph.split_whitespace() {
        let word_len = word.chars().count();
        if len > 0 && len + 1 + word_len > width {
            out.push(std::mem::take(&mut current));
            len = 0;
        }
        if len > 0 {
            current.push(' ');
            len += 1;
        }
        for ch in word.chars() {
            if len == width {
                out.push(std::mem::take(&mut current));
                len = 0;
            }
            current.push(ch);
            len += 1;
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
}

/// Splits laid-out lines into pages of at most `page_lines` lines.
pub fn pages(lines: &[String], page_lines: usize) -> Vec<&[String]> {
    lines.chunks(page_lines.max(1)).collect()
}

/// Styles one page for the terminal.
pub fn render_page(page: &[String], title: &str, number: usize, total: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format!("📺 {title}  [{number}/{total}]").bright_black()));
    for line in page {
        out.push_str(&format!("   {}\n", line.bright_white().bold()));
    }
    out
}
