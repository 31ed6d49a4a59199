//! Markdown rendering for assistant replies.
//!
//! Rendering is an external concern: the session only needs "text in,
//! markup out, maybe an error".  Two renderers ship with the crate, one
//! producing HTML and one producing ANSI-styled terminal text.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::error::{Error, Result};

const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_ITALIC: &str = "\x1b[3m";
const ANSI_UNDERLINE: &str = "\x1b[4m";
const ANSI_STRIKE: &str = "\x1b[9m";
const ANSI_CYAN: &str = "\x1b[36m";
const ANSI_RESET: &str = "\x1b[0m";

/// Converts assistant text into displayable markup.
pub trait MarkdownRenderer: Send + Sync {
    /// Render `text`.  Callers fall back to plain text on error.
    fn render(&self, text: &str) -> Result<String>;
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// CommonMark to HTML.  Raw HTML in the input is escaped, not passed through.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlMarkdown;

impl MarkdownRenderer for HtmlMarkdown {
    fn render(&self, text: &str) -> Result<String> {
        let parser = Parser::new_ext(text, options()).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
        let mut output = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut output, parser);
        Ok(output)
    }
}

/// CommonMark to terminal text with optional ANSI styling.
#[derive(Debug, Clone, Copy)]
pub struct AnsiMarkdown {
    use_color: bool,
}

impl AnsiMarkdown {
    /// Creates a renderer; `use_color` controls escape codes.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn style(&self, out: &mut String, code: &str) {
        if self.use_color {
            out.push_str(code);
        }
    }
}

impl Default for AnsiMarkdown {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MarkdownRenderer for AnsiMarkdown {
    fn render(&self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        // One counter per open list; `None` for bullet lists.
        let mut lists: Vec<Option<u64>> = Vec::new();
        for event in Parser::new_ext(text, options()) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    self.style(&mut out, ANSI_BOLD);
                    if level == HeadingLevel::H1 {
                        self.style(&mut out, ANSI_UNDERLINE);
                    }
                }
                Event::End(TagEnd::Heading(_)) => {
                    self.style(&mut out, ANSI_RESET);
                    out.push_str("\n\n");
                }
                Event::End(TagEnd::Paragraph) => {
                    out.push_str(if lists.is_empty() { "\n\n" } else { "\n" });
                }
                Event::Start(Tag::Strong) => self.style(&mut out, ANSI_BOLD),
                Event::Start(Tag::Emphasis) => self.style(&mut out, ANSI_ITALIC),
                Event::Start(Tag::Strikethrough) => self.style(&mut out, ANSI_STRIKE),
                Event::End(TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough) => {
                    self.style(&mut out, ANSI_RESET)
                }
                Event::Start(Tag::List(start)) => lists.push(start),
                Event::End(TagEnd::List(_)) => {
                    lists.pop();
                    if lists.is_empty() {
                        out.push('\n');
                    }
                }
                Event::Start(Tag::Item) => {
                    let depth = lists.len().saturating_sub(1);
                    out.push_str(&"  ".repeat(depth));
                    match lists.last_mut() {
                        Some(Some(n)) => {
                            out.push_str(&format!("{n}. "));
                            *n += 1;
                        }
                        _ => out.push_str("• "),
                    }
                }
                Event::End(TagEnd::Item) => {
                    if !out.ends_with('\n') {
                        out.push('\n');
                    }
                }
                Event::Start(Tag::CodeBlock(_)) => self.style(&mut out, ANSI_CYAN),
                Event::End(TagEnd::CodeBlock) => {
                    self.style(&mut out, ANSI_RESET);
                    out.push('\n');
                }
                Event::Start(Tag::Link { .. }) => self.style(&mut out, ANSI_UNDERLINE),
                Event::End(TagEnd::Link) => self.style(&mut out, ANSI_RESET),
                Event::Code(code) => {
                    self.style(&mut out, ANSI_CYAN);
                    out.push_str(&code);
                    self.style(&mut out, ANSI_RESET);
                }
                Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                    out.push_str(&text)
                }
                Event::SoftBreak | Event::HardBreak => out.push('\n'),
                Event::Rule => out.push_str("────────\n\n"),
                Event::TaskListMarker(done) => out.push_str(if done { "[x] " } else { "[ ] " }),
                Event::End(TagEnd::TableCell) => out.push_str(" | "),
                Event::End(TagEnd::TableRow | TagEnd::TableHead) => out.push('\n'),
                _ => {}
            }
        }
        let trimmed = out.trim_end();
        if trimmed.is_empty() && !text.trim().is_empty() {
            return Err(Error::render("markdown produced no visible text"));
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_renders_emphasis() {
        let html = HtmlMarkdown.render("**304** stainless").unwrap();
        assert_eq!(html, "<p><strong>304</strong> stainless</p>\n");
    }

    #[test]
    fn html_escapes_raw_html() {
        let html = HtmlMarkdown.render("<script>alert(1)</script>").unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn html_renders_tables() {
        let html = HtmlMarkdown
            .render("| grade | Cr |\n|---|---|\n| 304 | 18 |\n")
            .unwrap();
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>304</td>"));
    }

    #[test]
    fn ansi_without_color_is_plain() {
        let text = AnsiMarkdown::new(false)
            .render("# Grades\n\n- 304\n- 316L\n\nUse `316L` near chlorides.")
            .unwrap();
        assert_eq!(
            text,
            "Grades\n\n• 304\n• 316L\n\nUse 316L near chlorides."
        );
    }

    #[test]
    fn ansi_numbers_ordered_lists() {
        let text = AnsiMarkdown::new(false)
            .render("1. pickle\n2. passivate\n")
            .unwrap();
        assert_eq!(text, "1. pickle\n2. passivate");
    }

    #[test]
    fn ansi_with_color_emits_escapes() {
        let text = AnsiMarkdown::new(true).render("**hard**").unwrap();
        assert!(text.contains(ANSI_BOLD));
        assert!(text.contains(ANSI_RESET));
    }
}
