use pulldown_cmark::{Event, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::markdown;
use crate::tui::theme::Theme;

/// Convert markdown content into styled lines for the preview pane.
/// This walks the same parser `markdown::to_html` uses; constructs the
/// terminal cannot express (links, images, block quotes) degrade to their
/// plain text.
pub fn markdown_lines(text: &str, theme: &Theme) -> Vec<Line<'static>> {
    if text.trim().is_empty() {
        return vec![Line::from(Span::styled(
            "(no content)",
            Style::default()
                .fg(theme.dim)
                .add_modifier(Modifier::ITALIC),
        ))];
    }

    let base = Style::default().fg(theme.text);
    let code = Style::default().fg(theme.highlight);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut styles: Vec<Style> = vec![base];
    let mut list_depth = 0usize;
    let mut in_code_block = false;

    let flush = |spans: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>| {
        if !spans.is_empty() {
            lines.push(Line::from(std::mem::take(spans)));
        }
    };

    for event in markdown::parser(text) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { .. } => {
                    flush(&mut spans, &mut lines);
                    styles.push(
                        Style::default()
                            .fg(theme.highlight)
                            .add_modifier(Modifier::BOLD),
                    );
                }
                Tag::Emphasis => {
                    let top = *styles.last().unwrap_or(&base);
                    styles.push(top.add_modifier(Modifier::ITALIC));
                }
                Tag::Strong => {
                    let top = *styles.last().unwrap_or(&base);
                    styles.push(top.add_modifier(Modifier::BOLD));
                }
                Tag::Strikethrough => {
                    let top = *styles.last().unwrap_or(&base);
                    styles.push(top.add_modifier(Modifier::CROSSED_OUT));
                }
                Tag::CodeBlock(_) => {
                    flush(&mut spans, &mut lines);
                    in_code_block = true;
                }
                Tag::List(_) => {
                    list_depth += 1;
                }
                Tag::Item => {
                    flush(&mut spans, &mut lines);
                    let indent = "  ".repeat(list_depth.saturating_sub(1));
                    spans.push(Span::styled(
                        format!("{}• ", indent),
                        Style::default().fg(theme.dim),
                    ));
                }
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Heading(_) => {
                    styles.pop();
                    flush(&mut spans, &mut lines);
                    lines.push(Line::default());
                }
                TagEnd::Paragraph => {
                    flush(&mut spans, &mut lines);
                    lines.push(Line::default());
                }
                TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                    styles.pop();
                }
                TagEnd::CodeBlock => {
                    in_code_block = false;
                    lines.push(Line::default());
                }
                TagEnd::Item => {
                    flush(&mut spans, &mut lines);
                }
                TagEnd::List(_) => {
                    list_depth = list_depth.saturating_sub(1);
                    if list_depth == 0 {
                        lines.push(Line::default());
                    }
                }
                _ => {}
            },
            Event::Text(t) => {
                if in_code_block {
                    for code_line in t.lines() {
                        lines.push(Line::from(Span::styled(
                            format!("  {}", code_line),
                            code,
                        )));
                    }
                } else {
                    let style = *styles.last().unwrap_or(&base);
                    spans.push(Span::styled(t.into_string(), style));
                }
            }
            Event::Code(t) => {
                spans.push(Span::styled(t.into_string(), code));
            }
            Event::SoftBreak => {
                spans.push(Span::styled(" ".to_string(), base));
            }
            Event::HardBreak => {
                flush(&mut spans, &mut lines);
            }
            Event::Rule => {
                flush(&mut spans, &mut lines);
                lines.push(Line::from(Span::styled(
                    "─".repeat(24),
                    Style::default().fg(theme.dim),
                )));
                lines.push(Line::default());
            }
            _ => {}
        }
    }
    flush(&mut spans, &mut lines);

    // Trim the trailing blank line the last block leaves behind.
    while lines
        .last()
        .is_some_and(|line| line.spans.is_empty())
    {
        lines.pop();
    }

    lines
}
