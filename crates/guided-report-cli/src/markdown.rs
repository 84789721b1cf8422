//! Light markdown styling for the analysis pane.
//!
//! Only line-level constructs are recognised: headings, bullets, fenced
//! code and horizontal rules. Everything else is shown as written.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub fn to_lines(markdown: &str) -> Vec<Line<'static>> {
    let mut in_code = false;
    let mut lines = Vec::new();

    for raw in markdown.lines() {
        let trimmed = raw.trim_start();

        if trimmed.starts_with("```") {
            in_code = !in_code;
            continue;
        }
        if in_code {
            lines.push(Line::raw(format!("    {raw}")).style(Style::default().fg(Color::DarkGray)));
            continue;
        }

        let line = if let Some((level, title)) = heading(trimmed) {
            let style = match level {
                1 => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                2 => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                _ => Style::default().add_modifier(Modifier::BOLD),
            };
            Line::raw(strip_emphasis(title)).style(style)
        } else if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            let indent = " ".repeat(raw.len() - trimmed.len());
            Line::from(vec![
                Span::raw(format!("{indent}  ")),
                Span::styled("• ", Style::default().fg(Color::Green)),
                Span::raw(strip_emphasis(item)),
            ])
        } else if is_rule(trimmed) {
            Line::raw("─".repeat(40)).style(Style::default().fg(Color::DarkGray))
        } else {
            Line::raw(strip_emphasis(raw))
        };
        lines.push(line);
    }

    lines
}

/// `## Title` → `(2, "Title")`.
fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    line[level..].strip_prefix(' ').map(|title| (level, title.trim()))
}

fn is_rule(line: &str) -> bool {
    let line = line.trim_end();
    line.len() >= 3
        && ['-', '*', '_'].iter().any(|m| line.chars().all(|c| c == *m))
}

fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").replace("__", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn headings_lose_their_markers() {
        let lines = to_lines("# Business Case\n### Impact\n#hashtag");
        assert_eq!(plain(&lines[0]), "Business Case");
        assert_eq!(plain(&lines[1]), "Impact");
        assert_eq!(plain(&lines[2]), "#hashtag");
        assert!(lines[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn bullets_and_bold() {
        let lines = to_lines("- **Turnover** risk\n  * nested");
        assert_eq!(plain(&lines[0]), "  • Turnover risk");
        assert_eq!(plain(&lines[1]), "    • nested");
    }

    #[test]
    fn code_fences_are_hidden_and_body_indented() {
        let lines = to_lines("```\nROI = 3x\n```\nafter");
        assert_eq!(lines.len(), 2);
        assert_eq!(plain(&lines[0]), "    ROI = 3x");
        assert_eq!(plain(&lines[1]), "after");
    }

    #[test]
    fn rules_become_lines() {
        let lines = to_lines("---");
        assert_eq!(plain(&lines[0]), "─".repeat(40));
        assert!(!is_rule("-*-"));
    }
}
