//! Wrapping for plain text and styled ratatui Lines.

use ratatui::text::{Line, Span};

/// Wrap plain text to the given width, one string per output line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    textwrap::wrap(text, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

/// Wrap styled Lines to the given width, preserving span styles.
pub fn wrap_styled_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return lines;
    }
    lines
        .into_iter()
        .flat_map(|line| wrap_styled_line(line, width))
        .collect()
}

/// Wrap a single styled Line.
///
/// The line's characters are re-flowed with textwrap on the concatenated
/// plain text, then the styled spans are rebuilt by walking the characters in
/// order. Whitespace that textwrap collapses at wrap points is skipped.
fn wrap_styled_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    let total_width: usize = line.spans.iter().map(|s| s.content.chars().count()).sum();
    if total_width <= width {
        return vec![line];
    }

    let styled_chars: Vec<(char, ratatui::style::Style)> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |ch| (ch, span.style)))
        .collect();
    let plain: String = styled_chars.iter().map(|(ch, _)| ch).collect();

    let mut result = Vec::new();
    let mut cursor = 0;

    for wrapped in textwrap::wrap(&plain, width) {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut run = String::new();
        let mut run_style = None;

        for expected in wrapped.chars() {
            // Skip whitespace textwrap dropped at the wrap point.
            while cursor < styled_chars.len()
                && styled_chars[cursor].0 != expected
                && styled_chars[cursor].0.is_whitespace()
            {
                cursor += 1;
            }
            let Some(&(ch, style)) = styled_chars.get(cursor) else {
                break;
            };
            cursor += 1;

            match run_style {
                Some(s) if s == style => run.push(ch),
                Some(s) => {
                    spans.push(Span::styled(std::mem::take(&mut run), s));
                    run_style = Some(style);
                    run.push(ch);
                }
                None => {
                    run_style = Some(style);
                    run.push(ch);
                }
            }
        }

        if let (false, Some(style)) = (run.is_empty(), run_style) {
            spans.push(Span::styled(run, style));
        }
        result.push(Line::from(spans));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Style};

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_wrap_text_plain() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 10);
        }
    }

    #[test]
    fn test_wrap_text_zero_width() {
        assert_eq!(wrap_text("anything", 0), vec!["anything".to_string()]);
    }

    #[test]
    fn test_short_styled_line_untouched() {
        let line = Line::from(Span::styled("short", Style::default().fg(Color::Red)));
        let wrapped = wrap_styled_lines(vec![line], 20);
        assert_eq!(wrapped.len(), 1);
        assert_eq!(line_text(&wrapped[0]), "short");
    }

    #[test]
    fn test_styled_wrap_preserves_text() {
        let red = Style::default().fg(Color::Red);
        let blue = Style::default().fg(Color::Blue);
        let line = Line::from(vec![
            Span::styled("red text here ", red),
            Span::styled("blue text follows after", blue),
        ]);

        let wrapped = wrap_styled_lines(vec![line], 12);
        assert!(wrapped.len() > 1);

        let rejoined: Vec<String> = wrapped.iter().map(line_text).collect();
        let all = rejoined.join(" ");
        assert!(all.contains("red text here"));
        assert!(all.contains("blue text follows after"));
    }

    #[test]
    fn test_styled_wrap_preserves_styles() {
        let red = Style::default().fg(Color::Red);
        let blue = Style::default().fg(Color::Blue);
        let line = Line::from(vec![
            Span::styled("aaaa bbbb ", red),
            Span::styled("cccc dddd", blue),
        ]);

        let wrapped = wrap_styled_lines(vec![line], 10);
        let styles: Vec<_> = wrapped
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.style))
            .collect();
        assert!(styles.contains(&red));
        assert!(styles.contains(&blue));
    }
}
