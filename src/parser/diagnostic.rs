//! Source-anchored diagnostics
//!
//! Renders an error message together with the offending line, its
//! neighbours and a caret pointer under the offending lexeme:
//!
//! ```text
//! error: expected `<<`, found string-literal `"sum="`
//!  --> line 3, column 10
//!    |
//!  2 |int s = 0;
//!  3 |    cout "sum=" << s;
//!    |         ^^^^^^
//!  4 |return 0;
//! ```
//!
//! Rendering never fails: a line outside the source drops the snippet and a
//! column outside the line drops only the pointer.

use super::errors::SyntaxError;
use super::lexer::{LexError, SourceLocation};

pub struct DiagnosticPrinter<'a> {
    lines: Vec<&'a str>,
}

impl<'a> DiagnosticPrinter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .collect(),
        }
    }

    pub fn render_syntax(&self, error: &SyntaxError) -> String {
        self.render(&error.to_string(), error.location(), error.width())
    }

    pub fn render_lex(&self, error: &LexError) -> String {
        self.render(&error.message, error.location, 1)
    }

    /// Render `message` pointing at `width` columns starting at `location`.
    pub fn render(&self, message: &str, location: SourceLocation, width: usize) -> String {
        let snippet = self.line(location.line);
        let last_printed = match snippet {
            Some(_) if self.line(location.line + 1).is_some() => location.line + 1,
            _ => location.line,
        };
        let gutter = last_printed.to_string().len();
        let blank = " ".repeat(gutter);

        let mut out = format!(
            "error: {}\n{}--> line {}, column {}\n",
            message, blank, location.line, location.column
        );

        let Some(line) = snippet else {
            return out;
        };

        out.push_str(&format!(" {} |\n", blank));
        if let Some(previous) = location.line.checked_sub(1).and_then(|n| self.line(n)) {
            out.push_str(&format!(" {:>gutter$} |{}\n", location.line - 1, previous));
        }
        out.push_str(&format!(" {:>gutter$} |{}\n", location.line, line));

        if let Some(pointer) = pointer(line, location.column, width) {
            out.push_str(&format!(" {} |{}\n", blank, pointer));
        }

        if let Some(next) = self.line(location.line + 1) {
            out.push_str(&format!(" {:>gutter$} |{}\n", location.line + 1, next));
        }

        out
    }

    /// 1-based line lookup.
    fn line(&self, number: usize) -> Option<&'a str> {
        number
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .copied()
    }
}

/// Caret line for `column` (1-based), keeping tabs so the carets line up.
/// The column may sit one past the last character (end of line).
fn pointer(line: &str, column: usize, width: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();
    if column == 0 || column > chars.len() + 1 {
        return None;
    }

    let mut pointer: String = chars[..column - 1]
        .iter()
        .map(|&c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    pointer.push_str(&"^".repeat(width.max(1)));
    Some(pointer)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "int s = 0;\n    cout \"sum=\" << s;\nreturn 0;";

    #[test]
    fn test_points_at_lexeme() {
        let printer = DiagnosticPrinter::new(SOURCE);
        let rendered = printer.render("bad", SourceLocation::new(2, 10), 6);
        let expected = "error: bad\n --> line 2, column 10\n   |\n 1 |int s = 0;\n 2 |    cout \"sum=\" << s;\n   |         ^^^^^^\n 3 |return 0;\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_keeps_tabs() {
        let printer = DiagnosticPrinter::new("\tx = ;");
        let rendered = printer.render("bad", SourceLocation::new(1, 6), 1);
        assert!(rendered.contains("   |\t    ^\n"));
    }

    #[test]
    fn test_line_out_of_range() {
        let printer = DiagnosticPrinter::new(SOURCE);
        let rendered = printer.render("bad", SourceLocation::new(9, 1), 1);
        assert_eq!(rendered, "error: bad\n --> line 9, column 1\n");
    }

    #[test]
    fn test_gutter_fits_printed_lines() {
        let source = (1..=10).map(|i| format!("l{i}")).collect::<Vec<_>>().join("\n");
        let printer = DiagnosticPrinter::new(&source);

        // Line 10 follows, so the gutter is two wide.
        let rendered = printer.render("bad", SourceLocation::new(9, 1), 1);
        assert!(rendered.starts_with("error: bad\n  --> line 9, column 1\n"));
        assert!(rendered.contains("  9 |l9\n"));
        assert!(rendered.contains(" 10 |l10\n"));

        // The last line prints no successor.
        let rendered = printer.render("bad", SourceLocation::new(10, 1), 1);
        assert!(rendered.contains("  --> line 10, column 1\n"));
        assert!(rendered.contains("  9 |l9\n"));

        let short = DiagnosticPrinter::new("a\nb");
        let rendered = short.render("bad", SourceLocation::new(2, 1), 1);
        assert_eq!(rendered, "error: bad\n --> line 2, column 1\n   |\n 1 |a\n 2 |b\n   |^\n");
    }

    #[test]
    fn test_column_out_of_range() {
        let printer = DiagnosticPrinter::new(SOURCE);
        let rendered = printer.render("bad", SourceLocation::new(3, 40), 1);
        assert!(rendered.contains(" 3 |return 0;\n"));
        assert!(!rendered.contains('^'));
    }

    #[test]
    fn test_end_of_line_column() {
        let printer = DiagnosticPrinter::new("x\n");
        let rendered = printer.render("bad", SourceLocation::new(1, 2), 1);
        assert!(rendered.contains("   | ^\n"));
        assert!(rendered.contains(" 2 |\n"));
    }
}
