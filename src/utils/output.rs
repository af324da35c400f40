use colored::*;
use crate::core::data::{Action, Delegation, SearchMatch};
use crate::utils::error::{AppError, AppResult};

pub struct OutputStyle;

impl OutputStyle {
    pub fn path(text: &str) -> ColoredString {
        text.magenta()
    }

    pub fn line_number(text: &str) -> ColoredString {
        text.green()
    }

    /// Matched term inside a search result line.
    pub fn matched(text: &str) -> ColoredString {
        text.red().bold()
    }

    pub fn command(text: &str) -> ColoredString {
        text.bright_yellow()
    }

    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn print_header(title: &str) {
        println!("{}", Self::title(title));
        println!("{}", Self::header_separator());
    }

    pub fn print_field_colored(label: &str, value: &str, color_fn: impl Fn(&str) -> ColoredString) {
        println!("{:>12}: {}", Self::label(label), color_fn(value));
    }

    /// `path:line` or `path:number:line`, grep style.
    ///
    /// With `highlight` off no escape codes are emitted at all.
    pub fn format_match(m: &SearchMatch, line_numbers: bool, highlight: bool) -> String {
        let path = m.path.display().to_string();

        if !highlight {
            return if line_numbers {
                format!("{}:{}:{}", path, m.line_number, m.line)
            } else {
                format!("{}:{}", path, m.line)
            };
        }

        let mut out = Self::path(&path).to_string();
        out.push_str(&":".cyan().to_string());
        if line_numbers {
            out.push_str(&Self::line_number(&m.line_number.to_string()).to_string());
            out.push_str(&":".cyan().to_string());
        }
        out.push_str(&Self::highlight_spans(&m.line, &m.spans));
        out
    }

    fn highlight_spans(line: &str, spans: &[(usize, usize)]) -> String {
        let mut out = String::with_capacity(line.len());
        let mut cursor = 0;
        for &(start, end) in spans {
            out.push_str(&line[cursor..start]);
            out.push_str(&Self::matched(&line[start..end]).to_string());
            cursor = end;
        }
        out.push_str(&line[cursor..]);
        out
    }

    pub fn format_match_json(m: &SearchMatch) -> AppResult<String> {
        serde_json::to_string(m)
            .map_err(|e| AppError::Io(format!("Failed to serialize match to JSON: {}", e)))
    }

    /// One block of `taskrelay list` output.
    pub fn format_action(action: Action, steps: &[String]) -> String {
        let mut out = format!(
            "{:<8} {}",
            Self::command(action.name()),
            Self::muted(action.description())
        );
        for step in steps {
            out.push_str(&format!("\n         {} {}", Self::muted("→"), step));
        }
        out
    }

    pub fn format_skipped(skipped: &[Delegation]) -> String {
        let dirs: Vec<String> = skipped.iter().map(|d| d.dir.display().to_string()).collect();
        format!("not started: {}", dirs.join(", "))
    }
}
