use crossterm::terminal;

use crate::utils::error::{AppError, AppResult};
use crate::utils::terminal::stdout_is_tty;

/// Search output taller than this share of the terminal goes to the pager.
const PAGE_THRESHOLD: (usize, usize) = (2, 3);

/// Whether `line_count` lines overflow a terminal `rows` tall.
fn overflows(line_count: usize, rows: u16) -> bool {
    let (num, den) = PAGE_THRESHOLD;
    line_count > usize::from(rows) * num / den
}

/// Print search results, handing them to the pager when `page` is set,
/// stdout is a terminal and they would scroll off screen.
pub fn print_or_page(content: &str, page: bool) -> AppResult<()> {
    if page && stdout_is_tty() {
        let (_, rows) = terminal::size()
            .map_err(|e| AppError::Io(format!("reading terminal size: {}", e)))?;
        if overflows(content.lines().count(), rows) {
            return show_in_pager(content);
        }
    }

    print!("{}", content);
    Ok(())
}

fn show_in_pager(content: &str) -> AppResult<()> {
    let pager = minus::Pager::new();
    pager
        .set_prompt("taskrelay search")
        .and_then(|()| pager.push_str(content))
        .map_err(|e| AppError::Io(format!("preparing pager: {}", e)))?;

    minus::page_all(pager).map_err(|e| AppError::Io(format!("pager: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_threshold() {
        assert!(overflows(20, 24));
        assert!(!overflows(16, 24));
        assert!(!overflows(20, 40));
        assert!(!overflows(0, 0));
    }

    #[test]
    fn test_without_pager_flag_content_is_printed() {
        assert!(print_or_page("a.py:import foo\n", false).is_ok());
    }
}
