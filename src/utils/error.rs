use crate::utils::output::OutputStyle;
use thiserror::Error;

/// Exit status for configuration, pattern, spawn and I/O failures.
pub const EXIT_USAGE: u8 = 2;

/// Exit status after an interrupt (128 + SIGINT).
pub const EXIT_INTERRUPTED: u8 = 130;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("'{target}' in {dir} failed ({})", describe_status(.code))]
    Delegation {
        dir: String,
        target: String,
        code: Option<i32>,
    },

    #[error("cannot run {tool} in {dir}: {message}")]
    Spawn {
        tool: String,
        dir: String,
        message: String,
    },

    #[error("interrupted")]
    Interrupted,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid pattern: {0}")]
    Pattern(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl AppError {
    /// Process exit status for this error.
    ///
    /// A failing child's own exit code is passed through so the invoker sees
    /// the same status it would have seen running the child directly.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Delegation { code: Some(code), .. } => match u8::try_from(*code) {
                Ok(0) | Err(_) => 1,
                Ok(code) => code,
            },
            AppError::Delegation { code: None, .. } => 1,
            AppError::Interrupted => EXIT_INTERRUPTED,
            AppError::Spawn { .. }
            | AppError::Config(_)
            | AppError::Pattern(_)
            | AppError::Io(_) => EXIT_USAGE,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

pub fn report_error(err: &AppError) {
    match err {
        AppError::Delegation { .. } => {
            eprintln!("taskrelay: *** {}", OutputStyle::error(&err.to_string()));
        }
        AppError::Interrupted => {
            eprintln!("taskrelay: {}", OutputStyle::warning("interrupted"));
        }
        AppError::Config(_) | AppError::Pattern(_) => {
            eprintln!("taskrelay: {}", OutputStyle::warning(&err.to_string()));
        }
        AppError::Spawn { .. } | AppError::Io(_) => {
            eprintln!("taskrelay: {}", OutputStyle::error(&err.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delegation_exit_code_passes_through() {
        let err = AppError::Delegation {
            dir: "qpy".to_string(),
            target: "clean".to_string(),
            code: Some(3),
        };
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), "'clean' in qpy failed (exit code 3)");
    }

    #[test]
    fn test_signal_and_out_of_range_codes_map_to_one() {
        let killed = AppError::Delegation {
            dir: "example".to_string(),
            target: "clean".to_string(),
            code: None,
        };
        assert_eq!(killed.exit_code(), 1);
        assert!(killed.to_string().contains("terminated by signal"));

        let odd = AppError::Delegation {
            dir: "example".to_string(),
            target: "clean".to_string(),
            code: Some(-1),
        };
        assert_eq!(odd.exit_code(), 1);
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(AppError::Config("bad".into()).exit_code(), EXIT_USAGE);
        assert_eq!(AppError::Pattern("(".into()).exit_code(), EXIT_USAGE);
        assert_eq!(AppError::Interrupted.exit_code(), EXIT_INTERRUPTED);
    }
}
