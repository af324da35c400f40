use crossterm::tty::IsTty;

/// When to colorize output.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Decide whether to emit color. `enabled` is the config switch; an
    /// explicit `always` wins over it.
    pub fn resolve(self, enabled: bool) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => enabled && stdout_is_tty() && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Apply the decision to everything printed through `colored`.
    pub fn apply(self, enabled: bool) -> bool {
        let color = self.resolve(enabled);
        colored::control::set_override(color);
        color
    }
}

/// Process-wide color setup from the `general.color` switch, done once per
/// run before any command prints. `search --color` refines it later.
pub fn configure_colors(enabled: bool) -> bool {
    ColorChoice::Auto.apply(enabled)
}

pub fn stdout_is_tty() -> bool {
    std::io::stdout().is_tty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_choices() {
        assert!(ColorChoice::Always.resolve(false));
        assert!(!ColorChoice::Never.resolve(true));
        assert!(!ColorChoice::Auto.resolve(false));
    }

    #[test]
    fn test_disabled_config_turns_off_all_colored_output() {
        assert!(!configure_colors(false));
        assert!(!colored::control::SHOULD_COLORIZE.should_colorize());
        assert_eq!(crate::utils::OutputStyle::error("failed").to_string(), "failed");
    }
}
