use anyhow::Result;

use crate::config::Config;
use crate::core::data::{Action, Plan};
use crate::core::runner::ProcessRunner;
use crate::core::traits::Delegate;
use crate::utils::OutputStyle;

pub fn handle_list_command(config: &Config) -> Result<()> {
    let runner = ProcessRunner::from_config(&config.general);

    OutputStyle::print_header("Actions");
    for action in Action::ALL {
        println!("{}", OutputStyle::format_action(action, &describe_steps(&runner, config, action)));
    }

    Ok(())
}

fn describe_steps(runner: &ProcessRunner, config: &Config, action: Action) -> Vec<String> {
    if action == Action::Search {
        return vec![format!(
            "search {} for {} (pattern from SEARCH)",
            config.search.root.display(),
            config.search.glob
        )];
    }

    Plan::for_action(action, config)
        .steps()
        .iter()
        .map(|step| runner.describe(step))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_for_each_action() {
        let config = Config::default();
        let runner = ProcessRunner::from_config(&config.general);

        assert_eq!(
            describe_steps(&runner, &config, Action::Clean),
            vec!["make clean (in qpy)", "make clean (in example)"]
        );
        assert_eq!(
            describe_steps(&runner, &config, Action::All),
            describe_steps(&runner, &config, Action::Clean)
        );
        assert_eq!(
            describe_steps(&runner, &config, Action::Data),
            vec!["make convert (in data)"]
        );
        assert_eq!(
            describe_steps(&runner, &config, Action::Search),
            vec!["search . for *.py (pattern from SEARCH)"]
        );
    }
}
