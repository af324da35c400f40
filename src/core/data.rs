use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Named actions exposed to the invoker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    All,
    Data,
    Clean,
    Search,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::All, Action::Data, Action::Clean, Action::Search];

    pub fn name(&self) -> &'static str {
        match self {
            Action::All => "all",
            Action::Data => "data",
            Action::Clean => "clean",
            Action::Search => "search",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Action::All => "default action, same as clean",
            Action::Data => "run the convert target in the data directory",
            Action::Clean => "run the clean target in every clean directory",
            Action::Search => "case-insensitive search through Python sources",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One invocation of the build tool's `target` inside `dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delegation {
    pub dir: PathBuf,
    pub target: String,
    /// Printed right before the delegation runs.
    pub trace: Option<String>,
}

impl Delegation {
    pub fn new(dir: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            target: target.into(),
            trace: None,
        }
    }

    pub fn with_trace(mut self, line: impl Into<String>) -> Self {
        self.trace = Some(line.into());
        self
    }
}

pub fn clean_trace(dir: &Path) -> String {
    format!("cleaning directory {}:", dir.display())
}

/// Ordered delegations an action expands to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub action: Action,
    steps: Vec<Delegation>,
}

impl Plan {
    pub fn for_action(action: Action, config: &Config) -> Self {
        let steps = match action {
            Action::All | Action::Clean => config
                .clean
                .dirs
                .iter()
                .map(|dir| {
                    Delegation::new(dir.clone(), config.clean.target.clone())
                        .with_trace(clean_trace(dir))
                })
                .collect(),
            Action::Data => vec![Delegation::new(
                config.data.dir.clone(),
                config.data.target.clone(),
            )],
            // search runs in-process
            Action::Search => Vec::new(),
        };

        Self { action, steps }
    }

    pub fn steps(&self) -> &[Delegation] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

/// A single matching line reported by the search action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub path: PathBuf,
    /// 1-based.
    pub line_number: usize,
    pub line: String,
    /// Byte ranges of the matched terms within `line`.
    pub spans: Vec<(usize, usize)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_expands_exactly_like_clean() {
        let config = Config::default();
        let all = Plan::for_action(Action::All, &config);
        let clean = Plan::for_action(Action::Clean, &config);
        assert_eq!(all.steps(), clean.steps());
        assert_eq!(all.action, Action::All);
    }

    #[test]
    fn test_clean_plan_follows_declaration_order() {
        let config = Config::default();
        let plan = Plan::for_action(Action::Clean, &config);

        let traces: Vec<_> = plan
            .steps()
            .iter()
            .map(|step| step.trace.clone().unwrap())
            .collect();
        assert_eq!(
            traces,
            vec!["cleaning directory qpy:", "cleaning directory example:"]
        );
        assert!(plan.steps().iter().all(|step| step.target == "clean"));
    }

    #[test]
    fn test_data_plan_has_single_untraced_step() {
        let plan = Plan::for_action(Action::Data, &Config::default());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps()[0], Delegation::new("data", "convert"));
    }

    #[test]
    fn test_search_is_not_delegated() {
        assert!(Plan::for_action(Action::Search, &Config::default()).is_empty());
    }

    #[test]
    fn test_empty_clean_set() {
        let mut config = Config::default();
        config.clean.dirs.clear();
        assert!(Plan::for_action(Action::Clean, &config).is_empty());
    }

    #[test]
    fn test_action_names() {
        let names: Vec<_> = Action::ALL.iter().map(|a| a.to_string()).collect();
        assert_eq!(names, vec!["all", "data", "clean", "search"]);
    }
}
