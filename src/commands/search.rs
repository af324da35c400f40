use anyhow::Result;
use tracing::info;

use crate::cli::{SearchArgs, SearchFormat};
use crate::config::Config;
use crate::core::data::SearchMatch;
use crate::core::search::{SearchEngine, SearchOptions};
use crate::utils::{print_or_page, AppResult, OutputStyle};

pub fn handle_search_command(config: &Config, args: &SearchArgs) -> Result<()> {
    let options = search_options(config, args);
    let engine = SearchEngine::new(&args.pattern, &options)?;
    let outcome = engine.run();

    info!(
        pattern = %args.pattern,
        files = outcome.files_scanned,
        skipped = outcome.files_skipped,
        matches = outcome.matches.len(),
        "search complete"
    );

    // No match is still a successful run
    if outcome.matches.is_empty() {
        return Ok(());
    }

    let highlight = args.color.apply(config.general.color);
    let line_numbers = args.line_number || config.search.line_numbers;
    let rendered = render(&outcome.matches, args.format, line_numbers, highlight)?;

    print_or_page(&rendered, args.pager && args.format == SearchFormat::Plain)?;
    Ok(())
}

fn search_options(config: &Config, args: &SearchArgs) -> SearchOptions {
    let mut options = SearchOptions::new()
        .root(args.root.clone().unwrap_or_else(|| config.search.root.clone()))
        .glob(args.glob.as_deref().unwrap_or(&config.search.glob));
    if args.fixed_strings {
        options = options.fixed_strings();
    }
    options
}

fn render(
    matches: &[SearchMatch],
    format: SearchFormat,
    line_numbers: bool,
    highlight: bool,
) -> AppResult<String> {
    let mut out = String::new();
    for m in matches {
        let line = match format {
            SearchFormat::Plain => OutputStyle::format_match(m, line_numbers, highlight),
            SearchFormat::Json => OutputStyle::format_match_json(m)?,
        };
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}
