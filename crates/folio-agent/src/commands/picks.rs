//! `folio picks`: run the weekly selection and write the reading list.

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use folio_common::FolioConfig;
use folio_ranker::report::{render_report, report_file_name};
use folio_ranker::selector::week_starting_after;
use folio_ranker::{preview_weekly, select_for_week, WeeklySelection};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct PicksArgs {
    pub dry_run: bool,
    pub week_of: Option<NaiveDate>,
    pub out_dir: Option<PathBuf>,
}

/// Result of `folio picks`.
#[derive(Debug)]
pub struct PicksOutcome {
    pub selection: WeeklySelection,
    pub report: String,
    /// None for a dry run.
    pub written_to: Option<PathBuf>,
}

pub fn run(config: &FolioConfig, args: &PicksArgs, now: DateTime<Utc>) -> anyhow::Result<PicksOutcome> {
    let mut repo = super::open_repository(config)?;
    let week_of = args.week_of.unwrap_or_else(|| week_starting_after(now));

    let selection = if args.dry_run {
        preview_weekly(&repo, &config.picks, now, Some(week_of))?
    } else {
        select_for_week(&mut repo, &config.picks, now, week_of)?
    };

    let report = render_report(&selection, &config.picks, &config.output, now.date_naive());
    let written_to = if args.dry_run {
        None
    } else {
        let dir = args.out_dir.as_deref().unwrap_or(config.output.weekly_picks_dir.as_path());
        Some(write_report(dir, now.date_naive(), &report)?)
    };

    Ok(PicksOutcome { selection, report, written_to })
}

fn write_report(dir: &Path, date: NaiveDate, report: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(report_file_name(date));
    std::fs::write(&path, report).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "Weekly reading list written");
    Ok(path)
}

pub fn print(outcome: &PicksOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.selection)?);
        return Ok(());
    }
    match &outcome.written_to {
        Some(path) => {
            println!("Weekly reading list: {}", path.display());
            println!(
                "{} papers selected, {} left in the backlog",
                outcome.selection.selection.len(),
                outcome.selection.remaining_backlog
            );
        }
        None => print!("{}", outcome.report),
    }
    Ok(())
}
