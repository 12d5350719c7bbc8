//! `folio backlog`: inspect the candidate pool without changing it.

use chrono::{DateTime, Utc};
use folio_common::FolioConfig;
use folio_ranker::report::duplicates_note;
use folio_ranker::{preview_weekly, WeeklySelection};

pub fn run(config: &FolioConfig, now: DateTime<Utc>) -> anyhow::Result<WeeklySelection> {
    let repo = super::open_repository(config)?;
    Ok(preview_weekly(&repo, &config.picks, now, None)?)
}

pub fn print(preview: &WeeklySelection, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(preview)?);
        return Ok(());
    }
    println!("Unpicked papers:   {}", preview.pool_size);
    println!("New this week:     {}", preview.new_this_week);
    println!(
        "Next run would discard {} ineligible and {} below threshold",
        preview.discarded_ineligible, preview.discarded_below_threshold
    );
    if let Some(note) = duplicates_note(preview) {
        println!("{note}");
    }
    let top = preview.selection.iter().chain(preview.runners_up.iter());
    for (rank, s) in top.enumerate() {
        println!("{:>3}. {:>6.2}  {}  ({})", rank + 1, s.score, s.paper.title, s.paper.venue_name());
    }
    Ok(())
}
