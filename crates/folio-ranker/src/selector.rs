//! Weekly selection and backlog management.
//!
//! One run = one read-modify-write pass over the candidate pool:
//!
//! 1. read every `unpicked` paper
//! 2. eligibility gate; ineligible papers are discarded unscored
//! 3. score, stable sort descending (ties keep insertion order)
//! 4. dedup by canonical title
//! 5. threshold; papers below `min_score` are discarded
//! 6. top N selected, next `RUNNERS_UP` reported but left in the pool
//! 7. all discards and the selection committed in one store transaction
//!
//! Planning is pure (`plan_weekly`); only `select_weekly` mutates the store.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use folio_common::config::RUNNERS_UP;
use folio_common::{Paper, PaperStatus, PaperStore, PicksConfig, Result, StatusTransition};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::dedup::dedup_by_title;
use crate::scorer::ScoredPaper;
use crate::venue;

/// Run outcome. Only `Selected` carries papers; the others are the
/// "nothing to read this week" cases and are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStatus {
    Selected,
    EmptyPool,
    NoEligibleCandidates,
    NoCandidatesAboveThreshold,
    /// `num_papers` is 0; candidates above the threshold stay in the pool.
    NoneRequested,
}

impl SelectionStatus {
    pub fn describe(&self) -> &'static str {
        match self {
            SelectionStatus::Selected                   => "papers selected",
            SelectionStatus::EmptyPool                  => "no candidates: backlog is empty",
            SelectionStatus::NoEligibleCandidates       => "no candidates: no paper from an eligible venue",
            SelectionStatus::NoCandidatesAboveThreshold => "no candidates: nothing scored above the minimum",
            SelectionStatus::NoneRequested              => "no papers requested: picks.num_papers is 0",
        }
    }
}

/// In-memory result of one planning pass. Nothing here is persisted yet.
#[derive(Debug, Clone)]
pub struct SelectionPlan {
    pub week_of: NaiveDate,
    pub pool_size: usize,
    /// Failed the venue gate; never scored.
    pub ineligible: Vec<Paper>,
    pub below_threshold: Vec<ScoredPaper>,
    /// Lost title dedup to a higher-scoring copy; left in the pool.
    pub collapsed_duplicates: Vec<ScoredPaper>,
    pub selection: Vec<ScoredPaper>,
    pub runners_up: Vec<ScoredPaper>,
}

impl SelectionPlan {
    pub fn status(&self) -> SelectionStatus {
        if self.pool_size == 0 {
            SelectionStatus::EmptyPool
        } else if self.ineligible.len() == self.pool_size {
            SelectionStatus::NoEligibleCandidates
        } else if !self.selection.is_empty() {
            SelectionStatus::Selected
        } else if self.runners_up.is_empty() {
            SelectionStatus::NoCandidatesAboveThreshold
        } else {
            SelectionStatus::NoneRequested
        }
    }

    /// Every `unpicked -> picked` move this plan implies, in commit order:
    /// ineligible, below threshold, selected.
    pub fn transitions(&self) -> Vec<StatusTransition> {
        let ineligible = self
            .ineligible
            .iter()
            .map(|p| StatusTransition::new(p.id.clone(), PaperStatus::RejectedIneligible));
        let below = self
            .below_threshold
            .iter()
            .map(|s| StatusTransition::new(s.paper.id.clone(), PaperStatus::RejectedBelowThreshold));
        let selected = self.selection.iter().map(|s| {
            StatusTransition::new(s.paper.id.clone(), PaperStatus::Selected { week_of: self.week_of })
        });
        ineligible.chain(below).chain(selected).collect()
    }

    /// Pool size once the plan is applied.
    pub fn projected_backlog(&self) -> usize {
        self.pool_size - self.ineligible.len() - self.below_threshold.len() - self.selection.len()
    }
}

/// Build a selection plan from the current pool. Pure: no I/O.
///
/// `pool` must be in insertion order; that order is the tie-breaker.
pub fn plan_weekly(pool: Vec<Paper>, config: &PicksConfig, week_of: NaiveDate) -> SelectionPlan {
    let pool_size = pool.len();

    let (eligible, ineligible): (Vec<Paper>, Vec<Paper>) = pool
        .into_iter()
        .partition(|p| venue::is_eligible(p.venue_name()));

    let mut ranked: Vec<ScoredPaper> = eligible
        .into_iter()
        .map(|p| ScoredPaper::new(p, config))
        .collect();
    // sort_by is stable: equal scores keep insertion order.
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let deduped = dedup_by_title(ranked);

    let (above, below_threshold): (Vec<ScoredPaper>, Vec<ScoredPaper>) = deduped
        .kept
        .into_iter()
        .partition(|s| s.score >= config.min_score);

    let mut above = above.into_iter();
    let selection: Vec<ScoredPaper> = above.by_ref().take(config.num_papers).collect();
    let runners_up: Vec<ScoredPaper> = above.take(RUNNERS_UP).collect();

    SelectionPlan {
        week_of,
        pool_size,
        ineligible,
        below_threshold,
        collapsed_duplicates: deduped.collapsed,
        selection,
        runners_up,
    }
}

/// Outcome of a weekly run, handed to report rendering and downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySelection {
    pub week_of: NaiveDate,
    pub status: SelectionStatus,
    pub selection: Vec<ScoredPaper>,
    pub runners_up: Vec<ScoredPaper>,
    /// Unpicked papers at the start of the run.
    pub pool_size: usize,
    pub discarded_ineligible: usize,
    pub discarded_below_threshold: usize,
    pub collapsed_duplicates: usize,
    /// Unpicked papers after the run (runners-up included).
    pub remaining_backlog: usize,
    /// Unpicked papers after the run that were neither selected nor shown as runners-up.
    pub backlog_beyond_runners_up: usize,
    /// Papers ingested within the lookback window, any status.
    pub new_this_week: usize,
    /// False for a preview: nothing was written.
    pub committed: bool,
}

impl WeeklySelection {
    fn from_plan(plan: SelectionPlan, remaining_backlog: usize, new_this_week: usize, committed: bool) -> Self {
        let status = plan.status();
        Self {
            week_of: plan.week_of,
            status,
            pool_size: plan.pool_size,
            discarded_ineligible: plan.ineligible.len(),
            discarded_below_threshold: plan.below_threshold.len(),
            collapsed_duplicates: plan.collapsed_duplicates.len(),
            remaining_backlog,
            backlog_beyond_runners_up: remaining_backlog.saturating_sub(plan.runners_up.len()),
            new_this_week,
            committed,
            selection: plan.selection,
            runners_up: plan.runners_up,
        }
    }
}

/// The reading week starts the day after the run.
pub fn week_starting_after(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive() + Duration::days(1)
}

/// Run the weekly selection and persist its outcome.
///
/// Store failures abort the run before anything is written, or roll the
/// single commit back; the pool is never left half-updated.
pub fn select_weekly<S>(store: &mut S, config: &PicksConfig, now: DateTime<Utc>) -> Result<WeeklySelection>
where
    S: PaperStore + ?Sized,
{
    select_for_week(store, config, now, week_starting_after(now))
}

/// `select_weekly` with an explicit week label instead of the day after `now`.
pub fn select_for_week<S>(
    store: &mut S,
    config: &PicksConfig,
    now: DateTime<Utc>,
    week_of: NaiveDate,
) -> Result<WeeklySelection>
where
    S: PaperStore + ?Sized,
{
    let (plan, new_this_week) = load_and_plan(&*store, config, now, week_of)?;
    let transitions = plan.transitions();

    if !transitions.is_empty() {
        store.mark_picked(&transitions)?;
    }
    let remaining = store.count_unpicked()?;

    let result = WeeklySelection::from_plan(plan, remaining, new_this_week, true);
    tracing::info!(
        week_of = %result.week_of,
        status = ?result.status,
        pool = result.pool_size,
        selected = result.selection.len(),
        runners_up = result.runners_up.len(),
        discarded_ineligible = result.discarded_ineligible,
        discarded_below_threshold = result.discarded_below_threshold,
        remaining = result.remaining_backlog,
        "Weekly selection committed"
    );
    Ok(result)
}

/// Same as `select_weekly` but writes nothing. `week_of` defaults to the day after `now`.
pub fn preview_weekly<S>(
    store: &S,
    config: &PicksConfig,
    now: DateTime<Utc>,
    week_of: Option<NaiveDate>,
) -> Result<WeeklySelection>
where
    S: PaperStore + ?Sized,
{
    let week_of = week_of.unwrap_or_else(|| week_starting_after(now));
    let (plan, new_this_week) = load_and_plan(store, config, now, week_of)?;
    let remaining = plan.projected_backlog();
    tracing::info!(
        week_of = %plan.week_of,
        pool = plan.pool_size,
        selected = plan.selection.len(),
        "Weekly selection preview (no changes written)"
    );
    Ok(WeeklySelection::from_plan(plan, remaining, new_this_week, false))
}

fn load_and_plan<S>(
    store: &S,
    config: &PicksConfig,
    now: DateTime<Utc>,
    week_of: NaiveDate,
) -> Result<(SelectionPlan, usize)>
where
    S: PaperStore + ?Sized,
{
    for warning in config.validate() {
        tracing::warn!("{warning}");
    }

    let pool = store.list_unpicked()?;
    let since = now - Duration::days(i64::from(config.lookback_days));
    let new_this_week = store.list_recent_since(since)?.len();

    if pool.is_empty() {
        tracing::warn!("No unpicked papers in the backlog");
    }

    let plan = plan_weekly(pool, config, week_of);
    tracing::debug!(
        ineligible = plan.ineligible.len(),
        below_threshold = plan.below_threshold.len(),
        collapsed = plan.collapsed_duplicates.len(),
        "Planned weekly selection"
    );
    Ok((plan, new_this_week))
}
