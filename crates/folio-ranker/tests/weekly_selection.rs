//! End-to-end selection runs against the in-memory and SQLite stores.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use folio_common::{FolioError, PaperStatus, PaperStore, PicksConfig};
use folio_db::{Database, PaperRepository};
use folio_ranker::{plan_weekly, preview_weekly, select_weekly, SelectionStatus, WeeklySelection};
use folio_test_utils::{sample_picks_config, top5_papers, FailOn, FailingStore, MemoryStore, PaperBuilder};
use pretty_assertions::assert_eq;

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-18T08:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn week() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn titles(result: &[folio_ranker::ScoredPaper]) -> Vec<String> {
    result.iter().map(|s| s.paper.title.clone()).collect()
}

fn assert_conserved(result: &WeeklySelection) {
    assert_eq!(
        result.pool_size,
        result.discarded_ineligible
            + result.discarded_below_threshold
            + result.selection.len()
            + result.remaining_backlog,
        "backlog not conserved: {result:?}"
    );
}

#[test]
fn test_scenario_mixed_pool_single_pick() {
    let config = PicksConfig { num_papers: 1, ..sample_picks_config() };
    let mut store = MemoryStore::new(vec![
        PaperBuilder::new("Minimum Wage Spillovers")
            .abstract_text("Evidence on unemployment from county borders.")
            .build(),
        PaperBuilder::new("Asset Pricing Puzzles").venue("Journal of Finance").build(),
        PaperBuilder::new("A Quiet Paper").venue("Journal of Labor Economics").build(),
    ]);

    let result = select_weekly(&mut store, &config, now()).unwrap();

    assert_eq!(result.status, SelectionStatus::Selected);
    assert_eq!(titles(&result.selection), vec!["Minimum Wage Spillovers"]);
    assert_eq!(result.selection[0].score, 46.67);
    assert!(result.runners_up.is_empty());
    assert_eq!(result.discarded_ineligible, 1);
    assert_eq!(result.discarded_below_threshold, 1);
    assert_eq!(result.remaining_backlog, 0);

    assert_eq!(
        store.status_of("Minimum Wage Spillovers"),
        Some(PaperStatus::Selected { week_of: week() })
    );
    assert_eq!(store.status_of("Asset Pricing Puzzles"), Some(PaperStatus::RejectedIneligible));
    assert_eq!(store.status_of("A Quiet Paper"), Some(PaperStatus::RejectedBelowThreshold));
    assert_eq!(store.commits, 1);
    assert_conserved(&result);
}

#[test]
fn test_scenario_ten_eligible_zero_threshold() {
    let config = PicksConfig { min_score: 0.0, ..sample_picks_config() };
    let mut store = MemoryStore::new(top5_papers("Paper", 10));

    let result = select_weekly(&mut store, &config, now()).unwrap();

    assert_eq!(result.selection.len(), 7);
    assert_eq!(result.runners_up.len(), 3);
    assert_eq!(result.remaining_backlog, 3);
    assert_eq!(result.backlog_beyond_runners_up, 0);
    // Equal scores: insertion order decides.
    assert_eq!(titles(&result.runners_up), vec!["Paper 7", "Paper 8", "Paper 9"]);
    for r in &result.runners_up {
        assert_eq!(store.status_of(&r.paper.title), Some(PaperStatus::Unpicked));
    }
    assert_conserved(&result);
}

#[test]
fn test_scenario_title_duplicates_keep_higher_score() {
    let mut store = MemoryStore::new(vec![
        PaperBuilder::new("The Wage Gap").authors("Smith, A").venue("NBER Working Paper").build(),
        PaperBuilder::new("the wage gap  ").authors("Jones, B").build(),
    ]);

    let result = select_weekly(&mut store, &sample_picks_config(), now()).unwrap();

    assert_eq!(result.selection.len(), 1);
    assert_eq!(result.selection[0].paper.venue_name(), "Econometrica");
    assert_eq!(result.collapsed_duplicates, 1);
    assert_eq!(store.status_of("The Wage Gap"), Some(PaperStatus::Unpicked));
    assert_eq!(
        store.status_of("the wage gap  "),
        Some(PaperStatus::Selected { week_of: week() })
    );
    assert_conserved(&result);
}

#[test]
fn test_scenario_rerun_selects_nothing_already_picked() {
    let config = PicksConfig { num_papers: 2, ..sample_picks_config() };
    let mut store = MemoryStore::new(top5_papers("Paper", 5));

    let first = select_weekly(&mut store, &config, now()).unwrap();
    let second = select_weekly(&mut store, &config, now()).unwrap();

    let first_ids: Vec<_> = first.selection.iter().map(|s| s.paper.id.clone()).collect();
    assert!(second.selection.iter().all(|s| !first_ids.contains(&s.paper.id)));
    assert_eq!(titles(&second.selection), vec!["Paper 2", "Paper 3"]);
    assert_eq!(second.pool_size, 3);
    assert_eq!(second.remaining_backlog, 1);
}

#[test]
fn test_scenario_rerun_on_drained_pool_is_empty() {
    let config = PicksConfig { num_papers: 3, ..sample_picks_config() };
    let mut store = MemoryStore::new(vec![
        PaperBuilder::new("Minimum wage A").build(),
        PaperBuilder::new("Unemployment B").build(),
        PaperBuilder::new("Finance").venue("Journal of Finance").build(),
    ]);

    let first = select_weekly(&mut store, &config, now()).unwrap();
    assert_eq!(first.selection.len(), 2);
    assert_eq!(first.remaining_backlog, 0);
    assert_eq!(store.commits, 1);

    let second = select_weekly(&mut store, &config, now()).unwrap();
    assert_eq!(second.status, SelectionStatus::EmptyPool);
    assert!(second.selection.is_empty());
    assert!(second.runners_up.is_empty());
    assert_eq!(second.pool_size, 0);
    assert_eq!(store.commits, 1);
}

#[test]
fn test_zero_picks_requested_is_not_a_selection() {
    let config = PicksConfig { num_papers: 0, ..sample_picks_config() };
    let mut store = MemoryStore::new(top5_papers("Paper", 4));

    let result = select_weekly(&mut store, &config, now()).unwrap();

    assert_eq!(result.status, SelectionStatus::NoneRequested);
    assert!(result.selection.is_empty());
    assert_eq!(result.runners_up.len(), 4);
    assert_eq!(result.remaining_backlog, 4);
    assert_eq!(store.commits, 0);
    assert_conserved(&result);
}

#[test]
fn test_empty_pool_makes_no_write() {
    let mut store = MemoryStore::default();
    let result = select_weekly(&mut store, &sample_picks_config(), now()).unwrap();
    assert_eq!(result.status, SelectionStatus::EmptyPool);
    assert!(result.selection.is_empty());
    assert_eq!(store.commits, 0);
}

#[test]
fn test_all_ineligible_pool_is_discarded() {
    let mut store = MemoryStore::new(vec![
        PaperBuilder::new("A").venue("Journal of Finance").build(),
        PaperBuilder::new("B").no_venue().build(),
    ]);
    let result = select_weekly(&mut store, &sample_picks_config(), now()).unwrap();
    assert_eq!(result.status, SelectionStatus::NoEligibleCandidates);
    assert_eq!(store.list_unpicked().unwrap().len(), 0);
    assert_conserved(&result);
}

#[test]
fn test_all_below_threshold_pool_is_discarded() {
    let config = PicksConfig { min_score: 100.0, ..sample_picks_config() };
    let mut store = MemoryStore::new(top5_papers("Paper", 3));
    let result = select_weekly(&mut store, &config, now()).unwrap();
    assert_eq!(result.status, SelectionStatus::NoCandidatesAboveThreshold);
    assert_eq!(result.discarded_below_threshold, 3);
    assert_eq!(result.remaining_backlog, 0);
}

#[test]
fn test_ranking_is_deterministic() {
    let pool = vec![
        PaperBuilder::new("Structural model of voting")
            .venue("Journal of Public Economics")
            .abstract_text("We estimate the model on administrative data.")
            .build(),
        PaperBuilder::new("Elections and wages").venue("NBER Working Paper w1").build(),
        PaperBuilder::new("Plain").build(),
        PaperBuilder::new("Job market").venue("Job Market Paper").keyword_relevant().build(),
    ];
    let config = sample_picks_config();
    let a = plan_weekly(pool.clone(), &config, week());
    let b = plan_weekly(pool, &config, week());
    assert_eq!(titles(&a.selection), titles(&b.selection));
    assert_eq!(a.transitions(), b.transitions());
}

#[test]
fn test_raising_threshold_never_adds_picks() {
    let pool: Vec<_> = (0..12)
        .map(|i| {
            let venue = ["Econometrica", "NBER Working Paper", "Journal of Urban Economics"][i % 3];
            PaperBuilder::new(&format!("P{i} minimum wage")).venue(venue).build()
        })
        .collect();

    let mut previous: Option<Vec<String>> = None;
    for min_score in [0.0, 20.0, 30.0, 40.0, 60.0] {
        let config = PicksConfig { num_papers: 20, min_score, ..sample_picks_config() };
        let picked = titles(&plan_weekly(pool.clone(), &config, week()).selection);
        if let Some(prev) = &previous {
            assert!(picked.iter().all(|t| prev.contains(t)), "threshold {min_score} added a pick");
        }
        previous = Some(picked);
    }
}

#[test]
fn test_new_this_week_uses_lookback_window() {
    let mut store = MemoryStore::new(vec![
        PaperBuilder::new("Fresh").ingested_at(now() - Duration::days(2)).build(),
        PaperBuilder::new("Old").ingested_at(now() - Duration::days(30)).build(),
    ]);
    let result = select_weekly(&mut store, &sample_picks_config(), now()).unwrap();
    assert_eq!(result.new_this_week, 1);
}

#[test]
fn test_preview_writes_nothing() {
    let mut store = MemoryStore::new(top5_papers("Paper", 9));
    let preview = preview_weekly(&store, &sample_picks_config(), now(), None).unwrap();
    assert!(!preview.committed);
    assert_eq!(preview.remaining_backlog, 2);
    assert_eq!(store.commits, 0);
    assert_eq!(store.list_unpicked().unwrap().len(), 9);

    let committed = select_weekly(&mut store, &sample_picks_config(), now()).unwrap();
    assert_eq!(titles(&committed.selection), titles(&preview.selection));
}

#[test]
fn test_store_read_failure_is_fatal() {
    let mut store = FailingStore::new(top5_papers("Paper", 3), FailOn::Read);
    let err = select_weekly(&mut store, &sample_picks_config(), now()).unwrap_err();
    assert!(matches!(err, FolioError::StoreUnavailable(_)));
}

#[test]
fn test_store_write_failure_commits_nothing() {
    let mut store = FailingStore::new(top5_papers("Paper", 3), FailOn::Write);
    let err = select_weekly(&mut store, &sample_picks_config(), now()).unwrap_err();
    assert!(matches!(err, FolioError::StoreUnavailable(_)));
    assert_eq!(store.inner.list_unpicked().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// SQLite-backed runs
// ---------------------------------------------------------------------------

fn sqlite_store(papers: &[folio_common::Paper]) -> PaperRepository {
    let repo = PaperRepository::new(Database::open_in_memory().unwrap());
    repo.insert_batch(papers).unwrap();
    repo
}

#[test]
fn test_sqlite_run_persists_outcomes() {
    let config = PicksConfig { num_papers: 2, ..sample_picks_config() };
    let mut repo = sqlite_store(&[
        PaperBuilder::new("Minimum wage A").build(),
        PaperBuilder::new("Finance").venue("Journal of Finance").build(),
        PaperBuilder::new("Unemployment B").build(),
        PaperBuilder::new("Third").build(),
    ]);

    let result = select_weekly(&mut repo, &config, now()).unwrap();

    assert_eq!(titles(&result.selection), vec!["Minimum wage A", "Unemployment B"]);
    assert_eq!(result.remaining_backlog, 1);
    let selected = repo.find_selected_for_week(week()).unwrap();
    assert_eq!(selected.len(), 2);
    assert_eq!(repo.count_by_status("rejected_ineligible").unwrap(), 1);
    assert_conserved(&result);
}

#[test]
fn test_sqlite_stale_plan_rolls_back() {
    let mut repo = sqlite_store(&top5_papers("Paper", 4));
    let config = PicksConfig { num_papers: 3, ..sample_picks_config() };
    let plan = plan_weekly(repo.list_unpicked().unwrap(), &config, week());

    // Another run picks one of the planned papers first.
    let concurrent = vec![plan.transitions()[1].clone()];
    repo.mark_picked(&concurrent).unwrap();

    let err = repo.mark_picked(&plan.transitions()).unwrap_err();
    assert!(matches!(err, FolioError::InvalidTransition { .. }));
    assert_eq!(repo.list_unpicked().unwrap().len(), 3);
}

#[test]
fn test_sqlite_title_duplicates_keep_higher_score() {
    let journal = PaperBuilder::new("the wage gap  ").authors("Jones, B").build();
    let nber = PaperBuilder::new("The Wage Gap")
        .authors("Smith, A")
        .venue("NBER Working Paper")
        .build();
    assert_ne!(journal.id, nber.id);
    let mut repo = sqlite_store(&[nber.clone(), journal.clone()]);

    let result = select_weekly(&mut repo, &sample_picks_config(), now()).unwrap();

    assert_eq!(result.collapsed_duplicates, 1);
    assert_eq!(result.selection.len(), 1);
    assert_eq!(result.selection[0].paper.id, journal.id);
    assert_eq!(
        repo.find_by_id(&journal.id).unwrap().unwrap().status,
        PaperStatus::Selected { week_of: week() }
    );
    assert_eq!(repo.find_by_id(&nber.id).unwrap().unwrap().status, PaperStatus::Unpicked);
    assert_conserved(&result);
}

#[test]
fn test_sqlite_rerun_on_drained_pool_is_empty() {
    let config = PicksConfig { num_papers: 3, ..sample_picks_config() };
    let mut repo = sqlite_store(&[
        PaperBuilder::new("Minimum wage A").build(),
        PaperBuilder::new("Unemployment B").build(),
        PaperBuilder::new("Quiet").venue("Journal of Labor Economics").build(),
    ]);

    let first = select_weekly(&mut repo, &config, now()).unwrap();
    assert_eq!(first.selection.len(), 2);
    assert_eq!(first.remaining_backlog, 0);

    let second = select_weekly(&mut repo, &config, now()).unwrap();
    assert_eq!(second.status, SelectionStatus::EmptyPool);
    assert!(second.selection.is_empty());
    assert_eq!(repo.find_selected_for_week(week()).unwrap().len(), 2);
    assert_eq!(repo.count_by_status("rejected_below_threshold").unwrap(), 1);
}
