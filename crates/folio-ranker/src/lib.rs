//! folio-ranker: Weekly reading-list selection engine.
//!
//! Pipeline: eligibility gate -> scorer -> title dedup -> threshold -> top N.

pub mod venue;
pub mod weights;
pub mod scorer;
pub mod dedup;
pub mod selector;
pub mod tags;
pub mod report;

pub use scorer::{score_paper, ScoreBreakdown, ScoredPaper};
pub use selector::{plan_weekly, preview_weekly, select_for_week, select_weekly, SelectionPlan, SelectionStatus, WeeklySelection};
pub use venue::{is_eligible, VenueTier};
