//! Title deduplication for a ranked candidate list.
//!
//! The same paper often arrives twice under different ids (a working paper
//! and its journal version, or two fetchers disagreeing on the author
//! string). Within one run only one copy per canonical title survives.

use std::collections::HashSet;

use crate::scorer::ScoredPaper;

/// Trimmed, case-folded title used as the dedup key.
pub fn canonical_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Result of collapsing a ranked list.
#[derive(Debug, Default)]
pub struct Deduplicated {
    pub kept: Vec<ScoredPaper>,
    /// Later occurrences of an already-kept title, in input order.
    pub collapsed: Vec<ScoredPaper>,
}

/// Keep the first occurrence of each canonical title.
///
/// `ranked` must already be sorted by descending score: first occurrence is
/// then the highest-scoring one. Sorting after this step would break that.
pub fn dedup_by_title(ranked: Vec<ScoredPaper>) -> Deduplicated {
    let mut seen = HashSet::new();
    let mut out = Deduplicated::default();

    for candidate in ranked {
        if seen.insert(canonical_title(&candidate.paper.title)) {
            out.kept.push(candidate);
        } else {
            tracing::debug!(
                paper_id = %candidate.paper.id,
                title = %candidate.paper.title,
                score = candidate.score,
                "Collapsed duplicate title"
            );
            out.collapsed.push(candidate);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::ScoreBreakdown;
    use folio_common::Paper;

    fn scored(title: &str, author: &str, score: f64) -> ScoredPaper {
        ScoredPaper {
            paper: Paper::new(title, author, "Econometrica"),
            score,
            breakdown: ScoreBreakdown::default(),
        }
    }

    #[test]
    fn test_canonical_title() {
        assert_eq!(canonical_title("  The Wage Gap \n"), "the wage gap");
    }

    #[test]
    fn test_keeps_first_of_each_title() {
        let ranked = vec![
            scored("Wage Gap", "A", 50.0),
            scored("Other", "B", 40.0),
            scored("wage gap  ", "C", 30.0),
        ];
        let d = dedup_by_title(ranked);
        let kept: Vec<(&str, f64)> = d.kept.iter().map(|s| (s.paper.title.as_str(), s.score)).collect();
        assert_eq!(kept, vec![("Wage Gap", 50.0), ("Other", 40.0)]);
        assert_eq!(d.collapsed.len(), 1);
        assert_eq!(d.collapsed[0].score, 30.0);
    }

    #[test]
    fn test_inner_whitespace_is_significant() {
        let d = dedup_by_title(vec![scored("Wage  Gap", "A", 2.0), scored("Wage Gap", "B", 1.0)]);
        assert_eq!(d.kept.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let d = dedup_by_title(vec![]);
        assert!(d.kept.is_empty() && d.collapsed.is_empty());
    }
}
