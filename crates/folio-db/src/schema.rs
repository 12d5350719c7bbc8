//! Schema definitions for the SQLite store.
//!
//! Migrations are applied in order; each version is recorded in
//! `schema_version` so reopening an existing file is a no-op.

pub const TABLE_PAPERS: &str = "papers";

/// Column list shared by every paper SELECT, in `RawPaper::from_row` order.
pub const PAPER_COLUMNS: &str =
    "paper_id, title, authors, abstract, venue, source, url, doi, oa_url, \
     pub_date, ingested_at, relevant, status, picked_week";

const V1_INITIAL: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version    INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS papers (
    paper_id    TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    authors     TEXT NOT NULL DEFAULT '',
    abstract    TEXT,
    venue       TEXT,
    source      TEXT NOT NULL DEFAULT '',
    url         TEXT,
    doi         TEXT,
    oa_url      TEXT,
    pub_date    TEXT,
    ingested_at TEXT NOT NULL,
    relevant    INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_papers_ingested ON papers(ingested_at);
CREATE INDEX IF NOT EXISTS idx_papers_venue ON papers(venue);
";

// Selection lifecycle: one status column instead of a bare picked flag.
const V2_STATUS: &str = "
ALTER TABLE papers ADD COLUMN status TEXT NOT NULL DEFAULT 'unpicked'
    CHECK (status IN ('unpicked', 'selected', 'rejected_ineligible', 'rejected_below_threshold'));
ALTER TABLE papers ADD COLUMN picked_week TEXT;
ALTER TABLE papers ADD COLUMN picked_at TEXT;

CREATE INDEX IF NOT EXISTS idx_papers_status ON papers(status);
";

/// Ordered (version, sql) pairs.
pub fn migrations() -> Vec<(i64, &'static str)> {
    vec![
        (1, V1_INITIAL),
        (2, V2_STATUS),
    ]
}

pub fn latest_version() -> i64 {
    migrations().last().map(|(v, _)| *v).unwrap_or(0)
}
