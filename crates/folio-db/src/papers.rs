//! Paper repository.
//!
//! Provides insert, lookup, and status-transition operations for paper
//! metadata, and implements the engine's `PaperStore` boundary.

use crate::database::Database;
use crate::error::{DbError, Result};
use crate::schema::PAPER_COLUMNS;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use folio_common::{Paper, PaperId, PaperStatus, PaperStore, StatusTransition};
use rusqlite::{params, OptionalExtension, Row};

/// Outcome of a single idempotent insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// Same id already stored; nothing changed.
    Existing,
    /// Same id already stored; its empty open-access URL was filled in.
    BackfilledOaUrl,
}

/// Repository for paper operations.
pub struct PaperRepository {
    db: Database,
}

impl PaperRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Insert a paper unless its id already exists.
    pub fn insert(&self, paper: &Paper) -> Result<InsertOutcome> {
        insert_with(self.db.connection(), paper)
    }

    /// Insert many papers in one transaction. Returns one outcome per input.
    pub fn insert_batch(&self, papers: &[Paper]) -> Result<Vec<InsertOutcome>> {
        if papers.is_empty() {
            return Ok(vec![]);
        }
        let tx = self.db.connection().unchecked_transaction()?;
        let outcomes = papers
            .iter()
            .map(|p| insert_with(&tx, p))
            .collect::<Result<Vec<_>>>()?;
        tx.commit()?;
        Ok(outcomes)
    }

    /// Find a paper by id.
    pub fn find_by_id(&self, id: &PaperId) -> Result<Option<Paper>> {
        let sql = format!("SELECT {PAPER_COLUMNS} FROM papers WHERE paper_id = ?1");
        let raw = self
            .db
            .connection()
            .query_row(&sql, params![id.as_str()], RawPaper::from_row)
            .optional()?;
        raw.map(RawPaper::into_paper).transpose()
    }

    /// All papers with the given status string, in insertion order.
    pub fn find_by_status(&self, status: &str) -> Result<Vec<Paper>> {
        self.query_papers(
            &format!("SELECT {PAPER_COLUMNS} FROM papers WHERE status = ?1 ORDER BY rowid"),
            params![status],
        )
    }

    /// Papers selected for the given week.
    pub fn find_selected_for_week(&self, week_of: NaiveDate) -> Result<Vec<Paper>> {
        self.query_papers(
            &format!(
                "SELECT {PAPER_COLUMNS} FROM papers \
                 WHERE status = 'selected' AND picked_week = ?1 ORDER BY rowid"
            ),
            params![week_of.to_string()],
        )
    }

    pub fn count(&self) -> Result<u64> {
        let n: i64 = self
            .db
            .connection()
            .query_row("SELECT COUNT(*) FROM papers", [], |r| r.get(0))?;
        Ok(n as u64)
    }

    pub fn count_by_status(&self, status: &str) -> Result<u64> {
        let n: i64 = self.db.connection().query_row(
            "SELECT COUNT(*) FROM papers WHERE status = ?1",
            params![status],
            |r| r.get(0),
        )?;
        Ok(n as u64)
    }

    /// Move papers out of the candidate pool in one transaction.
    ///
    /// Each update is guarded by `status = 'unpicked'`; if any row is already
    /// picked the whole batch is rolled back.
    pub fn apply_transitions(&self, transitions: &[StatusTransition]) -> Result<usize> {
        if transitions.is_empty() {
            return Ok(0);
        }

        let picked_at = timestamp(Utc::now());
        let tx = self.db.connection().unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "UPDATE papers SET status = ?1, picked_week = ?2, picked_at = ?3 \
                 WHERE paper_id = ?4 AND status = 'unpicked'",
            )?;
            for t in transitions {
                if !t.status.is_picked() {
                    return Err(DbError::NonTerminalTransition(t.id.to_string()));
                }
                let changed = stmt.execute(params![
                    t.status.as_str(),
                    t.status.week_of().map(|d| d.to_string()),
                    picked_at,
                    t.id.as_str(),
                ])?;
                if changed != 1 {
                    return Err(DbError::NotUnpicked(t.id.to_string()));
                }
            }
        }
        tx.commit()?;

        tracing::debug!(count = transitions.len(), "Committed status transitions");
        Ok(transitions.len())
    }

    fn query_papers<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Paper>> {
        let mut stmt = self.db.connection().prepare(sql)?;
        let rows = stmt.query_map(params, RawPaper::from_row)?;
        let mut papers = Vec::new();
        for row in rows {
            papers.push(row?.into_paper()?);
        }
        Ok(papers)
    }
}

impl PaperStore for PaperRepository {
    fn list_unpicked(&self) -> folio_common::Result<Vec<Paper>> {
        Ok(self.find_by_status(PaperStatus::Unpicked.as_str())?)
    }

    fn list_recent_since(&self, since: DateTime<Utc>) -> folio_common::Result<Vec<Paper>> {
        Ok(self.query_papers(
            &format!(
                "SELECT {PAPER_COLUMNS} FROM papers WHERE ingested_at >= ?1 ORDER BY rowid"
            ),
            params![timestamp(since)],
        )?)
    }

    fn mark_picked(&mut self, transitions: &[StatusTransition]) -> folio_common::Result<()> {
        self.apply_transitions(transitions)?;
        Ok(())
    }

    fn count_unpicked(&self) -> folio_common::Result<usize> {
        Ok(self.count_by_status(PaperStatus::Unpicked.as_str())? as usize)
    }
}

// ── Row mapping ──────────────────────────────────────────────────────────────

/// Fixed-width RFC 3339 so lexical order in SQL equals time order.
fn timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn insert_with(conn: &rusqlite::Connection, paper: &Paper) -> Result<InsertOutcome> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO papers
         (paper_id, title, authors, abstract, venue, source, url, doi, oa_url,
          pub_date, ingested_at, relevant, status, picked_week)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            paper.id.as_str(),
            paper.title,
            paper.authors,
            paper.abstract_text,
            paper.venue,
            paper.source,
            paper.url,
            paper.doi,
            paper.oa_url,
            paper.publication_date,
            timestamp(paper.ingested_at),
            paper.keyword_relevant as i32,
            paper.status.as_str(),
            paper.status.week_of().map(|d| d.to_string()),
        ],
    )?;
    if inserted == 1 {
        return Ok(InsertOutcome::Inserted);
    }

    // Already known: only an empty open-access URL may be filled in.
    let oa_url = paper.oa_url.as_deref().filter(|u| !u.is_empty());
    if let Some(oa_url) = oa_url {
        let updated = conn.execute(
            "UPDATE papers SET oa_url = ?1 WHERE paper_id = ?2 AND (oa_url IS NULL OR oa_url = '')",
            params![oa_url, paper.id.as_str()],
        )?;
        if updated == 1 {
            return Ok(InsertOutcome::BackfilledOaUrl);
        }
    }
    Ok(InsertOutcome::Existing)
}

struct RawPaper {
    id: String,
    title: String,
    authors: String,
    abstract_text: Option<String>,
    venue: Option<String>,
    source: String,
    url: Option<String>,
    doi: Option<String>,
    oa_url: Option<String>,
    publication_date: Option<String>,
    ingested_at: String,
    relevant: i32,
    status: String,
    picked_week: Option<String>,
}

impl RawPaper {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            authors: row.get(2)?,
            abstract_text: row.get(3)?,
            venue: row.get(4)?,
            source: row.get(5)?,
            url: row.get(6)?,
            doi: row.get(7)?,
            oa_url: row.get(8)?,
            publication_date: row.get(9)?,
            ingested_at: row.get(10)?,
            relevant: row.get(11)?,
            status: row.get(12)?,
            picked_week: row.get(13)?,
        })
    }

    fn into_paper(self) -> Result<Paper> {
        let corrupt = |reason: String| DbError::CorruptRow { id: self.id.clone(), reason };

        let ingested_at = DateTime::parse_from_rfc3339(&self.ingested_at)
            .map_err(|e| corrupt(format!("ingested_at: {e}")))?
            .with_timezone(&Utc);
        let week_of = self
            .picked_week
            .as_deref()
            .map(|w| w.parse::<NaiveDate>())
            .transpose()
            .map_err(|e| corrupt(format!("picked_week: {e}")))?;
        let status = PaperStatus::from_parts(&self.status, week_of)
            .ok_or_else(|| corrupt(format!("status '{}'", self.status)))?;

        Ok(Paper {
            id: PaperId::from_stored(self.id),
            title: self.title,
            authors: self.authors,
            abstract_text: self.abstract_text,
            venue: self.venue,
            source: self.source,
            url: self.url,
            doi: self.doi,
            oa_url: self.oa_url,
            publication_date: self.publication_date,
            ingested_at,
            keyword_relevant: self.relevant != 0,
            status,
        })
    }
}
