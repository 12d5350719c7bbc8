//! Folio Database Layer
//!
//! This crate provides an embedded SQLite store for paper metadata and the
//! per-paper selection status.
//!
//! # Features
//!
//! - Single-file database, no server required
//! - Versioned schema migrations
//! - Atomic batch status transitions (one transaction per selection run)
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_db::{Database, PaperRepository};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::open("./data/papers.db")?;
//!     let papers = PaperRepository::new(db);
//!     println!("{} papers in backlog", papers.count_by_status("unpicked")?);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod schema;
pub mod papers;

pub use database::{Database, DatabaseStats};
pub use error::{DbError, Result};
pub use papers::{InsertOutcome, PaperRepository};
pub use schema::TABLE_PAPERS;
