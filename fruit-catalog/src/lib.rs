//! SQLite-backed fruit catalog.
//!
//! - One connection per operation; nothing is pooled or held between calls.
//! - Blocking work runs on `tokio::task::spawn_blocking` behind async wrappers.
//! - Name lookup is case-insensitive and exact. Folding is done by the
//!   `fold_case` SQL function (Rust `to_lowercase`), because SQLite's `LOWER`
//!   only folds ASCII and would miss names like `MAÇÃ`.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use rusqlite::{Connection, OptionalExtension, functions::FunctionFlags, params};
use tokio::task;
use tracing::{debug, info, instrument};

pub mod errors;
pub mod record;
pub mod seed;

use errors::{CatalogError, Result};
pub use record::FruitRecord;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS fruits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    price REAL NOT NULL,
    stock INTEGER NOT NULL
);
"#;

/// Handle to the catalog database file. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Catalog {
    db_path: PathBuf,
}

impl Catalog {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Finds a fruit by name, ignoring case. `Ok(None)` when absent.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<FruitRecord>> {
        let this = self.clone();
        let name = name.to_owned();
        task::spawn_blocking(move || this.find_by_name_blocking(&name)).await?
    }

    /// Drops every row and inserts `seed` in a single transaction.
    pub async fn reset(&self, seed: Vec<FruitRecord>) -> Result<usize> {
        let this = self.clone();
        task::spawn_blocking(move || this.reset_blocking(&seed)).await?
    }

    /// All rows in insertion order.
    pub async fn list_all(&self) -> Result<Vec<FruitRecord>> {
        let this = self.clone();
        task::spawn_blocking(move || this.list_all_blocking()).await?
    }

    #[instrument(skip(self), fields(db = %self.db_path.display()))]
    pub fn find_by_name_blocking(&self, name: &str) -> Result<Option<FruitRecord>> {
        let conn = self.connect()?;
        let found = conn
            .query_row(
                "SELECT name, price, stock FROM fruits WHERE fold_case(name) = fold_case(?1)",
                params![name],
                |row| {
                    Ok(FruitRecord {
                        name: row.get(0)?,
                        price: row.get(1)?,
                        stock: row.get(2)?,
                    })
                },
            )
            .optional()?;

        debug!(hit = found.is_some(), "catalog lookup");
        Ok(found)
    }

    #[instrument(skip_all, fields(db = %self.db_path.display(), rows = seed.len()))]
    pub fn reset_blocking(&self, seed: &[FruitRecord]) -> Result<usize> {
        validate_seed(seed)?;

        let mut conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;

        let tx = conn.transaction()?;
        tx.execute("DELETE FROM fruits", [])?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO fruits (name, price, stock) VALUES (?1, ?2, ?3)")?;
            for rec in seed {
                stmt.execute(params![rec.name, rec.price, rec.stock])?;
            }
        }
        tx.commit()?;

        info!("catalog reset");
        Ok(seed.len())
    }

    pub fn list_all_blocking(&self) -> Result<Vec<FruitRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT name, price, stock FROM fruits ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(FruitRecord {
                name: row.get(0)?,
                price: row.get(1)?,
                stock: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Opens a fresh connection with `fold_case` registered.
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.create_scalar_function(
            "fold_case",
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let text = ctx.get::<String>(0)?;
                Ok(text.to_lowercase())
            },
        )?;
        Ok(conn)
    }
}

fn validate_seed(seed: &[FruitRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(seed.len());
    for rec in seed {
        let invalid = |reason| CatalogError::InvalidRecord {
            name: rec.name.clone(),
            reason,
        };
        if rec.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if !rec.price.is_finite() || rec.price < 0.0 {
            return Err(invalid("price must be a finite value >= 0"));
        }
        if !seen.insert(rec.name.to_lowercase()) {
            return Err(invalid("duplicate name (case-insensitive)"));
        }
    }
    Ok(())
}
