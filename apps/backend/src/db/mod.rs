//! SQLite database operations

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use vocab_core::WordPair;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Column list shared by every word query
const WORD_SELECT: &str = r#"
    SELECT w.id, w.page_id, w.english, w.armenian,
           COALESCE(s.correct, 0) AS correct,
           COALESCE(s.incorrect, 0) AS incorrect,
           s.last_studied
    FROM words w
    LEFT JOIN statistics s ON w.id = s.word_id
"#;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to SQLite and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Private in-memory database on a single connection (for testing)
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // every connection would get its own empty database, so keep exactly one alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // === Page Repository ===

    pub async fn create_page(&self, name: &str) -> Result<DbPage> {
        let page = sqlx::query_as::<_, DbPage>(
            r#"
            INSERT INTO pages (name, created_at)
            VALUES (?1, ?2)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(page)
    }

    /// All pages with word counts and summed statistics, newest first
    pub async fn list_pages(&self) -> Result<Vec<PageSummary>> {
        let pages = sqlx::query_as::<_, PageSummary>(
            r#"
            SELECT p.id, p.name, p.created_at,
                   COUNT(DISTINCT w.id) AS word_count,
                   COALESCE(SUM(s.correct), 0) AS correct,
                   COALESCE(SUM(s.incorrect), 0) AS incorrect
            FROM pages p
            LEFT JOIN words w ON p.id = w.page_id
            LEFT JOIN statistics s ON w.id = s.word_id
            GROUP BY p.id
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(pages)
    }

    pub async fn get_page(&self, page_id: PageId) -> Result<Option<DbPage>> {
        let page = sqlx::query_as::<_, DbPage>(
            "SELECT id, name, created_at FROM pages WHERE id = ?1",
        )
        .bind(page_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(page)
    }

    /// Delete a page; words and statistics go with it
    pub async fn delete_page(&self, page_id: PageId) -> Result<()> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ?1")
            .bind(page_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Page {page_id}")));
        }
        Ok(())
    }

    // === Word Repository ===

    /// Insert a word together with its statistics row
    pub async fn add_word(&self, page_id: PageId, english: &str, armenian: &str) -> Result<DbWord> {
        self.require_page(page_id).await?;

        let mut tx = self.pool.begin().await?;
        let word_id = insert_word(&mut tx, page_id, english, armenian).await?;
        tx.commit().await?;

        self.get_word(word_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Word {word_id}")))
    }

    /// Insert parsed pairs in one transaction
    pub async fn import_words(&self, page_id: PageId, pairs: &[WordPair]) -> Result<usize> {
        self.require_page(page_id).await?;

        let mut tx = self.pool.begin().await?;
        for pair in pairs {
            insert_word(&mut tx, page_id, &pair.english, &pair.armenian).await?;
        }
        tx.commit().await?;

        Ok(pairs.len())
    }

    pub async fn list_page_words(&self, page_id: PageId) -> Result<Vec<DbWord>> {
        let words = sqlx::query_as::<_, DbWord>(&format!(
            "{WORD_SELECT} WHERE w.page_id = ?1 ORDER BY w.id"
        ))
        .bind(page_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(words)
    }

    pub async fn get_word(&self, word_id: WordId) -> Result<Option<DbWord>> {
        let word = sqlx::query_as::<_, DbWord>(&format!("{WORD_SELECT} WHERE w.id = ?1"))
            .bind(word_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(word)
    }

    pub async fn delete_word(&self, word_id: WordId) -> Result<()> {
        let result = sqlx::query("DELETE FROM words WHERE id = ?1")
            .bind(word_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Word {word_id}")));
        }
        Ok(())
    }

    // === Study Word Store ===

    /// Words on any of the given pages, with their current statistics
    pub async fn list_words(&self, page_ids: &[PageId]) -> Result<Vec<DbWord>> {
        if page_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new(WORD_SELECT);
        query.push(" WHERE w.page_id IN (");
        let mut ids = query.separated(", ");
        for page_id in page_ids {
            ids.push_bind(*page_id);
        }
        ids.push_unseparated(") ORDER BY w.id");

        let words = query
            .build_query_as::<DbWord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(words)
    }

    /// Increment one counter in place and stamp `last_studied`
    pub async fn commit_outcome(
        &self,
        word_id: WordId,
        outcome: Outcome,
        at: DateTime<Utc>,
    ) -> Result<()> {
        let sql = match outcome {
            Outcome::Correct => {
                "UPDATE statistics SET correct = correct + 1, last_studied = ?1 WHERE word_id = ?2"
            }
            Outcome::Incorrect => {
                "UPDATE statistics SET incorrect = incorrect + 1, last_studied = ?1 WHERE word_id = ?2"
            }
        };

        let result = sqlx::query(sql)
            .bind(at)
            .bind(word_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Statistics for word {word_id}")));
        }
        Ok(())
    }

    async fn require_page(&self, page_id: PageId) -> Result<DbPage> {
        self.get_page(page_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Page {page_id}")))
    }
}

async fn insert_word(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    page_id: PageId,
    english: &str,
    armenian: &str,
) -> Result<WordId> {
    let word_id = sqlx::query("INSERT INTO words (page_id, english, armenian) VALUES (?1, ?2, ?3)")
        .bind(page_id)
        .bind(english)
        .bind(armenian)
        .execute(&mut **tx)
        .await?
        .last_insert_rowid();

    sqlx::query("INSERT INTO statistics (word_id) VALUES (?1)")
        .bind(word_id)
        .execute(&mut **tx)
        .await?;

    Ok(word_id)
}
