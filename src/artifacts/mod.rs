//! Batch result artifacts, keyed by job id. Each batch job writes its own
//! file; concurrent jobs never overwrite each other. A SQLite registry holds
//! the metadata, the payload lives next to it on disk.

use crate::error::{Result, ServiceError};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactMeta {
    pub job_id: String,
    pub created_ts: i64,
    pub filename: String,
    pub content_type: String,
    pub row_count: usize,
}

pub struct ArtifactStore {
    conn: Mutex<Connection>,
    dir: PathBuf,
}

impl ArtifactStore {
    /// Open or create the store under `dir`.
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("jobs.db"))?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                job_id TEXT PRIMARY KEY,
                created_ts INTEGER NOT NULL,
                filename TEXT NOT NULL,
                content_type TEXT NOT NULL,
                row_count INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_jobs_created ON jobs(created_ts);
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            dir: dir.to_path_buf(),
        })
    }

    fn payload_path(&self, job_id: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", job_id))
    }

    /// Persist one augmented table under a fresh job id.
    pub fn put(
        &self,
        filename: &str,
        content_type: &str,
        row_count: usize,
        bytes: &[u8],
    ) -> Result<ArtifactMeta> {
        let meta = ArtifactMeta {
            job_id: uuid::Uuid::new_v4().to_string(),
            created_ts: chrono::Utc::now().timestamp_millis(),
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            row_count,
        };

        std::fs::write(self.payload_path(&meta.job_id), bytes)?;
        let inserted = self
            .conn
            .lock()
            .map_err(|_| ServiceError::Storage("job registry lock poisoned".to_string()))?
            .execute(
                "INSERT INTO jobs (job_id, created_ts, filename, content_type, row_count)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    meta.job_id,
                    meta.created_ts,
                    meta.filename,
                    meta.content_type,
                    meta.row_count as i64
                ],
            );
        if let Err(e) = inserted {
            // An unregistered payload is unreachable; don't leave it behind.
            let _ = std::fs::remove_file(self.payload_path(&meta.job_id));
            return Err(e.into());
        }
        Ok(meta)
    }

    /// Metadata for one job, if it exists.
    pub fn get(&self, job_id: &str) -> Result<Option<ArtifactMeta>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| ServiceError::Storage("job registry lock poisoned".to_string()))?;
        let meta = conn
            .query_row(
                "SELECT job_id, created_ts, filename, content_type, row_count
                 FROM jobs WHERE job_id = ?1",
                params![job_id],
                Self::row_to_meta,
            )
            .optional()?;
        Ok(meta)
    }

    /// Metadata for the most recently stored job, if any.
    pub fn latest(&self) -> Result<Option<ArtifactMeta>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| ServiceError::Storage("job registry lock poisoned".to_string()))?;
        let meta = conn
            .query_row(
                "SELECT job_id, created_ts, filename, content_type, row_count
                 FROM jobs ORDER BY created_ts DESC, rowid DESC LIMIT 1",
                [],
                Self::row_to_meta,
            )
            .optional()?;
        Ok(meta)
    }

    /// Read the stored payload for a job.
    pub fn read(&self, meta: &ArtifactMeta) -> Result<Vec<u8>> {
        std::fs::read(self.payload_path(&meta.job_id)).map_err(|e| {
            ServiceError::ResultNotFound(format!("{}: {}", meta.job_id, e))
        })
    }

    fn row_to_meta(row: &rusqlite::Row<'_>) -> rusqlite::Result<ArtifactMeta> {
        Ok(ArtifactMeta {
            job_id: row.get(0)?,
            created_ts: row.get(1)?,
            filename: row.get(2)?,
            content_type: row.get(3)?,
            row_count: row.get::<_, i64>(4)? as usize,
        })
    }
}
