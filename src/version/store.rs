use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::{debug, info};

use crate::project::{NewProject, Project};
use crate::version::error::StoreError;

/// Persistence operations for monitored projects
#[cfg_attr(test, automock)]
pub trait ProjectStore: Send + Sync {
    /// Stores a new project and returns it with its assigned id
    fn create(&self, project: NewProject) -> Result<Project, StoreError>;

    fn get(&self, id: i64) -> Result<Option<Project>, StoreError>;

    /// Persists the project's latest version and last change, and records `new_versions`
    fn commit(&self, project: &Project, new_versions: &[String]) -> Result<(), StoreError>;

    /// Known versions of a project in lexicographic order
    fn versions(&self, id: i64) -> Result<Vec<String>, StoreError>;

    /// All projects ordered by id
    fn list(&self) -> Result<Vec<Project>, StoreError>;
}

/// Schema migrations
/// Each version contains a list of SQL statements to execute
const MIGRATIONS: &[&[&str]] = &[
    // v1: version_url column
    &["ALTER TABLE projects ADD COLUMN version_url TEXT"],
];

const PROJECT_COLUMNS: &str =
    "id, name, homepage, backend, version_url, latest_version, last_change";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(db_path: &Path) -> Result<Self, StoreError> {
        info!("Initializing project database at {:?}", db_path);

        let conn = Connection::open(db_path)?;

        // Enable WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        debug!("Database connection established");

        let store = Self {
            conn: Mutex::new(conn),
        };

        store.create_schema()?;
        info!("Project database initialized successfully");

        Ok(store)
    }

    /// Acquire database connection lock with proper error handling
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn create_schema(&self) -> Result<(), StoreError> {
        debug!("Creating database schema");

        let conn = self.lock_conn()?;

        // Create base tables (without migration columns)
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                homepage TEXT NOT NULL,
                backend TEXT NOT NULL,
                latest_version TEXT,
                last_change INTEGER,
                UNIQUE(name, homepage)
            )
            "#,
            [],
        )?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS versions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                project_id INTEGER NOT NULL,
                version TEXT NOT NULL,
                FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE,
                UNIQUE(project_id, version)
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_versions_project_id ON versions(project_id)",
            [],
        )?;

        Self::apply_migrations(&conn)?;

        debug!("Database schema created successfully");
        Ok(())
    }

    /// Apply pending migrations based on user_version pragma
    fn apply_migrations(conn: &Connection) -> Result<(), StoreError> {
        let current_version: i32 =
            conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

        for (i, statements) in MIGRATIONS.iter().enumerate() {
            let version = (i + 1) as i32;
            if version > current_version {
                for sql in *statements {
                    match conn.execute(sql, []) {
                        Ok(_) => {}
                        Err(rusqlite::Error::SqliteFailure(_, Some(ref msg)))
                            if msg.contains("duplicate column name") =>
                        {
                            debug!("Column already exists, skipping: {}", sql);
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                debug!("Applied migration v{}", version);
            }
        }

        let target_version = MIGRATIONS.len() as i32;
        if target_version > current_version {
            conn.pragma_update(None, "user_version", target_version)?;
            debug!("Updated schema version to v{}", target_version);
        }

        Ok(())
    }

    fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
        let last_change: Option<i64> = row.get(6)?;
        Ok(Project {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            homepage: row.get(2)?,
            backend: row.get(3)?,
            version_url: row.get(4)?,
            latest_version: row.get(5)?,
            last_change: last_change.and_then(DateTime::<Utc>::from_timestamp_millis),
        })
    }
}

impl ProjectStore for SqliteStore {
    fn create(&self, project: NewProject) -> Result<Project, StoreError> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO projects (name, homepage, backend, version_url) VALUES (?1, ?2, ?3, ?4)",
            (
                &project.name,
                &project.homepage,
                &project.backend,
                &project.version_url,
            ),
        )?;
        let id = conn.last_insert_rowid();
        info!("Created project {} (#{})", project.name, id);

        Ok(Project {
            id: Some(id),
            name: project.name,
            homepage: project.homepage,
            backend: project.backend,
            version_url: project.version_url,
            latest_version: None,
            last_change: None,
        })
    }

    fn get(&self, id: i64) -> Result<Option<Project>, StoreError> {
        let conn = self.lock_conn()?;
        let project = conn
            .query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
                [id],
                Self::project_from_row,
            )
            .optional()?;

        Ok(project)
    }

    fn commit(&self, project: &Project, new_versions: &[String]) -> Result<(), StoreError> {
        let Some(id) = project.id else {
            return Err(StoreError::Unsaved(project.name.clone()));
        };

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let updated = tx.execute(
            r#"
            UPDATE projects
            SET name = ?2, homepage = ?3, backend = ?4, version_url = ?5,
                latest_version = ?6, last_change = ?7
            WHERE id = ?1
            "#,
            (
                id,
                &project.name,
                &project.homepage,
                &project.backend,
                &project.version_url,
                &project.latest_version,
                project.last_change.map(|t| t.timestamp_millis()),
            ),
        )?;

        if updated == 0 {
            return Err(StoreError::NotFound(id));
        }

        {
            let mut stmt = tx.prepare(
                "INSERT INTO versions (project_id, version) VALUES (?1, ?2)
                 ON CONFLICT(project_id, version) DO NOTHING",
            )?;
            for version in new_versions {
                stmt.execute((id, version))?;
            }
        }

        tx.commit()?;
        debug!(
            "Committed project {} with {} new versions",
            project,
            new_versions.len()
        );
        Ok(())
    }

    fn versions(&self, id: i64) -> Result<Vec<String>, StoreError> {
        let conn = self.lock_conn()?;
        let mut stmt =
            conn.prepare("SELECT version FROM versions WHERE project_id = ?1 ORDER BY version")?;

        let versions = stmt
            .query_map([id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(versions)
    }

    fn list(&self) -> Result<Vec<Project>, StoreError> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id"
        ))?;

        let projects = stmt
            .query_map([], Self::project_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(projects)
    }
}
