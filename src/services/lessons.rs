use rusqlite::{Connection, OpenFlags, params};
use std::path::PathBuf;

pub type LessonId = i64;

/// A lesson note: a serialized block document plus its review schedule
#[derive(Debug, Clone, Default)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub subject: String,
    /// Serialized document content; opaque to the store
    pub content: String,
    pub start_date: i64,
    pub review_date: i64,
    /// Number of review sections completed so far (0..=7)
    pub on_track: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Error type for lesson store operations
#[derive(Debug)]
pub enum LessonError {
    DatabaseError(String),
    NotFound,
}

impl std::fmt::Display for LessonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LessonError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            LessonError::NotFound => write!(f, "Lesson not found"),
        }
    }
}

impl std::error::Error for LessonError {}

impl From<rusqlite::Error> for LessonError {
    fn from(err: rusqlite::Error) -> Self {
        LessonError::DatabaseError(err.to_string())
    }
}

/// Returns the path to the lessons database
fn get_db_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("lexnote").join("lessons.db"))
}

/// Opens a connection to the lessons database, creating it if necessary
fn open_db() -> Result<Connection, LessonError> {
    let path = get_db_path().ok_or_else(|| {
        LessonError::DatabaseError("Could not determine data directory".to_string())
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            LessonError::DatabaseError(format!("Could not create data directory: {}", e))
        })?;
    }

    let conn = Connection::open_with_flags(
        &path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS lessons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            subject TEXT NOT NULL,
            content TEXT NOT NULL,
            start_date INTEGER NOT NULL,
            review_date INTEGER NOT NULL,
            on_track INTEGER NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    Ok(conn)
}

fn now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

fn row_to_lesson(row: &rusqlite::Row<'_>) -> rusqlite::Result<Lesson> {
    Ok(Lesson {
        id: row.get(0)?,
        title: row.get(1)?,
        subject: row.get(2)?,
        content: row.get(3)?,
        start_date: row.get(4)?,
        review_date: row.get(5)?,
        on_track: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

const LESSON_COLUMNS: &str =
    "id, title, subject, content, start_date, review_date, on_track, created_at, updated_at";

/// Create a new empty lesson starting (and first due) on `start_date`
pub fn create_lesson(title: &str, start_date: i64) -> Result<LessonId, LessonError> {
    let conn = open_db()?;
    let now = now_secs();

    conn.execute(
        "INSERT INTO lessons (title, subject, content, start_date, review_date, on_track,
            created_at, updated_at)
         VALUES (?1, '', '', ?2, ?3, 0, ?4, ?5)",
        params![title, start_date, start_date, now, now],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Update a lesson's fields, including content and review schedule
pub fn update_lesson(lesson: &Lesson) -> Result<(), LessonError> {
    let conn = open_db()?;
    let now = now_secs();

    let rows_affected = conn.execute(
        "UPDATE lessons SET title = ?1, subject = ?2, content = ?3, start_date = ?4,
            review_date = ?5, on_track = ?6, updated_at = ?7 WHERE id = ?8",
        params![
            lesson.title,
            lesson.subject,
            lesson.content,
            lesson.start_date,
            lesson.review_date,
            lesson.on_track,
            now,
            lesson.id
        ],
    )?;

    if rows_affected == 0 {
        return Err(LessonError::NotFound);
    }

    Ok(())
}

/// Delete a lesson by ID
pub fn delete_lesson(id: LessonId) -> Result<(), LessonError> {
    let conn = open_db()?;

    let rows_affected = conn.execute("DELETE FROM lessons WHERE id = ?1", params![id])?;

    if rows_affected == 0 {
        return Err(LessonError::NotFound);
    }

    Ok(())
}

/// Get a single lesson by ID
pub fn get_lesson(id: LessonId) -> Result<Lesson, LessonError> {
    let conn = open_db()?;

    conn.query_row(
        &format!("SELECT {} FROM lessons WHERE id = ?1", LESSON_COLUMNS),
        params![id],
        row_to_lesson,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => LessonError::NotFound,
        _ => LessonError::DatabaseError(e.to_string()),
    })
}

/// Load all lessons due for review at or before `now` (unix seconds)
pub fn due_lessons(now: i64) -> Result<Vec<Lesson>, LessonError> {
    let conn = open_db()?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM lessons WHERE review_date <= ?1 ORDER BY review_date",
        LESSON_COLUMNS
    ))?;

    let lessons = stmt
        .query_map(params![now], row_to_lesson)?
        .filter_map(|r| r.ok())
        .collect();

    Ok(lessons)
}
