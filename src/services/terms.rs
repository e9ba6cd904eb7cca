use rusqlite::{Connection, OpenFlags, params};
use std::path::PathBuf;

use crate::review::{ReviewState, next_review_delay_secs, practice};

pub type TermId = i64;

/// A vocabulary term captured from a lesson document
#[derive(Debug, Clone, Default)]
pub struct Term {
    pub id: TermId,
    /// The word or phrase as it was selected
    pub term: String,
    pub part_of_speech: String,
    pub definition: String,
    /// The enclosing sentence captured at selection time
    pub example: String,
    pub phonetic: Option<String>,
    /// Pronunciation audio URL, if the dictionary provided one
    pub audio: Option<String>,
    pub list_id: i64,
    /// SM-2 scheduling state
    pub efactor: f64,
    pub interval: i64,
    pub repetition: i64,
    pub last_review: i64,
    pub next_review: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Term {
    pub fn review_state(&self) -> ReviewState {
        ReviewState {
            efactor: self.efactor,
            interval: self.interval,
            repetition: self.repetition,
        }
    }
}

/// Error type for term store operations
#[derive(Debug)]
pub enum TermError {
    DatabaseError(String),
    NotFound,
}

impl std::fmt::Display for TermError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TermError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            TermError::NotFound => write!(f, "Term not found"),
        }
    }
}

impl std::error::Error for TermError {}

impl From<rusqlite::Error> for TermError {
    fn from(err: rusqlite::Error) -> Self {
        TermError::DatabaseError(err.to_string())
    }
}

/// Returns the path to the terms database
fn get_db_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("lexnote").join("terms.db"))
}

/// Opens a connection to the terms database, creating it if necessary
fn open_db() -> Result<Connection, TermError> {
    let path = get_db_path().ok_or_else(|| {
        TermError::DatabaseError("Could not determine data directory".to_string())
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            TermError::DatabaseError(format!("Could not create data directory: {}", e))
        })?;
    }

    let conn = Connection::open_with_flags(
        &path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS terms (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            term TEXT NOT NULL,
            part_of_speech TEXT NOT NULL,
            definition TEXT NOT NULL,
            example TEXT NOT NULL,
            phonetic TEXT,
            audio TEXT,
            list_id INTEGER NOT NULL,
            efactor REAL NOT NULL,
            interval INTEGER NOT NULL,
            repetition INTEGER NOT NULL,
            last_review INTEGER NOT NULL,
            next_review INTEGER NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_terms_list_id ON terms(list_id)",
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

fn row_to_term(row: &rusqlite::Row<'_>) -> rusqlite::Result<Term> {
    Ok(Term {
        id: row.get(0)?,
        term: row.get(1)?,
        part_of_speech: row.get(2)?,
        definition: row.get(3)?,
        example: row.get(4)?,
        phonetic: row.get(5)?,
        audio: row.get(6)?,
        list_id: row.get(7)?,
        efactor: row.get(8)?,
        interval: row.get(9)?,
        repetition: row.get(10)?,
        last_review: row.get(11)?,
        next_review: row.get(12)?,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

const TERM_COLUMNS: &str = "id, term, part_of_speech, definition, example, phonetic, audio, \
     list_id, efactor, interval, repetition, last_review, next_review, created_at, updated_at";

/// Save a new term to the store. Scheduling state starts fresh (efactor
/// 2.5, no reviews yet); the returned id is what gets written into the
/// document marker.
pub fn create_term(term: &Term) -> Result<TermId, TermError> {
    let conn = open_db()?;
    let now = now_secs();
    let fresh = ReviewState::default();

    conn.execute(
        "INSERT INTO terms (term, part_of_speech, definition, example, phonetic, audio, list_id,
            efactor, interval, repetition, last_review, next_review, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            term.term,
            term.part_of_speech,
            term.definition,
            term.example,
            term.phonetic,
            term.audio,
            term.list_id,
            fresh.efactor,
            fresh.interval,
            fresh.repetition,
            now,
            now,
            now,
            now
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Update an existing term's content fields (not its scheduling state)
pub fn update_term(term: &Term) -> Result<(), TermError> {
    let conn = open_db()?;
    let now = now_secs();

    let rows_affected = conn.execute(
        "UPDATE terms SET term = ?1, part_of_speech = ?2, definition = ?3, example = ?4,
            phonetic = ?5, audio = ?6, list_id = ?7, updated_at = ?8 WHERE id = ?9",
        params![
            term.term,
            term.part_of_speech,
            term.definition,
            term.example,
            term.phonetic,
            term.audio,
            term.list_id,
            now,
            term.id
        ],
    )?;

    if rows_affected == 0 {
        return Err(TermError::NotFound);
    }

    Ok(())
}

/// Delete a term by ID (the caller unlinks its marker separately)
pub fn delete_term(id: TermId) -> Result<(), TermError> {
    let conn = open_db()?;

    let rows_affected = conn.execute("DELETE FROM terms WHERE id = ?1", params![id])?;

    if rows_affected == 0 {
        return Err(TermError::NotFound);
    }

    Ok(())
}

/// Get a single term by ID (the click-to-reopen path: a marker's term id
/// resolves to exactly one record here)
pub fn get_term(id: TermId) -> Result<Term, TermError> {
    let conn = open_db()?;

    conn.query_row(
        &format!("SELECT {} FROM terms WHERE id = ?1", TERM_COLUMNS),
        params![id],
        row_to_term,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => TermError::NotFound,
        _ => TermError::DatabaseError(e.to_string()),
    })
}

/// Find terms whose text matches `word`, case-insensitively. Used for
/// duplicate suggestions when the user starts annotating a selection.
pub fn find_existing_terms(word: &str) -> Result<Vec<Term>, TermError> {
    let conn = open_db()?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM terms WHERE term = ?1 COLLATE NOCASE ORDER BY term",
        TERM_COLUMNS
    ))?;

    let terms = stmt
        .query_map(params![word], row_to_term)?
        .filter_map(|r| r.ok())
        .collect();

    Ok(terms)
}

/// Load all terms for a list, ordered alphabetically
pub fn terms_in_list(list_id: i64) -> Result<Vec<Term>, TermError> {
    let conn = open_db()?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM terms WHERE list_id = ?1 ORDER BY term",
        TERM_COLUMNS
    ))?;

    let terms = stmt
        .query_map(params![list_id], row_to_term)?
        .filter_map(|r| r.ok())
        .collect();

    Ok(terms)
}

/// Load all terms due for review at or before `now` (unix seconds)
pub fn due_terms(now: i64) -> Result<Vec<Term>, TermError> {
    let conn = open_db()?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM terms WHERE next_review <= ?1 ORDER BY next_review",
        TERM_COLUMNS
    ))?;

    let terms = stmt
        .query_map(params![now], row_to_term)?
        .filter_map(|r| r.ok())
        .collect();

    Ok(terms)
}

/// Apply a practice grade to a term: run SM-2 over its scheduling state
/// and persist the new efactor/interval/repetition plus review timestamps.
pub fn record_practice(id: TermId, grade: u8) -> Result<Term, TermError> {
    let mut term = get_term(id)?;
    let now = now_secs();
    let state = practice(term.review_state(), grade);

    term.efactor = state.efactor;
    term.interval = state.interval;
    term.repetition = state.repetition;
    term.last_review = now;
    term.next_review = now + next_review_delay_secs(state.interval);

    let conn = open_db()?;
    let rows_affected = conn.execute(
        "UPDATE terms SET efactor = ?1, interval = ?2, repetition = ?3,
            last_review = ?4, next_review = ?5, updated_at = ?6 WHERE id = ?7",
        params![
            term.efactor,
            term.interval,
            term.repetition,
            term.last_review,
            term.next_review,
            now,
            id
        ],
    )?;

    if rows_affected == 0 {
        return Err(TermError::NotFound);
    }

    Ok(term)
}
