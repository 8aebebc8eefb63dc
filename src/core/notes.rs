use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::Note;

pub struct NoteLogic;

impl NoteLogic {
    pub fn add(pool: &mut DbPool, student_id: i64, text: &str) -> AppResult<i64> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Other("note text is empty".to_string()));
        }

        queries::require_student(&pool.conn, student_id)?;
        let id = queries::insert_note(&pool.conn, student_id, text)?;

        audit(&pool.conn, "note", &student_id.to_string(), text);
        Ok(id)
    }

    /// Notes of one student, newest first.
    pub fn list(pool: &DbPool, student_id: i64) -> AppResult<Vec<Note>> {
        queries::require_student(&pool.conn, student_id)?;
        queries::load_notes(&pool.conn, student_id)
    }
}
