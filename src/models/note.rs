use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub id: i64,
    pub student_id: i64,
    pub text: String,
    pub created_at: String, // RFC 3339, local time
}
