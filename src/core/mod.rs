pub mod backup;
pub mod import;
pub mod log;
pub mod mark;
pub mod notes;
pub mod reconcile;
pub mod reset;
pub mod roster;
pub mod student;
pub mod summary;
