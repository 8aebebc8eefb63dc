pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod history;
pub mod import;
pub mod init;
pub mod log;
pub mod mark;
pub mod note;
pub mod reset;
pub mod student;
pub mod summary;
