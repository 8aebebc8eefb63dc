pub mod attendance;
pub mod note;
pub mod raw;
pub mod status;
pub mod student;

pub use attendance::AttendanceLogEntry;
pub use note::Note;
pub use status::Status;
pub use student::Student;
