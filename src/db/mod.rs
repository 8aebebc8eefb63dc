pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod snapshot;
pub mod stats;
pub mod store;

pub use pool::DbPool;
pub use snapshot::SnapshotStore;
pub use store::AttendanceStore;
