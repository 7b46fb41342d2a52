pub mod app;
pub mod errors;
pub mod fitness;
pub mod handlers;
pub mod journal;
pub mod metrics;
pub mod models;
pub mod seed;
pub mod sleep;
pub mod state;
pub mod storage;
pub mod ticker;
pub mod timer;
pub mod ui;

pub use app::router;
pub use state::{AppState, Trackers};
pub use storage::{FileStore, MemoryStore, StoragePort, Store, resolve_data_dir};
