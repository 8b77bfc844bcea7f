pub mod cli;
pub mod config;
pub mod export;
pub mod import;
pub mod store;

pub use config::Config;
pub use export::{load_export_from_file, LoadedExport};
pub use import::{run_import, ImportError, ImportSummary};
pub use store::ArchiveStore;
