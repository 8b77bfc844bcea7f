pub mod conflicts;
pub mod import;
pub mod snapshots;
pub mod status;
