//! Infrastructure layer: file-backed record stores and the settings document.

pub mod config;
pub mod record_store;
pub mod repositories;

pub use config::{ConfigError, HotelSettings, data_dir_from_env};
pub use record_store::{
    InMemoryRecordStore, JsonFileStore, RecordStore, SharedStore, StoreError, StoreResult,
};
pub use repositories::Repositories;
