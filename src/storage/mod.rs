pub mod file;
pub mod keys;
pub mod kv;

pub use file::JsonFileStore;
pub use kv::{load_json, save_json, KeyValueStore, MemoryStore, StorageError};
