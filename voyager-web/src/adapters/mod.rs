//! Browser implementations of the passport ports.

pub mod cache;
pub mod notifier;
pub mod rest;
pub mod tasks;

pub use cache::LocalStorageCache;
pub use notifier::HttpNotifier;
pub use rest::RestStore;
pub use tasks::{BrowserTimers, WasmSpawner};
