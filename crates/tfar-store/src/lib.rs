//! # tfar-store: Artifact Registry Backed Stores
//!
//! Async I/O half of the registry: listing, downloading and the two
//! orchestrating stores.
//!
//! ## Architecture
//!
//! ```text
//! ProviderStore ─┬─ listing ─┐
//!                └─ AssetFetcher ─┴─ Transport (reqwest + Credentials + scope)
//! ModuleStore ───┴─ ...
//! ```
//!
//! One [`Transport`] is built at process start and shared by `Arc`. Stores
//! hold no other state, so every call is independent. Dropping a store
//! future aborts its in-flight request; dropping an [`AssetStream`]
//! releases its connection.

pub mod config;
pub mod credentials;
pub mod error;
pub mod fetcher;
mod listing;
pub mod module;
pub mod provider;
pub mod transport;

pub use config::{ConfigError, StoreConfig};
pub use credentials::Credentials;
pub use error::StoreError;
pub use fetcher::{AssetFetcher, AssetStream};
pub use module::ModuleStore;
pub use provider::ProviderStore;
pub use transport::Transport;
