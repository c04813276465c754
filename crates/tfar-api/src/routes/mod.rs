//! # Registry Route Modules
//!
//! - `discovery`: service discovery document, banner and health probe.
//! - `modules`: module registry protocol (`modules.v1`).
//! - `providers`: provider registry protocol (`providers.v1`).
//! - `assets`: streams stored files referenced by the two protocols.

pub mod assets;
pub mod discovery;
pub mod modules;
pub mod providers;
