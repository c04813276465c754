//! # tfar-core: Terraform Registry Translation Engine
//!
//! Maps Terraform Registry semantics (namespace, name, provider system,
//! version, OS, architecture) onto a generic artifact store's
//! package/version/file hierarchy.
//!
//! ## Modules
//!
//! | Module        | Responsibility                                            |
//! |---------------|-----------------------------------------------------------|
//! | [`codec`]     | Provider version triple ⇄ store version string, file ids   |
//! | [`naming`]    | Canonical provider asset and module archive file names    |
//! | [`checksum`]  | `SHA256SUMS` manifest parsing and digest lookup           |
//! | [`keyring`]   | Armored OpenPGP key ring → single signing key             |
//! | [`model`]     | Request-scoped registry records (versions, descriptors)   |
//! | [`error`]     | Per-subsystem error types                                 |
//!
//! ## Crate Policy
//!
//! - No I/O. Parsers take lines or byte slices handed to them by the
//!   store layer, which owns every network call.
//! - Nothing here is cached or shared across requests.

pub mod checksum;
pub mod codec;
pub mod error;
pub mod keyring;
pub mod model;
pub mod naming;

pub use checksum::ChecksumManifest;
pub use codec::{StoreFileId, VersionTriple};
pub use error::{ChecksumError, CodecError, DecodeFailures, KeyRingError};
pub use keyring::SigningKey;
pub use model::{
    ModuleVersion, Platform, ProviderAssetDescriptor, ProviderVersion, ProviderVersionSet,
    PROVIDER_PROTOCOLS,
};
pub use naming::{AssetRole, PackageKey};
