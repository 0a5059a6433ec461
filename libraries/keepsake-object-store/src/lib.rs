//! Keepsake Object Store
//!
//! Implementations of [`keepsake_core::ObjectStore`]:
//!
//! - [`LocalObjectStore`]: one directory per bucket under a filesystem root;
//!   signed URLs point back at the server's `/api/objects` route and carry a
//!   token issued by [`UrlSigner`].
//! - [`RemoteObjectStore`]: REST client for a hosted storage service that
//!   issues its own signed URLs.
//!
//! Object keys are always normalized before use; absolute keys and `..`
//! segments are rejected with [`ObjectStoreError::InvalidPath`].

pub mod error;
pub mod local;
pub mod path;
pub mod remote;
pub mod signer;

pub use error::{ObjectStoreError, Result};
pub use local::LocalObjectStore;
pub use remote::RemoteObjectStore;
pub use signer::UrlSigner;
