//! Sanctions reference: legacy file decoding, amendment index and the shared
//! in-memory store.

pub mod decode;
mod error;
pub mod index;
pub mod parse;
mod reference;

pub use error::StoreError;
pub use index::ReferenceIndex;
pub use reference::{DEFAULT_REFERENCE_FILE, ReferenceStatus, ReferenceStore};
