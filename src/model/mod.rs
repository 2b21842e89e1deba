//! Typed records mapping the API's JSON resources.
//!
//! Decoding is tolerant: optional fields default rather than failing the
//! whole payload, and unknown enum values decode to catch-all variants so
//! new API features do not break existing clients.

mod asset;
mod folder;
mod video;

pub use asset::Asset;
pub use folder::Folder;
pub use video::{Video, VideoStatus};
