//! Shared types and pure logic for the Pexels gallery tool: request shaping,
//! response normalization, the tool envelope, and the tolerant decoder the
//! widget uses to recover a result from whatever wrapping the host delivers.

pub mod envelope;
pub mod error;
pub mod gallery;
pub mod panel;
pub mod photos;
pub mod request;
pub mod response;

#[cfg(test)]
mod test_support;

pub use error::{SearchError, ValidationError};
pub use gallery::{GalleryState, decode_tool_output};
pub use photos::{Photo, PhotoSource, SearchFailure, SearchResult, SearchSuccess};
pub use request::{SearchPhotosInput, SearchRequest};
pub use response::{MalformedPage, normalize_response};
