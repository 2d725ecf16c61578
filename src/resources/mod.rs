//! Typed endpoint wrappers over [`ApiClient`](crate::infra::api::ApiClient).
//!
//! Each file defines one trait per backend resource and implements it for
//! `ApiClient`, so call sites read `client.novel(&id)` once the trait is in
//! scope.

pub mod auth;
pub mod chapters;
pub mod comments;
pub mod folders;
pub mod novels;
pub mod reviews;
pub mod taxonomy;
pub mod users;

pub use auth::AuthClient;
pub use chapters::ChapterClient;
pub use comments::CommentClient;
pub use folders::FolderClient;
pub use novels::NovelClient;
pub use reviews::ReviewClient;
pub use taxonomy::TaxonomyClient;
pub use users::UserClient;

use std::fmt::Display;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Encode a value for use as one URL path segment.
pub(crate) fn segment(value: impl Display) -> String {
    utf8_percent_encode(&value.to_string(), SEGMENT).to_string()
}
