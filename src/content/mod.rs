//! Content documents: schemas, validation and loading.
//!
//! A page fetches exactly one JSON document, decodes it into its site schema
//! and validates it before anything touches the template.

mod error;
pub mod http_client;
mod loader;
pub mod schema;
mod validate;

pub use error::LoadError;
pub use http_client::HttpClient;
pub use loader::{parse_content, ContentLoader, ContentLocation};
pub use schema::SiteContent;
pub use validate::{Problem, ValidationReport};
