//! showcase - content-driven page binding for small static marketing sites.
//!
//! Each site pairs a fixed HTML template with one JSON content document. The
//! crate loads and validates the document, binds it into the template, and
//! replays the page's interactive behaviors headlessly.

pub mod cli;
pub mod config;
pub mod content;
pub mod dom;
pub mod server;
pub mod session;
pub mod sites;
pub mod utils;
pub mod widgets;
