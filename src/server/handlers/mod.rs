//! HTTP request handlers for the web server.

mod sites;
mod static_files;

pub use sites::{index, site_file, site_root};
