//! Askama template structs for the server's own pages.

use askama::Template;

/// Row in the site index.
pub struct SiteRow {
    pub name: String,
    pub kind: String,
    pub href: String,
}

/// Index of configured sites.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub title: &'a str,
    pub sites: Vec<SiteRow>,
}
