//! The four sites: identity, content binding and page behaviors.

mod coffee;
mod gaming;
pub mod markup;
mod portfolio;
mod tutor;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::content::schema::{
    CoffeeContent, GamingContent, PortfolioContent, SiteContent, TutorContent,
};
use crate::dom::{Document, DomError};
use crate::session::{Layout, Listener};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    Coffee,
    Gaming,
    Tutor,
    Portfolio,
}

impl SiteKind {
    pub const ALL: [SiteKind; 4] = [
        SiteKind::Coffee,
        SiteKind::Gaming,
        SiteKind::Tutor,
        SiteKind::Portfolio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SiteKind::Coffee => "coffee",
            SiteKind::Gaming => "gaming",
            SiteKind::Tutor => "tutor",
            SiteKind::Portfolio => "portfolio",
        }
    }

    /// Name of the content document the page fetches.
    pub fn content_file(&self) -> &'static str {
        match self {
            SiteKind::Coffee => CoffeeContent::FILE_NAME,
            SiteKind::Gaming => GamingContent::FILE_NAME,
            SiteKind::Tutor => TutorContent::FILE_NAME,
            SiteKind::Portfolio => PortfolioContent::FILE_NAME,
        }
    }

    /// Built-in page template.
    pub fn default_template(&self) -> &'static str {
        match self {
            SiteKind::Coffee => include_str!("../../sites/coffee/index.html"),
            SiteKind::Gaming => include_str!("../../sites/gaming/index.html"),
            SiteKind::Tutor => include_str!("../../sites/tutor/index.html"),
            SiteKind::Portfolio => include_str!("../../sites/portfolio/index.html"),
        }
    }
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SiteKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown site kind: {}", s))
    }
}

impl prefer::FromValue for SiteKind {
    fn from_value(value: &prefer::ConfigValue) -> prefer::Result<Self> {
        match value.as_str() {
            Some(s) => s.parse().map_err(|e: String| prefer::Error::ConversionError {
                key: String::new(),
                type_name: "SiteKind".to_string(),
                source: e.into(),
            }),
            None => Err(prefer::Error::ConversionError {
                key: String::new(),
                type_name: "SiteKind".to_string(),
                source: "expected string".into(),
            }),
        }
    }
}

/// A loaded, validated content document for one of the sites.
#[derive(Debug, Clone, PartialEq)]
pub enum PageContent {
    Coffee(CoffeeContent),
    Gaming(GamingContent),
    Tutor(TutorContent),
    Portfolio(PortfolioContent),
}

impl PageContent {
    pub fn kind(&self) -> SiteKind {
        match self {
            PageContent::Coffee(_) => SiteKind::Coffee,
            PageContent::Gaming(_) => SiteKind::Gaming,
            PageContent::Tutor(_) => SiteKind::Tutor,
            PageContent::Portfolio(_) => SiteKind::Portfolio,
        }
    }
}

/// Inputs population needs besides the content itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulateContext {
    pub today: NaiveDate,
    pub layout: Layout,
}

/// Listeners a page installs before its content arrives.
///
/// A template lacking one of their elements simply goes without that
/// behavior.
pub fn attach_before_load(site: SiteKind, doc: &Document) -> Vec<Box<dyn Listener>> {
    let attached = match site {
        SiteKind::Coffee => coffee::attach_before_load(doc),
        SiteKind::Portfolio => portfolio::attach_before_load(doc),
        SiteKind::Gaming | SiteKind::Tutor => Ok(Vec::new()),
    };
    attached.unwrap_or_else(|e| {
        tracing::warn!("{} page: {}", site, e);
        Vec::new()
    })
}

/// Bind `content` into `doc` section by section, returning the listeners the
/// populated page needs. The first failing section stops population.
pub fn populate(
    content: &PageContent,
    doc: &mut Document,
    cx: &PopulateContext,
) -> Result<Vec<Box<dyn Listener>>, DomError> {
    match content {
        PageContent::Coffee(c) => coffee::populate(c, doc),
        PageContent::Gaming(c) => gaming::populate(c, doc, cx),
        PageContent::Tutor(c) => tutor::populate(c, doc, cx),
        PageContent::Portfolio(c) => portfolio::populate(c, doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_kind_parse_and_display() {
        assert_eq!("Tutor".parse::<SiteKind>(), Ok(SiteKind::Tutor));
        assert!("bakery".parse::<SiteKind>().is_err());
        assert_eq!(SiteKind::Portfolio.to_string(), "portfolio");
        assert_eq!(SiteKind::Portfolio.content_file(), "data.json");
        assert_eq!(SiteKind::Coffee.content_file(), "coffee-data.json");
    }

    #[test]
    fn test_default_templates_parse() {
        for kind in SiteKind::ALL {
            let doc = Document::parse(kind.default_template());
            assert!(doc.body().is_ok(), "{}", kind);
        }
    }
}
