//! Typed content documents for each site.
//!
//! Every top-level section is optional and text fields default to empty, so a
//! document only needs the sections its page should show. Semantic checks run
//! in [`SiteContent::prepare`] before any population happens.

use std::collections::HashSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

use super::validate::ValidationReport;
use crate::widgets::menu_filter::ALL_CATEGORIES;

/// A content document that can be loaded for a site.
pub trait SiteContent: DeserializeOwned + Send + Sized {
    /// File name the page fetches, relative to itself.
    const FILE_NAME: &'static str;

    /// Normalize derived fields and record problems that should fail the load.
    fn prepare(&mut self, report: &mut ValidationReport);
}

/// Header shared by the coffee, gaming and tutor pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    /// Coffee: image file under `images/` used behind the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Tutor: call-to-action button label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_button_text: Option<String>,
}

// ---------------------------------------------------------------------------
// Coffee
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoffeeContent {
    #[serde(default)]
    pub header: Option<Header>,
    #[serde(default)]
    pub about: Option<CoffeeAbout>,
    #[serde(default)]
    pub menu: Option<Menu>,
    #[serde(default)]
    pub contact: Option<CoffeeContact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeAbout {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub story_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub title: String,
    /// Filter categories; derived from the items when absent.
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl Menu {
    /// Categories after [`SiteContent::prepare`], `all` first.
    pub fn categories(&self) -> &[String] {
        self.categories.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoffeeContact {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub hours: String,
}

impl SiteContent for CoffeeContent {
    const FILE_NAME: &'static str = "coffee-data.json";

    fn prepare(&mut self, report: &mut ValidationReport) {
        let Some(menu) = self.menu.as_mut() else {
            return;
        };

        let mut categories = match menu.categories.take() {
            Some(listed) => {
                let mut seen = HashSet::new();
                for (i, category) in listed.iter().enumerate() {
                    if category.trim().is_empty() {
                        report.push(format!("menu.categories[{}]", i), "category is empty");
                    } else if !seen.insert(category.as_str()) {
                        report.push(
                            format!("menu.categories[{}]", i),
                            format!("duplicate category {:?}", category),
                        );
                    }
                }
                for (i, item) in menu.items.iter().enumerate() {
                    if item.category != ALL_CATEGORIES && !seen.contains(item.category.as_str()) {
                        report.push(
                            format!("menu.items[{}].category", i),
                            format!("{:?} is not a listed category", item.category),
                        );
                    }
                }
                listed
            }
            None => {
                let mut derived: Vec<String> = Vec::new();
                for item in &menu.items {
                    if !item.category.is_empty() && !derived.contains(&item.category) {
                        derived.push(item.category.clone());
                    }
                }
                derived
            }
        };

        categories.retain(|c| c != ALL_CATEGORIES);
        categories.insert(0, ALL_CATEGORIES.to_string());
        menu.categories = Some(categories);
    }
}

// ---------------------------------------------------------------------------
// Gaming
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamingContent {
    #[serde(default)]
    pub header: Option<Header>,
    #[serde(default)]
    pub about: Option<GamingAbout>,
    #[serde(default)]
    pub events: Option<Events>,
    #[serde(default)]
    pub join: Option<Join>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamingAbout {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Events {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<EventItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventItem {
    #[serde(default)]
    pub title: String,
    pub date: EventDate,
    /// Free-form schedule note shown as "Info".
    #[serde(default)]
    pub time: String,
}

/// Event start, parsed from `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM[:SS]`.
///
/// Date-only values mean midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventDate(NaiveDateTime);

impl EventDate {
    pub fn at(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }
}

impl TryFrom<String> for EventDate {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for EventDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
            if let Ok(at) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(EventDate(at));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|d| EventDate(d.and_time(chrono::NaiveTime::MIN)))
            .map_err(|_| format!("invalid event date {:?}, expected YYYY-MM-DD", s))
    }
}

impl From<EventDate> for String {
    fn from(value: EventDate) -> Self {
        value.to_string()
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.time() == chrono::NaiveTime::MIN {
            write!(f, "{}", self.0.format("%Y-%m-%d"))
        } else {
            write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Join {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub button_text: String,
    #[serde(default)]
    pub button_link: String,
}

impl SiteContent for GamingContent {
    const FILE_NAME: &'static str = "gaming-data.json";

    fn prepare(&mut self, report: &mut ValidationReport) {
        if let Some(join) = &self.join {
            check_link(report, "join.buttonLink", &join.button_link);
        }
    }
}

// ---------------------------------------------------------------------------
// Tutor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorContent {
    #[serde(default)]
    pub logo_text: Option<String>,
    #[serde(default)]
    pub header: Option<Header>,
    #[serde(default)]
    pub subjects: Option<Subjects>,
    #[serde(default)]
    pub stats: Option<Stats>,
    #[serde(default)]
    pub testimonials: Option<Testimonials>,
    #[serde(default)]
    pub faq: Option<Faq>,
    #[serde(default)]
    pub contact: Option<TutorContact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subjects {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<Subject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub items: Vec<Stat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    #[serde(deserialize_with = "whole_number")]
    pub number: u64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub suffix: Option<String>,
}

/// Accepts `350` as well as `"350"`.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected a whole number, got {:?}", text))),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Testimonials {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TutorContact {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub email: String,
}

impl SiteContent for TutorContent {
    const FILE_NAME: &'static str = "tutor-data.json";

    fn prepare(&mut self, report: &mut ValidationReport) {
        if let Some(faq) = &self.faq {
            for (i, item) in faq.items.iter().enumerate() {
                if item.question.trim().is_empty() {
                    report.push(format!("faq.items[{}].question", i), "question is empty");
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioContent {
    #[serde(default)]
    pub personal_info: Option<PersonalInfo>,
    #[serde(default)]
    pub projects: Option<Vec<Project>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub about_me: String,
    #[serde(default)]
    pub portfolio_title: String,
    #[serde(default)]
    pub contact_title: String,
    #[serde(default)]
    pub contact_description: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub copyright_year: TextValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub live_site_url: String,
    #[serde(default)]
    pub image_tile: String,
    #[serde(default)]
    pub tile_description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Project {
    /// Links leaving the site open in a new tab.
    pub fn is_external(&self) -> bool {
        self.live_site_url.starts_with("http")
    }
}

/// A text field that authors sometimes write as a bare number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Number(serde_json::Number),
    Text(String),
    #[default]
    Empty,
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextValue::Number(n) => write!(f, "{}", n),
            TextValue::Text(s) => f.write_str(s),
            TextValue::Empty => Ok(()),
        }
    }
}

impl SiteContent for PortfolioContent {
    const FILE_NAME: &'static str = "data.json";

    fn prepare(&mut self, report: &mut ValidationReport) {
        for (i, project) in self.projects.iter().flatten().enumerate() {
            let path = format!("projects[{}].liveSiteUrl", i);
            if project.live_site_url.trim().is_empty() {
                report.push(path, "link is empty");
            } else {
                check_link(report, &path, &project.live_site_url);
            }
        }
    }
}

/// Reject script URLs in author-supplied links.
fn check_link(report: &mut ValidationReport, path: &str, link: &str) {
    let scheme = link.trim_start().to_ascii_lowercase();
    if scheme.starts_with("javascript:") || scheme.starts_with("vbscript:") {
        report.push(path.to_string(), "script URLs are not allowed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared<C: SiteContent>(json: &str) -> (C, ValidationReport) {
        let mut content: C = serde_json::from_str(json).unwrap();
        let mut report = ValidationReport::default();
        content.prepare(&mut report);
        (content, report)
    }

    #[test]
    fn test_categories_derived_from_items() {
        let (content, report) = prepared::<CoffeeContent>(
            r#"{"menu":{"items":[{"title":"Latte","category":"hot"},{"title":"Iced Tea","category":"cold"},{"title":"Mocha","category":"hot"}]}}"#,
        );
        assert!(report.is_empty());
        assert_eq!(
            content.menu.unwrap().categories(),
            ["all", "hot", "cold"].map(String::from)
        );
    }

    #[test]
    fn test_all_is_moved_to_front() {
        let (content, report) = prepared::<CoffeeContent>(
            r#"{"menu":{"categories":["hot","all","cold"],"items":[]}}"#,
        );
        assert!(report.is_empty());
        assert_eq!(
            content.menu.unwrap().categories(),
            ["all", "hot", "cold"].map(String::from)
        );
    }

    #[test]
    fn test_category_problems_are_reported() {
        let (_, report) = prepared::<CoffeeContent>(
            r#"{"menu":{"categories":["all","hot","hot",""],"items":[{"title":"Tea","category":"cold"}]}}"#,
        );
        assert_eq!(report.problems().len(), 3);
        assert!(report.to_string().contains("duplicate category"));
        assert!(report.to_string().contains("menu.items[0].category"));
    }

    #[test]
    fn test_event_dates() {
        let date: EventDate = "2024-08-15".parse().unwrap();
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2024, 8, 15).unwrap());
        assert_eq!(date.to_string(), "2024-08-15");

        let with_time: EventDate = "2024-08-15T19:30".parse().unwrap();
        assert!(with_time > date);
        assert!("15/08/2024".parse::<EventDate>().is_err());
    }

    #[test]
    fn test_invalid_event_date_fails_parse() {
        let result: Result<GamingContent, _> = serde_json::from_str(
            r#"{"events":{"items":[{"title":"LAN","date":"soon","time":"7pm"}]}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_copyright_year_accepts_number_or_text() {
        let (content, _) = prepared::<PortfolioContent>(
            r#"{"personalInfo":{"name":"Ada","copyrightYear":2025}}"#,
        );
        assert_eq!(content.personal_info.unwrap().copyright_year.to_string(), "2025");

        let (content, _) = prepared::<PortfolioContent>(
            r#"{"personalInfo":{"name":"Ada","copyrightYear":"2024-2025"}}"#,
        );
        assert_eq!(
            content.personal_info.unwrap().copyright_year.to_string(),
            "2024-2025"
        );
    }

    #[test]
    fn test_stat_number_accepts_numeric_text() {
        let (content, _) = prepared::<TutorContent>(
            r#"{"stats":{"items":[{"number":350},{"number":" 98 "}]}}"#,
        );
        let numbers: Vec<u64> = content.stats.unwrap().items.iter().map(|s| s.number).collect();
        assert_eq!(numbers, [350, 98]);

        let err = serde_json::from_str::<TutorContent>(r#"{"stats":{"items":[{"number":"many"}]}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("expected a whole number"));
    }

    #[test]
    fn test_script_links_rejected() {
        let (_, report) = prepared::<PortfolioContent>(
            r#"{"projects":[{"title":"X","liveSiteUrl":"javascript:alert(1)"},{"title":"Y","liveSiteUrl":""}]}"#,
        );
        assert_eq!(report.problems().len(), 2);
    }
}
