//! Askama fragments for generated list markup.
//!
//! Every interpolated value goes through askama's HTML escaping, so content
//! strings can never introduce markup of their own.

use askama::Template;

use crate::content::schema::{FaqItem, MenuItem, Project, Review, Subject};

#[derive(Template)]
#[template(path = "fragments/filter_button.html")]
pub struct FilterButton<'a> {
    pub category: &'a str,
    pub label: &'a str,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "fragments/menu_item.html")]
pub struct MenuItemCard<'a> {
    pub item: &'a MenuItem,
}

#[derive(Template)]
#[template(path = "fragments/event_item.html")]
pub struct EventCard<'a> {
    pub title: &'a str,
    pub date: &'a str,
    pub info: &'a str,
    pub finished: bool,
}

#[derive(Template)]
#[template(path = "fragments/subject_card.html")]
pub struct SubjectCard<'a> {
    pub subject: &'a Subject,
}

#[derive(Template)]
#[template(path = "fragments/stat_item.html")]
pub struct StatItem<'a> {
    pub number: u64,
    pub label: &'a str,
    pub suffix: &'a str,
}

#[derive(Template)]
#[template(path = "fragments/testimonial_slide.html")]
pub struct TestimonialSlide<'a> {
    pub review: &'a Review,
}

#[derive(Template)]
#[template(path = "fragments/faq_item.html")]
pub struct FaqEntry<'a> {
    pub item: &'a FaqItem,
}

#[derive(Template)]
#[template(path = "fragments/portfolio_tile.html")]
pub struct PortfolioTile<'a> {
    pub project: &'a Project,
}

/// Fixed closing tile of the portfolio grid.
#[derive(Template)]
#[template(path = "fragments/portfolio_placeholder.html")]
pub struct PortfolioPlaceholder;
