//! Coffee shop page: header, story, filterable menu and contact details.

use askama::Template;

use super::markup::{FilterButton, MenuItemCard};
use crate::content::schema::{CoffeeContent, MenuItem};
use crate::dom::{selector, Document, DomError, NodeId, Selector};
use crate::session::{EventContext, Listener, UiEvent};
use crate::utils::css_string_escape;
use crate::widgets::menu_filter::{capitalize, ALL_CATEGORIES};
use crate::widgets::scroll::back_to_top_visible;
use crate::widgets::MenuFilter;

pub(super) fn attach_before_load(doc: &Document) -> Result<Vec<Box<dyn Listener>>, DomError> {
    let button = doc.by_id("back-to-top")?;
    Ok(vec![Box::new(BackToTop { button })])
}

pub(super) fn populate(
    content: &CoffeeContent,
    doc: &mut Document,
) -> Result<Vec<Box<dyn Listener>>, DomError> {
    let mut listeners: Vec<Box<dyn Listener>> = Vec::new();

    if let Some(header) = &content.header {
        doc.set_text_by_id("header-title", &header.title)?;
        doc.set_text_by_id("header-tagline", &header.tagline)?;
        if let Some(image) = header.background_image.as_deref().filter(|s| !s.is_empty()) {
            doc.append_css_rule(&header_background_rule(image))?;
        }
    }

    if let Some(about) = &content.about {
        doc.set_text_by_id("about-title", &about.title)?;
        doc.set_text_by_id("about-story", &about.story_text)?;
    }

    if let Some(menu) = &content.menu {
        doc.set_text_by_id("menu-title", &menu.title)?;

        let filters = doc.by_id("menu-filters")?;
        for category in menu.categories() {
            let button = FilterButton {
                category,
                label: &capitalize(category),
                active: category == ALL_CATEGORIES,
            };
            doc.append_html(filters, &button.render()?)?;
        }

        let grid = doc.by_id("menu-grid")?;
        render_items(doc, grid, menu.items.iter())?;

        listeners.push(Box::new(MenuListener {
            filters,
            grid,
            button: selector("button")?,
            active: selector(".active")?,
            filter: MenuFilter::new(menu.categories().to_vec()),
            items: menu.items.clone(),
        }));
    }

    if let Some(contact) = &content.contact {
        doc.set_text_by_id("contact-title", &contact.title)?;
        doc.set_text_by_id("contact-address", &contact.address)?;
        doc.set_text_by_id("contact-hours", &contact.hours)?;
    }

    Ok(listeners)
}

/// Stylesheet rule placing `images/<image>` behind the darkened header.
pub(super) fn header_background_rule(image: &str) -> String {
    format!(
        "header::before {{ background-image: linear-gradient(rgba(0,0,0,0.5), rgba(0,0,0,0.5)), url('{}'); }}",
        css_string_escape(&format!("images/{}", image))
    )
}

fn render_items<'a>(
    doc: &mut Document,
    grid: NodeId,
    items: impl Iterator<Item = &'a MenuItem>,
) -> Result<(), DomError> {
    doc.clear_children(grid);
    for item in items {
        doc.append_html(grid, &MenuItemCard { item }.render()?)?;
    }
    Ok(())
}

/// Filter buttons re-rendering the grid from the full item list.
#[derive(Debug)]
struct MenuListener {
    filters: NodeId,
    grid: NodeId,
    button: Selector,
    active: Selector,
    filter: MenuFilter,
    items: Vec<MenuItem>,
}

impl Listener for MenuListener {
    fn handle(&mut self, event: &UiEvent, cx: &mut EventContext<'_>) -> Result<(), DomError> {
        let UiEvent::Click(target) = *event else {
            return Ok(());
        };
        if !cx.doc.is_inclusive_descendant(target, self.filters) {
            return Ok(());
        }
        // Clicks on a label's text land on the text node inside the button.
        let Some(button) = cx
            .doc
            .closest(target, &self.button)
            .filter(|b| *b != self.filters && cx.doc.is_inclusive_descendant(*b, self.filters))
        else {
            return Ok(());
        };
        let Some(category) = cx.doc.attr(button, "data-category").map(str::to_string) else {
            return Ok(());
        };
        if !self.filter.select(&category) {
            return Ok(());
        }

        for active in cx.doc.find_all_within(self.filters, &self.active) {
            cx.doc.remove_class(active, "active")?;
        }
        cx.doc.add_class(button, "active")?;

        render_items(cx.doc, self.grid, self.filter.visible(&self.items).into_iter())
    }
}

#[derive(Debug)]
struct BackToTop {
    button: NodeId,
}

impl Listener for BackToTop {
    fn handle(&mut self, event: &UiEvent, cx: &mut EventContext<'_>) -> Result<(), DomError> {
        if let UiEvent::Scroll(metrics) = event {
            cx.doc
                .set_class(self.button, "visible", back_to_top_visible(metrics))?;
        }
        Ok(())
    }
}
