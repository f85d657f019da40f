//! Personal portfolio: about text, project tiles, parallax and reveal effects.

use askama::Template;

use super::markup::{PortfolioPlaceholder, PortfolioTile};
use crate::content::schema::PortfolioContent;
use crate::dom::{selector, Document, DomError, NodeId};
use crate::session::{EventContext, Listener, UiEvent};
use crate::widgets::effects::tilt_script;
use crate::widgets::observer::REVEAL_THRESHOLD;
use crate::widgets::scroll::parallax_position;
use crate::widgets::OnceObserver;

pub(super) fn attach_before_load(doc: &Document) -> Result<Vec<Box<dyn Listener>>, DomError> {
    let body = doc.body()?;
    let reveal = doc.find_all(&selector(".reveal")?);
    Ok(vec![
        Box::new(Parallax { body }),
        Box::new(Reveal {
            observer: OnceObserver::new(REVEAL_THRESHOLD, reveal),
        }),
    ])
}

pub(super) fn populate(
    content: &PortfolioContent,
    doc: &mut Document,
) -> Result<Vec<Box<dyn Listener>>, DomError> {
    if let Some(info) = &content.personal_info {
        doc.set_text_by_id("about-heading", &format!("Hi, I'm {}!", info.name))?;
        doc.set_text_by_id("about-me-p", &info.about_me)?;
        doc.set_text_by_id(
            "title-tag",
            &format!("{} | Web Development Portfolio", info.name),
        )?;
        doc.set_text_by_id("portfolio-title", &info.portfolio_title)?;
        doc.set_text_by_id("contact-title", &info.contact_title)?;
        doc.set_text_by_id("contact-description", &info.contact_description)?;

        let link = doc.by_id("contact-email-link")?;
        doc.set_attr(link, "href", &format!("mailto:{}", info.email))?;
        doc.set_text_by_id("contact-email-text", &info.email)?;

        doc.set_text_by_id("copyright-year", &info.copyright_year.to_string())?;
        doc.set_text_by_id("copyright-name", &info.name)?;
    }

    if let Some(projects) = &content.projects {
        let grid = doc.by_id("portfolio-grid")?;
        doc.clear_children(grid);
        for project in projects {
            doc.append_html(grid, &PortfolioTile { project }.render()?)?;
        }
        doc.append_html(grid, &PortfolioPlaceholder.render()?)?;
        doc.append_body_script(&tilt_script())?;
    }

    Ok(Vec::new())
}

/// Moves the body background with the scroll position.
#[derive(Debug)]
struct Parallax {
    body: NodeId,
}

impl Listener for Parallax {
    fn handle(&mut self, event: &UiEvent, cx: &mut EventContext<'_>) -> Result<(), DomError> {
        if let UiEvent::Scroll(metrics) = event {
            if let Some(position) = parallax_position(metrics) {
                cx.doc
                    .set_style(self.body, "background-position", Some(&position))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
struct Reveal {
    observer: OnceObserver,
}

impl Listener for Reveal {
    fn handle(&mut self, event: &UiEvent, cx: &mut EventContext<'_>) -> Result<(), DomError> {
        if let UiEvent::Intersect { target, ratio } = *event {
            if self.observer.observe(target, ratio) {
                cx.doc.add_class(target, "visible")?;
            }
        }
        Ok(())
    }
}
