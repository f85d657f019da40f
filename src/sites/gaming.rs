//! Gaming community page: events list and particle background.

use askama::Template;

use super::markup::EventCard;
use super::PopulateContext;
use crate::content::schema::GamingContent;
use crate::dom::{Document, DomError};
use crate::session::Listener;
use crate::widgets::effects::{particles_script, PARTICLES_CONTAINER};
use crate::widgets::events::{format_event_date, is_finished, sorted_events};

pub(super) fn populate(
    content: &GamingContent,
    doc: &mut Document,
    cx: &PopulateContext,
) -> Result<Vec<Box<dyn Listener>>, DomError> {
    if let Some(header) = &content.header {
        doc.set_text_by_id("header-title", &header.title)?;
        doc.set_text_by_id("header-tagline", &header.tagline)?;
    }

    if let Some(about) = &content.about {
        doc.set_text_by_id("about-title", &about.title)?;
        doc.set_text_by_id("about-text", &about.text)?;
    }

    if let Some(join) = &content.join {
        doc.set_text_by_id("join-title", &join.title)?;
        doc.set_text_by_id("join-text", &join.text)?;
        let button = doc.by_id("join-button")?;
        doc.set_text(button, &join.button_text)?;
        doc.set_attr(button, "href", &join.button_link)?;
    }

    if let Some(events) = &content.events {
        doc.set_text_by_id("events-title", &events.title)?;
        let list = doc.by_id("events-list")?;
        doc.clear_children(list);
        for event in sorted_events(&events.items) {
            let card = EventCard {
                title: &event.title,
                date: &format_event_date(event.date.at()),
                info: &event.time,
                finished: is_finished(event.date.at(), cx.today),
            };
            doc.append_html(list, &card.render()?)?;
        }
    }

    doc.by_id(PARTICLES_CONTAINER)?;
    doc.append_body_script(&particles_script())?;

    Ok(Vec::new())
}
