//! Tutoring page: subjects, animated stats, testimonial carousel and FAQ.

use askama::Template;

use super::markup::{FaqEntry, StatItem, SubjectCard, TestimonialSlide};
use super::PopulateContext;
use crate::content::schema::TutorContent;
use crate::dom::{selector, Document, DomError, NodeId, Selector};
use crate::session::{EventContext, Listener, TimerControl, TimerTask, UiEvent};
use crate::widgets::observer::STATS_THRESHOLD;
use crate::widgets::scroll::is_sticky;
use crate::widgets::{Accordion, Carousel, OnceObserver, StatsCounter};

pub(super) fn populate(
    content: &TutorContent,
    doc: &mut Document,
    cx: &PopulateContext,
) -> Result<Vec<Box<dyn Listener>>, DomError> {
    populate_static(content, doc)?;

    let mut listeners: Vec<Box<dyn Listener>> = Vec::new();
    listeners.push(Box::new(StickyNav {
        navbar: doc.by_id("navbar")?,
        offset_top: cx.layout.nav_offset_top,
    }));

    if let Some(stats) = &content.stats {
        let grid = doc.by_id("stats-grid")?;
        doc.clear_children(grid);
        for stat in &stats.items {
            let item = StatItem {
                number: stat.number,
                label: &stat.label,
                suffix: stat.suffix.as_deref().unwrap_or(""),
            };
            doc.append_html(grid, &item.render()?)?;
        }
        let items = doc.find_all_within(grid, &selector(".stat-item")?);
        listeners.push(Box::new(StatsListener {
            observer: OnceObserver::new(STATS_THRESHOLD, items),
            number: selector(".stat-number")?,
        }));
    }

    if let Some(testimonials) = &content.testimonials {
        let slider = doc.by_id("testimonial-slider")?;
        doc.clear_children(slider);
        for review in &testimonials.reviews {
            doc.append_html(slider, &TestimonialSlide { review }.render()?)?;
        }
        listeners.push(Box::new(CarouselListener {
            slider,
            next: doc.by_id("next-btn")?,
            prev: doc.by_id("prev-btn")?,
            carousel: Carousel::new(doc.element_children(slider).len()),
        }));
    }

    if let Some(faq) = &content.faq {
        let accordion = doc.by_id("faq-accordion")?;
        doc.clear_children(accordion);
        for item in &faq.items {
            doc.append_html(accordion, &FaqEntry { item }.render()?)?;
        }
        let items = doc.find_all_within(accordion, &selector(".faq-item")?);
        listeners.push(Box::new(AccordionListener {
            root: accordion,
            question: selector(".faq-question")?,
            answer: selector(".faq-answer")?,
            state: Accordion::new(items.len()),
            items,
        }));
    }

    Ok(listeners)
}

fn populate_static(content: &TutorContent, doc: &mut Document) -> Result<(), DomError> {
    if let Some(logo) = &content.logo_text {
        doc.set_text_by_id("logo-text", logo)?;
    }

    if let Some(header) = &content.header {
        doc.set_text_by_id("header-title", &header.title)?;
        doc.set_text_by_id("header-tagline", &header.tagline)?;
        if let Some(cta) = &header.cta_button_text {
            doc.set_text_by_id("header-cta", cta)?;
        }
    }

    if let Some(subjects) = &content.subjects {
        doc.set_text_by_id("subjects-title", &subjects.title)?;
        let grid = doc.by_id("subjects-grid")?;
        doc.clear_children(grid);
        for subject in &subjects.items {
            doc.append_html(grid, &SubjectCard { subject }.render()?)?;
        }
    }

    if let Some(testimonials) = &content.testimonials {
        doc.set_text_by_id("testimonials-title", &testimonials.title)?;
    }
    if let Some(faq) = &content.faq {
        doc.set_text_by_id("faq-title", &faq.title)?;
    }

    if let Some(contact) = &content.contact {
        doc.set_text_by_id("contact-title", &contact.title)?;
        doc.set_text_by_id("contact-tagline", &contact.tagline)?;
        doc.set_text_by_id("contact-email", &contact.email)?;
    }
    Ok(())
}

#[derive(Debug)]
struct StickyNav {
    navbar: NodeId,
    offset_top: f64,
}

impl Listener for StickyNav {
    fn handle(&mut self, event: &UiEvent, cx: &mut EventContext<'_>) -> Result<(), DomError> {
        if let UiEvent::Scroll(metrics) = event {
            cx.doc
                .set_class(self.navbar, "sticky", is_sticky(metrics, self.offset_top))?;
        }
        Ok(())
    }
}

/// Starts one counter per stat item the first time it is half visible.
#[derive(Debug)]
struct StatsListener {
    observer: OnceObserver,
    number: Selector,
}

impl Listener for StatsListener {
    fn handle(&mut self, event: &UiEvent, cx: &mut EventContext<'_>) -> Result<(), DomError> {
        let UiEvent::Intersect { target, ratio } = *event else {
            return Ok(());
        };
        if !self.observer.observe(target, ratio) {
            return Ok(());
        }

        let Some(number) = cx.doc.find_within(target, &self.number) else {
            return Ok(());
        };
        let target_value = cx
            .doc
            .attr(number, "data-target")
            .and_then(|t| t.trim().parse::<u64>().ok())
            .unwrap_or(0);

        let counter = StatsCounter::new(target_value);
        cx.timers.set_interval(
            counter.step_interval(),
            Box::new(CounterTask {
                element: number,
                counter,
            }),
        );
        Ok(())
    }
}

#[derive(Debug)]
struct CounterTask {
    element: NodeId,
    counter: StatsCounter,
}

impl TimerTask for CounterTask {
    fn fire(&mut self, doc: &mut Document) -> Result<TimerControl, DomError> {
        let value = self.counter.tick();
        doc.set_text(self.element, &value.to_string())?;
        Ok(if self.counter.is_finished() {
            TimerControl::Cancel
        } else {
            TimerControl::Continue
        })
    }
}

#[derive(Debug)]
struct CarouselListener {
    slider: NodeId,
    next: NodeId,
    prev: NodeId,
    carousel: Carousel,
}

impl Listener for CarouselListener {
    fn handle(&mut self, event: &UiEvent, cx: &mut EventContext<'_>) -> Result<(), DomError> {
        let UiEvent::Click(target) = *event else {
            return Ok(());
        };
        if cx.doc.is_inclusive_descendant(target, self.next) {
            self.carousel.next();
        } else if cx.doc.is_inclusive_descendant(target, self.prev) {
            self.carousel.prev();
        } else {
            return Ok(());
        }
        if self.carousel.is_empty() {
            return Ok(());
        }
        cx.doc
            .set_style(self.slider, "transform", Some(&self.carousel.transform()))
    }
}

#[derive(Debug)]
struct AccordionListener {
    root: NodeId,
    question: Selector,
    answer: Selector,
    items: Vec<NodeId>,
    state: Accordion,
}

impl Listener for AccordionListener {
    fn handle(&mut self, event: &UiEvent, cx: &mut EventContext<'_>) -> Result<(), DomError> {
        let UiEvent::Click(target) = *event else {
            return Ok(());
        };
        if !cx.doc.is_inclusive_descendant(target, self.root) {
            return Ok(());
        }
        let Some(question) = cx.doc.closest(target, &self.question) else {
            return Ok(());
        };
        let Some(index) = self
            .items
            .iter()
            .position(|item| cx.doc.parent(question) == Some(*item))
        else {
            return Ok(());
        };

        let open = self.state.toggle(index);
        for (i, item) in self.items.iter().enumerate() {
            let is_open = open == Some(i);
            cx.doc.set_class(*item, "active", is_open)?;
            if let Some(answer) = cx.doc.find_within(*item, &self.answer) {
                // No layout to measure, so an open answer is unconstrained.
                cx.doc
                    .set_style(answer, "max-height", is_open.then_some("none"))?;
            }
        }
        Ok(())
    }
}
