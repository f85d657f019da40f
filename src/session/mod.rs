//! Headless page session.
//!
//! A session owns one populated document together with the listeners and
//! timers the page installed. Events and clock advances are applied in order
//! through `&mut self`, mirroring a browser's single event loop.

mod timers;

pub use timers::{TimerControl, TimerId, TimerQueue, TimerTask, MIN_INTERVAL};

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;

use crate::content::{ContentLoader, ContentLocation, LoadError};
use crate::dom::{selector, Document, DomError, NodeId};
use crate::sites::{self, PageContent, PopulateContext, SiteKind};
use crate::widgets::ScrollMetrics;

/// Input delivered to a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    Click(NodeId),
    Scroll(ScrollMetrics),
    /// An observed element's visible fraction changed.
    Intersect { target: NodeId, ratio: f64 },
}

/// What a listener may touch while handling an event.
pub struct EventContext<'a> {
    pub doc: &'a mut Document,
    pub timers: &'a mut TimerQueue,
}

/// A page behavior reacting to events.
pub trait Listener: fmt::Debug + Send {
    fn handle(&mut self, event: &UiEvent, cx: &mut EventContext<'_>) -> Result<(), DomError>;
}

/// Layout facts a headless document cannot compute itself.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    /// Initial top offset of the tutor navigation bar.
    pub nav_offset_top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    /// Date used to decide which events are finished.
    pub today: NaiveDate,
    pub layout: Layout,
}

impl SessionOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            layout: Layout::default(),
        }
    }

    /// Options for the local calendar date.
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

#[derive(Debug)]
pub struct PageSession {
    site: SiteKind,
    doc: Document,
    listeners: Vec<Box<dyn Listener>>,
    timers: TimerQueue,
    populated: bool,
    error: Option<String>,
}

impl PageSession {
    /// Build a page from its template and the outcome of its content load.
    ///
    /// Listeners that do not depend on content are attached first. On a load
    /// or population failure the error is logged and the document stays
    /// exactly as the template had it.
    pub fn open(
        site: SiteKind,
        template: &str,
        loaded: Result<PageContent, LoadError>,
        options: SessionOptions,
    ) -> Self {
        let doc = Document::parse(template);
        let listeners = sites::attach_before_load(site, &doc);
        let mut session = Self {
            site,
            doc,
            listeners,
            timers: TimerQueue::new(),
            populated: false,
            error: None,
        };

        let content = match loaded {
            Ok(content) if content.kind() == site => content,
            Ok(content) => {
                session.fail(format!(
                    "{} content cannot populate the {} page",
                    content.kind(),
                    site
                ));
                return session;
            }
            Err(e) => {
                session.fail(e.to_string());
                return session;
            }
        };

        let cx = PopulateContext {
            today: options.today,
            layout: options.layout,
        };
        let mut scratch = session.doc.clone();
        match sites::populate(&content, &mut scratch, &cx) {
            Ok(listeners) => {
                session.doc = scratch;
                session.listeners.extend(listeners);
                session.populated = true;
                tracing::debug!(
                    "Populated {} page with {} listeners",
                    site,
                    session.listeners.len()
                );
            }
            Err(e) => session.fail(e.to_string()),
        }
        session
    }

    /// Fetch the site's content relative to `page` and open the session.
    pub async fn load(
        site: SiteKind,
        template: &str,
        loader: &ContentLoader,
        page: &ContentLocation,
        options: SessionOptions,
    ) -> Self {
        let loaded = match page.relative_to(site.content_file()) {
            Ok(location) => loader.load_for(site, &location).await,
            Err(e) => Err(e),
        };
        Self::open(site, template, loaded, options)
    }

    fn fail(&mut self, message: String) {
        tracing::error!("Could not load page data: {}", message);
        self.error = Some(message);
    }

    pub fn site(&self) -> SiteKind {
        self.site
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Whether content was bound into the template.
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Why population did not happen, if it did not.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Deliver one event to every listener in attachment order.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<(), DomError> {
        let mut cx = EventContext {
            doc: &mut self.doc,
            timers: &mut self.timers,
        };
        for listener in &mut self.listeners {
            listener.handle(&event, &mut cx)?;
        }
        Ok(())
    }

    /// Let `by` of virtual time pass.
    pub fn advance(&mut self, by: Duration) -> Result<usize, DomError> {
        self.timers.advance(by, &mut self.doc)
    }

    /// Click the first element matching the CSS selector `css`.
    pub fn click(&mut self, css: &str) -> Result<(), DomError> {
        let target = self
            .doc
            .find(&selector(css)?)
            .ok_or_else(|| DomError::NoMatch(css.to_string()))?;
        self.dispatch(UiEvent::Click(target))
    }

    pub fn scroll(&mut self, metrics: ScrollMetrics) -> Result<(), DomError> {
        self.dispatch(UiEvent::Scroll(metrics))
    }

    /// Report every element matching `css` as intersecting at `ratio`.
    pub fn intersect(&mut self, css: &str, ratio: f64) -> Result<usize, DomError> {
        let targets = self.doc.select(css)?;
        for target in &targets {
            self.dispatch(UiEvent::Intersect {
                target: *target,
                ratio,
            })?;
        }
        Ok(targets.len())
    }

    pub fn to_html(&self) -> String {
        self.doc.to_html()
    }
}
