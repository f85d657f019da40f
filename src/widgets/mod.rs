//! Interactive page widgets as plain state machines.
//!
//! Nothing in here touches the document; listeners in [`crate::sites`] apply
//! these transitions to the DOM.

pub mod accordion;
pub mod carousel;
pub mod counter;
pub mod effects;
pub mod events;
pub mod menu_filter;
pub mod observer;
pub mod scroll;

pub use accordion::Accordion;
pub use carousel::Carousel;
pub use counter::StatsCounter;
pub use menu_filter::MenuFilter;
pub use observer::OnceObserver;
pub use scroll::ScrollMetrics;
