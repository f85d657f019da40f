//! Scroll-driven effects.

use serde::{Deserialize, Serialize};

/// Offset past which the back-to-top button shows.
pub const BACK_TO_TOP_OFFSET: f64 = 300.0;

/// Viewport state reported with a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollMetrics {
    /// Vertical scroll offset.
    pub y: f64,
    /// Total document height.
    pub scroll_height: f64,
    /// Visible viewport height.
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn at(y: f64) -> Self {
        Self {
            y,
            ..Default::default()
        }
    }
}

pub fn back_to_top_visible(metrics: &ScrollMetrics) -> bool {
    metrics.y > BACK_TO_TOP_OFFSET
}

/// The nav sticks once the page scrolls past the nav's original top.
pub fn is_sticky(metrics: &ScrollMetrics, nav_offset_top: f64) -> bool {
    metrics.y > nav_offset_top
}

/// Body `background-position` for the parallax background, or `None` when
/// the page cannot scroll.
pub fn parallax_position(metrics: &ScrollMetrics) -> Option<String> {
    let scrollable = metrics.scroll_height - metrics.viewport_height;
    if scrollable <= 0.0 {
        return None;
    }
    let pct = metrics.y / scrollable * 100.0;
    Some(format!("0% {}%", pct))
}
