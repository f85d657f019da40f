//! Shared utility functions.
//!
//! - `html`: CSS string escaping for injected stylesheet rules

mod html;

pub use html::css_string_escape;
