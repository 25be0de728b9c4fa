//! Integration tests for Marquee
//!
//! These tests drive the widget actor through its handle against scripted
//! catalogs under paused tokio time, so debounce and ordering behavior is
//! deterministic.

#[path = "style.rs"]
mod style;

#[path = "integration/search_scenarios.rs"]
mod search_scenarios;

#[path = "integration/widget_properties.rs"]
mod widget_properties;

#[path = "integration/stale_responses.rs"]
mod stale_responses;
