//! Style Enforcement Tests
//!
//! These tests scan the workspace and fail if production code carries
//! patterns the project does not accept.
//!
//! - `dead_code_enforcement` - Prevents #[allow(dead_code)] in production code

#[path = "style/dead_code_enforcement.rs"]
mod dead_code_enforcement;
