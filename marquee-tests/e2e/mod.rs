//! End-to-end tests for Marquee
//!
//! These tests run the widget actor against the real OMDb client, pointed
//! at a local fake OMDb server, and verify complete user workflows from
//! typing a term to reading a detail card.

mod omdb_workflow;
