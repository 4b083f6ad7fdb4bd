//! Integration tests for the broken image checker
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! checker, the page pipeline and the sitemap walk end to end.

mod common;
mod pipeline_tests;
