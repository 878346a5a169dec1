//! # hbct
//!
//! Library half of the tracker binary: CLI, interactive questionnaire,
//! HTTP API and configuration. Exposed as a library for integration tests.

pub mod api;
pub mod cli;
pub mod config;
