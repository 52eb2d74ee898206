//! nlq - ask your PostgreSQL database questions in plain language.
//!
//! The flow is a straight line: build a prompt from the question, few-shot
//! examples and a schema hint, send it to the configured completion backend,
//! pull a single SQL statement out of the reply, run it, render the rows.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;
