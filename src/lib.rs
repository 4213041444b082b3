//! Docsmith - AI Document Generation Gateway
//!
//! Accepts a topic and a generation instruction over HTTP, asks a generative
//! language model for Markdown, renders the Markdown to a PDF artifact and
//! hands the artifact to the caller (inline download or short-lived URL).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
