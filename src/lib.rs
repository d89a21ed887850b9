//! Upload a PDF, index its paragraphs, and answer questions about it with a
//! retrieval-augmented language model.
//!
//! Layers follow ports and adapters: [`domain`] holds entities and the
//! traits for external capabilities, [`application`] runs the pipelines,
//! [`infrastructure`] provides concrete adapters and configuration, and
//! [`api`] exposes everything over HTTP.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
