//! Document API routes and module exports.

pub mod get_document;
