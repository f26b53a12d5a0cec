//! Search service access helpers.

pub mod decompose_spans;
pub mod typesense_utils;
