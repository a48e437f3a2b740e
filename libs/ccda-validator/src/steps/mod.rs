//! Per-section conformance walks
//!
//! Each step compares one top-level section of the reference scenario against
//! the submitted document, appending findings to the collector it is given.

pub(crate) mod past_illness;
pub(crate) mod problems;
