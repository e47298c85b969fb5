//! Replaymux - recorded session reconstruction tool
//!
//! This library crate exposes the orchestration layers for integration
//! testing: the timeline builder and the render stage pipeline.

pub mod pipeline;
pub mod timeline;
