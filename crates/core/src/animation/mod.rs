//! Time-sampled animation primitives.
//!
//! Nothing here ticks. An [`timeline::Animation`] is a plain descriptor of a
//! transition and is evaluated at whatever instant the render path samples
//! it, so dropped frames or a suspended app never desynchronise it.

pub mod easing;
pub mod sequencer;
pub mod spring;
pub mod timeline;
