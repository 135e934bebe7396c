//! Hook definitions and dispatch.

pub mod definitions;
pub mod dispatcher;
