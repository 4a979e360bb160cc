//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside the handlers, such
//! as correlating every request with a trace identifier.

pub mod trace;

pub use trace::Trace;
