//! Core module has common/shared math, traits, and robust predicate modules.

pub mod math;
pub mod traits;
