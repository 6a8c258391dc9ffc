#![allow(dead_code)]

mod debug;
mod geometry_test_properties;
mod ring_compare;

pub use debug::*;
pub use geometry_test_properties::*;
pub use ring_compare::*;
