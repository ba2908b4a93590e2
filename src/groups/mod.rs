//! The test groups shipped with the unit suite.
//!
//! Each group exposes a `GROUP_NAME` and a `load` function that the
//! [`GroupRegistry`](crate::registry::GroupRegistry) registers.

pub mod pretty_print;
pub mod sandbox;
