//! Mechanics and kinematics formulas behind the topic dispatch.

pub mod kinematics;
pub mod mechanics;

pub use kinematics::*;
pub use mechanics::*;
