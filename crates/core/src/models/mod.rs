//! Data models for Seatplan

mod group;
mod number;
mod seat;
mod student;

pub use group::*;
pub use seat::*;
pub use student::*;
