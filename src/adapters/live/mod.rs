//! Live adapters for real external interactions.

pub mod asana;
pub mod clock;
