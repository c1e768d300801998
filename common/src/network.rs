pub mod outcome;
pub mod target;
