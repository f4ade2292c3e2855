//! Command implementations for the randpool CLI

pub mod check;
pub mod draw;
pub mod stress;
