//! Common utility functions

pub mod identifier;

pub use identifier::*;
