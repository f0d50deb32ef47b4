pub mod enum_types;

pub use enum_types::*;
