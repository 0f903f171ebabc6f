pub mod commands;
pub mod options;

pub use commands::*;
pub use options::*;
