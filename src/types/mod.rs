pub mod inventory;
pub mod machine;

pub use inventory::*;
pub use machine::*;
