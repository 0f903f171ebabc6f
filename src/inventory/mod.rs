pub mod builder;
pub mod error;
pub mod grouping;
pub mod render;

pub use builder::*;
pub use error::*;
pub use grouping::*;
pub use render::*;
