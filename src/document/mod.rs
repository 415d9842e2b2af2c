pub mod engine;
pub mod logic;
pub mod payload;

pub use engine::*;
pub use logic::{Branch, IfChain};
pub use payload::*;
