pub mod condition;
pub mod definition;
mod editing;

pub use condition::*;
pub use definition::*;
