mod lines;
mod output;
pub mod renumber;
pub mod trim;

pub use lines::*;
pub use output::*;
pub use renumber::*;
pub use trim::*;
