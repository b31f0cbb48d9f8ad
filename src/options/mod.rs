mod argparse;
mod mode;

pub use argparse::*;
pub use mode::*;
