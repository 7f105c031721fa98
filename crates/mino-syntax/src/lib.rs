pub mod diagnostics;
pub mod token;

pub use diagnostics::*;
pub use token::*;
