//! Domain models for the lab report engine.

mod evaluation;
mod lab;
mod parameter;
mod range;
mod species;

pub use evaluation::*;
pub use lab::*;
pub use parameter::*;
pub use range::*;
pub use species::*;
