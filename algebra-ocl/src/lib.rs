/// Code adapted from https://github.com/filecoin-project/bellman

#[macro_use]
extern crate derivative;

pub mod device;
pub mod ffgen;
pub mod kernel;

mod error;
pub use self::error::*;
