#![allow(non_snake_case)]

mod assembly;
pub use assembly::*;
mod inspect;
pub use inspect::*;
