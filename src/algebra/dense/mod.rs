mod core;
mod kron;

pub use self::core::*;
