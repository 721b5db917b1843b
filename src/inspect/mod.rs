//! Solve and inspect runs for the Kronecker test problem.
//!
//! An [`Inspector`] builds a random problem from [`RunSettings`], solves it,
//! and prints the solution next to the compiled `G x <= h` data.  Running
//! the same settings with C as a constant and as a parameter gives a
//! [`Comparison`], whose [`Defect`]s list every way the two runs disagree
//! with each other or with the known optimum.

mod compare;
mod driver;
pub mod printer;
mod settings;

pub use compare::*;
pub use driver::*;
pub use settings::*;
