//! Parameterized SQL for the products table: identifiers are fixed, values
//! always bind as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
