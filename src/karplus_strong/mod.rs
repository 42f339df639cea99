pub mod karplus_strong;
pub use karplus_strong::*;

#[cfg(test)]
mod karplus_strong_tests;
