pub mod tuner;
pub use tuner::*;

#[cfg(test)]
mod tuner_tests;
