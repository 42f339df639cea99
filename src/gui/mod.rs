pub mod gui;
pub use gui::*;
