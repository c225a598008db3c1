//! Single-key input handling for mixoss

mod commands;
mod keymap;
mod source;

pub use commands::Command;
pub use keymap::map_key;
pub use source::{CrosstermInput, Input, InputSource, ScriptedInput};
