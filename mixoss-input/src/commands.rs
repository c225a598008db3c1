//! Command definitions for mixoss

/// Commands that can be dispatched from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // Navigation
    SelectNext,
    SelectPrev,

    // Volume
    VolumeDown,
    VolumeUp,
    SetDecile(u8), // 0-9 -> 0%..90%

    // Mixers
    NextMixer,

    // Application
    Quit,
}

impl Command {
    /// Target percentage for a decile command
    pub fn decile_percent(digit: u8) -> i32 {
        i32::from(digit.min(9)) * 10
    }
}
