//! Terminal UI for mixoss - display, theme, and pane rendering

mod display;
mod render;
mod session;
mod theme;

pub use display::{Display, ScreenDisplay, TerminalDisplay};
pub use render::{
    volume_step, Renderer, CONTROL_WIDTH, FIRST_ROW, GAUGE_WIDTH, LABEL_WIDTH, RIGHT_COLUMN,
    SEPARATOR_COLUMN, TITLE,
};
pub use session::TerminalSession;
pub use theme::{Theme, PHOSPHOR, PLAIN};
