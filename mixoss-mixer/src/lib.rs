//! Mixer model for mixoss - device gateway, control catalog, navigation,
//! and volume mapping

mod catalog;
mod gateway;
mod navigation;
#[cfg(unix)]
mod oss;
mod sim;
pub mod volume;

pub use catalog::{Catalog, Control, Mixer, Pane, PaneIter, VmixRule};
pub use gateway::{ControlInfo, MixerError, MixerGateway, MixerInfo, SliderKind};
#[cfg(unix)]
pub use oss::{OssMixer, DEFAULT_DEVICE};
pub use sim::{SimMixer, SimWrite};
