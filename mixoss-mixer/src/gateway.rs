//! Mixer hardware gateway - the only device operations the model depends on

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the mixer model
#[derive(Error, Debug)]
pub enum MixerError {
    #[error("cannot open mixer {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("no mixer device found")]
    NoMixers,
    #[error("cannot get number of mixers: {0}")]
    MixerCount(io::Error),
    #[error("cannot get mixer info for mixer {mixer}: {source}")]
    MixerInfo { mixer: usize, source: io::Error },
    #[error("cannot get mixer extension info for control {control} of mixer {mixer}: {source}")]
    ControlInfo {
        mixer: usize,
        control: usize,
        source: io::Error,
    },
    #[error("mixer {mixer} ('{name}') is disabled")]
    Disabled { mixer: usize, name: String },
    #[error("cannot read control {id}: {source}")]
    Read { id: String, source: io::Error },
    #[error("cannot write control {id}: {source}")]
    Write { id: String, source: io::Error },
}

/// Encoding of a control's raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderKind {
    /// One 8-bit channel
    Mono8,
    /// Two 8-bit channels packed in 16 bits (left in the low byte)
    Stereo8,
    /// One 16-bit channel
    Mono16,
    /// Two 16-bit channels packed in 32 bits (left in the low half)
    Stereo16,
    /// Anything that is not a slider (switches, enums, meters, groups)
    Other,
}

impl SliderKind {
    /// Whether controls of this kind can be shown and adjusted
    pub fn is_slider(self) -> bool {
        !matches!(self, SliderKind::Other)
    }
}

/// Metadata for one mixing unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixerInfo {
    pub name: String,
    pub enabled: bool,
    pub control_count: usize,
    /// Hardware change token, bumped whenever any control changes
    pub modify_counter: i32,
}

/// Extended metadata for one control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlInfo {
    /// Short mnemonic identifier
    pub id: String,
    /// Long extension name (e.g. "vmix0-outvol")
    pub ext_name: String,
    pub kind: SliderKind,
    pub min: i32,
    pub max: i32,
    /// Token the device expects back on every read/write of this control
    pub timestamp: i32,
}

impl ControlInfo {
    /// Slider with `ext_name` equal to `id` and a zero timestamp
    pub fn slider(id: impl Into<String>, kind: SliderKind, min: i32, max: i32) -> Self {
        let id = id.into();
        Self {
            ext_name: id.clone(),
            id,
            kind,
            min,
            max,
            timestamp: 0,
        }
    }

    /// Replace the extension name
    pub fn with_ext_name(mut self, ext_name: impl Into<String>) -> Self {
        self.ext_name = ext_name.into();
        self
    }
}

/// Device operations needed to enumerate and drive mixer controls
///
/// Implemented by [`crate::OssMixer`] for real hardware and by
/// [`crate::SimMixer`] for tests.
pub trait MixerGateway {
    fn count_mixers(&self) -> io::Result<usize>;

    fn mixer_info(&self, mixer: usize) -> io::Result<MixerInfo>;

    fn control_info(&self, mixer: usize, control: usize) -> io::Result<ControlInfo>;

    fn read_value(&self, mixer: usize, control: usize, timestamp: i32) -> io::Result<i32>;

    fn write_value(
        &mut self,
        mixer: usize,
        control: usize,
        timestamp: i32,
        raw: i32,
    ) -> io::Result<()>;
}
