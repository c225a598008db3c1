//! Volume mapping between raw control values and percentages
//!
//! Only the left channel is shown and adjusted. Writes set both channels to
//! the same value.

use crate::catalog::Control;
use crate::gateway::{MixerError, MixerGateway, SliderKind};

/// Decoded channel values of one raw word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelValues {
    pub left: i32,
    pub right: i32,
}

impl ChannelValues {
    pub fn both(value: i32) -> Self {
        Self {
            left: value,
            right: value,
        }
    }
}

/// Split a raw word into channels; unknown kinds decode to zero
pub fn decode(kind: SliderKind, raw: i32) -> ChannelValues {
    match kind {
        SliderKind::Mono8 => ChannelValues::both(raw & 0xff),
        SliderKind::Stereo8 => ChannelValues {
            left: raw & 0xff,
            right: (raw >> 8) & 0xff,
        },
        SliderKind::Mono16 => ChannelValues::both(raw & 0xffff),
        SliderKind::Stereo16 => ChannelValues {
            left: raw & 0xffff,
            right: (raw >> 16) & 0xffff,
        },
        SliderKind::Other => ChannelValues::default(),
    }
}

/// Pack channels into a raw word; unknown kinds encode to zero
pub fn encode(kind: SliderKind, values: ChannelValues) -> i32 {
    match kind {
        SliderKind::Mono8 => values.left & 0xff,
        SliderKind::Stereo8 => (values.left & 0xff) | ((values.right & 0xff) << 8),
        SliderKind::Mono16 => values.left & 0xffff,
        SliderKind::Stereo16 => (values.left & 0xffff) | ((values.right & 0xffff) << 16),
        SliderKind::Other => 0,
    }
}

/// Map a left-channel value in `[min, max]` to `[0, 100]`, truncating
pub fn to_percent(left: i32, min: i32, max: i32) -> u8 {
    if max <= min {
        return 0;
    }
    let percent = min as i64 + (left as i64 * 100) / (max as i64 - min as i64);
    percent.clamp(0, 100) as u8
}

/// Map a percentage (clamped to `[0, 100]`) to a raw value in `[min, max]`
pub fn to_raw(percent: i32, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    let percent = percent.clamp(0, 100) as i64;
    let raw = min as i64 + (percent * (max as i64 - min as i64)) / 100;
    raw.clamp(min as i64, max as i64) as i32
}

/// Read a control's current volume as a percentage
pub fn read_percent<G: MixerGateway + ?Sized>(
    gateway: &G,
    control: &Control,
) -> Result<u8, MixerError> {
    let raw = gateway
        .read_value(control.mixer, control.index, control.timestamp)
        .map_err(|source| MixerError::Read {
            id: control.id.clone(),
            source,
        })?;
    let values = decode(control.kind, raw);
    Ok(to_percent(values.left, control.min, control.max))
}

/// Set a control's volume on both channels; returns the clamped percentage
pub fn write_percent<G: MixerGateway + ?Sized>(
    gateway: &mut G,
    control: &Control,
    percent: i32,
) -> Result<u8, MixerError> {
    let percent = percent.clamp(0, 100);
    let raw = to_raw(percent, control.min, control.max);
    let word = encode(control.kind, ChannelValues::both(raw));
    tracing::debug!("write {} = {}% (raw {:#x})", control.id, percent, word);
    gateway
        .write_value(control.mixer, control.index, control.timestamp, word)
        .map_err(|source| MixerError::Write {
            id: control.id.clone(),
            source,
        })?;
    Ok(percent as u8)
}
