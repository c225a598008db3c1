//! OSS 4 mixer backend (`/dev/mixer` extension API)

use crate::gateway::{ControlInfo, MixerError, MixerGateway, MixerInfo, SliderKind};
use libc::{c_char, c_int, c_uint};
use std::fs::{File, OpenOptions};
use std::io;
use std::mem;
use std::os::fd::AsRawFd;
use std::path::Path;

/// Default mixer device node
pub const DEFAULT_DEVICE: &str = "/dev/mixer";

// Control types from soundcard.h
const MIXT_MONOSLIDER: c_int = 4;
const MIXT_STEREOSLIDER: c_int = 5;
const MIXT_MONOSLIDER16: c_int = 19;
const MIXT_STEREOSLIDER16: c_int = 20;

#[repr(C)]
#[allow(dead_code)]
struct OssMixerInfo {
    dev: c_int,
    id: [c_char; 16],
    name: [c_char; 32],
    modify_counter: c_int,
    card_number: c_int,
    port_number: c_int,
    handle: [c_char; 32],
    magic: c_int,
    enabled: c_int,
    caps: c_int,
    flags: c_int,
    nrext: c_int,
    priority: c_int,
    devnode: [c_char; 32],
    legacy_device: c_int,
    filler: [c_int; 245],
}

#[repr(C)]
#[allow(dead_code)]
struct OssMixext {
    dev: c_int,
    ctrl: c_int,
    kind: c_int,
    maxvalue: c_int,
    minvalue: c_int,
    flags: c_int,
    id: [c_char; 16],
    parent: c_int,
    dummy: c_int,
    timestamp: c_int,
    data: [c_char; 64],
    enum_present: [u8; 32],
    control_no: c_int,
    desc: c_uint,
    extname: [c_char; 32],
    update_counter: c_int,
    rgbcolor: c_int,
    filler: [c_int; 6],
}

#[repr(C)]
#[allow(dead_code)]
struct OssMixerValue {
    dev: c_int,
    ctrl: c_int,
    value: c_int,
    flags: c_int,
    timestamp: c_int,
    filler: [c_int; 8],
}

#[cfg(target_os = "linux")]
mod ioc {
    const WRITE: u32 = 1;
    const READ: u32 = 2;

    const fn encode(dir: u32, nr: u32, size: usize) -> u32 {
        (dir << 30) | (((size as u32) & 0x3fff) << 16) | ((b'X' as u32) << 8) | nr
    }

    pub const fn ior(nr: u32, size: usize) -> u32 {
        encode(READ, nr, size)
    }

    pub const fn iowr(nr: u32, size: usize) -> u32 {
        encode(READ | WRITE, nr, size)
    }
}

#[cfg(not(target_os = "linux"))]
mod ioc {
    const OUT: u32 = 0x4000_0000;
    const IN: u32 = 0x8000_0000;

    const fn encode(dir: u32, nr: u32, size: usize) -> u32 {
        dir | (((size as u32) & 0x1fff) << 16) | ((b'X' as u32) << 8) | nr
    }

    pub const fn ior(nr: u32, size: usize) -> u32 {
        encode(OUT, nr, size)
    }

    pub const fn iowr(nr: u32, size: usize) -> u32 {
        encode(IN | OUT, nr, size)
    }
}

const SNDCTL_MIX_NRMIX: u32 = ioc::ior(1, mem::size_of::<c_int>());
const SNDCTL_MIX_EXTINFO: u32 = ioc::iowr(3, mem::size_of::<OssMixext>());
const SNDCTL_MIX_READ: u32 = ioc::iowr(4, mem::size_of::<OssMixerValue>());
const SNDCTL_MIX_WRITE: u32 = ioc::iowr(5, mem::size_of::<OssMixerValue>());
const SNDCTL_MIXERINFO: u32 = ioc::iowr(10, mem::size_of::<OssMixerInfo>());

/// Handle on an OSS mixer device node
pub struct OssMixer {
    file: File,
}

impl OssMixer {
    /// Open the mixer device read-write
    pub fn open(path: &Path) -> Result<Self, MixerError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| MixerError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!("opened mixer device {}", path.display());
        Ok(Self { file })
    }

    /// Issue one ioctl with `arg` as the in/out parameter block
    fn ioctl<T>(&self, request: u32, arg: &mut T) -> io::Result<()> {
        // SAFETY: `arg` is a live, exclusively borrowed repr(C) block whose
        // size is encoded in `request`; the kernel writes at most that much.
        let rc = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                request as _,
                arg as *mut T as *mut libc::c_void,
            )
        };
        if rc == -1 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }
}

/// Zeroed parameter block
fn zeroed<T>() -> T {
    // SAFETY: only used for the plain-integer repr(C) blocks above, for
    // which all-zero bytes are a valid value.
    unsafe { mem::zeroed() }
}

/// NUL-terminated C buffer to an owned string
fn c_string(buf: &[c_char]) -> String {
    let bytes: Vec<u8> = buf
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn slider_kind(kind: c_int) -> SliderKind {
    match kind {
        MIXT_MONOSLIDER => SliderKind::Mono8,
        MIXT_STEREOSLIDER => SliderKind::Stereo8,
        MIXT_MONOSLIDER16 => SliderKind::Mono16,
        MIXT_STEREOSLIDER16 => SliderKind::Stereo16,
        _ => SliderKind::Other,
    }
}

fn as_c_int(value: usize) -> io::Result<c_int> {
    c_int::try_from(value).map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))
}

impl MixerGateway for OssMixer {
    fn count_mixers(&self) -> io::Result<usize> {
        let mut count: c_int = 0;
        self.ioctl(SNDCTL_MIX_NRMIX, &mut count)?;
        Ok(count.max(0) as usize)
    }

    fn mixer_info(&self, mixer: usize) -> io::Result<MixerInfo> {
        let mut info: OssMixerInfo = zeroed();
        info.dev = as_c_int(mixer)?;
        self.ioctl(SNDCTL_MIXERINFO, &mut info)?;
        Ok(MixerInfo {
            name: c_string(&info.name),
            enabled: info.enabled != 0,
            control_count: info.nrext.max(0) as usize,
            modify_counter: info.modify_counter,
        })
    }

    fn control_info(&self, mixer: usize, control: usize) -> io::Result<ControlInfo> {
        let mut ext: OssMixext = zeroed();
        ext.dev = as_c_int(mixer)?;
        ext.ctrl = as_c_int(control)?;
        self.ioctl(SNDCTL_MIX_EXTINFO, &mut ext)?;
        Ok(ControlInfo {
            id: c_string(&ext.id),
            ext_name: c_string(&ext.extname),
            kind: slider_kind(ext.kind),
            min: ext.minvalue,
            max: ext.maxvalue,
            timestamp: ext.timestamp,
        })
    }

    fn read_value(&self, mixer: usize, control: usize, timestamp: i32) -> io::Result<i32> {
        let mut val: OssMixerValue = zeroed();
        val.dev = as_c_int(mixer)?;
        val.ctrl = as_c_int(control)?;
        val.timestamp = timestamp;
        val.value = -1;
        self.ioctl(SNDCTL_MIX_READ, &mut val)?;
        Ok(val.value)
    }

    fn write_value(
        &mut self,
        mixer: usize,
        control: usize,
        timestamp: i32,
        raw: i32,
    ) -> io::Result<()> {
        let mut val: OssMixerValue = zeroed();
        val.dev = as_c_int(mixer)?;
        val.ctrl = as_c_int(control)?;
        val.timestamp = timestamp;
        val.value = raw;
        self.ioctl(SNDCTL_MIX_WRITE, &mut val)
    }
}
