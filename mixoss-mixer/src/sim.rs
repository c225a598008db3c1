//! In-memory mixer gateway
//!
//! Behaves like a device node with scripted mixers and controls. Reads and
//! info queries can be made to fail per control, and every write is logged.

use crate::gateway::{ControlInfo, MixerGateway, MixerInfo};
use std::io;

/// One recorded write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimWrite {
    pub mixer: usize,
    pub control: usize,
    pub raw: i32,
}

struct SimControl {
    info: ControlInfo,
    value: i32,
    fail_read: bool,
    fail_info: bool,
}

struct SimDevice {
    name: String,
    enabled: bool,
    modify_counter: i32,
    fail_info: bool,
    controls: Vec<SimControl>,
}

/// Simulated mixer device
#[derive(Default)]
pub struct SimMixer {
    devices: Vec<SimDevice>,
    fail_count: bool,
    writes: Vec<SimWrite>,
}

fn failure(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("simulated {what} failure"))
}

impl SimMixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enabled mixer and return its index
    pub fn add_mixer(&mut self, name: &str) -> usize {
        self.devices.push(SimDevice {
            name: name.to_string(),
            enabled: true,
            modify_counter: 0,
            fail_info: false,
            controls: Vec::new(),
        });
        self.devices.len() - 1
    }

    /// Add a control with an initial raw value and return its index
    pub fn add_control(&mut self, mixer: usize, info: ControlInfo, value: i32) -> usize {
        let controls = &mut self.devices[mixer].controls;
        controls.push(SimControl {
            info,
            value,
            fail_read: false,
            fail_info: false,
        });
        controls.len() - 1
    }

    pub fn set_enabled(&mut self, mixer: usize, enabled: bool) {
        self.devices[mixer].enabled = enabled;
    }

    /// Change a value from outside the program, bumping the modify counter
    pub fn set_value(&mut self, mixer: usize, control: usize, raw: i32) {
        let device = &mut self.devices[mixer];
        device.controls[control].value = raw;
        device.modify_counter += 1;
    }

    pub fn value(&self, mixer: usize, control: usize) -> i32 {
        self.devices[mixer].controls[control].value
    }

    pub fn modify_counter(&self, mixer: usize) -> i32 {
        self.devices[mixer].modify_counter
    }

    pub fn fail_count(&mut self, fail: bool) {
        self.fail_count = fail;
    }

    pub fn fail_mixer_info(&mut self, mixer: usize, fail: bool) {
        self.devices[mixer].fail_info = fail;
    }

    pub fn fail_control_info(&mut self, mixer: usize, control: usize, fail: bool) {
        self.devices[mixer].controls[control].fail_info = fail;
    }

    pub fn fail_reads(&mut self, mixer: usize, control: usize, fail: bool) {
        self.devices[mixer].controls[control].fail_read = fail;
    }

    /// Every write issued so far, oldest first
    pub fn writes(&self) -> &[SimWrite] {
        &self.writes
    }

    fn device(&self, mixer: usize) -> io::Result<&SimDevice> {
        self.devices
            .get(mixer)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn control(&self, mixer: usize, control: usize) -> io::Result<&SimControl> {
        self.device(mixer)?
            .controls
            .get(control)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}

impl MixerGateway for SimMixer {
    fn count_mixers(&self) -> io::Result<usize> {
        if self.fail_count {
            return Err(failure("mixer count"));
        }
        Ok(self.devices.len())
    }

    fn mixer_info(&self, mixer: usize) -> io::Result<MixerInfo> {
        let device = self.device(mixer)?;
        if device.fail_info {
            return Err(failure("mixer info"));
        }
        Ok(MixerInfo {
            name: device.name.clone(),
            enabled: device.enabled,
            control_count: device.controls.len(),
            modify_counter: device.modify_counter,
        })
    }

    fn control_info(&self, mixer: usize, control: usize) -> io::Result<ControlInfo> {
        let ctrl = self.control(mixer, control)?;
        if ctrl.fail_info {
            return Err(failure("control info"));
        }
        Ok(ctrl.info.clone())
    }

    fn read_value(&self, mixer: usize, control: usize, _timestamp: i32) -> io::Result<i32> {
        let ctrl = self.control(mixer, control)?;
        if ctrl.fail_read {
            return Err(failure("read"));
        }
        Ok(ctrl.value)
    }

    fn write_value(
        &mut self,
        mixer: usize,
        control: usize,
        _timestamp: i32,
        raw: i32,
    ) -> io::Result<()> {
        self.control(mixer, control)?;
        self.set_value(mixer, control, raw);
        self.writes.push(SimWrite {
            mixer,
            control,
            raw,
        });
        Ok(())
    }
}
