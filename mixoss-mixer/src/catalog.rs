//! Control catalog - mixers and their controls, split into two panes

use crate::gateway::{ControlInfo, MixerError, MixerGateway, SliderKind};

/// Rule deciding whether a control belongs to the virtual-mix pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmixRule {
    /// Extension name starts with the given prefix (e.g. "vmix0-outvol")
    ExtNamePrefix(String),
    /// Identifier is `@pcm` followed by digits (per-stream vmix channels)
    PcmId,
}

impl Default for VmixRule {
    fn default() -> Self {
        VmixRule::ExtNamePrefix("vmix".to_string())
    }
}

impl VmixRule {
    pub fn matches(&self, info: &ControlInfo) -> bool {
        match self {
            VmixRule::ExtNamePrefix(prefix) => info.ext_name.starts_with(prefix.as_str()),
            VmixRule::PcmId => info
                .id
                .strip_prefix("@pcm")
                .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())),
        }
    }
}

/// Display column a control is listed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Device,
    Vmix,
}

/// One adjustable control of a mixer
#[derive(Debug, Clone)]
pub struct Control {
    /// Owning mixer index
    pub mixer: usize,
    /// Index within the owning mixer
    pub index: usize,
    pub id: String,
    pub ext_name: String,
    pub kind: SliderKind,
    pub min: i32,
    pub max: i32,
    pub timestamp: i32,
    pub is_vmix: bool,
    /// Row must be repainted
    pub dirty: bool,
    /// Screen row of the last successful paint
    pub row: Option<u16>,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl Control {
    fn new(mixer: usize, index: usize, info: ControlInfo, rule: &VmixRule) -> Self {
        let is_vmix = rule.matches(&info);
        Self {
            mixer,
            index,
            id: info.id,
            ext_name: info.ext_name,
            kind: info.kind,
            min: info.min,
            max: info.max,
            timestamp: info.timestamp,
            is_vmix,
            dirty: true,
            row: None,
            prev: None,
            next: None,
        }
    }

    /// Pane this control is listed in, `None` for non-sliders
    pub fn pane(&self) -> Option<Pane> {
        match (self.kind.is_slider(), self.is_vmix) {
            (false, _) => None,
            (true, false) => Some(Pane::Device),
            (true, true) => Some(Pane::Vmix),
        }
    }

    pub fn prev(&self) -> Option<usize> {
        self.prev
    }

    pub fn next(&self) -> Option<usize> {
        self.next
    }
}

/// One hardware mixing unit
#[derive(Debug, Clone)]
pub struct Mixer {
    pub index: usize,
    pub name: String,
    pub enabled: bool,
    pub modify_counter: i32,
    /// Control count reported by the device (controls stay empty when disabled)
    pub control_count: usize,
    pub(crate) controls: Vec<Control>,
    pub(crate) device_head: Option<usize>,
    pub(crate) vmix_head: Option<usize>,
    pub(crate) selected: Option<usize>,
}

/// Iterator over one pane, in list order
pub struct PaneIter<'a> {
    controls: &'a [Control],
    cursor: Option<usize>,
}

impl Iterator for PaneIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let idx = self.cursor?;
        self.cursor = self.controls[idx].next;
        Some(idx)
    }
}

impl Mixer {
    fn load<G: MixerGateway + ?Sized>(
        gateway: &G,
        index: usize,
        rule: &VmixRule,
        warnings: &mut Vec<String>,
    ) -> Result<Self, MixerError> {
        let info = gateway
            .mixer_info(index)
            .map_err(|source| MixerError::MixerInfo {
                mixer: index,
                source,
            })?;

        let mut mixer = Mixer {
            index,
            name: info.name,
            enabled: info.enabled,
            modify_counter: info.modify_counter,
            control_count: info.control_count,
            controls: Vec::new(),
            device_head: None,
            vmix_head: None,
            selected: None,
        };

        if !mixer.enabled {
            // e.g. a disconnected USB device
            let warning = format!("found a disabled device: '{}'", mixer.name);
            tracing::warn!("{}", warning);
            warnings.push(warning);
            return Ok(mixer);
        }

        mixer.controls.reserve_exact(info.control_count);
        for control in 0..info.control_count {
            let ext = gateway
                .control_info(index, control)
                .map_err(|source| MixerError::ControlInfo {
                    mixer: index,
                    control,
                    source,
                })?;
            mixer.controls.push(Control::new(index, control, ext, rule));
            if let Some(pane) = mixer.controls[control].pane() {
                mixer.push_front(pane, control);
            }
        }

        mixer.reverse(Pane::Device);
        mixer.reverse(Pane::Vmix);
        mixer.selected = mixer.device_head.or(mixer.vmix_head);

        tracing::debug!(
            "mixer {} '{}': {} controls, {} device, {} vmix",
            index,
            mixer.name,
            mixer.controls.len(),
            mixer.pane(Pane::Device).count(),
            mixer.pane(Pane::Vmix).count()
        );
        Ok(mixer)
    }

    fn head_mut(&mut self, pane: Pane) -> &mut Option<usize> {
        match pane {
            Pane::Device => &mut self.device_head,
            Pane::Vmix => &mut self.vmix_head,
        }
    }

    /// Link a control at the head of a pane
    fn push_front(&mut self, pane: Pane, idx: usize) {
        let old_head = *self.head_mut(pane);
        if let Some(h) = old_head {
            self.controls[h].prev = Some(idx);
        }
        let ctrl = &mut self.controls[idx];
        ctrl.prev = None;
        ctrl.next = old_head;
        *self.head_mut(pane) = Some(idx);
    }

    /// Reverse a pane in place
    fn reverse(&mut self, pane: Pane) {
        let mut cursor = *self.head_mut(pane);
        let mut new_head = None;
        while let Some(idx) = cursor {
            let ctrl = &mut self.controls[idx];
            std::mem::swap(&mut ctrl.prev, &mut ctrl.next);
            new_head = Some(idx);
            // after the swap, `prev` holds the old successor
            cursor = ctrl.prev;
        }
        *self.head_mut(pane) = new_head;
    }

    pub fn head(&self, pane: Pane) -> Option<usize> {
        match pane {
            Pane::Device => self.device_head,
            Pane::Vmix => self.vmix_head,
        }
    }

    /// Last control of a pane, found by walking from the head
    pub fn tail(&self, pane: Pane) -> Option<usize> {
        self.pane(pane).last()
    }

    pub fn pane(&self, pane: Pane) -> PaneIter<'_> {
        PaneIter {
            controls: &self.controls,
            cursor: self.head(pane),
        }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn control(&self, idx: usize) -> Option<&Control> {
        self.controls.get(idx)
    }

    pub fn control_mut(&mut self, idx: usize) -> Option<&mut Control> {
        self.controls.get_mut(idx)
    }

    /// Whether either pane has at least one control
    pub fn has_pane_controls(&self) -> bool {
        self.device_head.is_some() || self.vmix_head.is_some()
    }

    pub fn mark_dirty(&mut self, idx: usize) {
        if let Some(ctrl) = self.controls.get_mut(idx) {
            ctrl.dirty = true;
        }
    }

    /// Mark every control for repaint and forget painted rows
    pub fn mark_all_dirty(&mut self) {
        for ctrl in &mut self.controls {
            ctrl.dirty = true;
            ctrl.row = None;
        }
    }
}

/// Every mixer exposed by the device
#[derive(Debug, Clone)]
pub struct Catalog {
    mixers: Vec<Mixer>,
    warnings: Vec<String>,
}

impl Catalog {
    /// Enumerate all mixers and their controls
    ///
    /// Any info query failure drops everything built so far and returns the
    /// error. Disabled mixers keep their slot with no controls and add a
    /// warning.
    pub fn load<G: MixerGateway + ?Sized>(
        gateway: &G,
        rule: &VmixRule,
    ) -> Result<Self, MixerError> {
        let count = gateway.count_mixers().map_err(MixerError::MixerCount)?;
        if count == 0 {
            return Err(MixerError::NoMixers);
        }

        let mut warnings = Vec::new();
        let mixers = (0..count)
            .map(|m| Mixer::load(gateway, m, rule, &mut warnings))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("loaded {} mixers", mixers.len());
        Ok(Self { mixers, warnings })
    }

    pub fn mixers(&self) -> &[Mixer] {
        &self.mixers
    }

    pub fn mixer(&self, idx: usize) -> Option<&Mixer> {
        self.mixers.get(idx)
    }

    pub fn mixer_mut(&mut self, idx: usize) -> Option<&mut Mixer> {
        self.mixers.get_mut(idx)
    }

    /// Warnings gathered while loading
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Next mixer after `current` (wrapping) that has pane controls
    pub fn next_usable(&self, current: usize) -> Option<usize> {
        let n = self.mixers.len();
        (1..=n)
            .map(|step| (current + step) % n)
            .find(|&m| self.mixers[m].has_pane_controls())
    }
}
