//! Selection movement across the device and vmix panes
//!
//! The device pane is followed by the vmix pane: moving past the end of the
//! device pane lands on the vmix head, and moving before the vmix head lands
//! on the device tail. There is no wraparound at the outer ends.

use crate::catalog::{Control, Mixer, Pane};

impl Mixer {
    /// Index of the selected control
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_control(&self) -> Option<&Control> {
        self.selected.and_then(|idx| self.controls.get(idx))
    }

    /// Pane holding the selection
    pub fn selected_pane(&self) -> Option<Pane> {
        self.selected_control().and_then(Control::pane)
    }

    /// Move the selection forward; returns whether it moved
    pub fn select_next(&mut self) -> bool {
        let Some(current) = self.selected else {
            return false;
        };
        let ctrl = &self.controls[current];
        let target = match ctrl.next {
            Some(next) => Some(next),
            None if !ctrl.is_vmix => self.vmix_head,
            None => None,
        };
        self.move_to(current, target)
    }

    /// Move the selection backward; returns whether it moved
    pub fn select_prev(&mut self) -> bool {
        let Some(current) = self.selected else {
            return false;
        };
        let ctrl = &self.controls[current];
        let target = match ctrl.prev {
            Some(prev) => Some(prev),
            None if ctrl.is_vmix => self.tail(Pane::Device),
            None => None,
        };
        self.move_to(current, target)
    }

    fn move_to(&mut self, current: usize, target: Option<usize>) -> bool {
        let Some(target) = target else {
            return false;
        };
        self.selected = Some(target);
        self.mark_dirty(current);
        self.mark_dirty(target);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::{Catalog, ControlInfo, Pane, SimMixer, SliderKind, VmixRule};

    fn slider(id: &str) -> ControlInfo {
        ControlInfo::slider(id, SliderKind::Stereo8, 0, 100)
    }

    fn vmix(id: &str) -> ControlInfo {
        slider(id).with_ext_name(format!("vmix0-{id}"))
    }

    fn load(controls: Vec<ControlInfo>) -> Catalog {
        let mut sim = SimMixer::new();
        let m = sim.add_mixer("Test");
        for info in controls {
            sim.add_control(m, info, 0);
        }
        Catalog::load(&sim, &VmixRule::default()).unwrap()
    }

    fn clean(catalog: &mut Catalog) {
        for ctrl in &mut catalog.mixer_mut(0).unwrap().controls {
            ctrl.dirty = false;
        }
    }

    #[test]
    fn test_device_to_vmix_walk() {
        let mut catalog = load(vec![slider("vol"), slider("pcm"), vmix("app")]);
        let mixer = catalog.mixer_mut(0).unwrap();

        assert_eq!(mixer.selected(), Some(0));
        assert!(mixer.select_next());
        assert_eq!(mixer.selected(), Some(1));
        assert!(mixer.select_next());
        assert_eq!(mixer.selected(), Some(2));
        assert!(!mixer.select_next());
        assert_eq!(mixer.selected(), Some(2));
    }

    #[test]
    fn test_vmix_back_to_device_tail() {
        let mut catalog = load(vec![slider("vol"), vmix("app"), slider("pcm")]);
        let mixer = catalog.mixer_mut(0).unwrap();
        mixer.select_next();
        mixer.select_next();
        assert_eq!(mixer.selected(), Some(1));
        assert_eq!(mixer.selected_pane(), Some(Pane::Vmix));

        assert!(mixer.select_prev());
        assert_eq!(mixer.selected(), Some(2));
        assert_eq!(mixer.selected_pane(), Some(Pane::Device));
        assert!(mixer.select_prev());
        assert_eq!(mixer.selected(), Some(0));
        assert!(!mixer.select_prev());
        assert_eq!(mixer.selected(), Some(0));
    }

    #[test]
    fn test_move_marks_both_dirty() {
        let mut catalog = load(vec![slider("vol"), slider("pcm"), slider("line")]);
        clean(&mut catalog);
        let mixer = catalog.mixer_mut(0).unwrap();

        mixer.select_next();

        let dirty: Vec<bool> = mixer.controls().iter().map(|c| c.dirty).collect();
        assert_eq!(dirty, vec![true, true, false]);
    }

    #[test]
    fn test_no_move_leaves_flags() {
        let mut catalog = load(vec![slider("vol")]);
        clean(&mut catalog);
        let mixer = catalog.mixer_mut(0).unwrap();

        assert!(!mixer.select_prev());
        assert!(!mixer.select_next());
        assert!(!mixer.controls()[0].dirty);
    }

    #[test]
    fn test_empty_vmix_pane() {
        let mut catalog = load(vec![slider("vol"), slider("pcm")]);
        let mixer = catalog.mixer_mut(0).unwrap();

        mixer.select_next();
        assert!(!mixer.select_next());
        assert_eq!(mixer.selected(), Some(1));
    }

    #[test]
    fn test_empty_device_pane() {
        let mut catalog = load(vec![vmix("a"), vmix("b")]);
        let mixer = catalog.mixer_mut(0).unwrap();

        assert_eq!(mixer.selected(), Some(0));
        assert!(!mixer.select_prev());
        assert!(mixer.select_next());
        assert!(!mixer.select_next());
        assert_eq!(mixer.selected(), Some(1));
    }

    #[test]
    fn test_selection_stays_in_panes() {
        let mut catalog = load(vec![
            vmix("a"),
            slider("vol"),
            ControlInfo::slider("mute", SliderKind::Other, 0, 1),
            vmix("b"),
            slider("pcm"),
        ]);
        let mixer = catalog.mixer_mut(0).unwrap();
        let moves = [true, true, false, true, true, true, false, false, false, false, true];

        for forward in moves {
            if forward {
                mixer.select_next();
            } else {
                mixer.select_prev();
            }
            let selected = mixer.selected_control().unwrap();
            assert!(selected.pane().is_some());
        }
    }
}
