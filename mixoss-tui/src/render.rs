//! Pane rendering
//!
//! Each pane is a column of rows: label, bar gauge, percentage. Controls
//! are painted only when dirty or when their row moved, and a control
//! whose read fails gives its row to the next one.

use crate::display::Display;
use crate::theme::Theme;
use mixoss_mixer::{volume, Control, Mixer, MixerGateway, Pane};

pub const TITLE: &str = "mixoss";
/// Label column width
pub const LABEL_WIDTH: u16 = 12;
/// Number of bar cells at 100%
pub const GAUGE_WIDTH: u16 = 20;
/// Row of the first control in each pane
pub const FIRST_ROW: u16 = 2;
/// Label, gap, gauge, gap, "100%"
pub const CONTROL_WIDTH: u16 = LABEL_WIDTH + 1 + GAUGE_WIDTH + 1 + 4;
pub const SEPARATOR_COLUMN: u16 = 40;
pub const RIGHT_COLUMN: u16 = 1 + LABEL_WIDTH + 2 + GAUGE_WIDTH + 1 + 6;

/// Vertical line between the panes
const SEPARATOR: char = '│';
const LEFT_COLUMN: u16 = 0;
const TITLE_ROW: u16 = 0;
/// Width the title is centred in
const LAYOUT_WIDTH: u16 = 80;

/// Percentage covered by one gauge bar
pub fn volume_step() -> i32 {
    100 / GAUGE_WIDTH as i32
}

fn column(pane: Pane) -> u16 {
    match pane {
        Pane::Device => LEFT_COLUMN,
        Pane::Vmix => RIGHT_COLUMN,
    }
}

/// Draws mixer panes onto a display
pub struct Renderer {
    theme: Theme,
    /// First unused row of each pane after the last frame
    device_end: u16,
    vmix_end: u16,
    separator_end: u16,
    /// Message on the banner row, if any
    banner: Option<String>,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            device_end: FIRST_ROW,
            vmix_end: FIRST_ROW,
            separator_end: FIRST_ROW,
            banner: None,
        }
    }

    /// Message currently on the banner row
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Blank the screen and draw the title for `mixer`
    ///
    /// Every control of `mixer` is marked dirty so the next `render` paints
    /// the whole mixer.
    pub fn reset<D: Display + ?Sized>(&mut self, display: &mut D, mixer: &mut Mixer) {
        display.clear();
        mixer.mark_all_dirty();
        self.device_end = FIRST_ROW;
        self.vmix_end = FIRST_ROW;
        self.separator_end = FIRST_ROW;
        self.banner = None;

        let title = format!("{} - {}", TITLE, mixer.name);
        let col = LAYOUT_WIDTH.saturating_sub(title.chars().count() as u16) / 2;
        display.put_str(TITLE_ROW, col, &title, self.theme.title());
    }

    /// Paint dirty controls of both panes and the separator
    ///
    /// Returns the number of controls painted. Read failures are shown on
    /// the banner row and leave the control dirty.
    pub fn render<G, D>(&mut self, mixer: &mut Mixer, gateway: &G, display: &mut D) -> usize
    where
        G: MixerGateway + ?Sized,
        D: Display + ?Sized,
    {
        let (device_end, device_painted) = self.render_pane(mixer, Pane::Device, gateway, display);
        let (vmix_end, vmix_painted) = self.render_pane(mixer, Pane::Vmix, gateway, display);

        let end = device_end.max(vmix_end);
        let separator = self.theme.separator();
        for row in FIRST_ROW..end {
            display.put_char(row, SEPARATOR_COLUMN, SEPARATOR, separator);
        }
        for row in end..self.separator_end {
            display.clear_span(row, SEPARATOR_COLUMN, 1);
        }
        self.separator_end = end;

        device_painted + vmix_painted
    }

    fn render_pane<G, D>(
        &mut self,
        mixer: &mut Mixer,
        pane: Pane,
        gateway: &G,
        display: &mut D,
    ) -> (u16, usize)
    where
        G: MixerGateway + ?Sized,
        D: Display + ?Sized,
    {
        let col = column(pane);
        let selected = mixer.selected();
        let indices: Vec<usize> = mixer.pane(pane).collect();
        let mut row = FIRST_ROW;
        let mut painted = 0;

        for idx in indices {
            let Some(ctrl) = mixer.control_mut(idx) else {
                continue;
            };
            if !ctrl.dirty {
                match ctrl.row {
                    Some(r) if r == row => {
                        row += 1;
                        continue;
                    }
                    None => continue,
                    Some(_) => {}
                }
            }

            match volume::read_percent(gateway, ctrl) {
                Ok(percent) => {
                    self.draw_control(display, ctrl, row, col, percent, selected == Some(idx));
                    ctrl.dirty = false;
                    ctrl.row = Some(row);
                    row += 1;
                    painted += 1;
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    ctrl.row = None;
                    ctrl.dirty = true;
                    self.show_banner(display, &e.to_string());
                }
            }
        }

        let previous_end = match pane {
            Pane::Device => &mut self.device_end,
            Pane::Vmix => &mut self.vmix_end,
        };
        for vacated in row..*previous_end {
            display.clear_span(vacated, col, CONTROL_WIDTH);
        }
        *previous_end = row;

        (row, painted)
    }

    /// Paint one control row: label, gauge, percentage
    pub fn draw_control<D: Display + ?Sized>(
        &self,
        display: &mut D,
        ctrl: &Control,
        row: u16,
        col: u16,
        percent: u8,
        selected: bool,
    ) {
        let text_style = if selected {
            self.theme.emphasis()
        } else {
            self.theme.normal()
        };

        let label: String = ctrl.id.chars().take(LABEL_WIDTH as usize).collect();
        let label = format!("{:<width$}", label, width = LABEL_WIDTH as usize);
        display.put_str(row, col, &label, text_style);

        let bars = (u16::from(percent.min(100)) * GAUGE_WIDTH / 100) as usize;
        let gauge = format!(
            "{}{}",
            "|".repeat(bars),
            " ".repeat(GAUGE_WIDTH as usize - bars)
        );
        let mut x = col + LABEL_WIDTH + 1;
        display.put_str(row, x, &gauge, self.theme.gauge());

        x += GAUGE_WIDTH + 1;
        display.put_str(row, x, &format!("{:3}%", percent), text_style);
    }

    /// Show a one-line message centred on the last row
    pub fn show_banner<D: Display + ?Sized>(&mut self, display: &mut D, message: &str) {
        let area = display.area();
        if area.height == 0 {
            return;
        }
        let row = area.height - 1;
        display.clear_span(row, 0, area.width);
        let len = message.chars().count() as u16;
        let col = area.width.saturating_sub(len) / 2;
        display.put_str(row, col, message, self.theme.error());
        self.banner = Some(message.to_string());
    }

    pub fn clear_banner<D: Display + ?Sized>(&mut self, display: &mut D) {
        self.banner = None;
        let area = display.area();
        if area.height > 0 {
            display.clear_span(area.height - 1, 0, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::ScreenDisplay;
    use mixoss_mixer::{Catalog, ControlInfo, SimMixer, SliderKind, VmixRule};
    use ratatui::backend::TestBackend;
    use ratatui::style::Modifier;

    fn slider(id: &str) -> ControlInfo {
        ControlInfo::slider(id, SliderKind::Stereo8, 0, 100)
    }

    fn setup(values: &[(&str, bool, i32)]) -> (SimMixer, Catalog, ScreenDisplay<TestBackend>) {
        let mut sim = SimMixer::new();
        let m = sim.add_mixer("Card");
        for &(id, vmix, value) in values {
            let info = if vmix {
                slider(id).with_ext_name(format!("vmix0-{id}"))
            } else {
                slider(id)
            };
            sim.add_control(m, info, value);
        }
        let catalog = Catalog::load(&sim, &VmixRule::default()).unwrap();
        let display = ScreenDisplay::new(TestBackend::new(80, 12)).unwrap();
        (sim, catalog, display)
    }

    #[test]
    fn test_draw_row_layout() {
        let (sim, mut catalog, mut display) = setup(&[("vol", false, 50)]);
        let mut renderer = Renderer::new(Theme::default());
        let mixer = catalog.mixer_mut(0).unwrap();

        renderer.reset(&mut display, mixer);
        assert_eq!(renderer.render(mixer, &sim, &mut display), 1);

        let expected = format!("{:<12} {}{}  50%", "vol", "|".repeat(10), " ".repeat(10));
        assert!(display.row_text(FIRST_ROW).starts_with(&expected));
        assert!(display.row_text(0).contains("mixoss - Card"));
    }

    #[test]
    fn test_selected_emphasis_skips_gauge() {
        let (sim, mut catalog, mut display) = setup(&[("vol", false, 100), ("pcm", false, 0)]);
        let mut renderer = Renderer::new(Theme::default());
        let mixer = catalog.mixer_mut(0).unwrap();
        renderer.reset(&mut display, mixer);
        renderer.render(mixer, &sim, &mut display);

        let canvas = display.canvas();
        let bold = |x: u16, y: u16| canvas[(x, y)].modifier.contains(Modifier::BOLD);
        assert!(bold(0, FIRST_ROW));
        assert!(!bold(LABEL_WIDTH + 1, FIRST_ROW));
        assert!(bold(LABEL_WIDTH + GAUGE_WIDTH + 2, FIRST_ROW));
        assert!(!bold(0, FIRST_ROW + 1));
    }

    #[test]
    fn test_clean_controls_are_not_read() {
        let (mut sim, mut catalog, mut display) = setup(&[("vol", false, 50), ("pcm", false, 20)]);
        let mut renderer = Renderer::new(Theme::default());
        let mixer = catalog.mixer_mut(0).unwrap();
        renderer.reset(&mut display, mixer);
        renderer.render(mixer, &sim, &mut display);

        // a read would now fail, but clean rows are skipped
        sim.fail_reads(0, 0, true);
        sim.fail_reads(0, 1, true);
        assert_eq!(renderer.render(mixer, &sim, &mut display), 0);
        assert!(display.row_text(FIRST_ROW).contains("50%"));
        assert!(mixer.controls().iter().all(|c| !c.dirty));
    }

    #[test]
    fn test_failed_read_collapses_rows() {
        let (mut sim, mut catalog, mut display) =
            setup(&[("vol", false, 10), ("pcm", false, 20), ("line", false, 30)]);
        sim.fail_reads(0, 1, true);
        let mut renderer = Renderer::new(Theme::default());
        let mixer = catalog.mixer_mut(0).unwrap();
        renderer.reset(&mut display, mixer);

        assert_eq!(renderer.render(mixer, &sim, &mut display), 2);
        assert!(display.row_text(FIRST_ROW).starts_with("vol"));
        assert!(display.row_text(FIRST_ROW + 1).starts_with("line"));
        assert!(display.row_text(11).contains("cannot read control pcm"));
        assert!(renderer.banner().is_some_and(|b| b.starts_with("cannot read control pcm")));
        assert!(mixer.controls()[1].dirty);
        assert_eq!(mixer.controls()[2].row, Some(FIRST_ROW + 1));
    }

    #[test]
    fn test_recovered_control_shifts_rows_down() {
        let (mut sim, mut catalog, mut display) =
            setup(&[("vol", false, 10), ("pcm", false, 20), ("line", false, 30)]);
        sim.fail_reads(0, 1, true);
        let mut renderer = Renderer::new(Theme::default());
        let mixer = catalog.mixer_mut(0).unwrap();
        renderer.reset(&mut display, mixer);
        renderer.render(mixer, &sim, &mut display);

        sim.fail_reads(0, 1, false);
        assert_eq!(renderer.render(mixer, &sim, &mut display), 2);
        assert!(display.row_text(FIRST_ROW + 1).starts_with("pcm"));
        assert!(display.row_text(FIRST_ROW + 2).starts_with("line"));
    }

    #[test]
    fn test_vacated_rows_are_blanked() {
        let (mut sim, mut catalog, mut display) = setup(&[("vol", false, 10), ("pcm", false, 20)]);
        let mut renderer = Renderer::new(Theme::default());
        let mixer = catalog.mixer_mut(0).unwrap();
        renderer.reset(&mut display, mixer);
        renderer.render(mixer, &sim, &mut display);

        sim.fail_reads(0, 0, true);
        mixer.mark_dirty(0);
        mixer.mark_dirty(1);
        renderer.render(mixer, &sim, &mut display);

        assert!(display.row_text(FIRST_ROW).starts_with("pcm"));
        assert_eq!(display.row_text(FIRST_ROW + 1).trim(), "");
    }

    #[test]
    fn test_separator_spans_taller_pane() {
        let (sim, mut catalog, mut display) = setup(&[
            ("vol", false, 10),
            ("app1", true, 20),
            ("app2", true, 30),
            ("app3", true, 40),
        ]);
        let mut renderer = Renderer::new(Theme::default());
        let mixer = catalog.mixer_mut(0).unwrap();
        renderer.reset(&mut display, mixer);
        renderer.render(mixer, &sim, &mut display);

        let sep = |row: u16| display.canvas()[(SEPARATOR_COLUMN, row)].symbol().to_string();
        for row in FIRST_ROW..FIRST_ROW + 3 {
            assert_eq!(sep(row), SEPARATOR.to_string());
        }
        assert_eq!(sep(FIRST_ROW + 3), " ");
        let right: String = display
            .row_text(FIRST_ROW + 2)
            .chars()
            .skip(RIGHT_COLUMN as usize)
            .collect();
        assert!(right.starts_with("app3"));
    }

    #[test]
    fn test_label_truncated() {
        let (sim, mut catalog, mut display) = setup(&[("a-very-long-control-name", false, 0)]);
        let mut renderer = Renderer::new(Theme::default());
        let mixer = catalog.mixer_mut(0).unwrap();
        renderer.reset(&mut display, mixer);
        renderer.render(mixer, &sim, &mut display);

        assert!(display.row_text(FIRST_ROW).starts_with("a-very-long- "));
        assert!(display.row_text(FIRST_ROW).contains("  0%"));
    }

    #[test]
    fn test_volume_step_is_one_bar() {
        assert_eq!(volume_step(), 5);
        assert_eq!(RIGHT_COLUMN, 42);
        assert_eq!(CONTROL_WIDTH, 38);
    }
}
