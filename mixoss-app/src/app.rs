//! Application state and the event loop
//!
//! One thread owns the gateway, the display and the catalog. Each tick waits
//! for input with a bounded timeout, checks the current mixer's modify
//! counter, then dispatches at most one key.

use mixoss_input::{map_key, Command, Input, InputSource};
use mixoss_mixer::{volume, Catalog, Mixer, MixerError, MixerGateway};
use mixoss_tui::{volume_step, Display, Renderer, Theme};
use std::io;
use std::time::Duration;

/// Application state
pub struct App {
    catalog: Catalog,
    /// Index of the mixer on screen
    current: usize,
    renderer: Renderer,
    /// Modify counter seen at the last poll, `None` forces a repaint
    last_modify_counter: Option<i32>,
    poll_interval: Duration,
    pub should_quit: bool,
}

impl App {
    /// Start on mixer 0, which must be enabled
    pub fn new(
        catalog: Catalog,
        theme: Theme,
        poll_interval: Duration,
    ) -> Result<Self, MixerError> {
        let first = catalog.mixer(0).ok_or(MixerError::NoMixers)?;
        if !first.enabled {
            return Err(MixerError::Disabled {
                mixer: 0,
                name: first.name.clone(),
            });
        }
        let last_modify_counter = Some(first.modify_counter);

        Ok(Self {
            catalog,
            current: 0,
            renderer: Renderer::new(theme),
            last_modify_counter,
            poll_interval,
            should_quit: false,
        })
    }

    pub fn current_mixer(&self) -> Option<&Mixer> {
        self.catalog.mixer(self.current)
    }

    /// Clear the screen and paint the whole current mixer
    pub fn repaint<G, D>(&mut self, gateway: &G, display: &mut D)
    where
        G: MixerGateway + ?Sized,
        D: Display + ?Sized,
    {
        if let Some(mixer) = self.catalog.mixer_mut(self.current) {
            self.renderer.reset(display, mixer);
            self.renderer.render(mixer, gateway, display);
        }
    }

    /// Repaint everything when the hardware reports a change
    pub fn poll_hardware<G, D>(&mut self, gateway: &G, display: &mut D)
    where
        G: MixerGateway + ?Sized,
        D: Display + ?Sized,
    {
        let info = match gateway.mixer_info(self.current) {
            Ok(info) => info,
            Err(source) => {
                let err = MixerError::MixerInfo {
                    mixer: self.current,
                    source,
                };
                self.report(display, &err);
                return;
            }
        };

        if self.last_modify_counter == Some(info.modify_counter) {
            return;
        }

        tracing::debug!(
            "mixer {} modify counter {:?} -> {}",
            self.current,
            self.last_modify_counter,
            info.modify_counter
        );
        if let Some(mixer) = self.catalog.mixer_mut(self.current) {
            mixer.modify_counter = info.modify_counter;
            mixer.mark_all_dirty();
            self.renderer.render(mixer, gateway, display);
        }
        self.last_modify_counter = Some(info.modify_counter);
    }

    pub fn handle_command<G, D>(&mut self, cmd: Command, gateway: &mut G, display: &mut D)
    where
        G: MixerGateway + ?Sized,
        D: Display + ?Sized,
    {
        if cmd == Command::Quit {
            tracing::info!("quit requested");
            self.should_quit = true;
            return;
        }

        self.renderer.clear_banner(display);

        match cmd {
            Command::SelectNext | Command::SelectPrev => {
                let Some(mixer) = self.catalog.mixer_mut(self.current) else {
                    return;
                };
                let moved = if cmd == Command::SelectNext {
                    mixer.select_next()
                } else {
                    mixer.select_prev()
                };
                if moved {
                    self.renderer.render(mixer, &*gateway, display);
                }
            }
            Command::VolumeDown => self.step_volume(-volume_step(), gateway, display),
            Command::VolumeUp => self.step_volume(volume_step(), gateway, display),
            Command::SetDecile(digit) => {
                self.set_volume(Command::decile_percent(digit), gateway, display)
            }
            Command::NextMixer => self.switch_mixer(&*gateway, display),
            Command::Quit => {}
        }
    }

    fn step_volume<G, D>(&mut self, delta: i32, gateway: &mut G, display: &mut D)
    where
        G: MixerGateway + ?Sized,
        D: Display + ?Sized,
    {
        let Some(control) = self
            .catalog
            .mixer(self.current)
            .and_then(Mixer::selected_control)
        else {
            return;
        };

        match volume::read_percent(&*gateway, control) {
            Ok(current) => self.set_volume(i32::from(current) + delta, gateway, display),
            Err(e) => self.report(display, &e),
        }
    }

    fn set_volume<G, D>(&mut self, percent: i32, gateway: &mut G, display: &mut D)
    where
        G: MixerGateway + ?Sized,
        D: Display + ?Sized,
    {
        let Some(mixer) = self.catalog.mixer_mut(self.current) else {
            return;
        };
        let Some(idx) = mixer.selected() else {
            return;
        };
        let Some(control) = mixer.control(idx) else {
            return;
        };

        if let Err(e) = volume::write_percent(gateway, control, percent) {
            tracing::warn!("{}", e);
            self.renderer.show_banner(display, &e.to_string());
            return;
        }
        mixer.mark_dirty(idx);
        self.renderer.render(mixer, &*gateway, display);
    }

    fn switch_mixer<G, D>(&mut self, gateway: &G, display: &mut D)
    where
        G: MixerGateway + ?Sized,
        D: Display + ?Sized,
    {
        let Some(next) = self.catalog.next_usable(self.current) else {
            return;
        };
        if next == self.current {
            return;
        }

        tracing::info!("switching to mixer {}", next);
        self.current = next;
        self.last_modify_counter = None;
        self.repaint(gateway, display);
    }

    fn report<D: Display + ?Sized>(&mut self, display: &mut D, err: &dyn std::fmt::Display) {
        tracing::warn!("{}", err);
        self.renderer.show_banner(display, &err.to_string());
    }
}

/// Run the event loop until a quit key is pressed
///
/// Only display flush failures end the loop early.
pub fn run<G, D, I>(
    app: &mut App,
    gateway: &mut G,
    display: &mut D,
    input: &mut I,
) -> io::Result<()>
where
    G: MixerGateway + ?Sized,
    D: Display + ?Sized,
    I: InputSource + ?Sized,
{
    app.repaint(&*gateway, display);
    let warnings = app.catalog.warnings().join("; ");
    if !warnings.is_empty() {
        // keep any read failure from the first paint
        let message = match app.renderer.banner() {
            Some(banner) => format!("{warnings}; {banner}"),
            None => warnings,
        };
        app.renderer.show_banner(display, &message);
    }
    display.flush()?;

    while !app.should_quit {
        let ready = match input.wait(app.poll_interval) {
            Ok(ready) => ready,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                app.report(display, &format!("waiting for input failed: {e}"));
                false
            }
        };

        app.poll_hardware(&*gateway, display);

        if ready {
            match input.read() {
                Ok(Some(Input::Key(key))) => {
                    if let Some(cmd) = map_key(key) {
                        app.handle_command(cmd, gateway, display);
                    }
                }
                Ok(Some(Input::Resize)) => match display.resize() {
                    Ok(()) => app.repaint(&*gateway, display),
                    Err(e) => app.report(display, &format!("cannot resize display: {e}")),
                },
                Ok(None) => {}
                Err(e) => app.report(display, &format!("cannot read input: {e}")),
            }
        }

        display.flush()?;
    }

    tracing::info!("event loop finished");
    Ok(())
}
