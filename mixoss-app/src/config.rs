//! Runtime settings from the process environment
//!
//! There is no settings file. Unknown or malformed values fall back to the
//! defaults.

use mixoss_mixer::{VmixRule, DEFAULT_DEVICE};
use mixoss_tui::Theme;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_POLL_MS: u64 = 250;
const MIN_POLL_MS: u64 = 10;
const MAX_POLL_MS: u64 = 5000;

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Mixer device node
    pub device: PathBuf,
    /// Longest wait for a key before re-polling the hardware
    pub poll_interval: Duration,
    /// How virtual-mix controls are recognised
    pub vmix_rule: VmixRule,
    pub theme: Theme,
    /// Log destination when logging is enabled
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
            poll_interval: Duration::from_millis(DEFAULT_POLL_MS),
            vmix_rule: VmixRule::default(),
            theme: Theme::default(),
            log_file: None,
        }
    }
}

impl Settings {
    /// Settings from the current process environment
    pub fn from_env() -> Self {
        Self::from_vars(utf8_vars(std::env::vars_os()))
    }

    /// Settings from `MIXOSS_*` key/value pairs
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut settings = Self::default();

        for (key, value) in vars {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.as_str() {
                "MIXOSS_DEVICE" => settings.device = PathBuf::from(value),
                "MIXOSS_POLL_MS" => {
                    if let Ok(ms) = value.parse::<u64>() {
                        settings.poll_interval =
                            Duration::from_millis(ms.clamp(MIN_POLL_MS, MAX_POLL_MS));
                    }
                }
                "MIXOSS_VMIX_MATCH" => match value {
                    "extname" => settings.vmix_rule = VmixRule::default(),
                    "pcm-id" => settings.vmix_rule = VmixRule::PcmId,
                    _ => {}
                },
                "MIXOSS_THEME" => {
                    if let Some(theme) = Theme::by_name(value) {
                        settings.theme = theme;
                    }
                }
                "MIXOSS_LOG_FILE" => settings.log_file = Some(PathBuf::from(value)),
                _ => {} // Ignore unrelated variables
            }
        }

        settings
    }

    /// Log file to use: the configured one or `<cache dir>/mixoss/mixoss.log`
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mixoss")
                .join("mixoss.log")
        })
    }
}

/// Keep only variables whose name and value are valid UTF-8
fn utf8_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
}
