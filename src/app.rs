use std::process::{Command, Stdio};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::format::watts_text;
use crate::launch_agent::LaunchAgent;
use crate::menu::{MenuEntry, build_entries};
use crate::settings::SettingsStore;
use crate::system::memory::{MemorySampler, MemorySnapshot};
use crate::system::power::PowerSampler;

// Placeholder notification hook; its output is never consumed.
const LIMIT_HOOK_TEMPLATE: &str = "echo \"Non-system RAM limit set to {PERCENT}%\"";
pub const LIMIT_HOOK_PERIOD: Duration = Duration::from_secs(900);

/// The published view of the latest samples: pre-clamped percentages,
/// pre-formatted texts.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub used_percent: u8,
    pub non_system_used_percent: u8,
    pub ram_usage_text: String,
    pub watts_text: String,
}

impl Default for Readout {
    fn default() -> Self {
        Readout {
            used_percent: 0,
            non_system_used_percent: 0,
            ram_usage_text: "--/--G".to_string(),
            watts_text: "--W".to_string(),
        }
    }
}

pub struct App {
    pub running: bool,
    pub memory: MemorySampler,
    pub power: PowerSampler,
    pub settings: SettingsStore,
    pub launch_agent: LaunchAgent,
    pub readout: Readout,
    pub selected: usize,
    pending_interval: Option<Duration>,
}

impl App {
    pub fn new(settings: SettingsStore, launch_agent: LaunchAgent) -> Self {
        let mut app = App {
            running: true,
            memory: MemorySampler::new(),
            power: PowerSampler::new(),
            settings,
            launch_agent,
            readout: Readout::default(),
            selected: 0,
            pending_interval: None,
        };
        app.refresh();
        app
    }

    pub fn refresh(&mut self) {
        let memory = self.memory.sample();
        let watts = self.power.sample();
        self.apply_sample(memory, watts);
    }

    /// A failed memory sample keeps the previous readout; a failed power
    /// sample resets the wattage to its placeholder.
    pub fn apply_sample(&mut self, memory: Option<MemorySnapshot>, watts: Option<u32>) {
        if let Some(snapshot) = memory {
            self.readout.used_percent = snapshot.used_percent();
            self.readout.non_system_used_percent = snapshot.non_system_used_percent();
            self.readout.ram_usage_text = snapshot.usage_text();
        } else {
            tracing::debug!("memory counters unreadable, keeping previous readout");
        }
        self.readout.watts_text = watts_text(watts);
    }

    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        build_entries(
            &self.readout,
            self.settings.refresh_interval_secs(),
            self.settings.non_system_limit_percent(),
            self.launch_agent.is_enabled(),
        )
    }

    pub fn limit_exceeded(&self) -> bool {
        self.readout.non_system_used_percent >= self.settings.non_system_limit_percent()
    }

    pub fn take_interval_change(&mut self) -> Option<Duration> {
        self.pending_interval.take()
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('r') => Action::ForceRefresh,
            KeyCode::Up | KeyCode::Char('k') => Action::MenuUp,
            KeyCode::Down | KeyCode::Char('j') => Action::MenuDown,
            KeyCode::Enter => Action::Activate,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ForceRefresh => self.refresh(),
            Action::OpenMacmonTerminal => open_macmon_terminal(),
            Action::ToggleStartup => {
                let enabled = !self.launch_agent.is_enabled();
                self.launch_agent.set_enabled(enabled);
            }
            Action::SetRefreshInterval(secs) => {
                let applied = self.settings.set_refresh_interval(secs);
                self.pending_interval = Some(Duration::from_secs(applied));
                // One extra sample outside the regular cadence
                self.refresh();
            }
            Action::SetNonSystemLimit(percent) => {
                let applied = self.settings.set_non_system_limit(percent);
                self.run_limit_hook();
                tracing::debug!(applied, "non-system limit changed");
                self.refresh();
            }
            Action::MenuUp => self.select_previous(),
            Action::MenuDown => self.select_next(),
            Action::Activate => {
                if let Some(action) = self.selected_action() {
                    self.dispatch(action);
                }
            }
            Action::None => {}
        }
    }

    pub fn selected_action(&self) -> Option<Action> {
        let entries = self.menu_entries();
        entries
            .get(self.selected)
            .filter(|e| e.selectable)
            .map(|e| e.action)
    }

    fn select_previous(&mut self) {
        let entries = self.menu_entries();
        let mut index = self.selected;
        while index > 0 {
            index -= 1;
            if entries[index].selectable {
                self.selected = index;
                return;
            }
        }
    }

    fn select_next(&mut self) {
        let entries = self.menu_entries();
        let mut index = self.selected;
        while index + 1 < entries.len() {
            index += 1;
            if entries[index].selectable {
                self.selected = index;
                return;
            }
        }
    }

    pub fn run_limit_hook(&self) {
        let percent = self.settings.non_system_limit_percent();
        let command = LIMIT_HOOK_TEMPLATE.replace("{PERCENT}", &percent.to_string());
        run_shell_quietly(&command);
    }
}

#[cfg(unix)]
fn run_shell_quietly(command: &str) {
    let _ = Command::new("/bin/sh")
        .args(["-lc", command])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
}

#[cfg(not(unix))]
fn run_shell_quietly(command: &str) {
    tracing::debug!(command, "limit hook skipped on this platform");
}

#[cfg(target_os = "macos")]
fn open_macmon_terminal() {
    let script = r#"tell application "Terminal"
    activate
    do script "macmon"
end tell"#;
    let _ = Command::new("/usr/bin/osascript")
        .args(["-e", script])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
}

#[cfg(not(target_os = "macos"))]
fn open_macmon_terminal() {
    tracing::debug!("terminal launch is only wired up on macOS");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_app(name: &str) -> (App, PathBuf) {
        let dir = std::env::temp_dir().join(format!("rambar_app_test_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        let settings = SettingsStore::load_from_path(&dir.join("settings.toml"));
        let launch_agent = LaunchAgent::at_dir(&dir.join("agents"));
        let mut app = App::new(settings, launch_agent);
        // Deterministic samplers: no helper binary, known readout
        app.power = PowerSampler::with_command("rambar-no-such-helper", &[]);
        app.apply_sample(
            Some(MemorySnapshot {
                used_bytes: 8e9,
                non_system_used_bytes: 4e9,
                total_bytes: 16e9,
            }),
            Some(13),
        );
        (app, dir)
    }

    #[test]
    fn failed_memory_sample_keeps_previous_readout() {
        let (mut app, dir) = test_app("stale");
        app.apply_sample(None, None);
        assert_eq!(app.readout.ram_usage_text, "7.5/14.9G");
        assert_eq!(app.readout.used_percent, 50);
        // Power resets to its placeholder instead
        assert_eq!(app.readout.watts_text, "--W");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn interval_change_is_persisted_and_signalled() {
        let (mut app, dir) = test_app("interval");
        app.dispatch(Action::SetRefreshInterval(30));
        assert_eq!(app.settings.refresh_interval_secs(), 30);
        assert_eq!(app.take_interval_change(), Some(Duration::from_secs(30)));
        assert_eq!(app.take_interval_change(), None);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[test]
    fn interval_change_forces_an_immediate_sample() {
        let (mut app, dir) = test_app("forced_sample");
        assert_eq!(app.readout.watts_text, "13W");

        // The next helper run reports a different draw; only the forced
        // sample inside dispatch can surface it before the next tick.
        app.power = PowerSampler::with_command("sh", &["-c", r#"echo '{"all_power":21.4}'"#]);
        app.dispatch(Action::SetRefreshInterval(30));
        assert_eq!(app.readout.watts_text, "21W");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn out_of_set_interval_falls_back_to_default() {
        let (mut app, dir) = test_app("bad_interval");
        app.dispatch(Action::SetRefreshInterval(42));
        assert_eq!(app.settings.refresh_interval_secs(), 10);
        assert_eq!(app.take_interval_change(), Some(Duration::from_secs(10)));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn toggle_startup_flips_descriptor_existence() {
        let (mut app, dir) = test_app("startup");
        assert!(!app.launch_agent.is_enabled());
        app.dispatch(Action::ToggleStartup);
        assert!(app.launch_agent.is_enabled());
        app.dispatch(Action::ToggleStartup);
        assert!(!app.launch_agent.is_enabled());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn menu_navigation_skips_inert_rows() {
        let (mut app, dir) = test_app("nav");
        let entries = app.menu_entries();
        assert!(entries[0].selectable);

        // Walk down past the readouts and the Settings header
        app.dispatch(Action::MenuDown);
        app.dispatch(Action::MenuDown);
        app.dispatch(Action::MenuDown);
        assert_eq!(
            app.selected_action(),
            Some(Action::SetRefreshInterval(1)),
            "cursor should land on the first radio item"
        );

        app.dispatch(Action::MenuUp);
        assert_eq!(app.selected_action(), Some(Action::ToggleStartup));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn limit_exceeded_compares_against_setting() {
        let (mut app, dir) = test_app("limit");
        app.readout.non_system_used_percent = 75;
        assert!(app.limit_exceeded());
        app.readout.non_system_used_percent = 74;
        assert!(!app.limit_exceeded());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn quit_keys_map_to_quit() {
        let (app, dir) = test_app("keys");
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Quit);
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(key), Action::Quit);
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Activate);
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::None);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
