use crate::action::Action;
use crate::app::Readout;
use crate::settings::{LIMIT_CHOICES, REFRESH_CHOICES};

/// One row of the drop-down menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub label: String,
    pub action: Action,
    /// `Some(state)` renders a check/radio mark, `None` renders plain text.
    pub checked: Option<bool>,
    pub selectable: bool,
    pub separator: bool,
}

impl MenuEntry {
    fn item(label: impl Into<String>, action: Action) -> Self {
        MenuEntry {
            label: label.into(),
            action,
            checked: None,
            selectable: true,
            separator: false,
        }
    }

    fn checked_item(label: impl Into<String>, action: Action, checked: bool) -> Self {
        MenuEntry {
            checked: Some(checked),
            ..Self::item(label, action)
        }
    }

    fn readout(label: impl Into<String>) -> Self {
        MenuEntry {
            label: label.into(),
            action: Action::None,
            checked: None,
            selectable: false,
            separator: false,
        }
    }

    fn header(label: impl Into<String>) -> Self {
        Self::readout(label)
    }

    fn separator() -> Self {
        MenuEntry {
            label: String::new(),
            action: Action::None,
            checked: None,
            selectable: false,
            separator: true,
        }
    }
}

pub fn build_entries(
    readout: &Readout,
    refresh_secs: u64,
    limit_percent: u8,
    startup_enabled: bool,
) -> Vec<MenuEntry> {
    let limit_state = if readout.non_system_used_percent >= limit_percent {
        "HIGH"
    } else {
        "OK"
    };

    let mut entries = vec![
        MenuEntry::item("Force Refresh", Action::ForceRefresh),
        MenuEntry::item("Open macmon in Terminal", Action::OpenMacmonTerminal),
        MenuEntry::checked_item("Start on Startup", Action::ToggleStartup, startup_enabled),
        MenuEntry::readout(format!("RAM: {}", readout.ram_usage_text)),
        MenuEntry::readout(format!(
            "Non-system RAM: {}% (limit {}%, {})",
            readout.non_system_used_percent, limit_percent, limit_state
        )),
        MenuEntry::separator(),
        MenuEntry::header("Settings"),
    ];

    for secs in REFRESH_CHOICES {
        let label = if secs == 1 {
            "1 second refresh".to_string()
        } else {
            format!("{secs} second refresh")
        };
        entries.push(MenuEntry::checked_item(
            label,
            Action::SetRefreshInterval(secs),
            secs == refresh_secs,
        ));
    }

    entries.push(MenuEntry::separator());
    entries.push(MenuEntry::header("Non-system RAM Limit"));
    for percent in LIMIT_CHOICES {
        entries.push(MenuEntry::checked_item(
            format!("Set limit to {percent}%"),
            Action::SetNonSystemLimit(percent),
            percent == limit_percent,
        ));
    }

    entries.push(MenuEntry::separator());
    entries.push(MenuEntry::item("Quit", Action::Quit));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;

    fn test_readout() -> Readout {
        Readout {
            used_percent: 50,
            non_system_used_percent: 34,
            ram_usage_text: "7.5/14.9G".to_string(),
            watts_text: "13W".to_string(),
        }
    }

    #[test]
    fn menu_labels_mirror_the_status_menu() {
        let entries = build_entries(&test_readout(), 10, 75, false);
        let labels: Vec<String> = entries
            .iter()
            .filter(|e| !e.separator)
            .map(|e| e.label.clone())
            .collect();
        assert_debug_snapshot!(labels, @r#"
        [
            "Force Refresh",
            "Open macmon in Terminal",
            "Start on Startup",
            "RAM: 7.5/14.9G",
            "Non-system RAM: 34% (limit 75%, OK)",
            "Settings",
            "1 second refresh",
            "3 second refresh",
            "5 second refresh",
            "10 second refresh",
            "30 second refresh",
            "60 second refresh",
            "Non-system RAM Limit",
            "Set limit to 75%",
            "Set limit to 85%",
            "Set limit to 90%",
            "Quit",
        ]
        "#);
    }

    #[test]
    fn radio_marks_follow_current_settings() {
        let entries = build_entries(&test_readout(), 30, 85, true);
        let checked: Vec<&str> = entries
            .iter()
            .filter(|e| e.checked == Some(true))
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(
            checked,
            vec!["Start on Startup", "30 second refresh", "Set limit to 85%"]
        );
    }

    #[test]
    fn limit_state_reads_high_at_or_above_limit() {
        let mut readout = test_readout();
        readout.non_system_used_percent = 75;
        let entries = build_entries(&readout, 10, 75, false);
        assert!(entries.iter().any(|e| e.label.ends_with("HIGH)")));

        readout.non_system_used_percent = 74;
        let entries = build_entries(&readout, 10, 75, false);
        assert!(entries.iter().any(|e| e.label.ends_with("OK)")));
    }

    #[test]
    fn readouts_and_headers_are_not_selectable() {
        let entries = build_entries(&test_readout(), 10, 75, false);
        for entry in &entries {
            if entry.label.starts_with("RAM:")
                || entry.label.starts_with("Non-system RAM:")
                || entry.label == "Settings"
                || entry.label == "Non-system RAM Limit"
                || entry.separator
            {
                assert!(!entry.selectable, "{} should be inert", entry.label);
            }
        }
    }
}
