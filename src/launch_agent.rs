use std::path::{Path, PathBuf};

pub const LAUNCH_AGENT_LABEL: &str = "com.daffibot.rambar";

/// Manages the login-item descriptor: a launchd property list at a fixed
/// path under the user's LaunchAgents directory. Enabled means the file
/// exists. Write and delete failures are swallowed, so the displayed toggle
/// can diverge from what the OS actually does — an acknowledged gap.
pub struct LaunchAgent {
    plist_path: PathBuf,
}

impl Default for LaunchAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl LaunchAgent {
    pub fn new() -> Self {
        let base = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Library")
            .join("LaunchAgents");
        Self::at_dir(&base)
    }

    /// Places the descriptor under `dir` instead of the user's LaunchAgents
    /// directory.
    pub fn at_dir(dir: &Path) -> Self {
        LaunchAgent {
            plist_path: dir.join(format!("{LAUNCH_AGENT_LABEL}.plist")),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.plist_path.exists()
    }

    pub fn set_enabled(&self, enabled: bool) {
        if enabled {
            if let Err(err) = self.install() {
                tracing::warn!(path = ?self.plist_path, %err, "could not install launch agent");
            }
        } else if let Err(err) = std::fs::remove_file(&self.plist_path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = ?self.plist_path, %err, "could not remove launch agent");
            }
        }
    }

    fn install(&self) -> std::io::Result<()> {
        let exe = std::env::current_exe()?;
        if let Some(parent) = self.plist_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.plist_path, plist_contents(&exe))
    }
}

fn plist_contents(exe: &Path) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>Label</key>
	<string>{label}</string>
	<key>ProgramArguments</key>
	<array>
		<string>{exe}</string>
	</array>
	<key>RunAtLoad</key>
	<true/>
	<key>KeepAlive</key>
	<true/>
</dict>
</plist>
"#,
        label = LAUNCH_AGENT_LABEL,
        exe = exe.display(),
    )
}
