use std::process::{Command, Stdio};

/// Samples instantaneous power draw by running an external helper once per
/// call. The helper prints one JSON object per line on stdout; only the first
/// line is read, and a numeric `all_power` field (watts) is expected there —
/// any further lines are deliberately ignored.
///
/// Blocks for the helper's sampling window plus spawn/exit latency (~200ms+
/// with the default arguments). Every failure mode collapses to `None`.
pub struct PowerSampler {
    program: String,
    args: Vec<String>,
}

impl Default for PowerSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerSampler {
    /// One power sample over a 200ms window.
    pub fn new() -> Self {
        Self::with_command("macmon", &["pipe", "-s", "1", "-i", "200"])
    }

    pub fn with_command(program: &str, args: &[&str]) -> Self {
        PowerSampler {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn sample(&self) -> Option<u32> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            tracing::debug!(status = ?output.status, "power helper exited non-zero");
            return None;
        }
        let stdout = String::from_utf8(output.stdout).ok()?;
        parse_watts_line(stdout.lines().next()?)
    }
}

/// Parses one line of helper output into a rounded watt count.
pub fn parse_watts_line(line: &str) -> Option<u32> {
    let value: serde_json::Value = serde_json::from_str(line).ok()?;
    let watts = value.get("all_power")?.as_f64()?;
    if !watts.is_finite() || watts < 0.0 {
        return None;
    }
    Some(watts.round() as u32)
}
