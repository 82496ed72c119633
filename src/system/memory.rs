use sysinfo::System;

use crate::format;

/// One reading of the host memory counters. Recomputed every tick, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemorySnapshot {
    pub used_bytes: f64,
    pub non_system_used_bytes: f64,
    pub total_bytes: f64,
}

impl MemorySnapshot {
    pub fn used_percent(&self) -> u8 {
        format::percent_of(self.used_bytes, self.total_bytes)
    }

    pub fn non_system_used_percent(&self) -> u8 {
        format::percent_of(self.non_system_used_bytes, self.total_bytes)
    }

    pub fn usage_text(&self) -> String {
        format::ram_usage_text(self.used_bytes, self.total_bytes)
    }
}

/// Synchronous host memory sampler. A failed read yields `None` and the
/// caller keeps whatever it displayed last.
pub struct MemorySampler {
    sys: System,
}

impl Default for MemorySampler {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySampler {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        MemorySampler { sys }
    }

    pub fn sample(&mut self) -> Option<MemorySnapshot> {
        self.sys.refresh_memory();
        let total_bytes = self.sys.total_memory() as f64;
        if total_bytes <= 0.0 {
            return None;
        }

        let (used_bytes, non_system_used_bytes) = self.used_counters()?;
        Some(MemorySnapshot {
            used_bytes,
            non_system_used_bytes,
            total_bytes,
        })
    }

    /// "Used" counts active, wired and compressor pages; "non-system" counts
    /// active pages only — wired and compressor memory is treated as
    /// system-attributable.
    #[cfg(target_os = "macos")]
    fn used_counters(&self) -> Option<(f64, f64)> {
        mach::page_counters()
    }

    /// Non-mach hosts have no active/wired/compressor split; report the
    /// sysinfo used figure for both.
    #[cfg(not(target_os = "macos"))]
    fn used_counters(&self) -> Option<(f64, f64)> {
        let used = self.sys.used_memory() as f64;
        Some((used, used))
    }
}

#[cfg(target_os = "macos")]
mod mach {
    /// Reads the kernel VM statistics via `host_statistics64`. Any kernel
    /// error yields `None`.
    pub(super) fn page_counters() -> Option<(f64, f64)> {
        unsafe {
            let mut stats: libc::vm_statistics64 = std::mem::zeroed();
            let mut count = (std::mem::size_of::<libc::vm_statistics64>()
                / std::mem::size_of::<i32>()) as u32;

            // host_statistics64 wants a host port, not a task port
            let kern_result = libc::host_statistics64(
                libc::mach_host_self(),
                6, // HOST_VM_INFO64
                (&mut stats) as *mut libc::vm_statistics64 as *mut i32,
                &mut count,
            );
            if kern_result != 0 {
                tracing::debug!(kern_result, "host_statistics64 failed");
                return None;
            }

            let page_size = libc::sysconf(libc::_SC_PAGESIZE);
            if page_size <= 0 {
                return None;
            }
            let page_size = page_size as f64;

            let used_pages = stats.active_count as f64
                + stats.wire_count as f64
                + stats.compressor_page_count as f64;
            let non_system_pages = stats.active_count as f64;
            Some((used_pages * page_size, non_system_pages * page_size))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_percentages_match_reference_figures() {
        let snapshot = MemorySnapshot {
            used_bytes: 8e9,
            non_system_used_bytes: 4e9,
            total_bytes: 16e9,
        };
        assert_eq!(snapshot.used_percent(), 50);
        assert_eq!(snapshot.non_system_used_percent(), 25);
        assert_eq!(snapshot.usage_text(), "7.5/14.9G");
    }

    #[test]
    fn snapshot_percent_is_clamped_when_counters_exceed_total() {
        let snapshot = MemorySnapshot {
            used_bytes: 32e9,
            non_system_used_bytes: 32e9,
            total_bytes: 16e9,
        };
        assert_eq!(snapshot.used_percent(), 100);
        assert_eq!(snapshot.non_system_used_percent(), 100);
    }

    #[test]
    fn live_sample_is_coherent() {
        let mut sampler = MemorySampler::new();
        if let Some(snapshot) = sampler.sample() {
            assert!(snapshot.total_bytes > 0.0);
            assert!(snapshot.used_percent() <= 100);
            assert!(snapshot.non_system_used_bytes <= snapshot.used_bytes + f64::EPSILON);
        }
    }

    // A running macOS host always has active and wired pages; a kernel error
    // here (e.g. the wrong port handed to host_statistics64) would show up as
    // None and leave the UI stuck on its placeholders.
    #[cfg(target_os = "macos")]
    #[test]
    fn mach_counters_are_readable_on_the_host() {
        let (used, non_system) = mach::page_counters().expect("host vm statistics");
        assert!(used > 0.0);
        assert!(non_system > 0.0);
        assert!(non_system <= used);
    }
}
