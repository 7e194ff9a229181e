#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct ProcessStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub elapsed_time: Duration,
}

/// Samples CPU/memory for the current process. Used behind `--monitor`.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: System,
    pid: Pid,
    start_time: Instant,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new() -> Option<Self> {
        let pid = sysinfo::get_current_pid().ok()?;
        let mut system = System::new();
        system.refresh_all();

        Some(Self {
            system,
            pid,
            start_time: Instant::now(),
        })
    }

    pub fn snapshot(&mut self) -> Option<ProcessStats> {
        self.system.refresh_all();
        let process = self.system.process(self.pid)?;

        Some(ProcessStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: process.memory() / 1024 / 1024,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_snapshot(&mut self) {
        if let Some(stats) = self.snapshot() {
            tracing::info!(
                "🔍 Process stats: cpu={:.1}% mem={}MB elapsed={:.1}s",
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.elapsed_time.as_secs_f64()
            );
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reports_current_process() {
        let mut monitor = SystemMonitor::new().expect("current pid should resolve");
        let stats = monitor.snapshot();
        // The current process must be visible to sysinfo.
        assert!(stats.is_some());
    }
}
