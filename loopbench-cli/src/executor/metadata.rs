//! System Metadata Collection
//!
//! Collects system information for report metadata.
//!
//! ## Collected Data
//!
//! - **OS**: Operating system name and architecture
//! - **CPU**: Model name and core count
//! - **Timestamp**: UTC time of report generation
//!
//! The CPU model is read from `/proc/cpuinfo` and degrades to "Unknown" on
//! other platforms.

use chrono::Utc;
use loopbench_report::{ReportConfig, ReportMeta, SCHEMA_VERSION, SystemInfo};

/// Build report metadata including system info
pub fn build_report_meta(config: ReportConfig) -> ReportMeta {
    let system = SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu: get_cpu_model().unwrap_or_else(|| "Unknown".to_string()),
        cpu_cores: num_cpus(),
    };

    ReportMeta {
        schema_version: SCHEMA_VERSION,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        system,
        config,
    }
}

#[cfg(target_os = "linux")]
fn get_cpu_model() -> Option<String> {
    let cpuinfo = std::fs::read_to_string("/proc/cpuinfo").ok()?;
    parse_cpu_model(&cpuinfo)
}

#[cfg(not(target_os = "linux"))]
fn get_cpu_model() -> Option<String> {
    None
}

/// First `model name` entry of a cpuinfo listing
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_cpu_model(cpuinfo: &str) -> Option<String> {
    cpuinfo.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        (key.trim() == "model name").then(|| value.trim().to_string())
    })
}

fn num_cpus() -> u32 {
    std::thread::available_parallelism().map_or(1, |n| n.get() as u32)
}
