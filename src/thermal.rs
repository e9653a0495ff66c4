use crate::sysfs::SysfsRoot;
use serde::Serialize;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

const THERMAL_ZONES: usize = 10;
const NVIDIA_SMI_TIMEOUT: Duration = Duration::from_secs(1);

/// One sample, in degrees Celsius. `None` means the sensor was unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Temperatures {
    pub cpu: Option<i32>,
    pub gpu: Option<i32>,
}

pub trait TemperatureSource {
    fn sample(&self) -> Temperatures;
}

/// Reads the CPU package zone from sysfs and, optionally, the discrete GPU
/// through `nvidia-smi`.
#[derive(Debug, Clone)]
pub struct SystemTemperatures {
    sysfs: SysfsRoot,
    gpu: bool,
}

impl SystemTemperatures {
    pub fn new(sysfs: SysfsRoot, gpu: bool) -> Self {
        Self { sysfs, gpu }
    }
}

impl TemperatureSource for SystemTemperatures {
    fn sample(&self) -> Temperatures {
        Temperatures {
            cpu: cpu_package_temp(&self.sysfs),
            gpu: if self.gpu { nvidia_gpu_temp() } else { None },
        }
    }
}

/// First thermal zone whose type names the CPU package.
pub fn cpu_package_temp(sysfs: &SysfsRoot) -> Option<i32> {
    for i in 0..THERMAL_ZONES {
        let zone = format!("sys/class/thermal/thermal_zone{}", i);
        let Some(kind) = sysfs.read_optional(format!("{}/type", zone)).ok().flatten() else {
            continue;
        };
        if kind.contains("x86_pkg") || kind.to_ascii_lowercase().contains("cpu") {
            let millis: i64 = sysfs.read_parse(format!("{}/temp", zone)).ok()?;
            return i32::try_from(millis / 1000).ok();
        }
    }
    None
}

fn nvidia_gpu_temp() -> Option<i32> {
    let mut child = Command::new("nvidia-smi")
        .args([
            "--query-gpu=temperature.gpu",
            "--format=csv,noheader,nounits",
        ])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;

    let deadline = Instant::now() + NVIDIA_SMI_TIMEOUT;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => break,
            Ok(None) if Instant::now() < deadline => {
                std::thread::sleep(Duration::from_millis(20));
            }
            _ => {
                tracing::debug!("nvidia-smi timed out");
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
        }
    }

    let output = child.wait_with_output().ok()?;
    if !output.status.success() {
        return None;
    }
    parse_nvidia_smi(&String::from_utf8_lossy(&output.stdout))
}

/// First line of `nvidia-smi --format=csv,noheader,nounits`.
fn parse_nvidia_smi(stdout: &str) -> Option<i32> {
    stdout.lines().next()?.trim().parse().ok()
}
