use crate::profile::AbstractProfile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level acer-thermal configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub firmware: FirmwareConfig,
    pub auto: AutoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirmwareConfig {
    /// Control file of the acpi_call kernel module.
    pub acpi_call_path: PathBuf,
    /// ACPI path of the WMI method handler for the gaming GUID.
    pub method_path: String,
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self {
            acpi_call_path: PathBuf::from("/proc/acpi/call"),
            method_path: "\\_SB.PC00.WMID.WMBH".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoConfig {
    /// Profile restored once temperatures drop back under hysteresis.
    pub desired_profile: AbstractProfile,
    /// Profile forced while either threshold is exceeded.
    pub boost_profile: AbstractProfile,
    /// Degrees Celsius.
    pub cpu_threshold: i32,
    pub gpu_threshold: i32,
    pub cpu_hysteresis: i32,
    pub gpu_hysteresis: i32,
    pub interval_secs: u64,
    /// Sample the discrete GPU through nvidia-smi.
    pub gpu_temperature: bool,
}

impl Default for AutoConfig {
    fn default() -> Self {
        Self {
            desired_profile: AbstractProfile::Balanced,
            boost_profile: AbstractProfile::Performance,
            cpu_threshold: 80,
            gpu_threshold: 70,
            cpu_hysteresis: 75,
            gpu_hysteresis: 65,
            interval_secs: 2,
            gpu_temperature: true,
        }
    }
}

const SYSTEM_CONFIG: &str = "/etc/acer-thermal/config.toml";

fn load_system() -> Option<toml::Value> {
    let content = std::fs::read_to_string(SYSTEM_CONFIG).ok()?;
    toml::from_str(&content).ok()
}

/// ~/.config/acer-thermal/config.toml
fn load_user() -> Option<toml::Value> {
    let dir = dirs::config_dir()?;
    let path = dir.join("acer-thermal").join("config.toml");
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Recursively merge two TOML values. Tables are merged key-by-key;
/// all other types in `overlay` replace `base`.
fn merge_values(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_values(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

fn load_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "failed to parse config");
            Config::default()
        }),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read config");
            Config::default()
        }
    }
}

/// System file first, user file on top. `override_path` replaces both.
pub fn load(override_path: Option<&PathBuf>) -> Config {
    if let Some(path) = override_path {
        return load_from_path(path);
    }

    let merged = match (load_system(), load_user()) {
        (Some(s), Some(u)) => Some(merge_values(s, u)),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    };

    match merged {
        Some(value) => value.try_into().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to deserialize config");
            Config::default()
        }),
        None => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.firmware.acpi_call_path, PathBuf::from("/proc/acpi/call"));
        assert_eq!(config.firmware.method_path, "\\_SB.PC00.WMID.WMBH");
        assert_eq!(config.auto.desired_profile, AbstractProfile::Balanced);
        assert_eq!(config.auto.boost_profile, AbstractProfile::Performance);
        assert_eq!(config.auto.cpu_threshold, 80);
        assert_eq!(config.auto.gpu_threshold, 70);
        assert_eq!(config.auto.cpu_hysteresis, 75);
        assert_eq!(config.auto.gpu_hysteresis, 65);
        assert_eq!(config.auto.interval_secs, 2);
        assert!(config.auto.gpu_temperature);
    }

    #[test]
    fn test_merge_user_over_system() {
        let system: toml::Value = toml::from_str(
            r#"
            [firmware]
            method_path = "\\_SB.PCI0.WMID.WMBH"
            [auto]
            cpu_threshold = 85
            cpu_hysteresis = 80
        "#,
        )
        .unwrap();

        let user: toml::Value = toml::from_str(
            r#"
            [auto]
            cpu_threshold = 90
        "#,
        )
        .unwrap();

        let config: Config = merge_values(system, user).try_into().unwrap();
        assert_eq!(config.firmware.method_path, "\\_SB.PCI0.WMID.WMBH");
        assert_eq!(config.auto.cpu_threshold, 90);
        assert_eq!(config.auto.cpu_hysteresis, 80);
        assert_eq!(config.auto.gpu_threshold, 70);
    }

    #[test]
    fn test_merge_values_overlay_replaces_scalar() {
        let base: toml::Value = toml::from_str("value = 1").unwrap();
        let overlay: toml::Value = toml::from_str("value = 2").unwrap();
        let merged = merge_values(base, overlay);
        assert_eq!(merged["value"].as_integer(), Some(2));
    }

    #[test]
    fn test_deserialize_profiles_by_name() {
        let config: Config = toml::from_str(
            r#"
            [auto]
            desired_profile = "quiet"
            boost_profile = "balanced-performance"
            gpu_temperature = false
        "#,
        )
        .unwrap();
        assert_eq!(config.auto.desired_profile, AbstractProfile::Quiet);
        assert_eq!(
            config.auto.boost_profile,
            AbstractProfile::BalancedPerformance
        );
        assert!(!config.auto.gpu_temperature);
        assert_eq!(config.auto.interval_secs, 2);
    }

    #[test]
    fn test_unknown_profile_name_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [auto]
            desired_profile = "turbo"
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[firmware]\nacpi_call_path = \"/tmp/call\"\n").unwrap();

        let config = load(Some(&path));
        assert_eq!(config.firmware.acpi_call_path, PathBuf::from("/tmp/call"));
        assert_eq!(config.auto.desired_profile, AbstractProfile::Balanced);
    }

    #[test]
    fn test_load_from_nonexistent_path() {
        let config = load_from_path(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.auto.cpu_threshold, 80);
    }

    #[test]
    fn test_load_malformed_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[auto\ncpu_threshold = ").unwrap();

        let config = load_from_path(&path);
        assert_eq!(config.auto.cpu_threshold, 80);
    }
}
