use crate::sysfs::SysfsRoot;
use serde::Serialize;

/// Platform profile registered by a kernel driver, if any. A kernel
/// `acer-wmi` with predator support would compete for the same firmware
/// setting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlatformInfo {
    pub platform_profile: Option<String>,
    pub platform_profile_choices: Vec<String>,
}

impl PlatformInfo {
    pub fn detect(sysfs: &SysfsRoot) -> Self {
        let platform_profile = sysfs
            .read_optional("sys/firmware/acpi/platform_profile")
            .unwrap_or(None);
        let platform_profile_choices = sysfs
            .read_optional("sys/firmware/acpi/platform_profile_choices")
            .unwrap_or(None)
            .map(|c| c.split_whitespace().map(String::from).collect())
            .unwrap_or_default();

        Self {
            platform_profile,
            platform_profile_choices,
        }
    }

    pub fn kernel_driver_active(&self) -> bool {
        self.platform_profile.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_kernel_platform_profile() {
        let tmp = tempfile::tempdir().unwrap();
        let acpi = tmp.path().join("sys/firmware/acpi");
        fs::create_dir_all(&acpi).unwrap();
        fs::write(acpi.join("platform_profile"), "balanced\n").unwrap();
        fs::write(
            acpi.join("platform_profile_choices"),
            "low-power quiet balanced\n",
        )
        .unwrap();

        let info = PlatformInfo::detect(&SysfsRoot::new(tmp.path()));
        assert!(info.kernel_driver_active());
        assert_eq!(info.platform_profile.as_deref(), Some("balanced"));
        assert_eq!(
            info.platform_profile_choices,
            vec!["low-power", "quiet", "balanced"]
        );
    }

    #[test]
    fn test_no_kernel_platform_profile() {
        let tmp = tempfile::tempdir().unwrap();
        let info = PlatformInfo::detect(&SysfsRoot::new(tmp.path()));
        assert!(!info.kernel_driver_active());
        assert!(info.platform_profile_choices.is_empty());
    }
}
