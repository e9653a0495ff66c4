pub mod dmi;
pub mod platform;

use crate::sysfs::SysfsRoot;
use crate::wmi;
use serde::Serialize;

/// What the host looks like from the firmware interface's point of view.
#[derive(Debug, Clone, Serialize)]
pub struct HardwareInfo {
    pub dmi: dmi::DmiInfo,
    pub platform: platform::PlatformInfo,
    pub wmi_present: bool,
    pub acpi_call_available: bool,
}

impl HardwareInfo {
    pub fn detect(sysfs: &SysfsRoot, acpi_call_path: &std::path::Path) -> Self {
        let wmi_present = wmi::presence::has_guid(sysfs, wmi::GAMING_GUID).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to enumerate WMI devices");
            false
        });

        Self {
            dmi: dmi::DmiInfo::detect(sysfs),
            platform: platform::PlatformInfo::detect(sysfs),
            wmi_present,
            acpi_call_available: sysfs.exists(acpi_call_path),
        }
    }

    pub fn supported(&self) -> bool {
        self.wmi_present
    }
}
