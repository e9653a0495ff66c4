use crate::detect::HardwareInfo;
use crate::device::{self, ProfileProvider, ThermalDevice};
use crate::profile::AbstractProfile;
use crate::wmi::FirmwareTransport;
use serde::Serialize;

/// A firmware read that may have failed. Failures are reported, not hidden.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reading<T> {
    Value(T),
    Error(String),
}

impl<T> From<crate::error::Result<T>> for Reading<T> {
    fn from(result: crate::error::Result<T>) -> Self {
        match result {
            Ok(v) => Reading::Value(v),
            Err(e) => Reading::Error(e.to_string()),
        }
    }
}

/// Live firmware state.
#[derive(Debug, Clone, Serialize)]
pub struct FirmwareState {
    pub provider: String,
    pub profile: Reading<AbstractProfile>,
    pub choices: String,
    pub fan_boost: Reading<u8>,
}

/// Full status report.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub timestamp: String,
    pub hardware: HardwareInfo,
    /// None when the firmware was not queried: the WMI interface is absent,
    /// or the caller lacks the privileges to use acpi_call.
    pub firmware: Option<FirmwareState>,
}

impl StatusReport {
    pub fn healthy(&self) -> bool {
        match &self.firmware {
            Some(fw) => {
                matches!(fw.profile, Reading::Value(_)) && matches!(fw.fan_boost, Reading::Value(_))
            }
            None => false,
        }
    }

    /// Why the firmware section is missing, if it is.
    pub fn firmware_note(&self) -> Option<&'static str> {
        match (&self.firmware, self.hardware.supported()) {
            (Some(_), _) => None,
            (None, true) => Some("Firmware not queried; run as root to read it."),
            (None, false) => Some("Gaming WMI interface not found; firmware not queried."),
        }
    }
}

pub fn read_firmware<T: FirmwareTransport>(device: &ThermalDevice<T>) -> FirmwareState {
    FirmwareState {
        provider: device.name().to_string(),
        profile: device.get().into(),
        choices: device::choices_string(device),
        fan_boost: device.fan_boost().into(),
    }
}

pub fn report(hardware: HardwareInfo, firmware: Option<FirmwareState>) -> StatusReport {
    StatusReport {
        timestamp: chrono::Utc::now().to_rfc3339(),
        hardware,
        firmware,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{dmi::DmiInfo, platform::PlatformInfo};
    use crate::error::Error;
    use crate::wmi::stub::{EchoTransport, ScriptedTransport};

    fn hardware() -> HardwareInfo {
        HardwareInfo {
            dmi: DmiInfo {
                sys_vendor: Some("Acer".to_string()),
                product_name: Some("Predator PH16-71".to_string()),
                ..DmiInfo::default()
            },
            platform: PlatformInfo::default(),
            wmi_present: true,
            acpi_call_available: true,
        }
    }

    #[test]
    fn test_read_firmware_values() {
        let device = ThermalDevice::new(EchoTransport::new());
        device.set_profile(AbstractProfile::Quiet).unwrap();
        device.set_fan_boost(1).unwrap();

        let state = read_firmware(&device);
        assert!(matches!(state.profile, Reading::Value(AbstractProfile::Quiet)));
        assert!(matches!(state.fan_boost, Reading::Value(1)));
        assert_eq!(state.provider, "acer-thermal");

        let report = report(hardware(), Some(state));
        assert!(report.healthy());
    }

    #[test]
    fn test_read_firmware_errors_reported() {
        let device = ThermalDevice::new(
            ScriptedTransport::new()
                .reply_word(0x0300)
                .reply(Err(Error::TransportFailure("AE_NOT_FOUND".into()))),
        );

        let state = read_firmware(&device);
        assert!(matches!(&state.profile, Reading::Error(e) if e.contains("0x03")));
        assert!(matches!(&state.fan_boost, Reading::Error(e) if e.contains("AE_NOT_FOUND")));
        assert!(!report(hardware(), Some(state)).healthy());
    }

    #[test]
    fn test_report_json() {
        let device = ThermalDevice::new(EchoTransport::new());
        let report = report(hardware(), Some(read_firmware(&device)));
        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("\"value\": \"quiet\""));
        assert!(json.contains("\"wmi_present\": true"));
        assert!(json.contains(
            "\"choices\": \"low-power quiet balanced balanced-performance performance\""
        ));
    }

    #[test]
    fn test_report_without_firmware() {
        let report = report(hardware(), None);
        assert!(!report.healthy());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"firmware\":null"));
    }

    #[test]
    fn test_firmware_note_distinguishes_privilege_from_absence() {
        let unprivileged = report(hardware(), None);
        assert!(unprivileged.firmware_note().unwrap().contains("root"));

        let absent = report(
            HardwareInfo {
                wmi_present: false,
                ..hardware()
            },
            None,
        );
        assert!(absent.firmware_note().unwrap().contains("not found"));

        let device = ThermalDevice::new(EchoTransport::new());
        let full = report(hardware(), Some(read_firmware(&device)));
        assert_eq!(full.firmware_note(), None);
    }
}
