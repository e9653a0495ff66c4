use crate::config::FirmwareConfig;
use crate::error::{Error, Result};
use crate::fan_boost;
use crate::profile::{self, AbstractProfile};
use crate::sysfs::SysfsRoot;
use crate::wmi::acpi_call::AcpiCallTransport;
use crate::wmi::{self, FirmwareChannel, FirmwareTransport};
use std::collections::BTreeSet;

/// Contract of a pluggable platform-profile provider.
pub trait ProfileProvider {
    fn name(&self) -> &str;

    /// Profiles this provider can be switched to.
    fn probe(&self) -> BTreeSet<AbstractProfile>;

    fn get(&self) -> Result<AbstractProfile>;

    fn set(&self, profile: AbstractProfile) -> Result<()>;
}

/// Owns the firmware channel. Every operation is a live firmware round-trip.
#[derive(Debug)]
pub struct ThermalDevice<T> {
    channel: FirmwareChannel<T>,
}

impl ThermalDevice<AcpiCallTransport> {
    /// Bind to the gaming WMI interface on this host. Fails with
    /// `InterfaceNotPresent` when the GUID is not enumerated.
    pub fn open(sysfs: &SysfsRoot, config: &FirmwareConfig) -> Result<Self> {
        if !wmi::presence::has_guid(sysfs, wmi::GAMING_GUID)? {
            return Err(Error::InterfaceNotPresent {
                guid: wmi::GAMING_GUID.to_string(),
            });
        }
        tracing::debug!(
            method = %config.method_path,
            call = %config.acpi_call_path.display(),
            "binding gaming WMI interface"
        );
        let transport =
            AcpiCallTransport::new(sysfs.clone(), &config.acpi_call_path, &config.method_path);
        Ok(Self::new(transport))
    }
}

impl<T: FirmwareTransport> ThermalDevice<T> {
    pub fn new(transport: T) -> Self {
        Self {
            channel: FirmwareChannel::new(transport),
        }
    }

    pub fn transport(&self) -> &T {
        self.channel.transport()
    }

    pub fn profile(&self) -> Result<AbstractProfile> {
        profile::get_profile(&self.channel)
    }

    pub fn set_profile(&self, profile: AbstractProfile) -> Result<()> {
        profile::set_profile(&self.channel, profile)
    }

    pub fn fan_boost(&self) -> Result<u8> {
        fan_boost::get_fan_boost(&self.channel)
    }

    pub fn set_fan_boost(&self, value: u8) -> Result<()> {
        fan_boost::set_fan_boost(&self.channel, value)
    }

    /// Attribute read: decimal value and a newline.
    pub fn show_fan_boost(&self) -> Result<String> {
        self.fan_boost().map(fan_boost::format_attribute)
    }

    /// Attribute write: "0" or "1", validated before any firmware call.
    pub fn store_fan_boost(&self, input: &str) -> Result<()> {
        let value = fan_boost::parse_attribute(input)?;
        self.set_fan_boost(value)
    }
}

impl<T: FirmwareTransport> ProfileProvider for ThermalDevice<T> {
    fn name(&self) -> &str {
        "acer-thermal"
    }

    fn probe(&self) -> BTreeSet<AbstractProfile> {
        profile::supported_profiles()
    }

    fn get(&self) -> Result<AbstractProfile> {
        self.profile()
    }

    fn set(&self, profile: AbstractProfile) -> Result<()> {
        self.set_profile(profile)
    }
}

/// Space-separated choices, in the format of `platform_profile_choices`.
pub fn choices_string(provider: &dyn ProfileProvider) -> String {
    provider
        .probe()
        .iter()
        .map(AbstractProfile::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
