use crate::codec::{self, SettingIndex};
use crate::error::{Error, Result};
use crate::wmi::{FirmwareChannel, FirmwareTransport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Vendor-neutral platform profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbstractProfile {
    LowPower,
    Quiet,
    Balanced,
    BalancedPerformance,
    Performance,
}

impl AbstractProfile {
    pub const ALL: [AbstractProfile; 5] = [
        AbstractProfile::LowPower,
        AbstractProfile::Quiet,
        AbstractProfile::Balanced,
        AbstractProfile::BalancedPerformance,
        AbstractProfile::Performance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AbstractProfile::LowPower => "low-power",
            AbstractProfile::Quiet => "quiet",
            AbstractProfile::Balanced => "balanced",
            AbstractProfile::BalancedPerformance => "balanced-performance",
            AbstractProfile::Performance => "performance",
        }
    }
}

impl std::fmt::Display for AbstractProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AbstractProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AbstractProfile::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidArgument(format!("unknown profile '{}'", s.trim())))
    }
}

/// Firmware thermal mode codes. 0x02 and 0x03 are reserved.
pub mod vendor {
    pub const QUIET: u8 = 0x00;
    pub const BALANCED: u8 = 0x01;
    pub const PERFORMANCE: u8 = 0x04;
    pub const TURBO: u8 = 0x05;
    pub const ECO: u8 = 0x06;
}

/// The only place the profile mapping lives; both directions read it.
/// Vendor names do not line up with the abstract ones: the vendor's Turbo is
/// our Performance and the vendor's Performance is our BalancedPerformance.
///
/// Entries are in `AbstractProfile` declaration order so the forward lookup
/// can index by discriminant.
const PROFILE_CODES: [(AbstractProfile, u8); 5] = [
    (AbstractProfile::LowPower, vendor::ECO),
    (AbstractProfile::Quiet, vendor::QUIET),
    (AbstractProfile::Balanced, vendor::BALANCED),
    (AbstractProfile::BalancedPerformance, vendor::PERFORMANCE),
    (AbstractProfile::Performance, vendor::TURBO),
];

pub fn vendor_code(profile: AbstractProfile) -> u8 {
    PROFILE_CODES[profile as usize].1
}

pub fn from_vendor_code(code: u8) -> Option<AbstractProfile> {
    PROFILE_CODES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(p, _)| *p)
}

/// Profiles advertised to the host. Static; firmware is never probed.
pub fn supported_profiles() -> BTreeSet<AbstractProfile> {
    AbstractProfile::ALL.into_iter().collect()
}

pub fn get_profile<T: FirmwareTransport>(channel: &FirmwareChannel<T>) -> Result<AbstractProfile> {
    let word = channel.get(codec::encode_request(SettingIndex::Profile, 0))?;
    let resp = codec::decode_response(word);
    if !resp.is_ok() {
        return Err(Error::FirmwareReportedFailure {
            status: resp.status,
        });
    }
    from_vendor_code(resp.value).ok_or(Error::UnsupportedValue { value: resp.value })
}

pub fn set_profile<T: FirmwareTransport>(
    channel: &FirmwareChannel<T>,
    profile: AbstractProfile,
) -> Result<()> {
    let word = codec::encode_request(SettingIndex::Profile, vendor_code(profile));
    channel.set(word)?;
    Ok(())
}
