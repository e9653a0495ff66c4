use crate::codec::{self, SettingIndex};
use crate::error::{Error, Result};
use crate::wmi::{FirmwareChannel, FirmwareTransport};

/// Read the fan-boost setting.
///
/// The raw byte is returned as-is. Firmware is expected to report 0 or 1,
/// but anything else is passed through rather than rejected.
pub fn get_fan_boost<T: FirmwareTransport>(channel: &FirmwareChannel<T>) -> Result<u8> {
    let word = channel.get(codec::encode_request(SettingIndex::FanBoost, 0))?;
    let resp = codec::decode_response(word);
    if !resp.is_ok() {
        return Err(Error::FirmwareReportedFailure {
            status: resp.status,
        });
    }
    Ok(resp.value)
}

/// Write the fan-boost setting. Only 0 and 1 reach the firmware.
pub fn set_fan_boost<T: FirmwareTransport>(channel: &FirmwareChannel<T>, value: u8) -> Result<()> {
    if value > 1 {
        return Err(Error::InvalidArgument(format!(
            "fan boost must be 0 or 1, got {}",
            value
        )));
    }
    channel.set(codec::encode_request(SettingIndex::FanBoost, value))?;
    Ok(())
}

/// Parse text written to the fan-boost attribute. A single trailing newline
/// is accepted, as `echo 1 >` produces one.
pub fn parse_attribute(input: &str) -> Result<u8> {
    let text = input.strip_suffix('\n').unwrap_or(input);
    match text {
        "0" => Ok(0),
        "1" => Ok(1),
        _ => Err(Error::InvalidArgument(format!(
            "fan boost accepts \"0\" or \"1\", got {:?}",
            text
        ))),
    }
}

pub fn format_attribute(value: u8) -> String {
    format!("{}\n", value)
}
