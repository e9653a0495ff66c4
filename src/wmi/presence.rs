use crate::error::Result;
use crate::sysfs::SysfsRoot;

const WMI_DEVICES: &str = "sys/bus/wmi/devices";

/// Whether the kernel enumerated a WMI block with this GUID. Devices show
/// up as `<GUID>` or, when a GUID is duplicated, `<GUID>-<n>`.
pub fn has_guid(sysfs: &SysfsRoot, guid: &str) -> Result<bool> {
    let devices = sysfs.list_dir(WMI_DEVICES)?;
    Ok(devices.iter().any(|name| matches_guid(name, guid)))
}

fn matches_guid(device: &str, guid: &str) -> bool {
    let Some(prefix) = device.get(..guid.len()) else {
        return false;
    };
    if !prefix.eq_ignore_ascii_case(guid) {
        return false;
    }
    match &device[guid.len()..] {
        "" => true,
        rest => rest
            .strip_prefix('-')
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wmi::GAMING_GUID;
    use std::fs;

    fn wmi_tree(devices: &[&str]) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for dev in devices {
            fs::create_dir_all(tmp.path().join(WMI_DEVICES).join(dev)).unwrap();
        }
        tmp
    }

    #[test]
    fn test_guid_present() {
        let tmp = wmi_tree(&["05901221-D566-11D1-B2F0-00A0C9062910", GAMING_GUID]);
        assert!(has_guid(&SysfsRoot::new(tmp.path()), GAMING_GUID).unwrap());
    }

    #[test]
    fn test_guid_with_instance_suffix_lowercase() {
        let tmp = wmi_tree(&["7a4ddfe7-5b5d-40b4-8595-4408e0cc7f56-1"]);
        assert!(has_guid(&SysfsRoot::new(tmp.path()), GAMING_GUID).unwrap());
    }

    #[test]
    fn test_guid_absent() {
        let tmp = wmi_tree(&["05901221-D566-11D1-B2F0-00A0C9062910"]);
        assert!(!has_guid(&SysfsRoot::new(tmp.path()), GAMING_GUID).unwrap());
    }

    #[test]
    fn test_no_wmi_bus() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(!has_guid(&SysfsRoot::new(tmp.path()), GAMING_GUID).unwrap());
    }

    #[test]
    fn test_guid_prefix_not_enough() {
        assert!(!matches_guid(&format!("{}X", GAMING_GUID), GAMING_GUID));
        assert!(!matches_guid(&format!("{}-", GAMING_GUID), GAMING_GUID));
        assert!(!matches_guid("7A4DDFE7", GAMING_GUID));
    }
}
