use crate::sysfs::SysfsRoot;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DmiInfo {
    pub sys_vendor: Option<String>,
    pub product_name: Option<String>,
    pub board_name: Option<String>,
    pub bios_version: Option<String>,
}

impl DmiInfo {
    pub fn detect(sysfs: &SysfsRoot) -> Self {
        let read = |field: &str| {
            sysfs
                .read_optional(format!("sys/class/dmi/id/{}", field))
                .unwrap_or(None)
                .filter(|v| !v.is_empty())
        };
        Self {
            sys_vendor: read("sys_vendor"),
            product_name: read("product_name"),
            board_name: read("board_name"),
            bios_version: read("bios_version"),
        }
    }

    pub fn is_acer(&self) -> bool {
        self.sys_vendor
            .as_deref()
            .is_some_and(|v| v.to_ascii_lowercase().contains("acer"))
    }

    /// Predator and Nitro lines ship the gaming WMI interface.
    pub fn is_gaming_line(&self) -> bool {
        self.is_acer()
            && self.product_name.as_deref().is_some_and(|n| {
                let n = n.to_ascii_lowercase();
                n.contains("predator") || n.contains("nitro")
            })
    }
}
