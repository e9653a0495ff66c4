use super::{FirmwareTransport, Method, Payload};
use crate::codec::SettingWord;
use crate::error::{Error, Result};
use crate::sysfs::SysfsRoot;
use nix::fcntl::{Flock, FlockArg};
use std::fs::{self, File};
use std::path::PathBuf;

/// Held by every process for the duration of one write/read exchange.
pub const LOCK_FILE: &str = "/run/acer-thermal/acpi_call.lock";

/// Transport through the `acpi_call` kernel module.
///
/// A call is a write of `<method> <arg>...` followed by a read of the result
/// from the same proc file. The module keeps a single global result slot, so
/// the write/read pair runs under an exclusive `flock` on [`LOCK_FILE`].
/// flock locks belong to the open file description, so this also serializes
/// threads of one process.
#[derive(Debug)]
pub struct AcpiCallTransport {
    sysfs: SysfsRoot,
    call_path: PathBuf,
    method_path: String,
}

impl AcpiCallTransport {
    pub fn new(sysfs: SysfsRoot, call_path: impl Into<PathBuf>, method_path: &str) -> Self {
        Self {
            sysfs,
            call_path: call_path.into(),
            method_path: method_path.to_string(),
        }
    }

    fn lock_exchange(&self) -> Result<Flock<File>> {
        let path = self.sysfs.path(LOCK_FILE);
        if let Some(dir) = path.parent()
            && !dir.exists()
        {
            fs::create_dir_all(dir)
                .map_err(|e| Error::Lock(format!("failed to create {}: {}", dir.display(), e)))?;
        }

        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| Error::Lock(format!("failed to open {}: {}", path.display(), e)))?;
        Flock::lock(file, FlockArg::LockExclusive)
            .map_err(|(_, errno)| Error::Lock(format!("failed to lock {}: {}", path.display(), errno)))
    }
}

impl FirmwareTransport for AcpiCallTransport {
    fn evaluate(&self, method: Method, input: SettingWord) -> Result<Option<Payload>> {
        if !self.sysfs.exists(&self.call_path) {
            return Err(Error::TransportFailure(format!(
                "{} not found (is the acpi_call module loaded?)",
                self.sysfs.path(&self.call_path).display()
            )));
        }

        let _lock = self.lock_exchange()?;

        let request = format_request(&self.method_path, method, input);
        tracing::debug!(%request, "acpi_call request");

        self.sysfs
            .write(&self.call_path, &request)
            .map_err(|e| Error::TransportFailure(e.to_string()))?;
        let raw = self
            .sysfs
            .read(&self.call_path)
            .map_err(|e| Error::TransportFailure(e.to_string()))?;

        tracing::debug!(response = %raw, "acpi_call response");
        parse_response(&raw)
    }
}

/// `\_SB.X.WMBH 0x0 0x17 b0b00000000000000`: instance 0, method id, and the
/// input word as an 8-byte little-endian buffer.
pub fn format_request(method_path: &str, method: Method, input: SettingWord) -> String {
    let hex: String = input
        .to_le_bytes()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();
    format!("{} 0x0 {:#x} b{}", method_path, method.id(), hex)
}

/// Interpret the text `acpi_call` leaves behind after a call.
pub fn parse_response(raw: &str) -> Result<Option<Payload>> {
    let raw = raw.trim_matches(|c: char| c.is_whitespace() || c == '\0');

    if raw.is_empty() {
        return Ok(None);
    }
    if raw == "not called" {
        return Err(Error::TransportFailure("method was not called".to_string()));
    }
    if let Some(err) = raw.strip_prefix("Error:") {
        return Err(Error::TransportFailure(err.trim().to_string()));
    }
    if let Some(hex) = raw.strip_prefix("0x") {
        return Ok(Some(
            u64::from_str_radix(hex, 16)
                .map(Payload::Integer)
                .unwrap_or(Payload::Other),
        ));
    }
    if let Some(body) = raw.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
        return Ok(Some(parse_buffer(body).unwrap_or(Payload::Other)));
    }

    Ok(Some(Payload::Other))
}

fn parse_buffer(body: &str) -> Option<Payload> {
    let mut bytes = Vec::new();
    for item in body.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        let hex = item.strip_prefix("0x")?;
        bytes.push(u8::from_str_radix(hex, 16).ok()?);
    }
    Some(Payload::Buffer(bytes))
}
