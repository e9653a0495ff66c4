pub mod acpi_call;
pub mod presence;

use crate::codec::SettingWord;
use crate::error::{Error, Result};

/// GUID of the Acer gaming WMI management interface.
pub const GAMING_GUID: &str = "7A4DDFE7-5B5D-40B4-8595-4408E0CC7F56";

/// Methods of the gaming WMI interface used here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Set,
    Get,
}

impl Method {
    pub const fn id(self) -> u32 {
        match self {
            Method::Set => 22,
            Method::Get => 23,
        }
    }
}

/// Object returned by a WMI method evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Integer(u64),
    Buffer(Vec<u8>),
    /// Strings, packages and anything else the firmware might hand back.
    Other,
}

impl Payload {
    /// Normalize to a 64-bit word. Buffers need at least 8 bytes and are
    /// read little-endian.
    fn as_word(&self) -> Option<u64> {
        match self {
            Payload::Integer(v) => Some(*v),
            Payload::Buffer(bytes) if bytes.len() >= 8 => {
                let mut word = [0u8; 8];
                word.copy_from_slice(&bytes[..8]);
                Some(u64::from_le_bytes(word))
            }
            _ => None,
        }
    }
}

/// One raw request/response exchange with the firmware.
///
/// Implementations return `Err(Error::TransportFailure)` when the call could
/// not be completed at all, and `Ok(None)` when it completed without
/// returning an object.
pub trait FirmwareTransport {
    fn evaluate(&self, method: Method, input: SettingWord) -> Result<Option<Payload>>;
}

/// Firmware call channel. Decodes transport payloads into response words.
///
/// Reads are strict: a missing or malformed payload is an error. Writes are
/// lenient: only a transport failure fails the call.
#[derive(Debug)]
pub struct FirmwareChannel<T> {
    transport: T,
}

impl<T: FirmwareTransport> FirmwareChannel<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue a Get call and return the response word.
    pub fn get(&self, request: SettingWord) -> Result<SettingWord> {
        match self.transport.evaluate(Method::Get, request)? {
            Some(payload) => payload.as_word().ok_or_else(|| {
                Error::UnreadableResponse(format!("unexpected payload {:?}", payload))
            }),
            None => Err(Error::UnreadableResponse("no payload returned".to_string())),
        }
    }

    /// Issue a Set call. Returns the response word when the firmware sent a
    /// readable one; unreadable payloads are ignored.
    pub fn set(&self, request: SettingWord) -> Result<Option<SettingWord>> {
        let payload = self.transport.evaluate(Method::Set, request)?;
        Ok(payload.as_ref().and_then(Payload::as_word))
    }
}
