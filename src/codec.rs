//! Bit layout of the 64-bit word exchanged with the gaming WMI methods.
//!
//! Request: `[7:0]` setting index, `[15:8]` value.
//! Response: `[15:8]` value, `[31:16]` status. Everything else is reserved.

pub type SettingWord = u64;

const INDEX_MASK: u64 = 0x0000_0000_0000_00FF;
const VALUE_MASK: u64 = 0x0000_0000_0000_FF00;
const STATUS_MASK: u64 = 0x0000_0000_FFFF_0000;

const VALUE_SHIFT: u32 = 8;
const STATUS_SHIFT: u32 = 16;

/// Firmware-managed setting addressed by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingIndex {
    FanBoost,
    Profile,
}

impl SettingIndex {
    pub const fn raw(self) -> u8 {
        match self {
            SettingIndex::FanBoost => 0x02,
            SettingIndex::Profile => 0x0B,
        }
    }
}

/// Decoded response fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingResponse {
    pub value: u8,
    pub status: u16,
}

impl SettingResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 0
    }
}

pub fn encode_request(index: SettingIndex, value: u8) -> SettingWord {
    (u64::from(index.raw()) & INDEX_MASK) | ((u64::from(value) << VALUE_SHIFT) & VALUE_MASK)
}

pub fn decode_response(word: SettingWord) -> SettingResponse {
    SettingResponse {
        value: ((word & VALUE_MASK) >> VALUE_SHIFT) as u8,
        status: ((word & STATUS_MASK) >> STATUS_SHIFT) as u16,
    }
}
