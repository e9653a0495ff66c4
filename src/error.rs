use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("firmware call failed: {0}")]
    TransportFailure(String),

    #[error("firmware reported failure (status {status:#06x})")]
    FirmwareReportedFailure { status: u16 },

    #[error("unreadable firmware response: {0}")]
    UnreadableResponse(String),

    #[error("firmware returned unsupported value {value:#04x}")]
    UnsupportedValue { value: u8 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("WMI interface {guid} not present on this system")]
    InterfaceNotPresent { guid: String },

    #[error("sysfs read failed: {path}: {source}")]
    SysfsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("sysfs write failed: {path}: {source}")]
    SysfsWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse error for {path}: {detail}")]
    Parse { path: PathBuf, detail: String },

    #[error("lock error: {0}")]
    Lock(String),

    #[error("signal setup failed: {0}")]
    Signal(String),
}

/// Coarse classification for boundary consumers. The CLI maps it to its
/// exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Decode,
    NotSupported,
    InvalidInput,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnreadableResponse(_) | Error::Parse { .. } => ErrorKind::Decode,
            Error::UnsupportedValue { .. } | Error::InterfaceNotPresent { .. } => {
                ErrorKind::NotSupported
            }
            Error::InvalidArgument(_) => ErrorKind::InvalidInput,
            _ => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
