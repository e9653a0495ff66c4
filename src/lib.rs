//! Acer gaming WMI thermal profile and fan-boost control.
//!
//! The firmware speaks in setting indices and vendor mode codes over a
//! single 64-bit word; [`device::ThermalDevice`] exposes it as the usual
//! low-power/quiet/balanced/balanced-performance/performance profile set.

pub mod auto;
pub mod cli;
pub mod codec;
pub mod config;
pub mod detect;
pub mod device;
pub mod error;
pub mod fan_boost;
pub mod output;
pub mod profile;
pub mod status;
pub mod sysfs;
pub mod thermal;
pub mod wmi;
