// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Capability detection for Sandisk and WDC NVMe drives.
//!
//! Detection runs in three steps:
//!
//! 1. [`resolve`] determines the PCI vendor and device IDs of a device, first
//!    from sysfs and then, for fabrics-attached devices without a PCI
//!    function, from Identify Controller.
//! 2. [`classify`] maps the identity to a [`DriveCapabilities`] set using a
//!    static per-family table, probing the device for optional log pages and
//!    reading the firmware customer ID where a family needs them.
//! 3. [`format_report`] renders the set as a supported/not supported table.

pub mod classify;
pub mod dev_mgmt;
pub mod report;
pub mod resolve;
pub mod transport;

pub use classify::CapabilityQueries;
pub use classify::ClassifyError;
pub use classify::classify;
pub use dev_mgmt::LiveQueries;
pub use report::format_report;
pub use resolve::ResolveError;
pub use resolve::SysfsTopology;
pub use resolve::resolve;
pub use sndk_spec::DriveCapabilities;
pub use transport::NvmeTransport;

use sndk_spec::SNDK_VID;
use sndk_spec::WDC_VID;
use thiserror::Error;

/// PCI identity of a device.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// PCI vendor ID.
    pub vendor_id: u32,
    /// PCI device ID. `None` when only the Identify fallback succeeded,
    /// which is the case for fabrics-attached devices.
    pub device_id: Option<u32>,
}

impl DeviceIdentity {
    /// Returns true if the vendor is Sandisk or WDC.
    pub fn is_supported_vendor(&self) -> bool {
        matches!(self.vendor_id, SNDK_VID | WDC_VID)
    }

    /// Fails with [`UnsupportedDeviceError`] for any other vendor.
    pub fn check_vendor(&self) -> Result<(), UnsupportedDeviceError> {
        if self.is_supported_vendor() {
            Ok(())
        } else {
            Err(UnsupportedDeviceError {
                vendor_id: self.vendor_id,
                device_id: self.device_id,
            })
        }
    }
}

/// The device is not a Sandisk or WDC device.
#[derive(Debug, Error)]
#[error(
    "unsupported Sandisk device, Vendor ID = {vendor_id:#x}, Device ID = {}",
    display_device_id(.device_id)
)]
pub struct UnsupportedDeviceError {
    /// Resolved vendor ID.
    pub vendor_id: u32,
    /// Resolved device ID, if any.
    pub device_id: Option<u32>,
}

fn display_device_id(device_id: &Option<u32>) -> String {
    match *device_id {
        Some(id) => format!("{id:#x}"),
        None => "unknown".into(),
    }
}
