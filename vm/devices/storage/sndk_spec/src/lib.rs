// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Definitions for Sandisk and WDC branded NVMe controllers: PCI identifiers,
//! vendor log page identifiers, firmware customer IDs and the capability
//! bitfield used to gate vendor-specific commands.

#![cfg_attr(not(test), no_std)]

pub mod caps;
pub mod device_id;
pub mod nvme;

pub use caps::DriveCapabilities;

/// PCI vendor ID used by Sandisk branded controllers.
pub const SNDK_VID: u32 = 0x15b7;
/// PCI vendor ID used by WDC enterprise controllers.
pub const WDC_VID: u32 = 0x1b96;

/// Vendor log page identifiers.
pub mod log_id {
    /// OCP SMART / cloud attributes log.
    pub const SMART_CLOUD_ATTR: u8 = 0xc0;
    /// End-of-life status log. Shares its identifier with the cloud attributes
    /// log on older enterprise parts.
    pub const EOL_STATUS: u8 = 0xc0;
    /// OCP error recovery log.
    pub const ERROR_RECOVERY: u8 = 0xc1;
    /// Device manageability log, a header followed by tagged entries.
    pub const DEVICE_MANAGEABILITY: u8 = 0xc2;
    /// OCP latency monitor log.
    pub const LATENCY_MONITOR: u8 = 0xc3;
    /// OCP device capabilities log.
    pub const DEVICE_CAPABILITIES: u8 = 0xc4;
    /// OCP unsupported requirements log.
    pub const UNSUPPORTED_REQUIREMENTS: u8 = 0xc5;
    /// Vendor device information log.
    pub const DEVICE_INFO: u8 = 0xca;
    /// Firmware activation history log.
    pub const FW_ACTIVATE_HISTORY: u8 = 0xcb;
    /// Vendor unique SMART log.
    pub const VU_SMART: u8 = 0xd0;
}

/// Entry identifiers inside the device manageability (0xC2) log.
pub mod dev_mgmt_entry {
    /// List of supported vendor log page identifiers.
    pub const LOG_PAGES_SUPPORTED: u32 = 0x08;
    /// Firmware customer identifier.
    pub const CUSTOMER_ID: u32 = 0x15;
    /// Largest entry identifier considered well formed.
    pub const MAX_ENTRY_ID: u32 = 200;
}

/// Firmware customer identifiers.
pub mod customer_id {
    #![expect(missing_docs)] // self-explanatory constants
    pub const ID_0X1004: u32 = 0x1004;
    pub const ID_0X1005: u32 = 0x1005;
    pub const ID_0X1008: u32 = 0x1008;
    pub const ID_0X1304: u32 = 0x1304;

    /// Returned by the device queries when the customer ID could not be read.
    pub const INVALID: u32 = 0xffff_ffff;

    /// Customer IDs that select the vendor-unique feature-ID command variants.
    pub const VU_FID_CUSTOMERS: &[u32] = &[ID_0X1004, ID_0X1008, ID_0X1005, ID_0X1304];
}

/// Length in bytes of a UUID list entry and of the UUID constants below.
pub const UUID_ENTRY_LEN: usize = 32;

/// UUID list entry identifying the Sandisk vendor log page namespace. The
/// first 16 bytes are the entry header and reserved area, the last 16 bytes
/// are the UUID itself.
pub const SNDK_UUID: [u8; UUID_ENTRY_LEN] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x2d, 0xb9, 0x8c, 0x52, 0x0c, 0x4c, 0x5a, 0x15, 0xab, 0xe6, 0x33, 0x29, 0x9a, 0x70, 0xdf, 0xd0,
];

/// An all-zero UUID marks the end of a UUID list.
pub const SNDK_UUID_END: [u8; UUID_ENTRY_LEN] = [0; UUID_ENTRY_LEN];
