// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The subset of NVMe admin command definitions needed to identify a
//! controller and read its vendor log pages.

use crate::UUID_ENTRY_LEN;
use static_assertions::const_assert_eq;
use zerocopy::FromBytes;
use zerocopy::Immutable;
use zerocopy::IntoBytes;
use zerocopy::KnownLayout;
use zerocopy::Unaligned;
use zerocopy::little_endian::U16;
use zerocopy::little_endian::U32;

/// Admin command opcodes.
pub mod admin_opcode {
    /// Get Log Page.
    pub const GET_LOG_PAGE: u8 = 0x02;
    /// Identify.
    pub const IDENTIFY: u8 = 0x06;
}

/// Identify controller or namespace structure (CNS) values.
pub mod cns {
    /// Identify controller data structure.
    pub const CONTROLLER: u32 = 0x01;
    /// UUID list.
    pub const UUID_LIST: u32 = 0x17;
}

/// Size of every Identify data structure.
pub const IDENTIFY_DATA_SIZE: usize = 4096;

/// Broadcast namespace ID, used for controller-scoped log pages.
pub const NSID_ALL: u32 = 0xffff_ffff;

/// CTRATT bit advertising UUID list support.
pub const CTRATT_UUID_LIST: u32 = 1 << 9;

/// Maximum number of entries in a UUID list.
pub const UUID_LIST_MAX: usize = 127;

/// The leading fields of the Identify Controller data structure.
#[repr(C)]
#[derive(Copy, Clone, Debug, IntoBytes, Immutable, KnownLayout, FromBytes, Unaligned)]
pub struct IdentifyControllerPrefix {
    /// PCI vendor ID.
    pub vid: U16,
    /// PCI subsystem vendor ID.
    pub ssvid: U16,
    /// Serial number, space padded ASCII.
    pub sn: [u8; 20],
    /// Model number, space padded ASCII.
    pub mn: [u8; 40],
    /// Firmware revision, space padded ASCII.
    pub fr: [u8; 8],
    /// Recommended arbitration burst.
    pub rab: u8,
    /// IEEE OUI identifier.
    pub ieee: [u8; 3],
    /// Controller multi-path I/O and namespace sharing capabilities.
    pub cmic: u8,
    /// Maximum data transfer size.
    pub mdts: u8,
    /// Controller ID.
    pub cntlid: U16,
    /// Version.
    pub ver: U32,
    /// RTD3 resume latency.
    pub rtd3r: U32,
    /// RTD3 entry latency.
    pub rtd3e: U32,
    /// Optional asynchronous events supported.
    pub oaes: U32,
    /// Controller attributes.
    pub ctratt: U32,
}

const_assert_eq!(size_of::<IdentifyControllerPrefix>(), 100);

/// One entry of the Identify UUID list.
#[repr(C)]
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, IntoBytes, Immutable, KnownLayout, FromBytes, Unaligned,
)]
pub struct UuidListEntry {
    /// Identifier association.
    pub header: u8,
    /// Reserved.
    pub rsvd1: [u8; 15],
    /// The UUID.
    pub uuid: [u8; 16],
}

const_assert_eq!(size_of::<UuidListEntry>(), UUID_ENTRY_LEN);

impl UuidListEntry {
    /// Reinterprets a 32-byte UUID constant as a list entry.
    pub const fn from_array(bytes: [u8; UUID_ENTRY_LEN]) -> Self {
        zerocopy::transmute!(bytes)
    }

    /// Compares the UUID fields only, ignoring the header.
    pub fn uuid_eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

/// The Identify UUID list data structure.
#[repr(C)]
#[derive(Copy, Clone, IntoBytes, Immutable, KnownLayout, FromBytes, Unaligned)]
pub struct IdentifyUuidList {
    /// Reserved.
    pub rsvd0: [u8; 32],
    /// UUID entries. An all-zero UUID terminates the list.
    pub entries: [UuidListEntry; UUID_LIST_MAX],
}

const_assert_eq!(size_of::<IdentifyUuidList>(), IDENTIFY_DATA_SIZE);

/// Header of the vendor device manageability (0xC2) log.
#[repr(C)]
#[derive(Copy, Clone, Debug, IntoBytes, Immutable, KnownLayout, FromBytes, Unaligned)]
pub struct DevMgmtLogHeader {
    /// Total log length in bytes, header included.
    pub length: U32,
    /// Log format version.
    pub version: U32,
}

const_assert_eq!(size_of::<DevMgmtLogHeader>(), 8);

/// Header of one entry in the device manageability log. The entry payload
/// starts at `data` and runs to `length` bytes from the start of the entry.
#[repr(C)]
#[derive(Copy, Clone, Debug, IntoBytes, Immutable, KnownLayout, FromBytes, Unaligned)]
pub struct DevMgmtEntryHeader {
    /// Entry length in bytes, header included.
    pub length: U32,
    /// Entry identifier.
    pub entry_id: U32,
    /// First payload dword.
    pub data: U32,
}

const_assert_eq!(size_of::<DevMgmtEntryHeader>(), 12);

/// Offset of the payload within a device manageability log entry.
pub const DEV_MGMT_ENTRY_DATA_OFFSET: usize = 8;
