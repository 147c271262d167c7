// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Live capability queries backed by the device manageability (0xC2) log.
//!
//! The log is a [`DevMgmtLogHeader`] followed by variable length entries,
//! each starting with a [`DevMgmtEntryHeader`]. Supported vendor log pages
//! and the firmware customer ID are both reported as entries.

use crate::classify::CapabilityQueries;
use crate::transport::NvmeTransport;
use anyhow::Context as _;
use sndk_spec::SNDK_UUID;
use sndk_spec::SNDK_UUID_END;
use sndk_spec::customer_id;
use sndk_spec::dev_mgmt_entry;
use sndk_spec::log_id;
use sndk_spec::nvme::CTRATT_UUID_LIST;
use sndk_spec::nvme::DEV_MGMT_ENTRY_DATA_OFFSET;
use sndk_spec::nvme::DevMgmtEntryHeader;
use sndk_spec::nvme::DevMgmtLogHeader;
use sndk_spec::nvme::IdentifyUuidList;
use sndk_spec::nvme::UuidListEntry;
use zerocopy::FromBytes;
use zerocopy::FromZeros;
use zerocopy::IntoBytes;

/// Upper bound on the device manageability log transfer.
const DEV_MGMT_LOG_MAX_LEN: usize = 64 * 1024;

/// Offset of the log ID list in the supported log pages entry, after the
/// entry header and the count.
const LOG_PAGE_LIST_OFFSET: usize = DEV_MGMT_ENTRY_DATA_OFFSET + 4;

const VENDOR_UUID: UuidListEntry = UuidListEntry::from_array(SNDK_UUID);
const END_UUID: UuidListEntry = UuidListEntry::from_array(SNDK_UUID_END);

/// Returns the one-based index of the vendor UUID in `list`.
pub fn find_vendor_uuid_index(list: &IdentifyUuidList) -> Option<u8> {
    list.entries
        .iter()
        .take_while(|entry| !entry.uuid_eq(&END_UUID))
        .position(|entry| entry.uuid_eq(&VENDOR_UUID))
        .map(|i| (i + 1) as u8)
}

/// Returns the UUID index to address vendor log pages with, or 0 if the
/// controller has no UUID list or the vendor UUID is not in it.
pub fn vendor_uuid_index(transport: &mut impl NvmeTransport) -> anyhow::Result<u8> {
    let ctrl = transport.identify_controller()?;
    if ctrl.ctratt.get() & CTRATT_UUID_LIST == 0 {
        return Ok(0);
    }
    let list = transport
        .identify_uuid_list()
        .context("failed to read uuid list")?;
    Ok(find_vendor_uuid_index(&list).unwrap_or(0))
}

/// Reads the whole device manageability log.
pub fn read_dev_mgmt_log(
    transport: &mut impl NvmeTransport,
    uuid_index: u8,
) -> anyhow::Result<Vec<u8>> {
    let mut header = DevMgmtLogHeader::new_zeroed();
    transport
        .get_log_page(
            log_id::DEVICE_MANAGEABILITY,
            uuid_index,
            header.as_mut_bytes(),
        )
        .context("failed to read device manageability log header")?;

    let length = header.length.get() as usize;
    if length < size_of::<DevMgmtLogHeader>() {
        anyhow::bail!("device manageability log length {length:#x} is smaller than its header");
    }
    if length > DEV_MGMT_LOG_MAX_LEN {
        tracing::debug!(length, "truncating device manageability log");
    }

    // Transfers are in whole dwords.
    let mut log = vec![0; length.next_multiple_of(4).min(DEV_MGMT_LOG_MAX_LEN)];
    transport
        .get_log_page(log_id::DEVICE_MANAGEABILITY, uuid_index, &mut log)
        .context("failed to read device manageability log")?;
    Ok(log)
}

/// Finds entry `entry_id` in a device manageability log, returning the
/// entry bytes including its header.
///
/// The walk stops at the first malformed entry.
pub fn find_entry(log: &[u8], entry_id: u32) -> Option<&[u8]> {
    let (header, _) = DevMgmtLogHeader::read_from_prefix(log).ok()?;
    let log_len = (header.length.get() as usize).min(log.len());
    let mut offset = size_of::<DevMgmtLogHeader>();

    while log_len.saturating_sub(offset) >= size_of::<DevMgmtEntryHeader>() {
        let remaining = &log[offset..log_len];
        let (entry, _) = DevMgmtEntryHeader::read_from_prefix(remaining).ok()?;
        let entry_len = entry.length.get() as usize;
        let id = entry.entry_id.get();

        if entry_len == 0 || entry_len > remaining.len() {
            tracing::debug!(offset, entry_len, id, "unaligned end of log data");
            return None;
        }
        if id == 0 || id > dev_mgmt_entry::MAX_ENTRY_ID {
            tracing::debug!(offset, entry_len, id, "invalid log entry");
            return None;
        }
        if id == entry_id {
            return Some(&remaining[..entry_len]);
        }
        offset += entry_len;
    }
    None
}

/// Returns the log IDs listed in a supported log pages entry.
pub fn supported_log_pages(entry: &[u8]) -> Option<&[u8]> {
    let (header, _) = DevMgmtEntryHeader::read_from_prefix(entry).ok()?;
    let count = header.data.get() as usize;
    entry.get(LOG_PAGE_LIST_OFFSET..LOG_PAGE_LIST_OFFSET.checked_add(count)?)
}

/// Returns the customer ID in a customer ID entry.
pub fn entry_customer_id(entry: &[u8]) -> Option<u32> {
    let (header, _) = DevMgmtEntryHeader::read_from_prefix(entry).ok()?;
    Some(header.data.get())
}

/// [`CapabilityQueries`] answered by the device.
///
/// Each query reads the device manageability log afresh.
pub struct LiveQueries<T> {
    transport: T,
}

impl<T: NvmeTransport> LiveQueries<T> {
    /// Queries the device behind `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    fn dev_mgmt_log(&mut self) -> anyhow::Result<Vec<u8>> {
        let uuid_index = vendor_uuid_index(&mut self.transport)?;
        tracing::trace!(uuid_index, "reading device manageability log");
        read_dev_mgmt_log(&mut self.transport, uuid_index)
    }

    fn try_log_page_supported(&mut self, log_id: u8) -> anyhow::Result<bool> {
        let log = self.dev_mgmt_log()?;
        let entry = find_entry(&log, dev_mgmt_entry::LOG_PAGES_SUPPORTED)
            .context("no supported log pages entry")?;
        let pages = supported_log_pages(entry).context("truncated supported log pages entry")?;
        Ok(pages.contains(&log_id))
    }

    fn try_firmware_customer_id(&mut self) -> anyhow::Result<u32> {
        let log = self.dev_mgmt_log()?;
        let entry =
            find_entry(&log, dev_mgmt_entry::CUSTOMER_ID).context("no customer id entry")?;
        entry_customer_id(entry).context("truncated customer id entry")
    }
}

impl<T: NvmeTransport> CapabilityQueries for LiveQueries<T> {
    fn log_page_supported(&mut self, log_id: u8) -> bool {
        match self.try_log_page_supported(log_id) {
            Ok(supported) => {
                tracing::debug!(log_id, supported, "probed log page");
                supported
            }
            Err(err) => {
                tracing::debug!(
                    log_id,
                    error = err.as_ref() as &dyn std::error::Error,
                    "log page probe failed"
                );
                false
            }
        }
    }

    fn firmware_customer_id(&mut self) -> u32 {
        match self.try_firmware_customer_id() {
            Ok(customer_id) => {
                tracing::debug!(customer_id, "read firmware customer id");
                customer_id
            }
            Err(err) => {
                tracing::warn!(
                    error = err.as_ref() as &dyn std::error::Error,
                    "failed to read firmware customer id"
                );
                customer_id::INVALID
            }
        }
    }
}
