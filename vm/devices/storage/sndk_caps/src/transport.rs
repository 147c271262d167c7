// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Admin command access to a device.

use sndk_spec::nvme::IdentifyControllerPrefix;
use sndk_spec::nvme::IdentifyUuidList;

/// The admin commands needed for identification and log page queries.
///
/// Implemented over the Linux admin passthrough ioctl, and by in-memory
/// devices in tests.
pub trait NvmeTransport {
    /// Issues Identify Controller.
    fn identify_controller(&mut self) -> anyhow::Result<IdentifyControllerPrefix>;

    /// Issues Identify UUID List.
    fn identify_uuid_list(&mut self) -> anyhow::Result<IdentifyUuidList>;

    /// Reads the first `data.len()` bytes of log page `log_id`, selecting
    /// the vendor namespace with `uuid_index` (0 for none).
    fn get_log_page(&mut self, log_id: u8, uuid_index: u8, data: &mut [u8]) -> anyhow::Result<()>;
}

impl<T: NvmeTransport + ?Sized> NvmeTransport for &mut T {
    fn identify_controller(&mut self) -> anyhow::Result<IdentifyControllerPrefix> {
        (**self).identify_controller()
    }

    fn identify_uuid_list(&mut self) -> anyhow::Result<IdentifyUuidList> {
        (**self).identify_uuid_list()
    }

    fn get_log_page(
        &mut self,
        log_id: u8,
        uuid_index: u8,
        data: &mut [u8],
    ) -> anyhow::Result<()> {
        (**self).get_log_page(log_id, uuid_index, data)
    }
}

impl<T: NvmeTransport + ?Sized> NvmeTransport for Box<T> {
    fn identify_controller(&mut self) -> anyhow::Result<IdentifyControllerPrefix> {
        (**self).identify_controller()
    }

    fn identify_uuid_list(&mut self) -> anyhow::Result<IdentifyUuidList> {
        (**self).identify_uuid_list()
    }

    fn get_log_page(
        &mut self,
        log_id: u8,
        uuid_index: u8,
        data: &mut [u8],
    ) -> anyhow::Result<()> {
        (**self).get_log_page(log_id, uuid_index, data)
    }
}

#[cfg(target_os = "linux")]
impl NvmeTransport for nvme_passthru::NvmeAdminDevice {
    fn identify_controller(&mut self) -> anyhow::Result<IdentifyControllerPrefix> {
        Ok(nvme_passthru::NvmeAdminDevice::identify_controller(self)?)
    }

    fn identify_uuid_list(&mut self) -> anyhow::Result<IdentifyUuidList> {
        Ok(nvme_passthru::NvmeAdminDevice::identify_uuid_list(self)?)
    }

    fn get_log_page(
        &mut self,
        log_id: u8,
        uuid_index: u8,
        data: &mut [u8],
    ) -> anyhow::Result<()> {
        Ok(nvme_passthru::NvmeAdminDevice::get_log_page(
            self, log_id, uuid_index, data,
        )?)
    }
}
