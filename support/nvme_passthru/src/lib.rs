// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Admin command passthrough to Linux NVMe character devices (`/dev/nvmeN`)
//! through the `NVME_IOCTL_ADMIN_CMD` ioctl.
#![cfg(target_os = "linux")]
// UNSAFETY: unsafe needed to make ioctl calls.
#![expect(unsafe_code)]

use sndk_spec::nvme::IDENTIFY_DATA_SIZE;
use sndk_spec::nvme::IdentifyControllerPrefix;
use sndk_spec::nvme::IdentifyUuidList;
use sndk_spec::nvme::NSID_ALL;
use sndk_spec::nvme::admin_opcode;
use sndk_spec::nvme::cns;
use std::os::fd::AsRawFd;
use std::path::Path;
use thiserror::Error;
use zerocopy::FromZeros;
use zerocopy::IntoBytes;

/// Ioctl type defined by Linux.
pub const NVME_IOCTL_TYPE: u8 = b'N';

/// Maximum UUID index encodable in CDW14.
const UUID_INDEX_MASK: u8 = 0x7f;

#[expect(missing_docs)] // self-explanatory fields
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open nvme device")]
    Open(#[source] std::io::Error),
    #[error("admin command {opcode:#04x} ioctl failed")]
    AdminIoctl {
        opcode: u8,
        #[source]
        source: nix::Error,
    },
    #[error("admin command {opcode:#04x} completed with status {status:#x}")]
    CommandStatus { opcode: u8, status: i32 },
    #[error("invalid log page transfer length {0}")]
    InvalidTransferLength(usize),
}

/// Ioctl struct defined by Linux (`struct nvme_passthru_cmd`).
#[repr(C)]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct NvmePassthruCmd {
    opcode: u8,
    flags: u8,
    rsvd1: u16,
    nsid: u32,
    cdw2: u32,
    cdw3: u32,
    metadata: u64,
    addr: u64,
    metadata_len: u32,
    data_len: u32,
    cdw10: u32,
    cdw11: u32,
    cdw12: u32,
    cdw13: u32,
    cdw14: u32,
    cdw15: u32,
    timeout_ms: u32,
    result: u32,
}

static_assertions::const_assert_eq!(72, size_of::<NvmePassthruCmd>());

nix::ioctl_readwrite!(
    /// `NVME_IOCTL_ADMIN_CMD` ioctl defined by Linux.
    nvme_ioctl_admin_cmd,
    NVME_IOCTL_TYPE,
    0x41,
    NvmePassthruCmd
);

fn identify_command(cns: u32) -> NvmePassthruCmd {
    NvmePassthruCmd {
        opcode: admin_opcode::IDENTIFY,
        data_len: IDENTIFY_DATA_SIZE as u32,
        cdw10: cns,
        ..Default::default()
    }
}

fn get_log_page_command(
    log_id: u8,
    uuid_index: u8,
    len: usize,
) -> Result<NvmePassthruCmd, Error> {
    if len == 0 || len % 4 != 0 || len > u32::MAX as usize {
        return Err(Error::InvalidTransferLength(len));
    }
    let numd = (len / 4 - 1) as u32;
    Ok(NvmePassthruCmd {
        opcode: admin_opcode::GET_LOG_PAGE,
        nsid: NSID_ALL,
        data_len: len as u32,
        cdw10: log_id as u32 | ((numd & 0xffff) << 16),
        cdw11: numd >> 16,
        cdw14: (uuid_index & UUID_INDEX_MASK) as u32,
        ..Default::default()
    })
}

/// An open NVMe controller character device.
pub struct NvmeAdminDevice {
    file: fs_err::File,
}

impl NvmeAdminDevice {
    /// Opens an NVMe controller or namespace device node.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = fs_err::File::open(path.as_ref()).map_err(Error::Open)?;
        Ok(Self { file })
    }

    /// Issues Identify Controller and returns the leading fields.
    pub fn identify_controller(&self) -> Result<IdentifyControllerPrefix, Error> {
        let mut data = [0u8; IDENTIFY_DATA_SIZE];
        self.admin_command(identify_command(cns::CONTROLLER), &mut data)?;
        let mut prefix = IdentifyControllerPrefix::new_zeroed();
        let len = prefix.as_bytes().len();
        prefix.as_mut_bytes().copy_from_slice(&data[..len]);
        Ok(prefix)
    }

    /// Issues Identify UUID List.
    pub fn identify_uuid_list(&self) -> Result<IdentifyUuidList, Error> {
        let mut list = IdentifyUuidList::new_zeroed();
        self.admin_command(identify_command(cns::UUID_LIST), list.as_mut_bytes())?;
        Ok(list)
    }

    /// Reads `data.len()` bytes of log page `log_id` from offset zero.
    pub fn get_log_page(&self, log_id: u8, uuid_index: u8, data: &mut [u8]) -> Result<(), Error> {
        let cmd = get_log_page_command(log_id, uuid_index, data.len())?;
        self.admin_command(cmd, data)?;
        Ok(())
    }

    fn admin_command(&self, mut cmd: NvmePassthruCmd, data: &mut [u8]) -> Result<u32, Error> {
        let opcode = cmd.opcode;
        debug_assert_eq!(cmd.data_len as usize, data.len());
        cmd.addr = data.as_mut_ptr() as u64;

        tracing::trace!(
            opcode,
            cdw10 = cmd.cdw10,
            data_len = cmd.data_len,
            "issuing nvme admin command"
        );

        // SAFETY: Make NVME_IOCTL_ADMIN_CMD ioctl call to the device with
        // correct types. `addr` points to `data`, which is valid for writes of
        // `data_len` bytes for the duration of the call.
        let status = unsafe {
            nvme_ioctl_admin_cmd(self.file.as_raw_fd(), &mut cmd)
                .map_err(|source| Error::AdminIoctl { opcode, source })?
        };

        if status != 0 {
            return Err(Error::CommandStatus { opcode, status });
        }

        Ok(cmd.result)
    }
}
