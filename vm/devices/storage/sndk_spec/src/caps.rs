// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Vendor command capability bits.

use bitfield_struct::bitfield;
use core::ops::BitOr;
use core::ops::BitOrAssign;

/// Vendor-specific features supported by a drive.
///
/// Some user-visible commands are backed by more than one bit, because
/// different drive generations implement the same feature through different
/// mechanisms. Use the `*_MASK` constants to test for those.
#[bitfield(u64)]
#[derive(PartialEq, Eq)]
pub struct DriveCapabilities {
    pub internal_log: bool,
    pub c1_log_page: bool,
    pub ca_log_page: bool,
    pub d0_log_page: bool,
    pub drive_status: bool,
    pub clear_assert: bool,
    pub clear_pcie: bool,
    pub resize: bool,
    pub nand_stats: bool,
    pub fw_activate_history: bool,
    pub clear_fw_act_history: bool,
    pub disable_ctlr_tele_log: bool,
    pub reason_id: bool,
    pub log_page_dir: bool,
    pub ns_resize: bool,
    pub info: bool,
    pub c0_log_page: bool,
    pub temp_stats: bool,
    /// Clear PCIe correctable errors through a vendor unique command.
    pub vuc_clear_pcie: bool,
    /// Clear PCIe correctable errors through a vendor unique feature ID.
    pub vu_fid_clear_pcie: bool,
    /// Firmware activation history reported through the C2 log.
    pub fw_activate_history_c2: bool,
    pub vu_fid_clear_fw_act_history: bool,
    pub cloud_ssd_version: bool,
    pub pcie_stats: bool,
    pub hw_rev_log_page: bool,
    pub c3_log_page: bool,
    pub cloud_boot_ssd_version: bool,
    pub cloud_log_page: bool,
    /// Device unit information (internal log) collection.
    pub dui: bool,
    pub dui_data: bool,
    pub vuc_log: bool,
    pub ocp_c1_log_page: bool,
    pub ocp_c4_log_page: bool,
    pub ocp_c5_log_page: bool,
    pub device_waf: bool,
    pub set_latency_monitor: bool,
    #[bits(28)]
    _reserved: u64,
}

impl DriveCapabilities {
    /// Any of the internal log collection mechanisms.
    pub const INTERNAL_LOG_MASK: Self = Self::new()
        .with_internal_log(true)
        .with_dui(true)
        .with_dui_data(true)
        .with_vuc_log(true);

    /// Any of the vendor SMART log pages.
    pub const SMART_LOG_MASK: Self = Self::new()
        .with_c0_log_page(true)
        .with_c1_log_page(true)
        .with_ca_log_page(true)
        .with_d0_log_page(true);

    /// Any of the clear-PCIe-correctable-errors mechanisms.
    pub const CLEAR_PCIE_MASK: Self = Self::new()
        .with_clear_pcie(true)
        .with_vuc_clear_pcie(true)
        .with_vu_fid_clear_pcie(true);

    /// Either firmware activation history source.
    pub const FW_ACTIVATE_HISTORY_MASK: Self = Self::new()
        .with_fw_activate_history(true)
        .with_fw_activate_history_c2(true);

    /// Either clear-firmware-activation-history mechanism.
    pub const CLEAR_FW_ACT_HISTORY_MASK: Self = Self::new()
        .with_clear_fw_act_history(true)
        .with_vu_fid_clear_fw_act_history(true);

    /// Returns the union of two capability sets.
    pub const fn union(self, other: Self) -> Self {
        Self::from_bits(self.into_bits() | other.into_bits())
    }

    /// Returns true if any bit in `mask` is set.
    pub const fn intersects(self, mask: Self) -> bool {
        self.into_bits() & mask.into_bits() != 0
    }

    /// Returns true if no capability is set.
    pub const fn is_empty(self) -> bool {
        self.into_bits() == 0
    }
}

impl BitOr for DriveCapabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for DriveCapabilities {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}
