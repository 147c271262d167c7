// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Table driven classification of drives into capability sets.

use crate::DeviceIdentity;
use sndk_spec::DriveCapabilities;
use sndk_spec::SNDK_VID;
use sndk_spec::WDC_VID;
use sndk_spec::customer_id;
use sndk_spec::device_id;
use sndk_spec::log_id;
use thiserror::Error;

/// Device queries the classifier depends on.
pub trait CapabilityQueries {
    /// Returns true if the device lists `log_id` as supported. A failed
    /// query reports false.
    fn log_page_supported(&mut self, log_id: u8) -> bool;

    /// Returns the firmware customer ID, or [`customer_id::INVALID`] if it
    /// could not be read.
    fn firmware_customer_id(&mut self) -> u32;
}

#[derive(Debug, Error)]
#[expect(missing_docs)] // self-explanatory variants
pub enum ClassifyError {
    #[error("device reported an invalid firmware customer id")]
    InvalidCustomerId,
}

/// A capability granted when the device lists a log page as supported.
#[derive(Debug, Copy, Clone)]
pub struct LogPageProbe {
    /// Log page to probe for.
    pub log_id: u8,
    /// Capabilities granted if the page is supported.
    pub caps: DriveCapabilities,
}

/// Capabilities selected by the firmware customer ID.
#[derive(Debug)]
pub struct CustomerIdBranch {
    /// Granted to customers using the vendor unique feature IDs.
    pub vu_fid: DriveCapabilities,
    /// Granted to all other customers.
    pub other: DriveCapabilities,
}

/// A group of devices sharing a capability set.
#[derive(Debug)]
pub struct DeviceFamily {
    /// Product name.
    pub name: &'static str,
    /// PCI vendor ID.
    pub vendor_id: u32,
    /// PCI device IDs.
    pub device_ids: &'static [&'static [u32]],
    /// Capabilities every device in the family has.
    pub base: DriveCapabilities,
    /// Log page probes, in the order they are issued.
    pub probes: &'static [LogPageProbe],
    /// Set if the family reads the firmware customer ID.
    pub customer_id: Option<&'static CustomerIdBranch>,
}

impl DeviceFamily {
    /// Returns true if the family includes this device.
    pub fn matches(&self, vendor_id: u32, device_id: u32) -> bool {
        self.vendor_id == vendor_id && self.device_ids.iter().any(|ids| ids.contains(&device_id))
    }

    /// Computes the capabilities of a device in this family.
    pub fn capabilities(
        &self,
        queries: &mut dyn CapabilityQueries,
    ) -> Result<DriveCapabilities, ClassifyError> {
        let mut caps = self.base;
        for probe in self.probes {
            if queries.log_page_supported(probe.log_id) {
                caps |= probe.caps;
            }
        }

        if let Some(branch) = self.customer_id {
            let customer_id = queries.firmware_customer_id();
            if customer_id == customer_id::INVALID {
                return Err(ClassifyError::InvalidCustomerId);
            }
            tracing::debug!(family = self.name, customer_id, "customer id branch");
            caps |= if customer_id::VU_FID_CUSTOMERS.contains(&customer_id) {
                branch.vu_fid
            } else {
                branch.other
            };
        }

        Ok(caps)
    }
}

const fn caps() -> DriveCapabilities {
    DriveCapabilities::new()
}

const fn probe(log_id: u8, caps: DriveCapabilities) -> LogPageProbe {
    LogPageProbe { log_id, caps }
}

const ENTERPRISE_BASE: DriveCapabilities = caps()
    .with_internal_log(true)
    .with_drive_status(true)
    .with_clear_assert(true)
    .with_resize(true);

const CLOUD_BASE: DriveCapabilities = ENTERPRISE_BASE
    .with_fw_activate_history(true)
    .with_disable_ctlr_tele_log(true)
    .with_reason_id(true)
    .with_log_page_dir(true);

const OCP_PROBES: [LogPageProbe; 5] = [
    probe(log_id::SMART_CLOUD_ATTR, caps().with_c0_log_page(true)),
    probe(log_id::ERROR_RECOVERY, caps().with_ocp_c1_log_page(true)),
    probe(log_id::LATENCY_MONITOR, caps().with_c3_log_page(true)),
    probe(log_id::DEVICE_CAPABILITIES, caps().with_ocp_c4_log_page(true)),
    probe(
        log_id::UNSUPPORTED_REQUIREMENTS,
        caps().with_ocp_c5_log_page(true),
    ),
];

const CA_PROBE: LogPageProbe = probe(log_id::DEVICE_INFO, caps().with_ca_log_page(true));
const D0_PROBE: LogPageProbe = probe(log_id::VU_SMART, caps().with_d0_log_page(true));

static CLOUD_CUSTOMER_BRANCH: CustomerIdBranch = CustomerIdBranch {
    vu_fid: caps()
        .with_vu_fid_clear_fw_act_history(true)
        .with_vu_fid_clear_pcie(true)
        .with_info(true)
        .with_cloud_ssd_version(true),
    other: caps()
        .with_clear_fw_act_history(true)
        .with_clear_pcie(true),
};

static FABRICS_CUSTOMER_BRANCH: CustomerIdBranch = CustomerIdBranch {
    vu_fid: caps()
        .with_vu_fid_clear_fw_act_history(true)
        .with_vu_fid_clear_pcie(true),
    other: caps()
        .with_clear_fw_act_history(true)
        .with_clear_pcie(true),
};

const OCP_DATACENTER: DriveCapabilities = caps()
    .with_c0_log_page(true)
    .with_c3_log_page(true)
    .with_ca_log_page(true)
    .with_ocp_c4_log_page(true)
    .with_ocp_c5_log_page(true)
    .with_fw_activate_history_c2(true)
    .with_vu_fid_clear_pcie(true)
    .with_vu_fid_clear_fw_act_history(true)
    .with_info(true)
    .with_cloud_ssd_version(true)
    .with_log_page_dir(true)
    .with_drive_status(true)
    .with_set_latency_monitor(true);

/// Known device families. Device IDs are unique across the table.
pub static FAMILIES: &[DeviceFamily] = &[
    DeviceFamily {
        name: "SN630",
        vendor_id: WDC_VID,
        device_ids: &[device_id::SN630],
        base: ENTERPRISE_BASE.with_clear_pcie(true),
        probes: &[CA_PROBE, D0_PROBE],
        customer_id: None,
    },
    DeviceFamily {
        name: "SN640",
        vendor_id: WDC_VID,
        device_ids: &[device_id::SN640],
        base: CLOUD_BASE,
        probes: &[
            OCP_PROBES[0],
            OCP_PROBES[1],
            OCP_PROBES[2],
            OCP_PROBES[3],
            OCP_PROBES[4],
            CA_PROBE,
            D0_PROBE,
        ],
        customer_id: Some(&CLOUD_CUSTOMER_BRANCH),
    },
    DeviceFamily {
        name: "SN840",
        vendor_id: WDC_VID,
        device_ids: &[device_id::SN840],
        base: ENTERPRISE_BASE
            .with_clear_pcie(true)
            .with_fw_activate_history(true)
            .with_clear_fw_act_history(true)
            .with_disable_ctlr_tele_log(true)
            .with_reason_id(true)
            .with_log_page_dir(true),
        probes: &[
            probe(log_id::EOL_STATUS, caps().with_c0_log_page(true)),
            CA_PROBE,
            D0_PROBE,
        ],
        customer_id: None,
    },
    DeviceFamily {
        name: "SN650",
        vendor_id: WDC_VID,
        device_ids: &[device_id::SN650, device_id::SN655],
        base: CLOUD_BASE,
        probes: &OCP_PROBES,
        customer_id: Some(&CLOUD_CUSTOMER_BRANCH),
    },
    DeviceFamily {
        name: "SN861",
        vendor_id: WDC_VID,
        device_ids: &[device_id::SN861],
        base: OCP_DATACENTER.with_internal_log(true),
        probes: &[],
        customer_id: None,
    },
    DeviceFamily {
        name: "SNTMP",
        vendor_id: WDC_VID,
        device_ids: &[device_id::SNTMP],
        base: OCP_DATACENTER.with_dui(true),
        probes: &[],
        customer_id: None,
    },
    DeviceFamily {
        name: "SN520",
        vendor_id: SNDK_VID,
        device_ids: &[device_id::SN520, device_id::SN810],
        base: caps().with_dui_data(true),
        probes: &[],
        customer_id: None,
    },
    DeviceFamily {
        name: "SN820CL",
        vendor_id: SNDK_VID,
        device_ids: &[device_id::SN820CL],
        base: caps()
            .with_dui_data(true)
            .with_cloud_boot_ssd_version(true)
            .with_cloud_log_page(true)
            .with_c0_log_page(true)
            .with_hw_rev_log_page(true)
            .with_info(true)
            .with_vu_fid_clear_pcie(true)
            .with_nand_stats(true)
            .with_device_waf(true)
            .with_temp_stats(true),
        probes: &[],
        customer_id: None,
    },
    DeviceFamily {
        name: "SN720",
        vendor_id: SNDK_VID,
        device_ids: &[device_id::SN720],
        base: caps()
            .with_dui_data(true)
            .with_nand_stats(true)
            .with_ns_resize(true),
        probes: &[],
        customer_id: None,
    },
    DeviceFamily {
        name: "SN730",
        vendor_id: SNDK_VID,
        device_ids: &[device_id::SN730],
        base: caps()
            .with_dui(true)
            .with_nand_stats(true)
            .with_info(true)
            .with_temp_stats(true)
            .with_vuc_clear_pcie(true)
            .with_pcie_stats(true),
        probes: &[],
        customer_id: None,
    },
    DeviceFamily {
        name: "client",
        vendor_id: SNDK_VID,
        device_ids: &[
            device_id::SN530,
            device_id::SN350,
            device_id::SN570,
            device_id::SN850X,
            device_id::SN5000,
            device_id::SN7000S,
            device_id::SN7150,
            device_id::SN7100,
            device_id::SN8000S,
            device_id::SN5100S,
            device_id::SN740,
            device_id::SN340,
        ],
        base: caps().with_dui(true),
        probes: &[],
        customer_id: None,
    },
    DeviceFamily {
        name: "ZN350",
        vendor_id: SNDK_VID,
        device_ids: &[device_id::ZN350],
        base: caps()
            .with_dui_data(true)
            .with_vu_fid_clear_pcie(true)
            .with_c0_log_page(true)
            .with_vu_fid_clear_fw_act_history(true)
            .with_fw_activate_history_c2(true)
            .with_info(true)
            .with_cloud_ssd_version(true)
            .with_log_page_dir(true),
        probes: &[],
        customer_id: None,
    },
];

/// Fabrics-attached WDC devices, whose device ID is unknown.
pub static FABRICS: DeviceFamily = DeviceFamily {
    name: "fabrics",
    vendor_id: WDC_VID,
    device_ids: &[],
    base: ENTERPRISE_BASE,
    probes: &[
        probe(log_id::LATENCY_MONITOR, caps().with_c3_log_page(true)),
        probe(
            log_id::FW_ACTIVATE_HISTORY,
            caps().with_fw_activate_history(true),
        ),
        CA_PROBE,
        D0_PROBE,
    ],
    customer_id: Some(&FABRICS_CUSTOMER_BRANCH),
};

/// Looks up the family of a device.
pub fn find_family(vendor_id: u32, device_id: u32) -> Option<&'static DeviceFamily> {
    FAMILIES.iter().find(|f| f.matches(vendor_id, device_id))
}

/// Computes the capabilities of a device.
///
/// Unknown devices have no capabilities. Only an invalid firmware customer
/// ID, for families that need one, is an error.
pub fn classify(
    identity: &DeviceIdentity,
    queries: &mut dyn CapabilityQueries,
) -> Result<DriveCapabilities, ClassifyError> {
    let family = match identity.device_id {
        Some(device_id) => find_family(identity.vendor_id, device_id),
        None => (identity.vendor_id == FABRICS.vendor_id).then_some(&FABRICS),
    };

    let Some(family) = family else {
        tracing::debug!(
            vendor_id = identity.vendor_id,
            device_id = identity.device_id,
            "unrecognized device"
        );
        return Ok(DriveCapabilities::new());
    };

    tracing::debug!(
        family = family.name,
        vendor_id = identity.vendor_id,
        device_id = identity.device_id,
        "classifying device"
    );
    family.capabilities(queries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    const NON_VU_FID_CUSTOMER: u32 = 0x1001;

    /// Answers from fixed data and records every query.
    struct FakeQueries {
        supported: BTreeSet<u8>,
        customer_id: u32,
        probed: Vec<u8>,
        customer_reads: usize,
    }

    impl FakeQueries {
        fn new(supported: &[u8], customer_id: u32) -> Self {
            Self {
                supported: supported.iter().copied().collect(),
                customer_id,
                probed: Vec::new(),
                customer_reads: 0,
            }
        }
    }

    impl CapabilityQueries for FakeQueries {
        fn log_page_supported(&mut self, log_id: u8) -> bool {
            self.probed.push(log_id);
            self.supported.contains(&log_id)
        }

        fn firmware_customer_id(&mut self) -> u32 {
            self.customer_reads += 1;
            self.customer_id
        }
    }

    fn identity(vendor_id: u32, device_id: u32) -> DeviceIdentity {
        DeviceIdentity {
            vendor_id,
            device_id: Some(device_id),
        }
    }

    fn classify_with(
        identity: DeviceIdentity,
        supported: &[u8],
        customer_id: u32,
    ) -> (Result<DriveCapabilities, ClassifyError>, FakeQueries) {
        let mut queries = FakeQueries::new(supported, customer_id);
        let result = classify(&identity, &mut queries);
        (result, queries)
    }

    #[test]
    fn base_masks() {
        let cases: &[(&[u32], u32, DriveCapabilities)] = &[
            (
                device_id::SN630,
                WDC_VID,
                caps()
                    .with_internal_log(true)
                    .with_drive_status(true)
                    .with_clear_assert(true)
                    .with_resize(true)
                    .with_clear_pcie(true),
            ),
            (
                device_id::SN640,
                WDC_VID,
                caps()
                    .with_internal_log(true)
                    .with_drive_status(true)
                    .with_clear_assert(true)
                    .with_resize(true)
                    .with_fw_activate_history(true)
                    .with_disable_ctlr_tele_log(true)
                    .with_reason_id(true)
                    .with_log_page_dir(true)
                    .with_clear_fw_act_history(true)
                    .with_clear_pcie(true),
            ),
            (
                device_id::SN650,
                WDC_VID,
                CLOUD_BASE
                    .with_clear_fw_act_history(true)
                    .with_clear_pcie(true),
            ),
            (
                device_id::SN655,
                WDC_VID,
                CLOUD_BASE
                    .with_clear_fw_act_history(true)
                    .with_clear_pcie(true),
            ),
            (
                device_id::SN840,
                WDC_VID,
                caps()
                    .with_internal_log(true)
                    .with_drive_status(true)
                    .with_clear_assert(true)
                    .with_resize(true)
                    .with_clear_pcie(true)
                    .with_fw_activate_history(true)
                    .with_clear_fw_act_history(true)
                    .with_disable_ctlr_tele_log(true)
                    .with_reason_id(true)
                    .with_log_page_dir(true),
            ),
            (
                device_id::SN861,
                WDC_VID,
                caps()
                    .with_c0_log_page(true)
                    .with_c3_log_page(true)
                    .with_ca_log_page(true)
                    .with_ocp_c4_log_page(true)
                    .with_ocp_c5_log_page(true)
                    .with_internal_log(true)
                    .with_fw_activate_history_c2(true)
                    .with_vu_fid_clear_pcie(true)
                    .with_vu_fid_clear_fw_act_history(true)
                    .with_info(true)
                    .with_cloud_ssd_version(true)
                    .with_log_page_dir(true)
                    .with_drive_status(true)
                    .with_set_latency_monitor(true),
            ),
            (
                device_id::SNTMP,
                WDC_VID,
                caps()
                    .with_c0_log_page(true)
                    .with_c3_log_page(true)
                    .with_ca_log_page(true)
                    .with_ocp_c4_log_page(true)
                    .with_ocp_c5_log_page(true)
                    .with_dui(true)
                    .with_fw_activate_history_c2(true)
                    .with_vu_fid_clear_pcie(true)
                    .with_vu_fid_clear_fw_act_history(true)
                    .with_info(true)
                    .with_cloud_ssd_version(true)
                    .with_log_page_dir(true)
                    .with_drive_status(true)
                    .with_set_latency_monitor(true),
            ),
            (device_id::SN520, SNDK_VID, caps().with_dui_data(true)),
            (device_id::SN810, SNDK_VID, caps().with_dui_data(true)),
            (
                device_id::SN820CL,
                SNDK_VID,
                caps()
                    .with_dui_data(true)
                    .with_cloud_boot_ssd_version(true)
                    .with_cloud_log_page(true)
                    .with_c0_log_page(true)
                    .with_hw_rev_log_page(true)
                    .with_info(true)
                    .with_vu_fid_clear_pcie(true)
                    .with_nand_stats(true)
                    .with_device_waf(true)
                    .with_temp_stats(true),
            ),
            (
                device_id::SN720,
                SNDK_VID,
                caps()
                    .with_dui_data(true)
                    .with_nand_stats(true)
                    .with_ns_resize(true),
            ),
            (
                device_id::SN730,
                SNDK_VID,
                caps()
                    .with_dui(true)
                    .with_nand_stats(true)
                    .with_info(true)
                    .with_temp_stats(true)
                    .with_vuc_clear_pcie(true)
                    .with_pcie_stats(true),
            ),
            (device_id::SN530, SNDK_VID, caps().with_dui(true)),
            (device_id::SN350, SNDK_VID, caps().with_dui(true)),
            (device_id::SN570, SNDK_VID, caps().with_dui(true)),
            (device_id::SN850X, SNDK_VID, caps().with_dui(true)),
            (device_id::SN5000, SNDK_VID, caps().with_dui(true)),
            (device_id::SN7000S, SNDK_VID, caps().with_dui(true)),
            (device_id::SN7150, SNDK_VID, caps().with_dui(true)),
            (device_id::SN7100, SNDK_VID, caps().with_dui(true)),
            (device_id::SN8000S, SNDK_VID, caps().with_dui(true)),
            (device_id::SN5100S, SNDK_VID, caps().with_dui(true)),
            (device_id::SN740, SNDK_VID, caps().with_dui(true)),
            (device_id::SN340, SNDK_VID, caps().with_dui(true)),
            (
                device_id::ZN350,
                SNDK_VID,
                caps()
                    .with_dui_data(true)
                    .with_vu_fid_clear_pcie(true)
                    .with_c0_log_page(true)
                    .with_vu_fid_clear_fw_act_history(true)
                    .with_fw_activate_history_c2(true)
                    .with_info(true)
                    .with_cloud_ssd_version(true)
                    .with_log_page_dir(true),
            ),
        ];

        for &(ids, vendor_id, expected) in cases {
            for &id in ids {
                let (result, _) = classify_with(identity(vendor_id, id), &[], NON_VU_FID_CUSTOMER);
                assert_eq!(result.unwrap(), expected, "device {id:#x}");
            }
        }
    }

    #[test]
    fn probes_toggle_documented_capability() {
        const C0: DriveCapabilities = caps().with_c0_log_page(true);
        const OCP_C1: DriveCapabilities = caps().with_ocp_c1_log_page(true);
        const C3: DriveCapabilities = caps().with_c3_log_page(true);
        const OCP_C4: DriveCapabilities = caps().with_ocp_c4_log_page(true);
        const OCP_C5: DriveCapabilities = caps().with_ocp_c5_log_page(true);
        const CA: DriveCapabilities = caps().with_ca_log_page(true);
        const D0: DriveCapabilities = caps().with_d0_log_page(true);
        const FW_HISTORY: DriveCapabilities = caps().with_fw_activate_history(true);

        let cases: &[(Option<u32>, &[(u8, DriveCapabilities)])] = &[
            // SN630
            (Some(0x2200), &[(0xca, CA), (0xd0, D0)]),
            (Some(0x2201), &[(0xca, CA), (0xd0, D0)]),
            // SN640
            (
                Some(0x2404),
                &[
                    (0xc0, C0),
                    (0xc1, OCP_C1),
                    (0xc3, C3),
                    (0xc4, OCP_C4),
                    (0xc5, OCP_C5),
                    (0xca, CA),
                    (0xd0, D0),
                ],
            ),
            // SN840
            (Some(0x2300), &[(0xc0, C0), (0xca, CA), (0xd0, D0)]),
            (Some(0x2500), &[(0xc0, C0), (0xca, CA), (0xd0, D0)]),
            // SN650 and SN655
            (
                Some(0x2700),
                &[
                    (0xc0, C0),
                    (0xc1, OCP_C1),
                    (0xc3, C3),
                    (0xc4, OCP_C4),
                    (0xc5, OCP_C5),
                ],
            ),
            (
                Some(0x2723),
                &[
                    (0xc0, C0),
                    (0xc1, OCP_C1),
                    (0xc3, C3),
                    (0xc4, OCP_C4),
                    (0xc5, OCP_C5),
                ],
            ),
            // Fabrics
            (
                None,
                &[(0xc3, C3), (0xcb, FW_HISTORY), (0xca, CA), (0xd0, D0)],
            ),
        ];

        for &(device_id, probes) in cases {
            let identity = DeviceIdentity {
                vendor_id: WDC_VID,
                device_id,
            };
            let (off, queries) = classify_with(identity, &[], NON_VU_FID_CUSTOMER);
            let off = off.unwrap();
            let logs: Vec<u8> = probes.iter().map(|&(log, _)| log).collect();
            assert_eq!(queries.probed, logs, "{device_id:x?}");

            for &(log, expected) in probes {
                let (on, _) = classify_with(identity, &[log], NON_VU_FID_CUSTOMER);
                assert_eq!(
                    on.unwrap().into_bits() ^ off.into_bits(),
                    expected.into_bits(),
                    "{device_id:x?} log {log:#x}"
                );
            }
        }
    }

    #[test]
    fn sn640_probe_order() {
        let (_, queries) = classify_with(identity(WDC_VID, 0x2400), &[], NON_VU_FID_CUSTOMER);
        assert_eq!(queries.probed, [0xc0, 0xc1, 0xc3, 0xc4, 0xc5, 0xca, 0xd0]);
        assert_eq!(queries.customer_reads, 1);
    }

    #[test]
    fn sn650_all_probes_supported() {
        let (result, _) = classify_with(
            identity(WDC_VID, 0x2701),
            &[0xc0, 0xc1, 0xc3, 0xc4, 0xc5, 0xca, 0xd0],
            NON_VU_FID_CUSTOMER,
        );
        let caps = result.unwrap();
        assert!(caps.c0_log_page());
        assert!(caps.ocp_c1_log_page());
        assert!(caps.c3_log_page());
        assert!(caps.ocp_c4_log_page());
        assert!(caps.ocp_c5_log_page());
        // The SN650 family does not probe CA or D0.
        assert!(!caps.ca_log_page());
        assert!(!caps.d0_log_page());
    }

    #[test]
    fn customer_id_branches() {
        for customer in customer_id::VU_FID_CUSTOMERS {
            let (result, _) = classify_with(identity(WDC_VID, 0x2401), &[], *customer);
            let caps = result.unwrap();
            assert!(caps.vu_fid_clear_fw_act_history());
            assert!(caps.vu_fid_clear_pcie());
            assert!(caps.info());
            assert!(caps.cloud_ssd_version());
            assert!(!caps.clear_fw_act_history());
            assert!(!caps.clear_pcie());
        }

        for customer in [0, 0x1001, 0x1006, 0x1305] {
            let (result, _) = classify_with(identity(WDC_VID, 0x2720), &[], customer);
            let caps = result.unwrap();
            assert!(caps.clear_fw_act_history());
            assert!(caps.clear_pcie());
            assert!(!caps.vu_fid_clear_fw_act_history());
            assert!(!caps.vu_fid_clear_pcie());
            assert!(!caps.info());
        }
    }

    #[test]
    fn invalid_customer_id_is_an_error() {
        for device_id in [0x2400, 0x2700, 0x2723] {
            let (result, _) =
                classify_with(identity(WDC_VID, device_id), &[0xc0], customer_id::INVALID);
            assert!(matches!(result, Err(ClassifyError::InvalidCustomerId)));
        }

        let (result, _) = classify_with(
            DeviceIdentity {
                vendor_id: WDC_VID,
                device_id: None,
            },
            &[],
            customer_id::INVALID,
        );
        assert!(matches!(result, Err(ClassifyError::InvalidCustomerId)));
    }

    #[test]
    fn fixed_families_query_nothing() {
        for (vendor_id, device_id) in [
            (WDC_VID, 0x2750),
            (WDC_VID, 0x2761),
            (SNDK_VID, 0x5006),
            (SNDK_VID, 0x5030),
            (SNDK_VID, 0x5010),
        ] {
            let (result, queries) =
                classify_with(identity(vendor_id, device_id), &[], customer_id::INVALID);
            result.unwrap();
            assert!(queries.probed.is_empty());
            assert_eq!(queries.customer_reads, 0);
        }

        // SN630 and SN840 probe but never read the customer id.
        for device_id in [0x2200, 0x2300] {
            let (result, queries) =
                classify_with(identity(WDC_VID, device_id), &[], customer_id::INVALID);
            result.unwrap();
            assert!(!queries.probed.is_empty());
            assert_eq!(queries.customer_reads, 0);
        }
    }

    #[test]
    fn unrecognized_devices_have_no_capabilities() {
        for identity in [
            identity(WDC_VID, 0x9999),
            identity(SNDK_VID, 0x2400),
            identity(WDC_VID, 0x5006),
            identity(0x144d, 0xa808),
            DeviceIdentity {
                vendor_id: SNDK_VID,
                device_id: None,
            },
            DeviceIdentity {
                vendor_id: 0x8086,
                device_id: None,
            },
        ] {
            let (result, queries) = classify_with(identity, &[0xc0], 0x1004);
            assert!(result.unwrap().is_empty(), "{identity:?}");
            assert!(queries.probed.is_empty());
            assert_eq!(queries.customer_reads, 0);
        }
    }

    #[test]
    fn fabrics_uses_reduced_classifier() {
        // 0x2400 belongs to SN640, but without a device id the family table
        // is not consulted.
        let fabrics = DeviceIdentity {
            vendor_id: WDC_VID,
            device_id: None,
        };
        let (result, queries) = classify_with(fabrics, &[0xc3, 0xcb], 0x1008);
        assert_eq!(
            result.unwrap(),
            ENTERPRISE_BASE
                .with_c3_log_page(true)
                .with_fw_activate_history(true)
                .with_vu_fid_clear_fw_act_history(true)
                .with_vu_fid_clear_pcie(true)
        );
        assert_eq!(queries.probed, [0xc3, 0xcb, 0xca, 0xd0]);

        let (result, _) = classify_with(fabrics, &[0xca, 0xd0], NON_VU_FID_CUSTOMER);
        assert_eq!(
            result.unwrap(),
            ENTERPRISE_BASE
                .with_ca_log_page(true)
                .with_d0_log_page(true)
                .with_clear_fw_act_history(true)
                .with_clear_pcie(true)
        );
    }

    #[test]
    fn device_ids_are_unique() {
        let mut seen = BTreeSet::new();
        for family in FAMILIES {
            for &id in family.device_ids.iter().copied().flatten() {
                assert!(seen.insert((family.vendor_id, id)), "{id:#x} listed twice");
            }
        }
    }
}
