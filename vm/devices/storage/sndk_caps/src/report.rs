// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Human readable capability report.

use sndk_spec::DriveCapabilities;
use std::fmt::Write as _;

/// Supported when any bit of the mask is set. `None` is always supported.
pub type ReportEntry = (&'static str, Option<DriveCapabilities>);

const fn bit(caps: DriveCapabilities) -> Option<DriveCapabilities> {
    Some(caps)
}

const NONE: DriveCapabilities = DriveCapabilities::new();

/// Report lines, in output order.
pub const REPORT_ENTRIES: &[ReportEntry] = &[
    ("vs-internal-log", bit(DriveCapabilities::INTERNAL_LOG_MASK)),
    ("vs-nand-stats", bit(NONE.with_nand_stats(true))),
    ("vs-smart-add-log", bit(DriveCapabilities::SMART_LOG_MASK)),
    ("--C0 Log Page", bit(NONE.with_c0_log_page(true))),
    ("--C1 Log Page", bit(NONE.with_c1_log_page(true))),
    ("--C3 Log Page", bit(NONE.with_c3_log_page(true))),
    ("--CA Log Page", bit(NONE.with_ca_log_page(true))),
    ("--D0 Log Page", bit(NONE.with_d0_log_page(true))),
    (
        "clear-pcie-correctable-errors",
        bit(DriveCapabilities::CLEAR_PCIE_MASK),
    ),
    ("get-drive-status", bit(NONE.with_drive_status(true))),
    ("drive-resize", bit(NONE.with_resize(true))),
    (
        "vs-fw-activate-history",
        bit(DriveCapabilities::FW_ACTIVATE_HISTORY_MASK),
    ),
    (
        "clear-fw-activate-history",
        bit(DriveCapabilities::CLEAR_FW_ACT_HISTORY_MASK),
    ),
    (
        "vs-telemetry-controller-option",
        bit(NONE.with_disable_ctlr_tele_log(true)),
    ),
    ("vs-error-reason-identifier", bit(NONE.with_reason_id(true))),
    ("log-page-directory", bit(NONE.with_log_page_dir(true))),
    ("namespace-resize", bit(NONE.with_ns_resize(true))),
    ("vs-drive-info", bit(NONE.with_info(true))),
    ("vs-temperature-stats", bit(NONE.with_temp_stats(true))),
    (
        "cloud-SSD-plugin-version",
        bit(NONE.with_cloud_ssd_version(true)),
    ),
    ("vs-pcie-stats", bit(NONE.with_pcie_stats(true))),
    (
        "get-error-recovery-log",
        bit(NONE.with_ocp_c1_log_page(true)),
    ),
    (
        "get-dev-capabilities-log",
        bit(NONE.with_ocp_c4_log_page(true)),
    ),
    (
        "get-unsupported-reqs-log",
        bit(NONE.with_ocp_c5_log_page(true)),
    ),
    ("get-latency-monitor-log", bit(NONE.with_c3_log_page(true))),
    (
        "cloud-boot-SSD-version",
        bit(NONE.with_cloud_boot_ssd_version(true)),
    ),
    ("vs-cloud-log", bit(NONE.with_cloud_log_page(true))),
    ("vs-hw-rev-log", bit(NONE.with_hw_rev_log_page(true))),
    ("vs-device_waf", bit(NONE.with_device_waf(true))),
    (
        "set-latency-monitor-feature",
        bit(NONE.with_set_latency_monitor(true)),
    ),
    ("capabilities", None),
];

/// Returns each report entry's name and whether `caps` supports it.
pub fn report_lines(caps: DriveCapabilities) -> impl Iterator<Item = (&'static str, bool)> {
    REPORT_ENTRIES
        .iter()
        .map(move |&(name, mask)| (name, mask.is_none_or(|mask| caps.intersects(mask))))
}

/// Formats `caps` as one `name : Supported` or `name : Not Supported` line
/// per command.
pub fn format_report(caps: DriveCapabilities) -> String {
    let mut report = String::new();
    for (name, supported) in report_lines(caps) {
        let status = if supported {
            "Supported"
        } else {
            "Not Supported"
        };
        let _ = writeln!(report, "{name:<30}: {status}");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report() {
        let report = format_report(DriveCapabilities::new());
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), REPORT_ENTRIES.len());
        assert_eq!(lines[0], "vs-internal-log               : Not Supported");
        assert_eq!(lines[13], "vs-telemetry-controller-option: Not Supported");
        assert_eq!(lines.last().unwrap(), &"capabilities                  : Supported");
        assert_eq!(report.matches(": Supported").count(), 1);
    }

    #[test]
    fn lines_follow_bits() {
        let caps = DriveCapabilities::new()
            .with_dui(true)
            .with_nand_stats(true)
            .with_info(true)
            .with_temp_stats(true)
            .with_vuc_clear_pcie(true)
            .with_pcie_stats(true);
        let supported: Vec<_> = report_lines(caps)
            .filter(|&(_, supported)| supported)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            supported,
            [
                "vs-internal-log",
                "vs-nand-stats",
                "clear-pcie-correctable-errors",
                "vs-drive-info",
                "vs-temperature-stats",
                "vs-pcie-stats",
                "capabilities",
            ]
        );

        let report = format_report(caps);
        assert!(report.contains("vs-pcie-stats                 : Supported\n"));
        assert!(report.contains("--C0 Log Page                 : Not Supported\n"));
    }

    #[test]
    fn grouped_commands() {
        for caps in [
            DriveCapabilities::new().with_c1_log_page(true),
            DriveCapabilities::new().with_d0_log_page(true),
        ] {
            assert!(report_lines(caps).any(|(name, s)| name == "vs-smart-add-log" && s));
        }

        let c2_history = DriveCapabilities::new().with_fw_activate_history_c2(true);
        let supported: Vec<_> = report_lines(c2_history).filter(|l| l.1).collect();
        assert_eq!(
            supported,
            [("vs-fw-activate-history", true), ("capabilities", true)]
        );
    }

    #[test]
    fn all_supported() {
        let report = format_report(DriveCapabilities::from_bits(u64::MAX));
        assert!(!report.contains("Not Supported"));
    }
}
