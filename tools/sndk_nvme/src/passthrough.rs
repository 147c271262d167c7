// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Vendor commands implemented by the `wdc` plugin of the NVMe CLI.

use anyhow::Context as _;
use clap::Args;
use clap::Subcommand;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use std::process::ExitCode;
use std::process::ExitStatus;

/// Arguments of a vendor command.
#[derive(Args, Debug, Clone)]
pub struct PassthroughArgs {
    /// Arguments passed to the vendor command unchanged
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<OsString>,
}

macro_rules! vendor_commands {
    ($($(#[doc = $doc:literal])* $variant:ident => $name:literal,)*) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum VendorCommand {
            $(
                $(#[doc = $doc])*
                #[clap(name = $name)]
                $variant(PassthroughArgs),
            )*
        }

        impl VendorCommand {
            /// The command name, shared with the `wdc` plugin.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $name,)*
                }
            }

            fn args(&self) -> &[OsString] {
                match self {
                    $(Self::$variant(a) => &a.args,)*
                }
            }
        }
    };
}

vendor_commands! {
    /// Collect the internal firmware log
    InternalLog => "vs-internal-log",
    /// Show NAND statistics
    NandStats => "vs-nand-stats",
    /// Show the additional SMART log
    SmartAddLog => "vs-smart-add-log",
    /// Clear PCIe correctable error counters
    ClearPcieCorrectableErrors => "clear-pcie-correctable-errors",
    /// Show drive status
    DriveStatus => "get-drive-status",
    /// Clear a pending assert dump
    ClearAssertDump => "clear-assert-dump",
    /// Resize the drive
    DriveResize => "drive-resize",
    /// Show firmware activation history
    FwActivateHistory => "vs-fw-activate-history",
    /// Clear firmware activation history
    ClearFwActivateHistory => "clear-fw-activate-history",
    /// Enable or disable controller initiated telemetry
    TelemetryControllerOption => "vs-telemetry-controller-option",
    /// Collect the error reason identifier
    ErrorReasonIdentifier => "vs-error-reason-identifier",
    /// Show the vendor log page directory
    LogPageDirectory => "log-page-directory",
    /// Resize a namespace
    NamespaceResize => "namespace-resize",
    /// Show drive information
    DriveInfo => "vs-drive-info",
    /// Show the cloud SSD plugin version
    CloudSsdPluginVersion => "cloud-SSD-plugin-version",
    /// Show PCIe statistics
    PcieStats => "vs-pcie-stats",
    /// Show the OCP latency monitor log
    LatencyMonitorLog => "get-latency-monitor-log",
    /// Show the OCP error recovery log
    ErrorRecoveryLog => "get-error-recovery-log",
    /// Show the OCP device capabilities log
    DevCapabilitiesLog => "get-dev-capabilities-log",
    /// Show the OCP unsupported requirements log
    UnsupportedReqsLog => "get-unsupported-reqs-log",
    /// Show the cloud boot SSD version
    CloudBootSsdVersion => "cloud-boot-SSD-version",
    /// Show the cloud log page
    CloudLog => "vs-cloud-log",
    /// Show the hardware revision log
    HwRevLog => "vs-hw-rev-log",
    /// Show device write amplification
    DeviceWaf => "vs-device-waf",
    /// Configure the OCP latency monitor
    SetLatencyMonitorFeature => "set-latency-monitor-feature",
    /// Show temperature statistics
    TemperatureStats => "vs-temperature-stats",
}

fn command_line(nvme_cli: &Path, command: &VendorCommand) -> Command {
    let mut cmd = Command::new(nvme_cli);
    cmd.arg("wdc").arg(command.name()).args(command.args());
    cmd
}

/// Runs `command` through the NVMe CLI and returns its exit code.
pub fn run(nvme_cli: &Path, command: &VendorCommand) -> anyhow::Result<ExitCode> {
    let mut cmd = command_line(nvme_cli, command);
    tracing::debug!(?cmd, "running vendor command");
    let status = cmd
        .status()
        .with_context(|| format!("failed to run {}", nvme_cli.display()))?;
    Ok(ExitCode::from(exit_code(status)))
}

fn exit_code(status: ExitStatus) -> u8 {
    match status.code() {
        Some(code) => u8::try_from(code).unwrap_or(1),
        // Terminated by a signal.
        None => 1,
    }
}
