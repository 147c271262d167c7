// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Sandisk and WDC vendor commands for NVMe drives.
//!
//! `capabilities` reports which vendor commands a drive supports. The other
//! commands are forwarded to the `wdc` plugin of the NVMe CLI.

mod passthrough;

use anyhow::Context as _;
use clap::Parser;
use clap::Subcommand;
use passthrough::VendorCommand;
use sndk_caps::LiveQueries;
use sndk_caps::NvmeTransport;
use sndk_caps::SysfsTopology;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[clap(name = "sndk-nvme", about = "Sandisk vendor specific NVMe commands.")]
struct Options {
    /// Enable verbose logging (trace level)
    #[clap(short, long, global = true)]
    verbose: bool,

    /// The NVMe CLI program implementing the vendor commands
    #[clap(long, env = "SNDK_NVME_CLI", default_value = "nvme", global = true)]
    nvme_cli: PathBuf,

    /// Where sysfs is mounted
    #[clap(long, env = "SNDK_SYSFS_ROOT", default_value = "/sys", global = true)]
    sysfs_root: PathBuf,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show which vendor commands a device supports
    Capabilities {
        /// The controller or namespace, for example `/dev/nvme0` or `nvme0n1`
        device: String,
    },
    #[clap(flatten)]
    Vendor(VendorCommand),
}

fn main() -> anyhow::Result<ExitCode> {
    let opts = Options::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .log_internal_errors(true)
        .with_max_level(if opts.verbose {
            tracing::Level::TRACE
        } else {
            tracing::Level::INFO
        })
        .init();

    match opts.command {
        Command::Capabilities { device } => {
            let topology = SysfsTopology::new(opts.sysfs_root);
            let mut transport = open_device(&device)?;
            let report = capabilities(&topology, &device, &mut transport)?;
            write_report(&mut std::io::stdout().lock(), &report)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Vendor(command) => passthrough::run(&opts.nvme_cli, &command),
    }
}

/// Returns the capability report of `device`.
fn capabilities(
    topology: &SysfsTopology,
    device: &str,
    transport: &mut impl NvmeTransport,
) -> anyhow::Result<String> {
    let identity = sndk_caps::resolve(topology, device, transport)
        .with_context(|| format!("failed to identify {device}"))?;

    // The report is still useful for other vendors: nothing is supported.
    if let Err(err) = identity.check_vendor() {
        tracing::error!(error = &err as &dyn std::error::Error, "unsupported device");
    }

    let caps = sndk_caps::classify(&identity, &mut LiveQueries::new(&mut *transport))
        .with_context(|| format!("failed to read capabilities of {device}"))?;

    let name = device_name(device);
    Ok(format!(
        "Sandisk Plugin Capabilities for NVME device:{name}\n{}",
        sndk_caps::format_report(caps)
    ))
}

/// Writes `report` to `out`, failing instead of panicking on a closed pipe.
fn write_report(out: &mut impl Write, report: &str) -> anyhow::Result<()> {
    out.write_all(report.as_bytes())
        .and_then(|()| out.flush())
        .context("failed to write report")
}

fn device_name(device: &str) -> &str {
    Path::new(device)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(device)
}

#[cfg(target_os = "linux")]
fn open_device(device: &str) -> anyhow::Result<Box<dyn NvmeTransport>> {
    let path = if device.contains('/') {
        PathBuf::from(device)
    } else {
        Path::new("/dev").join(device)
    };
    let device = nvme_passthru::NvmeAdminDevice::open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Box::new(device))
}

#[cfg(not(target_os = "linux"))]
fn open_device(_device: &str) -> anyhow::Result<Box<dyn NvmeTransport>> {
    anyhow::bail!("nvme admin passthrough is only available on linux")
}
