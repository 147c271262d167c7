// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! PCI identity resolution.

use crate::DeviceIdentity;
use crate::transport::NvmeTransport;
use std::io;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Attribute values longer than this are truncated before parsing.
const ATTRIBUTE_MAX_LEN: usize = 31;

#[expect(missing_docs)] // self-explanatory variants
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unable to find {name} as a controller or namespace")]
    NotFound { name: String },
    #[error("failed to open {}", .path.display())]
    OpenAttribute {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {}", .path.display())]
    ReadAttribute {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid id {value:?} in {}", .path.display())]
    ParseAttribute { path: PathBuf, value: String },
    #[error("identify controller failed")]
    Identify(#[source] anyhow::Error),
}

/// The PCI attribute files backing a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PciIdPaths {
    /// The `vendor` attribute.
    pub vendor: PathBuf,
    /// The `device` attribute.
    pub device: PathBuf,
}

/// Locates NVMe controllers and namespaces in a sysfs tree.
#[derive(Debug, Clone)]
pub struct SysfsTopology {
    root: PathBuf,
}

impl Default for SysfsTopology {
    fn default() -> Self {
        Self::new("/sys")
    }
}

impl SysfsTopology {
    /// Uses the sysfs tree mounted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the sysfs directory of controller `name`, if there is one.
    pub fn controller_dir(&self, name: &str) -> Option<PathBuf> {
        let dir = self.root.join("class/nvme").join(name);
        dir.is_dir().then_some(dir)
    }

    /// Returns the sysfs directory of namespace `name`, if there is one.
    pub fn namespace_dir(&self, name: &str) -> Option<PathBuf> {
        let dir = self.root.join("block").join(name);
        dir.is_dir().then_some(dir)
    }

    /// Finds the PCI attribute files for `name`. Controllers are tried
    /// first. A namespace's PCI function is one `device` link further away.
    pub fn pci_id_paths(&self, name: &str) -> Result<PciIdPaths, ResolveError> {
        let name = device_name(name);
        let pci_dir = if let Some(dir) = self.controller_dir(name) {
            tracing::debug!(path = %dir.display(), "resolved controller");
            dir.join("device")
        } else if let Some(dir) = self.namespace_dir(name) {
            tracing::debug!(path = %dir.display(), "resolved namespace");
            dir.join("device/device")
        } else {
            return Err(ResolveError::NotFound { name: name.into() });
        };

        Ok(PciIdPaths {
            vendor: pci_dir.join("vendor"),
            device: pci_dir.join("device"),
        })
    }

    /// Reads the PCI vendor and device IDs of `name` from sysfs.
    pub fn read_pci_ids(&self, name: &str) -> Result<DeviceIdentity, ResolveError> {
        let paths = self.pci_id_paths(name)?;
        let vendor_id = read_id_attribute(&paths.vendor)?;
        let device_id = read_id_attribute(&paths.device)?;
        Ok(DeviceIdentity {
            vendor_id,
            device_id: Some(device_id),
        })
    }
}

/// Reads the vendor ID from Identify Controller.
pub fn read_vendor_id(transport: &mut impl NvmeTransport) -> Result<u32, ResolveError> {
    let ctrl = transport
        .identify_controller()
        .map_err(ResolveError::Identify)?;
    Ok(ctrl.vid.get().into())
}

/// Resolves the identity of device `name`.
///
/// Falls back to Identify Controller when sysfs has no PCI function for the
/// device, in which case the device ID is left unresolved.
pub fn resolve(
    topology: &SysfsTopology,
    name: &str,
    transport: &mut impl NvmeTransport,
) -> Result<DeviceIdentity, ResolveError> {
    match topology.read_pci_ids(name) {
        Ok(identity) => {
            tracing::debug!(
                vendor_id = identity.vendor_id,
                device_id = identity.device_id,
                "read pci ids from sysfs"
            );
            Ok(identity)
        }
        Err(err) => {
            tracing::debug!(
                error = &err as &dyn std::error::Error,
                "sysfs lookup failed, identifying controller"
            );
            let vendor_id = read_vendor_id(transport)?;
            tracing::debug!(vendor_id, "read vendor id from identify controller");
            Ok(DeviceIdentity {
                vendor_id,
                device_id: None,
            })
        }
    }
}

/// Strips any directory from a device path, so `/dev/nvme0` resolves the
/// same as `nvme0`.
fn device_name(name: &str) -> &str {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name)
}

fn read_id_attribute(path: &Path) -> Result<u32, ResolveError> {
    read_id_attribute_with(path, |path| fs_err::File::open(path))
}

/// The attribute is closed before parsing, on every path.
fn read_id_attribute_with<R: Read>(
    path: &Path,
    open: impl FnOnce(&Path) -> io::Result<R>,
) -> Result<u32, ResolveError> {
    let mut file = open(path).map_err(|source| ResolveError::OpenAttribute {
        path: path.into(),
        source,
    })?;

    let mut buf = [0; ATTRIBUTE_MAX_LEN];
    let len = file
        .read(&mut buf)
        .map_err(|source| ResolveError::ReadAttribute {
            path: path.into(),
            source,
        })?;
    drop(file);

    let value = &buf[..len];
    parse_id(value).ok_or_else(|| ResolveError::ParseAttribute {
        path: path.into(),
        value: String::from_utf8_lossy(value).into_owned(),
    })
}

/// Parses a sysfs id. One trailing newline is accepted. The radix follows
/// the prefix: `0x` for hex, a leading `0` for octal, decimal otherwise.
fn parse_id(value: &[u8]) -> Option<u32> {
    let value = std::str::from_utf8(value).ok()?;
    let value = value.strip_suffix('\n').unwrap_or(value).trim_start();
    let (digits, radix) = if let Some(hex) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        (hex, 16)
    } else if value.len() > 1 && value.starts_with('0') {
        (&value[1..], 8)
    } else {
        (value, 10)
    };
    u32::from_str_radix(digits, radix).ok()
}
