// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! PCI device IDs, grouped by product family.
//!
//! Families under [`WDC_VID`](crate::WDC_VID) are the enterprise data center
//! parts; families under [`SNDK_VID`](crate::SNDK_VID) are client and cloud
//! boot parts.

#![expect(missing_docs)] // constants are named after the product

// WDC_VID
pub const SN630: &[u32] = &[0x2200, 0x2201];
pub const SN840: &[u32] = &[0x2300, 0x2500];
pub const SN640: &[u32] = &[0x2400, 0x2401, 0x2402, 0x2404];
pub const SN650: &[u32] = &[0x2700, 0x2701, 0x2702, 0x2720, 0x2721];
pub const SN655: &[u32] = &[0x2722, 0x2723];
pub const SN861: &[u32] = &[0x2750, 0x2751, 0x2752];
pub const SNTMP: &[u32] = &[0x2761];

// SNDK_VID
pub const SN720: &[u32] = &[0x5002];
pub const SN520: &[u32] = &[0x5003, 0x5004, 0x5005];
pub const SN730: &[u32] = &[0x5006];
pub const SN530: &[u32] = &[0x5007, 0x5008, 0x5009, 0x500b, 0x501d];
pub const SN340: &[u32] = &[0x500d];
pub const ZN350: &[u32] = &[0x5010, 0x5018];
pub const SN810: &[u32] = &[0x5011];
pub const SN740: &[u32] = &[0x5015, 0x5016, 0x5017, 0x5025];
pub const SN350: &[u32] = &[0x5019];
pub const SN570: &[u32] = &[0x501a];
pub const SN850X: &[u32] = &[0x5030];
pub const SN5000: &[u32] = &[0x5034, 0x5035, 0x5036, 0x504a];
pub const SN820CL: &[u32] = &[0x5037];
pub const SN7000S: &[u32] = &[0x5039];
pub const SN7150: &[u32] = &[0x503b, 0x503c, 0x503d, 0x503e, 0x503f];
pub const SN7100: &[u32] = &[0x5043, 0x5044, 0x5045];
pub const SN8000S: &[u32] = &[0x5049];
pub const SN5100S: &[u32] = &[0x5061, 0x5062, 0x5063];
