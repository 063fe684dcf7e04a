//! Results returned from inspection.

use std::fmt;

/// What a descriptor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// A block device node (disk, partition, loop device, ...).
    BlockDevice,
    /// Anything else: regular file, directory, character device, pipe.
    NotBlockDevice,
}

impl DeviceKind {
    /// Classify from the `st_mode` field of a `struct stat`.
    pub fn from_mode(mode: libc::mode_t) -> Self {
        if crate::sys::is_block_mode(mode) {
            DeviceKind::BlockDevice
        } else {
            DeviceKind::NotBlockDevice
        }
    }

    /// Whether this is [`DeviceKind::BlockDevice`].
    pub fn is_block_device(self) -> bool {
        self == DeviceKind::BlockDevice
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::BlockDevice => f.write_str("block device"),
            DeviceKind::NotBlockDevice => f.write_str("not a block device"),
        }
    }
}

/// Kind and usable byte length of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Kind reported by the status query.
    pub kind: DeviceKind,

    /// Length in bytes.
    ///
    /// For a block device this is the capacity reported by `BLKGETSIZE64`,
    /// otherwise the size reported by `fstat`.
    pub length: u64,

    /// Whether a block device's length was taken from `fstat` because the
    /// control request failed.
    pub used_fallback: bool,
}

impl DeviceInfo {
    /// Create a DeviceInfo for a length obtained the regular way.
    pub fn new(kind: DeviceKind, length: u64) -> Self {
        Self {
            kind,
            length,
            used_fallback: false,
        }
    }

    /// Create a DeviceInfo for a block device whose size request failed.
    pub fn fallback(length: u64) -> Self {
        Self {
            kind: DeviceKind::BlockDevice,
            length,
            used_fallback: true,
        }
    }
}
