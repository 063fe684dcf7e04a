//! Core inspection trait and implementations.
//!
//! This module provides the [`BlkInspect`] trait which classifies a descriptor
//! and reports its byte length, plus the two descriptor-level primitives
//! [`classify`] and [`block_device_length`] it is built on.

use crate::error::{Error, Result};
use crate::info::{DeviceInfo, DeviceKind};
use crate::options::Options;
use crate::sys;

use std::fs::File;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd};
use std::path::{Path, PathBuf};

/// Report whether `fd` refers to a block device.
///
/// Issues exactly one `fstat(2)`. The descriptor is borrowed for the call
/// only and is never closed.
///
/// # Errors
///
/// [`Error::StatusQuery`] if the status query fails, e.g. for a descriptor
/// that has been closed.
pub fn classify(fd: BorrowedFd<'_>) -> Result<DeviceKind> {
    let stat = status(fd)?;

    let kind = DeviceKind::from_mode(stat.st_mode);
    log::trace!("fd {} is {}", fd.as_raw_fd(), kind);
    Ok(kind)
}

fn status(fd: BorrowedFd<'_>) -> Result<libc::stat> {
    let raw = fd.as_raw_fd();
    sys::fstat(raw).map_err(|e| {
        log::debug!("fstat on fd {} failed: {}", raw, e);
        Error::StatusQuery(e)
    })
}

/// Return the capacity in bytes of the block device behind `fd`.
///
/// Issues exactly one `BLKGETSIZE64` ioctl. The descriptor kind is not
/// checked first; call [`classify`] beforehand if it is not known. On a
/// regular file the kernel rejects the request.
///
/// # Errors
///
/// [`Error::ControlRequest`] if the ioctl fails.
pub fn block_device_length(fd: BorrowedFd<'_>) -> Result<u64> {
    let raw = fd.as_raw_fd();
    let length = sys::block_device_size(raw).map_err(|e| {
        log::debug!("BLKGETSIZE64 on fd {} failed: {}", raw, e);
        Error::ControlRequest(e)
    })?;

    log::trace!("fd {} has {} bytes", raw, length);
    Ok(length)
}

/// Trait for inspecting what a file handle refers to.
///
/// This trait provides:
/// - [`classify`](BlkInspect::classify): block device or not
/// - [`block_device_length`](BlkInspect::block_device_length): raw device capacity
/// - [`inspect`](BlkInspect::inspect) / [`inspect_opt`](BlkInspect::inspect_opt):
///   kind plus usable length, for block devices and regular files alike
///
/// # Example
///
/// ```no_run
/// use blkinspect::{BlkInspect, Options};
/// use std::path::Path;
///
/// let path = Path::new("/dev/loop0");
///
/// // Kind only
/// let kind = path.classify().unwrap();
///
/// // Kind and length
/// let opts = Options::new().with_require_block_device(true);
/// let info = path.inspect_opt(&opts).unwrap();
/// println!("{}: {} bytes", kind, info.length);
/// ```
pub trait BlkInspect {
    /// Report whether the handle refers to a block device.
    fn classify(&self) -> Result<DeviceKind>;

    /// Ask the kernel for the block device capacity in bytes.
    fn block_device_length(&self) -> Result<u64>;

    /// Report kind and usable length with default options.
    fn inspect(&self) -> Result<DeviceInfo> {
        self.inspect_opt(&Options::default())
    }

    /// Report kind and usable length.
    ///
    /// Block devices are sized with `BLKGETSIZE64`, everything else with the
    /// size from the status query.
    fn inspect_opt(&self, options: &Options) -> Result<DeviceInfo>;
}

/// Internal helper to perform a full inspection.
struct InspectContext<'a> {
    fd: BorrowedFd<'a>,
    options: &'a Options,
}

impl<'a> InspectContext<'a> {
    fn new(fd: BorrowedFd<'a>, options: &'a Options) -> Self {
        Self { fd, options }
    }

    fn inspect(&self) -> Result<DeviceInfo> {
        let stat = status(self.fd)?;
        let kind = DeviceKind::from_mode(stat.st_mode);
        let stat_size = u64::try_from(stat.st_size).unwrap_or(0);

        self.resolve(kind, stat_size, || block_device_length(self.fd))
    }

    /// Pick the usable length once the kind is known. `size_query` is only
    /// run for block devices.
    fn resolve<F>(&self, kind: DeviceKind, stat_size: u64, size_query: F) -> Result<DeviceInfo>
    where
        F: FnOnce() -> Result<u64>,
    {
        if !kind.is_block_device() {
            if self.options.require_block_device {
                return Err(Error::NotBlockDevice);
            }
            return Ok(DeviceInfo::new(kind, stat_size));
        }

        match size_query() {
            Ok(length) => Ok(DeviceInfo::new(kind, length)),
            Err(err) if self.options.allow_fallback => {
                log::warn!(
                    "fd {}: {}, using status size {}",
                    self.fd.as_raw_fd(),
                    err,
                    stat_size
                );
                Ok(DeviceInfo::fallback(stat_size))
            }
            Err(err) => Err(err),
        }
    }
}

impl BlkInspect for BorrowedFd<'_> {
    fn classify(&self) -> Result<DeviceKind> {
        classify(*self)
    }

    fn block_device_length(&self) -> Result<u64> {
        block_device_length(*self)
    }

    fn inspect_opt(&self, options: &Options) -> Result<DeviceInfo> {
        InspectContext::new(*self, options).inspect()
    }
}

impl BlkInspect for File {
    fn classify(&self) -> Result<DeviceKind> {
        classify(self.as_fd())
    }

    fn block_device_length(&self) -> Result<u64> {
        block_device_length(self.as_fd())
    }

    fn inspect_opt(&self, options: &Options) -> Result<DeviceInfo> {
        InspectContext::new(self.as_fd(), options).inspect()
    }
}

// The file is opened read-only for the duration of the call.
impl BlkInspect for Path {
    fn classify(&self) -> Result<DeviceKind> {
        open(self)?.classify()
    }

    fn block_device_length(&self) -> Result<u64> {
        open(self)?.block_device_length()
    }

    fn inspect_opt(&self, options: &Options) -> Result<DeviceInfo> {
        open(self)?.inspect_opt(options)
    }
}

impl BlkInspect for PathBuf {
    fn classify(&self) -> Result<DeviceKind> {
        self.as_path().classify()
    }

    fn block_device_length(&self) -> Result<u64> {
        self.as_path().block_device_length()
    }

    fn inspect_opt(&self, options: &Options) -> Result<DeviceInfo> {
        self.as_path().inspect_opt(options)
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })
}
