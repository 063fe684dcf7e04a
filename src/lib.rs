//! # blkinspect
//!
//! Tell block devices apart from regular files and report their byte length.
//!
//! ## Overview
//!
//! Code that reads raw disk images wants to treat a partition such as
//! `/dev/sdb1` and an image file such as `disk.img` the same way: as a run of
//! bytes with a known length. `fstat` reports a size of zero for a device
//! node, so the real capacity of a block device has to come from the
//! `BLKGETSIZE64` ioctl. This crate wraps both queries.
//!
//! ## Features
//!
//! - [`classify`]: one `fstat`, block device or not
//! - [`block_device_length`]: one `BLKGETSIZE64`, capacity in bytes
//! - [`BlkInspect`] for [`File`](std::fs::File), [`Path`](std::path::Path),
//!   and [`BorrowedFd`](std::os::fd::BorrowedFd), including a combined
//!   kind-plus-length query that falls back to the file size for non-devices
//! - A C ABI (`is_block_device`, `get_block_device_length`) in the `cdylib`
//!   build, see [`ffi`]
//!
//! ## Example
//!
//! ```no_run
//! use blkinspect::{BlkInspect, DeviceKind};
//! use std::fs::File;
//!
//! let file = File::open("/dev/sdb1").unwrap();
//!
//! if file.classify().unwrap() == DeviceKind::BlockDevice {
//!     println!("{} bytes", file.block_device_length().unwrap());
//! }
//!
//! let info = file.inspect().unwrap();
//! println!("{} of {} bytes", info.kind, info.length);
//! ```
//!
//! ## Platform
//!
//! Linux only. Building for any other target is a compile error.

#[cfg(not(target_os = "linux"))]
compile_error!("blkinspect only supports Linux");

mod error;
pub mod ffi;
mod info;
mod inspect;
mod options;
mod sys;

pub use error::{Error, Result};
pub use info::{DeviceInfo, DeviceKind};
pub use inspect::{block_device_length, classify, BlkInspect};
pub use options::Options;
