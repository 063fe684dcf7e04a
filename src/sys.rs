//! Raw kernel requests.
//!
//! Everything here works on a bare [`RawFd`] so the C ABI entry points can
//! call it without first asserting that the descriptor is open.

use std::io;
use std::os::fd::RawFd;

// linux/fs.h declares BLKGETSIZE64 as _IOR(0x12, 114, size_t): the encoded
// size is the pointer width even though the kernel always writes a u64.
nix::ioctl_read_bad!(
    blkgetsize64,
    nix::request_code_read!(0x12, 114, std::mem::size_of::<usize>()),
    u64
);

/// Query descriptor metadata with `fstat(2)`.
pub(crate) fn fstat(fd: RawFd) -> io::Result<libc::stat> {
    nix::sys::stat::fstat(fd).map_err(io::Error::from)
}

/// Whether the file-type bits of `mode` denote a block device.
pub(crate) fn is_block_mode(mode: libc::mode_t) -> bool {
    mode & libc::S_IFMT == libc::S_IFBLK
}

/// Ask the driver for the device capacity in bytes via `BLKGETSIZE64`.
pub(crate) fn block_device_size(fd: RawFd) -> io::Result<u64> {
    let mut size: u64 = 0;

    // SAFETY: `size` is a valid u64 out pointer for the duration of the call.
    unsafe { blkgetsize64(fd, &mut size) }.map_err(io::Error::from)?;

    Ok(size)
}
