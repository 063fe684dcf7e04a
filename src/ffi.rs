//! C ABI entry points.
//!
//! Both functions take a raw descriptor owned by the caller and answer with a
//! single integer, `-1` meaning failure. On failure `errno` holds the code of
//! the system call that failed, so a foreign caller can read it right after
//! the call returns.
//!
//! ```c
//! int32_t is_block_device(int fd);          // 1, 0, or -1
//! int64_t get_block_device_length(int fd);  // bytes, or -1
//! ```

use crate::error::Result;
use crate::info::DeviceKind;
use crate::sys;

use nix::errno::Errno;
use std::os::raw::c_int;

/// Sentinel returned by both entry points on failure.
pub const FAILED: i32 = -1;

/// Project a classification onto the C ABI encoding: 1, 0, or -1.
pub fn classify_code(result: &Result<DeviceKind>) -> i32 {
    match result {
        Ok(DeviceKind::BlockDevice) => 1,
        Ok(DeviceKind::NotBlockDevice) => 0,
        Err(_) => FAILED,
    }
}

/// Project a length onto the C ABI encoding.
///
/// Lengths that do not fit in an `i64` are reported as failures.
pub fn length_code(result: &Result<u64>) -> i64 {
    match result {
        Ok(length) => i64::try_from(*length).unwrap_or(FAILED as i64),
        Err(_) => FAILED as i64,
    }
}

/// Return 1 if `fd` is a block device, 0 if it is not, -1 if `fstat` failed.
///
/// The descriptor is neither closed nor retained.
#[no_mangle]
pub extern "C" fn is_block_device(fd: c_int) -> i32 {
    match sys::fstat(fd) {
        Ok(stat) => classify_code(&Ok(DeviceKind::from_mode(stat.st_mode))),
        Err(_) => FAILED,
    }
}

/// Return the byte length of the block device behind `fd`, or -1.
///
/// A device of 2^63 bytes or more cannot be represented; it is reported as
/// -1 with `errno` set to `EOVERFLOW`.
#[no_mangle]
pub extern "C" fn get_block_device_length(fd: c_int) -> i64 {
    match sys::block_device_size(fd) {
        Ok(size) => size_or_overflow(size),
        Err(_) => FAILED as i64,
    }
}

fn size_or_overflow(size: u64) -> i64 {
    i64::try_from(size).unwrap_or_else(|_| {
        Errno::EOVERFLOW.set();
        FAILED as i64
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::{self, Write};
    use std::os::fd::AsRawFd;

    #[test]
    fn test_regular_file() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(&[0u8; 500]).unwrap();
        let fd = file.as_raw_fd();

        assert_eq!(is_block_device(fd), 0);
        assert_eq!(get_block_device_length(fd), -1);

        // unchanged on repeat
        assert_eq!(is_block_device(fd), 0);
        assert_eq!(get_block_device_length(fd), -1);
    }

    #[test]
    fn test_invalid_descriptor() {
        assert_eq!(is_block_device(-1), -1);
        assert_eq!(io::Error::last_os_error().raw_os_error(), Some(libc::EBADF));
        assert_eq!(get_block_device_length(-1), -1);
        assert_eq!(io::Error::last_os_error().raw_os_error(), Some(libc::EBADF));
    }

    #[test]
    fn test_size_overflow_sets_errno() {
        Errno::EBADF.set();
        assert_eq!(size_or_overflow(10_485_760), 10_485_760);
        assert_eq!(Errno::last(), Errno::EBADF);

        assert_eq!(size_or_overflow(1u64 << 63), -1);
        assert_eq!(Errno::last(), Errno::EOVERFLOW);
        assert_eq!(
            io::Error::last_os_error().raw_os_error(),
            Some(libc::EOVERFLOW)
        );
    }

    #[test]
    fn test_classify_code() {
        assert_eq!(classify_code(&Ok(DeviceKind::BlockDevice)), 1);
        assert_eq!(classify_code(&Ok(DeviceKind::NotBlockDevice)), 0);
        assert_eq!(classify_code(&Err(Error::NotBlockDevice)), -1);
    }

    #[test]
    fn test_length_code() {
        assert_eq!(length_code(&Ok(10_485_760)), 10_485_760);
        assert_eq!(length_code(&Ok(i64::MAX as u64)), i64::MAX);
        assert_eq!(length_code(&Ok(1u64 << 63)), -1);
        assert_eq!(length_code(&Err(Error::NotBlockDevice)), -1);
    }
}
