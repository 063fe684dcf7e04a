//! Scenarios against a real loop device.
//!
//! These need root and `losetup`, so they are ignored by default:
//!
//! ```text
//! sudo cargo test --test loop_device -- --ignored
//! ```

use blkinspect::{ffi, BlkInspect, DeviceInfo, DeviceKind, Options};
use std::fs::File;
use std::os::fd::AsRawFd;
use std::path::PathBuf;
use std::process::Command;

const TEN_MIB: u64 = 10 * 1024 * 1024;

/// A loop device attached to a backing file, detached on drop.
struct LoopDevice {
    path: PathBuf,
    _backing: tempfile::NamedTempFile,
}

impl LoopDevice {
    fn with_len(len: u64) -> Self {
        let backing = tempfile::NamedTempFile::new().unwrap();
        backing.as_file().set_len(len).unwrap();

        let output = Command::new("losetup")
            .args(["--find", "--show"])
            .arg(backing.path())
            .output()
            .unwrap();
        assert!(output.status.success(), "losetup failed: {:?}", output);

        let path = PathBuf::from(String::from_utf8(output.stdout).unwrap().trim());
        Self {
            path,
            _backing: backing,
        }
    }
}

impl Drop for LoopDevice {
    fn drop(&mut self) {
        let _ = Command::new("losetup").arg("-d").arg(&self.path).status();
    }
}

#[test]
#[ignore = "requires root and losetup"]
fn test_loop_device_raw_abi() {
    let dev = LoopDevice::with_len(TEN_MIB);
    let file = File::open(&dev.path).unwrap();
    let fd = file.as_raw_fd();

    assert_eq!(ffi::is_block_device(fd), 1);
    assert_eq!(ffi::get_block_device_length(fd), TEN_MIB as i64);

    assert_eq!(ffi::is_block_device(fd), 1);
    assert_eq!(ffi::get_block_device_length(fd), TEN_MIB as i64);
}

#[test]
#[ignore = "requires root and losetup"]
fn test_loop_device_inspect() {
    let dev = LoopDevice::with_len(TEN_MIB);

    assert_eq!(dev.path.classify().unwrap(), DeviceKind::BlockDevice);
    assert_eq!(dev.path.block_device_length().unwrap(), TEN_MIB);

    let options = Options::new().with_require_block_device(true);
    assert_eq!(
        dev.path.inspect_opt(&options).unwrap(),
        DeviceInfo::new(DeviceKind::BlockDevice, TEN_MIB)
    );
}
