//! CLI tool for classifying files and block devices and reporting their length.
//!
//! This tool uses the `blkinspect` library to tell block devices apart from
//! regular files and print the usable byte length of each.

use blkinspect::{ffi, BlkInspect, DeviceInfo, DeviceKind, Options};
use blkpath::ResolveDevice;
use clap::Parser;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::fs::File;
use std::io;
use std::os::fd::AsFd;
use std::path::{Path, PathBuf};

/// Report whether paths are block devices and how many bytes they hold.
///
/// Block devices are sized with the BLKGETSIZE64 ioctl, everything else
/// with the size from fstat.
#[derive(Parser, Debug)]
#[command(name = "blkinspect")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Paths to inspect
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Verbose mode (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use the fstat size when a block device rejects the size request
    #[arg(long)]
    allow_fallback: bool,

    /// Fail for paths that are not block devices
    #[arg(long)]
    require_block_device: bool,

    /// Print the raw C ABI codes: is_block_device and get_block_device_length
    #[arg(long)]
    raw: bool,

    /// Re-run through sudo when not root
    #[arg(long)]
    escalate: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logger(args.verbose) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if args.escalate {
        if let Err(e) = sudo::escalate_if_needed() {
            eprintln!("Error: Failed to escalate privileges: {}", e);
            std::process::exit(1);
        }
    }

    let options = Options::new()
        .with_allow_fallback(args.allow_fallback)
        .with_require_block_device(args.require_block_device);

    let mut failed = false;
    for path in &args.paths {
        let result = if args.raw {
            run_raw(path)
        } else {
            run(path, &options, args.verbose > 0)
        };

        if let Err(e) = result {
            eprintln!("{}: {}", path.display(), e);
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
}

fn init_logger(verbose: u8) -> Result<(), log::SetLoggerError> {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}

fn run(path: &Path, options: &Options, verbose: bool) -> io::Result<()> {
    let file = File::open(path)?;
    let info = file.inspect_opt(options)?;

    println!("{}: {}, {} bytes", path.display(), info.kind, info.length);

    if verbose {
        print_verbose_info(path, &info);
    }

    Ok(())
}

fn run_raw(path: &Path) -> io::Result<()> {
    let file = File::open(path)?;
    let fd = file.as_fd();

    let kind = ffi::classify_code(&blkinspect::classify(fd));
    let length = ffi::length_code(&blkinspect::block_device_length(fd));

    println!("{}\t{}\t{}", path.display(), kind, length);
    Ok(())
}

fn print_verbose_info(path: &Path, info: &DeviceInfo) {
    eprintln!("Length: {} (0x{:x})", info.length, info.length);

    match info.kind {
        DeviceKind::BlockDevice => {
            if info.used_fallback {
                eprintln!("(Size request failed, length taken from fstat)");
            }
        }
        DeviceKind::NotBlockDevice => match path.resolve_device() {
            Ok(device) => {
                eprintln!("Backing block device: {}", device.display());
            }
            Err(e) => {
                eprintln!("Backing block device: (unable to resolve: {})", e);
            }
        },
    }
}
