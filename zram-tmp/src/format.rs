// ABOUTME: Formats the zram device with a journal-less ext4 filesystem.
// ABOUTME: The mkfs flags are fixed; only the helper and device paths come from config.

use std::ffi::OsString;
use std::path::Path;
use tracing::info;

use crate::config::ZramConfig;
use crate::helper::{run_helper, HelperError};
use crate::host::Host;

/// Filesystem written by mkfs.ext4, and so the type passed to mount.
pub const FSTYPE: &str = "ext4";

const MKFS_FLAGS: &[&str] = &[
    "-b",
    "4096",
    "-F",
    "-L",
    "TEMP",
    "-m",
    "0",
    "-O",
    "uninit_bg,sparse_super,^has_journal",
];

pub fn mkfs_args(device: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = MKFS_FLAGS.iter().map(OsString::from).collect();
    args.push(device.into());
    args
}

pub fn format_device<H: Host>(host: &H, config: &ZramConfig) -> Result<(), HelperError> {
    info!(device = %config.device.display(), "formatting zram device");
    run_helper(
        host,
        &config.mkfs,
        &mkfs_args(&config.device),
        config.strict_exit_status,
    )?;
    Ok(())
}
