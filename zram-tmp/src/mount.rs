// ABOUTME: Mounts the formatted zram device on /tmp.
// ABOUTME: Applies the fixed mount flags and options, then opens the mount point up as sticky 1777.

use rustix::fs::Mode;
use rustix::mount::MountFlags;
use std::io;
use std::path::Path;
use tracing::info;

use crate::config::ZramConfig;
use crate::format::FSTYPE;
use crate::host::Host;

pub const MOUNT_FLAGS: MountFlags = MountFlags::NOSUID
    .union(MountFlags::NODEV)
    .union(MountFlags::NOATIME);
pub const MOUNT_DATA: &str = "errors=continue,nobarrier";

/// rwxrwxrwt
pub const TMP_MODE: u32 = 0o1777;

pub fn mount_device<H: Host>(host: &H, config: &ZramConfig) -> io::Result<()> {
    host.mount(
        &config.device,
        &config.mount_point,
        FSTYPE,
        MOUNT_FLAGS,
        MOUNT_DATA,
    )?;
    info!(
        source = %config.device.display(),
        target = %config.mount_point.display(),
        fstype = FSTYPE,
        "mounted"
    );
    Ok(())
}

pub fn open_permissions(path: &Path) -> io::Result<()> {
    rustix::fs::chmod(path, Mode::from_raw_mode(TMP_MODE))?;
    Ok(())
}
