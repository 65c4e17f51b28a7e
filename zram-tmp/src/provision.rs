// ABOUTME: The zram /tmp provisioning sequence.
// ABOUTME: modules -> device node -> size -> mkfs -> mount -> chmod, stopping at the first fatal step.

use tracing::{error, info, warn};

use crate::config::ZramConfig;
use crate::device::{ensure_device_node, write_disksize};
use crate::error::ProvisionError;
use crate::format::format_device;
use crate::host::Host;
use crate::meminfo::total_memory_kb;
use crate::modules::load_modules;
use crate::mount::{mount_device, open_permissions};
use crate::sizing::{disk_size_bytes, disk_size_kb};

/// Back the mount point with a freshly formatted zram device.
///
/// Meant to run once, early in boot. Nothing is rolled back when a step fails.
pub fn provision<H: Host>(host: &H, config: &ZramConfig) -> Result<(), ProvisionError> {
    if let Err((module, source)) = load_modules(host, config) {
        error!("failed to insmod zram support");
        return Err(ProvisionError::ModuleLoad { module, source });
    }

    // A bad node surfaces later as a mkfs or mount failure.
    if let Err(e) = ensure_device_node(host, &config.device, &config.dev_number_path()) {
        warn!(path = %config.device.display(), error = %e, "device node not created");
    }

    let mem_kb = total_memory_kb(&config.meminfo);
    let size_kb = disk_size_kb(mem_kb);
    info!(mem_kb, size_kb, "sized zram device");

    let disksize = config.disksize_path();
    write_disksize(&disksize, disk_size_bytes(size_kb)).map_err(|source| {
        error!(path = %disksize.display(), error = %source, "can't write disksize");
        ProvisionError::SizeControl {
            path: disksize.clone(),
            source,
        }
    })?;

    format_device(host, config).map_err(ProvisionError::Format)?;

    mount_device(host, config).map_err(|source| {
        error!(
            device = %config.device.display(),
            target = %config.mount_point.display(),
            error = %source,
            "can't mount zram device"
        );
        ProvisionError::Mount {
            device: config.device.clone(),
            target: config.mount_point.clone(),
            source,
        }
    })?;

    info!(
        "using up to {} kB of RAM as zram storage on {}",
        size_kb,
        config.mount_point.display()
    );

    open_permissions(&config.mount_point).map_err(|source| {
        error!(path = %config.mount_point.display(), error = %source, "can't set mode to 1777");
        ProvisionError::Permissions {
            path: config.mount_point.clone(),
            source,
        }
    })?;

    Ok(())
}
