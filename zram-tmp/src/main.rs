// ABOUTME: MobileOS early-boot step that puts /tmp on a compressed RAM block device.
// ABOUTME: Loads zram and ext4, sizes and formats /dev/zram0, then mounts it on /tmp.

mod config;
mod device;
mod error;
mod format;
mod helper;
mod host;
mod logging;
mod meminfo;
mod modules;
mod mount;
mod provision;
mod sizing;

use std::path::Path;
use tracing::{error, info};

use crate::host::System;

fn main() {
    logging::init();

    let config = match config::load_config(Path::new(config::DEFAULT_CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            error!(error = ?e, "failed to load config");
            std::process::exit(1);
        }
    };

    info!(
        device = %config.device.display(),
        target = %config.mount_point.display(),
        "setting up zram /tmp"
    );

    if let Err(e) = provision::provision(&System, &config) {
        error!(error = %e, status = e.status(), "zram /tmp setup failed");
        std::process::exit(e.status());
    }
}
