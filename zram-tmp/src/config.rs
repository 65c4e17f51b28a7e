// ABOUTME: Configuration for the zram /tmp provisioner.
// ABOUTME: Reads an optional TOML file that can relocate paths; every field defaults to the stock layout.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/mos/zram-tmp.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZramConfig {
    pub modprobe: PathBuf,
    pub device: PathBuf,
    /// sysfs directory of the device, holding `dev` and `disksize`.
    pub sysfs_dir: PathBuf,
    pub meminfo: PathBuf,
    pub mkfs: PathBuf,
    pub mount_point: PathBuf,
    /// Treat a helper's non-zero exit as fatal instead of only logging it.
    pub strict_exit_status: bool,
}

impl Default for ZramConfig {
    fn default() -> Self {
        Self {
            modprobe: PathBuf::from("/sbin/modprobe"),
            device: PathBuf::from("/dev/zram0"),
            sysfs_dir: PathBuf::from("/sys/block/zram0"),
            meminfo: PathBuf::from("/proc/meminfo"),
            mkfs: PathBuf::from("/usr/sbin/mkfs.ext4"),
            mount_point: PathBuf::from("/tmp"),
            strict_exit_status: false,
        }
    }
}

impl ZramConfig {
    pub fn disksize_path(&self) -> PathBuf {
        self.sysfs_dir.join("disksize")
    }

    pub fn dev_number_path(&self) -> PathBuf {
        self.sysfs_dir.join("dev")
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    zram: ZramConfig,
}

pub fn parse_config(toml_str: &str) -> Result<ZramConfig> {
    let file: ConfigFile = toml::from_str(toml_str).context("failed to parse zram config")?;
    Ok(file.zram)
}

/// Load the config at `path`, falling back to defaults when the file does not exist.
pub fn load_config(path: &Path) -> Result<ZramConfig> {
    if !path.exists() {
        return Ok(ZramConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("failed to parse {}", path.display()))
}
