// ABOUTME: zram block device preparation: device node and sysfs disk size.
// ABOUTME: The node is created from the sysfs major:minor; the size goes to the disksize attribute.

use std::io::{self, Write};
use std::path::Path;
use tracing::info;

use crate::host::Host;

/// Owner read/write only.
pub const NODE_MODE: u32 = 0o600;

#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("can't read device number: {0}")]
    DevNumber(#[source] io::Error),

    #[error("can't create device node: {0}")]
    Create(#[source] io::Error),

    #[error("path exists but is not a block device")]
    WrongType,
}

/// Parse a sysfs `dev` attribute such as `253:0`.
pub fn parse_dev_number(content: &str) -> Option<(u32, u32)> {
    let (major, minor) = content.trim().split_once(':')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}

fn read_dev_number(path: &Path) -> io::Result<(u32, u32)> {
    let content = std::fs::read_to_string(path)?;
    parse_dev_number(&content).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("malformed device number {:?}", content.trim()),
        )
    })
}

/// Create the block special file at `node`. An existing block device there is fine.
pub fn ensure_device_node<H: Host>(
    host: &H,
    node: &Path,
    dev_number: &Path,
) -> Result<(), NodeError> {
    let (major, minor) = read_dev_number(dev_number).map_err(NodeError::DevNumber)?;

    match host.make_block_node(node, major, minor, NODE_MODE) {
        Ok(()) => {
            info!(path = %node.display(), major, minor, "created device node");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if host.is_block_device(node) {
                Ok(())
            } else {
                Err(NodeError::WrongType)
            }
        }
        Err(e) => Err(NodeError::Create(e)),
    }
}

/// Write the device size in bytes, as a bare decimal number, to the `disksize` attribute.
pub fn write_disksize(path: &Path, bytes: u64) -> io::Result<()> {
    let mut file = std::fs::OpenOptions::new().write(true).open(path)?;
    write!(file, "{bytes}")?;
    file.flush()
}
