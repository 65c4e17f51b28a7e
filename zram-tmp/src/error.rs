// ABOUTME: Error type for the zram /tmp provisioning sequence.
// ABOUTME: Keeps the failing step and the OS errno so the boot sequence gets a single status.

use std::io;
use std::path::PathBuf;

use crate::helper::HelperError;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("failed to load {}: {source}", module.display())]
    ModuleLoad {
        module: PathBuf,
        #[source]
        source: HelperError,
    },

    #[error("can't write {}: {source}", path.display())]
    SizeControl {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to format zram device: {0}")]
    Format(#[source] HelperError),

    #[error("can't mount {} on {}: {source}", device.display(), target.display())]
    Mount {
        device: PathBuf,
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("can't set {} mode to 1777: {source}", path.display())]
    Permissions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProvisionError {
    /// errno of the underlying OS failure, for steps that fail inside a syscall.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            ProvisionError::SizeControl { source, .. }
            | ProvisionError::Mount { source, .. }
            | ProvisionError::Permissions { source, .. } => source.raw_os_error(),
            ProvisionError::ModuleLoad { .. } | ProvisionError::Format(_) => None,
        }
    }

    /// Status handed back to the boot sequence: the errno where there is one, -1 otherwise.
    pub fn status(&self) -> i32 {
        self.raw_os_error().unwrap_or(-1)
    }
}
