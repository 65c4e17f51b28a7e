// ABOUTME: Synchronous execution of external boot helpers (modprobe, mkfs).
// ABOUTME: Separates "could not start" from "ran and failed"; the latter is only fatal in strict mode.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::ExitStatus;
use tracing::{debug, error, warn};

use crate::host::Host;

#[derive(Debug, thiserror::Error)]
pub enum HelperError {
    #[error("could not start helper: {0}")]
    Spawn(#[source] io::Error),

    #[error("helper failed: {0}")]
    Exited(ExitStatus),
}

/// Run a helper to completion. Without `strict`, a non-zero exit is logged and
/// otherwise ignored, so only a failure to start the helper is an error.
pub fn run_helper<H: Host>(
    host: &H,
    program: &Path,
    args: &[OsString],
    strict: bool,
) -> Result<ExitStatus, HelperError> {
    debug!(program = %program.display(), args = ?args, "running helper");

    let status = host.run(program, args).map_err(|e| {
        error!(program = %program.display(), error = %e, "can't exec helper");
        HelperError::Spawn(e)
    })?;

    if !status.success() {
        if strict {
            error!(program = %program.display(), status = %status, "helper failed");
            return Err(HelperError::Exited(status));
        }
        warn!(program = %program.display(), status = %status, "helper failed, continuing");
    }

    Ok(status)
}
