// ABOUTME: Boundary between the provisioner and the operating system.
// ABOUTME: The Host trait covers uname, helper processes, mknod, and mount; System is the real one.

use rustix::fs::{FileType, Mode, CWD};
use rustix::mount::MountFlags;
use std::ffi::{CString, OsString};
use std::io;
use std::os::unix::fs::FileTypeExt;
use std::path::Path;
use std::process::{Command, ExitStatus};

pub trait Host {
    /// Release string of the running kernel, as `uname -r` prints it.
    fn kernel_release(&self) -> String;

    /// Run `program` with `args` and block until it exits.
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<ExitStatus>;

    fn make_block_node(&self, path: &Path, major: u32, minor: u32, mode: u32) -> io::Result<()>;

    fn is_block_device(&self, path: &Path) -> bool;

    fn mount(
        &self,
        source: &Path,
        target: &Path,
        fstype: &str,
        flags: MountFlags,
        data: &str,
    ) -> io::Result<()>;
}

/// The running system.
pub struct System;

impl Host for System {
    fn kernel_release(&self) -> String {
        rustix::system::uname()
            .release()
            .to_string_lossy()
            .into_owned()
    }

    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<ExitStatus> {
        Command::new(program).args(args).status()
    }

    fn make_block_node(&self, path: &Path, major: u32, minor: u32, mode: u32) -> io::Result<()> {
        rustix::fs::mknodat(
            CWD,
            path,
            FileType::BlockDevice,
            Mode::from_raw_mode(mode),
            rustix::fs::makedev(major, minor),
        )?;
        Ok(())
    }

    fn is_block_device(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_block_device())
    }

    fn mount(
        &self,
        source: &Path,
        target: &Path,
        fstype: &str,
        flags: MountFlags,
        data: &str,
    ) -> io::Result<()> {
        let fstype = CString::new(fstype)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let data = CString::new(data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        rustix::mount::mount(source, target, fstype.as_c_str(), flags, Some(data.as_c_str()))?;
        Ok(())
    }
}
