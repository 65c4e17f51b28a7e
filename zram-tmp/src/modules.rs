// ABOUTME: Kernel module loading for the zram /tmp setup.
// ABOUTME: Expands per-release module paths and hands each one to modprobe.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::ZramConfig;
use crate::helper::{run_helper, HelperError};
use crate::host::Host;

/// Placeholder replaced by the running kernel's release.
pub const RELEASE_PLACEHOLDER: &str = "{release}";

/// zram first, then the filesystem it gets formatted with.
pub const MODULE_TEMPLATES: [&str; 2] = [
    "/lib/modules/{release}/zram.ko",
    "/lib/modules/{release}/ext4.ko",
];

pub fn module_path(template: &str, release: &str) -> PathBuf {
    PathBuf::from(template.replace(RELEASE_PLACEHOLDER, release))
}

/// Load the module at `path` with modprobe.
pub fn load_module<H: Host>(host: &H, config: &ZramConfig, path: &Path) -> Result<(), HelperError> {
    info!(module = %path.display(), "loading kernel module");

    run_helper(
        host,
        &config.modprobe,
        &[OsString::from(path)],
        config.strict_exit_status,
    )?;
    Ok(())
}

/// Load zram and ext4 in order, stopping at the first failure.
pub fn load_modules<H: Host>(host: &H, config: &ZramConfig) -> Result<(), (PathBuf, HelperError)> {
    for template in MODULE_TEMPLATES {
        let path = module_path(template, &host.kernel_release());
        if let Err(e) = load_module(host, config, &path) {
            return Err((path, e));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;

    #[test]
    fn release_is_substituted() {
        assert_eq!(
            module_path("/lib/modules/{release}/zram.ko", "5.15.0-test"),
            Path::new("/lib/modules/5.15.0-test/zram.ko")
        );
    }

    #[test]
    fn loads_zram_then_ext4() {
        let paths: Vec<PathBuf> = MODULE_TEMPLATES
            .iter()
            .map(|t| module_path(t, "6.1.0"))
            .collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/lib/modules/6.1.0/zram.ko"),
                PathBuf::from("/lib/modules/6.1.0/ext4.ko"),
            ]
        );
    }

    #[test]
    fn template_without_placeholder_is_used_verbatim() {
        assert_eq!(module_path("zram", "5.15.0"), Path::new("zram"));
    }

    #[test]
    fn modprobe_gets_the_path_as_sole_argument() {
        let host = FakeHost::new();
        let config = ZramConfig::default();

        load_modules(&host, &config).unwrap();

        let runs = host.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].0, Path::new("/sbin/modprobe"));
        assert_eq!(runs[0].1, vec![OsString::from("/lib/modules/6.1.0-mos/zram.ko")]);
        assert_eq!(runs[1].1, vec![OsString::from("/lib/modules/6.1.0-mos/ext4.ko")]);
    }

    #[test]
    fn first_failure_stops_loading() {
        let mut host = FakeHost::new();
        host.spawn_errno = Some(2);
        let config = ZramConfig::default();

        let (module, err) = load_modules(&host, &config).unwrap_err();
        assert_eq!(module, Path::new("/lib/modules/6.1.0-mos/zram.ko"));
        assert!(matches!(err, HelperError::Spawn(_)));
        assert_eq!(host.runs().len(), 1);
    }

    #[test]
    fn strict_mode_stops_on_failed_modprobe() {
        let mut host = FakeHost::new();
        host.exit_code = 1;
        let config = ZramConfig {
            strict_exit_status: true,
            ..ZramConfig::default()
        };

        assert!(load_modules(&host, &config).is_err());
        assert_eq!(host.runs().len(), 1);
    }
}
