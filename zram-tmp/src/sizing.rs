// ABOUTME: zram disk sizing policy.
// ABOUTME: Maps total RAM to the amount handed to the compressed /tmp device.

/// `x` in units of 1024.
pub const fn kb(x: u64) -> u64 {
    x * 1024
}

/// Above this (in kB) a third of RAM goes to zram.
pub const LARGE_MEM_KB: u64 = 57 * 1000 * 1000;
/// Above this (in kB), up to LARGE_MEM_KB, zram gets a fixed size.
pub const MEDIUM_MEM_KB: u64 = 28 * 1000 * 1000;
pub const MEDIUM_DISK_KB: u64 = kb(16);

// Thresholds sit a little below 64G/32G to match what real devices report.
pub fn disk_size_kb(mem_total_kb: u64) -> u64 {
    if mem_total_kb > LARGE_MEM_KB {
        mem_total_kb / 3
    } else if mem_total_kb > MEDIUM_MEM_KB {
        MEDIUM_DISK_KB
    } else {
        mem_total_kb / 2
    }
}

/// Value written to the sysfs `disksize` attribute.
pub fn disk_size_bytes(size_kb: u64) -> u64 {
    size_kb.saturating_mul(1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_devices_get_half() {
        assert_eq!(disk_size_kb(3_881_236), 1_940_618);
        assert_eq!(disk_size_kb(0), 0);
    }

    #[test]
    fn medium_boundary() {
        assert_eq!(disk_size_kb(27_999_999), 13_999_999);
        assert_eq!(disk_size_kb(28_000_000), 14_000_000);
        assert_eq!(disk_size_kb(28_000_001), 16_384);
    }

    #[test]
    fn large_boundary() {
        assert_eq!(disk_size_kb(56_999_999), 16_384);
        assert_eq!(disk_size_kb(57_000_000), 16_384);
        assert_eq!(disk_size_kb(57_000_001), 19_000_000);
    }

    #[test]
    fn large_devices_get_a_third() {
        assert_eq!(disk_size_kb(66_000_000), 22_000_000);
    }

    #[test]
    fn bytes_are_kb_times_1024() {
        assert_eq!(disk_size_bytes(16_384), 16_777_216);
        assert_eq!(disk_size_bytes(u64::MAX), u64::MAX);
    }
}
