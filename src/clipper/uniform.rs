//! Equal-length windows for uniform splitting.

use crate::constants::{naming, split::BYTES_PER_MB};

/// One of the equal windows of a uniformly split video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformPart {
    /// 1-based part number.
    pub number: u32,
    /// Window start in seconds.
    pub start_seconds: f64,
    /// Window end in seconds.
    pub end_seconds: f64,
}

/// Split `duration_seconds` into `parts` equal, back-to-back windows.
///
/// Returns nothing for zero parts or a non-positive duration.
#[must_use]
pub fn plan_uniform_parts(duration_seconds: f64, parts: u32) -> Vec<UniformPart> {
    if parts == 0 || duration_seconds <= 0.0 || !duration_seconds.is_finite() {
        return Vec::new();
    }

    let part_duration = duration_seconds / f64::from(parts);
    (0..parts)
        .map(|i| {
            let start_seconds = f64::from(i) * part_duration;
            UniformPart {
                number: i + 1,
                start_seconds,
                end_seconds: start_seconds + part_duration,
            }
        })
        .collect()
}

/// File name of a uniformly split part.
///
/// Format: `{stem} - part {number}.mp4`.
#[must_use]
pub fn part_file_name(video_stem: &str, number: u32) -> String {
    format!(
        "{video_stem}{}{number}.{}",
        naming::PART_INFIX,
        naming::OUTPUT_EXTENSION
    )
}

/// Result of comparing a file size with the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeCheck {
    /// Within bounds (inclusive).
    Within,
    /// Smaller than the minimum.
    TooSmall,
    /// Larger than the maximum.
    TooLarge,
}

/// Compare `bytes` with `[min_mb, max_mb]` megabytes.
#[must_use]
pub fn check_size(bytes: u64, min_mb: u64, max_mb: u64) -> SizeCheck {
    if bytes < min_mb.saturating_mul(BYTES_PER_MB) {
        SizeCheck::TooSmall
    } else if bytes > max_mb.saturating_mul(BYTES_PER_MB) {
        SizeCheck::TooLarge
    } else {
        SizeCheck::Within
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_four_parts() {
        let parts = plan_uniform_parts(100.0, 4);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].number, 1);
        assert_eq!(parts[0].start_seconds, 0.0);
        assert_eq!(parts[1].start_seconds, 25.0);
        assert_eq!(parts[3].end_seconds, 100.0);
    }

    #[test]
    fn test_parts_are_contiguous() {
        let parts = plan_uniform_parts(61.0, 3);
        for pair in parts.windows(2) {
            assert_eq!(pair[0].end_seconds, pair[1].start_seconds);
        }
    }

    #[test]
    fn test_plan_degenerate_inputs() {
        assert!(plan_uniform_parts(100.0, 0).is_empty());
        assert!(plan_uniform_parts(0.0, 4).is_empty());
        assert!(plan_uniform_parts(f64::NAN, 4).is_empty());
    }

    #[test]
    fn test_part_file_name() {
        assert_eq!(part_file_name("lecture", 2), "lecture - part 2.mp4");
    }

    #[test]
    fn test_check_size_bounds_inclusive() {
        let mb = BYTES_PER_MB;
        assert_eq!(check_size(100 * mb, 100, 2000), SizeCheck::Within);
        assert_eq!(check_size(2000 * mb, 100, 2000), SizeCheck::Within);
        assert_eq!(check_size(100 * mb - 1, 100, 2000), SizeCheck::TooSmall);
        assert_eq!(check_size(2000 * mb + 1, 100, 2000), SizeCheck::TooLarge);
    }
}
