//! Report rendering for finalized pattern statistics.
//!
//! Purely a projection of the aggregator's output: sorts patterns by
//! total size and lays them out as fixed-width text. Has no failure
//! mode beyond the arguments it is given.

use crate::stats::PatternSummary;

/// Width of the pattern column.
const PATTERN_WIDTH: usize = 40;
/// Width of the count column.
const COUNT_WIDTH: usize = 10;
/// Width of each size column.
const SIZE_WIDTH: usize = 15;
/// Width of the separator rules.
const RULE_WIDTH: usize = 100;

/// Formats a byte count on the binary magnitude scale with two decimals.
///
/// Divides by 1024 through B, KB, MB, and GB, stopping at the first
/// unit where the magnitude drops below 1024; anything larger falls
/// through to TB.
///
/// # Examples
///
/// ```rust
/// use keyscope::report::format_size;
///
/// assert_eq!(format_size(512), "512.00 B");
/// assert_eq!(format_size(2048), "2.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
#[allow(clippy::cast_precision_loss)] // Byte counts are display-only
pub fn format_size(bytes: u64) -> String {
    let mut magnitude = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if magnitude < 1024.0 {
            return format!("{magnitude:.2} {unit}");
        }
        magnitude /= 1024.0;
    }
    format!("{magnitude:.2} TB")
}

/// Renders the analysis table as an ordered sequence of lines.
///
/// Patterns are sorted by total size, largest first; the sort is stable,
/// so entries with equal totals keep their input order (first-observation
/// order when the input comes from
/// [`Aggregator::finalize`](crate::stats::Aggregator::finalize)).
pub fn render(summaries: &[PatternSummary]) -> Vec<String> {
    let mut ordered: Vec<&PatternSummary> = summaries.iter().collect();
    ordered.sort_by(|a, b| b.total_size.cmp(&a.total_size));

    let mut lines = Vec::with_capacity(ordered.len() + 4);
    lines.push("Redis Key Pattern Analysis".to_string());
    lines.push("-".repeat(RULE_WIDTH));
    lines.push(format!(
        "{:<PATTERN_WIDTH$} {:<COUNT_WIDTH$} {:<SIZE_WIDTH$} {:<SIZE_WIDTH$} {:<SIZE_WIDTH$} {:<SIZE_WIDTH$}",
        "Pattern", "Count", "Total Size", "Avg Size", "Min Size", "Max Size",
    ));
    lines.push("-".repeat(RULE_WIDTH));

    for summary in ordered {
        lines.push(format!(
            "{:<PATTERN_WIDTH$} {:<COUNT_WIDTH$} {:<SIZE_WIDTH$} {:<SIZE_WIDTH$} {:<SIZE_WIDTH$} {:<SIZE_WIDTH$}",
            summary.pattern,
            summary.count,
            format_size(summary.total_size),
            format_size(summary.avg_size),
            format_size(summary.min_size),
            format_size(summary.max_size),
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(pattern: &str, count: u64, total: u64, min: u64, max: u64) -> PatternSummary {
        PatternSummary {
            pattern: pattern.to_string(),
            count,
            total_size: total,
            avg_size: total / count,
            min_size: min,
            max_size: max,
        }
    }

    #[test]
    fn test_format_size_unit_boundaries() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(1023), "1023.00 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(1024 * 1024 * 1024), "1.00 GB");
    }

    #[test]
    fn test_format_size_falls_through_to_tb() {
        assert_eq!(format_size(1024_u64.pow(4)), "1.00 TB");
        // Never advances past TB, no matter how large.
        assert_eq!(format_size(1024_u64.pow(5)), "1024.00 TB");
    }

    #[test]
    fn test_render_sorts_by_total_size_descending() {
        let summaries = vec![
            summary("small:#", 1, 50, 50, 50),
            summary("large:#", 2, 250, 100, 150),
        ];

        let lines = render(&summaries);
        // Title, rule, header, rule, then data rows.
        assert_eq!(lines.len(), 6);
        assert!(lines[4].starts_with("large:#"));
        assert!(lines[5].starts_with("small:#"));
    }

    #[test]
    fn test_render_stable_on_equal_totals() {
        let summaries = vec![
            summary("first:#", 1, 100, 100, 100),
            summary("second:#", 1, 100, 100, 100),
        ];

        let lines = render(&summaries);
        assert!(lines[4].starts_with("first:#"));
        assert!(lines[5].starts_with("second:#"));
    }

    #[test]
    fn test_render_row_contains_formatted_sizes() {
        let summaries = vec![summary("user:#", 2, 250, 100, 150)];

        let lines = render(&summaries);
        let row = &lines[4];
        assert!(row.contains("user:#"));
        assert!(row.contains("250.00 B"));
        assert!(row.contains("125.00 B"));
        assert!(row.contains("100.00 B"));
        assert!(row.contains("150.00 B"));
    }

    #[test]
    fn test_render_empty_table_is_header_only() {
        let lines = render(&[]);
        assert_eq!(lines.len(), 4);
    }
}
