//! Time window overlap tests.

use crate::models::TimeWindow;

/// Tests two half-open `[start, end)` minute intervals for overlap.
///
/// Both intervals must be on the same minute axis; this function does not
/// interpret end-before-start as crossing midnight. Empty intervals never
/// overlap anything, and touching intervals (one ends as the other starts)
/// do not overlap.
///
/// # Example
///
/// ```
/// use av_labor_engine::scheduling::time_windows_overlap;
///
/// assert!(time_windows_overlap(540, 780, 720, 900));  // 09:00-13:00 vs 12:00-15:00
/// assert!(!time_windows_overlap(540, 780, 780, 900)); // back to back
/// ```
pub fn time_windows_overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < a_end && b_start < b_end && a_start < b_end && b_start < a_end
}

/// Tests two assignment windows on the same date for overlap.
///
/// Overnight windows extend past midnight of their date. Windows on
/// different dates are never compared, so an overnight shift does not
/// conflict with work on the following date.
pub fn windows_overlap(a: &TimeWindow, b: &TimeWindow) -> bool {
    if a.date != b.date {
        return false;
    }
    let (a_start, a_end) = a.span_minutes();
    let (b_start, b_end) = b.span_minutes();
    time_windows_overlap(a_start, a_end, b_start, b_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(date: &str, start: &str, end: &str) -> TimeWindow {
        TimeWindow::parse(date, start, end).unwrap()
    }

    #[test]
    fn test_partial_overlap() {
        assert!(time_windows_overlap(540, 780, 720, 900));
        assert!(time_windows_overlap(720, 900, 540, 780));
    }

    #[test]
    fn test_containment() {
        assert!(time_windows_overlap(480, 1080, 600, 660));
    }

    #[test]
    fn test_touching_does_not_overlap() {
        assert!(!time_windows_overlap(540, 780, 780, 900));
        assert!(!time_windows_overlap(780, 900, 540, 780));
    }

    #[test]
    fn test_empty_interval_never_overlaps() {
        assert!(!time_windows_overlap(600, 600, 540, 780));
        assert!(!time_windows_overlap(540, 780, 600, 600));
    }

    #[test]
    fn test_overnight_windows_same_date() {
        let late = window("2025-06-01", "22:00", "02:00");
        let later = window("2025-06-01", "23:30", "01:00");
        assert!(windows_overlap(&late, &later));
    }

    #[test]
    fn test_overnight_vs_evening_same_date() {
        let evening = window("2025-06-01", "18:00", "22:30");
        let overnight = window("2025-06-01", "22:00", "04:00");
        assert!(windows_overlap(&evening, &overnight));
    }

    #[test]
    fn test_different_dates_never_overlap() {
        let overnight = window("2025-06-01", "22:00", "06:00");
        let next_morning = window("2025-06-02", "05:00", "09:00");
        assert!(!windows_overlap(&overnight, &next_morning));
    }
}
