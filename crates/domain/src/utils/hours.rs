//! 12-hour rendering for event summaries

use chrono::{NaiveTime, Timelike};

/// Render an hour as `9am`, `12pm`, `12am`, `5pm`. Minutes are not shown.
pub fn format_hour_12(hour: u32) -> String {
    match hour {
        0 => "12am".to_string(),
        12 => "12pm".to_string(),
        13..=23 => format!("{}pm", hour - 12),
        _ => format!("{hour}am"),
    }
}

/// `9am-5pm` for a window from 09:00 to 17:00.
pub fn format_range_12(start: NaiveTime, end: NaiveTime) -> String {
    format!("{}-{}", format_hour_12(start.hour()), format_hour_12(end.hour()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_boundaries() {
        assert_eq!(format_hour_12(0), "12am");
        assert_eq!(format_hour_12(9), "9am");
        assert_eq!(format_hour_12(11), "11am");
        assert_eq!(format_hour_12(12), "12pm");
        assert_eq!(format_hour_12(13), "1pm");
        assert_eq!(format_hour_12(23), "11pm");
    }

    #[test]
    fn range_uses_both_boundaries() {
        let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        assert_eq!(format_range_12(t(9), t(17)), "9am-5pm");
        assert_eq!(format_range_12(t(0), t(12)), "12am-12pm");
    }
}
