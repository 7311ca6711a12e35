//! Clock-face formatting for the display layer

/// Format seconds as "MM:SS", or "H:MM:SS" from one hour on
pub fn format_clock(total_secs: u64) -> String {
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(1_500), "25:00");
        assert_eq!(format_clock(3_661), "1:01:01");
        assert_eq!(format_clock(36_000), "10:00:00");
    }
}
