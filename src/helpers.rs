use std::time::Duration;

pub trait Capitalize {
    fn capitalize(&self) -> String;
}

impl Capitalize for str {
    fn capitalize(&self) -> String {
        let mut chars = self.chars();
        match chars.next() {
            Some(first) => {
                first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            }
            None => String::new(),
        }
    }
}

/// `"1m 23s"`, `"45s"`, or `"N/A"` when there is no time.
pub fn format_time(ms: Option<u64>) -> String {
    let Some(ms) = ms else {
        return "N/A".to_string();
    };
    let total_secs = Duration::from_millis(ms).as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;

    if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Averages and medians can land between milliseconds.
pub fn format_time_f64(ms: Option<f64>) -> String {
    format_time(ms.map(|ms| ms.round().max(0.0) as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(Some(45_000)), "45s");
        assert_eq!(format_time(Some(83_000)), "1m 23s");
        assert_eq!(format_time(Some(120_000)), "2m 0s");
        assert_eq!(format_time(Some(999)), "0s");
        assert_eq!(format_time(None), "N/A");
    }

    #[test]
    fn test_format_time_f64() {
        assert_eq!(format_time_f64(Some(59_999.6)), "1m 0s");
        assert_eq!(format_time_f64(None), "N/A");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!("daily".capitalize(), "Daily");
        assert_eq!("SOLUTIONHUNT".capitalize(), "Solutionhunt");
        assert_eq!("".capitalize(), "");
    }
}
