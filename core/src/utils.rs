use chrono::{DateTime, NaiveDateTime};

const DISPLAY_ID_LEN: usize = 5;

/// Short id shown in the table: the last five characters of the record id.
pub fn display_id(id: &str) -> String {
    let count = id.chars().count();
    id.chars().skip(count.saturating_sub(DISPLAY_ID_LEN)).collect()
}

// The backend emits both offset-aware RFC 3339 and naive ISO timestamps
pub fn format_created_at(raw: &str) -> String {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return datetime.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return datetime.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

pub fn format_timestamp(seconds: f64) -> String {
    let seconds = seconds.max(0.0) as u32;
    let minutes = seconds / 60;
    let remaining_seconds = seconds % 60;
    format!("{:02}:{:02}", minutes, remaining_seconds)
}

pub fn format_interval((start, end): (f64, f64)) -> String {
    format!("{} - {}", format_timestamp(start), format_timestamp(end))
}

pub fn format_score(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_id_keeps_last_five_chars() {
        assert_eq!(display_id("abc123"), "bc123");
        assert_eq!(display_id("6650f1c2e4b0a1d2c3f4e5d6"), "4e5d6");
        assert_eq!(display_id("ab"), "ab");
        assert_eq!(display_id(""), "");
    }

    #[test]
    fn created_at_accepts_both_timestamp_shapes() {
        assert_eq!(format_created_at("2025-06-01T14:03:27.512000"), "2025-06-01 14:03");
        assert_eq!(format_created_at("2025-06-01T14:03:27Z"), "2025-06-01 14:03");
        assert_eq!(format_created_at("2025-06-01T14:03:27+02:00"), "2025-06-01 14:03");
        assert_eq!(format_created_at("yesterday"), "yesterday");
    }

    #[test]
    fn timestamps_and_scores() {
        assert_eq!(format_timestamp(34.36), "00:34");
        assert_eq!(format_timestamp(125.0), "02:05");
        assert_eq!(format_interval((34.36, 37.8)), "00:34 - 00:37");
        assert_eq!(format_score(0.94203), "94.2%");
    }
}
