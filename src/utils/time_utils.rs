use chrono::{DateTime, Local, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const S_IN_MIN: i64 = 60;
    pub const S_IN_H: i64 = Self::S_IN_MIN * 60;
    pub const S_IN_D: i64 = Self::S_IN_H * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    // const STANDARD_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";
}

/// Local wall-clock rendering of an observation time. Used for display only.
pub fn format_recorded_at(recorded_at: &DateTime<Utc>) -> String {
    recorded_at
        .with_timezone(&Local)
        .format(TimeUtils::STANDARD_TIME_FORMAT)
        .to_string()
}

pub fn how_many_seconds_ago(past: &DateTime<Utc>, now: &DateTime<Utc>) -> i64 {
    (*now - *past).num_seconds()
}

/// Coarse "time ago" label, e.g. `just now`, `4m ago`, `2h ago`, `3d ago`.
pub fn age_label(seconds_ago: i64) -> String {
    match seconds_ago {
        s if s < TimeUtils::S_IN_MIN => "just now".to_string(),
        s if s < TimeUtils::S_IN_H => format!("{}m ago", s / TimeUtils::S_IN_MIN),
        s if s < TimeUtils::S_IN_D => format!("{}h ago", s / TimeUtils::S_IN_H),
        s => format!("{}d ago", s / TimeUtils::S_IN_D),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn age_labels() {
        assert_eq!(age_label(-5), "just now");
        assert_eq!(age_label(59), "just now");
        assert_eq!(age_label(60 * 4 + 10), "4m ago");
        assert_eq!(age_label(3600 * 2), "2h ago");
        assert_eq!(age_label(86_400 * 3 + 5), "3d ago");
    }

    #[test]
    fn seconds_between_observations() {
        let now = Utc::now();
        assert_eq!(how_many_seconds_ago(&(now - Duration::seconds(90)), &now), 90);
    }
}
