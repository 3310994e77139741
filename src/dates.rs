use chrono::{Duration, Local, NaiveDate};

#[derive(Debug, Clone, Copy)]
pub struct RunWindow {
    since: NaiveDate,
    until: NaiveDate,
}

impl RunWindow {
    pub fn new(since: NaiveDate, until: NaiveDate) -> Self {
        if since > until {
            log::warn!("window starts after it ends ({since} > {until}); forwarding it unchanged");
        }
        Self { since, until }
    }

    pub fn since_param(&self) -> String {
        self.since.format("%Y-%m-%d").to_string()
    }

    pub fn until_param(&self) -> String {
        self.until.format("%Y-%m-%d").to_string()
    }
}

pub fn parse_day(value: &str) -> Result<NaiveDate, String> {
    match value {
        "today" => Ok(Local::now().date_naive()),
        "yesterday" => Ok(Local::now().date_naive() - Duration::days(1)),
        _ => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| "Invalid date. Use YYYY-MM-DD, 'today' or 'yesterday'.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn parse_day_valid() {
        let date = parse_day("2026-02-03").unwrap();
        assert_eq!(date.year(), 2026);
        assert_eq!(date.month(), 2);
        assert_eq!(date.day(), 3);
    }

    #[test]
    fn parse_day_invalid() {
        assert!(parse_day("02-03-2026").is_err());
        assert!(parse_day("last friday").is_err());
    }

    #[test]
    fn parse_day_keywords() {
        let today = parse_day("today").unwrap();
        let yesterday = parse_day("yesterday").unwrap();
        assert_eq!(today - yesterday, Duration::days(1));
    }

    #[test]
    fn window_params_use_iso_dates() {
        let since = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let until = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let window = RunWindow::new(since, until);
        assert_eq!(window.since_param(), "2026-01-01");
        assert_eq!(window.until_param(), "2026-01-10");
    }

    #[test]
    fn reversed_window_is_kept_as_given() {
        let since = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let until = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let window = RunWindow::new(since, until);
        assert_eq!(window.since_param(), "2026-01-10");
        assert_eq!(window.until_param(), "2026-01-01");
    }
}
