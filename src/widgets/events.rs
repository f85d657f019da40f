//! Ordering and status of community events.

use chrono::{NaiveDate, NaiveDateTime};

use crate::content::schema::EventItem;

/// Events sorted newest first. Equal dates keep their source order.
pub fn sorted_events(items: &[EventItem]) -> Vec<&EventItem> {
    let mut sorted: Vec<&EventItem> = items.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// An event is finished once it starts strictly before today's midnight.
pub fn is_finished(at: NaiveDateTime, today: NaiveDate) -> bool {
    at < today.and_time(chrono::NaiveTime::MIN)
}

/// Display date such as `August 15`.
pub fn format_event_date(at: NaiveDateTime) -> String {
    at.format("%B %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(title: &str, date: &str) -> EventItem {
        EventItem {
            title: title.to_string(),
            date: date.parse().unwrap(),
            time: String::new(),
        }
    }

    #[test]
    fn test_sorted_newest_first_and_stable() {
        let items = vec![
            event("A", "2024-01-10"),
            event("B", "2024-03-01"),
            event("C", "2024-01-10"),
            event("D", "2023-12-31"),
        ];
        let titles: Vec<_> = sorted_events(&items).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["B", "A", "C", "D"]);
    }

    #[test]
    fn test_finished_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
        let yesterday_late = "2024-08-14T23:59:59".parse::<crate::content::schema::EventDate>().unwrap();
        let today_midnight = "2024-08-15".parse::<crate::content::schema::EventDate>().unwrap();

        assert!(is_finished(yesterday_late.at(), today));
        assert!(!is_finished(today_midnight.at(), today));
    }

    #[test]
    fn test_format_event_date() {
        let date = "2024-08-05".parse::<crate::content::schema::EventDate>().unwrap();
        assert_eq!(format_event_date(date.at()), "August 5");
    }
}
