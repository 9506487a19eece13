use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::Booking;

/// Read-side aggregation over the booking history. Pure fold over a ledger
/// snapshot; cancelled bookings only contribute to the cancellation rate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_bookings: u64,
    pub total_revenue: f64,
    pub unique_users: u64,
    pub average_booking_value: f64,
    pub cancellation_rate: f64,
    pub revenue_by_day: BTreeMap<String, f64>,
    pub movie_popularity: BTreeMap<u32, u64>,
    pub screen_type_popularity: BTreeMap<String, u64>,
}

pub fn report(bookings: &[Booking]) -> AnalyticsReport {
    let mut total_bookings = 0u64;
    let mut total_revenue = 0.0;
    let mut cancelled = 0u64;
    let mut users: BTreeSet<&str> = BTreeSet::new();
    let mut revenue_by_day: BTreeMap<String, f64> = BTreeMap::new();
    let mut movie_popularity: BTreeMap<u32, u64> = BTreeMap::new();
    let mut screen_type_popularity: BTreeMap<String, u64> = BTreeMap::new();

    for booking in bookings {
        if !booking.is_active() {
            cancelled += 1;
            continue;
        }
        total_bookings += 1;
        total_revenue += booking.total_price;
        users.insert(&booking.user_id);
        *revenue_by_day
            .entry(booking.booking_date.to_string())
            .or_default() += booking.total_price;
        *movie_popularity.entry(booking.movie_id).or_default() += 1;
        *screen_type_popularity
            .entry(booking.screen_type.clone())
            .or_default() += 1;
    }

    let average_booking_value = if total_bookings > 0 {
        total_revenue / total_bookings as f64
    } else {
        0.0
    };
    let cancellation_rate = if total_bookings + cancelled > 0 {
        cancelled as f64 / (total_bookings + cancelled) as f64
    } else {
        0.0
    };

    AnalyticsReport {
        total_bookings,
        total_revenue,
        unique_users: users.len() as u64,
        average_booking_value,
        cancellation_rate,
        revenue_by_day,
        movie_popularity,
        screen_type_popularity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingStatus;
    use chrono::NaiveDate;

    fn booking(user: &str, movie: u32, price: f64, status: BookingStatus) -> Booking {
        Booking {
            id: format!("b-{user}-{movie}-{price}"),
            user_id: user.to_string(),
            movie_id: movie,
            movie_title: String::new(),
            movie_poster: String::new(),
            showtime_id: "s1".to_string(),
            showtime_date: "2026-09-01".to_string(),
            showtime_time: "19:30".to_string(),
            cinema_id: 1,
            cinema_name: String::new(),
            screen_type: "IMAX".to_string(),
            seats: ["A1".to_string()].into_iter().collect(),
            total_price: price,
            booking_date: NaiveDate::from_ymd_opt(2026, 8, 27).unwrap(),
            status,
        }
    }

    #[test]
    fn empty_history_reports_zeroes() {
        let report = report(&[]);
        assert_eq!(report.total_bookings, 0);
        assert_eq!(report.average_booking_value, 0.0);
        assert_eq!(report.cancellation_rate, 0.0);
    }

    #[test]
    fn cancelled_bookings_only_affect_the_cancellation_rate() {
        let history = vec![
            booking("u1", 1, 20.0, BookingStatus::Active),
            booking("u1", 2, 10.0, BookingStatus::Active),
            booking("u2", 1, 30.0, BookingStatus::Cancelled),
        ];
        let report = report(&history);
        assert_eq!(report.total_bookings, 2);
        assert_eq!(report.total_revenue, 30.0);
        assert_eq!(report.unique_users, 1);
        assert_eq!(report.average_booking_value, 15.0);
        assert!((report.cancellation_rate - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.movie_popularity.get(&1), Some(&1));
        assert_eq!(report.revenue_by_day.get("2026-08-27"), Some(&30.0));
    }
}
