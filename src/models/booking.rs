use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

use crate::models::showtime::default_screen_type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Active,
    Cancelled,
}

// A booking is never deleted; cancellation is a status change that keeps
// the record around for audit and potential restoration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub movie_id: u32,
    #[serde(default)]
    pub movie_title: String,
    #[serde(default)]
    pub movie_poster: String,
    pub showtime_id: String,
    #[serde(default)]
    pub showtime_date: String,
    #[serde(default)]
    pub showtime_time: String,
    #[serde(default)]
    pub cinema_id: u32,
    #[serde(default)]
    pub cinema_name: String,
    #[serde(default = "default_screen_type")]
    pub screen_type: String,
    pub seats: BTreeSet<String>,
    pub total_price: f64,
    pub booking_date: NaiveDate,
    // The wire/snapshot shape keeps the historical `cancelled` flag.
    #[serde(
        rename = "cancelled",
        serialize_with = "status_as_cancelled",
        deserialize_with = "status_from_cancelled",
        default = "active"
    )]
    pub status: BookingStatus,
}

fn active() -> BookingStatus {
    BookingStatus::Active
}

fn status_as_cancelled<S: Serializer>(status: &BookingStatus, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_bool(*status == BookingStatus::Cancelled)
}

fn status_from_cancelled<'de, D: Deserializer<'de>>(de: D) -> Result<BookingStatus, D::Error> {
    let cancelled = bool::deserialize(de)?;
    Ok(if cancelled {
        BookingStatus::Cancelled
    } else {
        BookingStatus::Active
    })
}

impl Booking {
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct NewBooking {
    #[validate(required(message = "userId is required"), length(min = 1, message = "userId is required"))]
    pub user_id: Option<String>,
    #[validate(required(message = "movieId is required"))]
    pub movie_id: Option<u32>,
    #[validate(required(message = "showtimeId is required"), length(min = 1, message = "showtimeId is required"))]
    pub showtime_id: Option<String>,
    #[validate(required(message = "seats are required"), length(min = 1, message = "at least one seat is required"))]
    pub seats: Option<Vec<String>>,
    #[validate(required(message = "totalPrice is required"))]
    pub total_price: Option<f64>,
    // Display fallbacks used when the catalog cannot resolve the movie.
    pub movie_title: Option<String>,
    pub movie_poster: Option<String>,
}
