use serde::{Deserialize, Serialize};
use validator::Validate;

// A scheduled screening of one movie at one cinema. Immutable once created;
// there is no reschedule operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Showtime {
    pub id: String,
    pub movie_id: u32,
    pub cinema_id: u32,
    // Denormalized for display; empty when the cinema was not resolvable
    // at creation time.
    #[serde(default)]
    pub cinema_name: String,
    pub date: String,
    pub time: String,
    #[serde(default = "default_screen_type")]
    pub screen_type: String,
    pub price: f64,
}

pub fn default_screen_type() -> String {
    "Standard".to_string()
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct NewShowtime {
    // Caller-supplied id; a fresh UUID is generated when absent.
    pub id: Option<String>,
    #[validate(required(message = "movieId is required"))]
    pub movie_id: Option<u32>,
    #[validate(required(message = "cinemaId is required"))]
    pub cinema_id: Option<u32>,
    #[validate(required(message = "date is required"), length(min = 1, message = "date is required"))]
    pub date: Option<String>,
    #[validate(required(message = "time is required"), length(min = 1, message = "time is required"))]
    pub time: Option<String>,
    pub screen_type: Option<String>,
    #[validate(required(message = "price is required"))]
    pub price: Option<f64>,
}
