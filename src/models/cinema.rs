use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cinema {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_screens")]
    pub screens: u32,
    #[serde(default = "default_total_seats")]
    pub total_seats: u32,
}

fn default_screens() -> u32 {
    1
}

fn default_total_seats() -> u32 {
    100
}

impl Cinema {
    pub fn from_new(id: u32, new: NewCinema) -> Self {
        Cinema {
            id,
            name: new.name,
            location: new.location,
            screens: new.screens,
            total_seats: new.total_seats,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCinema {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_screens")]
    pub screens: u32,
    #[serde(default = "default_total_seats")]
    pub total_seats: u32,
}
