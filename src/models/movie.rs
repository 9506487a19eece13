use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub banner: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub cast: Vec<String>,
}

impl Movie {
    pub fn from_new(id: u32, new: NewMovie) -> Self {
        Movie {
            id,
            title: new.title,
            description: new.description,
            poster: new.poster,
            banner: new.banner,
            rating: new.rating,
            duration: new.duration,
            release_date: new.release_date,
            genres: new.genres,
            language: new.language,
            director: new.director,
            cast: new.cast,
        }
    }
}

// Input payload for POST /api/movies and PUT /api/movies/{id}.
// Only title and description are required; everything else is cosmetic.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct NewMovie {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub poster: String,
    pub banner: String,
    pub rating: f64,
    pub duration: String,
    pub release_date: String,
    pub genres: Vec<String>,
    pub language: String,
    pub director: String,
    pub cast: Vec<String>,
}
