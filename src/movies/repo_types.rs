use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Movie record in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub tagline: String,
    #[sqlx(rename = "poster_url")]
    pub poster_reference: String, // URL or embedded data string, opaque here
    pub synopsis: String,
    pub stills: Vec<String>,
    pub intrigues: Vec<String>,
    pub theme: Option<String>,
    pub featured: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A validated movie payload, ready to insert or to replace a record with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub slug: String,
    pub title: String,
    pub tagline: String,
    pub poster_reference: String,
    pub synopsis: String,
    pub stills: Vec<String>,
    pub intrigues: Vec<String>,
    pub theme: Option<String>,
    pub featured: bool,
}
