use serde::{Deserialize, Serialize};

use crate::{
    errors::AppError,
    movies::repo_types::{Movie, NewMovie},
};

/// Body of POST /movies and PUT /movies/:id. Every field is optional at the
/// wire level so a missing required field is a validation error, not a
/// deserialization failure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoviePayload {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub tagline: Option<String>,
    #[serde(alias = "posterUrl")]
    pub poster_reference: Option<String>,
    pub synopsis: Option<String>,
    pub stills: Option<Vec<String>>,
    pub intrigues: Option<Vec<String>>,
    pub theme: Option<String>,
    pub featured: Option<bool>,
}

impl MoviePayload {
    /// Checks the required fields and fills defaults for the rest.
    pub fn validate(self) -> Result<NewMovie, AppError> {
        let mut missing = Vec::new();
        let mut required = |name: &'static str, value: Option<String>| {
            match value.filter(|v| !v.trim().is_empty()) {
                Some(v) => v,
                None => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let slug = required("slug", self.slug);
        let title = required("title", self.title);
        let tagline = required("tagline", self.tagline);
        let poster_reference = required("posterReference", self.poster_reference);
        let synopsis = required("synopsis", self.synopsis);

        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(NewMovie {
            slug: slug.trim().to_string(),
            title,
            tagline,
            poster_reference,
            synopsis,
            stills: self.stills.unwrap_or_default(),
            intrigues: self.intrigues.unwrap_or_default(),
            theme: self
                .theme
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            featured: self.featured.unwrap_or(false),
        })
    }
}

/// Query string of GET /movies.
#[derive(Debug, Default, Deserialize)]
pub struct MovieFilter {
    pub theme: Option<String>,
}

impl MovieFilter {
    /// The requested theme; blank means no filter.
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// A movie as returned to clients. The poster is also emitted under its
/// legacy name `posterUrl`, the name accepted on input.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    #[serde(flatten)]
    pub movie: Movie,
    pub poster_url: String,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            poster_url: movie.poster_reference.clone(),
            movie,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub message: String,
}
