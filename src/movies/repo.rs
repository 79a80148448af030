use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    errors::StoreError,
    movies::repo_types::{Movie, NewMovie},
};

/// Persisted movie records, unique by slug.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// All movies newest-first, optionally only those with the given theme.
    async fn list(&self, theme: Option<&str>) -> Result<Vec<Movie>, StoreError>;
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Movie>, StoreError>;
    /// Distinct non-null themes currently in use.
    async fn list_distinct_themes(&self) -> Result<Vec<String>, StoreError>;
    async fn create(&self, movie: NewMovie) -> Result<Movie, StoreError>;
    /// Replaces every field except id and created_at.
    async fn update(&self, id: Uuid, movie: NewMovie) -> Result<Movie, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

const MOVIE_COLUMNS: &str = "id, slug, title, tagline, poster_url, synopsis, stills, intrigues, theme, featured, created_at";

#[derive(Clone)]
pub struct PgMovieStore {
    db: PgPool,
}

impl PgMovieStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn list(&self, theme: Option<&str>) -> Result<Vec<Movie>, StoreError> {
        let rows = sqlx::query_as::<_, Movie>(&format!(
            r#"
            SELECT {MOVIE_COLUMNS}
            FROM movies
            WHERE $1::text IS NULL OR theme = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(theme)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Movie>, StoreError> {
        let row = sqlx::query_as::<_, Movie>(&format!(
            r#"
            SELECT {MOVIE_COLUMNS}
            FROM movies
            WHERE slug = $1
            "#
        ))
        .bind(slug)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn list_distinct_themes(&self) -> Result<Vec<String>, StoreError> {
        let themes = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT theme
            FROM movies
            WHERE theme IS NOT NULL
            ORDER BY theme
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(themes)
    }

    async fn create(&self, movie: NewMovie) -> Result<Movie, StoreError> {
        // movies_slug_key turns a duplicate into DuplicateSlug
        let row = sqlx::query_as::<_, Movie>(&format!(
            r#"
            INSERT INTO movies (slug, title, tagline, poster_url, synopsis, stills, intrigues, theme, featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(movie.slug)
        .bind(movie.title)
        .bind(movie.tagline)
        .bind(movie.poster_reference)
        .bind(movie.synopsis)
        .bind(movie.stills)
        .bind(movie.intrigues)
        .bind(movie.theme)
        .bind(movie.featured)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, movie: NewMovie) -> Result<Movie, StoreError> {
        let row = sqlx::query_as::<_, Movie>(&format!(
            r#"
            UPDATE movies
               SET slug = $2, title = $3, tagline = $4, poster_url = $5, synopsis = $6,
                   stills = $7, intrigues = $8, theme = $9, featured = $10
             WHERE id = $1
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(movie.slug)
        .bind(movie.title)
        .bind(movie.tagline)
        .bind(movie.poster_reference)
        .bind(movie.synopsis)
        .bind(movie.stills)
        .bind(movie.intrigues)
        .bind(movie.theme)
        .bind(movie.featured)
        .fetch_optional(&self.db)
        .await?;
        row.ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryMovieStore;
