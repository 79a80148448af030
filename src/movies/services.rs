use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    errors::{AppError, StoreError},
    movies::{
        dto::MoviePayload,
        repo::MovieStore,
        repo_types::Movie,
    },
};

pub async fn list_movies(store: &dyn MovieStore, theme: Option<&str>) -> Result<Vec<Movie>, AppError> {
    Ok(store.list(theme).await?)
}

pub async fn get_movie(store: &dyn MovieStore, slug: &str) -> Result<Movie, AppError> {
    store
        .get_by_slug(slug)
        .await?
        .ok_or(AppError::NotFound("Movie not found"))
}

pub async fn list_themes(store: &dyn MovieStore) -> Result<Vec<String>, AppError> {
    Ok(store.list_distinct_themes().await?)
}

pub async fn create_movie(store: &dyn MovieStore, payload: MoviePayload) -> Result<Movie, AppError> {
    let movie = payload.validate()?;
    let slug = movie.slug.clone();
    let created = store.create(movie).await.map_err(|e| slug_error(e, &slug))?;
    info!(movie_id = %created.id, slug = %created.slug, "movie created");
    Ok(created)
}

/// Full replace: fields omitted from the payload reset to their defaults.
pub async fn update_movie(
    store: &dyn MovieStore,
    id: Uuid,
    payload: MoviePayload,
) -> Result<Movie, AppError> {
    let movie = payload.validate()?;
    let slug = movie.slug.clone();
    let updated = store.update(id, movie).await.map_err(|e| match e {
        StoreError::NotFound => AppError::NotFound("Movie not found"),
        other => slug_error(other, &slug),
    })?;
    info!(movie_id = %updated.id, slug = %updated.slug, "movie updated");
    Ok(updated)
}

pub async fn delete_movie(store: &dyn MovieStore, id: Uuid) -> Result<(), AppError> {
    store.delete(id).await.map_err(|e| match e {
        StoreError::NotFound => AppError::NotFound("Movie not found"),
        other => other.into(),
    })?;
    info!(movie_id = %id, "movie deleted");
    Ok(())
}

fn slug_error(e: StoreError, slug: &str) -> AppError {
    if matches!(e, StoreError::DuplicateSlug) {
        warn!(slug = %slug, "movie slug already exists");
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movies::repo::MemoryMovieStore;

    fn payload(slug: &str, theme: Option<&str>) -> MoviePayload {
        MoviePayload {
            slug: Some(slug.into()),
            title: Some(format!("Title of {slug}")),
            tagline: Some("A tagline.".into()),
            poster_reference: Some(format!("/posters/{slug}.jpg")),
            synopsis: Some("A synopsis.".into()),
            theme: theme.map(Into::into),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn created_movie_is_found_by_slug() {
        let store = MemoryMovieStore::default();
        let created = create_movie(&store, payload("columbus", Some("courage")))
            .await
            .expect("create");
        let fetched = get_movie(&store, "columbus").await.expect("get");
        assert_eq!(fetched, created);
        assert!(matches!(
            get_movie(&store, "never-used").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn invalid_payload_does_not_touch_store() {
        let store = MemoryMovieStore::default();
        let mut bad = payload("columbus", None);
        bad.tagline = None;
        assert!(matches!(
            create_movie(&store, bad).await,
            Err(AppError::Validation(_))
        ));
        assert!(list_movies(&store, None).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_client_error() {
        let store = MemoryMovieStore::default();
        create_movie(&store, payload("columbus", None)).await.expect("create");
        let err = create_movie(&store, payload("columbus", None)).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
        assert_eq!(list_movies(&store, None).await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn listing_is_newest_first_and_filterable() {
        let store = MemoryMovieStore::default();
        for (slug, theme) in [("a", Some("hope")), ("b", Some("courage")), ("c", Some("hope"))] {
            create_movie(&store, payload(slug, theme)).await.expect("create");
        }
        let slugs: Vec<String> = list_movies(&store, None)
            .await
            .expect("list")
            .into_iter()
            .map(|m| m.slug)
            .collect();
        assert_eq!(slugs, ["c", "b", "a"]);

        let hopeful: Vec<String> = list_movies(&store, Some("hope"))
            .await
            .expect("list")
            .into_iter()
            .map(|m| m.slug)
            .collect();
        assert_eq!(hopeful, ["c", "a"]);
    }

    #[tokio::test]
    async fn themes_are_distinct_and_skip_absent() {
        let store = MemoryMovieStore::default();
        for (slug, theme) in [
            ("a", Some("hope")),
            ("b", Some("hope")),
            ("c", Some("hope")),
            ("d", Some("courage")),
            ("e", None),
        ] {
            create_movie(&store, payload(slug, theme)).await.expect("create");
        }
        let mut themes = list_themes(&store).await.expect("themes");
        themes.sort();
        assert_eq!(themes, ["courage", "hope"]);
    }

    #[tokio::test]
    async fn update_replaces_whole_record() {
        let store = MemoryMovieStore::default();
        let mut full = payload("columbus", Some("courage"));
        full.stills = Some(vec!["/stills/columbus-1.jpg".into()]);
        full.featured = Some(true);
        let created = create_movie(&store, full).await.expect("create");

        let mut replacement = payload("columbus-2017", None);
        replacement.title = Some("Columbus (2017)".into());
        let updated = update_movie(&store, created.id, replacement).await.expect("update");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.slug, "columbus-2017");
        assert_eq!(updated.title, "Columbus (2017)");
        assert!(updated.stills.is_empty());
        assert_eq!(updated.theme, None);
        assert!(!updated.featured);
        assert!(matches!(
            get_movie(&store, "columbus").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_validates_like_create() {
        let store = MemoryMovieStore::default();
        let created = create_movie(&store, payload("columbus", None)).await.expect("create");
        let partial = MoviePayload {
            title: Some("Only a title".into()),
            ..Default::default()
        };
        assert!(matches!(
            update_movie(&store, created.id, partial).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(get_movie(&store, "columbus").await.expect("get"), created);
    }

    #[tokio::test]
    async fn update_rejects_taken_slug_and_unknown_id() {
        let store = MemoryMovieStore::default();
        create_movie(&store, payload("a", None)).await.expect("create");
        let b = create_movie(&store, payload("b", None)).await.expect("create");
        assert!(matches!(
            update_movie(&store, b.id, payload("a", None)).await,
            Err(AppError::DuplicateKey(_))
        ));
        assert!(matches!(
            update_movie(&store, Uuid::new_v4(), payload("z", None)).await,
            Err(AppError::NotFound(_))
        ));
        // a missing record wins over a slug collision
        assert!(matches!(
            update_movie(&store, Uuid::new_v4(), payload("a", None)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let store = MemoryMovieStore::default();
        let created = create_movie(&store, payload("columbus", None)).await.expect("create");
        delete_movie(&store, created.id).await.expect("delete");
        assert!(matches!(
            delete_movie(&store, created.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
