//! HTTP handlers for the genres module.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Form;
use serde::{Deserialize, Serialize};
use tera::Context;

use libris_http::AppError;
use libris_store::{Filter, RecordId, RecordStore};
use libris_workflow::{
    create_record, delete_record, update_record, CreateOutcome, DeleteOutcome, FieldError,
    UpdateOutcome,
};

use super::models::{Genre, GenreForm};
use crate::modules::books::models::Book;
use crate::modules::CatalogState;

#[derive(Debug, Clone, Serialize)]
struct GenreView {
    id: String,
    name: String,
    url: String,
}

impl From<&Genre> for GenreView {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id.to_string(),
            name: genre.name.clone(),
            url: genre.url(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct BookView {
    title: String,
    summary: String,
    url: String,
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            summary: book.summary.clone(),
            url: book.url(),
        }
    }
}

/// Delete confirmations post the target id in the body, as the original
/// pages did.
#[derive(Debug, Deserialize)]
pub struct DeleteGenreForm {
    pub genreid: RecordId,
}

pub async fn list(State(state): State<CatalogState>) -> Result<Response, AppError> {
    let genres = state.store.find_many::<Genre>(Filter::all()).await?;
    let views: Vec<GenreView> = genres.iter().map(GenreView::from).collect();

    let mut context = Context::new();
    context.insert("title", "Genre List");
    context.insert("genre_list", &views);
    state.pages.render("genre_list.html", &context)
}

pub async fn detail(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
) -> Result<Response, AppError> {
    let store = state.store.as_ref();
    let (genre, books) = tokio::try_join!(
        store.find_by_id::<Genre>(id),
        store.find_many::<Book>(Filter::by("genre", id)),
    )?;
    let genre = genre.ok_or_else(|| AppError::not_found("Genre not found"))?;
    let views: Vec<BookView> = books.iter().map(BookView::from).collect();

    let mut context = Context::new();
    context.insert("title", "Genre Detail");
    context.insert("genre", &GenreView::from(&genre));
    context.insert("genre_books", &views);
    state.pages.render("genre_detail.html", &context)
}

pub async fn create_form(State(state): State<CatalogState>) -> Result<Response, AppError> {
    render_form(&state, "Create Genre", &GenreForm::empty(), &[])
}

pub async fn create(
    State(state): State<CatalogState>,
    Form(form): Form<GenreForm>,
) -> Result<Response, AppError> {
    match create_record(state.store.as_ref(), form).await? {
        // Create-or-find: an existing genre with this name is the result.
        CreateOutcome::Created(genre) | CreateOutcome::Existing(genre) => {
            Ok(state.pages.redirect(&genre.url()))
        }
        CreateOutcome::Invalid { errors, fields } => {
            render_form(&state, "Create Genre", &fields, &errors)
        }
    }
}

pub async fn delete_form(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
) -> Result<Response, AppError> {
    let store = state.store.as_ref();
    let (genre, books) = tokio::try_join!(
        store.find_by_id::<Genre>(id),
        store.find_many::<Book>(Filter::by("genre", id)),
    )?;
    let Some(genre) = genre else {
        // Nothing left to delete.
        return Ok(state.pages.redirect("/catalog/genres"));
    };
    render_delete_page(&state, &genre, &books)
}

pub async fn delete(
    State(state): State<CatalogState>,
    Form(form): Form<DeleteGenreForm>,
) -> Result<Response, AppError> {
    let outcome = delete_record::<_, Genre, Book>(
        state.store.as_ref(),
        form.genreid,
        Filter::by("genre", form.genreid),
    )
    .await?;

    match outcome {
        DeleteOutcome::Deleted | DeleteOutcome::AlreadyGone => {
            Ok(state.pages.redirect("/catalog/genres"))
        }
        DeleteOutcome::Blocked { target, dependents } => {
            render_delete_page(&state, &target, &dependents)
        }
    }
}

pub async fn update_form(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
) -> Result<Response, AppError> {
    let genre = state
        .store
        .find_by_id::<Genre>(id)
        .await?
        .ok_or_else(|| AppError::not_found("Genre not found"))?;
    render_form(&state, "Update Genre", &GenreForm::from_entity(&genre), &[])
}

pub async fn update(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
    Form(form): Form<GenreForm>,
) -> Result<Response, AppError> {
    match update_record(state.store.as_ref(), id, form).await? {
        UpdateOutcome::Updated(genre) => Ok(state.pages.redirect(&genre.url())),
        UpdateOutcome::Missing => Err(AppError::not_found("Genre not found")),
        UpdateOutcome::Invalid { errors, fields } => {
            render_form(&state, "Update Genre", &fields, &errors)
        }
    }
}

fn render_form(
    state: &CatalogState,
    title: &str,
    form: &GenreForm,
    errors: &[FieldError],
) -> Result<Response, AppError> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("genre", form);
    context.insert("errors", errors);
    state.pages.render("genre_form.html", &context)
}

fn render_delete_page(
    state: &CatalogState,
    genre: &Genre,
    books: &[Book],
) -> Result<Response, AppError> {
    let views: Vec<BookView> = books.iter().map(BookView::from).collect();
    let mut context = Context::new();
    context.insert("title", "Delete Genre");
    context.insert("genre", &GenreView::from(genre));
    context.insert("genre_books", &views);
    state.pages.render("genre_delete.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    fn setup() -> (CatalogState, Router) {
        let state = CatalogState::new().unwrap();
        let router = super::super::create_module(state.clone()).routes();
        (state, router)
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn sample_book(state: &CatalogState, genre: RecordId) -> Book {
        state
            .store
            .save(Book {
                id: RecordId::nil(),
                title: "The Name of the Wind".into(),
                summary: "A quiet innkeeper tells his story.".into(),
                isbn: "9781473211896".into(),
                author: RecordId::generate(),
                genre: vec![genre],
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_then_duplicate_redirects_to_the_same_genre() {
        let (state, router) = setup();

        let first = router
            .clone()
            .oneshot(form_post("/create", "name=Fantasy"))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::SEE_OTHER);
        let location = first
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let second = router
            .oneshot(form_post("/create", "name=Fantasy"))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            second.headers().get(header::LOCATION).unwrap(),
            location.as_str()
        );

        assert_eq!(state.store.count::<Genre>().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn create_with_blank_name_rerenders_the_form() {
        let (state, router) = setup();

        let response = router.oneshot(form_post("/create", "name=")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("Genre name required"));
        assert_eq!(state.store.count::<Genre>().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_with_dependent_books_is_blocked() {
        let (state, router) = setup();
        let genre = state
            .store
            .save(Genre {
                id: RecordId::nil(),
                name: "Fantasy".into(),
            })
            .await
            .unwrap();
        sample_book(&state, genre.id).await;

        let response = router
            .oneshot(form_post(
                &format!("/{}/delete", genre.id),
                &format!("genreid={}", genre.id),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("The Name of the Wind"));

        let kept: Option<Genre> = state.store.find_by_id(genre.id).await.unwrap();
        assert!(kept.is_some());
    }

    #[tokio::test]
    async fn delete_of_unreferenced_genre_redirects_to_the_listing() {
        let (state, router) = setup();
        let genre = state
            .store
            .save(Genre {
                id: RecordId::nil(),
                name: "Poetry".into(),
            })
            .await
            .unwrap();

        let response = router
            .oneshot(form_post(
                &format!("/{}/delete", genre.id),
                &format!("genreid={}", genre.id),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/catalog/genres"
        );
        let gone: Option<Genre> = state.store.find_by_id(genre.id).await.unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn delete_of_unknown_genre_is_idempotent() {
        let (_state, router) = setup();
        let id = RecordId::generate();

        let response = router
            .oneshot(form_post(&format!("/{id}/delete"), &format!("genreid={id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn detail_of_unknown_genre_is_not_found() {
        let (_state, router) = setup();
        let response = router
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", RecordId::generate()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_replaces_the_name_and_redirects() {
        let (state, router) = setup();
        let genre = state
            .store
            .save(Genre {
                id: RecordId::nil(),
                name: "Fantasy".into(),
            })
            .await
            .unwrap();

        let response = router
            .oneshot(form_post(
                &format!("/{}/update", genre.id),
                "name=High%20Fantasy",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let updated: Genre = state.store.find_by_id(genre.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "High Fantasy");
        assert_eq!(updated.id, genre.id);
    }

    #[tokio::test]
    async fn update_with_blank_name_leaves_the_record_alone() {
        let (state, router) = setup();
        let genre = state
            .store
            .save(Genre {
                id: RecordId::nil(),
                name: "Fantasy".into(),
            })
            .await
            .unwrap();

        let response = router
            .oneshot(form_post(&format!("/{}/update", genre.id), "name="))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let kept: Genre = state.store.find_by_id(genre.id).await.unwrap().unwrap();
        assert_eq!(kept.name, "Fantasy");
    }
}
