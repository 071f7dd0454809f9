//! Home page: catalog-wide counts fetched in one concurrent join.

use axum::extract::State;
use axum::response::{Redirect, Response};
use axum::routing::get;
use axum::Router;
use tera::Context;

use libris_http::AppError;
use libris_store::{Filter, RecordStore};

use super::authors::models::Author;
use super::bookinstances::models::{BookInstance, LoanStatus};
use super::books::models::Book;
use super::genres::models::Genre;
use super::CatalogState;

/// Routes that live outside the module mounts.
pub fn router(state: CatalogState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/catalog", get(index))
        .with_state(state)
}

async fn index(State(state): State<CatalogState>) -> Result<Response, AppError> {
    let store = state.store.as_ref();
    let (books, instances, available, authors, genres) = tokio::try_join!(
        store.count::<Book>(),
        store.count::<BookInstance>(),
        store.find_many::<BookInstance>(Filter::by("status", LoanStatus::Available.as_str())),
        store.count::<Author>(),
        store.count::<Genre>(),
    )?;

    let mut context = Context::new();
    context.insert("title", "Local Library Home");
    context.insert("book_count", &books);
    context.insert("book_instance_count", &instances);
    context.insert("book_instance_available_count", &available.len());
    context.insert("author_count", &authors);
    context.insert("genre_count", &genres);
    state.pages.render("index.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use libris_store::RecordId;
    use tower::ServiceExt;

    #[tokio::test]
    async fn root_redirects_to_the_catalog() {
        let state = CatalogState::new().unwrap();
        let response = router(state)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/catalog"
        );
    }

    #[tokio::test]
    async fn index_reports_counts() {
        let state = CatalogState::new().unwrap();
        let genre = state
            .store
            .save(Genre {
                id: RecordId::nil(),
                name: "Fantasy".into(),
            })
            .await
            .unwrap();
        let author = state
            .store
            .save(Author {
                id: RecordId::nil(),
                first_name: "Patrick".into(),
                family_name: "Rothfuss".into(),
                date_of_birth: None,
                date_of_death: None,
            })
            .await
            .unwrap();
        let book = state
            .store
            .save(Book {
                id: RecordId::nil(),
                title: "The Name of the Wind".into(),
                summary: "A quiet innkeeper tells his story.".into(),
                isbn: "9781473211896".into(),
                author: author.id,
                genre: vec![genre.id],
            })
            .await
            .unwrap();
        state
            .store
            .save(BookInstance {
                id: RecordId::nil(),
                book: book.id,
                imprint: "Gollancz, 2007".into(),
                status: LoanStatus::Available,
                due_back: None,
            })
            .await
            .unwrap();

        let response = router(state)
            .oneshot(
                Request::builder()
                    .uri("/catalog")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(body.to_vec()).unwrap();
        assert!(page.contains("Local Library Home"));
    }
}
