//! HTTP handlers for the authors module.

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

use super::models::{Author, AuthorForm};
use crate::modules::books::models::Book;
use crate::modules::CatalogState;

#[derive(Debug, Clone, Serialize)]
struct AuthorView {
    id: String,
    name: String,
    lifespan: String,
    url: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.to_string(),
            name: author.display_name(),
            lifespan: author.lifespan(),
            url: author.url(),
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

/// Delete confirmations post the target id in the body.
#[derive(Debug, Deserialize)]
pub struct DeleteAuthorForm {
    pub authorid: RecordId,
}

pub async fn list(State(state): State<CatalogState>) -> Result<Response, AppError> {
    let mut authors = state.store.find_many::<Author>(Filter::all()).await?;
    authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
    let views: Vec<AuthorView> = authors.iter().map(AuthorView::from).collect();

    let mut context = Context::new();
    context.insert("title", "Author List");
    context.insert("author_list", &views);
    state.pages.render("author_list.html", &context)
}

pub async fn detail(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
) -> Result<Response, AppError> {
    let store = state.store.as_ref();
    let (author, books) = tokio::try_join!(
        store.find_by_id::<Author>(id),
        store.find_many::<Book>(Filter::by("author", id)),
    )?;
    let author = author.ok_or_else(|| AppError::not_found("Author not found"))?;
    let views: Vec<BookView> = books.iter().map(BookView::from).collect();

    let mut context = Context::new();
    context.insert("title", "Author Detail");
    context.insert("author", &AuthorView::from(&author));
    context.insert("author_books", &views);
    state.pages.render("author_detail.html", &context)
}

pub async fn create_form(State(state): State<CatalogState>) -> Result<Response, AppError> {
    render_form(&state, "Create Author", &AuthorForm::empty(), &[])
}

pub async fn create(
    State(state): State<CatalogState>,
    Form(form): Form<AuthorForm>,
) -> Result<Response, AppError> {
    match create_record(state.store.as_ref(), form).await? {
        CreateOutcome::Created(author) | CreateOutcome::Existing(author) => {
            Ok(state.pages.redirect(&author.url()))
        }
        CreateOutcome::Invalid { errors, fields } => {
            render_form(&state, "Create Author", &fields, &errors)
        }
    }
}

pub async fn delete_form(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
) -> Result<Response, AppError> {
    let store = state.store.as_ref();
    let (author, books) = tokio::try_join!(
        store.find_by_id::<Author>(id),
        store.find_many::<Book>(Filter::by("author", id)),
    )?;
    let Some(author) = author else {
        return Ok(state.pages.redirect("/catalog/authors"));
    };
    render_delete_page(&state, &author, &books)
}

pub async fn delete(
    State(state): State<CatalogState>,
    Form(form): Form<DeleteAuthorForm>,
) -> Result<Response, AppError> {
    let outcome = delete_record::<_, Author, Book>(
        state.store.as_ref(),
        form.authorid,
        Filter::by("author", form.authorid),
    )
    .await?;

    match outcome {
        DeleteOutcome::Deleted | DeleteOutcome::AlreadyGone => {
            Ok(state.pages.redirect("/catalog/authors"))
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
    let author = state
        .store
        .find_by_id::<Author>(id)
        .await?
        .ok_or_else(|| AppError::not_found("Author not found"))?;
    render_form(
        &state,
        "Update Author",
        &AuthorForm::from_entity(&author),
        &[],
    )
}

pub async fn update(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
    Form(form): Form<AuthorForm>,
) -> Result<Response, AppError> {
    match update_record(state.store.as_ref(), id, form).await? {
        UpdateOutcome::Updated(author) => Ok(state.pages.redirect(&author.url())),
        UpdateOutcome::Missing => Err(AppError::not_found("Author not found")),
        UpdateOutcome::Invalid { errors, fields } => {
            render_form(&state, "Update Author", &fields, &errors)
        }
    }
}

fn render_form(
    state: &CatalogState,
    title: &str,
    form: &AuthorForm,
    errors: &[FieldError],
) -> Result<Response, AppError> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("author", form);
    context.insert("errors", errors);
    state.pages.render("author_form.html", &context)
}

fn render_delete_page(
    state: &CatalogState,
    author: &Author,
    books: &[Book],
) -> Result<Response, AppError> {
    let views: Vec<BookView> = books.iter().map(BookView::from).collect();
    let mut context = Context::new();
    context.insert("title", "Delete Author");
    context.insert("author", &AuthorView::from(author));
    context.insert("author_books", &views);
    state.pages.render("author_delete.html", &context)
}
