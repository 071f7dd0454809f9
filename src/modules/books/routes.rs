//! HTTP handlers for the books module.

use std::collections::HashMap;

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

use super::models::{Book, BookForm};
use crate::modules::authors::models::Author;
use crate::modules::bookinstances::models::BookInstance;
use crate::modules::genres::models::Genre;
use crate::modules::CatalogState;

#[derive(Debug, Clone, Serialize)]
struct BookListView {
    title: String,
    author_name: String,
    url: String,
}

#[derive(Debug, Clone, Serialize)]
struct InstanceView {
    imprint: String,
    status: String,
    url: String,
}

impl From<&BookInstance> for InstanceView {
    fn from(instance: &BookInstance) -> Self {
        Self {
            imprint: instance.imprint.clone(),
            status: instance.status.to_string(),
            url: instance.url(),
        }
    }
}

/// Dropdown option for the author and genre selects.
#[derive(Debug, Clone, Serialize)]
struct ChoiceView {
    id: String,
    name: String,
}

/// Delete confirmations post the target id in the body.
#[derive(Debug, Deserialize)]
pub struct DeleteBookForm {
    pub bookid: RecordId,
}

pub async fn list(State(state): State<CatalogState>) -> Result<Response, AppError> {
    let store = state.store.as_ref();
    let (books, authors) = tokio::try_join!(
        store.find_many::<Book>(Filter::all()),
        store.find_many::<Author>(Filter::all()),
    )?;

    let author_names: HashMap<RecordId, String> = authors
        .iter()
        .map(|author| (author.id, author.display_name()))
        .collect();
    let views: Vec<BookListView> = books
        .iter()
        .map(|book| BookListView {
            title: book.title.clone(),
            author_name: author_names
                .get(&book.author)
                .cloned()
                .unwrap_or_else(|| "Unknown author".to_string()),
            url: book.url(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("title", "Book List");
    context.insert("book_list", &views);
    state.pages.render("book_list.html", &context)
}

pub async fn detail(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
) -> Result<Response, AppError> {
    let store = state.store.as_ref();
    let (book, instances) = tokio::try_join!(
        store.find_by_id::<Book>(id),
        store.find_many::<BookInstance>(Filter::by("book", id)),
    )?;
    let book = book.ok_or_else(|| AppError::not_found("Book not found"))?;

    let author = store.find_by_id::<Author>(book.author).await?;
    let mut genres = Vec::new();
    for genre_id in &book.genre {
        if let Some(genre) = store.find_by_id::<Genre>(*genre_id).await? {
            genres.push(ChoiceView {
                id: genre.id.to_string(),
                name: genre.name,
            });
        }
    }
    let copies: Vec<InstanceView> = instances.iter().map(InstanceView::from).collect();

    let mut context = Context::new();
    context.insert("title", "Book Detail");
    context.insert("book_title", &book.title);
    context.insert("book_summary", &book.summary);
    context.insert("book_isbn", &book.isbn);
    context.insert(
        "author_name",
        &author
            .map(|author| author.display_name())
            .unwrap_or_else(|| "Unknown author".to_string()),
    );
    context.insert("genres", &genres);
    context.insert("copies", &copies);
    state.pages.render("book_detail.html", &context)
}

pub async fn create_form(State(state): State<CatalogState>) -> Result<Response, AppError> {
    render_form(&state, "Create Book", &BookForm::empty(), &[]).await
}

pub async fn create(
    State(state): State<CatalogState>,
    Form(form): Form<BookForm>,
) -> Result<Response, AppError> {
    match create_record(state.store.as_ref(), form).await? {
        CreateOutcome::Created(book) | CreateOutcome::Existing(book) => {
            Ok(state.pages.redirect(&book.url()))
        }
        CreateOutcome::Invalid { errors, fields } => {
            render_form(&state, "Create Book", &fields, &errors).await
        }
    }
}

pub async fn delete_form(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
) -> Result<Response, AppError> {
    let store = state.store.as_ref();
    let (book, instances) = tokio::try_join!(
        store.find_by_id::<Book>(id),
        store.find_many::<BookInstance>(Filter::by("book", id)),
    )?;
    let Some(book) = book else {
        return Ok(state.pages.redirect("/catalog/books"));
    };
    render_delete_page(&state, &book, &instances)
}

pub async fn delete(
    State(state): State<CatalogState>,
    Form(form): Form<DeleteBookForm>,
) -> Result<Response, AppError> {
    let outcome = delete_record::<_, Book, BookInstance>(
        state.store.as_ref(),
        form.bookid,
        Filter::by("book", form.bookid),
    )
    .await?;

    match outcome {
        DeleteOutcome::Deleted | DeleteOutcome::AlreadyGone => {
            Ok(state.pages.redirect("/catalog/books"))
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
    let book = state
        .store
        .find_by_id::<Book>(id)
        .await?
        .ok_or_else(|| AppError::not_found("Book not found"))?;
    render_form(&state, "Update Book", &BookForm::from_entity(&book), &[]).await
}

pub async fn update(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
    Form(form): Form<BookForm>,
) -> Result<Response, AppError> {
    match update_record(state.store.as_ref(), id, form).await? {
        UpdateOutcome::Updated(book) => Ok(state.pages.redirect(&book.url())),
        UpdateOutcome::Missing => Err(AppError::not_found("Book not found")),
        UpdateOutcome::Invalid { errors, fields } => {
            render_form(&state, "Update Book", &fields, &errors).await
        }
    }
}

/// The form needs the author and genre dropdowns regardless of why it is
/// being shown, so both lists are fetched on every render.
async fn render_form(
    state: &CatalogState,
    title: &str,
    form: &BookForm,
    errors: &[FieldError],
) -> Result<Response, AppError> {
    let store = state.store.as_ref();
    let (mut authors, genres) = tokio::try_join!(
        store.find_many::<Author>(Filter::all()),
        store.find_many::<Genre>(Filter::all()),
    )?;
    authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));

    let author_choices: Vec<ChoiceView> = authors
        .iter()
        .map(|author| ChoiceView {
            id: author.id.to_string(),
            name: author.display_name(),
        })
        .collect();
    let genre_choices: Vec<ChoiceView> = genres
        .iter()
        .map(|genre| ChoiceView {
            id: genre.id.to_string(),
            name: genre.name.clone(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("title", title);
    context.insert("book", form);
    context.insert("authors", &author_choices);
    context.insert("genres", &genre_choices);
    context.insert("errors", errors);
    state.pages.render("book_form.html", &context)
}

fn render_delete_page(
    state: &CatalogState,
    book: &Book,
    instances: &[BookInstance],
) -> Result<Response, AppError> {
    let copies: Vec<InstanceView> = instances.iter().map(InstanceView::from).collect();
    let mut context = Context::new();
    context.insert("title", "Delete Book");
    context.insert("book_id", &book.id.to_string());
    context.insert("book_title", &book.title);
    context.insert("book_url", &book.url());
    context.insert("copies", &copies);
    state.pages.render("book_delete.html", &context)
}
