//! HTTP handlers for the book instances module.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Form;
use serde::Serialize;
use tera::Context;

use libris_http::AppError;
use libris_store::{Filter, RecordId, RecordStore};
use libris_workflow::{
    create_record, update_record, CreateOutcome, FieldError, UpdateOutcome,
};

use super::models::{BookInstance, BookInstanceForm, LoanStatus};
use crate::modules::books::models::Book;
use crate::modules::CatalogState;
use crate::utils::format_date_input;

#[derive(Debug, Clone, Serialize)]
struct InstanceView {
    id: String,
    book_title: String,
    imprint: String,
    status: String,
    due_back: String,
    url: String,
}

fn instance_view(instance: &BookInstance, book_title: String) -> InstanceView {
    InstanceView {
        id: instance.id.to_string(),
        book_title,
        imprint: instance.imprint.clone(),
        status: instance.status.to_string(),
        due_back: format_date_input(instance.due_back),
        url: instance.url(),
    }
}

/// Dropdown option for the book select.
#[derive(Debug, Clone, Serialize)]
struct ChoiceView {
    id: String,
    name: String,
}

pub async fn list(State(state): State<CatalogState>) -> Result<Response, AppError> {
    let store = state.store.as_ref();
    let (instances, books) = tokio::try_join!(
        store.find_many::<BookInstance>(Filter::all()),
        store.find_many::<Book>(Filter::all()),
    )?;

    let titles: HashMap<RecordId, String> = books
        .iter()
        .map(|book| (book.id, book.title.clone()))
        .collect();
    let views: Vec<InstanceView> = instances
        .iter()
        .map(|instance| {
            instance_view(
                instance,
                titles
                    .get(&instance.book)
                    .cloned()
                    .unwrap_or_else(|| "Unknown book".to_string()),
            )
        })
        .collect();

    let mut context = Context::new();
    context.insert("title", "Book Instance List");
    context.insert("bookinstance_list", &views);
    state.pages.render("bookinstance_list.html", &context)
}

pub async fn detail(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
) -> Result<Response, AppError> {
    let store = state.store.as_ref();
    let instance = store
        .find_by_id::<BookInstance>(id)
        .await?
        .ok_or_else(|| AppError::not_found("Book copy not found"))?;
    let book = store.find_by_id::<Book>(instance.book).await?;

    let view = instance_view(
        &instance,
        book.as_ref()
            .map(|book| book.title.clone())
            .unwrap_or_else(|| "Unknown book".to_string()),
    );
    let mut context = Context::new();
    context.insert("title", "Book Instance Detail");
    context.insert("bookinstance", &view);
    context.insert("book_url", &book.map(|book| book.url()).unwrap_or_default());
    state.pages.render("bookinstance_detail.html", &context)
}

pub async fn create_form(State(state): State<CatalogState>) -> Result<Response, AppError> {
    render_form(
        &state,
        "Create BookInstance",
        &BookInstanceForm::empty(),
        &[],
    )
    .await
}

pub async fn create(
    State(state): State<CatalogState>,
    Form(form): Form<BookInstanceForm>,
) -> Result<Response, AppError> {
    match create_record(state.store.as_ref(), form).await? {
        CreateOutcome::Created(instance) | CreateOutcome::Existing(instance) => {
            Ok(state.pages.redirect(&instance.url()))
        }
        CreateOutcome::Invalid { errors, fields } => {
            render_form(&state, "Create BookInstance", &fields, &errors).await
        }
    }
}

pub async fn delete_form(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
) -> Result<Response, AppError> {
    let instance = state.store.find_by_id::<BookInstance>(id).await?;
    let Some(instance) = instance else {
        return Ok(state.pages.redirect("/catalog/bookinstances"));
    };

    let book = state.store.find_by_id::<Book>(instance.book).await?;
    let view = instance_view(
        &instance,
        book.map(|book| book.title).unwrap_or_else(|| "Unknown book".to_string()),
    );
    let mut context = Context::new();
    context.insert("title", "Delete BookInstance");
    context.insert("bookinstance", &view);
    state.pages.render("bookinstance_delete.html", &context)
}

/// Nothing references a copy, so its delete is a plain idempotent removal
/// addressed by the path id.
pub async fn delete(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
) -> Result<Response, AppError> {
    state.store.delete_by_id::<BookInstance>(id).await?;
    Ok(state.pages.redirect("/catalog/bookinstances"))
}

pub async fn update_form(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
) -> Result<Response, AppError> {
    let instance = state
        .store
        .find_by_id::<BookInstance>(id)
        .await?
        .ok_or_else(|| AppError::not_found("Book copy not found"))?;
    render_form(
        &state,
        "Update BookInstance",
        &BookInstanceForm::from_entity(&instance),
        &[],
    )
    .await
}

pub async fn update(
    State(state): State<CatalogState>,
    Path(id): Path<RecordId>,
    Form(form): Form<BookInstanceForm>,
) -> Result<Response, AppError> {
    match update_record(state.store.as_ref(), id, form).await? {
        UpdateOutcome::Updated(instance) => Ok(state.pages.redirect(&instance.url())),
        UpdateOutcome::Missing => Err(AppError::not_found("Book copy not found")),
        UpdateOutcome::Invalid { errors, fields } => {
            render_form(&state, "Update BookInstance", &fields, &errors).await
        }
    }
}

/// The form needs the book dropdown and the status choices on every render.
async fn render_form(
    state: &CatalogState,
    title: &str,
    form: &BookInstanceForm,
    errors: &[FieldError],
) -> Result<Response, AppError> {
    let books = state.store.find_many::<Book>(Filter::all()).await?;
    let choices: Vec<ChoiceView> = books
        .iter()
        .map(|book| ChoiceView {
            id: book.id.to_string(),
            name: book.title.clone(),
        })
        .collect();
    let statuses: Vec<&str> = LoanStatus::ALL.iter().map(|status| status.as_str()).collect();

    let mut context = Context::new();
    context.insert("title", title);
    context.insert("bookinstance", form);
    context.insert("book_list", &choices);
    context.insert("statuses", &statuses);
    context.insert("errors", errors);
    state.pages.render("bookinstance_form.html", &context)
}
