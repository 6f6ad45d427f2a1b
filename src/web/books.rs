//! Book catalog pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::BookForm;
use crate::web::{validation_messages, views, CurrentUser};
use crate::AppState;

/// GET /books
pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Html<String>> {
    let books = state.services.books.find_all().await?;
    Ok(views::books_index(&books, &user))
}

/// GET /books/{id}
///
/// An unknown id renders the 404 page rather than a blank view.
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let book = state
        .services
        .books
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;
    Ok(views::book_show(&book, &user))
}

/// GET /books/new
pub async fn new_form(CurrentUser(user): CurrentUser) -> Html<String> {
    views::book_new(&[], "", &user)
}

/// POST /books
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        let messages = validation_messages(&errors);
        return Ok(views::book_new(&messages, &form.title, &user).into_response());
    }

    match state.services.books.create(&form).await {
        Ok(_) => Ok(Redirect::to("/books").into_response()),
        Err(AppError::Conflict(message)) => {
            Ok(views::book_new(&[message], &form.title, &user).into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /books/{id}/edit
pub async fn edit_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let book = state
        .services
        .books
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;
    Ok(views::book_edit(id, &book.title, &[], &user))
}

/// PATCH /books/{id} (also POSTed by the edit form)
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        let messages = validation_messages(&errors);
        return Ok(views::book_edit(id, &form.title, &messages, &user).into_response());
    }

    state.services.books.update(id, &form).await?;
    Ok(Redirect::to("/books").into_response())
}

/// POST /books/{id}/delete
pub async fn destroy(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Redirect> {
    state.services.books.delete(id).await?;
    Ok(Redirect::to("/books"))
}
