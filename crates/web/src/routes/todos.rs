//! Task list, creation, and edit pages and actions.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use todozen_core::todo::{
    normalize_due_date, sort_by_due_date, CreateTodo, StatusFilter, Todo, TodoStatus, UpdateTodo,
};
use todozen_directus::TodoQuery;

use crate::error::AppResult;
use crate::routes::auth::non_blank;
use crate::session::SessionToken;
use crate::state::AppState;
use crate::pages;

#[derive(Debug, Deserialize)]
pub struct ListPageQuery {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    filter: Option<String>,
}

impl ListPageQuery {
    fn search(&self) -> &str {
        self.search.as_deref().unwrap_or("").trim()
    }

    fn filter(&self) -> StatusFilter {
        StatusFilter::from_query(self.filter.as_deref())
    }
}

/// Form posted by the per-task action buttons on the list page.
///
/// `search`/`filter` are carried as hidden fields so the redirect lands
/// back on the same view of the list.
#[derive(Debug, Deserialize)]
pub struct ListActionForm {
    pub intent: String,
    #[serde(rename = "todoId")]
    pub todo_id: String,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TodoForm {
    #[validate(custom(function = non_blank))]
    pub title: String,
    #[validate(custom(function = non_blank))]
    pub description: String,
    #[serde(rename = "dueDate", default)]
    pub due_date: Option<String>,
}

impl TodoForm {
    fn title(&self) -> String {
        self.title.trim().to_string()
    }

    fn description(&self) -> String {
        self.description.trim().to_string()
    }

    fn due_date(&self) -> Option<String> {
        self.due_date.as_deref().and_then(normalize_due_date)
    }
}

/// GET /
///
/// Task list. Search and status filter come from the URL and are resolved
/// server-side by the backend; a failed read renders an empty list.
async fn list_page(
    State(state): State<AppState>,
    session: SessionToken,
    Query(query): Query<ListPageQuery>,
) -> Html<String> {
    let search = query.search();
    let filter = query.filter();

    let backend_query = TodoQuery {
        search: (!search.is_empty()).then(|| search.to_string()),
        status: filter.as_status(),
    };

    let mut todos = state.todos.list(&session.0, &backend_query).await;
    sort_by_due_date(&mut todos);

    Html(pages::todo_list_page(&todos, search, filter, Utc::now()))
}

/// POST /
///
/// List actions: `intent=completed` PATCHes only the status,
/// `intent=delete` issues a single DELETE. Failures are swallowed; the
/// user sees that the change did not persist. Always redirects back to
/// the list view that submitted the form.
async fn list_action(
    State(state): State<AppState>,
    session: SessionToken,
    Form(form): Form<ListActionForm>,
) -> Redirect {
    let back = pages::list_url(
        form.search.as_deref().unwrap_or("").trim(),
        StatusFilter::from_query(form.filter.as_deref()),
    );

    let Ok(id) = form.todo_id.parse::<i64>() else {
        tracing::warn!(todo_id = %form.todo_id, "List action with unparseable todo id");
        return Redirect::to(&back);
    };

    let result = match form.intent.as_str() {
        "completed" => state
            .todos
            .mark_completed(&session.0, id)
            .await
            .map(|_| ()),
        "delete" => state.todos.delete(&session.0, id).await,
        other => {
            tracing::warn!(intent = %other, "Unknown list action intent");
            Ok(())
        }
    };

    if let Err(err) = result {
        tracing::warn!(id, intent = %form.intent, error = %err, "List action failed");
    }

    Redirect::to(&back)
}

/// GET /todos/new
async fn new_page(_session: SessionToken) -> Html<String> {
    Html(pages::todo_form_page(
        "Create a New To-Do",
        "/todos/new",
        None,
        None,
    ))
}

/// POST /todos/new
///
/// Validates required fields before any backend call; new tasks always
/// start out pending.
async fn new_action(
    State(state): State<AppState>,
    session: SessionToken,
    Form(form): Form<TodoForm>,
) -> AppResult<Response> {
    if form.validate().is_err() {
        return Ok(Html(pages::todo_form_page(
            "Create a New To-Do",
            "/todos/new",
            Some("Title and description are required"),
            None,
        ))
        .into_response());
    }

    let input = CreateTodo::new(form.title(), form.description(), form.due_date());

    match state.todos.create(&session.0, &input).await {
        Ok(todo) => {
            tracing::info!(id = todo.id, "Task created");
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, "Task creation failed");
            Ok(Html(pages::todo_form_page(
                "Create a New To-Do",
                "/todos/new",
                Some("Failed to create Task. Please try again"),
                None,
            ))
            .into_response())
        }
    }
}

/// GET /todos/{id}/edit
///
/// Fetches the task to pre-fill the form; a missing task (or any fetch
/// failure) sends the user back to the list.
async fn edit_page(
    State(state): State<AppState>,
    session: SessionToken,
    Path(id): Path<i64>,
) -> Response {
    match state.todos.get(&session.0, id).await {
        Some(todo) => Html(pages::todo_form_page(
            "Edit To-Do",
            &format!("/todos/{id}/edit"),
            None,
            Some(&todo),
        ))
        .into_response(),
        None => Redirect::to("/").into_response(),
    }
}

/// POST /todos/{id}/edit
async fn edit_action(
    State(state): State<AppState>,
    session: SessionToken,
    Path(id): Path<i64>,
    Form(form): Form<TodoForm>,
) -> AppResult<Response> {
    let action = format!("/todos/{id}/edit");

    // Re-render the form with the submitted values on failure.
    let submitted = Todo {
        id,
        title: form.title(),
        description: form.description(),
        status: TodoStatus::Pending,
        date_created: None,
        due_date: form.due_date(),
        user_created: None,
    };

    if form.validate().is_err() {
        return Ok(Html(pages::todo_form_page(
            "Edit To-Do",
            &action,
            Some("Title and description are required"),
            Some(&submitted),
        ))
        .into_response());
    }

    let input = UpdateTodo {
        title: Some(form.title()),
        description: Some(form.description()),
        due_date: form.due_date(),
        status: None,
    };

    match state.todos.update(&session.0, id, &input).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(err) => {
            tracing::warn!(id, error = %err, "Task update failed");
            Ok(Html(pages::todo_form_page(
                "Edit To-Do",
                &action,
                Some("Failed to update Task. Please try again"),
                Some(&submitted),
            ))
            .into_response())
        }
    }
}

/// Routes for the task pages.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_page).post(list_action))
        .route("/todos/new", get(new_page).post(new_action))
        .route("/todos/{id}/edit", get(edit_page).post(edit_action))
}
