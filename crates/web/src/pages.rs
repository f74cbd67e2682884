//! Server-rendered HTML pages.
//!
//! Presentation is deliberately minimal: a shared layout, semantic markup,
//! and an escape helper. Styling and component polish are out of scope.

use todozen_core::todo::{StatusFilter, Todo, TodoStatus};
use todozen_core::types::Timestamp;

/// Fixed delay before mirroring search input into the URL, in milliseconds.
const SEARCH_DEBOUNCE_MS: u32 = 400;

/// Escape text for interpolation into HTML content or attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} · Todozen</title>\n\
         </head>\n\
         <body>\n{body}\n</body>\n\
         </html>\n",
        title = escape(title),
    )
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(
            "<p class=\"error\" role=\"alert\">{}</p>",
            escape(message)
        ),
        None => String::new(),
    }
}

/// Standalone error page used by [`crate::error::AppError`].
pub fn error_page(message: &str) -> String {
    layout(
        "Error",
        &format!(
            "<main>\n<h1>Something went wrong</h1>\n<p>{}</p>\n\
             <p><a href=\"/\">Back to your tasks</a></p>\n</main>",
            escape(message)
        ),
    )
}

/// Login page. Shows a success notice right after registration.
pub fn login_page(error: Option<&str>, just_registered: bool) -> String {
    let notice = if just_registered {
        "<p class=\"notice\">Account created successfully! Please sign in.</p>"
    } else {
        ""
    };
    layout(
        "Sign in",
        &format!(
            "<main>\n<h1>Welcome back</h1>\n\
             <form method=\"post\" action=\"/login\">\n\
             <label for=\"email\">Email</label>\n\
             <input type=\"email\" id=\"email\" name=\"email\" required>\n\
             <label for=\"password\">Password</label>\n\
             <input type=\"password\" id=\"password\" name=\"password\" required>\n\
             <button type=\"submit\">Sign In</button>\n\
             </form>\n{notice}\n{banner}\n\
             <p>Don't have an account? <a href=\"/register\">Sign up</a></p>\n</main>",
            banner = error_banner(error),
        ),
    )
}

/// Registration page.
pub fn register_page(error: Option<&str>) -> String {
    layout(
        "Create account",
        &format!(
            "<main>\n<h1>Create account</h1>\n\
             <form method=\"post\" action=\"/register\">\n\
             <label for=\"first_name\">First Name</label>\n\
             <input id=\"first_name\" name=\"first_name\" required>\n\
             <label for=\"last_name\">Last Name</label>\n\
             <input id=\"last_name\" name=\"last_name\" required>\n\
             <label for=\"email\">Email</label>\n\
             <input type=\"email\" id=\"email\" name=\"email\" required>\n\
             <label for=\"password\">Password</label>\n\
             <input type=\"password\" id=\"password\" name=\"password\" required>\n\
             <button type=\"submit\">Sign Up</button>\n\
             </form>\n{banner}\n\
             <p>Already have an account? <a href=\"/login\">Sign in</a></p>\n</main>",
            banner = error_banner(error),
        ),
    )
}

/// URL of the list page for a given search/filter selection. The query
/// string is omitted entirely when nothing is selected.
pub fn list_url(search: &str, filter: StatusFilter) -> String {
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    if !search.is_empty() {
        pairs.push(("search", search));
    }
    if filter != StatusFilter::All {
        pairs.push(("filter", filter.as_str()));
    }
    if pairs.is_empty() {
        return "/".to_string();
    }
    match serde_urlencoded::to_string(&pairs) {
        Ok(query) => format!("/?{query}"),
        Err(_) => "/".to_string(),
    }
}

fn filter_tab(current: StatusFilter, option: StatusFilter, label: &str, search: &str) -> String {
    let marker = if current == option { " aria-current=\"page\"" } else { "" };
    let href = escape(&list_url(search, option));
    format!("<a href=\"{href}\"{marker}>{label}</a>")
}

fn hidden_query_fields(search: &str, filter: StatusFilter) -> String {
    format!(
        "<input type=\"hidden\" name=\"search\" value=\"{}\">\n\
         <input type=\"hidden\" name=\"filter\" value=\"{}\">",
        escape(search),
        filter.as_str(),
    )
}

fn todo_card(todo: &Todo, now: Timestamp, search: &str, filter: StatusFilter) -> String {
    let overdue = if todo.is_overdue(now) {
        "<strong class=\"overdue\">Overdue</strong>\n"
    } else {
        ""
    };
    let due = match todo.due_date.as_deref() {
        Some(date) => format!("<p>Due: {}</p>\n", escape(date)),
        None => String::new(),
    };
    let complete_form = if todo.status == TodoStatus::Pending {
        format!(
            "<form method=\"post\" action=\"/\">\n\
             <input type=\"hidden\" name=\"intent\" value=\"completed\">\n\
             <input type=\"hidden\" name=\"todoId\" value=\"{id}\">\n{query}\n\
             <button type=\"submit\">Mark completed</button>\n</form>\n",
            id = todo.id,
            query = hidden_query_fields(search, filter),
        )
    } else {
        String::new()
    };
    format!(
        "<article class=\"todo status-{status}\">\n\
         <h2>{title}</h2>\n\
         <p>{description}</p>\n{due}{overdue}\
         <p>Status: {status}</p>\n\
         {complete_form}\
         <form method=\"post\" action=\"/\" \
         onsubmit=\"return confirm('Are you sure you want to delete this todo?');\">\n\
         <input type=\"hidden\" name=\"intent\" value=\"delete\">\n\
         <input type=\"hidden\" name=\"todoId\" value=\"{id}\">\n{query}\n\
         <button type=\"submit\">Delete</button>\n</form>\n\
         <a href=\"/todos/{id}/edit\">Edit</a>\n\
         </article>",
        status = todo.status,
        title = escape(&todo.title),
        description = escape(&todo.description),
        id = todo.id,
        query = hidden_query_fields(search, filter),
    )
}

/// Task list page with search box, filter tabs, and per-task actions.
///
/// The search input mirrors into the URL after a fixed debounce delay so
/// reloading preserves search intent without a navigation per keystroke.
pub fn todo_list_page(
    todos: &[Todo],
    search: &str,
    filter: StatusFilter,
    now: Timestamp,
) -> String {
    let cards = if todos.is_empty() {
        let hint = if search.is_empty() {
            "No tasks yet. Create your first task to get started."
        } else {
            "No tasks found. Try adjusting your search terms."
        };
        format!("<p>{hint}</p>")
    } else {
        todos
            .iter()
            .map(|todo| todo_card(todo, now, search, filter))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let tabs = [
        filter_tab(filter, StatusFilter::All, "All", search),
        filter_tab(filter, StatusFilter::Pending, "Pending", search),
        filter_tab(filter, StatusFilter::Completed, "Done", search),
    ]
    .join("\n");

    let body = format!(
        "<main>\n<h1>Your Tasks</h1>\n\
         <form method=\"get\" action=\"/\" id=\"search-form\">\n\
         <input type=\"search\" id=\"search\" name=\"search\" \
         placeholder=\"Search tasks...\" value=\"{search_value}\">\n\
         <input type=\"hidden\" name=\"filter\" value=\"{filter_value}\">\n\
         </form>\n\
         <nav class=\"filters\">\n{tabs}\n</nav>\n\
         <p><a href=\"/todos/new\">New task</a></p>\n\
         <section class=\"todos\">\n{cards}\n</section>\n\
         <form method=\"post\" action=\"/logout\">\n\
         <button type=\"submit\">Sign out</button>\n</form>\n\
         <script>\n\
         (function () {{\n\
           var input = document.getElementById('search');\n\
           var timer = null;\n\
           input.addEventListener('input', function () {{\n\
             clearTimeout(timer);\n\
             timer = setTimeout(function () {{\n\
               document.getElementById('search-form').submit();\n\
             }}, {debounce});\n\
           }});\n\
         }})();\n\
         </script>\n</main>",
        search_value = escape(search),
        filter_value = filter.as_str(),
        debounce = SEARCH_DEBOUNCE_MS,
    );

    layout("Your Tasks", &body)
}

/// Shared form for creating and editing a task.
///
/// `existing` pre-fills the fields on the edit page; the due date input
/// shows only the date part of the stored value.
pub fn todo_form_page(
    heading: &str,
    action_path: &str,
    error: Option<&str>,
    existing: Option<&Todo>,
) -> String {
    let title = existing.map(|t| t.title.as_str()).unwrap_or_default();
    let description = existing.map(|t| t.description.as_str()).unwrap_or_default();
    let due_date = existing
        .and_then(|t| t.due_date.as_deref())
        .map(|d| d.split('T').next().unwrap_or(d))
        .unwrap_or_default();

    layout(
        heading,
        &format!(
            "<main>\n<h1>{heading}</h1>\n\
             <form method=\"post\" action=\"{action}\">\n\
             <label for=\"title\">Title</label>\n\
             <input id=\"title\" name=\"title\" value=\"{title}\" required>\n\
             <label for=\"description\">Description</label>\n\
             <textarea id=\"description\" name=\"description\" rows=\"4\" required>{description}</textarea>\n\
             <label for=\"dueDate\">Due date</label>\n\
             <input type=\"date\" id=\"dueDate\" name=\"dueDate\" value=\"{due_date}\">\n\
             <button type=\"submit\">Save</button>\n\
             </form>\n{banner}\n\
             <p><a href=\"/\">Back to your tasks</a></p>\n</main>",
            heading = escape(heading),
            action = escape(action_path),
            title = escape(title),
            description = escape(description),
            due_date = escape(due_date),
            banner = error_banner(error),
        ),
    )
}
