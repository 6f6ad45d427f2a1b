//! Minimal server-side HTML rendering.
//!
//! Views are deliberately thin: small builders over a shared layout, with
//! all user-supplied text escaped on the way out.

use axum::http::StatusCode;
use axum::response::Html;

use crate::models::{Book, SessionUser};

/// Escape text for interpolation into HTML bodies and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, user: Option<&SessionUser>, body: &str) -> Html<String> {
    let nav = match user {
        Some(u) => format!(
            r#"<nav><a href="/books">Books</a><span class="who">{}</span><form class="inline" action="/logout" method="post"><button type="submit">Log out</button></form></nav>"#,
            escape(&u.username)
        ),
        None => r#"<nav><a href="/auth/login">Log in</a> <a href="/auth/registration">Register</a></nav>"#
            .to_string(),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{} - Biblios</title>
<link rel="stylesheet" href="/css/main.css">
</head>
<body>
<header><h1>Biblios</h1>{}</header>
<main>
{}
</main>
</body>
</html>"#,
        escape(title),
        nav,
        body
    ))
}

fn errors_block(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    format!(r#"<ul class="errors">{}</ul>"#, items)
}

pub fn login_page(error: bool) -> Html<String> {
    let marker = if error {
        r#"<p class="errors">Invalid username or password</p>"#
    } else {
        ""
    };
    let body = format!(
        r#"<h2>Log in</h2>
{}
<form action="/process_login" method="post">
<label>Username <input type="text" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Log in</button>
</form>
<p><a href="/auth/registration">Need an account? Register</a></p>"#,
        marker
    );
    layout("Log in", None, &body)
}

pub fn registration_page(errors: &[String], username: &str) -> Html<String> {
    let body = format!(
        r#"<h2>Register</h2>
{}
<form action="/auth/registration" method="post">
<label>Username <input type="text" name="username" value="{}" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Register</button>
</form>"#,
        errors_block(errors),
        escape(username)
    );
    layout("Register", None, &body)
}

pub fn books_index(books: &[Book], user: &SessionUser) -> Html<String> {
    let rows: String = books
        .iter()
        .map(|b| {
            let id = b.id.unwrap_or_default();
            format!(
                r#"<tr><td><a href="/books/{}">{}</a></td><td><a href="/books/{}/edit">Edit</a></td></tr>"#,
                id,
                escape(&b.title),
                id
            )
        })
        .collect();
    let table = if books.is_empty() {
        "<p>No books in the catalog yet.</p>".to_string()
    } else {
        format!(r#"<table><tbody>{}</tbody></table>"#, rows)
    };
    let body = format!(
        r#"<h2>Books</h2>
{}
<p><a href="/books/new">Add a book</a></p>"#,
        table
    );
    layout("Books", Some(user), &body)
}

pub fn book_show(book: &Book, user: &SessionUser) -> Html<String> {
    let id = book.id.unwrap_or_default();
    let fmt = |t: Option<chrono::DateTime<chrono::Utc>>| {
        t.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    };
    let body = format!(
        r#"<h2>{}</h2>
<dl>
<dt>Created</dt><dd>{}</dd>
<dt>Updated</dt><dd>{}</dd>
<dt>Revision</dt><dd>{}</dd>
</dl>
<p><a href="/books/{}/edit">Edit</a></p>
<form class="inline" action="/books/{}/delete" method="post"><button type="submit">Delete</button></form>
<p><a href="/books">Back to list</a></p>"#,
        escape(&book.title),
        fmt(book.created_at),
        fmt(book.updated_at),
        book.version,
        id,
        id
    );
    layout(&book.title, Some(user), &body)
}

pub fn book_new(errors: &[String], title: &str, user: &SessionUser) -> Html<String> {
    let body = format!(
        r#"<h2>New book</h2>
{}
<form action="/books" method="post">
<label>Title <input type="text" name="title" value="{}" required></label>
<button type="submit">Create</button>
</form>
<p><a href="/books">Back to list</a></p>"#,
        errors_block(errors),
        escape(title)
    );
    layout("New book", Some(user), &body)
}

pub fn book_edit(id: i64, title: &str, errors: &[String], user: &SessionUser) -> Html<String> {
    let body = format!(
        r#"<h2>Edit book</h2>
{}
<form action="/books/{}" method="post">
<label>Title <input type="text" name="title" value="{}" required></label>
<button type="submit">Save</button>
</form>
<p><a href="/books">Back to list</a></p>"#,
        errors_block(errors),
        id,
        escape(title)
    );
    layout("Edit book", Some(user), &body)
}

pub fn error_page(status: StatusCode, message: &str) -> (StatusCode, Html<String>) {
    let body = format!(
        r#"<h2>{}</h2>
<p>{}</p>
<p><a href="/books">Back to the catalog</a></p>"#,
        status.as_u16(),
        escape(message)
    );
    (status, layout("Error", None, &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<b>"x" & 'y'</b>"#),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn login_page_shows_marker_only_on_error() {
        assert!(login_page(true).0.contains("Invalid username or password"));
        assert!(!login_page(false).0.contains("Invalid username or password"));
    }

    #[test]
    fn book_titles_are_escaped_in_the_index() {
        let user = SessionUser {
            username: "alice".into(),
            role: crate::models::Role::User,
        };
        let mut book = Book::new("<script>alert(1)</script>");
        book.id = Some(1);
        let html = books_index(&[book], &user).0;
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
