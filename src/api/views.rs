//! Server-rendered pages.
//!
//! Every user-supplied string goes through `html_escape` before it is
//! written into markup.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use super::flash::Flash;
use crate::models::movie::Movie;
use crate::models::user::User;
use crate::services::validation::{MAX_NAME_CHARS, MAX_TITLE_CHARS, MAX_YEAR_CHARS};

/// Per-request context shared by every page.
pub struct Layout<'a> {
    pub user: Option<&'a User>,
    pub flashes: &'a [Flash],
}

impl<'a> Layout<'a> {
    #[must_use]
    pub const fn new(user: Option<&'a User>, flashes: &'a [Flash]) -> Self {
        Self { user, flashes }
    }

    fn heading(&self) -> String {
        match self.user {
            Some(user) => format!("{}'s Watchlist", user.name),
            None => "Watchlist".to_string(),
        }
    }

    fn render(&self, title: &str, body: &str) -> String {
        let mut nav = String::from(r#"<li><a href="/">Home</a></li>"#);
        if self.user.is_some() {
            nav.push_str(r#"<li><a href="/settings">Settings</a></li>"#);
            nav.push_str(r#"<li><a href="/logout">Logout</a></li>"#);
        } else {
            nav.push_str(r#"<li><a href="/login">Login</a></li>"#);
        }

        let mut notices = String::new();
        for flash in self.flashes {
            let _ = write!(
                notices,
                r#"<div class="alert alert-{}">{}</div>"#,
                flash.kind.as_str(),
                text(&flash.message)
            );
        }

        format!(
            concat!(
                "<!DOCTYPE html>\n",
                "<html lang=\"en\">\n<head>\n",
                "<meta charset=\"utf-8\">\n",
                "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
                "<title>{title}</title>\n",
                "<link rel=\"stylesheet\" href=\"/static/style.css\" type=\"text/css\">\n",
                "</head>\n<body>\n",
                "<h2>{heading}</h2>\n",
                "<nav><ul>{nav}</ul></nav>\n",
                "{notices}\n",
                "{body}\n",
                "<footer><small>&copy; Watchlist</small></footer>\n",
                "</body>\n</html>\n"
            ),
            title = text(title),
            heading = text(&self.heading()),
            nav = nav,
            notices = notices,
            body = body,
        )
    }
}

fn imdb_link(title: &str) -> String {
    format!(
        "https://www.imdb.com/find?q={}",
        urlencoding::encode(title)
    )
}

pub fn index(layout: &Layout<'_>, movies: &[Movie]) -> String {
    let mut body = String::new();
    let _ = write!(body, "<p>{} Titles</p>", movies.len());

    if layout.user.is_some() {
        let _ = write!(
            body,
            concat!(
                r#"<form method="post" action="/">"#,
                r#"Name <input type="text" name="title" autocomplete="off" required maxlength="{}">"#,
                r#" Year <input type="text" name="year" autocomplete="off" required maxlength="{}">"#,
                r#" <input class="btn" type="submit" name="submit" value="Add">"#,
                "</form>"
            ),
            MAX_TITLE_CHARS, MAX_YEAR_CHARS
        );
    }

    body.push_str(r#"<ul class="movie-list">"#);
    for movie in movies {
        let _ = write!(
            body,
            r#"<li>{} - {}<span class="float-right">"#,
            text(&movie.title),
            text(&movie.year)
        );
        if layout.user.is_some() {
            let _ = write!(
                body,
                concat!(
                    r#"<a class="btn" href="/movie/edit/{id}">Edit</a>"#,
                    r#"<form class="inline-form" method="post" action="/movie/delete/{id}">"#,
                    r#"<input class="btn" type="submit" name="delete" value="Delete" "#,
                    r#"onclick="return confirm('Are you sure?')">"#,
                    "</form>"
                ),
                id = movie.id
            );
        }
        let _ = write!(
            body,
            r#"<a class="imdb" href="{}" target="_blank" title="Find this movie on IMDb">IMDb</a></span></li>"#,
            attr(&imdb_link(&movie.title))
        );
    }
    body.push_str("</ul>");

    layout.render(&layout.heading(), &body)
}

pub fn edit(layout: &Layout<'_>, movie: &Movie) -> String {
    let body = format!(
        concat!(
            "<h3>Edit item</h3>",
            r#"<form method="post" action="/movie/edit/{id}">"#,
            r#"Name <input type="text" name="title" autocomplete="off" required maxlength="{max_title}" value="{title}">"#,
            r#" Year <input type="text" name="year" autocomplete="off" required maxlength="{max_year}" value="{year}">"#,
            r#" <input class="btn" type="submit" name="submit" value="Update">"#,
            "</form>"
        ),
        id = movie.id,
        max_title = MAX_TITLE_CHARS,
        max_year = MAX_YEAR_CHARS,
        title = attr(&movie.title),
        year = attr(&movie.year),
    );

    layout.render("Edit item", &body)
}

pub fn login(layout: &Layout<'_>) -> String {
    let body = concat!(
        "<h3>Login</h3>",
        r#"<form method="post" action="/login">"#,
        r#"Username<br><input type="text" name="username" required><br><br>"#,
        r#"Password<br><input type="password" name="password" required><br><br>"#,
        r#"<input class="btn" type="submit" name="submit" value="Submit">"#,
        "</form>"
    );

    layout.render("Login", body)
}

pub fn settings(layout: &Layout<'_>, user: &User) -> String {
    let body = format!(
        concat!(
            "<h3>Settings</h3>",
            r#"<form method="post" action="/settings">"#,
            r#"Your Name <input type="text" name="name" autocomplete="off" required maxlength="{max}" value="{name}">"#,
            r#" <input class="btn" type="submit" name="submit" value="Save">"#,
            "</form>"
        ),
        max = MAX_NAME_CHARS,
        name = attr(&user.name),
    );

    layout.render("Settings", &body)
}

/// Standalone page for error statuses; does not touch the session.
pub fn error_page(code: &str, title: &str, detail: &str) -> String {
    let body = format!(
        r#"<ul class="movie-list"><li>{} - {}<span class="float-right"><a href="/">Go Back</a></span></li></ul><p>{}</p>"#,
        text(code),
        text(title),
        text(detail)
    );

    Layout::new(None, &[]).render(&format!("{code} - {title}"), &body)
}
