//! HTML fragments for the read endpoints.

use std::fmt::Write;

use super::model::User;

/// `<ul><li>1 - Jessica</li>…</ul>`; an empty registry is `<ul></ul>`.
pub(super) fn list(users: &[User]) -> String {
    let mut out = String::from("<ul>");
    for user in users {
        let _ = write!(out, "<li>{} - {}</li>", user.id, escape(&user.name));
    }
    out.push_str("</ul>");
    out
}

/// `<h1>1 - Jessica</h1>`
pub(super) fn detail(user: &User) -> String {
    format!("<h1>{} - {}</h1>", user.id, escape(&user.name))
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&'  => out.push_str("&amp;"),
            '<'  => out.push_str("&lt;"),
            '>'  => out.push_str("&gt;"),
            '"'  => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c    => out.push(c),
        }
    }
    out
}
