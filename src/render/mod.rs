//! View rendering boundary.
//!
//! The dispatcher hands every response to a renderer as a
//! `(view name, model)` pair and gets markup back. The trait is the whole
//! contract; the built-in [`HtmlRenderer`] is a deliberately plain
//! implementation so the server is usable end-to-end without a real
//! template engine in front of it.

use serde_json::Value;

/// Views backing the HTML forms, reachable at `GET /{form}`.
const FORM_VIEWS: &[&str] = &[
    "insmusic", "upmusic", "delmusic", "insalbum", "delalbum", "insartist", "upartist", "insgroup",
    "insgenre", "inslink",
];

const PAGE_VIEWS: &[&str] = &[
    "home",
    "message",
    "musicList",
    "albumList",
    "artistList",
    "groupList",
    "genreList",
    "linkList",
    "search",
    "musicJoinLink",
    "artistJoinGroup",
    "joinAll",
    "linksformusic",
];

pub trait ViewRenderer: Send + Sync {
    /// Renders `model` into the named view's markup.
    fn render(&self, view: &str, model: &Value) -> String;

    /// Whether this renderer knows the named view at all.
    fn has_view(&self, view: &str) -> bool;
}

/// Minimal built-in renderer: one generic page layout, model entries dumped
/// as tables (arrays), definition lists (objects) or paragraphs (scalars).
pub struct HtmlRenderer;

impl ViewRenderer for HtmlRenderer {
    fn render(&self, view: &str, model: &Value) -> String {
        let mut body = String::new();
        if let Value::Object(entries) = model {
            for (key, value) in entries {
                render_entry(&mut body, key, value);
            }
        }
        format!(
            "<!DOCTYPE html>\n<html lang=\"it\">\n<head>\n<meta charset=\"UTF-8\">\n\
             <title>MusicService - {view}</title>\n</head>\n<body>\n\
             <h1>MusicService</h1>\n<main data-view=\"{view}\">\n{body}</main>\n</body>\n</html>\n",
            view = escape(view),
            body = body,
        )
    }

    fn has_view(&self, view: &str) -> bool {
        PAGE_VIEWS.contains(&view) || FORM_VIEWS.contains(&view)
    }
}

fn render_entry(out: &mut String, key: &str, value: &Value) {
    match value {
        Value::Array(rows) => {
            out.push_str(&format!("<h2>{}</h2>\n", escape(key)));
            render_table(out, rows);
        }
        Value::Object(_) => {
            out.push_str(&format!("<h2>{}</h2>\n", escape(key)));
            out.push_str("<dl>\n");
            if let Value::Object(fields) = value {
                for (field, field_value) in fields {
                    out.push_str(&format!(
                        "<dt>{}</dt><dd>{}</dd>\n",
                        escape(field),
                        escape(&scalar(field_value))
                    ));
                }
            }
            out.push_str("</dl>\n");
        }
        _ => {
            out.push_str(&format!(
                "<p class=\"{}\">{}</p>\n",
                escape(key),
                escape(&scalar(value))
            ));
        }
    }
}

fn render_table(out: &mut String, rows: &[Value]) {
    let headers: Vec<&String> = match rows.first() {
        Some(Value::Object(fields)) => fields.keys().collect(),
        _ => Vec::new(),
    };
    out.push_str("<table>\n<tr>");
    for header in &headers {
        out.push_str(&format!("<th>{}</th>", escape(header)));
    }
    out.push_str("</tr>\n");
    for row in rows {
        out.push_str("<tr>");
        if let Value::Object(fields) = row {
            for header in &headers {
                let cell = fields.get(*header).unwrap_or(&Value::Null);
                out.push_str(&format!("<td>{}</td>", escape(&scalar(cell))));
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_view_contains_text_and_class() {
        let markup = HtmlRenderer.render(
            "message",
            &json!({
                "messagetype": "text-success",
                "messagetext": "Musica con id 5 aggiunta con successo."
            }),
        );
        assert!(markup.contains("Musica con id 5 aggiunta con successo."));
        assert!(markup.contains("messagetype"));
    }

    #[test]
    fn list_view_renders_rows_as_table() {
        let markup = HtmlRenderer.render(
            "musicList",
            &json!({
                "musicList": [
                    {"musicId": 1, "title": "Alpha"},
                    {"musicId": 2, "title": "Beta"}
                ],
                "page": 0
            }),
        );
        assert!(markup.contains("<table>"));
        assert!(markup.contains("<td>Alpha</td>"));
        assert!(markup.contains("<td>Beta</td>"));
    }

    #[test]
    fn markup_is_escaped() {
        let markup = HtmlRenderer.render(
            "message",
            &json!({"messagetext": "<script>alert(1)</script>"}),
        );
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&lt;script&gt;"));
    }

    #[test]
    fn knows_page_and_form_views_only() {
        assert!(HtmlRenderer.has_view("musicList"));
        assert!(HtmlRenderer.has_view("upmusic"));
        assert!(!HtmlRenderer.has_view("nosuchview"));
    }
}
