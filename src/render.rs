// src/render.rs
//! Server-rendered HTML for the feed: one card per article, empty state, loading placeholder.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::article::Article;

pub const PAGE_TITLE: &str = "AI News Hub";
pub const EMPTY_STATE: &str = "No news available.";
pub const LOADING_TEXT: &str = "Loading latest AI news...";

/// "Jan 2, 2024 at 3:04 PM" (UTC). Unparseable timestamps are shown as sent.
pub fn format_published(a: &Article) -> String {
    match a.published_at_utc() {
        Some(dt) => dt.format("%b %-d, %Y at %-I:%M %p").to_string(),
        None => a.published_at.clone(),
    }
}

pub fn render_card(a: &Article) -> String {
    let mut out = String::from("<article class=\"card\">\n");
    if !a.image.is_empty() {
        out.push_str(&format!(
            "  <div class=\"card-image\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></div>\n",
            attr(&a.image),
            attr(&a.title)
        ));
    }
    out.push_str(&format!("  <h2>{}</h2>\n", text(&a.title)));
    if !a.description.is_empty() {
        out.push_str(&format!("  <p class=\"desc\">{}</p>\n", text(&a.description)));
    }
    out.push_str(&format!(
        "  <div class=\"meta\"><span>{}</span><span>{}</span></div>\n",
        text(&a.source_name),
        text(&format_published(a))
    ));
    out.push_str(&format!(
        "  <a class=\"more\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Read More</a>\n",
        attr(&a.url)
    ));
    out.push_str("</article>\n");
    out
}

pub fn render_page(articles: &[Article]) -> String {
    let body = if articles.is_empty() {
        format!("<div class=\"empty\">{EMPTY_STATE}</div>\n")
    } else {
        articles.iter().map(render_card).collect::<String>()
    };
    layout(&body)
}

pub fn render_loading() -> String {
    layout(&format!("<div class=\"empty\">{LOADING_TEXT}</div>\n"))
}

fn layout(body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{PAGE_TITLE}</title>
<style>
body {{ background:#f9fafb; color:#111827; font-family:system-ui,sans-serif; margin:0; }}
main {{ max-width:28rem; margin:0 auto; padding:1rem; }}
h1 {{ text-align:center; font-size:1.5rem; }}
.card {{ background:#fff; border-radius:.75rem; box-shadow:0 1px 2px rgba(0,0,0,.05); padding:1rem; margin-bottom:1rem; }}
.card-image img {{ width:100%; height:12rem; object-fit:cover; border-radius:.5rem; }}
.desc {{ color:#374151; font-size:.875rem; }}
.meta {{ display:flex; justify-content:space-between; color:#6b7280; font-size:.75rem; margin-bottom:.75rem; }}
.more {{ display:inline-block; padding:.5rem 1rem; background:#111827; color:#fff; border-radius:.5rem; text-decoration:none; font-size:.875rem; }}
.empty {{ text-align:center; color:#4b5563; }}
</style>
</head>
<body>
<main>
<h1>{PAGE_TITLE}</h1>
{body}</main>
</body>
</html>
"#
    )
}
