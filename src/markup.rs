//! Inline markup handling for transcript text and the link fragments the
//! narratives embed.

const STRIPPED_TAGS: [&str; 4] = ["<p>", "</p>", "<i>", "</i>"];

/// Remove paragraph and emphasis tags, leaving every other character as is.
///
/// Text is scanned once and a tag is dropped as soon as it is complete in the
/// output, so text such as `<<p>p>` cannot reassemble a tag and the function
/// is idempotent.
pub fn strip_markup(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    for c in text.chars() {
        stripped.push(c);
        if c == '>' {
            if let Some(tag) = STRIPPED_TAGS.iter().find(|tag| stripped.ends_with(*tag)) {
                stripped.truncate(stripped.len() - tag.len());
            }
        }
    }
    stripped
}

/// Escape a value for use inside a double-quoted attribute
pub fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// `<a href="...">text</a>`. The text is already HTML and is not escaped.
pub fn link_to(text: &str, href: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape_attr(href), text)
}

pub fn link_with_title(text: &str, href: &str, title: &str) -> String {
    format!(
        "<a href=\"{}\" title=\"{}\">{}</a>",
        escape_attr(href),
        escape_attr(title),
        text
    )
}
