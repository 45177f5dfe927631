//! Shared HTML helpers

/// Escape text for use in HTML content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Wrap a page body into a full HTML document
pub fn page(title: &str, stylesheet_url: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="{stylesheet}">
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
        stylesheet = escape(stylesheet_url),
        body = body,
    )
}

/// `<option>` element, pre-selected when `value == selected`
pub fn option(value: &str, label: &str, selected: &str) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape(value),
        if value == selected { " selected" } else { "" },
        escape(label),
    )
}
