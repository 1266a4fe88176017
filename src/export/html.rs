use std::fmt::Write as _;

use reqwest::header::HeaderMap;

const PAGE_STYLE: &str = r"body {
  display: flex;
  flex-direction: column;
  font-family: sans-serif;
}
html, body {
  height: 98%;
}
h1 {
  font-size: 200%;
  text-align: center;
}
td {
  overflow: auto;
  padding: 8px;
}
table {
  border-collapse: collapse;
  table-layout: fixed;
  width: 98%;
  margin: 5px 0;
}
.iframe-container {
  flex: 1;
  display: flex;
}
iframe {
  flex: 1;
  width: 100%;
  border: none;
  box-shadow: 0 0 10px rgba(0,0,0,0.1);
}";

/// Escapes text for use in HTML bodies and quoted attributes.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Header table with one row per header name; repeated values are joined.
#[must_use]
pub fn headers_table(headers: &HeaderMap) -> String {
    let mut table = String::from(
        "<table border=\"1\">\n  <thead>\n    <tr><th style=\"width: 25%;\">Header</th><th style=\"width: 75%;\">Value</th></tr>\n  </thead>\n  <tbody>\n",
    );
    for name in headers.keys() {
        let values = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        let _written = writeln!(
            table,
            "    <tr><td>{}</td><td>{}</td></tr>",
            escape_html(name.as_str()),
            escape_html(&values)
        );
    }
    table.push_str("  </tbody>\n</table>");
    table
}

#[must_use]
pub fn render_page(id: usize, status_code: u16, headers: &HeaderMap, content: &str) -> String {
    let reason = reqwest::StatusCode::from_u16(status_code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown");
    let headers_section = if headers.is_empty() {
        String::new()
    } else {
        format!("<div>\n{}\n</div>", headers_table(headers))
    };
    let content_section = if content.is_empty() {
        "<div>\n<h2>Content: Empty...</h2>\n</div>".to_owned()
    } else {
        format!(
            "<div class=\"iframe-container\">\n<h2>Content:</h2>\n<iframe title=\"Content\" width=\"100%\" height=\"100%\" srcdoc=\"{}\"></iframe>\n</div>",
            escape_html(content)
        )
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\"/>\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\n<title>Response: {id}</title>\n<style>\n{PAGE_STYLE}\n</style>\n</head>\n<body>\n<h1>Response: {id}</h1>\n<div>\n<h2>StatusCode: {reason} ({status_code})</h2>\n</div>\n{headers_section}\n{content_section}\n</body>\n</html>\n"
    )
}
