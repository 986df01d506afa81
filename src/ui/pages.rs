//! Server-rendered search pages / 服务端渲染的搜索页面

use crate::search::criteria::RawCriteria;
use crate::search::engine::SearchOutcome;
use crate::search::record::RecordPayload;

/// Escape text for HTML body and attribute positions / HTML转义
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render one payload for display / 渲染单条记录
fn payload_text(payload: &RecordPayload) -> String {
    match payload {
        RecordPayload::Text(line) => line.clone(),
        RecordPayload::Fields(fields) => fields
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join(", "),
        RecordPayload::Json(value) => value.to_string(),
    }
}

fn text_input(label: &str, name: &str, value: &str) -> String {
    format!(
        r#"<label>{label}<input type="text" name="{name}" value="{value}" autocomplete="off"></label>"#,
        label = label,
        name = name,
        value = escape_html(value),
    )
}

fn results_section(outcome: &SearchOutcome) -> String {
    let mut rows = String::new();
    for result in &outcome.results {
        rows.push_str(&format!(
            "<tr><td class=\"source\">{}</td><td>{}</td></tr>\n",
            escape_html(&result.source),
            escape_html(&payload_text(&result.data)),
        ));
    }

    let results_html = if outcome.results.is_empty() {
        "<p class=\"empty\">No matching records.</p>".to_string()
    } else {
        format!(
            "<table class=\"results\"><thead><tr><th>Source</th><th>Record</th></tr></thead><tbody>\n{}</tbody></table>",
            rows
        )
    };

    let mut images_html = String::new();
    if !outcome.images.is_empty() {
        images_html.push_str("<h2>Related images</h2>\n<div class=\"images\">\n");
        for image in &outcome.images {
            let name = escape_html(image);
            images_html.push_str(&format!(
                "<figure><img src=\"/data/{name}\" alt=\"{name}\"><figcaption>{name}</figcaption></figure>\n",
                name = name,
            ));
        }
        images_html.push_str("</div>\n");
    }

    format!(
        r#"<section class="outcome">
<p class="summary">{records} record(s), {images} image(s), {files} file(s) scanned in {ms} ms</p>
{results}
{images_html}
</section>"#,
        records = outcome.results.len(),
        images = outcome.images.len(),
        files = outcome.files_scanned,
        ms = outcome.elapsed_ms,
        results = results_html,
        images_html = images_html,
    )
}

/// Render the search page, optionally with an outcome / 渲染搜索页面
pub fn search_page(raw: &RawCriteria, outcome: Option<&SearchOutcome>) -> String {
    let outcome_html = outcome.map(results_section).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>RecordSeek</title>
    <link rel="stylesheet" href="/style.css">
</head>
<body>
    <header>
        <h1>RecordSeek</h1>
        <p class="tagline">Search the data folder for personal records</p>
    </header>
    <main>
        <form class="search-form" method="post" action="/search">
            {first_name}
            {last_name}
            {email}
            {phone_number}
            {address}
            {country}
            {state}
            {username}
            <button type="submit">Search</button>
        </form>
        {outcome}
    </main>
</body>
</html>"#,
        first_name = text_input("First name", "firstName", &raw.first_name),
        last_name = text_input("Last name", "lastName", &raw.last_name),
        email = text_input("Email", "email", &raw.email),
        phone_number = text_input("Phone number", "phoneNumber", &raw.phone_number),
        address = text_input("Address", "address", &raw.address),
        country = text_input("Country", "country", &raw.country),
        state = text_input("State", "state", &raw.state),
        username = text_input("Username", "username", &raw.username),
        outcome = outcome_html,
    )
}
