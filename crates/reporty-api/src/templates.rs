//! HTML rendering
//!
//! Every value that comes from the database, the configuration or the request
//! goes through `escape_html` before it is placed in markup.

use axum::http::{HeaderMap, StatusCode};
use reporty_core::{Filters, ReportKind, ReportRegistry, Tabulation};
use reporty_utils::escape_html;

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Reporty</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str, username: &str) -> String {
    let links = [("/admin/reports/", "Reports")];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Reporty</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label) in &links {
        let active_class = if current_path.starts_with(path) {
            "bg-indigo-50 text-indigo-600"
        } else {
            "text-gray-600 hover:bg-gray-50"
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'><span>{}</span></a></li>"#,
            path, active_class, label
        ));
    }

    nav.push_str(&format!(
        r#"</ul><div class='p-4 border-t text-sm text-gray-500'>Signed in as <span class='font-medium'>{}</span> · <a href='/admin/logout/' class='text-indigo-600 hover:underline'>Log out</a></div></div>"#,
        escape_html(username)
    ));
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &HeaderMap, title: &str, current_path: &str, username: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>"#, inner_content)
    } else {
        base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path, username), inner_content))
    }
}

/// Report menu: one card per registered report
pub fn render_report_menu(registry: &ReportRegistry) -> String {
    let mut html = String::from(r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Reports</h2></div><div class='grid grid-cols-1 md:grid-cols-2 gap-4'>"#);

    for entry in registry.entries() {
        html.push_str(&format!(
            r#"<a href='/admin/reports/{}/' class='block bg-white rounded-xl shadow-sm p-6 hover:bg-indigo-50'>
                <h3 class='text-lg font-semibold mb-2'>{}</h3>
                <p class='text-sm text-gray-500'>{}</p>
            </a>"#,
            entry.kind.key(),
            entry.kind.title(),
            entry.kind.description()
        ));
    }

    if registry.is_empty() {
        html.push_str(r#"<p class='text-gray-500'>No reports are registered.</p>"#);
    }

    html.push_str("</div>");
    html
}

/// Report results as a table
pub fn render_report_table(kind: ReportKind, filters: &Filters, tabulation: &Tabulation) -> String {
    let filter_summary: Vec<String> = filters
        .iter()
        .map(|(name, value)| format!("<code>{}</code> = <code>{}</code>", escape_html(name), escape_html(value)))
        .collect();

    let mut html = format!(
        r#"<div class='mb-6'>
            <a href='/admin/reports/' class='text-sm text-indigo-600 hover:underline'>&larr; All reports</a>
            <h2 class='text-2xl font-bold'>{}</h2>
            <p class='text-gray-500'>{}</p>
            <p class='text-sm text-gray-500 mt-1'>Filters: {} · {} rows</p>
        </div>"#,
        kind.title(),
        kind.description(),
        if filter_summary.is_empty() { "none".to_string() } else { filter_summary.join(", ") },
        tabulation.row_count()
    );

    if tabulation.is_empty() {
        html.push_str(r#"<div class='bg-white rounded-xl shadow-sm p-6 text-center text-gray-500'>No results.</div>"#);
        return html;
    }

    html.push_str(r#"<div class='bg-white rounded-xl shadow-sm overflow-x-auto'><table class='w-full'><thead class='bg-gray-50'><tr>"#);
    for header in &tabulation.headers {
        html.push_str(&format!(r#"<th class='px-4 py-2 text-left'>{}</th>"#, escape_html(header)));
    }
    html.push_str("</tr></thead><tbody>");

    for record in &tabulation.records {
        html.push_str("<tr class='border-b'>");
        for value in record {
            html.push_str(&format!(r#"<td class='px-4 py-2'>{}</td>"#, escape_html(&value.to_string())));
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></div>");
    html
}

/// Sign-in form
pub fn render_login_page(login_url: &str, next: &str, error: Option<&str>) -> String {
    let error_html = error
        .map(|message| format!(r#"<p class='mb-4 p-3 rounded-lg bg-red-50 text-red-700 text-sm'>{}</p>"#, escape_html(message)))
        .unwrap_or_default();

    base_html("Log in", &format!(
        r#"<div class='min-h-screen flex items-center justify-center'>
    <form method='post' action='{}' class='bg-white rounded-xl shadow-sm p-8 w-full max-w-sm'>
        <h1 class='text-xl font-bold text-indigo-600 mb-6'>Reporty</h1>
        {}
        <label class='block text-sm text-gray-600 mb-1' for='username'>Username</label>
        <input id='username' name='username' class='w-full px-3 py-2 border rounded-lg mb-4' autofocus required>
        <label class='block text-sm text-gray-600 mb-1' for='password'>Password</label>
        <input id='password' name='password' type='password' class='w-full px-3 py-2 border rounded-lg mb-6' required>
        <input type='hidden' name='next' value='{}'>
        <button type='submit' class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Log in</button>
    </form>
</div>"#,
        escape_html(login_url),
        error_html,
        escape_html(next)
    ))
}

/// Error page shown for 4xx/5xx responses
pub fn render_error_page(status: StatusCode, message: &str) -> String {
    base_html(status.canonical_reason().unwrap_or("Error"), &format!(
        r#"<div class='min-h-screen flex items-center justify-center'>
    <div class='bg-white rounded-xl shadow-sm p-8 text-center'>
        <p class='text-4xl font-bold text-gray-300'>{}</p>
        <p class='mt-2 text-gray-700'>{}</p>
        <a href='/admin/reports/' class='mt-4 inline-block text-indigo-600 hover:underline'>Back to reports</a>
    </div>
</div>"#,
        status.as_u16(),
        escape_html(message)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reporty_core::{tabulate, ResultRow};

    #[test]
    fn test_table_escapes_cells() {
        let rows = vec![ResultRow::new().with("first_name", "<b>Eve</b>").with("last_name", "O'Neil")];
        let html = render_report_table(ReportKind::Email, &Filters::new().with("email", "e@x.io"), &tabulate(&rows));

        assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(html.contains("O&#x27;Neil"));
        assert!(!html.contains("<b>Eve</b>"));
        assert!(html.contains("<th class='px-4 py-2 text-left'>first_name</th>"));
        assert!(html.contains("1 rows"));
    }

    #[test]
    fn test_empty_table() {
        let html = render_report_table(ReportKind::Email, &Filters::new(), &Tabulation::default());
        assert!(html.contains("No results."));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_htmx_partial_has_no_shell() {
        let mut headers = HeaderMap::new();
        headers.insert("hx-request", "true".parse().unwrap());
        let partial = page_response(&headers, "Reports", "/admin/reports/", "admin", "<p>body</p>");
        assert!(!partial.contains("<!DOCTYPE html>"));

        let full = page_response(&HeaderMap::new(), "Reports", "/admin/reports/", "admin", "<p>body</p>");
        assert!(full.starts_with("<!DOCTYPE html>"));
        assert!(full.contains("Signed in as"));
    }

    #[test]
    fn test_menu_lists_registered_reports() {
        let html = render_report_menu(&ReportRegistry::builtin());
        assert!(html.contains("href='/admin/reports/email/'"));
        assert!(html.contains("Email report"));
    }
}
