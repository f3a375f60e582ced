//! HTML rendering for the dashboard.
//!
//! Pages are built by hand into an `Html<String>` shell; the markup is small
//! enough that a template engine would be more machinery than page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use pkg_types::format::{drr, format_bytes, percentage};
use pkg_vast::lookup::QuotaReport;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 60rem; color: #1c1c1c; }
h1 { font-size: 1.4rem; }
table { border-collapse: collapse; margin: 1rem 0; width: 100%; }
th, td { border: 1px solid #d0d0d0; padding: 0.4rem 0.7rem; text-align: left; }
th { background: #f2f2f2; }
td.num { text-align: right; font-variant-numeric: tabular-nums; }
.error { color: #8a1f11; background: #fbe3e4; padding: 1rem; border-radius: 4px; }
.meter { background: #eee; border-radius: 4px; height: 0.8rem; overflow: hidden; }
.meter > div { background: #4a7fb5; height: 100%; }
.meter.over > div { background: #b54a4a; }
footer { margin-top: 2rem; color: #777; font-size: 0.8rem; }
"#;

/// Wrap page content in the shared HTML shell.
fn shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} — Storage Quota</title>\n<style>{}</style>\n</head>\n<body>\n\
         {}\n<footer>Storage quota dashboard</footer>\n</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}

/// Minimal HTML escaping for text interpolated into markup.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// The main dashboard page for a resolved quota.
pub fn dashboard_page(username: &str, report: &QuotaReport) -> Html<String> {
    Html(shell("Dashboard", &dashboard_body(username, report)))
}

fn dashboard_body(username: &str, report: &QuotaReport) -> String {
    let quota = &report.quota;
    let usage_pct = percentage(quota.used_effective, quota.hard_limit.unwrap_or(0));
    let reduction = drr(quota.used_logical, quota.used_effective);

    let mut body = String::new();
    body.push_str(&format!("<h1>Storage quota for {}</h1>\n", escape(username)));
    if !report.groups.is_empty() {
        body.push_str(&format!(
            "<p>Groups: {}</p>\n",
            escape(&report.groups.join(", "))
        ));
    }

    body.push_str("<table>\n");
    let mut row = |label: &str, value: String| {
        body.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>\n",
            label,
            escape(&value)
        ));
    };
    row("Name", quota.name.clone());
    row("Path", quota.path.clone());
    if !quota.guid.is_empty() {
        row("GUID", quota.guid.clone());
    }
    row("State", quota.state.as_str().to_string());
    row("Hard limit", format_bytes(quota.hard_limit));
    row("Soft limit", format_bytes(quota.soft_limit));
    row("Used (effective)", format_bytes(Some(quota.used_effective)));
    row("Used (logical)", format_bytes(Some(quota.used_logical)));
    row("Usage", format!("{:.1}%", usage_pct));
    row("Data reduction", format!("{:.2}:1", reduction));
    if let Some(grace) = quota.grace_period {
        row("Grace period", format!("{} s", grace));
    }
    body.push_str("</table>\n");

    let meter_class = if usage_pct > 100.0 { "meter over" } else { "meter" };
    body.push_str(&format!(
        "<div class=\"{}\"><div style=\"width: {:.1}%\"></div></div>\n",
        meter_class,
        usage_pct.min(100.0)
    ));

    if let Some(breakdown) = &report.breakdown {
        body.push_str("<h2>Capacity breakdown</h2>\n<table>\n");
        body.push_str(
            "<tr><th>Path</th><th>Effective</th><th>Logical</th><th>% of quota</th><th>DRR</th></tr>\n",
        );
        body.push_str(&format!(
            "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td>\
             <td class=\"num\">100.00%</td><td class=\"num\">{:.2}:1</td></tr>\n",
            escape(&breakdown.root.path),
            format_bytes(Some(breakdown.root.usable_bytes)),
            format_bytes(Some(breakdown.root.logical_bytes)),
            breakdown.root.drr,
        ));
        for subdir in &breakdown.subdirs {
            body.push_str(&format!(
                "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td>\
                 <td class=\"num\">{:.2}%</td><td class=\"num\">{:.2}:1</td></tr>\n",
                escape(&subdir.path),
                format_bytes(Some(subdir.usable_bytes)),
                format_bytes(Some(subdir.logical_bytes)),
                subdir.percentage,
                subdir.drr,
            ));
        }
        body.push_str("</table>\n");
    }

    body
}

/// Soft-failure page: the lookup came back empty, whatever the reason.
pub fn no_quota_page(username: &str) -> Html<String> {
    Html(shell(
        "No quota",
        &format!(
            "<h1>Storage quota for {}</h1>\n\
             <p class=\"error\">No quota found for your account.</p>\n",
            escape(username)
        ),
    ))
}

/// Debug-mode landing page shown until a `?user=` query names someone.
pub fn user_prompt_page() -> Html<String> {
    Html(shell(
        "Pick a user",
        "<h1>Storage quota</h1>\n\
         <p>Debug mode — no authentication header present.</p>\n\
         <form method=\"get\" action=\"/\">\n\
         <label>Username: <input name=\"user\" autofocus></label>\n\
         <button type=\"submit\">Look up</button>\n\
         </form>\n",
    ))
}

/// Fixed error page for a status code; the message is all the user sees.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    let body = format!("<h1>Error</h1>\n<p class=\"error\">{}</p>\n", escape(message));
    (status, Html(shell("Error", &body))).into_response()
}

/// Fallback handler for unknown routes.
pub async fn not_found() -> Response {
    error_page(StatusCode::NOT_FOUND, "Page not found.")
}
