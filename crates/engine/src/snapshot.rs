//! Static HTML rendering of a [`DashboardView`].
//!
//! The page mirrors the terminal layout: status badge, dependency list,
//! metric cards, the record table and the log panel. Every piece of text is
//! escaped before it is written.

use std::fmt::Write;

use stackwatch_types::Dependency;
use stackwatch_util::escape_html;

use crate::locale::Localizer;
use crate::view::{DashboardView, ViewField};

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;background:#2e3440;color:#d8dee9}\
.status.online{color:#a3be8c}.status.offline{color:#bf616a}\
.connected{color:#a3be8c}.disconnected{color:#bf616a}\
.cards{display:flex;gap:1rem}.card{background:#3b4252;padding:1rem;border-radius:6px}\
table{border-collapse:collapse;width:100%}td,th{border-bottom:1px solid #4c566a;padding:.4rem;text-align:left}\
.log-entry.error{color:#bf616a}.log-entry.warning{color:#d08770}.log-entry.success{color:#a3be8c}";

/// Render the whole dashboard as a standalone HTML document.
pub fn render_html_snapshot(view: &DashboardView, localizer: &dyn Localizer) -> String {
    let mut html = String::new();
    let bindings = &view.bindings;
    let status = bindings.get(ViewField::Status);

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n<title>Stackwatch</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
        lang = localizer.locale().code(),
    );
    let _ = writeln!(
        html,
        "<div id=\"statusBadge\" class=\"status {class}\"><span id=\"{id}\">{text}</span></div>",
        class = status.class.class_name(),
        id = ViewField::Status.element_id(),
        text = escape_html(&status.text),
    );

    html.push_str("<ul class=\"services\">\n");
    for dependency in Dependency::ALL {
        let field = ViewField::for_dependency(dependency);
        let binding = bindings.get(field);
        let _ = writeln!(
            html,
            "<li id=\"{id}\">{label}: <span class=\"service-status {class}\">{text}</span></li>",
            id = field.element_id(),
            label = escape_html(localizer.label(field)),
            class = binding.class.class_name(),
            text = escape_html(&binding.text),
        );
    }
    html.push_str("</ul>\n<div class=\"cards\">\n");

    for field in ViewField::METRICS {
        let _ = writeln!(
            html,
            "<div class=\"card\"><div>{label}</div><strong id=\"{id}\">{text}</strong></div>",
            label = escape_html(localizer.label(field)),
            id = field.element_id(),
            text = escape_html(bindings.text(field)),
        );
    }
    html.push_str("</div>\n<table>\n<thead><tr>");
    for column in crate::view::RecordTable::COLUMNS {
        let _ = write!(html, "<th>{column}</th>");
    }
    let _ = writeln!(
        html,
        "</tr></thead>\n<tbody id=\"dataTable\">\n{}\n</tbody>\n</table>",
        view.table.to_html(localizer.no_data())
    );

    html.push_str("<div id=\"logs\">\n");
    for entry in view.logs.entries() {
        let _ = writeln!(
            html,
            "<div class=\"log-entry {severity}\">{line}</div>",
            severity = entry.severity.as_str(),
            line = escape_html(&entry.display_line()),
        );
    }
    let _ = writeln!(
        html,
        "</div>\n<footer>{label}: <span id=\"{id}\">{text}</span></footer>\n</body>\n</html>",
        label = escape_html(localizer.label(ViewField::LastUpdated)),
        id = ViewField::LastUpdated.element_id(),
        text = escape_html(bindings.text(ViewField::LastUpdated)),
    );

    html
}
