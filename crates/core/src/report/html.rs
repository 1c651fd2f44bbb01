//! HTML rendering of a computed report
//!
//! Preview and print output share the same markup; print mode drops the
//! on-screen page frame and the page counter block, leaving page numbering
//! to the printer.

use std::fmt::Write;

use super::columns::Cell;
use super::layout::{HeaderCell, SERIAL_WIDTH_PERCENT};
use super::{Report, NO_MATCHES, REPORT_TITLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Screen preview with page frame and pagination chrome
    Preview,
    /// Print/export layout driven by page breaks
    Print,
}

fn escape(text: &str) -> String {
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

fn style_block(report: &Report, mode: RenderMode) -> String {
    let geometry = &report.geometry;
    let mut css = String::new();
    let _ = writeln!(
        css,
        "@page {{ size: {}; margin: {}mm; }}",
        geometry.css_size(),
        geometry.margin_mm
    );
    let _ = writeln!(
        css,
        "body {{ font-family: sans-serif; color: #000; font-size: {}px; }}",
        report.font_size.px()
    );
    css.push_str("table { width: 100%; border-collapse: collapse; table-layout: fixed; }\n");
    css.push_str("th, td { border: 1px solid #000; padding: 4px; vertical-align: top; word-wrap: break-word; }\n");
    css.push_str("th { background: #d1d5db; }\n");
    css.push_str("tr.group td { background: #e5e7eb; font-weight: bold; }\n");
    css.push_str(".empty { text-align: center; padding: 48px 0; }\n");
    css.push_str(".footer { margin-top: 32px; font-size: 10px; color: #666; text-align: center; }\n");

    match mode {
        RenderMode::Preview => {
            let _ = writeln!(
                css,
                ".page-preview {{ width: {}mm; min-height: {}mm; margin: 20px auto; padding: {}mm; box-sizing: border-box; box-shadow: 0 0 10px rgba(0,0,0,0.1); }}",
                geometry.width_mm, geometry.height_mm, geometry.margin_mm
            );
            css.push_str(".page-number { float: right; }\n");
        }
        RenderMode::Print => {
            css.push_str(".page-preview { width: 100%; margin: 0; padding: 0; }\n");
            css.push_str("thead { display: table-header-group; }\n");
            css.push_str("tr { page-break-inside: avoid; }\n");
        }
    }
    css
}

fn header_rows(report: &Report, html: &mut String) {
    let two_rows = report.header.has_sub_row();
    let rowspan = if two_rows { " rowspan=\"2\"" } else { "" };

    html.push_str("<thead>\n<tr>");
    for cell in &report.header.top {
        match cell {
            HeaderCell::Serial => {
                let _ = write!(html, "<th{}>#</th>", rowspan);
            }
            HeaderCell::Single(column) => {
                let _ = write!(html, "<th{}>{}</th>", rowspan, escape(column.label()));
            }
            HeaderCell::Section { section, span } => {
                let _ = write!(
                    html,
                    "<th colspan=\"{}\">{}</th>",
                    span,
                    section.title().unwrap_or_default()
                );
            }
        }
    }
    html.push_str("</tr>\n");

    if two_rows {
        html.push_str("<tr>");
        for column in &report.header.sub {
            let _ = write!(html, "<th>{}</th>", escape(column.label()));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</thead>\n");
}

fn body_rows(report: &Report, html: &mut String) {
    let span = report.header.column_count();
    html.push_str("<tbody>\n");
    for section in &report.sections {
        if let Some(heading) = &section.heading {
            let _ = writeln!(
                html,
                "<tr class=\"group\"><td colspan=\"{}\">{}</td></tr>",
                span,
                escape(heading)
            );
        }
        for row in &section.rows {
            let _ = write!(html, "<tr><td>{}</td>", row.serial);
            for cell in &row.cells {
                match cell {
                    Cell::Text(text) => {
                        let _ = write!(html, "<td>{}</td>", escape(text));
                    }
                    Cell::Lines(lines) => {
                        html.push_str("<td>");
                        for line in lines {
                            let _ = write!(html, "<div>{}</div>", escape(line));
                        }
                        html.push_str("</td>");
                    }
                }
            }
            html.push_str("</tr>\n");
        }
    }
    html.push_str("</tbody>\n");
}

/// Render a complete standalone HTML document
pub fn render_html(report: &Report, mode: RenderMode) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", REPORT_TITLE);
    let _ = writeln!(html, "<style>\n{}</style>", style_block(report, mode));
    html.push_str("</head>\n<body>\n<div class=\"page-preview\">\n");

    html.push_str("<header>\n");
    if mode == RenderMode::Preview {
        html.push_str("<div class=\"page-number\">Page 1 of 1</div>\n");
    }
    let _ = writeln!(html, "<h1>{}</h1>", REPORT_TITLE);
    html.push_str("<div class=\"summary\">");
    for item in report.meta.summary() {
        let _ = write!(html, "<span>{}</span> ", escape(&item));
    }
    html.push_str("</div>\n</header>\n");

    html.push_str("<table>\n<colgroup>");
    let _ = write!(html, "<col style=\"width: {}%\">", SERIAL_WIDTH_PERCENT);
    for column in &report.columns {
        let _ = write!(html, "<col style=\"width: {}%\">", column.width_percent());
    }
    html.push_str("</colgroup>\n");
    header_rows(report, &mut html);
    body_rows(report, &mut html);
    html.push_str("</table>\n");

    if report.is_empty() {
        let _ = writeln!(html, "<div class=\"empty\">{}</div>", NO_MATCHES);
    }

    let _ = writeln!(
        html,
        "<div class=\"footer\">{}</div>",
        escape(&report.meta.footer())
    );
    html.push_str("</div>\n</body>\n</html>\n");
    html
}
