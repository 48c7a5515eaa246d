// Dashboard HTML. Built by hand from the stats tree: one <details> block per
// year, month, day and hour, with the bucket's totals on the <summary> row
// and the 5-minute readings as leaf tables.

use crate::models::{TrafficRecord, YearSelection};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 64rem; color: #222; }
    h1 { font-size: 1.4rem; }
    h2 { font-size: 1.1rem; margin-top: 2rem; }
    table { border-collapse: collapse; margin: 0.5rem 0; }
    th, td { padding: 0.2rem 0.9rem; text-align: right; border-bottom: 1px solid #eee; }
    th { color: #666; font-weight: 600; }
    td:first-child, th:first-child { text-align: left; }
    details { margin-left: 1.2rem; }
    summary { cursor: pointer; padding: 0.15rem 0; }
    summary .totals { color: #666; font-size: 0.9em; margin-left: 0.6rem; }
    .empty { color: #888; font-style: italic; }
    .more { margin-top: 1.5rem; }
    footer { margin-top: 3rem; color: #999; font-size: 0.8em; }
"#;

pub struct DashboardPage<'a> {
    pub interface: &'a str,
    pub five_minute: &'a [TrafficRecord],
    pub selection: &'a YearSelection,
}

pub fn render_dashboard(page: &DashboardPage<'_>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>Traffic on {}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
        page.interface
    ));
    html.push_str(&format!("<h1>Traffic on {}</h1>\n", page.interface));

    render_five_minute_section(&mut html, page.five_minute);
    render_tree_section(&mut html, page);

    html.push_str(&format!(
        "<footer>{} {}</footer>\n</body>\n</html>\n",
        crate::version::NAME,
        crate::version::VERSION
    ));
    html
}

fn render_five_minute_section(html: &mut String, rows: &[TrafficRecord]) {
    html.push_str("<h2>Recent 5-minute activity</h2>\n");
    if rows.is_empty() {
        html.push_str("<p class=\"empty\">no data</p>\n");
        return;
    }
    html.push_str("<table>\n<tr><th>time</th><th>rx</th><th>tx</th><th>total</th><th>avg. rate</th></tr>\n");
    // Newest first on screen; the parser keeps vnstat's ascending order.
    for row in rows.iter().rev() {
        let minute = row.minute.as_deref().unwrap_or("");
        html.push_str(&format!(
            "<tr><td>{} {}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row.date, minute, row.rx, row.tx, row.total, row.avg
        ));
    }
    html.push_str("</table>\n");
}

fn render_tree_section(html: &mut String, page: &DashboardPage<'_>) {
    html.push_str("<h2>History</h2>\n");
    let tree = &page.selection.tree;
    if tree.years.is_empty() {
        html.push_str("<p class=\"empty\">no data</p>\n");
        return;
    }

    for (year, months) in tree.years.iter().rev() {
        html.push_str(&format!(
            "<details open>\n<summary><strong>{year}</strong></summary>\n"
        ));
        for (month, month_stats) in months.iter().rev() {
            html.push_str(&format!(
                "<details>\n<summary>{}{}</summary>\n",
                month_title(month, year),
                totals_span(month_stats.month.as_ref())
            ));
            for (day, day_stats) in month_stats.days.iter().rev() {
                html.push_str(&format!(
                    "<details>\n<summary>{year}-{month}-{day}{}</summary>\n",
                    totals_span(day_stats.day.as_ref())
                ));
                for (hour, hour_stats) in day_stats.hours.iter().rev() {
                    html.push_str(&format!(
                        "<details>\n<summary>{hour}:00{}</summary>\n",
                        totals_span(hour_stats.hour.as_ref())
                    ));
                    render_minute_rows(html, hour_stats);
                    html.push_str("</details>\n");
                }
                html.push_str("</details>\n");
            }
            html.push_str("</details>\n");
        }
        html.push_str("</details>\n");
    }

    if page.selection.has_more {
        html.push_str(&format!(
            "<p class=\"more\"><a href=\"/?years={}\">Show more years</a></p>\n",
            page.selection.years_shown + 1
        ));
    }
}

fn render_minute_rows(html: &mut String, hour_stats: &crate::models::HourStats) {
    if hour_stats.minutes.is_empty() {
        return;
    }
    html.push_str("<table>\n<tr><th>time</th><th>rx</th><th>tx</th><th>total</th><th>avg. rate</th></tr>\n");
    for (minute, row) in hour_stats.minutes.iter().rev() {
        html.push_str(&format!(
            "<tr><td>{minute}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row.rx, row.tx, row.total, row.avg
        ));
    }
    html.push_str("</table>\n");
}

/// "03" -> "March 2024"; an unparseable month key falls back to "2024-03".
fn month_title(month: &str, year: &str) -> String {
    month
        .parse::<usize>()
        .ok()
        .and_then(|m| MONTH_NAMES.get(m.wrapping_sub(1)))
        .map(|name| format!("{name} {year}"))
        .unwrap_or_else(|| format!("{year}-{month}"))
}

fn totals_span(record: Option<&TrafficRecord>) -> String {
    match record {
        Some(r) => format!(
            "<span class=\"totals\">rx {} &middot; tx {} &middot; total {}</span>",
            r.rx, r.tx, r.total
        ),
        None => String::new(),
    }
}
