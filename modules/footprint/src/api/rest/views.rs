//! HTML pages of the dashboard.

use std::fmt::Write as _;

use crate::api::rest::format::format_quantity;
use crate::api::rest::routes::{INDEX_PATH, STYLESHEET_PATH};
use crate::domain::model::Category;
use crate::domain::presenter::Presentation;

/// Submission form, optionally with an error line under it.
#[must_use]
pub fn render_index(error: Option<&str>) -> String {
    let mut fields = String::new();
    for category in Category::ALL {
        let name = category.field_name();
        let _ = write!(
            fields,
            r#"
        <label for="{name}">{label} (in CO2e):</label>
        <input type="number" step="any" id="{name}" name="{name}" required><br>
"#,
            label = category.label(),
        );
    }

    let error = error.map_or_else(String::new, |message| {
        format!(
            "    <p class=\"error\" style=\"color: red;\">{}</p>\n",
            escape_html(message)
        )
    });

    page(
        "Eco Footprint Dashboard",
        &format!(
            r#"    <h1>Eco Footprint Dashboard</h1>
    <form method="POST" action="{INDEX_PATH}">{fields}
        <button type="submit">Calculate</button>
    </form>
{error}"#
        ),
    )
}

/// Result page with the inline chart and the total.
#[must_use]
pub fn render_result(presentation: &Presentation) -> String {
    page(
        "Results - Eco Footprint",
        &format!(
            r#"    <h1>Carbon Footprint Results</h1>
    <img src="{src}" alt="Carbon Footprint Chart"/><br>
    <p>Total Carbon Footprint: {total} CO2e</p>
    <a href="{INDEX_PATH}">Back to Home</a>
"#,
            src = presentation.image.data_uri(),
            total = format_quantity(presentation.total),
        ),
    )
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <link rel="stylesheet" href="{STYLESHEET_PATH}">
    <title>{title}</title>
</head>
<body>
{body}</body>
</html>
"#
    )
}

/// Escape text for HTML element and attribute content.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presenter::{BarChart, ChartImage};
    use crate::domain::model::{FootprintInput, FootprintResult};

    #[test]
    fn test_index_has_three_required_number_inputs() {
        let html = render_index(None);
        for name in ["transport", "electricity", "waste"] {
            assert!(html.contains(&format!(
                r#"<input type="number" step="any" id="{name}" name="{name}" required>"#
            )));
        }
        assert!(html.contains(r#"<form method="POST" action="/">"#));
        assert!(html.contains(r#"href="/static/style.css""#));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_index_error_is_escaped() {
        let html = render_index(Some("<b>Invalid input values.</b>"));
        assert!(html.contains("&lt;b&gt;Invalid input values.&lt;/b&gt;"));
    }

    #[test]
    fn test_result_shows_total_and_inline_chart() {
        let result = FootprintResult::from_input(FootprintInput::new(10.0, 5.0, 2.0));
        let presentation = Presentation {
            chart: BarChart::from_result(&result),
            image: ChartImage::png(b"abc".to_vec()),
            total: result.total,
        };
        let html = render_result(&presentation);
        assert!(html.contains("Total Carbon Footprint: 17.0 CO2e"));
        assert!(html.contains(r#"<img src="data:image/png;base64,YWJj""#));
        assert!(html.contains(r#"<a href="/">Back to Home</a>"#));
    }
}
