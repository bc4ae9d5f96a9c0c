//! Response rendering.

use anyhow::Result;
use fmp_wrapper::Response;
use polars::prelude::DataFrame;

/// Print a response to stdout: pretty JSON, or the table with its shape.
pub(crate) fn print_response(response: &Response) -> Result<()> {
    println!("{}", render(response)?);
    Ok(())
}

fn render(response: &Response) -> Result<String> {
    Ok(match response {
        Response::Json(value) => serde_json::to_string_pretty(value)?,
        Response::Table(df) => render_table(df),
    })
}

fn render_table(df: &DataFrame) -> String {
    if df.width() == 0 {
        return "(no records)".to_string();
    }
    let (rows, cols) = df.shape();
    format!("{df}\n{rows} rows x {cols} columns")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_json() {
        let rendered = render(&Response::Json(json!({"symbol": "AAPL"}))).unwrap();
        assert_eq!(rendered, "{\n  \"symbol\": \"AAPL\"\n}");
    }

    #[test]
    fn test_render_table() {
        let df = fmp_wrapper::to_table(&json!([{"symbol": "AAPL"}, {"symbol": "MSFT"}])).unwrap();
        let rendered = render(&Response::Table(df)).unwrap();
        assert!(rendered.contains("AAPL"));
        assert!(rendered.ends_with("2 rows x 1 columns"));
    }

    #[test]
    fn test_render_empty_table() {
        let rendered = render(&Response::Table(DataFrame::empty())).unwrap();
        assert_eq!(rendered, "(no records)");
    }
}
