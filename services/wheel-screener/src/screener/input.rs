//! Loading raw metric records from JSON.

use std::fs;
use std::path::Path;

use tracing::{info, warn};
use wheel_common::{Error, Result, ResultExt};

use super::metrics::RawMetrics;

/// Parse a JSON array of records, or a single record object.
///
/// Only a document that is not JSON, or whose top level is neither an array
/// nor an object, is an error. A record that cannot be read keeps its place
/// in the batch as a ticker-only record with every metric unknown.
pub fn parse_metrics(content: &str) -> Result<Vec<RawMetrics>> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    let records = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| parse_record(index, item))
            .collect(),
        serde_json::Value::Object(_) => vec![parse_record(0, value)],
        other => {
            return Err(Error::InvalidInput(format!(
                "expected an array of metric records, found {}",
                json_kind(&other)
            )))
        }
    };

    Ok(records)
}

fn parse_record(index: usize, item: serde_json::Value) -> RawMetrics {
    let ticker = ticker_of(&item);
    match serde_json::from_value(item) {
        Ok(record) => record,
        Err(e) => {
            warn!(index, ticker = %ticker, error = %e, "Malformed metric record, scoring with unknown metrics");
            RawMetrics::new(ticker)
        }
    }
}

fn ticker_of(item: &serde_json::Value) -> String {
    let ticker = match item {
        serde_json::Value::Object(map) => map.get("ticker"),
        other => Some(other),
    };
    match ticker {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Read and parse a metrics file.
pub fn load_metrics(path: &Path) -> Result<Vec<RawMetrics>> {
    let content =
        fs::read_to_string(path).context(format!("Failed to read metrics from {}", path.display()))?;

    let records = parse_metrics(&content)
        .context(format!("Failed to parse metrics from {}", path.display()))?;

    info!(path = %path.display(), records = records.len(), "Loaded metrics");
    Ok(records)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_array() {
        let records = parse_metrics(r#"[{"ticker": "KO"}, {"ticker": "MSFT", "marketCap": 3.1e12}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].market_cap, Some(3.1e12));
    }

    #[test]
    fn test_parse_single_object() {
        let records = parse_metrics(r#"{"ticker": "KO"}"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_rejects_scalar() {
        let err = parse_metrics("42").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_parse_wrong_field_types_degrade_to_unknown() {
        let json = r#"[
            {"ticker": "KO", "sector": "Consumer Defensive", "marketCap": 2.6e11},
            {"ticker": "BABA", "marketCap": "N/A"},
            {"ticker": "MSFT", "dividend_history_years": 5.0}
        ]"#;
        let records = parse_metrics(json).unwrap();

        let tickers: Vec<&str> = records.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, ["KO", "BABA", "MSFT"]);
        assert_eq!(records[0].market_cap, Some(2.6e11));
        assert!(records[1].market_cap.is_none());
        assert_eq!(records[2].dividend_history_years, Some(5));
    }

    #[test]
    fn test_parse_unreadable_record_keeps_its_slot() {
        // Both the alias and the field name set, plus a bare ticker string.
        let json = r#"[
            {"ticker": "AAPL", "marketCap": 1.0, "market_cap": 2.0, "sector": "Technology"},
            "JNJ",
            7,
            {"ticker": "PG"}
        ]"#;
        let records = parse_metrics(json).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0], RawMetrics::new("AAPL"));
        assert_eq!(records[1], RawMetrics::new("JNJ"));
        assert_eq!(records[2], RawMetrics::new("7"));
        assert_eq!(records[3].ticker, "PG");
    }

    #[test]
    fn test_parse_invalid_json_is_json_error() {
        let err = parse_metrics(r#"[{"ticker": "KO",]"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"ticker": "JNJ", "sector": "Healthcare"}}]"#).unwrap();

        let records = load_metrics(file.path()).unwrap();
        assert_eq!(records[0].sector.as_deref(), Some("Healthcare"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_metrics(Path::new("/nonexistent/metrics.json")).unwrap_err();
        assert_eq!(err.exit_code(), 74);
        assert!(err.to_string().contains("Failed to read metrics"));
    }
}
