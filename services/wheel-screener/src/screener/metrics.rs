//! Per-company metric records.
//!
//! [`RawMetrics`] is what the market-data layer hands over: every field is
//! optional and absent means unknown, never zero. [`NormalizedMetrics`] is
//! the same record after validation, with categorical strings resolved into
//! [`Category`] values ready for set-membership matching.

use serde::{Deserialize, Serialize};

// ============================================================================
// Trend
// ============================================================================

/// Direction of a multi-period series (share count, book value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    #[serde(alias = "growing", alias = "up")]
    Increasing,
    #[serde(alias = "flat")]
    Stable,
    #[serde(alias = "declining", alias = "down")]
    Decreasing,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increasing => write!(f, "increasing"),
            Self::Stable => write!(f, "stable"),
            Self::Decreasing => write!(f, "decreasing"),
        }
    }
}

// ============================================================================
// Raw Metrics
// ============================================================================

/// One company's metrics as supplied by the market-data layer.
///
/// Ratios are fractions (`0.15` is 15%), debt/equity is a plain ratio
/// (`0.35`), money amounts are in the listing currency. A handful of fields
/// also accept the camelCase keys common in quote-provider payloads.
///
/// Deserializing never fails on a field value: placeholders such as `"N/A"`,
/// nulls and wrong-typed values all read as unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMetrics {
    #[serde(deserialize_with = "lenient::ticker")]
    pub ticker: String,
    #[serde(alias = "longName")]
    #[serde(deserialize_with = "lenient::text")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub sector: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub industry: Option<String>,
    /// Country of domicile
    #[serde(deserialize_with = "lenient::text")]
    pub country: Option<String>,
    #[serde(alias = "currentPrice")]
    #[serde(deserialize_with = "lenient::number")]
    pub current_price: Option<f64>,
    #[serde(alias = "marketCap")]
    #[serde(deserialize_with = "lenient::number")]
    pub market_cap: Option<f64>,

    /// Recent EPS growth rate
    #[serde(alias = "earningsGrowth")]
    #[serde(deserialize_with = "lenient::number")]
    pub eps_growth: Option<f64>,
    /// Whether the 10-year EPS trend is judged stable
    #[serde(deserialize_with = "lenient::flag")]
    pub eps_stable_history: Option<bool>,

    /// Annual dividend per share
    #[serde(alias = "dividendRate")]
    #[serde(deserialize_with = "lenient::number")]
    pub dividend_rate: Option<f64>,
    /// Number of years the company has paid a dividend
    #[serde(deserialize_with = "lenient::count")]
    pub dividend_history_years: Option<u32>,
    /// Payments uninterrupted and never cut over that history
    #[serde(deserialize_with = "lenient::flag")]
    pub dividend_consistent: Option<bool>,
    #[serde(alias = "dividendYield")]
    #[serde(deserialize_with = "lenient::number")]
    pub dividend_yield: Option<f64>,

    #[serde(alias = "sharesOutstanding")]
    #[serde(deserialize_with = "lenient::number")]
    pub shares_outstanding: Option<f64>,
    #[serde(deserialize_with = "lenient::trend")]
    pub shares_trend: Option<Trend>,
    /// An active share repurchase programme is known
    #[serde(deserialize_with = "lenient::flag")]
    pub buyback_program: Option<bool>,

    #[serde(alias = "bookValue")]
    #[serde(deserialize_with = "lenient::number")]
    pub book_value_per_share: Option<f64>,
    #[serde(deserialize_with = "lenient::trend")]
    pub book_value_trend: Option<Trend>,

    #[serde(alias = "freeCashflow")]
    #[serde(deserialize_with = "lenient::number")]
    pub free_cash_flow: Option<f64>,

    #[serde(alias = "profitMargins")]
    #[serde(deserialize_with = "lenient::number")]
    pub net_margin: Option<f64>,
    #[serde(deserialize_with = "lenient::flag")]
    pub net_margin_stable: Option<bool>,

    #[serde(alias = "returnOnEquity")]
    #[serde(deserialize_with = "lenient::number")]
    pub return_on_equity: Option<f64>,

    /// EBIT divided by interest expense
    #[serde(deserialize_with = "lenient::number")]
    pub interest_coverage: Option<f64>,
    #[serde(alias = "totalDebt")]
    #[serde(deserialize_with = "lenient::number")]
    pub total_debt: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub debt_to_equity: Option<f64>,

    #[serde(deserialize_with = "lenient::number")]
    pub beta: Option<f64>,
}

impl RawMetrics {
    /// Record with only a ticker; every metric unknown.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }
}

/// Field deserializers that read any JSON value and keep only what fits.
///
/// Quote feeds mix `"N/A"`, nulls, numeric strings and floats where counts
/// belong. A value that cannot be read becomes `None` and is logged at
/// debug; it never fails the record.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use tracing::debug;

    use super::Trend;

    fn discard<T>(kind: &str, value: &Value) -> Option<T> {
        debug!(expected = kind, value = %value, "Discarding malformed field value");
        None
    }

    fn read_number(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn ticker<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => discard::<String>("ticker", &other).unwrap_or_default(),
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => discard("text", &other),
        })
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            other => read_number(&other).or_else(|| discard("number", &other)),
        })
    }

    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            other => read_number(&other)
                .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(n))
                .map(|n| n as u32)
                .or_else(|| discard("count", &other)),
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::Bool(b) => Some(b),
            Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Some(false),
            other => discard("flag", &other),
        })
    }

    pub fn trend<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Trend>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::String(s) => serde_json::from_value(Value::String(s.trim().to_lowercase()))
                .ok()
                .or_else(|| discard("trend", &Value::String(s))),
            other => discard("trend", &other),
        })
    }
}

// ============================================================================
// Category
// ============================================================================

/// Placeholder strings that upstream feeds use for "no value".
const PLACEHOLDERS: &[&str] = &["n a", "na", "none", "null", "unknown", "nan"];

/// A case-normalized categorical value (sector, industry, country).
///
/// Keeps the trimmed display label for output and a lower-cased token list
/// for matching. Punctuation, ampersands and unicode dashes are separators,
/// so `"Software—Infrastructure"` tokenizes to `["software", "infrastructure"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    label: String,
    key: String,
    tokens: Vec<String>,
}

impl Category {
    /// Parse a raw string; blank or placeholder strings are unknown.
    pub fn parse(raw: &str) -> Option<Self> {
        let label = raw.trim();
        if label.is_empty() {
            return None;
        }

        let folded: String = label
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect::<String>()
            .to_lowercase();

        let tokens: Vec<String> = folded.split_whitespace().map(str::to_string).collect();
        let key = tokens.join(" ");
        if tokens.is_empty() || PLACEHOLDERS.contains(&key.as_str()) {
            return None;
        }

        Some(Self {
            label: label.to_string(),
            key,
            tokens,
        })
    }

    /// Trimmed input text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Lower-cased, single-spaced matching key.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

// ============================================================================
// Normalized Metrics
// ============================================================================

/// A validated metrics record. `None` always means unknown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedMetrics {
    pub ticker: String,
    pub company_name: Option<String>,
    pub sector: Option<Category>,
    pub industry: Option<Category>,
    pub country: Option<Category>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,

    pub eps_growth: Option<f64>,
    pub eps_stable_history: Option<bool>,

    pub dividend_rate: Option<f64>,
    pub dividend_history_years: Option<u32>,
    pub dividend_consistent: Option<bool>,
    pub dividend_yield: Option<f64>,

    pub shares_outstanding: Option<f64>,
    pub shares_trend: Option<Trend>,
    pub buyback_program: Option<bool>,

    pub book_value_per_share: Option<f64>,
    pub book_value_trend: Option<Trend>,

    pub free_cash_flow: Option<f64>,

    pub net_margin: Option<f64>,
    pub net_margin_stable: Option<bool>,

    pub return_on_equity: Option<f64>,

    pub interest_coverage: Option<f64>,
    pub total_debt: Option<f64>,
    pub debt_to_equity: Option<f64>,

    pub beta: Option<f64>,
}

impl NormalizedMetrics {
    /// Number of metric fields that resolved to a value.
    pub fn known_fields(&self) -> usize {
        let numbers = [
            self.current_price,
            self.market_cap,
            self.eps_growth,
            self.dividend_rate,
            self.dividend_yield,
            self.shares_outstanding,
            self.book_value_per_share,
            self.free_cash_flow,
            self.net_margin,
            self.return_on_equity,
            self.interest_coverage,
            self.total_debt,
            self.debt_to_equity,
            self.beta,
        ];
        let flags = [
            self.eps_stable_history,
            self.dividend_consistent,
            self.buyback_program,
            self.net_margin_stable,
        ];
        let categories = [&self.sector, &self.industry, &self.country];

        numbers.iter().filter(|v| v.is_some()).count()
            + flags.iter().filter(|v| v.is_some()).count()
            + categories.iter().filter(|v| v.is_some()).count()
            + usize::from(self.company_name.is_some())
            + usize::from(self.dividend_history_years.is_some())
            + usize::from(self.shares_trend.is_some())
            + usize::from(self.book_value_trend.is_some())
    }
}
