use wheel_screener::screener::metrics::Trend;
use wheel_screener::screener::rules::Outcome;
use wheel_screener::{
    parse_metrics, PassThreshold, RawMetrics, ScoreBand, ScoringConfig, ScoringEngine,
    ScreenReport,
};

fn large_cap_software() -> RawMetrics {
    RawMetrics {
        company_name: Some("Microsoft Corporation".into()),
        sector: Some("Technology".into()),
        industry: Some("Software—Infrastructure".into()),
        country: Some("United States".into()),
        current_price: Some(415.0),
        market_cap: Some(3.1e12),
        eps_growth: Some(0.15),
        dividend_rate: Some(3.0),
        dividend_history_years: Some(5),
        dividend_consistent: Some(true),
        shares_outstanding: Some(7.4e9),
        buyback_program: Some(true),
        free_cash_flow: Some(7.0e10),
        net_margin: Some(0.36),
        return_on_equity: Some(0.40),
        interest_coverage: Some(25.0),
        debt_to_equity: Some(0.35),
        ..RawMetrics::new("MSFT")
    }
}

fn struggling_chipmaker() -> RawMetrics {
    RawMetrics {
        company_name: Some("Intel Corporation".into()),
        sector: Some("Technology".into()),
        industry: Some("Semiconductors".into()),
        country: Some("United States".into()),
        current_price: Some(21.0),
        market_cap: Some(90.0e9),
        eps_growth: Some(-0.45),
        dividend_rate: Some(0.5),
        dividend_history_years: Some(30),
        dividend_consistent: Some(false),
        shares_outstanding: Some(4.3e9),
        shares_trend: Some(Trend::Stable),
        free_cash_flow: Some(1.0e9),
        net_margin: Some(0.02),
        return_on_equity: Some(0.02),
        interest_coverage: Some(12.0),
        debt_to_equity: Some(0.45),
        ..RawMetrics::new("INTC")
    }
}

fn sector_only() -> RawMetrics {
    RawMetrics {
        sector: Some("Consumer Staples".into()),
        ..RawMetrics::new("XYZ")
    }
}

#[test]
fn test_large_cap_software_passes() {
    let result = ScoringEngine::with_defaults().score(&large_cap_software());

    assert_eq!(result.financial_score(), 7.5);
    assert_eq!(result.moat_score(), 4.5);
    assert_eq!(result.risk_deduction(), -1.0);
    assert_eq!(result.total_score(), 11.0);
    assert!(result.is_passing());
    assert_eq!(result.band(), ScoreBand::Excellent);

    let shares = result.financial_breakdown().get("Share Count").unwrap();
    assert_eq!(shares.outcome, Outcome::Partial);
    let book = result.financial_breakdown().get("Book Value").unwrap();
    assert_eq!(book.outcome, Outcome::Unknown);
}

#[test]
fn test_struggling_chipmaker_fails() {
    let result = ScoringEngine::with_defaults().score(&struggling_chipmaker());

    assert_eq!(result.financial_score(), 4.5);
    assert_eq!(result.moat_score(), 2.5);
    assert_eq!(result.risk_deduction(), -1.0);
    assert_eq!(result.total_score(), 6.0);
    assert!(!result.is_passing());
    assert_eq!(result.band(), ScoreBand::Marginal);

    let tech = result.risk_breakdown().get("Technology Risk").unwrap();
    assert_eq!(tech.outcome, Outcome::Met);
}

#[test]
fn test_sector_only_record() {
    let result = ScoringEngine::with_defaults().score(&sector_only());

    assert_eq!(result.financial_score(), 0.0);
    assert_eq!(result.moat_score(), 0.0);
    assert_eq!(result.risk_deduction(), 0.0);
    assert!(!result.is_passing());
    assert_eq!(result.financial_breakdown().unknown_criteria().len(), 9);
    assert_eq!(
        result.moat_breakdown().get("Patents/Licenses").map(|c| c.outcome),
        Some(Outcome::NotMet)
    );
}

#[test]
fn test_breakdowns_account_for_scores() {
    let result = ScoringEngine::with_defaults().score(&large_cap_software());

    assert_eq!(result.financial_breakdown().total(), result.financial_score());
    assert_eq!(result.moat_breakdown().total(), result.moat_score());
    assert_eq!(result.risk_breakdown().total(), result.risk_deduction());
    assert_eq!(result.financial_breakdown().max_total(), 9.0);
    assert_eq!(result.moat_breakdown().max_total(), 7.0);
    assert_eq!(result.risk_breakdown().max_total(), -3.0);
}

#[test]
fn test_custom_threshold_changes_classification_only() {
    let strict = ScoringEngine::new(ScoringConfig {
        pass_threshold: 12.0,
        parallel: false,
    })
    .unwrap();

    let default = ScoringEngine::with_defaults().score(&large_cap_software());
    let result = strict.score(&large_cap_software());

    assert_eq!(result.total_score(), default.total_score());
    assert!(default.is_passing());
    assert!(!result.is_passing());
    assert_eq!(result.threshold(), PassThreshold::new(12.0).unwrap());
}

#[test]
fn test_batch_from_json() {
    let json = r#"[
        {"ticker": "xyz", "sector": "Consumer Staples"},
        {"ticker": "bad", "marketCap": -1, "debt_to_equity": -0.3}
    ]"#;
    let records = parse_metrics(json).unwrap();
    let results = ScoringEngine::with_defaults().score_batch(&records);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].ticker(), "XYZ");
    assert_eq!(results[1].ticker(), "BAD");
    assert_eq!(results[1].total_score(), 0.0);
}

#[test]
fn test_batch_with_malformed_values_scores_every_record() {
    let json = r#"[
        {"ticker": "KO", "sector": "Consumer Defensive", "dividend_rate": 1.9,
         "dividend_history_years": 60, "dividend_consistent": true},
        {"ticker": "BABA", "marketCap": "N/A", "country": "China"},
        {"ticker": "MSFT", "dividend_rate": 3.0, "dividend_history_years": 5.0,
         "dividend_consistent": true, "currentPrice": "n/a"}
    ]"#;
    let records = parse_metrics(json).unwrap();
    let results = ScoringEngine::with_defaults().score_batch(&records);

    let tickers: Vec<&str> = results.iter().map(|r| r.ticker()).collect();
    assert_eq!(tickers, ["KO", "BABA", "MSFT"]);

    let baba = results[1].financial_breakdown();
    assert_eq!(baba.unknown_criteria().len(), 9);
    assert_eq!(results[1].risk_deduction(), -1.0);

    let dividend = |i: usize| {
        results[i]
            .financial_breakdown()
            .get("Dividend")
            .map(|c| c.outcome)
    };
    assert_eq!(dividend(0), Some(Outcome::Met));
    assert_eq!(dividend(2), Some(Outcome::Met));
}

#[test]
fn test_report_over_scenarios() {
    let engine = ScoringEngine::with_defaults();
    let records = vec![sector_only(), struggling_chipmaker(), large_cap_software()];
    let report = ScreenReport::new(engine.score_batch(&records), engine.threshold());

    let ranked: Vec<&str> = report.ranked().iter().map(|r| r.ticker()).collect();
    assert_eq!(ranked, ["MSFT", "INTC", "XYZ"]);
    assert_eq!(report.passing().len(), 1);
    assert!(report.budget_friendly(20.0).is_empty());
    assert_eq!(report.by_sector()["Technology"].len(), 2);
}
