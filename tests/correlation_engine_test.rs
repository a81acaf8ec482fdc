use chrono::NaiveDate;
use newscorr::application::alignment::{DailySentiment, align_to_next_trading_day};
use newscorr::application::engine::CorrelationEngine;
use newscorr::domain::correlation::{Interpretation, InterpretationMode};
use newscorr::domain::market::{DailyReturnSeries, TradingDayIndex};
use newscorr::domain::news::{NewsRecord, TimestampParser};
use std::collections::HashMap;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Looks headlines up in a fixed polarity table; unknown text is neutral.
fn table_engine(table: &[(&str, f64)], mode: InterpretationMode) -> CorrelationEngine {
    let table: HashMap<String, f64> = table.iter().map(|(t, s)| (t.to_string(), *s)).collect();
    CorrelationEngine::new(
        Box::new(move |text: &str| table.get(text).copied().unwrap_or(0.0)),
        mode,
    )
}

fn series(rows: &[(&str, Option<f64>)]) -> DailyReturnSeries {
    rows.iter().map(|(d, r)| (date(d), *r)).collect()
}

#[test]
fn test_single_headline_is_undefined() {
    let engine = table_engine(&[("great earnings", 0.8)], InterpretationMode::Explicit);
    let news = vec![NewsRecord::new(
        "AAPL",
        Some(date("2024-01-02")),
        Some("great earnings"),
    )];
    let returns = series(&[("2024-01-02", None), ("2024-01-03", Some(0.01))]);

    let analysis = engine.compute_correlation(&news, &returns, "AAPL").unwrap();

    assert_eq!(analysis.joined_rows.len(), 1);
    assert_eq!(analysis.joined_rows[0].date, date("2024-01-03"));
    assert_eq!(analysis.joined_rows[0].avg_daily_sentiment, 0.8);
    assert_eq!(analysis.joined_rows[0].daily_return, 0.01);
    assert_eq!(analysis.result.coefficient, None);
    assert_eq!(analysis.result.sample_size, 1);
    assert!(analysis.result.low_confidence);
    assert_eq!(analysis.result.interpretation, Interpretation::Undefined);
}

#[test]
fn test_single_headline_legacy_label() {
    let engine = table_engine(&[("great earnings", 0.8)], InterpretationMode::Legacy);
    let news = vec![NewsRecord::new(
        "AAPL",
        Some(date("2024-01-02")),
        Some("great earnings"),
    )];
    let returns = series(&[("2024-01-02", None), ("2024-01-03", Some(0.01))]);

    let analysis = engine.compute_correlation(&news, &returns, "AAPL").unwrap();
    assert_eq!(analysis.result.coefficient, None);
    assert_eq!(analysis.result.interpretation.to_string(), "Strong Negative");
}

#[test]
fn test_same_day_headlines_are_averaged() {
    let engine = table_engine(&[("beat", 0.4), ("miss", -0.2)], InterpretationMode::Explicit);
    let news = vec![
        NewsRecord::new("MSFT", Some(date("2024-01-02")), Some("beat")),
        NewsRecord::new("MSFT", Some(date("2024-01-02")), Some("miss")),
    ];
    let returns = series(&[("2024-01-02", None), ("2024-01-03", Some(0.02))]);

    let analysis = engine.compute_correlation(&news, &returns, "MSFT").unwrap();
    let row = &analysis.joined_rows[0];
    assert!((row.avg_daily_sentiment - 0.1).abs() < 1e-12);
    assert_eq!(row.article_count, 2);
}

#[test]
fn test_unparseable_date_is_excluded() {
    let parser = TimestampParser::default();
    let engine = table_engine(&[("up", 0.6), ("down", -0.9)], InterpretationMode::Explicit);
    let news = vec![
        NewsRecord::from_raw("NVDA", "2024-01-02", Some("up"), &parser),
        NewsRecord::from_raw("NVDA", "not-a-date", Some("down"), &parser),
    ];
    let returns = series(&[("2024-01-02", None), ("2024-01-03", Some(0.03))]);

    let analysis = engine.compute_correlation(&news, &returns, "NVDA").unwrap();
    assert_eq!(analysis.stats.records_in, 2);
    assert_eq!(analysis.stats.unparsed_dates, 1);
    assert_eq!(analysis.joined_rows.len(), 1);
    assert_eq!(analysis.joined_rows[0].avg_daily_sentiment, 0.6);
}

#[test]
fn test_alignment_is_strictly_after_publication() {
    let days = TradingDayIndex::new(vec![
        date("2024-01-02"),
        date("2024-01-03"),
        date("2024-01-05"),
    ]);
    let scored = vec![
        (date("2024-01-03"), 0.5),
        (date("2024-01-01"), 0.1),
        (date("2024-01-04"), -0.3),
        (date("2024-01-05"), 0.9),
    ];

    let (aligned, dropped) = align_to_next_trading_day(&scored, &days);

    assert_eq!(dropped, 1);
    for a in &aligned {
        assert!(a.trading_date > a.published);
    }
    let by_published: HashMap<NaiveDate, NaiveDate> =
        aligned.iter().map(|a| (a.published, a.trading_date)).collect();
    assert_eq!(by_published[&date("2024-01-03")], date("2024-01-05"));
    assert_eq!(by_published[&date("2024-01-01")], date("2024-01-02"));
    assert_eq!(by_published[&date("2024-01-04")], date("2024-01-05"));
}

#[test]
fn test_daily_mean_covers_exactly_aligned_records() {
    let days = TradingDayIndex::new(vec![date("2024-01-02"), date("2024-01-05")]);
    let scored = vec![
        (date("2024-01-02"), 0.2),
        (date("2024-01-03"), 0.4),
        (date("2024-01-04"), 0.9),
        (date("2024-01-01"), -0.5),
    ];
    let (aligned, _) = align_to_next_trading_day(&scored, &days);
    let daily = DailySentiment::aggregate(&aligned);

    let friday = daily.get(date("2024-01-05")).unwrap();
    assert_eq!(friday.count, 3);
    assert!((friday.mean - 0.5).abs() < 1e-12);
    assert_eq!(daily.get(date("2024-01-02")).unwrap().mean, -0.5);
}

#[test]
fn test_join_only_keeps_dates_on_both_sides() {
    let engine = table_engine(&[("a", 0.3), ("b", -0.1), ("c", 0.7)], InterpretationMode::Explicit);
    let news = vec![
        NewsRecord::new("AMZN", Some(date("2024-01-01")), Some("a")),
        NewsRecord::new("AMZN", Some(date("2024-01-02")), Some("b")),
        NewsRecord::new("AMZN", Some(date("2024-01-04")), Some("c")),
    ];
    // 2024-01-03 has no return, so the "b" day drops out of the join
    let returns = series(&[
        ("2024-01-01", None),
        ("2024-01-02", Some(0.01)),
        ("2024-01-03", None),
        ("2024-01-04", Some(-0.02)),
        ("2024-01-05", Some(0.015)),
    ]);

    let analysis = engine.compute_correlation(&news, &returns, "AMZN").unwrap();
    let dates: Vec<NaiveDate> = analysis.joined_rows.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![date("2024-01-02"), date("2024-01-05")]);
    for row in &analysis.joined_rows {
        assert!(returns.get(row.date).is_some());
    }
    assert_eq!(analysis.stats.sentiment_days, 3);
    assert_eq!(analysis.stats.joined_days, 2);
    // Two pairs always correlate perfectly
    assert!((analysis.result.coefficient.unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn test_constant_sentiment_is_undefined() {
    let engine = table_engine(&[], InterpretationMode::Explicit);
    let news = vec![
        NewsRecord::new("GOOG", Some(date("2024-01-01")), Some("x")),
        NewsRecord::new("GOOG", Some(date("2024-01-02")), Some("y")),
        NewsRecord::new("GOOG", Some(date("2024-01-03")), Some("z")),
    ];
    let returns = series(&[
        ("2024-01-01", None),
        ("2024-01-02", Some(0.01)),
        ("2024-01-03", Some(-0.01)),
        ("2024-01-04", Some(0.02)),
    ]);

    let analysis = engine.compute_correlation(&news, &returns, "GOOG").unwrap();
    assert_eq!(analysis.result.sample_size, 3);
    assert_eq!(analysis.result.coefficient, None);
    assert!(analysis.result.low_confidence);
}

#[test]
fn test_negative_relationship_is_labelled() {
    let engine = table_engine(
        &[("s1", 0.9), ("s2", 0.1), ("s3", -0.5), ("s4", 0.4)],
        InterpretationMode::Explicit,
    );
    let news = vec![
        NewsRecord::new("META", Some(date("2024-01-01")), Some("s1")),
        NewsRecord::new("META", Some(date("2024-01-02")), Some("s2")),
        NewsRecord::new("META", Some(date("2024-01-03")), Some("s3")),
        NewsRecord::new("META", Some(date("2024-01-04")), Some("s4")),
    ];
    let returns = series(&[
        ("2024-01-01", None),
        ("2024-01-02", Some(-0.018)),
        ("2024-01-03", Some(-0.002)),
        ("2024-01-04", Some(0.010)),
        ("2024-01-05", Some(-0.008)),
    ]);

    let analysis = engine.compute_correlation(&news, &returns, "META").unwrap();
    let coefficient = analysis.result.coefficient.unwrap();
    assert!((coefficient + 1.0).abs() < 1e-9);
    assert_eq!(analysis.result.interpretation, Interpretation::ModerateNegative);
    assert_eq!(
        Interpretation::classify(Some(-1.0), InterpretationMode::Legacy),
        Interpretation::ModerateNegative
    );
}
