use chrono::NaiveDate;
use rstest::rstest;
use wear_core::{
    Analyzer, Event, EventKind, LedgerEntry, Outlook, Prediction, Reading, SafetyCfg, assemble,
    extrapolate,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn event(kind: EventKind, current: NaiveDate) -> Event {
    Event {
        kind,
        replacement_date: ymd(2023, 1, 1),
        replacement_thickness_mm: 15.0,
        current_date: current,
        current_thickness_mm: 8.0,
        days_since_replacement: 0,
        wear_since_replacement_mm: 7.0,
        average_daily_wear_mm: 0.0,
        prior_measurement_date: None,
        prior_measurement_thickness_mm: None,
    }
}

fn prediction(date: Option<NaiveDate>, days: f64) -> Prediction {
    Prediction {
        predicted_date: date,
        predicted_thickness_mm: 2.0,
        days_remaining: days,
        remaining_wear_mm: 6.0,
        measured_at: ymd(2023, 6, 1),
        measured_thickness_mm: 8.0,
        replacement_date: ymd(2023, 1, 1),
        replacement_thickness_mm: 15.0,
        wear_since_replacement_mm: 7.0,
        average_daily_wear_mm: 0.046_357,
    }
}

#[rstest]
fn prediction_is_merged_by_date_and_ties_are_stable() {
    let events = vec![
        event(EventKind::Measurement, ymd(2023, 3, 1)),
        event(EventKind::Replacement, ymd(2023, 9, 1)),
        event(EventKind::Measurement, ymd(2023, 12, 1)),
    ];
    let ledger = assemble("AL", events, Some(prediction(Some(ymd(2023, 9, 1)), 92.0)));
    let kinds: Vec<_> = ledger.entries.iter().map(LedgerEntry::kind_name).collect();
    assert_eq!(
        kinds,
        vec!["Measurement", "Replacement", "Prediction", "Measurement"]
    );
}

#[rstest]
fn undated_prediction_sorts_last() {
    let events = vec![event(EventKind::Measurement, ymd(2023, 3, 1))];
    let ledger = assemble("AL", events, Some(prediction(None, f64::INFINITY)));
    assert_eq!(ledger.entries.len(), 2);
    assert!(matches!(ledger.entries[1], LedgerEntry::Prediction(_)));
    assert_eq!(ledger.summary().outlook, Outlook::Never);
}

#[rstest]
fn empty_ledger_has_no_prediction() {
    let ledger = assemble("AL", Vec::new(), None);
    assert!(ledger.entries.is_empty());
    let s = ledger.summary();
    assert_eq!(s.outlook, Outlook::NoPrediction);
    assert_eq!(s.replacements + s.measurements, 0);
    assert_eq!(s.average_daily_wear_mm, None);
}

#[rstest]
fn rows_follow_the_export_format() {
    let analyzer = Analyzer::builder().build().unwrap();
    let readings = vec![
        Reading::new("AL-313K-02", ymd(2023, 1, 1), 15.0),
        Reading::new("AL-313K-02", ymd(2023, 6, 1), 8.0),
    ];
    let analysis = analyzer.analyze("AL-313K-02", &readings).unwrap();
    let rows = analyzer.rows(&analysis);
    assert_eq!(rows.len(), 2);

    let m = &rows[0];
    assert_eq!(m.kind, "Measurement");
    assert_eq!(m.replacement_date, "01/01/2023");
    assert_eq!(m.replacement_thickness_mm, "15.0");
    assert_eq!(m.current_date, "01/06/2023");
    assert_eq!(m.current_thickness_mm, "8.0");
    assert_eq!(m.days_since_replacement, "151");
    assert_eq!(m.wear_mm, "7.0");
    assert_eq!(m.avg_daily_wear_mm, "0.046");
    assert_eq!(m.prior_measurement_date, "");
    assert_eq!(m.prior_measurement_thickness_mm, "");

    let p = &rows[1];
    assert_eq!(p.kind, "Prediction");
    assert_eq!(p.replacement_date, "08/10/2023");
    assert_eq!(p.current_date, "08/10/2023");
    assert_eq!(p.current_thickness_mm, "2.0");
    assert_eq!(p.days_since_replacement, "129");
    assert_eq!(p.wear_mm, "6.0");
    assert_eq!(p.avg_daily_wear_mm, "0.046");
    assert_eq!(p.prior_measurement_date, "01/06/2023");
    assert_eq!(p.prior_measurement_thickness_mm, "8.0");
}

#[rstest]
fn non_convergent_prediction_row() {
    let ledger = assemble("AL", Vec::new(), Some(prediction(None, f64::INFINITY)));
    let row = &ledger.to_rows("%d/%m/%Y")[0];
    assert_eq!(row.days_since_replacement, "inf");
    assert_eq!(row.current_date, "");
    assert_eq!(row.prior_measurement_date, "01/06/2023");
}

#[rstest]
fn summary_reports_monthly_wear() {
    let ledger = assemble(
        "AL",
        vec![event(EventKind::Measurement, ymd(2023, 6, 1))],
        Some(prediction(Some(ymd(2023, 10, 8)), 129.43)),
    );
    let s = ledger.summary();
    assert_eq!(s.measurements, 1);
    assert_eq!(s.last_measurement, Some((ymd(2023, 6, 1), 8.0)));
    assert!((s.monthly_wear_mm.unwrap() - 1.390_71).abs() < 1e-9);
    assert_eq!(
        s.outlook,
        Outlook::Due {
            date: ymd(2023, 10, 8),
            days_remaining: 129.43
        }
    );
}

#[rstest]
fn tiny_positive_rate_is_beyond_the_calendar() {
    let mut m = event(EventKind::Measurement, ymd(2023, 6, 1));
    m.average_daily_wear_mm = 1e-9;
    let events = vec![m];
    let p = extrapolate(&events, &SafetyCfg::default()).unwrap();
    assert!(p.days_remaining.is_finite());
    assert_eq!(p.predicted_date, None);

    let ledger = assemble("AL", events, Some(p));
    let s = ledger.summary();
    assert_eq!(s.outlook, Outlook::BeyondCalendar);
    assert_eq!(s.average_daily_wear_mm, Some(1e-9));
    assert!(matches!(ledger.entries.last(), Some(LedgerEntry::Prediction(_))));
}
