use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use wear_core::error::WearError;
use wear_core::{Analyzer, NormalizedReading, Reading, TrackerCfg, normalize, track};

const ID: &str = "AL-313K-02";

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
}

prop_compose! {
    // Unordered bag of readings over ~3 years; thickness in tenths of a mm
    // across all three bands, with frequent same-day collisions.
    fn readings_strategy()(
        raw in prop::collection::vec((0u64..1000, 0u32..250), 0..80),
    ) -> Vec<Reading> {
        raw.into_iter()
            .map(|(day, tenths)| {
                Reading::new(ID, base() + Days::new(day), f64::from(tenths) / 10.0)
            })
            .collect()
    }
}

proptest! {
    #[test]
    fn pipeline_is_deterministic(readings in readings_strategy()) {
        let analyzer = Analyzer::builder().build().unwrap();
        let a = analyzer.analyze(ID, &readings).unwrap();
        let b = analyzer.analyze(ID, &readings).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(analyzer.rows(&a), analyzer.rows(&b));
    }

    #[test]
    fn normalized_output_is_strictly_increasing(readings in readings_strategy()) {
        let out = normalize(&readings, ID);
        for w in out.windows(2) {
            prop_assert!(w[0].inspected_at < w[1].inspected_at);
        }
    }

    #[test]
    fn dedup_is_idempotent(readings in readings_strategy()) {
        let once = normalize(&readings, ID);
        let again: Vec<Reading> = once
            .iter()
            .map(|n| Reading::new(ID, n.inspected_at, n.thickness_mm))
            .collect();
        prop_assert_eq!(normalize(&again, ID), once);
    }

    #[test]
    fn event_dates_are_monotonic_and_days_consistent(readings in readings_strategy()) {
        let normalized = normalize(&readings, ID);
        let events = track(ID, &normalized, &TrackerCfg::default()).unwrap();
        for w in events.windows(2) {
            prop_assert!(w[0].current_date <= w[1].current_date);
        }
        for e in &events {
            prop_assert!(e.current_date >= e.replacement_date);
            let days = (e.current_date - e.replacement_date).num_days();
            prop_assert_eq!(i64::from(e.days_since_replacement), days);
        }
    }

    #[test]
    fn reversed_input_is_an_ordering_violation(
        first in 0u64..500,
        gap in 1u64..500,
        t1 in 0u32..250,
        t2 in 0u32..250,
    ) {
        let later = NormalizedReading {
            inspected_at: base() + Days::new(first + gap),
            thickness_mm: f64::from(t1) / 10.0,
        };
        let earlier = NormalizedReading {
            inspected_at: base() + Days::new(first),
            thickness_mm: f64::from(t2) / 10.0,
        };
        let err = track(ID, &[later, earlier], &TrackerCfg::default()).unwrap_err();
        let is_ordering_violation = matches!(err, WearError::OrderingViolation { .. });
        prop_assert!(is_ordering_violation);
    }
}
