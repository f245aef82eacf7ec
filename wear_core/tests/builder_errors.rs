use rstest::rstest;
use wear_core::{Analyzer, BandCfg, BuildError, ReplacementPolicy};

fn build_error(b: wear_core::AnalyzerBuilder) -> BuildError {
    let err = b.build().expect_err("builder should reject this");
    err.downcast_ref::<BuildError>()
        .cloned()
        .expect("error should be a BuildError")
}

fn bands(min: f64, max: f64, below: f64) -> BandCfg {
    BandCfg {
        replacement_min_mm: min,
        replacement_max_mm: max,
        measurement_below_mm: below,
    }
}

#[rstest]
#[case(bands(f64::NAN, 18.0, 10.0), "band edges must be finite and >= 0")]
#[case(bands(10.0, -1.0, 10.0), "band edges must be finite and >= 0")]
#[case(bands(18.0, 10.0, 10.0), "replacement band is inverted")]
#[case(bands(10.0, 18.0, 12.0), "measurement band overlaps the replacement band")]
fn invalid_bands(#[case] b: BandCfg, #[case] msg: &str) {
    let err = build_error(Analyzer::builder().with_bands(b));
    assert!(matches!(err, BuildError::InvalidConfig(m) if m == msg), "{err}");
}

#[rstest]
#[case(-0.5, "min_safe_thickness_mm must be finite and >= 0")]
#[case(f64::INFINITY, "min_safe_thickness_mm must be finite and >= 0")]
#[case(10.0, "min_safe_thickness_mm must be below the measurement band")]
fn invalid_floor(#[case] floor: f64, #[case] msg: &str) {
    let err = build_error(Analyzer::builder().with_min_safe_thickness_mm(floor));
    assert!(err.to_string().contains(msg), "{err}");
}

#[rstest]
fn invalid_date_formats() {
    let err = build_error(Analyzer::builder().with_date_formats(Vec::new()));
    assert!(err.to_string().contains("date formats"));
    let err = build_error(Analyzer::builder().with_date_formats(vec!["%Q".into()]));
    assert!(err.to_string().contains("date formats"));
    let err = build_error(Analyzer::builder().with_output_date_format(""));
    assert!(err.to_string().contains("output date format"));
}

#[rstest]
fn defaults_build() {
    let a = Analyzer::builder().build().unwrap();
    assert_eq!(a.tracker_cfg().bands, BandCfg::default());
    assert_eq!(a.tracker_cfg().policy, ReplacementPolicy::SuppressRepeatedThickness);
    assert_eq!(a.safety_cfg().min_safe_thickness_mm, 2.0);
    assert_eq!(a.output_date_format(), "%d/%m/%Y");
}

#[rstest]
fn from_config_carries_every_section() {
    let cfg: wear_config::Config = toml::from_str(
        r#"
        [bands]
        replacement_min_mm = 20.0
        replacement_max_mm = 25.0
        measurement_below_mm = 19.0
        [safety]
        min_safe_thickness_mm = 3.5
        [policy]
        same_thickness_replacement = "emit"
        [output]
        date_format = "%Y-%m-%d"
        "#,
    )
    .unwrap();
    let a = Analyzer::from_config(&cfg).unwrap();
    assert_eq!(a.tracker_cfg().bands, bands(20.0, 25.0, 19.0));
    assert_eq!(a.tracker_cfg().policy, ReplacementPolicy::AlwaysEmit);
    assert_eq!(a.safety_cfg().min_safe_thickness_mm, 3.5);
    assert_eq!(a.output_date_format(), "%Y-%m-%d");
}
