//! Command bodies: load inspections, run the fleet, print and export.

use std::path::Path;

use eyre::Result;
use serde_json::{Map, Value, json};
use wear_config::{Config, CsvInspections};
use wear_core::util::{fmt_mm, format_date, round_to};
use wear_core::{
    Analyzer, EquipmentOutcome, Outlook, Summary, analyze_rows, deliver, group_by_equipment, load,
    normalize_with_stats,
};
use wear_traits::{InspectionRow, LedgerRow};

use crate::export::CsvLedgerSink;

fn load_rows(cfg: &Config, input: &Path) -> Result<Vec<InspectionRow>> {
    let mut source = CsvInspections::new(input, cfg.input.clone());
    let rows = load(&mut source)?;
    tracing::info!(rows = rows.len(), input = %input.display(), "loaded inspections");
    Ok(rows)
}

/// First failed equipment becomes the command's error; the rest are logged.
fn first_failure(outcomes: Vec<EquipmentOutcome>) -> Result<()> {
    match outcomes.into_iter().find_map(|o| o.result.err()) {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

pub fn run_analyze(cfg: &Config, input: &Path, output: Option<&Path>, json: bool) -> Result<()> {
    let analyzer = Analyzer::from_config(cfg)?;
    let rows = load_rows(cfg, input)?;
    let outcomes = analyze_rows(&analyzer, &rows, &cfg.equipment.ids, cfg.runner.workers);

    for o in &outcomes {
        let Ok(analysis) = &o.result else { continue };
        let ledger_rows = analyzer.rows(analysis);
        if json {
            for row in &ledger_rows {
                println!("{}", ledger_row_json(&o.equipment_id, row));
            }
        } else {
            print_ledger(
                &o.equipment_id,
                &ledger_rows,
                analysis.stats.kept,
                analysis.stats.dropped,
            );
        }
    }

    if let Some(path) = output {
        let mut sink = CsvLedgerSink::create(path)
            .map_err(|e| wear_core::WearError::Sink(e.to_string()))?;
        deliver(&analyzer, &outcomes, &mut sink)?;
        tracing::info!(output = %path.display(), "ledger written");
    }

    first_failure(outcomes)
}

pub fn run_predict(cfg: &Config, input: &Path, json: bool) -> Result<()> {
    let analyzer = Analyzer::from_config(cfg)?;
    let rows = load_rows(cfg, input)?;
    let outcomes = analyze_rows(&analyzer, &rows, &cfg.equipment.ids, cfg.runner.workers);

    for o in &outcomes {
        let Ok(analysis) = &o.result else { continue };
        let summary = analysis.ledger.summary();
        if json {
            println!("{}", summary_json(&summary, analyzer.output_date_format()));
        } else {
            println!("{}", summary_text(&summary, analyzer.output_date_format()));
        }
    }

    first_failure(outcomes)
}

pub fn run_check(cfg: &Config, input: &Path, json: bool) -> Result<()> {
    let analyzer = Analyzer::from_config(cfg)?;
    let rows = load_rows(cfg, input)?;
    let groups = group_by_equipment(analyzer.parse_rows(&rows), &cfg.equipment.ids);

    let per_equipment: Vec<_> = groups
        .iter()
        .map(|(id, readings)| (id, normalize_with_stats(readings, id).1))
        .collect();

    if json {
        let equipment: Vec<Value> = per_equipment
            .iter()
            .map(|(id, s)| {
                json!({
                    "equipment_id": id,
                    "kept": s.kept,
                    "dropped": s.dropped,
                    "days": s.days,
                })
            })
            .collect();
        println!("{}", json!({ "rows": rows.len(), "equipment": equipment }));
    } else {
        println!("Config OK; input headers OK.");
        println!("Rows: {}", rows.len());
        println!("Equipment: {}", per_equipment.len());
        for (id, s) in &per_equipment {
            println!(
                "  {id}: {} usable, {} dropped, {} inspection days",
                s.kept, s.dropped, s.days
            );
        }
    }
    Ok(())
}

fn ledger_row_json(equipment_id: &str, row: &LedgerRow) -> Value {
    let mut obj = Map::new();
    obj.insert("equipment_id".into(), Value::from(equipment_id));
    for (key, cell) in LedgerRow::HEADERS.iter().zip(row.cells()) {
        obj.insert((*key).into(), Value::from(cell));
    }
    Value::Object(obj)
}

fn print_ledger(equipment_id: &str, rows: &[LedgerRow], kept: usize, dropped: usize) {
    println!("== {equipment_id} ({kept} readings, {dropped} dropped) ==");
    if rows.is_empty() {
        println!("  no replacement or measurement events");
        return;
    }
    println!(
        "  {:<12} {:<12} {:>7} {:<12} {:>7} {:>5} {:>7} {:>8} {:<12} {:>7}",
        "kind", "replaced", "mm", "current", "mm", "days", "wear", "mm/day", "prior", "mm"
    );
    for r in rows {
        println!(
            "  {:<12} {:<12} {:>7} {:<12} {:>7} {:>5} {:>7} {:>8} {:<12} {:>7}",
            r.kind,
            r.replacement_date,
            r.replacement_thickness_mm,
            r.current_date,
            r.current_thickness_mm,
            r.days_since_replacement,
            r.wear_mm,
            r.avg_daily_wear_mm,
            r.prior_measurement_date,
            r.prior_measurement_thickness_mm,
        );
    }
}

fn summary_text(s: &Summary, date_format: &str) -> String {
    let mut out = format!("{}:", s.equipment_id);
    if let Some((date, mm)) = s.last_measurement {
        out.push_str(&format!(
            " last measurement {} at {} mm;",
            format_date(date, date_format),
            fmt_mm(mm)
        ));
    }
    if let (Some(daily), Some(monthly)) = (s.average_daily_wear_mm, s.monthly_wear_mm) {
        out.push_str(&format!(
            " avg daily wear {} mm; monthly wear {} mm;",
            fmt_mm(round_to(daily, 3)),
            fmt_mm(round_to(monthly, 3))
        ));
    }
    let floor = s.min_safe_thickness_mm.map(fmt_mm).unwrap_or_default();
    match s.outlook {
        Outlook::NoPrediction => out.push_str(" no prediction available"),
        Outlook::Never => out.push_str(&format!(" never reaches {floor} mm at the current rate")),
        Outlook::BeyondCalendar => out.push_str(" reaches the floor beyond the calendar range"),
        Outlook::Due {
            date,
            days_remaining,
        } => out.push_str(&format!(
            " predicted {} at {floor} mm ({} days remaining)",
            format_date(date, date_format),
            days_remaining.round()
        )),
    }
    out
}

fn summary_json(s: &Summary, date_format: &str) -> Value {
    let (outlook, predicted_date, days_remaining) = match s.outlook {
        Outlook::NoPrediction => ("no_prediction", None, None),
        Outlook::Never => ("never", None, None),
        Outlook::BeyondCalendar => ("beyond_calendar", None, None),
        Outlook::Due {
            date,
            days_remaining,
        } => ("due", Some(format_date(date, date_format)), Some(days_remaining)),
    };
    json!({
        "equipment_id": s.equipment_id,
        "replacements": s.replacements,
        "measurements": s.measurements,
        "last_measurement_date": s.last_measurement.map(|(d, _)| format_date(d, date_format)),
        "last_measurement_mm": s.last_measurement.map(|(_, mm)| mm),
        "avg_daily_wear_mm": s.average_daily_wear_mm,
        "monthly_wear_mm": s.monthly_wear_mm,
        "min_safe_thickness_mm": s.min_safe_thickness_mm,
        "outlook": outlook,
        "predicted_date": predicted_date,
        "days_remaining": days_remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wear_core::{Reading, assemble};

    fn ymd(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scenario_a_summary() -> Summary {
        let analyzer = Analyzer::builder().build().unwrap();
        let readings = vec![
            Reading::new("AL-313K-02", ymd(2023, 1, 1), 15.0),
            Reading::new("AL-313K-02", ymd(2023, 6, 1), 8.0),
        ];
        analyzer
            .analyze("AL-313K-02", &readings)
            .unwrap()
            .ledger
            .summary()
    }

    #[test]
    fn summary_text_reports_monthly_wear_and_date() {
        let text = summary_text(&scenario_a_summary(), "%d/%m/%Y");
        assert!(text.contains("last measurement 01/06/2023 at 8.0 mm"), "{text}");
        assert!(text.contains("monthly wear 1.391 mm"), "{text}");
        assert!(text.contains("predicted 08/10/2023 at 2.0 mm (129 days remaining)"), "{text}");
    }

    #[test]
    fn summary_without_measurement() {
        let s = assemble("EP", Vec::new(), None).summary();
        assert_eq!(summary_text(&s, "%d/%m/%Y"), "EP: no prediction available");
        let v = summary_json(&s, "%d/%m/%Y");
        assert_eq!(v["outlook"], "no_prediction");
        assert!(v["predicted_date"].is_null());
    }

    #[test]
    fn summary_beyond_calendar() {
        let analyzer = Analyzer::builder().build().unwrap();
        // 6 mm left at about 1 nm per day.
        let readings = vec![
            Reading::new("AL", ymd(2023, 1, 1), 15.0),
            Reading::new("AL", ymd(2023, 6, 1), 8.0),
        ];
        let analysis = analyzer.analyze("AL", &readings).unwrap();
        let mut events = analysis.ledger.events().cloned().collect::<Vec<_>>();
        events.last_mut().unwrap().average_daily_wear_mm = 1e-9;
        let p = wear_core::extrapolate(&events, &wear_core::SafetyCfg::default());
        let s = assemble("AL", events, p).summary();

        let text = summary_text(&s, "%d/%m/%Y");
        assert!(text.ends_with("reaches the floor beyond the calendar range"), "{text}");
        let v = summary_json(&s, "%d/%m/%Y");
        assert_eq!(v["outlook"], "beyond_calendar");
        assert!(v["predicted_date"].is_null());
        assert!(v["days_remaining"].is_null());
    }

    #[test]
    fn ledger_row_json_uses_export_keys() {
        let row = LedgerRow {
            kind: "Measurement".into(),
            wear_mm: "7.0".into(),
            ..LedgerRow::default()
        };
        let v = ledger_row_json("AL", &row);
        assert_eq!(v["equipment_id"], "AL");
        assert_eq!(v["wear_mm"], "7.0");
        assert_eq!(v["kind"], "Measurement");
        assert_eq!(v.as_object().unwrap().len(), 11);
    }
}
