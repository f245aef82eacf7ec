//! Multi-equipment orchestration: load, analyse in parallel, deliver in order.
//!
//! Each equipment gets its own scan on a worker thread with no shared mutable
//! state. Results are gathered over a channel and put back in equipment-id
//! order, so a sink always receives whole, uninterleaved ledgers.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use crossbeam_channel::unbounded;
use wear_traits::{InspectionRow, InspectionSource, LedgerSink};

use crate::analyzer::{Analysis, Analyzer};
use crate::error::WearError;
use crate::types::Reading;

/// Outcome for one equipment id.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentOutcome {
    pub equipment_id: String,
    pub result: Result<Analysis, WearError>,
}

/// Pull every row from a source.
pub fn load(source: &mut dyn InspectionSource) -> Result<Vec<InspectionRow>, WearError> {
    source.rows().map_err(|e| WearError::Source(e.to_string()))
}

/// Group readings by equipment id (sorted), optionally restricted to `ids`.
/// Requested ids with no readings still get an (empty) group.
pub fn group_by_equipment(
    readings: Vec<Reading>,
    ids: &[String],
) -> BTreeMap<String, Vec<Reading>> {
    let mut groups: BTreeMap<String, Vec<Reading>> =
        ids.iter().map(|id| (id.clone(), Vec::new())).collect();
    for r in readings {
        if ids.is_empty() || groups.contains_key(&r.equipment_id) {
            groups.entry(r.equipment_id.clone()).or_default().push(r);
        }
    }
    groups
}

/// Resolve a configured worker count (0 = available parallelism).
pub fn worker_count(configured: usize, jobs: usize) -> usize {
    let wanted = if configured == 0 {
        std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
    } else {
        configured
    };
    wanted.min(jobs).max(1)
}

/// Analyse every group on up to `workers` threads. Output is in group order.
pub fn run_fleet(
    analyzer: &Analyzer,
    groups: BTreeMap<String, Vec<Reading>>,
    workers: usize,
) -> Vec<EquipmentOutcome> {
    let jobs = groups.len();
    if jobs == 0 {
        return Vec::new();
    }
    let workers = worker_count(workers, jobs);
    tracing::debug!(jobs, workers, "analysing fleet");

    let (job_tx, job_rx) = unbounded::<(usize, String, Vec<Reading>)>();
    let (out_tx, out_rx) = unbounded::<(usize, EquipmentOutcome)>();
    for (idx, (id, readings)) in groups.into_iter().enumerate() {
        // Receiver is alive until the scope below ends.
        let _ = job_tx.send((idx, id, readings));
    }
    drop(job_tx);

    std::thread::scope(|s| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let out_tx = out_tx.clone();
            s.spawn(move || {
                for (idx, id, readings) in job_rx.iter() {
                    let result = analyzer.analyze(&id, &readings);
                    if let Err(e) = &result {
                        tracing::error!(equipment_id = %id, error = %e, "analysis failed");
                    }
                    let _ = out_tx.send((
                        idx,
                        EquipmentOutcome {
                            equipment_id: id,
                            result,
                        },
                    ));
                }
            });
        }
    });
    drop(out_tx);

    let mut slots: Vec<Option<EquipmentOutcome>> = vec![None; jobs];
    for (idx, outcome) in out_rx.iter() {
        slots[idx] = Some(outcome);
    }
    slots.into_iter().flatten().collect()
}

/// Convenience: parse rows, group, and analyse.
pub fn analyze_rows(
    analyzer: &Analyzer,
    rows: &[InspectionRow],
    ids: &[String],
    workers: usize,
) -> Vec<EquipmentOutcome> {
    let readings = analyzer.parse_rows(rows);
    run_fleet(analyzer, group_by_equipment(readings, ids), workers)
}

/// Write every successful ledger to the sink, in outcome order, then finish it.
pub fn deliver(
    analyzer: &Analyzer,
    outcomes: &[EquipmentOutcome],
    sink: &mut dyn LedgerSink,
) -> Result<(), WearError> {
    for o in outcomes {
        if let Ok(analysis) = &o.result {
            sink.write_ledger(&o.equipment_id, &analyzer.rows(analysis))
                .map_err(|e| WearError::Sink(e.to_string()))?;
        }
    }
    sink.finish().map_err(|e| WearError::Sink(e.to_string()))
}
