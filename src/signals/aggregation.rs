//! Snapshot building and latest/previous aggregation

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::indicators::{IndicatorValue, MultiIndicatorSnapshot};

/// Group named indicator streams into per-timestamp snapshots, oldest first.
///
/// Each stream is keyed by the name it should carry in the snapshot (its
/// `IndicatorConfig.name`). When a stream has several values at one
/// instant, the last one wins.
pub fn build_snapshots(outputs: &[(String, Vec<IndicatorValue>)]) -> Vec<MultiIndicatorSnapshot> {
    let mut by_timestamp: BTreeMap<DateTime<Utc>, BTreeMap<String, f64>> = BTreeMap::new();

    for (name, values) in outputs {
        for value in values.iter().filter(|v| v.value.is_finite()) {
            by_timestamp
                .entry(value.timestamp)
                .or_default()
                .insert(name.clone(), value.value);
        }
    }

    debug!(
        streams = outputs.len(),
        snapshots = by_timestamp.len(),
        "Built indicator snapshots"
    );

    by_timestamp
        .into_iter()
        .map(|(timestamp, values)| MultiIndicatorSnapshot::new(timestamp, values))
        .collect()
}

/// Fold snapshots into one, tracking the running maximum timestamp.
///
/// A key takes its first value on first sight and is overwritten by any
/// later snapshot stamped at or after the running maximum.
fn aggregate(snapshots: &[MultiIndicatorSnapshot]) -> MultiIndicatorSnapshot {
    let mut values: BTreeMap<String, f64> = BTreeMap::new();
    let mut target: Option<DateTime<Utc>> = None;

    for snapshot in snapshots {
        let current = snapshot.timestamp;
        let max = match target {
            Some(t) if t >= current => t,
            _ => current,
        };
        target = Some(max);

        for (name, &value) in &snapshot.values {
            match values.get_mut(name) {
                None => {
                    values.insert(name.clone(), value);
                }
                Some(slot) if current >= max => *slot = value,
                Some(_) => {}
            }
        }
    }

    MultiIndicatorSnapshot::new(target.unwrap_or_else(Utc::now), values)
}

/// Most recent value per indicator across all snapshots.
///
/// The result is stamped with the maximum input timestamp, or the current
/// time when there is no input.
pub fn aggregate_latest(snapshots: &[MultiIndicatorSnapshot]) -> MultiIndicatorSnapshot {
    let latest = aggregate(snapshots);
    debug!(indicators = latest.values.len(), "Aggregated latest values");
    latest
}

/// Same rule applied to every snapshot but the last; `None` with fewer than two.
pub fn aggregate_previous(snapshots: &[MultiIndicatorSnapshot]) -> Option<MultiIndicatorSnapshot> {
    if snapshots.len() < 2 {
        return None;
    }
    let previous = aggregate(&snapshots[..snapshots.len() - 1]);
    debug!(indicators = previous.values.len(), "Aggregated previous values");
    Some(previous)
}
