use std::collections::HashMap;

use crate::model::{Fips, GeometryRecord, MergedRecord, MetricRecord};

/// Inner join of boundaries and metric rows on the normalized FIPS code.
///
/// Output follows geometry order, then metric order within a key. Counties
/// missing on either side are dropped; duplicate keys yield one row per pair.
pub fn merge(metrics: &[MetricRecord], geometries: &[GeometryRecord]) -> Vec<MergedRecord> {
    let mut by_fips: HashMap<&Fips, Vec<&MetricRecord>> = HashMap::with_capacity(metrics.len());
    for m in metrics {
        by_fips.entry(&m.fips).or_default().push(m);
    }

    let mut out = Vec::with_capacity(geometries.len().min(metrics.len()));
    for g in geometries {
        let Some(matches) = by_fips.get(&g.fips) else {
            continue;
        };
        for m in matches {
            out.push(MergedRecord {
                fips: g.fips.clone(),
                county_name: m.county_name.clone(),
                metric_value: m.metric_value,
                state_code: g.state_code.clone(),
                boundary: g.boundary.clone(),
            });
        }
    }
    tracing::info!(
        metrics = metrics.len(),
        geometries = geometries.len(),
        merged = out.len(),
        "merged metric rows with boundaries"
    );
    out
}
