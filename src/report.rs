//! Per-owner report assembly.
//!
//! Groups attributed samples into one [`SampleTree`] per owner, prunes each
//! tree to the configured display budget, and renders the combined report:
//! a total line, then each owner in descending total sample weight with its
//! percentage, estimated capacity, and directory breakdown.

use crate::error::ReportError;
use crate::format::CapacityFormatter;
use crate::sampling::OwnedSample;
use crate::tree::prune::prune;
use crate::tree::render::render;
use crate::tree::SampleTree;
use std::collections::BTreeMap;
use tracing::debug;

/// Indent under which every owner tree is rendered.
const TREE_INDENT: &str = "    ";

/// Display budget and significance threshold applied to each owner's tree.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Maximum number of leaves to show per owner.
    pub max_leaves: usize,
    /// Leaves at or below this sample count are collapsed as statistically
    /// insignificant.
    pub min_weight: u64,
    /// When set, capacities print as monthly dollar costs at this $/TB rate.
    pub dollars_per_terabyte: Option<f64>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            max_leaves: 30,
            min_weight: 5,
            dollars_per_terabyte: None,
        }
    }
}

/// Build the full multi-owner report text.
///
/// `total_samples` is the number of samples requested (the scaling
/// denominator) and `total_capacity` the true byte count under the sampled
/// path. Owners with equal weight order by name ascending, so output is
/// deterministic for a given sample set.
pub fn build_report(
    samples: &[OwnedSample],
    total_samples: u64,
    total_capacity: u64,
    options: &ReportOptions,
) -> Result<String, ReportError> {
    let mut owners: BTreeMap<String, SampleTree> = BTreeMap::new();
    for sample in samples {
        owners
            .entry(sample.owner.clone())
            .or_default()
            .insert(&sample.path, 1)?;
    }
    debug!(owners = owners.len(), "sample trees built");

    let formatter = CapacityFormatter::new(
        total_capacity,
        total_samples,
        options.dollars_per_terabyte,
    );

    let mut ordered: Vec<(String, SampleTree)> = owners.into_iter().collect();
    ordered.sort_by(|a, b| {
        b.1.total_weight()
            .cmp(&a.1.total_weight())
            .then_with(|| a.0.cmp(&b.0))
    });

    let mut out = String::new();
    out.push_str(&format!("Total: {}\n", formatter.format(total_samples)));
    for (owner, mut tree) in ordered {
        let weight = tree.total_weight();
        let percentage = if total_samples == 0 {
            0.0
        } else {
            weight as f64 / total_samples as f64 * 100.0
        };
        out.push_str(&format!(
            "Owner {} (~{:.1}%/{})\n",
            owner,
            percentage,
            formatter.format(weight)
        ));
        prune(&mut tree, options.max_leaves, options.min_weight)?;
        out.push_str(&render(&tree, TREE_INDENT, |value| formatter.format(value)));
        out.push('\n');
    }
    Ok(out)
}
