//! Concurrent sample collection and owner attribution.
//!
//! Samples are drawn by `concurrency` parallel requests and attributed to
//! owners in fixed-size batches resolved concurrently. Result order follows
//! request order, so downstream tree construction is reproducible. Any
//! fetch or resolution failure surfaces here, before a tree is built.

use crate::client::identity::OwnerResolver;
use crate::client::{FileSample, SampleSource};
use crate::error::ReportError;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info};

/// How many file ids one owner-lookup batch carries.
const ATTRIBUTION_BATCH: usize = 100;

#[derive(Debug, Clone)]
pub struct SamplingConfig {
    /// Total number of samples to draw.
    pub samples: u64,
    /// Number of requests in flight at once.
    pub concurrency: usize,
}

/// A sample joined with its resolved owner display string.
#[derive(Debug, Clone)]
pub struct OwnedSample {
    pub path: String,
    pub owner: String,
}

/// Draw samples and resolve each one's owner.
pub async fn gather<S>(
    source: &Arc<S>,
    path: &str,
    config: &SamplingConfig,
) -> Result<Vec<OwnedSample>, ReportError>
where
    S: SampleSource + ?Sized + 'static,
{
    let samples = collect_samples(source, path, config).await?;
    info!(count = samples.len(), path, "samples collected");
    let attributed = attribute_owners(source, &samples, config).await?;
    info!(count = attributed.len(), "owners attributed");
    Ok(attributed)
}

/// Draw `config.samples` capacity-weighted samples under `path` using
/// `config.concurrency` parallel requests, each asking for an equal share.
pub async fn collect_samples<S>(
    source: &Arc<S>,
    path: &str,
    config: &SamplingConfig,
) -> Result<Vec<FileSample>, ReportError>
where
    S: SampleSource + ?Sized + 'static,
{
    if config.concurrency == 0 {
        return Err(ReportError::ConfigError(
            "concurrency must be at least 1".to_string(),
        ));
    }
    let per_request = config.samples / config.concurrency as u64;
    debug!(
        requests = config.concurrency,
        per_request, "dispatching sample requests"
    );
    let batches: Vec<Vec<FileSample>> = stream::iter(0..config.concurrency)
        .map(|_| {
            let source = Arc::clone(source);
            let path = path.to_string();
            async move { source.get_file_samples(&path, per_request).await }
        })
        .buffered(config.concurrency)
        .try_collect()
        .await?;
    Ok(batches.into_iter().flatten().collect())
}

/// Resolve the owner display string for every sample, in order.
pub async fn attribute_owners<S>(
    source: &Arc<S>,
    samples: &[FileSample],
    config: &SamplingConfig,
) -> Result<Vec<OwnedSample>, ReportError>
where
    S: SampleSource + ?Sized + 'static,
{
    let resolver = Arc::new(OwnerResolver::new(Arc::clone(source)));
    let batches: Vec<Vec<String>> = stream::iter(samples.chunks(ATTRIBUTION_BATCH))
        .map(|batch| {
            let resolver = Arc::clone(&resolver);
            async move {
                let mut owners = Vec::with_capacity(batch.len());
                for sample in batch {
                    owners.push(resolver.resolve_file_owner(&sample.id).await?);
                }
                Ok::<_, ReportError>(owners)
            }
        })
        .buffered(config.concurrency.max(1))
        .try_collect()
        .await?;

    Ok(samples
        .iter()
        .zip(batches.into_iter().flatten())
        .map(|(sample, owner)| OwnedSample {
            path: sample.name.clone(),
            owner,
        })
        .collect())
}
