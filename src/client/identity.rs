//! Owner identity resolution.
//!
//! Maps file ids to owner display strings through two explicit memo caches,
//! both scoped to a single reporting run: `owners` keys raw owner auth ids,
//! `seen` keys file ids. Both are populated lazily on first lookup and grow
//! for the duration of the run; there is no invalidation.

use crate::client::{Identity, SampleSource};
use crate::error::ReportError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Identity types preferred for display, most preferred first.
const PREFERRED_ID_TYPES: [&str; 2] = ["LOCAL_USER", "NFS_UID"];

/// Pick a display string for an owner from its related identities: the
/// first identity of a preferred type as `TYPE:value`, or `ERROR` when none
/// of the preferred types is present.
pub fn format_owner(identities: &[Identity]) -> String {
    for key in PREFERRED_ID_TYPES {
        if let Some(identity) = identities.iter().find(|identity| identity.id_type == key) {
            return format!("{}:{}", identity.id_type, identity.id_value);
        }
    }
    "ERROR".to_string()
}

/// Resolves file ids to owner display strings against a [`SampleSource`].
pub struct OwnerResolver<S: SampleSource + ?Sized> {
    source: Arc<S>,
    owners: RwLock<HashMap<String, String>>,
    seen: RwLock<HashMap<String, String>>,
}

impl<S: SampleSource + ?Sized> OwnerResolver<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            owners: RwLock::new(HashMap::new()),
            seen: RwLock::new(HashMap::new()),
        }
    }

    /// Display string for the owner of `file_id`, fetching attributes and
    /// identities only on cache misses.
    pub async fn resolve_file_owner(&self, file_id: &str) -> Result<String, ReportError> {
        if let Some(cached) = self.seen.read().get(file_id).cloned() {
            return Ok(cached);
        }
        let owner_id = self.source.get_file_owner(file_id).await?;
        let display = self.resolve_owner(&owner_id).await?;
        self.seen
            .write()
            .insert(file_id.to_string(), display.clone());
        Ok(display)
    }

    /// Display string for a raw owner auth id.
    pub async fn resolve_owner(&self, owner_id: &str) -> Result<String, ReportError> {
        if let Some(cached) = self.owners.read().get(owner_id).cloned() {
            return Ok(cached);
        }
        let identities = self.source.related_identities(owner_id).await?;
        let display = format_owner(&identities);
        self.owners
            .write()
            .insert(owner_id.to_string(), display.clone());
        Ok(display)
    }
}
