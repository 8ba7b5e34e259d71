//! Address-keyed policy index.
//!
//! Folds the per-network policy lists into a single index keyed by
//! policyholder address. Networks are processed in the order given; when
//! the same address holds a policy on several networks, the record from
//! the last-processed network replaces the earlier one wholesale. This is
//! a known simplification carried over from the reference behavior: only
//! one network's policy survives per address, and records are never
//! merged. Callers that need multi-network tracking must not paper over
//! this here.

use std::collections::btree_map;
use std::collections::BTreeMap;

use log::{debug, warn};

use coverlens_core::records::PolicyRecord;
use coverlens_core::snapshot::NetworkPolicyList;

/// Policies keyed by policyholder address.
///
/// Backed by an ordered map so that iteration — and therefore every
/// aggregation pass over an unchanged index — is deterministic.
#[derive(Debug, Clone, Default)]
pub struct PolicyIndex {
    by_holder: BTreeMap<String, PolicyRecord>,
}

impl PolicyIndex {
    /// Looks up the surviving policy for an address.
    #[must_use]
    pub fn get(&self, policyholder: &str) -> Option<&PolicyRecord> {
        self.by_holder.get(policyholder)
    }

    /// Iterates holders and their policies in address order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, PolicyRecord> {
        self.by_holder.iter()
    }

    /// Number of indexed addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_holder.len()
    }

    /// Returns true if the index holds no policies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_holder.is_empty()
    }
}

impl<'a> IntoIterator for &'a PolicyIndex {
    type Item = (&'a String, &'a PolicyRecord);
    type IntoIter = btree_map::Iter<'a, String, PolicyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_holder.iter()
    }
}

/// Builds the policy index from per-network lists, in list order.
///
/// Each raw record is validated, tagged with its source network and the
/// `SPI V3` product label, and inserted by policyholder address
/// (last-processed network wins). Records with a malformed cover limit
/// are dropped with a warning; nothing propagates.
#[must_use]
pub fn build_policy_index(lists: &[NetworkPolicyList]) -> PolicyIndex {
    let mut by_holder = BTreeMap::new();
    let mut dropped = 0usize;

    for list in lists {
        for raw in &list.policies {
            match PolicyRecord::from_raw(raw, &list.network) {
                Ok(record) => {
                    by_holder.insert(record.policyholder.clone(), record);
                }
                Err(err) => {
                    dropped += 1;
                    warn!("dropping policy {}: {err}", raw.policy_id);
                }
            }
        }
    }

    debug!(
        "policy index built: {} holders across {} networks ({dropped} dropped)",
        by_holder.len(),
        lists.len()
    );

    PolicyIndex { by_holder }
}
