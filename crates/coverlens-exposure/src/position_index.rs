//! Normalized per-account position index.
//!
//! Converts the snapshot's account-keyed position map into validated
//! [`PositionRecord`] lists. When the feed has produced a cleaned variant
//! for an account, the cleaned list is selected and the raw list ignored;
//! the two are never merged. Positions whose balance does not parse are
//! dropped with a warning.

use std::collections::BTreeMap;

use log::{debug, warn};

use coverlens_core::records::PositionRecord;
use coverlens_core::snapshot::{AccountPositions, RawPosition};

/// Validated positions for one account, with the cleaned/raw selection
/// already applied.
#[derive(Debug, Clone, Default)]
pub struct AccountEntry {
    positions: Vec<PositionRecord>,
}

impl AccountEntry {
    /// The account's resolved positions, in feed order.
    #[must_use]
    pub fn positions(&self) -> &[PositionRecord] {
        &self.positions
    }
}

/// Position snapshots keyed by account address.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    by_account: BTreeMap<String, AccountEntry>,
}

impl PositionIndex {
    /// Looks up the resolved positions for an account.
    #[must_use]
    pub fn get(&self, account: &str) -> Option<&AccountEntry> {
        self.by_account.get(account)
    }

    /// Number of indexed accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_account.len()
    }

    /// Returns true if no accounts are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_account.is_empty()
    }
}

fn parse_positions(account: &str, raw: &[RawPosition]) -> Vec<PositionRecord> {
    raw.iter()
        .filter_map(|p| match PositionRecord::from_raw(p) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("dropping position for {account}: {err}");
                None
            }
        })
        .collect()
}

/// Builds the position index from the snapshot's account map.
///
/// Selection between `positions_cleaned` and `positions` happens here via
/// [`AccountPositions::resolved`]; the parse is deterministic and
/// idempotent, so rebuilding from the same snapshot yields identical
/// content.
#[must_use]
pub fn build_position_index(accounts: &BTreeMap<String, AccountPositions>) -> PositionIndex {
    let by_account: BTreeMap<String, AccountEntry> = accounts
        .iter()
        .map(|(account, entry)| {
            (
                account.clone(),
                AccountEntry {
                    positions: parse_positions(account, entry.resolved()),
                },
            )
        })
        .collect();

    debug!("position index built: {} accounts", by_account.len());

    PositionIndex { by_account }
}
