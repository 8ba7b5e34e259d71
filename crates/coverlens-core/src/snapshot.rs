//! Typed model of the upstream coverage-protocol snapshot.
//!
//! The upstream collaborator periodically publishes a single JSON document
//! containing per-network policy lists (`spi.<network>_v3.policies[]`), an
//! account-keyed position map (`positions` / `positions_cleaned`), and the
//! risk-tier reference series (`series.data.protocolMap[]` and
//! `series.data.rateCard[]`). Coverlens consumes the document wholesale:
//! every recomputation reads one immutable snapshot and nothing is ever
//! patched in place.
//!
//! Fields are kept raw here (stringly-typed balances and cover limits);
//! parsing into validated records happens in [`crate::records`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Networks the SPI V3 product is deployed on, in processing order.
///
/// Policy lists are folded into the policy index in this order, so a
/// policyholder appearing on several networks keeps the record from the
/// network processed last.
pub const DEFAULT_NETWORK_ORDER: [&str; 4] = ["ethereum", "polygon", "fantom", "aurora"];

/// Suffix of the per-network product keys in the snapshot (`ethereum_v3`).
pub const PRODUCT_KEY_SUFFIX: &str = "_v3";

/// A numeric field that may arrive as a JSON number or a numeric string.
///
/// The upstream feed is not consistent about this for position balances,
/// so both encodings are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// A plain JSON number.
    Number(f64),
    /// A numeric string, e.g. `"1234.56"`.
    Text(String),
}

impl RawNumber {
    /// Returns the value as `f64`, or `None` if the text form is not numeric.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }
}

/// A raw policy as published by the upstream feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPolicy {
    /// Numeric policy identifier.
    #[serde(rename = "policyID")]
    pub policy_id: u64,

    /// Address of the policyholder.
    #[serde(rename = "policyHolder")]
    pub policyholder: String,

    /// Cover limit as an 18-decimal fixed-point integer string.
    #[serde(rename = "coverLimit")]
    pub cover_limit: String,

    /// Deposits made, 18-decimal fixed-point integer string.
    #[serde(rename = "depositsMade", default)]
    pub deposits_made: String,

    /// Premiums charged, 18-decimal fixed-point integer string.
    #[serde(rename = "premiumsCharged", default)]
    pub premiums_charged: String,
}

/// A raw position as published by the upstream feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPosition {
    /// Protocol the position sits in.
    #[serde(rename = "appId")]
    pub app_id: String,

    /// Network the position sits on.
    pub network: String,

    /// USD balance, number or numeric string.
    #[serde(rename = "balanceUSD")]
    pub balance_usd: RawNumber,
}

/// Per-account position snapshot.
///
/// When the feed has run its cleaning pass, `positions_cleaned` is present
/// and supersedes `positions`; the two are never merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountPositions {
    /// Raw positions for the account.
    #[serde(default)]
    pub positions: Vec<RawPosition>,

    /// Cleaned positions, if the feed produced them.
    #[serde(rename = "positions_cleaned", default)]
    pub positions_cleaned: Option<Vec<RawPosition>>,
}

impl AccountPositions {
    /// Selects the position list to use: the cleaned variant when present,
    /// the raw list otherwise. Pure and idempotent.
    #[must_use]
    pub fn resolved(&self) -> &[RawPosition] {
        self.positions_cleaned.as_deref().unwrap_or(&self.positions)
    }
}

/// One per-network product section (`spi.<network>_v3`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductSection {
    /// Policies issued on this network.
    #[serde(default)]
    pub policies: Vec<RawPolicy>,
}

/// Maps a protocol to its risk tier and category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolMapEntry {
    /// Protocol identifier.
    #[serde(rename = "appId")]
    pub app_id: String,

    /// Letter-grade risk tier.
    pub tier: String,

    /// Protocol category, e.g. `"lending"`.
    #[serde(default)]
    pub category: String,
}

/// Maps a risk tier to its rate-on-line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateCardEntry {
    /// Letter-grade risk tier.
    pub tier: String,

    /// Annual premium rate applied to the loss payout amount.
    #[serde(rename = "rol")]
    pub rate_on_line: f64,
}

/// Risk reference data carried under `series.data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesData {
    /// Protocol → tier/category map.
    #[serde(rename = "protocolMap", default)]
    pub protocol_map: Vec<ProtocolMapEntry>,

    /// Tier → rate-on-line card.
    #[serde(rename = "rateCard", default)]
    pub rate_card: Vec<RateCardEntry>,
}

/// The `series` section of the snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesSection {
    /// Reference data payload.
    #[serde(default)]
    pub data: SeriesData,
}

/// A policy list tagged with its source network, in processing order.
///
/// This is the input shape the policy index builder consumes; it is
/// produced from a snapshot via [`UpstreamSnapshot::policy_lists`].
#[derive(Debug, Clone)]
pub struct NetworkPolicyList {
    /// Source network tag (without the `_v3` key suffix).
    pub network: String,
    /// Raw policies published for that network.
    pub policies: Vec<RawPolicy>,
}

/// One immutable upstream snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamSnapshot {
    /// Per-network product sections, keyed `<network>_v3`.
    #[serde(default)]
    pub spi: BTreeMap<String, ProductSection>,

    /// Account-keyed position snapshots.
    #[serde(default)]
    pub positions: BTreeMap<String, AccountPositions>,

    /// Risk reference series.
    #[serde(default)]
    pub series: Option<SeriesSection>,

    /// When the collaborator fetched this document. Carried, not interpreted.
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl UpstreamSnapshot {
    /// Deserializes a snapshot from its JSON document form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDocument`] if the document is not valid
    /// JSON or does not match the expected shape.
    pub fn from_json(document: &str) -> CoreResult<Self> {
        serde_json::from_str(document).map_err(|e| CoreError::invalid_document(e.to_string()))
    }

    /// Extracts the per-network policy lists in the given processing order.
    ///
    /// Networks without a section in the snapshot are omitted, preserving
    /// the relative order of the rest.
    #[must_use]
    pub fn policy_lists(&self, network_order: &[&str]) -> Vec<NetworkPolicyList> {
        network_order
            .iter()
            .filter_map(|network| {
                let key = format!("{network}{PRODUCT_KEY_SUFFIX}");
                self.spi.get(&key).map(|section| NetworkPolicyList {
                    network: (*network).to_string(),
                    policies: section.policies.clone(),
                })
            })
            .collect()
    }

    /// Returns the reference series data, if the section is present.
    #[must_use]
    pub fn series_data(&self) -> Option<&SeriesData> {
        self.series.as_ref().map(|s| &s.data)
    }
}
