//! Property-based tests for aggregation invariants.
//!
//! These tests verify properties that should hold for any snapshot:
//! - Loss payout and premium sums decompose per position
//! - Totals equal column-wise sums
//! - Aggregation is idempotent on unchanged input
//! - The two exposure bases stay internally consistent

use std::collections::BTreeMap;

use coverlens_core::prelude::*;
use coverlens_core::snapshot::{ProtocolMapEntry, RateCardEntry, RawNumber, SeriesData};
use coverlens_exposure::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Simple deterministic hash for test data generation.
fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x
}

const APPS: [&str; 5] = ["aave-v3", "uniswap-v3", "compound", "curve", "lido"];
const NETWORKS: [&str; 2] = ["ethereum", "polygon"];

/// Generates a snapshot with `n` policyholders and varying positions.
fn generate_snapshot(n: usize, seed: u64) -> UpstreamSnapshot {
    let mut policies = Vec::with_capacity(n);
    let mut accounts: BTreeMap<String, AccountPositions> = BTreeMap::new();

    for i in 0..n {
        let hash = simple_hash(seed, i as u64);
        let holder = format!("0x{i:040x}");

        // Cover limits between 100 and 1099 USD, in raw 18-decimal units.
        let cover_usd = 100 + (hash % 1000);
        policies.push(RawPolicy {
            policy_id: i as u64 + 1,
            policyholder: holder.clone(),
            cover_limit: format!("{cover_usd}000000000000000000"),
            deposits_made: String::new(),
            premiums_charged: String::new(),
        });

        // 0-3 positions per holder; holders with none exercise the skip
        // path in the protocol view.
        let position_count = (hash >> 8) % 4;
        let positions = (0..position_count)
            .map(|j| {
                let p = simple_hash(seed ^ 0xabcd, (i as u64) << 8 | j);
                RawPosition {
                    app_id: APPS[p as usize % APPS.len()].to_string(),
                    network: NETWORKS[(p >> 16) as usize % NETWORKS.len()].to_string(),
                    balance_usd: RawNumber::Number((p % 2000) as f64 / 2.0),
                }
            })
            .collect();

        accounts.insert(
            holder,
            AccountPositions {
                positions,
                positions_cleaned: None,
            },
        );
    }

    UpstreamSnapshot {
        spi: [(
            "ethereum_v3".to_string(),
            coverlens_core::snapshot::ProductSection { policies },
        )]
        .into_iter()
        .collect(),
        positions: accounts,
        series: Some(coverlens_core::snapshot::SeriesSection {
            data: SeriesData {
                protocol_map: vec![
                    ProtocolMapEntry {
                        app_id: "aave-v3".to_string(),
                        tier: "A".to_string(),
                        category: "lending".to_string(),
                    },
                    ProtocolMapEntry {
                        app_id: "uniswap-v3".to_string(),
                        tier: "B".to_string(),
                        category: "dex".to_string(),
                    },
                ],
                rate_card: vec![
                    RateCardEntry {
                        tier: "A".to_string(),
                        rate_on_line: 0.02,
                    },
                    RateCardEntry {
                        tier: "B".to_string(),
                        rate_on_line: 0.04,
                    },
                    RateCardEntry {
                        tier: "F".to_string(),
                        rate_on_line: 0.1,
                    },
                ],
            },
        }),
        fetched_at: None,
    }
}

// =============================================================================
// PROPERTY: PER-POSITION DECOMPOSITION
// =============================================================================

#[test]
fn property_loss_payout_decomposes_per_position() {
    for seed in 0..10 {
        for size in [1, 5, 20, 50] {
            let report = recompute_exposure(&generate_snapshot(size, seed));

            for row in &report.protocols {
                // policies[i] is the policy that contributed positions[i],
                // so the sums decompose pairwise.
                assert_eq!(row.policies.len(), row.positions.len());

                let expected_payout: f64 = row
                    .policies
                    .iter()
                    .zip(&row.positions)
                    .map(|(policy, position)| {
                        policy.cover_limit_usd().min(position.balance_usd)
                    })
                    .sum();

                assert!(
                    (row.total_loss_payout_amount - expected_payout).abs() < 1e-6,
                    "loss payout mismatch for {} (seed={seed}, size={size})",
                    row.app_id
                );

                let expected_premiums = expected_payout * row.rate_on_line;
                assert!(
                    (row.premiums_per_year - expected_premiums).abs() < 1e-6,
                    "premium mismatch for {} (seed={seed}, size={size})",
                    row.app_id
                );
            }
        }
    }
}

#[test]
fn property_exposure_bounded_by_cover_and_highest() {
    for seed in 0..10 {
        let report = recompute_exposure(&generate_snapshot(30, seed));

        for row in &report.protocols {
            for policy in &row.policies {
                let exposure = policy.exposure.unwrap();
                assert!(exposure <= policy.cover_limit_usd() + 1e-9);
                assert!(exposure <= row.highest_position + 1e-9);
            }
        }

        for row in &report.policies {
            assert!(row.exposure <= row.cover_limit + 1e-9);
            assert!(row.exposure <= row.balance_usd + 1e-9);
            assert!(row.highest_position_usd <= row.balance_usd + 1e-9);
        }
    }
}

// =============================================================================
// PROPERTY: TOTALS ROW
// =============================================================================

#[test]
fn property_totals_equal_column_sums() {
    for seed in 0..10 {
        let report = recompute_exposure(&generate_snapshot(40, seed));
        let recomputed = ProtocolTotals::from_rows(&report.protocols);

        assert_eq!(report.totals, recomputed);

        let balance: f64 = report.protocols.iter().map(|r| r.balance_usd).sum();
        assert!((report.totals.balance_usd - balance).abs() < 1e-6);
    }
}

// =============================================================================
// PROPERTY: IDEMPOTENCE
// =============================================================================

#[test]
fn property_recompute_is_idempotent() {
    for seed in 0..10 {
        let snapshot = generate_snapshot(25, seed);

        let first = recompute_exposure(&snapshot);
        let second = recompute_exposure(&snapshot);

        assert_eq!(first, second, "seed={seed}");
    }
}

// =============================================================================
// PROPERTY: SORTING
// =============================================================================

#[test]
fn property_sorted_rows_are_monotone() {
    for seed in 0..5 {
        let mut report = recompute_exposure(&generate_snapshot(50, seed));

        sort_protocol_rows(&mut report.protocols, "balanceUSD_D");
        for pair in report.protocols.windows(2) {
            assert!(pair[0].balance_usd >= pair[1].balance_usd);
        }

        sort_policy_rows(&mut report.policies, "exposure_A");
        for pair in report.policies.windows(2) {
            assert!(pair[0].exposure <= pair[1].exposure);
        }
    }
}

// =============================================================================
// PROPERTY: PAGINATION
// =============================================================================

#[test]
fn property_pager_covers_all_rows_once() {
    for total in [0usize, 1, 9, 10, 11, 25, 100] {
        let rows: Vec<usize> = (0..total).collect();
        let mut pager = Pager::new(total);

        let mut seen = Vec::new();
        for _ in 0..pager.page_count() {
            seen.extend_from_slice(pager.slice(&rows));
            pager.next();
        }

        // Full cycle returns to the first page having covered every row.
        assert_eq!(pager.current_page(), 0);
        assert_eq!(seen, rows);
    }
}
