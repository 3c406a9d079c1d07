//! Property-based tests for quote reconciliation.
//!
//! These tests check the carry-forward rules across random snapshots and
//! fetch batches using `proptest`.

use proptest::prelude::*;
use std::collections::HashMap;
use tickerboard_core::quotes::{reconcile, QuoteRecord, QuoteSnapshot, RawQuote};

// =============================================================================
// Generators
// =============================================================================

/// Generates a price string or the sentinel.
fn arb_price() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => (1u32..200_000).prop_map(|cents| format!("{}.{:02}", cents / 100, cents % 100)),
        1 => Just("N/A".to_string()),
    ]
}

/// Generates a numeric price string.
fn arb_numeric_price() -> impl Strategy<Value = String> {
    (1u32..200_000).prop_map(|cents| format!("{}.{:02}", cents / 100, cents % 100))
}

fn arb_code() -> impl Strategy<Value = String> {
    prop_oneof!["[1-9][0-9]{3}", Just("t00".to_string())]
}

/// Generates a raw reading whose fields may be "N/A".
fn arb_raw_quote(code: String) -> impl Strategy<Value = RawQuote> {
    (arb_price(), arb_price())
        .prop_map(move |(instant, close)| RawQuote::new(code.clone(), "").with_prices(&instant, &close))
}

/// Generates a raw reading with every field numeric.
fn arb_complete_quote(code: String) -> impl Strategy<Value = RawQuote> {
    (arb_numeric_price(), arb_numeric_price())
        .prop_map(move |(instant, close)| RawQuote::new(code.clone(), "").with_prices(&instant, &close))
}

fn arb_codes() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::hash_set(arb_code(), 0..8).prop_map(|set| set.into_iter().collect::<Vec<_>>())
}

/// Generates a batch for a random subset of `codes`.
fn arb_batch(codes: Vec<String>) -> impl Strategy<Value = HashMap<String, RawQuote>> {
    let strategies: Vec<_> = codes
        .into_iter()
        .map(|code| proptest::option::of(arb_raw_quote(code.clone())).prop_map(move |q| (code.clone(), q)))
        .collect();
    strategies.prop_map(|entries| {
        entries
            .into_iter()
            .filter_map(|(code, quote)| quote.map(|q| (code, q)))
            .collect::<HashMap<_, _>>()
    })
}

fn to_snapshot(batch: &HashMap<String, RawQuote>) -> QuoteSnapshot {
    batch
        .iter()
        .map(|(code, raw)| (code.clone(), QuoteRecord::from(raw.clone())))
        .collect()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Codes missing from the fetched batch never appear in the result, and
    /// every code in the result is on the watch-list.
    #[test]
    fn prop_result_is_watch_list_intersect_fetched(
        (codes, previous, fetched) in arb_codes().prop_flat_map(|codes| {
            (Just(codes.clone()), arb_batch(codes.clone()), arb_batch(codes))
        }),
        in_window in any::<bool>(),
    ) {
        let result = reconcile(&to_snapshot(&previous), &fetched, &codes, in_window);

        for code in &codes {
            prop_assert_eq!(result.contains(code), fetched.contains_key(code));
        }
        prop_assert!(result.iter().all(|(code, _)| codes.contains(code)));
    }

    /// Outside the trading window the result mirrors the fresh instant price.
    #[test]
    fn prop_no_carry_outside_window(
        (codes, previous, fetched) in arb_codes().prop_flat_map(|codes| {
            (Just(codes.clone()), arb_batch(codes.clone()), arb_batch(codes))
        }),
    ) {
        let result = reconcile(&to_snapshot(&previous), &fetched, &codes, false);

        for (code, record) in &result {
            prop_assert_eq!(&record.instant_price, &fetched[code].instant_price);
        }
    }

    /// Inside the window a fresh "N/A" is replaced by a known previous price.
    #[test]
    fn prop_carry_inside_window(
        (codes, previous, fetched) in arb_codes().prop_flat_map(|codes| {
            (Just(codes.clone()), arb_batch(codes.clone()), arb_batch(codes))
        }),
    ) {
        let previous = to_snapshot(&previous);
        let result = reconcile(&previous, &fetched, &codes, true);

        for (code, record) in &result {
            let fresh = &fetched[code].instant_price;
            let expected = match previous.get(code) {
                Some(prior) if fresh == "N/A" && prior.instant_price != "N/A" => &prior.instant_price,
                _ => fresh,
            };
            prop_assert_eq!(&record.instant_price, expected);
        }
    }

    /// Yesterday's close always comes from the fresh reading.
    #[test]
    fn prop_yesterday_close_never_carried(
        (codes, previous, fetched) in arb_codes().prop_flat_map(|codes| {
            (Just(codes.clone()), arb_batch(codes.clone()), arb_batch(codes))
        }),
        in_window in any::<bool>(),
    ) {
        let result = reconcile(&to_snapshot(&previous), &fetched, &codes, in_window);

        for (code, record) in &result {
            prop_assert_eq!(&record.yesterday_close, &fetched[code].yesterday_close);
        }
    }

    /// Reconciling the same complete batch twice gives the same snapshot.
    #[test]
    fn prop_idempotent_for_complete_batches(
        (codes, fetched) in arb_codes().prop_flat_map(|codes| {
            let quotes: Vec<_> = codes.iter().cloned().map(arb_complete_quote).collect();
            (Just(codes), quotes)
        }),
        in_window in any::<bool>(),
    ) {
        let fetched: HashMap<String, RawQuote> =
            fetched.into_iter().map(|q| (q.code.clone(), q)).collect();

        let once = reconcile(&QuoteSnapshot::new(), &fetched, &codes, in_window);
        let twice = reconcile(&once, &fetched, &codes, in_window);

        prop_assert_eq!(once, twice);
    }
}
