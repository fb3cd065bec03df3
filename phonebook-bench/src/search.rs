//! Membership searches. Each one counts how many queries occur as an exact `name` in the
//! store and times only the search loop.

use std::{cmp::Ordering, time::Instant};

use crate::{outcome::StepResult, record::Record, report::found_message};

/// Scan the store from the front for every query. No ordering requirement.
pub fn linear_search(queries: &[String], store: &[Record]) -> StepResult {
    let t0 = Instant::now();
    let matched = queries
        .iter()
        .filter(|q| store.iter().any(|r| r.name == **q))
        .count();
    finish(matched, queries.len(), t0)
}

/// Block-wise search over a store sorted ascending by name.
///
/// Blocks are `floor(sqrt(len))` records wide; the last one may be shorter.
/// The first block whose last name is `>= query` is scanned backwards.
pub fn jump_search(queries: &[String], store: &[Record]) -> StepResult {
    let t0 = Instant::now();
    let step = (store.len() as f64).sqrt() as usize;
    let matched = if step == 0 {
        0
    } else {
        queries
            .iter()
            .filter(|q| jump_find(store, step, q))
            .count()
    };
    finish(matched, queries.len(), t0)
}

fn jump_find(store: &[Record], step: usize, query: &str) -> bool {
    let last = store.len() - 1;
    let mut start = 0;
    while start <= last {
        let end = (start + step - 1).min(last);
        if store[end].name.as_str() >= query {
            return store[start..=end].iter().rev().any(|r| r.name == query);
        }
        start += step;
    }
    false
}

/// Classic binary search per query over a store sorted ascending by name.
pub fn binary_search(queries: &[String], store: &[Record]) -> StepResult {
    let t0 = Instant::now();
    let matched = queries.iter().filter(|q| binary_find(store, q)).count();
    finish(matched, queries.len(), t0)
}

fn binary_find(store: &[Record], query: &str) -> bool {
    if store.is_empty() {
        return false;
    }
    let mut left = 0usize;
    let mut right = store.len() - 1;
    while left <= right {
        let mid = left + (right - left) / 2;
        match store[mid].name.as_str().cmp(query) {
            Ordering::Less => left = mid + 1,
            Ordering::Greater => match mid.checked_sub(1) {
                Some(r) => right = r,
                None => return false,
            },
            Ordering::Equal => return true,
        }
    }
    false
}

fn finish(matched: usize, total: usize, t0: Instant) -> StepResult {
    let res = StepResult::new(matched, t0.elapsed());
    let msg = found_message(matched, total, res.elapsed);
    res.with_message(msg)
}
