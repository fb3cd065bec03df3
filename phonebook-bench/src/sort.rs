//! In-place sorts of the record store, ascending by `name`.

use std::time::{Duration, Instant};

use crate::{outcome::StepResult, record::Record, report::step_message};

/// Quicksort with the Lomuto scheme: the rightmost name is the pivot and everything
/// `<=` it is swapped to the front. Pending ranges live on a work stack.
pub fn quick_sort(store: &mut [Record]) -> StepResult {
    let t0 = Instant::now();
    let mut pending = Vec::new();
    if store.len() > 1 {
        pending.push((0, store.len() - 1));
    }
    while let Some((left, right)) = pending.pop() {
        let p = lomuto_partition(store, left, right);
        if p + 1 < right {
            pending.push((p + 1, right));
        }
        if p > left + 1 {
            pending.push((left, p - 1));
        }
    }
    let elapsed = t0.elapsed();
    StepResult::new(0, elapsed).with_message(step_message("Sorting time", elapsed))
}

/// Partition `store[left..=right]` around `store[right].name`; returns the pivot's final index.
fn lomuto_partition(store: &mut [Record], left: usize, right: usize) -> usize {
    let mut i = left;
    for j in left..right {
        if store[j].name <= store[right].name {
            store.swap(i, j);
            i += 1;
        }
    }
    store.swap(i, right);
    i
}

/// Adjacent-swap bubble sort that stops early once a pass makes no swaps.
///
/// After every pass that did swap, the elapsed time is compared with `deadline`. Once it
/// is reached the sort gives up and sets `deadline_exceeded`; the store is then a
/// permutation of the input in no particular order.
pub fn bubble_sort(store: &mut [Record], deadline: Duration) -> StepResult {
    let t0 = Instant::now();
    let n = store.len();
    let mut exceeded = false;
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 1..n - pass {
            if store[j].name < store[j - 1].name {
                store.swap(j, j - 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
        if t0.elapsed() >= deadline {
            exceeded = true;
            break;
        }
    }
    let elapsed = t0.elapsed();
    StepResult {
        deadline_exceeded: exceeded,
        ..StepResult::new(0, elapsed).with_message(step_message("Sorting time", elapsed))
    }
}

pub fn is_sorted_by_name(store: &[Record]) -> bool {
    store.windows(2).all(|w| w[0].name <= w[1].name)
}
