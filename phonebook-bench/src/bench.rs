//! The benchmark run: four phases executed strictly in order.
//!
//! 1. Baseline: linear search over the freshly loaded directory. Ten times its duration
//!    becomes the bubble sort deadline.
//! 2. Bubble sort, then jump search; if the sort ran out of time, linear search instead.
//! 3. Reload the directory, quicksort it, then binary search.
//! 4. Reload the directory, build a hash index and look every query up.

use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    constants::DEADLINE_MULTIPLIER,
    hash::{HashFunction, build_index, hash_search},
    outcome::StepResult,
    record::Record,
    search::{binary_search, jump_search, linear_search},
    sort::{bubble_sort, quick_sort},
    source::DirectorySource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Baseline,
    BubbleJump,
    QuickBinary,
    Hash,
}

impl Phase {
    pub const ALL: [Self; 4] = [
        Self::Baseline,
        Self::BubbleJump,
        Self::QuickBinary,
        Self::Hash,
    ];

    /// Strategy combination, as shown in progress lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "linear search",
            Self::BubbleJump => "bubble sort + jump search",
            Self::QuickBinary => "quick sort + binary search",
            Self::Hash => "hash table",
        }
    }
}

/// Outcome of one phase: its timed steps in execution order. The last step is always the search.
#[derive(Debug, Clone)]
pub struct PhaseReport {
    pub phase: Phase,
    pub total_queries: usize,
    pub steps: Vec<StepResult>,
    /// The bubble sort hit its deadline and linear search stood in for jump search.
    pub fell_back: bool,
}

impl PhaseReport {
    fn new(phase: Phase, total_queries: usize) -> Self {
        Self {
            phase,
            total_queries,
            steps: Vec::new(),
            fell_back: false,
        }
    }

    pub fn matched(&self) -> usize {
        self.steps.last().map_or(0, |s| s.matched)
    }

    /// Sum of every step's duration.
    pub fn elapsed(&self) -> Duration {
        self.steps.iter().map(|s| s.elapsed).sum()
    }

    pub fn deadline_exceeded(&self) -> bool {
        self.steps.iter().any(|s| s.deadline_exceeded)
    }
}

#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    /// Bubble sort deadline derived from the baseline.
    pub deadline: Duration,
    pub hash: HashFunction,
    pub phases: Vec<PhaseReport>,
}

impl BenchmarkReport {
    pub fn phase(&self, phase: Phase) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.phase == phase)
    }
}

/// Progress notifications emitted while [`Benchmark::run_with`] works.
#[derive(Debug)]
pub enum Progress<'a> {
    Started(Phase),
    Finished(&'a PhaseReport),
}

/// `baseline * 10`.
pub fn derive_deadline(baseline: Duration) -> Duration {
    baseline * DEADLINE_MULTIPLIER
}

/// Owns the query list and the directory source for one run. The record store itself is
/// loaded fresh whenever a phase needs the original order.
#[derive(Debug)]
pub struct Benchmark<S> {
    source: S,
    queries: Vec<String>,
    hash: HashFunction,
}

impl<S: DirectorySource> Benchmark<S> {
    pub fn new(source: S, queries: Vec<String>) -> Self {
        Self {
            source,
            queries,
            hash: HashFunction::default(),
        }
    }

    pub fn with_hash(mut self, hash: HashFunction) -> Self {
        self.hash = hash;
        self
    }

    pub fn run(&self) -> Result<BenchmarkReport> {
        self.run_with(|_| {})
    }

    /// Run all phases, reporting each start and finish to `progress`.
    pub fn run_with(&self, mut progress: impl FnMut(Progress<'_>)) -> Result<BenchmarkReport> {
        let total = self.queries.len();
        let mut store = self.load()?;
        let mut phases = Vec::with_capacity(Phase::ALL.len());

        progress(Progress::Started(Phase::Baseline));
        let mut baseline = PhaseReport::new(Phase::Baseline, total);
        let res = linear_search(&self.queries, &store);
        let deadline = derive_deadline(res.elapsed);
        info!(baseline_ms = res.elapsed_millis() as u64, ?deadline, "bubble sort deadline set");
        baseline.steps.push(res);
        progress(Progress::Finished(&baseline));
        phases.push(baseline);

        progress(Progress::Started(Phase::BubbleJump));
        let bubble = bubble_jump(&self.queries, &mut store, deadline);
        progress(Progress::Finished(&bubble));
        phases.push(bubble);

        progress(Progress::Started(Phase::QuickBinary));
        let mut quick = PhaseReport::new(Phase::QuickBinary, total);
        store = self.load()?;
        let sorted = quick_sort(&mut store);
        log_bounds("quick sort", &store);
        let search = binary_search(&self.queries, &store);
        quick.steps.extend([sorted, search]);
        progress(Progress::Finished(&quick));
        phases.push(quick);

        progress(Progress::Started(Phase::Hash));
        let mut hashed = PhaseReport::new(Phase::Hash, total);
        store = self.load()?;
        info!(hash = %self.hash, "building hash index");
        let (index, built) = build_index(&store, self.hash);
        info!(
            slots = index.len(),
            overwrites = index.overwrites(),
            "hash index built"
        );
        let search = hash_search(&self.queries, &index);
        hashed.steps.extend([built, search]);
        progress(Progress::Finished(&hashed));
        phases.push(hashed);

        Ok(BenchmarkReport {
            deadline,
            hash: self.hash,
            phases,
        })
    }

    fn load(&self) -> Result<Vec<Record>> {
        let t0 = Instant::now();
        let store = self.source.load()?;
        info!(
            source = %self.source.source_id(),
            records = store.len(),
            queries = self.queries.len(),
            elapsed = ?t0.elapsed(),
            "directory loaded"
        );
        Ok(store)
    }
}

/// Bubble sort under `deadline`, then jump search; linear search if the sort was stopped,
/// since `store` is then in no particular order.
pub fn bubble_jump(queries: &[String], store: &mut [Record], deadline: Duration) -> PhaseReport {
    let mut report = PhaseReport::new(Phase::BubbleJump, queries.len());
    let sorted = bubble_sort(store, deadline);
    let search = if sorted.deadline_exceeded {
        warn!(elapsed = ?sorted.elapsed, ?deadline, "bubble sort stopped, falling back to linear search");
        report.fell_back = true;
        linear_search(queries, store)
    } else {
        log_bounds("bubble sort", store);
        jump_search(queries, store)
    };
    report.steps.extend([sorted, search]);
    report
}

fn log_bounds(strategy: &str, store: &[Record]) {
    if let (Some(first), Some(last)) = (store.first(), store.last()) {
        info!(%first, %last, "{strategy}: sorted directory bounds");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{sort::is_sorted_by_name, source::MemorySource};

    fn queries(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn deadline_is_ten_baselines() {
        assert_eq!(
            derive_deadline(Duration::from_millis(7)),
            Duration::from_millis(70)
        );
        assert_eq!(derive_deadline(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn phases_run_in_order_and_report_progress() {
        let bench = Benchmark::new(
            MemorySource::new(["3 carol", "1 alice", "2 bob"]),
            queries(&["bob", "alice", "zed"]),
        );
        let mut events = Vec::new();
        let report = bench
            .run_with(|p| {
                events.push(match p {
                    Progress::Started(ph) => format!("start {}", ph.as_str()),
                    Progress::Finished(r) => format!("done {}", r.phase.as_str()),
                })
            })
            .unwrap();
        assert_eq!(
            report.phases.iter().map(|p| p.phase).collect::<Vec<_>>(),
            Phase::ALL
        );
        assert_eq!(events.len(), 8);
        assert_eq!(events[0], "start linear search");
        assert_eq!(events[7], "done hash table");
        for p in &report.phases {
            assert_eq!(p.matched(), 2, "{}", p.phase.as_str());
            assert_eq!(p.total_queries, 3);
        }
        assert_eq!(report.phase(Phase::Baseline).unwrap().steps.len(), 1);
        assert_eq!(report.phase(Phase::Hash).unwrap().steps.len(), 2);
    }

    #[test]
    fn fallback_flag_tracks_bubble_deadline() {
        let bench = Benchmark::new(
            MemorySource::new(["2 bob", "1 alice"]),
            queries(&["alice"]),
        )
        .with_hash(HashFunction::Md5);
        let report = bench.run().unwrap();
        let bubble = report.phase(Phase::BubbleJump).unwrap();
        assert_eq!(bubble.fell_back, bubble.deadline_exceeded());
        assert_eq!(bubble.matched(), 1);
        assert_eq!(report.hash, HashFunction::Md5);
    }

    fn unsorted_store() -> Vec<Record> {
        MemorySource::new(["4 dave", "2 bob", "5 erin", "1 alice", "3 carol"])
            .load()
            .unwrap()
    }

    #[test]
    fn expired_deadline_falls_back_to_linear_search() {
        let q = queries(&["carol", "alice", "zed"]);
        let mut store = unsorted_store();
        let report = bubble_jump(&q, &mut store, Duration::ZERO);
        assert!(report.fell_back);
        assert!(report.deadline_exceeded());
        assert_eq!(report.matched(), linear_search(&q, &unsorted_store()).matched);
        assert!(
            report
                .to_string()
                .contains(" - STOPPED, moved to linear search\nSearching time: ")
        );
    }

    #[test]
    fn generous_deadline_takes_jump_search() {
        let q = queries(&["carol", "alice", "zed"]);
        let mut store = unsorted_store();
        let report = bubble_jump(&q, &mut store, Duration::from_secs(3600));
        assert!(!report.fell_back);
        assert!(!report.deadline_exceeded());
        assert!(is_sorted_by_name(&store));
        assert_eq!(report.matched(), 2);
        assert_eq!(report.matched(), jump_search(&q, &store).matched);
        assert!(!report.to_string().contains("STOPPED"));
    }

    #[test]
    fn empty_inputs_are_not_errors() {
        let report = Benchmark::new(MemorySource::default(), Vec::new())
            .run()
            .unwrap();
        assert!(report.phases.iter().all(|p| p.matched() == 0));
    }

    #[test]
    fn malformed_source_fails_the_run() {
        let bench = Benchmark::new(MemorySource::new(["nospace"]), queries(&["x"]));
        assert!(bench.run().is_err());
    }
}
