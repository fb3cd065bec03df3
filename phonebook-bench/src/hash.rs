//! Hash-table lookup with a swappable hash function.
//!
//! The index maps `hash(name)` to the record's key and never stores the name itself:
//! two names with the same hash share one slot (the later record wins), and a lookup
//! only asks whether the query's hash is present. Both are deliberate; collisions
//! therefore show up as false positives rather than errors.

use std::{collections::HashMap, fmt, str::FromStr, time::Instant};

use md5::{Digest, Md5};
use tracing::debug;

use crate::{
    constants::{DJB2_MULTIPLIER, DJB2_SEED, POLY_BASE, POLY_MODULUS},
    outcome::StepResult,
    record::Record,
    report::{found_message, step_message},
};

/// Maps a name to the key it is stored under in a [`HashIndex`].
pub trait NameHasher {
    fn hash(&self, name: &str) -> String;
}

impl<F> NameHasher for F
where
    F: Fn(&str) -> String,
{
    fn hash(&self, name: &str) -> String {
        self(name)
    }
}

/// The hash functions selectable at run start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashFunction {
    #[default]
    Djb2,
    Polynomial,
    Md5,
}

impl HashFunction {
    pub const ALL: [Self; 3] = [Self::Djb2, Self::Polynomial, Self::Md5];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Djb2 => "djb2",
            Self::Polynomial => "polynomial",
            Self::Md5 => "md5",
        }
    }
}

impl NameHasher for HashFunction {
    fn hash(&self, name: &str) -> String {
        match self {
            Self::Djb2 => hash_djb2(name),
            Self::Polynomial => hash_polynomial(name),
            Self::Md5 => hash_md5(name),
        }
    }
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HashFunction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("unknown hash function {s:?} (djb2, polynomial, md5)"))
    }
}

/// 1 for `'a'`, 2 for `'b'`, ...; other characters land wherever the subtraction puts them.
#[inline]
fn char_value(c: char) -> i64 {
    c as i64 - 'a' as i64 + 1
}

/// `h = 5381; h = h * 33 + value(c)` for every character, wrapping on overflow.
/// There is no xor or shift step.
pub fn hash_djb2(name: &str) -> String {
    name.chars()
        .fold(DJB2_SEED, |h, c| {
            h.wrapping_mul(DJB2_MULTIPLIER).wrapping_add(char_value(c))
        })
        .to_string()
}

/// `sum(value(c_i) * 53^i) mod 1_000_000_009`, reduced after every term.
pub fn hash_polynomial(name: &str) -> String {
    let mut hash: i64 = 0;
    let mut pow: i64 = 1;
    for c in name.chars() {
        hash = (hash + char_value(c) * pow) % POLY_MODULUS;
        pow = (pow * POLY_BASE) % POLY_MODULUS;
    }
    hash.to_string()
}

/// Lowercase hex MD5 digest of the UTF-8 name (always 32 characters).
pub fn hash_md5(name: &str) -> String {
    hex::encode(Md5::digest(name.as_bytes()))
}

/// `hash(name) -> key`, one entry per distinct hash.
#[derive(Debug)]
pub struct HashIndex<H> {
    hasher: H,
    entries: HashMap<String, String>,
    overwrites: usize,
}

impl<H: NameHasher> HashIndex<H> {
    pub fn new(hasher: H) -> Self {
        Self {
            hasher,
            entries: HashMap::new(),
            overwrites: 0,
        }
    }

    /// Index every record in order.
    pub fn build(records: &[Record], hasher: H) -> Self {
        let mut index = Self::new(hasher);
        for r in records {
            index.insert(r);
        }
        index
    }

    /// Store `record.key` under the hash of its name. Returns the key it replaced, if any.
    pub fn insert(&mut self, record: &Record) -> Option<String> {
        let h = self.hasher.hash(&record.name);
        let prev = self.entries.insert(h, record.key.clone());
        if let Some(old) = &prev {
            self.overwrites += 1;
            debug!(name = %record.name, old_key = %old, new_key = %record.key, "hash slot overwritten");
        }
        prev
    }

    /// Is the query's hash present? Does not confirm the stored name.
    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(&self.hasher.hash(query))
    }

    /// Key stored under the query's hash.
    pub fn get(&self, query: &str) -> Option<&str> {
        self.entries.get(&self.hasher.hash(query)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts that landed on an occupied slot (duplicate names or hash collisions).
    pub fn overwrites(&self) -> usize {
        self.overwrites
    }
}

/// Build an index over `records`, timing the construction.
pub fn build_index<H: NameHasher>(records: &[Record], hasher: H) -> (HashIndex<H>, StepResult) {
    let t0 = Instant::now();
    let index = HashIndex::build(records, hasher);
    let elapsed = t0.elapsed();
    let res = StepResult::new(0, elapsed).with_message(step_message("Creating time", elapsed));
    (index, res)
}

/// Count queries whose hash is present in `index`.
pub fn hash_search<H: NameHasher>(queries: &[String], index: &HashIndex<H>) -> StepResult {
    let t0 = Instant::now();
    let matched = queries.iter().filter(|q| index.contains(q)).count();
    let res = StepResult::new(matched, t0.elapsed());
    let msg = found_message(matched, queries.len(), res.elapsed);
    res.with_message(msg)
}
