//! Error aggregator
//!
//! Merges detector outputs into one [`ResultSet`], ordered by line position
//! and keyed by identifiers unique within the set.

use std::collections::{HashMap, HashSet};

use crate::core::models::{ErrorRecord, ParsedLine, ResultSet};

/// Merge detector outputs
///
/// Records are sorted stably by the first position of their row id in
/// `line_order`; unknown row ids sort last. Each record then gets the id
/// `row_id` followed by the first free suffix of `a`, `b`, ... `z`, `aa`,
/// `ab`, ...
#[must_use]
pub fn aggregate(by_detector: Vec<Vec<ErrorRecord>>, line_order: &[ParsedLine]) -> ResultSet {
    let mut position: HashMap<&str, usize> = HashMap::new();
    for (i, line) in line_order.iter().enumerate() {
        position.entry(line.row_id.as_str()).or_insert(i);
    }

    let mut records: Vec<ErrorRecord> = by_detector.into_iter().flatten().collect();
    records.sort_by_key(|r| position.get(r.row_id.as_str()).copied().unwrap_or(usize::MAX));

    let mut taken: HashSet<String> = HashSet::with_capacity(records.len());
    let mut next_index: HashMap<String, usize> = HashMap::new();
    let mut results = ResultSet::new();
    for record in records {
        let counter = next_index.entry(record.row_id.clone()).or_insert(0);
        let id = loop {
            let candidate = format!("{}{}", record.row_id, suffix(*counter));
            *counter += 1;
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        taken.insert(id.clone());
        results.insert(id, record);
    }
    results
}

/// Bijective base-26 suffix: 0 is `a`, 25 is `z`, 26 is `aa`
#[must_use]
pub fn suffix(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'a' + u8::try_from(n % 26).unwrap_or(0));
        n /= 26;
    }
    letters.iter().rev().map(|&b| char::from(b)).collect()
}
