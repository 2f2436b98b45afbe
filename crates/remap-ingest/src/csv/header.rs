//! Header row normalization.

use std::collections::{BTreeMap, BTreeSet};

/// Turns a raw header row into unique column names.
///
/// Blank names become `Unnamed: <index>`. Repeated names get a numeric
/// suffix: the second `X` becomes `X.1`, the third `X.2`, skipping any
/// suffixed name that is already taken.
pub fn normalize_headers(raw: &[String]) -> Vec<String> {
    let mut taken: BTreeSet<String> = BTreeSet::new();
    let mut next_suffix: BTreeMap<String, usize> = BTreeMap::new();
    let mut columns = Vec::with_capacity(raw.len());
    for (index, name) in raw.iter().enumerate() {
        let column = if name.trim().is_empty() {
            format!("Unnamed: {index}")
        } else {
            name.clone()
        };
        if taken.insert(column.clone()) {
            columns.push(column);
            continue;
        }
        let suffix = next_suffix.entry(column.clone()).or_insert(1);
        loop {
            let candidate = format!("{column}.{suffix}");
            *suffix += 1;
            if taken.insert(candidate.clone()) {
                columns.push(candidate);
                break;
            }
        }
    }
    columns
}
