use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::Float;

/// Arithmetic mean of a non-empty slice
pub fn mean<F: Float>(values: &[F]) -> F {
    values.iter().copied().sum::<F>() / F::cast(values.len())
}

/// Median of a non-empty slice; for an even count the two middle values are averaged
pub fn median<F: Float>(mut values: Vec<F>) -> F {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / F::cast(2)
    } else {
        values[mid]
    }
}

/// Most frequent value of a non-empty slice, ties resolve to the smallest value
pub fn most_frequent<F: Float>(mut values: Vec<F>) -> F {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let (mut best, mut best_count) = (values[0], 0);
    let mut idx = 0;
    while idx < values.len() {
        let run = values[idx..].iter().take_while(|v| **v == values[idx]).count();
        // strict comparison keeps the earliest, hence smallest, value on ties
        if run > best_count {
            best = values[idx];
            best_count = run;
        }
        idx += run;
    }

    best
}

/// Most frequent label, ties resolve to the lexicographically smallest label
pub fn most_frequent_label<'a, I: IntoIterator<Item = &'a str>>(labels: I) -> Option<String> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0usize) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((label, count)),
        }
    }

    best.map(|(label, _)| label.to_string())
}
