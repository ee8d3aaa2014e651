//! Three-way array merge
//!
//! Arrays of identity references are merged as ordered sets (child lists
//! and the like), everything else positionally. The ordered-set merge is a
//! greedy approximation: finding the minimal set of moves is intractable,
//! so each side's order is imposed by nudging ranks, lhs first, then rhs.
//!
//! Author: Moroya Sakamoto

use crate::value::Value;

/// Merge two edited copies of `base`
///
/// The element type is taken from the first element of the first non-empty
/// input (base, then lhs, then rhs). All inputs empty gives an empty result.
pub fn merge_arrays(base: &[Value], lhs: &[Value], rhs: &[Value]) -> Vec<Value> {
    let Some(first) = [base, lhs, rhs].into_iter().find_map(<[Value]>::first) else {
        return Vec::new();
    };
    if first.is_identity() {
        merge_ordered_sets(base, lhs, rhs)
    } else {
        merge_positional(base, lhs, rhs)
    }
}

/// Fixed-length merge: per index, a side that differs from base wins, rhs last.
/// A length change on either side is taken (rhs again last). Indices past
/// base's end start out as [`Value::Absent`].
fn merge_positional(base: &[Value], lhs: &[Value], rhs: &[Value]) -> Vec<Value> {
    let mut len = base.len();
    if lhs.len() != base.len() {
        len = lhs.len();
    }
    if rhs.len() != base.len() {
        len = rhs.len();
    }

    let mut out: Vec<Value> = (0..len)
        .map(|i| base.get(i).cloned().unwrap_or_default())
        .collect();

    for side in [lhs, rhs] {
        for (i, value) in side.iter().enumerate().take(len) {
            if base.get(i) != Some(value) {
                out[i] = value.clone();
            }
        }
    }
    out
}

/// Candidate element with its position in each input
#[derive(Debug)]
struct Entry<'a> {
    value: &'a Value,
    base: Option<usize>,
    lhs: Option<usize>,
    rhs: Option<usize>,
    rank: f64,
}

impl<'a> Entry<'a> {
    fn new(value: &'a Value, base: Option<usize>) -> Self {
        Self {
            value,
            base,
            lhs: None,
            rhs: None,
            rank: base.map_or(f64::MAX, |i| i as f64),
        }
    }

    /// Present in base but dropped by at least one side
    fn is_deleted(&self) -> bool {
        self.base.is_some() && (self.lhs.is_none() || self.rhs.is_none())
    }
}

fn lhs_slot<'e>(entry: &'e mut Entry<'_>) -> &'e mut Option<usize> {
    &mut entry.lhs
}

fn rhs_slot<'e>(entry: &'e mut Entry<'_>) -> &'e mut Option<usize> {
    &mut entry.rhs
}

fn merge_ordered_sets(base: &[Value], lhs: &[Value], rhs: &[Value]) -> Vec<Value> {
    let mut pool: Vec<Entry<'_>> = Vec::with_capacity(base.len() + lhs.len() + rhs.len());
    pool.extend(base.iter().enumerate().map(|(i, v)| Entry::new(v, Some(i))));

    let lhs_order = match_side(&mut pool, lhs, lhs_slot);
    let rhs_order = match_side(&mut pool, rhs, rhs_slot);

    nudge_ranks(&mut pool, &lhs_order);
    nudge_ranks(&mut pool, &rhs_order);

    // stable: equal ranks keep pool order
    pool.sort_by(|a, b| a.rank.total_cmp(&b.rank));
    pool.iter()
        .filter(|e| !e.is_deleted())
        .map(|e| e.value.clone())
        .collect()
}

/// Match each element of `side` to the first pool entry with an equal
/// value not yet claimed by this side. Unmatched elements join the pool.
/// Returns the pool index for every element of `side`, in order.
fn match_side<'a>(
    pool: &mut Vec<Entry<'a>>,
    side: &'a [Value],
    slot: for<'e> fn(&'e mut Entry<'a>) -> &'e mut Option<usize>,
) -> Vec<usize> {
    let mut order = Vec::with_capacity(side.len());
    for (i, value) in side.iter().enumerate() {
        let found = pool
            .iter_mut()
            .position(|e| slot(e).is_none() && e.value == value);
        let index = match found {
            Some(j) => j,
            None => {
                pool.push(Entry::new(value, None));
                pool.len() - 1
            }
        };
        *slot(&mut pool[index]) = Some(i);
        order.push(index);
    }
    order
}

/// Walk one side's order and pull every element that ranks at or above
/// the lowest-ranked live element after it down to the midpoint between
/// that rank and the previously placed one.
fn nudge_ranks(pool: &mut [Entry<'_>], order: &[usize]) {
    let mut last = -0.5;
    for (i, &current) in order.iter().enumerate() {
        if pool[current].is_deleted() {
            continue;
        }
        let lowest_following = order[i + 1..]
            .iter()
            .map(|&j| &pool[j])
            .filter(|e| !e.is_deleted())
            .map(|e| e.rank)
            .fold(f64::MAX, f64::min);

        let entry = &mut pool[current];
        if entry.rank >= lowest_following {
            entry.rank = last + (lowest_following - last) / 2.0;
        }
        last = entry.rank;
    }
}
