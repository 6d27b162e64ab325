//! Maximum-cardinality bipartite matching between attendee rows and room-slot columns.
//!
//! Matchings are not unique, so the traversal is fixed to make results reproducible:
//!
//! 1. A seeding pass visits rows in order and gives each row the lowest free slot it is
//!    eligible for.
//! 2. Hopcroft–Karp phases follow until no augmenting path remains. Each phase layers the
//!    graph breadth-first from the free rows (rows in order, slots ascending), then runs a
//!    depth-first search from every free row in order. The depth-first search walks each
//!    row's slots from the highest index down and keeps a per-row cursor for the whole
//!    phase; rows that dead-end are dropped from the layering until the next phase.

use crate::core::graph::PreferenceGraph;
use std::collections::VecDeque;

const UNREACHED: usize = usize::MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    slot_for_row: Vec<Option<usize>>,
    row_for_slot: Vec<Option<usize>>,
}

impl Matching {
    fn empty(rows: usize, slots: usize) -> Self {
        Self {
            slot_for_row: vec![None; rows],
            row_for_slot: vec![None; slots],
        }
    }

    fn pair(&mut self, row: usize, slot: usize) {
        self.slot_for_row[row] = Some(slot);
        self.row_for_slot[slot] = Some(row);
    }

    pub fn slot_for(&self, row: usize) -> Option<usize> {
        self.slot_for_row[row]
    }

    pub fn row_for(&self, slot: usize) -> Option<usize> {
        self.row_for_slot[slot]
    }

    /// Number of matched rows.
    pub fn size(&self) -> usize {
        self.slot_for_row.iter().filter(|slot| slot.is_some()).count()
    }

    /// `(row, slot)` pairs in row order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.slot_for_row
            .iter()
            .enumerate()
            .filter_map(|(row, slot)| slot.map(|slot| (row, slot)))
    }

    pub fn unmatched_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.slot_for_row
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(row, _)| row)
    }

    /// True when every pair is an edge of `graph` and both sides agree.
    pub fn is_consistent_with(&self, graph: &PreferenceGraph) -> bool {
        self.pairs().all(|(row, slot)| {
            graph.is_eligible(row, slot) && self.row_for_slot[slot] == Some(row)
        }) && self
            .row_for_slot
            .iter()
            .enumerate()
            .all(|(slot, row)| row.map_or(true, |row| self.slot_for_row[row] == Some(slot)))
    }
}

pub fn maximum_matching(graph: &PreferenceGraph) -> Matching {
    let rows = graph.attendee_count();
    let mut matching = Matching::empty(rows, graph.slot_count());

    seed_greedy(graph, &mut matching);
    tracing::debug!(seeded = matching.size(), rows, "seeded matching");

    let mut layers = vec![UNREACHED; rows];
    let mut cursors = vec![0usize; rows];
    let mut phase = 0usize;

    while let Some(limit) = build_layers(graph, &matching, &mut layers) {
        phase += 1;
        for (row, cursor) in cursors.iter_mut().enumerate() {
            *cursor = graph.neighbours(row).len();
        }

        let mut augmented = 0usize;
        for root in 0..rows {
            if matching.slot_for(root).is_none()
                && augment_from(root, graph, &mut matching, &mut layers, &mut cursors, limit)
            {
                augmented += 1;
            }
        }

        tracing::debug!(phase, path_length = limit, augmented, "matching phase complete");
        if augmented == 0 {
            break;
        }
    }

    matching
}

fn seed_greedy(graph: &PreferenceGraph, matching: &mut Matching) {
    for row in 0..graph.attendee_count() {
        if let Some(&slot) = graph
            .neighbours(row)
            .iter()
            .find(|&&slot| matching.row_for(slot).is_none())
        {
            matching.pair(row, slot);
        }
    }
}

/// Layers rows by alternating-path distance from the free rows. Returns the length of the
/// shortest augmenting path, or `None` when the matching is already maximum.
fn build_layers(graph: &PreferenceGraph, matching: &Matching, layers: &mut [usize]) -> Option<usize> {
    let mut queue = VecDeque::new();
    for (row, layer) in layers.iter_mut().enumerate() {
        if matching.slot_for(row).is_none() {
            *layer = 0;
            queue.push_back(row);
        } else {
            *layer = UNREACHED;
        }
    }

    let mut limit = UNREACHED;
    while let Some(row) = queue.pop_front() {
        if layers[row] >= limit {
            continue;
        }
        for &slot in graph.neighbours(row) {
            match matching.row_for(slot) {
                None => {
                    if limit == UNREACHED {
                        limit = layers[row] + 1;
                    }
                }
                Some(next) => {
                    if layers[next] == UNREACHED {
                        layers[next] = layers[row] + 1;
                        queue.push_back(next);
                    }
                }
            }
        }
    }

    (limit != UNREACHED).then_some(limit)
}

fn augment_from(
    root: usize,
    graph: &PreferenceGraph,
    matching: &mut Matching,
    layers: &mut [usize],
    cursors: &mut [usize],
    limit: usize,
) -> bool {
    // path[i] is a row on the current alternating path, via[i] the slot it would take
    let mut path = vec![root];
    let mut via: Vec<usize> = Vec::new();

    while let Some(&row) = path.last() {
        if cursors[row] == 0 {
            layers[row] = UNREACHED;
            path.pop();
            via.pop();
            continue;
        }

        cursors[row] -= 1;
        let slot = graph.neighbours(row)[cursors[row]];
        let next_layer = layers[row] + 1;

        match matching.row_for(slot) {
            None if next_layer == limit => {
                via.push(slot);
                for (&row, &slot) in path.iter().zip(&via) {
                    matching.pair(row, slot);
                }
                return true;
            }
            None => {}
            Some(next) if layers[next] == next_layer => {
                via.push(slot);
                path.push(next);
            }
            Some(_) => {}
        }
    }

    false
}
