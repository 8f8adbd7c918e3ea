//! Integrity detector - flags circular transfer patterns
//!
//! Transfers are paired into directed edges sender -> receiver by amount
//! only: for each `TransferOut` record the nearest *older* `TransferIn` with
//! an identical amount supplies the receiver. Because a transfer writes its
//! `TransferIn` after its `TransferOut`, that match is usually the receiving
//! side of an earlier transfer, not the transfer's own pair. This is a known
//! heuristic; unrelated transfers with equal amounts can be paired and
//! cycles with distinct amounts go unnoticed.
//!
//! A breadth-first walk is then started from every unvisited account in
//! registry order. Each edge whose target is already visited is reported.

use std::collections::{BTreeSet, HashMap, VecDeque};

use serde::Serialize;

use crate::domain::{AccountRegistry, Ledger, TransactionKind};

/// Directed transfer edge inferred from the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TransferEdge {
    pub from: u32,
    pub to: u32,
}

/// Two accounts joined by an edge discovered after its target was visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SuspiciousPair {
    pub from: u32,
    pub to: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    /// Inferred edges, in ledger scan order, without duplicates
    pub edges: Vec<TransferEdge>,
    /// Flagged pairs, in traversal order
    pub suspicious: Vec<SuspiciousPair>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.suspicious.is_empty()
    }
}

/// Pair every `TransferOut` with the nearest older `TransferIn` of equal amount
pub fn infer_edges(ledger: &Ledger) -> Vec<TransferEdge> {
    let records: Vec<_> = ledger.iter().collect();
    let mut seen = BTreeSet::new();
    let mut edges = Vec::new();

    for (index, out) in records.iter().enumerate() {
        if out.kind() != TransactionKind::TransferOut {
            continue;
        }
        let receiver = records[index + 1..]
            .iter()
            .find(|r| r.kind() == TransactionKind::TransferIn && r.amount() == out.amount());

        if let Some(receiver) = receiver {
            let edge = TransferEdge {
                from: out.account_number(),
                to: receiver.account_number(),
            };
            if seen.insert(edge) {
                edges.push(edge);
            }
        }
    }

    edges
}

pub struct IntegrityDetector;

impl IntegrityDetector {
    /// Scan the full ledger and traverse the inferred transfer graph
    ///
    /// Only registered accounts take part in the traversal; edges touching
    /// deleted accounts are listed in the report but never walked.
    pub fn detect(ledger: &Ledger, registry: &AccountRegistry) -> IntegrityReport {
        let edges = infer_edges(ledger);

        let positions: HashMap<u32, usize> = registry
            .iter()
            .enumerate()
            .map(|(index, account)| (account.account_number, index))
            .collect();
        let numbers: Vec<u32> = registry.iter().map(|a| a.account_number).collect();

        // Neighbour sets keyed by registry position, so walks follow registry order
        let mut adjacency: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); numbers.len()];
        for edge in &edges {
            if let (Some(&from), Some(&to)) = (positions.get(&edge.from), positions.get(&edge.to)) {
                adjacency[from].insert(to);
            }
        }

        let mut visited = vec![false; numbers.len()];
        let mut suspicious = Vec::new();

        for start in 0..numbers.len() {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            let mut queue = VecDeque::from([start]);

            while let Some(current) = queue.pop_front() {
                for &next in &adjacency[current] {
                    if visited[next] {
                        suspicious.push(SuspiciousPair {
                            from: numbers[current],
                            to: numbers[next],
                        });
                    } else {
                        visited[next] = true;
                        queue.push_back(next);
                    }
                }
            }
        }

        IntegrityReport { edges, suspicious }
    }
}
