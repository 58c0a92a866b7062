use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::models::Coordinate;

/// Index of a node in the engine's arena.
pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Key {
    score: i64,
    seq: u64,
    id: NodeId,
    coordinate: Coordinate,
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is max-heap; invert for lowest score, then oldest insertion
        (other.score, other.seq).cmp(&(self.score, self.seq))
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Copy, Debug)]
struct Member {
    id: NodeId,
    score: i64,
}

/// Search frontier ordered by `(score, seq)`.
///
/// `seq` is the order in which a coordinate first entered the frontier and
/// survives score decreases, so among equal scores the earliest discovered
/// node wins. This is the order a linear scan over an insertion-ordered list
/// would produce. Superseded heap entries are dropped lazily on pop.
#[derive(Clone, Debug, Default)]
pub struct OpenSet {
    heap: BinaryHeap<Key>,
    members: HashMap<Coordinate, Member>,
}

impl OpenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, coordinate: Coordinate) -> Option<NodeId> {
        self.members.get(&coordinate).map(|m| m.id)
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.members.contains_key(&coordinate)
    }

    /// Adds a coordinate not currently in the set.
    pub fn insert(&mut self, coordinate: Coordinate, id: NodeId, seq: u64, score: i64) {
        debug_assert!(!self.members.contains_key(&coordinate), "coordinate already open");
        self.members.insert(coordinate, Member { id, score });
        self.heap.push(Key { score, seq, id, coordinate });
    }

    /// Lowers the score of an open member, keeping its original `seq`.
    pub fn decrease(&mut self, coordinate: Coordinate, seq: u64, score: i64) {
        if let Some(m) = self.members.get_mut(&coordinate) {
            if score < m.score {
                m.score = score;
                self.heap.push(Key { score, seq, id: m.id, coordinate });
            }
        }
    }

    /// Removes and returns the member with the lowest `(score, seq)`.
    pub fn pop(&mut self) -> Option<NodeId> {
        while let Some(key) = self.heap.pop() {
            match self.members.get(&key.coordinate) {
                Some(m) if m.id == key.id && m.score == key.score => {
                    self.members.remove(&key.coordinate);
                    return Some(key.id);
                }
                // stale
                _ => continue,
            }
        }
        None
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.members.values().map(|m| m.id)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.members.clear();
    }
}
