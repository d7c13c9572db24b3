use crate::Cell;
use std::collections::HashMap;

/// Side of the square chunks cells are bucketed into.
///
/// Live cells in chunks that do not touch (even by a corner) are more than
/// `CHUNK_SIDE` apart, while a cell only reacts to cells at distance 1. Such
/// groups cannot influence each other within one generation.
pub const CHUNK_SIDE: i64 = 64;

/// Disjoint-set forest with path compression and union by size.
pub struct DisjointSets {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSets {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[x] != root {
            let next = self.parent[x];
            self.parent[x] = root;
            x = next;
        }
        root
    }

    /// Returns `false` if `a` and `b` were already in one set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        true
    }
}

/// Chunk coordinates of a cell; floor division, so `-1` lands in chunk `-1`.
#[inline]
pub fn chunk_of(cell: Cell) -> (i64, i64) {
    (cell.x.div_euclid(CHUNK_SIDE), cell.y.div_euclid(CHUNK_SIDE))
}

/// Splits cells into groups that evolve independently for one generation.
///
/// Chunks touching by an edge or a corner end up in the same group. Groups
/// come out in a deterministic order: by the smallest chunk they contain.
pub fn clusters(cells: impl IntoIterator<Item = Cell>) -> Vec<Vec<Cell>> {
    let mut index: HashMap<(i64, i64), usize, ahash::RandomState> = HashMap::default();
    let mut keys = vec![];
    let mut buckets: Vec<Vec<Cell>> = vec![];
    for cell in cells {
        let key = chunk_of(cell);
        let i = *index.entry(key).or_insert_with(|| {
            keys.push(key);
            buckets.push(vec![]);
            keys.len() - 1
        });
        buckets[i].push(cell);
    }

    let mut sets = DisjointSets::new(keys.len());
    for (i, &(cx, cy)) in keys.iter().enumerate() {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx, dy) == (0, 0) {
                    continue;
                }
                // chunk coordinates are at most 2^58 in magnitude
                if let Some(&j) = index.get(&(cx + dx, cy + dy)) {
                    sets.union(i, j);
                }
            }
        }
    }

    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_unstable_by_key(|&i| keys[i]);
    let mut slot = vec![usize::MAX; keys.len()];
    let mut result: Vec<Vec<Cell>> = vec![];
    for i in order {
        let root = sets.find(i);
        if slot[root] == usize::MAX {
            slot[root] = result.len();
            result.push(vec![]);
        }
        result[slot[root]].append(&mut buckets[i]);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_sets() {
        let mut s = DisjointSets::new(6);
        assert!(s.union(0, 1));
        assert!(s.union(2, 3));
        assert!(s.union(1, 3));
        assert!(!s.union(0, 2));
        assert_eq!(s.find(0), s.find(3));
        assert_ne!(s.find(0), s.find(4));
        assert_ne!(s.find(4), s.find(5));
    }

    #[test]
    fn test_chunk_of_negative() {
        assert_eq!(chunk_of(Cell::new(0, 63)), (0, 0));
        assert_eq!(chunk_of(Cell::new(64, -1)), (1, -1));
        assert_eq!(chunk_of(Cell::new(-64, -65)), (-1, -2));
        assert_eq!(chunk_of(Cell::new(i64::MIN, i64::MAX)), (i64::MIN / 64, i64::MAX / 64));
    }

    #[test]
    fn test_adjacent_chunks_merge() {
        // (63, 63) and (64, 64) sit in diagonal chunks and do interact
        let groups = clusters([Cell::new(63, 63), Cell::new(64, 64), Cell::new(-1, 0)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
    }

    #[test]
    fn test_distant_chunks_split() {
        let groups = clusters([Cell::new(0, 0), Cell::new(128, 0), Cell::new(1, 1)]);
        assert_eq!(groups.len(), 2);
        let mut sizes: Vec<_> = groups.iter().map(Vec::len).collect();
        sizes.sort();
        assert_eq!(sizes, [1, 2]);
    }

    #[test]
    fn test_chain_of_chunks() {
        let cells: Vec<_> = (0..10).map(|i| Cell::new(i * 64, -i * 64)).collect();
        let groups = clusters(cells);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 10);
    }

    #[test]
    fn test_empty() {
        assert!(clusters(std::iter::empty()).is_empty());
    }
}
