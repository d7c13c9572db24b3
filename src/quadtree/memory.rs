use super::{ChunkVec, NodeIdx, QuadTreeNode};
use crate::config::Config;
use crate::NiceInt;

/// Arena of quadtree nodes together with the table that keeps them canonical:
/// for every `(nw, ne, sw, se)` there is at most one node, so structural
/// equality of subtrees is equality of their indices.
///
/// Lives for one `advance` call; [`MemoryManager::clear`] invalidates every
/// index handed out before.
pub struct MemoryManager {
    // all allocated nodes; 0 and 1 are the dead and alive leaves
    storage: ChunkVec<QuadTreeNode>,
    // heads of hash chains, linked through `QuadTreeNode::next`
    hashtable: Vec<NodeIdx>,
    // canonical empty node for every level built so far
    blank: Vec<NodeIdx>,
    // how many times elements were found
    pub hits: u64,
    // how many times elements were inserted
    pub misses: u64,
}

impl MemoryManager {
    pub fn new() -> Self {
        let mut mem = Self {
            storage: ChunkVec::new(Config::arena_chunk_log2()),
            hashtable: vec![],
            blank: vec![],
            hits: 0,
            misses: 0,
        };
        mem.clear();
        mem
    }

    /// Forgets every node. The arena keeps its first chunk for reuse.
    pub fn clear(&mut self) {
        self.storage.reset(Config::arena_chunk_log2());
        self.storage.push(QuadTreeNode::leaf(false));
        self.storage.push(QuadTreeNode::leaf(true));

        let cap = 1 << Config::hashtable_cap_log2();
        if self.hashtable.len() == cap {
            self.hashtable.fill(NodeIdx::DEAD);
        } else {
            self.hashtable = vec![NodeIdx::DEAD; cap];
        }
        self.blank.clear();
        self.blank.push(NodeIdx::DEAD);
        self.hits = 0;
        self.misses = 0;
    }

    #[inline]
    pub fn get(&self, idx: NodeIdx) -> &QuadTreeNode {
        &self.storage[idx.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, idx: NodeIdx) -> &mut QuadTreeNode {
        &mut self.storage[idx.0 as usize]
    }

    #[inline]
    pub fn level(&self, idx: NodeIdx) -> u32 {
        self.get(idx).level
    }

    #[inline]
    pub fn population(&self, idx: NodeIdx) -> u64 {
        self.get(idx).population
    }

    /// Canonical node with the given children; created if not present.
    ///
    /// All four children must be of the same level.
    pub fn find_node(&mut self, nw: NodeIdx, ne: NodeIdx, sw: NodeIdx, se: NodeIdx) -> NodeIdx {
        let level = self.level(nw);
        debug_assert!(
            [ne, sw, se].iter().all(|&c| self.level(c) == level),
            "children of different levels"
        );

        let hash = QuadTreeNode::hash(nw, ne, sw, se);
        let i = hash & (self.hashtable.len() - 1);
        let mut node = self.hashtable[i];
        let mut prev = NodeIdx::DEAD;
        // search for the node in the linked list
        while node != NodeIdx::DEAD {
            let n = self.get(node);
            let next = n.next;
            if n.nw == nw && n.ne == ne && n.sw == sw && n.se == se {
                // move the node to the front of the list
                if prev != NodeIdx::DEAD {
                    self.get_mut(prev).next = next;
                    self.get_mut(node).next = self.hashtable[i];
                    self.hashtable[i] = node;
                }
                self.hits += 1;
                return node;
            }
            prev = node;
            node = next;
        }

        self.misses += 1;
        let population = [nw, ne, sw, se]
            .iter()
            .map(|&c| self.population(c))
            .sum();
        assert!(u32::try_from(self.storage.len()).is_ok(), "u32 is insufficient");
        let idx = NodeIdx(self.storage.len() as u32);
        self.storage.push(QuadTreeNode {
            nw,
            ne,
            sw,
            se,
            next: self.hashtable[i],
            population,
            level: level + 1,
            step: None,
        });
        self.hashtable[i] = idx;
        if self.storage.len() > self.hashtable.len() {
            self.rehash();
        }
        idx
    }

    fn rehash(&mut self) {
        let new_size = self.hashtable.len() << 1;
        let mut new_buf = vec![NodeIdx::DEAD; new_size];
        for mut node in std::mem::take(&mut self.hashtable) {
            while node != NodeIdx::DEAD {
                let n = self.get(node);
                let hash = QuadTreeNode::hash(n.nw, n.ne, n.sw, n.se);
                let next = n.next;
                let index = hash & (new_size - 1);
                self.get_mut(node).next = new_buf[index];
                new_buf[index] = node;
                node = next;
            }
        }
        self.hashtable = new_buf;
    }

    /// Canonical node of the given level without live cells.
    pub fn blank(&mut self, level: u32) -> NodeIdx {
        while self.blank.len() <= level as usize {
            let b = self.blank[self.blank.len() - 1];
            let next = self.find_node(b, b, b, b);
            self.blank.push(next);
        }
        self.blank[level as usize]
    }

    /// Central subnode, one level down. Pure pointer selection, no simulation.
    pub fn center(&mut self, node: NodeIdx) -> NodeIdx {
        let n = self.get(node);
        let [nw, ne, sw, se] = n.children().map(|c| self.get(c).clone());
        self.find_node(nw.se, ne.sw, sw.ne, se.nw)
    }

    /// Number of nodes, including both leaves.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn bytes_total(&self) -> usize {
        self.storage.bytes_total() + self.hashtable.len() * std::mem::size_of::<NodeIdx>()
    }

    /// Get statistics about the memory manager.
    pub fn stats(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!(
            "nodes: {} in {} arena chunks\n",
            NiceInt::from_usize(self.len()),
            self.storage.chunk_count(),
        ));
        s.push_str(&format!(
            "memory on nodes: {} KB\n",
            NiceInt::from_usize(self.bytes_total() >> 10),
        ));
        s.push_str(&format!(
            "hashtable misses / hits: {} / {}\n",
            NiceInt::from(self.misses),
            NiceInt::from(self.hits),
        ));
        s
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_are_canonical() {
        let mut mem = MemoryManager::new();
        let (d, a) = (NodeIdx::DEAD, NodeIdx::ALIVE);
        let x = mem.find_node(a, d, d, a);
        let y = mem.find_node(a, d, d, a);
        let z = mem.find_node(d, a, a, d);
        assert_eq!(x, y);
        assert_ne!(x, z);
        assert_eq!(mem.population(x), 2);
        assert_eq!(mem.level(x), 1);
        assert_eq!(mem.hits, 1);
        assert_eq!(mem.misses, 2);

        let p = mem.find_node(x, z, z, x);
        let q = mem.find_node(x, z, z, x);
        assert_eq!(p, q);
        assert_eq!(mem.population(p), 8);
        assert_eq!(mem.level(p), 2);
    }

    #[test]
    fn test_blank_nodes() {
        let mut mem = MemoryManager::new();
        assert_eq!(mem.blank(0), NodeIdx::DEAD);
        let b3 = mem.blank(3);
        assert_eq!(mem.level(b3), 3);
        assert_eq!(mem.population(b3), 0);
        let b2 = mem.blank(2);
        assert_eq!(mem.find_node(b2, b2, b2, b2), b3);
    }

    #[test]
    fn test_survives_rehash() {
        let mut mem = MemoryManager::new();
        let initial_buckets = mem.hashtable.len();
        let (d, a) = (NodeIdx::DEAD, NodeIdx::ALIVE);
        let level1: Vec<_> = (0..16u32)
            .map(|bits| {
                let [nw, ne, sw, se] = [0, 1, 2, 3].map(|i| NodeIdx::leaf(bits >> i & 1 != 0));
                mem.find_node(nw, ne, sw, se)
            })
            .collect();
        let mut level2 = vec![];
        for &p in &level1 {
            for &q in &level1 {
                level2.push(mem.find_node(p, q, q, p));
            }
        }
        // 65536 more nodes outgrow the default table several times
        let mut level3 = vec![];
        for &p in &level2 {
            for &q in &level2 {
                level3.push(((p, q), mem.find_node(p, q, q, p)));
            }
        }
        assert_eq!(mem.len(), 2 + 16 + 256 + 65536);
        assert!(mem.hashtable.len() > initial_buckets);
        assert!(mem.hashtable.len() >= mem.len());
        let misses = mem.misses;
        for ((p, q), idx) in level3 {
            assert_eq!(mem.find_node(p, q, q, p), idx);
        }
        assert_eq!(mem.misses, misses);
        assert_eq!(mem.find_node(d, d, d, d), level1[0]);
        assert_eq!(mem.find_node(a, a, a, a), level1[15]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut mem = MemoryManager::new();
        let a = NodeIdx::ALIVE;
        mem.find_node(a, a, a, a);
        mem.blank(5);
        mem.clear();
        assert_eq!(mem.len(), 2);
        assert_eq!(mem.hits + mem.misses, 0);
        assert_eq!(mem.population(NodeIdx::ALIVE), 1);
        assert_eq!(mem.population(NodeIdx::DEAD), 0);
    }

    #[test]
    fn test_center() {
        let mut mem = MemoryManager::new();
        let (d, a) = (NodeIdx::DEAD, NodeIdx::ALIVE);
        // only the four central cells of a 4x4 square are alive
        let nw = mem.find_node(d, d, d, a);
        let ne = mem.find_node(d, d, a, d);
        let sw = mem.find_node(d, a, d, d);
        let se = mem.find_node(a, d, d, d);
        let root = mem.find_node(nw, ne, sw, se);
        let c = mem.center(root);
        assert_eq!(c, mem.find_node(a, a, a, a));
    }
}
