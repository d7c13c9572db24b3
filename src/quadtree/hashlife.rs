use super::{cluster, MemoryManager, NodeIdx};
use crate::{cell::life_rule, Cell, CellSet, Engine, EngineKind, NiceInt};

/// Quadtree engine: hash-consed nodes, memoized steps and clustering of
/// distant cell groups.
///
/// Unlike classic HashLife, a node of level `k` is stepped by exactly one
/// generation, not by `2^(k-2)`. Memory is reset at the start of every call.
pub struct HashLifeEngine {
    mem: MemoryManager,
    last: CallStats,
}

#[derive(Clone, Copy, Default)]
struct CallStats {
    clusters: usize,
    edge_cells: usize,
    max_level: u32,
}

/// One cluster being turned into a tree, stepped and flattened back.
///
/// `cells` must be sorted. Coordinates are widened to `i128` so that padding
/// around cells near the edge of the `i64` range cannot overflow.
struct ClusterTree<'a> {
    mem: &'a mut MemoryManager,
    cells: &'a [Cell],
}

impl ClusterTree<'_> {
    /// Whether any cell lies in `[x, x + size) x [y, y + size)`.
    fn has_cell_in(&self, x: i128, y: i128, size: i128) -> bool {
        let mut rest = &self.cells[self.cells.partition_point(|c| (c.x as i128) < x)..];
        while let Some(first) = rest.first() {
            if first.x as i128 >= x + size {
                return false;
            }
            let col = first.x;
            let (column, tail) = rest.split_at(rest.partition_point(|c| c.x == col));
            if let Some(c) = column.get(column.partition_point(|c| (c.y as i128) < y)) {
                if (c.y as i128) < y + size {
                    return true;
                }
            }
            rest = tail;
        }
        false
    }

    /// Builds the square of side `2^level` with the top-left corner at `(x, y)`.
    fn build(&mut self, x: i128, y: i128, level: u32) -> NodeIdx {
        let size = 1i128 << level;
        if !self.has_cell_in(x, y, size) {
            return self.mem.blank(level);
        }
        if level == 0 {
            return NodeIdx::ALIVE;
        }
        let half = size >> 1;
        let nw = self.build(x, y, level - 1);
        let ne = self.build(x + half, y, level - 1);
        let sw = self.build(x, y + half, level - 1);
        let se = self.build(x + half, y + half, level - 1);
        self.mem.find_node(nw, ne, sw, se)
    }

    /// Surrounds `node` with blank space, keeping it in the center.
    /// `(ox, oy)` is the top-left corner and moves accordingly.
    fn expand(&mut self, node: NodeIdx, ox: &mut i128, oy: &mut i128) -> NodeIdx {
        let n = self.mem.get(node).clone();
        *ox -= 1i128 << (n.level - 1);
        *oy -= 1i128 << (n.level - 1);
        let b = self.mem.blank(n.level - 1);
        let nw = self.mem.find_node(b, b, b, n.nw);
        let ne = self.mem.find_node(b, b, n.ne, b);
        let sw = self.mem.find_node(b, n.sw, b, b);
        let se = self.mem.find_node(n.se, b, b, b);
        self.mem.find_node(nw, ne, sw, se)
    }

    /// Central square of half the side, one generation ahead.
    ///
    /// `node` must be of level 2 or higher.
    fn slow_step(&mut self, node: NodeIdx) -> NodeIdx {
        let n = self.mem.get(node);
        if let Some(cache) = n.step {
            return cache;
        }
        let (level, population, children) = (n.level, n.population, n.children());
        debug_assert!(level >= 2);

        let result = if population == 0 {
            self.mem.blank(level - 1)
        } else if level == 2 {
            self.step_4x4(node)
        } else {
            let [nw, ne, sw, se] = children;
            let [nw_, ne_, sw_, se_] = [nw, ne, sw, se].map(|x| self.mem.get(x).clone());

            // overlapping squares between the quadrants
            let t01 = self.mem.find_node(nw_.ne, ne_.nw, nw_.se, ne_.sw);
            let t10 = self.mem.find_node(nw_.sw, nw_.se, sw_.nw, sw_.ne);
            let t11 = self.mem.find_node(nw_.se, ne_.sw, sw_.ne, se_.nw);
            let t12 = self.mem.find_node(ne_.sw, ne_.se, se_.nw, se_.ne);
            let t21 = self.mem.find_node(sw_.ne, se_.nw, sw_.se, se_.sw);

            // 3x3 grid of squares of a quarter side, no simulation yet
            let [r00, r01, r02, r10, r11, r12, r20, r21, r22] =
                [nw, t01, ne, t10, t11, t12, sw, t21, se].map(|x| self.mem.center(x));

            let q_nw = self.mem.find_node(r00, r01, r10, r11);
            let q_ne = self.mem.find_node(r01, r02, r11, r12);
            let q_sw = self.mem.find_node(r10, r11, r20, r21);
            let q_se = self.mem.find_node(r11, r12, r21, r22);
            let [s_nw, s_ne, s_sw, s_se] = [q_nw, q_ne, q_sw, q_se].map(|x| self.slow_step(x));
            self.mem.find_node(s_nw, s_ne, s_sw, s_se)
        };
        self.mem.get_mut(node).step = Some(result);
        result
    }

    /// Applies the rule to the central 2x2 cells of a 4x4 square.
    fn step_4x4(&mut self, node: NodeIdx) -> NodeIdx {
        // grid[y][x]
        let mut grid = [[0u32; 4]; 4];
        for (q, &quadrant) in self.mem.get(node).children().iter().enumerate() {
            let (qx, qy) = ((q & 1) * 2, (q >> 1) * 2);
            for (i, &leaf) in self.mem.get(quadrant).children().iter().enumerate() {
                grid[qy + (i >> 1)][qx + (i & 1)] = self.mem.population(leaf) as u32;
            }
        }
        let rule = |x: usize, y: usize| {
            let sum: u32 = (y - 1..=y + 1)
                .flat_map(|sy| (x - 1..=x + 1).map(move |sx| (sx, sy)))
                .filter(|&(sx, sy)| (sx, sy) != (x, y))
                .map(|(sx, sy)| grid[sy][sx])
                .sum();
            NodeIdx::leaf(life_rule(sum, grid[y][x] != 0))
        };
        let [nw, ne, sw, se] = [rule(1, 1), rule(2, 1), rule(1, 2), rule(2, 2)];
        self.mem.find_node(nw, ne, sw, se)
    }

    /// Inserts every live cell of `node`, whose top-left corner is `(x, y)`.
    ///
    /// Cells outside the `i64` plane or on its edge are never born and get
    /// skipped.
    fn flatten(&self, node: NodeIdx, x: i128, y: i128, out: &mut CellSet) {
        let n = self.mem.get(node);
        if n.population == 0 {
            return;
        }
        if n.level == 0 {
            if let (Ok(x), Ok(y)) = (i64::try_from(x), i64::try_from(y)) {
                let cell = Cell::new(x, y);
                if !cell.would_overflow() {
                    out.insert(cell);
                }
            }
            return;
        }
        let half = 1i128 << (n.level - 1);
        for (i, child) in n.children().into_iter().enumerate() {
            let x = x + half * (i & 1) as i128;
            let y = y + half * (i >> 1) as i128;
            self.flatten(child, x, y, out);
        }
    }

    /// Steps the cluster by one generation and adds the result to `out`.
    /// Returns the level of the tree that was stepped.
    fn step_into(&mut self, out: &mut CellSet) -> u32 {
        let Some(&first) = self.cells.first() else {
            return 0;
        };
        let (mut min_x, mut max_x) = (first.x as i128, first.x as i128);
        let (mut min_y, mut max_y) = (first.y as i128, first.y as i128);
        for c in self.cells {
            min_x = min_x.min(c.x as i128);
            max_x = max_x.max(c.x as i128);
            min_y = min_y.min(c.y as i128);
            max_y = max_y.max(c.y as i128);
        }
        let (range_x, range_y) = (max_x - min_x + 1, max_y - min_y + 1);
        let range = range_x.max(range_y);
        let mut level = 1;
        while (1i128 << level) < range {
            level += 1;
        }
        let size = 1i128 << level;
        let mut ox = min_x - (size - range_x) / 2;
        let mut oy = min_y - (size - range_y) / 2;

        let mut root = self.build(ox, oy, level);
        // the stepped square must stay away from the border of the tree
        while self.mem.level(root) < 2 {
            root = self.expand(root, &mut ox, &mut oy);
        }
        root = self.expand(root, &mut ox, &mut oy);
        root = self.expand(root, &mut ox, &mut oy);

        let level = self.mem.level(root);
        let result = self.slow_step(root);
        let quarter = 1i128 << (level - 2);
        self.flatten(result, ox + quarter, oy + quarter, out);
        level
    }
}

impl HashLifeEngine {
    pub fn new() -> Self {
        Self {
            mem: MemoryManager::new(),
            last: CallStats::default(),
        }
    }
}

impl Default for HashLifeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for HashLifeEngine {
    fn advance(&mut self, cells: &mut CellSet) {
        self.mem.clear();
        self.last = CallStats::default();
        if cells.is_empty() {
            return;
        }

        // edge cells stay out of the trees: they must not contribute to counts
        let (edge, interior): (Vec<Cell>, Vec<Cell>) =
            cells.iter().partition(|c| c.would_overflow());

        let mut next = CellSet::with_capacity_and_hasher(cells.len(), Default::default());
        let groups = cluster::clusters(interior.iter().copied());
        self.last.clusters = groups.len();
        for mut group in groups {
            group.sort_unstable();
            let mut tree = ClusterTree {
                mem: &mut self.mem,
                cells: &group,
            };
            let level = tree.step_into(&mut next);
            tracing::trace!(level, cells = group.len(), "stepped cluster");
            self.last.max_level = self.last.max_level.max(level);
        }

        if !edge.is_empty() {
            self.last.edge_cells = edge.len();
            let mut interior = interior;
            interior.sort_unstable();
            for cell in edge {
                let count = cell
                    .checked_neighbors()
                    .filter(|n| !n.would_overflow() && interior.binary_search(n).is_ok())
                    .count();
                if life_rule(count as u32, true) {
                    next.insert(cell);
                }
            }
        }

        tracing::debug!(
            clusters = self.last.clusters,
            nodes = self.mem.len(),
            hits = self.mem.hits,
            misses = self.mem.misses,
            boundary_cells = self.last.edge_cells,
            "hashlife step"
        );
        *cells = next;
    }

    fn duplicate(&self) -> Box<dyn Engine> {
        Box::new(Self::new())
    }

    fn kind(&self) -> EngineKind {
        EngineKind::HashLife
    }

    fn statistics(&self) -> String {
        let mut s = "Engine: Hashlife\n".to_string();
        s += &format!("Clusters: {}\n", NiceInt::from_usize(self.last.clusters));
        s += &format!("Edge cells: {}\n", NiceInt::from_usize(self.last.edge_cells));
        s += &format!("Deepest tree: level {}\n", self.last.max_level);
        s += &self.mem.stats();
        s
    }
}
