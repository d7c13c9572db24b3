/// Index of a node in the arena of the current call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeIdx(pub u32);

impl NodeIdx {
    /// The dead leaf. Leaves never enter the hash chains, so it also
    /// terminates them.
    pub const DEAD: NodeIdx = NodeIdx(0);
    pub const ALIVE: NodeIdx = NodeIdx(1);

    #[inline]
    pub fn leaf(alive: bool) -> Self {
        if alive {
            Self::ALIVE
        } else {
            Self::DEAD
        }
    }
}

/// Square of `2^level x 2^level` cells.
///
/// Children of a level-0 node are unused.
#[derive(Clone, Debug, Default)]
pub struct QuadTreeNode {
    pub nw: NodeIdx,
    pub ne: NodeIdx,
    pub sw: NodeIdx,
    pub se: NodeIdx,
    pub next: NodeIdx, // next node in the hash chain
    pub population: u64,
    pub level: u32,
    pub step: Option<NodeIdx>, // cached result of `slow_step`
}

impl QuadTreeNode {
    pub fn leaf(alive: bool) -> Self {
        Self {
            population: alive as u64,
            ..Default::default()
        }
    }

    #[inline]
    pub fn hash(nw: NodeIdx, ne: NodeIdx, sw: NodeIdx, se: NodeIdx) -> usize {
        let h = 0u32
            .wrapping_add(nw.0.wrapping_mul(5))
            .wrapping_add(ne.0.wrapping_mul(17))
            .wrapping_add(sw.0.wrapping_mul(257))
            .wrapping_add(se.0.wrapping_mul(65537));
        h.wrapping_add(h >> 11) as usize
    }

    #[inline]
    pub fn children(&self) -> [NodeIdx; 4] {
        [self.nw, self.ne, self.sw, self.se]
    }
}
