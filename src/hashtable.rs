use crate::{cell::next_state, CellCountMap, CellSet, Engine, EngineKind};

/// Reference engine: every live cell bumps the counters of its 8 neighbours
/// in a hash map, then the map is scanned once.
#[derive(Default)]
pub struct HashtableEngine {
    counts: CellCountMap,
    next: CellSet,
}

impl HashtableEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Engine for HashtableEngine {
    fn advance(&mut self, cells: &mut CellSet) {
        self.counts.clear();
        for cell in cells.iter().filter(|c| !c.would_overflow()) {
            for n in cell.neighbors() {
                *self.counts.entry(n).or_insert(0) += 1;
            }
        }

        self.next.clear();
        self.next.reserve(cells.len());
        for (&cell, &count) in self.counts.iter() {
            if next_state(cell, count as u32, cells.contains(&cell)) {
                self.next.insert(cell);
            }
        }

        std::mem::swap(cells, &mut self.next);
        self.next.clear();
    }

    fn duplicate(&self) -> Box<dyn Engine> {
        Box::new(Self::new())
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Hashtable
    }
}
