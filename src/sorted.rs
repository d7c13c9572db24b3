use crate::{cell::next_state, Cell, CellSet, Engine, EngineKind};

/// Engine that counts neighbours by sorting instead of hashing.
///
/// Every live cell emits its 8 neighbours into one vector; after sorting,
/// equal coordinates form runs whose lengths are the neighbour counts.
/// Liveness is checked by binary search in the sorted live cells. Both sorts
/// use the `Ord` of [`Cell`], which keeps the binary search valid.
#[derive(Default)]
pub struct SortedEngine {
    alive: Vec<Cell>,
    candidates: Vec<Cell>,
}

impl SortedEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Engine for SortedEngine {
    fn advance(&mut self, cells: &mut CellSet) {
        self.alive.clear();
        self.alive.extend(cells.iter().copied());
        self.alive.sort_unstable();

        self.candidates.clear();
        self.candidates.reserve(self.alive.len() * 8);
        for cell in self.alive.iter().filter(|c| !c.would_overflow()) {
            self.candidates.extend_from_slice(&cell.neighbors());
        }
        self.candidates.sort_unstable();

        cells.clear();
        for run in self.candidates.chunk_by(|a, b| a == b) {
            let cell = run[0];
            let count = run.len() as u32;
            if count != 2 && count != 3 {
                continue;
            }
            let alive = self.alive.binary_search(&cell).is_ok();
            if next_state(cell, count, alive) {
                cells.insert(cell);
            }
        }
    }

    fn duplicate(&self) -> Box<dyn Engine> {
        Box::new(Self::new())
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_set;

    #[test]
    fn test_l_shape_becomes_block() {
        let mut engine = SortedEngine::new();
        let mut cells = cell_set([(0, 0), (1, 0), (0, 1)]);
        engine.advance(&mut cells);
        assert_eq!(cells, cell_set([(0, 0), (1, 0), (0, 1), (1, 1)]));
    }

    #[test]
    fn test_negative_coordinates() {
        let mut engine = SortedEngine::new();
        let mut cells = cell_set([(-5, -1), (-5, 0), (-5, 1)]);
        engine.advance(&mut cells);
        assert_eq!(cells, cell_set([(-6, 0), (-5, 0), (-4, 0)]));
    }
}
