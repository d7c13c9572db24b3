use crate::utils::life106;
use crate::{create_engine, CellSet, Engine, EngineKind, Result};
use std::io::{self, BufRead, Write};

/// Live cells of a pattern together with the engine that advances them.
#[derive(Clone, Debug)]
pub struct Life {
    cells: CellSet,
    engine: Box<dyn Engine>,
}

impl Life {
    /// Empty pattern with the default (hashtable) engine.
    pub fn new() -> Self {
        Self::with_engine(CellSet::default(), EngineKind::default())
    }

    pub fn from_cells(cells: CellSet) -> Self {
        Self::with_engine(cells, EngineKind::default())
    }

    pub fn with_engine(cells: CellSet, kind: EngineKind) -> Self {
        Self {
            cells,
            engine: create_engine(kind),
        }
    }

    /// Parses Life 1.06 text.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with_engine(text, EngineKind::default())
    }

    pub fn parse_with_engine(text: &str, kind: EngineKind) -> Result<Self> {
        Ok(Self::with_engine(life106::parse_str(text)?, kind))
    }

    pub fn from_reader(input: impl BufRead, kind: EngineKind) -> Result<Self> {
        Ok(Self::with_engine(life106::parse_reader(input)?, kind))
    }

    /// Advances one generation.
    pub fn tick(&mut self) {
        self.engine.advance(&mut self.cells);
    }

    /// Advances `generations` generations; stops early once nothing is alive.
    pub fn run(&mut self, generations: u64) {
        tracing::debug!(generations, engine = %self.engine.kind(), "running");
        for _ in 0..generations {
            if self.cells.is_empty() {
                break;
            }
            self.tick();
        }
    }

    pub fn cells(&self) -> &CellSet {
        &self.cells
    }

    pub fn into_cells(self) -> CellSet {
        self.cells
    }

    pub fn count(&self) -> usize {
        self.cells.len()
    }

    pub fn engine_kind(&self) -> EngineKind {
        self.engine.kind()
    }

    /// Switches to another engine; the cells are kept.
    pub fn set_engine(&mut self, kind: EngineKind) {
        if kind != self.engine.kind() {
            self.engine = create_engine(kind);
        }
    }

    /// Statistics of the last generation computed, if the engine keeps any.
    pub fn engine_statistics(&self) -> String {
        self.engine.statistics()
    }

    /// Writes the cells in Life 1.06 format.
    pub fn write(&self, out: &mut impl Write, sorted: bool) -> io::Result<()> {
        life106::write_cells(out, &self.cells, sorted)
    }

    /// Sorted Life 1.06 text.
    pub fn format(&self) -> String {
        life106::format_cells(&self.cells)
    }
}

impl Default for Life {
    fn default() -> Self {
        Self::new()
    }
}
