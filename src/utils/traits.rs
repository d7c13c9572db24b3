use crate::{CellSet, Error, HashLifeEngine, HashtableEngine, SortedEngine};
use std::fmt;
use std::str::FromStr;

/// Engine for Game of Life on an unbounded sparse grid.
///
/// All implementations are interchangeable: for the same input every engine
/// produces the same set of cells.
pub trait Engine {
    /// Replaces `cells` with the next generation (B3/S23).
    ///
    /// Total for any input, including the empty set and cells on the edge of
    /// the `i64` range. Cells on that edge do not contribute to neighbour
    /// counts and no cell is ever born there.
    fn advance(&mut self, cells: &mut CellSet);

    /// Creates a fresh engine of the same kind.
    ///
    /// Engines only keep buffers that live for a single call, so nothing
    /// observable is shared or lost.
    fn duplicate(&self) -> Box<dyn Engine>;

    fn kind(&self) -> EngineKind;

    /// Returns multiline string reporting stats of the last call.
    fn statistics(&self) -> String {
        String::new()
    }
}

impl Clone for Box<dyn Engine> {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl fmt::Debug for dyn Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Engine({})", self.kind())
    }
}

/// The available engines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// Neighbour counting in a hash map; the reference implementation.
    #[default]
    Hashtable,
    /// Sort-and-merge neighbour counting, no hashing at all.
    Sorted,
    /// Memoized quadtree stepped one generation at a time.
    HashLife,
}

impl EngineKind {
    pub const ALL: [EngineKind; 3] = [Self::Hashtable, Self::Sorted, Self::HashLife];

    pub fn name(self) -> &'static str {
        match self {
            Self::Hashtable => "hashtable",
            Self::Sorted => "sorted",
            Self::HashLife => "hashlife",
        }
    }

    pub fn create(self) -> Box<dyn Engine> {
        create_engine(self)
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = Error;

    /// Accepts `hashtable`, `sorted` and `hashlife`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownEngine(s.to_string()))
    }
}

/// Creates an engine of the given kind.
pub fn create_engine(kind: EngineKind) -> Box<dyn Engine> {
    match kind {
        EngineKind::Hashtable => Box::new(HashtableEngine::new()),
        EngineKind::Sorted => Box::new(SortedEngine::new()),
        EngineKind::HashLife => Box::new(HashLifeEngine::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("hashtable".parse::<EngineKind>().unwrap(), EngineKind::Hashtable);
        assert_eq!("Sorted".parse::<EngineKind>().unwrap(), EngineKind::Sorted);
        assert_eq!("HASHLIFE".parse::<EngineKind>().unwrap(), EngineKind::HashLife);
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = "quicklife".parse::<EngineKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownEngine(ref s) if s == "quicklife"));
        assert!(err.to_string().contains("hashtable, sorted, hashlife"));
        assert!("".parse::<EngineKind>().is_err());
    }

    #[test]
    fn test_create_and_duplicate() {
        for kind in EngineKind::ALL {
            let engine = create_engine(kind);
            assert_eq!(engine.kind(), kind);
            assert_eq!(engine.duplicate().kind(), kind);
            assert_eq!(engine.clone().kind(), kind);
            assert_eq!(kind.name().parse::<EngineKind>().unwrap(), kind);
        }
    }
}
