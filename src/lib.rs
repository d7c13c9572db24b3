mod cell;
pub mod config;
mod error;
mod hashtable;
mod life;
mod quadtree;
mod sorted;
pub mod utils;

pub use cell::{cell_set, life_rule, next_state, Cell, CellCountMap, CellSet};
pub use error::{Error, ParseError, Result};
pub use hashtable::HashtableEngine;
pub use life::Life;
pub use quadtree::{clusters, HashLifeEngine, CHUNK_SIDE};
pub use sorted::SortedEngine;
pub use utils::{create_engine, Engine, EngineKind, NiceInt};
