mod chunk_vec;
mod cluster;
mod hashlife;
mod memory;
mod node;

use chunk_vec::ChunkVec;
use memory::MemoryManager;
use node::{NodeIdx, QuadTreeNode};

pub use cluster::{clusters, CHUNK_SIDE};
pub use hashlife::HashLifeEngine;
