mod format_int;
pub mod life106;
mod traits;

pub use format_int::NiceInt;
pub use traits::{create_engine, Engine, EngineKind};
