pub mod config;
pub mod error;
pub mod formes;
pub mod math;
pub mod mesh;
pub mod operations;
pub mod solids;
pub mod specs;

pub use config::EngineConfig;
pub use error::{PolyhedraError, Result};
pub use formes::Forme;
pub use mesh::Polyhedron;
pub use operations::{OpResult, Operation, Options};
pub use specs::{get_specs, Specs};
