use thiserror::Error;

/// Faults raised by the simulation engine.
///
/// Normal gameplay outcomes such as collisions are not errors; they are
/// reported through [`crate::game::TickOutcome`].
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum EngineError {
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
    #[error("no free cell left for food on the {width}x{height} grid")]
    NoFreeCell { width: u16, height: u16 },
}
