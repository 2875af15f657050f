//! Effects - side effects declared by the reducer

use crate::state::{Position, PositionOptions};

#[derive(Debug, Clone)]
pub enum Effect {
    /// Ask the position source for a single fix
    LocatePosition { options: PositionOptions },
    /// Reverse-geocode, then fetch current weather, for this position
    FetchConditions { position: Position },
}
