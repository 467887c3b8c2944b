//! Line scanning: directions, coordinate walks and whole-board providers.

mod direction;
mod points;
mod provider;

pub use direction::Direction;
pub use points::{Depth, LineWalk, VectorPoints, compute as compute_points, walk_ordinals};
pub use provider::{Vector, VectorProvider, lines};
