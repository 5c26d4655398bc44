mod block_vector;
mod direction;
mod transform;
mod vector;

pub use block_vector::{BlockVector2, BlockVector3};
pub use direction::{flag, Direction};
pub use transform::{AffineTransform, Transform};
pub use vector::{Vector2, Vector3};
