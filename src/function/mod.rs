//! Per-position functions and the operations that drive them over regions.

mod copy;
mod mask;
mod operation;
mod pattern;

pub use copy::{ExtentBlockCopy, ExtentEntityCopy};
pub use mask::{BlockTypeMask, ExistingBlockMask, Mask, NegatedMask};
pub use operation::{BlockReplace, ForwardExtentCopy, RegionVisitor};
pub use pattern::{BlockPattern, ClipboardPattern, Pattern, RandomPattern};

use crate::error::EditError;
use crate::math::BlockVector3;

/// Something done at a single position. `Ok(true)` means it changed something.
pub trait RegionFunction {
    fn apply(&mut self, position: BlockVector3) -> Result<bool, EditError>;
}

impl<F: RegionFunction + ?Sized> RegionFunction for &mut F {
    fn apply(&mut self, position: BlockVector3) -> Result<bool, EditError> {
        (**self).apply(position)
    }
}
