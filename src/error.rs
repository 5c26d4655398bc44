use smol_str::SmolStr;
use thiserror::Error;

/// Fatal conditions that stop an in-progress edit. Writes already applied
/// before the error stay applied.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("max blocks changed in an operation reached ({limit})")]
    MaxChangedBlocks { limit: usize },
    #[error(transparent)]
    IncompleteRegion(#[from] IncompleteRegionError),
    #[error(transparent)]
    RegionOperation(#[from] RegionOperationError),
    #[error(transparent)]
    BlockBag(#[from] BlockBagError),
    #[error("no extent available to replay changes into")]
    MissingExtent,
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("make a region selection first")]
pub struct IncompleteRegionError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionOperationError {
    #[error("{kind} regions can only be expanded or contracted vertically")]
    VerticalOnly { kind: &'static str },
    #[error("cylinders changed horizontally must be changed by an even amount, got {delta}")]
    OddCylinderResize { delta: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockBagError {
    #[error("out of blocks: {0}")]
    OutOfBlocks(SmolStr),
    #[error("block cannot be placed: {0}")]
    UnplaceableBlock(SmolStr),
    #[error("no space left to store {0}")]
    OutOfSpace(SmolStr),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
