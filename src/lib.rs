//! Region selection, extent pipelines and undo history for editing voxel
//! worlds.
//!
//! A [`LocalSession`] turns clicked points into a [`Region`], opens an
//! [`EditSession`] against a [`World`] for each command, and remembers the
//! resulting [`History`] so it can be undone and redone.

pub mod block_state;
pub mod blocks;
pub mod config;
pub mod entity;
pub mod error;
pub mod math;
pub mod regions;
pub mod selector;

// Extent wrappers share the `forward_extent!` macro with the session.
#[macro_use]
pub mod extent;

pub mod function;
pub mod history;
pub mod inventory;
pub mod session;

pub use block_state::{BaseBlock, BiomeType, BlockState};
pub use config::{LocalConfiguration, Permissible};
pub use error::{BlockBagError, EditError, IncompleteRegionError, RegionOperationError};
pub use extent::{BlockArrayClipboard, Extent, MemoryWorld, World};
pub use history::{ChangeSet, History};
pub use math::{BlockVector2, BlockVector3, Transform, Vector3};
pub use regions::{Region, RegionShape};
pub use selector::{RegionSelector, Selector, SelectorType};
pub use session::{EditSession, LocalSession, MemorySessionStore, SessionStore};
