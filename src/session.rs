//! Edit sessions (one extent chain per command) and the per-player state
//! that outlives them.

use std::collections::VecDeque;

use dashmap::DashMap;
use log::debug;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use uuid::Uuid;

use crate::config::{ActorSelectorLimits, LocalConfiguration, Permissible};
use crate::error::{EditError, IncompleteRegionError};
use crate::extent::{
    BatchingExtent, BlockArrayClipboard, BlockBagExtent, BlockChangeLimiter, ChangeSetExtent,
    DataValidatorExtent, Extent, World,
};
use crate::function::{BlockReplace, ForwardExtentCopy, Mask, Pattern, RegionVisitor};
use crate::history::{ChangeSet, History, UndoContext};
use crate::inventory::BlockBag;
use crate::math::{BlockVector3, Transform};
use crate::regions::{Region, RegionShape};
use crate::selector::{RegionSelector, Selector, SelectorType};

type Pipeline<'a, W> = BlockChangeLimiter<
    ChangeSetExtent<BlockBagExtent<'a, DataValidatorExtent<BatchingExtent<&'a mut W>>>, History>,
>;

/// One edit against a world. Writes pass, outermost first, through the
/// change limiter, the history recorder, the block bag, the validator and
/// the batching buffer before reaching the world. The bag pays for a block
/// before the validator sees it and refunds the item when the write is
/// rejected.
///
/// Buffered writes only reach the world on [`flush_session`](Self::flush_session)
/// or [`finish`](Self::finish).
pub struct EditSession<'a, W: World + ?Sized> {
    extent: Pipeline<'a, W>,
}

impl<'a, W: World + ?Sized> EditSession<'a, W> {
    pub fn new(world: &'a mut W, limit: Option<usize>, history: History, batching: bool) -> Self {
        let (min_y, max_y) = (world.min_y(), world.max_y());
        let registry = world.block_registry().clone();
        let batching = BatchingExtent::with_enabled(world, batching);
        let validator = DataValidatorExtent::new(batching, min_y, max_y, registry);
        let bag = BlockBagExtent::new(validator, None);
        let changes = ChangeSetExtent::new(bag, history);
        EditSession {
            extent: BlockChangeLimiter::new(changes, limit),
        }
    }

    /// Limits, history strategy and batching as configured for `actor`.
    pub fn from_config(world: &'a mut W, config: &LocalConfiguration, actor: &dyn Permissible) -> Self {
        EditSession::new(
            world,
            config.change_limit_for(actor),
            History::new(config.block_optimized_history),
            config.batch_edits,
        )
    }

    pub fn world(&self) -> &W {
        self.extent.inner().inner().inner().inner().inner()
    }

    fn bag_layer(&self) -> &BlockBagExtent<'a, DataValidatorExtent<BatchingExtent<&'a mut W>>> {
        self.extent.inner().inner()
    }

    fn bag_layer_mut(&mut self) -> &mut BlockBagExtent<'a, DataValidatorExtent<BatchingExtent<&'a mut W>>> {
        self.extent.inner_mut().inner_mut()
    }

    pub fn set_block_bag(&mut self, bag: Option<&'a mut dyn BlockBag>) {
        self.bag_layer_mut().set_block_bag(bag);
    }

    /// Blocks that could not be placed because the bag ran out.
    pub fn missing_blocks(&self) -> &FxHashMap<SmolStr, usize> {
        self.bag_layer().missing_blocks()
    }

    pub fn pop_missing_blocks(&mut self) -> FxHashMap<SmolStr, usize> {
        self.bag_layer_mut().take_missing_blocks()
    }

    pub fn is_batching(&self) -> bool {
        self.bag_layer().inner().inner().is_enabled()
    }

    /// Turning batching off flushes buffered writes.
    pub fn set_batching(&mut self, enabled: bool) -> Result<(), EditError> {
        self.bag_layer_mut().inner_mut().inner_mut().set_enabled(enabled)
    }

    pub fn limit(&self) -> Option<usize> {
        self.extent.limit()
    }

    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.extent.set_limit(limit);
    }

    /// Writes that went through the limiter as changes.
    pub fn changed_count(&self) -> usize {
        self.extent.count()
    }

    pub fn history(&self) -> &History {
        self.extent.inner().changes()
    }

    /// Size of the recorded history. With block-optimized history this is
    /// the number of distinct positions touched.
    pub fn block_change_count(&self) -> usize {
        self.history().size()
    }

    /// Fills every point of `region` from `pattern`.
    pub fn set_blocks<P: Pattern>(&mut self, region: &Region, pattern: P) -> Result<usize, EditError> {
        let replace = BlockReplace::new(&mut self.extent, pattern);
        let affected = RegionVisitor::new(region, replace).run()?;
        debug!("set {} blocks", affected);
        Ok(affected)
    }

    /// Fills the points of `region` that match `mask`.
    pub fn replace_blocks<M, P>(&mut self, region: &Region, mask: M, pattern: P) -> Result<usize, EditError>
    where
        M: Mask,
        P: Pattern,
    {
        let replace = BlockReplace::new(&mut self.extent, pattern).with_mask(mask);
        let affected = RegionVisitor::new(region, replace).run()?;
        debug!("replaced {} blocks", affected);
        Ok(affected)
    }

    /// Copies `region` as seen through this session into a clipboard.
    pub fn copy(&self, region: &Region) -> Result<BlockArrayClipboard, EditError> {
        let mut clipboard = BlockArrayClipboard::new(region.clone());
        let mut copy = ForwardExtentCopy::new(region.clone(), region.minimum_point());
        copy.run(&self.extent, &mut clipboard)?;
        Ok(clipboard)
    }

    /// Pastes `clipboard` so its origin lands on `to`, transformed around
    /// the origin.
    pub fn paste(
        &mut self,
        clipboard: &BlockArrayClipboard,
        to: BlockVector3,
        transform: Transform,
    ) -> Result<usize, EditError> {
        let mut copy = ForwardExtentCopy::new(clipboard.region().clone(), to)
            .with_origin(clipboard.origin())
            .with_transform(transform);
        copy.run(clipboard, &mut self.extent)
    }

    /// Reverts `history` beneath the recorder and limiter, then flushes.
    pub fn undo(&mut self, history: &History) -> Result<(), EditError> {
        history.undo(&mut UndoContext::new(self.bag_layer_mut()))?;
        self.flush_session()
    }

    pub fn redo(&mut self, history: &History) -> Result<(), EditError> {
        history.redo(&mut UndoContext::new(self.bag_layer_mut()))?;
        self.flush_session()
    }

    /// Pushes buffered writes through to the world.
    pub fn flush_session(&mut self) -> Result<(), EditError> {
        self.extent.commit()
    }

    /// Flushes and hands back what was recorded.
    pub fn finish(mut self) -> Result<History, EditError> {
        self.flush_session()?;
        let (_, history) = self.extent.into_inner().into_parts();
        Ok(history)
    }
}

impl<W: World + ?Sized> Extent for EditSession<'_, W> {
    forward_extent!(extent:
        minimum_point, maximum_point, get_full_block, get_block, set_block,
        get_biome, set_biome, entities, entity, add_entity, remove_entity, commit,
    );
}

/// A player's selection and undo stack.
#[derive(Debug, Clone)]
pub struct LocalSession {
    config: LocalConfiguration,
    selector: Selector,
    history: VecDeque<History>,
    history_pointer: usize,
}

impl LocalSession {
    pub fn new(config: LocalConfiguration) -> Self {
        LocalSession {
            config,
            selector: Selector::default(),
            history: VecDeque::new(),
            history_pointer: 0,
        }
    }

    pub fn config(&self) -> &LocalConfiguration {
        &self.config
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut Selector {
        &mut self.selector
    }

    /// Switches selection shape, keeping as much of the current selection as
    /// the new shape can express.
    pub fn set_selector_type(&mut self, kind: SelectorType) {
        if self.selector.selector_type() != kind {
            self.selector = Selector::convert(kind, &self.selector);
        }
    }

    pub fn select_primary(&mut self, position: BlockVector3, actor: &dyn Permissible) -> bool {
        let limits = ActorSelectorLimits::new(&self.config, actor);
        self.selector.select_primary(position, &limits)
    }

    pub fn select_secondary(&mut self, position: BlockVector3, actor: &dyn Permissible) -> bool {
        let limits = ActorSelectorLimits::new(&self.config, actor);
        self.selector.select_secondary(position, &limits)
    }

    pub fn selection(&self) -> Result<Region, IncompleteRegionError> {
        self.selector.region()
    }

    pub fn create_edit_session<'a, W: World + ?Sized>(
        &self,
        world: &'a mut W,
        actor: &dyn Permissible,
    ) -> EditSession<'a, W> {
        EditSession::from_config(world, &self.config, actor)
    }

    /// Pushes a finished edit onto the undo stack, dropping anything that
    /// could have been redone and evicting the oldest entries past the
    /// configured size.
    pub fn remember(&mut self, history: History) {
        if history.is_empty() {
            return;
        }
        self.history.truncate(self.history_pointer);
        self.history.push_back(history);
        while self.history.len() > self.config.history_size {
            self.history.pop_front();
            debug!("evicted oldest history entry, keeping {}", self.config.history_size);
        }
        self.history_pointer = self.history.len();
    }

    /// Undoes the most recent remembered edit. `Ok(false)` when there is
    /// nothing left to undo.
    pub fn undo<W: World + ?Sized>(&mut self, world: &mut W, actor: &dyn Permissible) -> Result<bool, EditError> {
        if self.history_pointer == 0 {
            return Ok(false);
        }
        let history = &self.history[self.history_pointer - 1];
        EditSession::from_config(world, &self.config, actor).undo(history)?;
        self.history_pointer -= 1;
        Ok(true)
    }

    /// Redoes the most recently undone edit. `Ok(false)` when there is
    /// nothing to redo.
    pub fn redo<W: World + ?Sized>(&mut self, world: &mut W, actor: &dyn Permissible) -> Result<bool, EditError> {
        let Some(history) = self.history.get(self.history_pointer) else {
            return Ok(false);
        };
        EditSession::from_config(world, &self.config, actor).redo(history)?;
        self.history_pointer += 1;
        Ok(true)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.history_pointer = 0;
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_pointer(&self) -> usize {
        self.history_pointer
    }
}

impl Default for LocalSession {
    fn default() -> Self {
        LocalSession::new(LocalConfiguration::default())
    }
}

/// Keeps sessions across reconnects. Different ids may be loaded and saved
/// from different threads at once.
pub trait SessionStore: Send + Sync {
    /// The stored session, or a fresh one.
    fn load(&self, id: Uuid) -> LocalSession;
    fn save(&self, id: Uuid, session: LocalSession);
}

pub struct MemorySessionStore {
    config: LocalConfiguration,
    sessions: DashMap<Uuid, LocalSession>,
}

impl MemorySessionStore {
    pub fn new(config: LocalConfiguration) -> Self {
        Self {
            config,
            sessions: DashMap::new(),
        }
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn remove(&self, id: Uuid) -> Option<LocalSession> {
        self.sessions.remove(&id).map(|(_, session)| session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        MemorySessionStore::new(LocalConfiguration::default())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, id: Uuid) -> LocalSession {
        match self.sessions.get(&id) {
            Some(session) => session.clone(),
            None => LocalSession::new(self.config.clone()),
        }
    }

    fn save(&self, id: Uuid, session: LocalSession) {
        self.sessions.insert(id, session);
    }
}
