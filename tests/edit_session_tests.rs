use voxedit::config::{AllPermissions, NoPermissions};
use voxedit::function::{BlockPattern, BlockTypeMask, RandomPattern};
use voxedit::inventory::MemoryBlockBag;
use voxedit::math::AffineTransform;
use voxedit::regions::CuboidRegion;
use voxedit::{
    BlockVector3, ChangeSet, EditError, EditSession, Extent, History, LocalConfiguration,
    LocalSession, MemorySessionStore, MemoryWorld, Region, RegionShape, SessionStore, Transform,
};

fn cuboid(min: (i32, i32, i32), max: (i32, i32, i32)) -> Region {
    Region::Cuboid(CuboidRegion::new(min.into(), max.into()))
}

#[test]
fn test_undo_then_redo_restores_each_state() {
    let mut world = MemoryWorld::default();
    world.set_block(BlockVector3::new(1, 0, 1), "minecraft:dirt".into()).unwrap();
    let mut session = LocalSession::default();

    let mut edit = session.create_edit_session(&mut world, &AllPermissions);
    edit.set_blocks(&cuboid((0, 0, 0), (2, 0, 2)), BlockPattern::new("minecraft:stone")).unwrap();
    session.remember(edit.finish().unwrap());
    assert_eq!(world.block_count(), 9);

    assert!(session.undo(&mut world, &AllPermissions).unwrap());
    assert_eq!(world.block_count(), 1);
    assert_eq!(world.get_block(BlockVector3::new(1, 0, 1)).name, "minecraft:dirt");

    assert!(session.redo(&mut world, &AllPermissions).unwrap());
    assert_eq!(world.block_count(), 9);
    assert_eq!(world.get_block(BlockVector3::new(1, 0, 1)).name, "minecraft:stone");
    assert!(!session.redo(&mut world, &AllPermissions).unwrap());
}

#[test]
fn test_new_edit_discards_redo_entries() {
    let mut world = MemoryWorld::default();
    let mut session = LocalSession::default();
    for name in ["minecraft:stone", "minecraft:dirt"] {
        let mut edit = session.create_edit_session(&mut world, &AllPermissions);
        edit.set_blocks(&cuboid((0, 0, 0), (0, 0, 0)), BlockPattern::new(name)).unwrap();
        session.remember(edit.finish().unwrap());
    }
    session.undo(&mut world, &AllPermissions).unwrap();
    assert_eq!(session.history_pointer(), 1);

    let mut edit = session.create_edit_session(&mut world, &AllPermissions);
    edit.set_blocks(&cuboid((0, 0, 0), (0, 0, 0)), BlockPattern::new("minecraft:glass")).unwrap();
    session.remember(edit.finish().unwrap());
    assert_eq!(session.history_len(), 2);
    assert!(!session.redo(&mut world, &AllPermissions).unwrap());
}

#[test]
fn test_empty_edit_is_not_remembered() {
    let mut world = MemoryWorld::default();
    let mut session = LocalSession::default();
    let mut edit = session.create_edit_session(&mut world, &AllPermissions);
    edit.set_blocks(&cuboid((0, 0, 0), (3, 0, 0)), BlockPattern::new("minecraft:air")).unwrap();
    session.remember(edit.finish().unwrap());
    assert_eq!(session.history_len(), 0);
}

#[test]
fn test_change_limit_stops_the_edit() {
    let config = LocalConfiguration {
        default_change_limit: Some(5),
        max_change_limit: Some(100),
        batch_edits: false,
        ..Default::default()
    };
    let session = LocalSession::new(config);
    let mut world = MemoryWorld::default();

    let mut edit = session.create_edit_session(&mut world, &NoPermissions);
    assert_eq!(edit.limit(), Some(5));
    let result = edit.set_blocks(&cuboid((0, 0, 0), (2, 2, 2)), BlockPattern::new("minecraft:stone"));
    assert!(matches!(result, Err(EditError::MaxChangedBlocks { limit: 5 })));
    assert_eq!(edit.changed_count(), 5);
    let history = edit.finish().unwrap();
    assert_eq!(history.size(), 5);
    assert_eq!(world.block_count(), 5);

    let edit = session.create_edit_session(&mut world, &AllPermissions);
    assert_eq!(edit.limit(), Some(100));
}

#[test]
fn test_optimized_history_keeps_first_previous() {
    let mut world = MemoryWorld::default();
    let pos = BlockVector3::new(4, 4, 4);
    world.set_block(pos, "minecraft:sand".into()).unwrap();

    let mut edit = EditSession::new(&mut world, None, History::new(true), false);
    edit.set_block(pos, "minecraft:stone".into()).unwrap();
    edit.set_block(pos, "minecraft:glass".into()).unwrap();
    let history = edit.finish().unwrap();
    assert_eq!(history.size(), 1);

    EditSession::new(&mut world, None, History::default(), false).undo(&history).unwrap();
    assert_eq!(world.get_block(pos).name, "minecraft:sand");
}

#[test]
fn test_replace_only_touches_masked_blocks() {
    let mut world = MemoryWorld::default();
    world.set_block(BlockVector3::new(0, 0, 0), "minecraft:dirt".into()).unwrap();
    world.set_block(BlockVector3::new(1, 0, 0), "minecraft:grass_block".into()).unwrap();
    world.set_block(BlockVector3::new(2, 0, 0), "minecraft:dirt".into()).unwrap();

    let mut edit = EditSession::new(&mut world, None, History::default(), true);
    let replaced = edit
        .replace_blocks(
            &cuboid((0, 0, 0), (2, 0, 0)),
            BlockTypeMask::new(["minecraft:dirt"]),
            BlockPattern::new("minecraft:stone"),
        )
        .unwrap();
    assert_eq!(replaced, 2);
    edit.finish().unwrap();
    assert_eq!(world.get_block(BlockVector3::new(1, 0, 0)).name, "minecraft:grass_block");
    assert_eq!(world.get_block(BlockVector3::new(2, 0, 0)).name, "minecraft:stone");
}

#[test]
fn test_seeded_random_pattern_only_uses_its_blocks() {
    let mut world = MemoryWorld::default();
    let pattern = RandomPattern::with_seed(7)
        .with(BlockPattern::new("minecraft:stone"), 3.0)
        .with(BlockPattern::new("minecraft:andesite"), 1.0);

    let mut edit = EditSession::new(&mut world, None, History::default(), true);
    assert_eq!(edit.set_blocks(&cuboid((0, 0, 0), (3, 3, 3)), &pattern).unwrap(), 64);
    edit.finish().unwrap();
    for position in cuboid((0, 0, 0), (3, 3, 3)).points() {
        let block = world.get_block(position);
        assert!(matches!(block.get_name(), "minecraft:stone" | "minecraft:andesite"));
    }
}

#[test]
fn test_copy_and_paste_rotated() {
    let mut world = MemoryWorld::default();
    world.set_block(BlockVector3::new(0, 0, 0), "minecraft:oak_log".into()).unwrap();
    world.set_block(BlockVector3::new(2, 0, 0), "minecraft:gold_block".into()).unwrap();

    let mut edit = EditSession::new(&mut world, None, History::default(), true);
    let clipboard = edit.copy(&cuboid((0, 0, 0), (2, 0, 0))).unwrap();
    assert_eq!(clipboard.dimensions(), BlockVector3::new(3, 1, 1));

    let rotate = Transform::Affine(AffineTransform::new().rotate_y(90.0));
    edit.paste(&clipboard, BlockVector3::new(10, 0, 10), rotate).unwrap();
    edit.finish().unwrap();

    assert_eq!(world.get_block(BlockVector3::new(10, 0, 10)).name, "minecraft:oak_log");
    assert_eq!(world.get_block(BlockVector3::new(10, 0, 8)).name, "minecraft:gold_block");
}

#[test]
fn test_block_bag_limits_placement() {
    let mut bag = MemoryBlockBag::new()
        .with_block("minecraft:oak_planks", 2)
        .with_block("minecraft:dirt", 1);
    let mut world = MemoryWorld::default();

    let mut edit = EditSession::new(&mut world, None, History::default(), false);
    edit.set_block_bag(Some(&mut bag));
    let placed = edit
        .set_blocks(&cuboid((0, 0, 0), (3, 0, 0)), BlockPattern::new("minecraft:oak_planks"))
        .unwrap();
    assert_eq!(placed, 2);
    assert_eq!(edit.missing_blocks().get("minecraft:oak_planks"), Some(&2));

    // grass falls back to the dirt in the bag
    assert!(edit.set_block(BlockVector3::new(0, 1, 0), "minecraft:grass_block".into()).unwrap());
    // never taken from a bag
    assert!(!edit.set_block(BlockVector3::new(0, 2, 0), "minecraft:bedrock".into()).unwrap());
    assert_eq!(edit.pop_missing_blocks().len(), 1);
    edit.finish().unwrap();

    assert_eq!(bag.count("minecraft:oak_planks"), Some(0));
    assert_eq!(bag.count("minecraft:dirt"), Some(0));
    assert!(world.get_block(BlockVector3::new(0, 2, 0)).is_air());
}

#[test]
fn test_sessions_survive_the_store_across_threads() {
    let store = MemorySessionStore::default();
    let ids: Vec<_> = (0..4).map(|_| uuid::Uuid::new_v4()).collect();

    std::thread::scope(|scope| {
        for (i, id) in ids.iter().enumerate() {
            let store = &store;
            scope.spawn(move || {
                let mut session = store.load(*id);
                session.select_primary(BlockVector3::new(i as i32, 0, 0), &AllPermissions);
                session.select_secondary(BlockVector3::new(i as i32, 3, 3), &AllPermissions);
                store.save(*id, session);
            });
        }
    });

    assert_eq!(store.len(), 4);
    for (i, id) in ids.iter().enumerate() {
        let region = store.load(*id).selection().unwrap();
        assert_eq!(region.minimum_point(), BlockVector3::new(i as i32, 0, 0));
    }
}
