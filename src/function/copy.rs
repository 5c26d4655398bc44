use quartz_nbt::{NbtCompound, NbtTag};
use uuid::Uuid;

use super::RegionFunction;
use crate::entity::{BaseEntity, EntitySnapshot, Location};
use crate::error::EditError;
use crate::extent::{transform_block, Extent};
use crate::math::{flag, BlockVector3, Direction, Transform, Vector3};

/// Copies one block from `source` into `destination`: the position is taken
/// relative to `from`, transformed, then placed relative to `to`. The
/// block's orientation is transformed along with it.
pub struct ExtentBlockCopy<'s, 'd> {
    source: &'s dyn Extent,
    from: BlockVector3,
    destination: &'d mut dyn Extent,
    to: BlockVector3,
    transform: Transform,
    copy_biomes: bool,
}

impl<'s, 'd> ExtentBlockCopy<'s, 'd> {
    pub fn new(
        source: &'s dyn Extent,
        from: BlockVector3,
        destination: &'d mut dyn Extent,
        to: BlockVector3,
        transform: Transform,
    ) -> Self {
        ExtentBlockCopy {
            source,
            from,
            destination,
            to,
            transform,
            copy_biomes: false,
        }
    }

    pub fn with_biomes(mut self, copy_biomes: bool) -> Self {
        self.copy_biomes = copy_biomes;
        self
    }

    pub fn target_of(&self, position: BlockVector3) -> BlockVector3 {
        let relative = (position - self.from).to_vector3();
        self.transform.apply(relative).round().to_block_point() + self.to
    }
}

impl RegionFunction for ExtentBlockCopy<'_, '_> {
    fn apply(&mut self, position: BlockVector3) -> Result<bool, EditError> {
        let target = self.target_of(position);
        let mut block = self.source.get_full_block(position);
        block.state = transform_block(&block.state, &self.transform);
        if self.copy_biomes {
            if let Some(biome) = self.source.get_biome(position) {
                self.destination.set_biome(target, biome)?;
            }
        }
        self.destination.set_block(target, block)
    }
}

/// Horizontal index stored in a hanging entity's `Facing` tag.
fn hanging_direction(index: i8) -> Option<Direction> {
    match index {
        0 => Some(Direction::South),
        1 => Some(Direction::West),
        2 => Some(Direction::North),
        3 => Some(Direction::East),
        _ => None,
    }
}

fn hanging_index(direction: Direction) -> Option<i8> {
    match direction {
        Direction::South => Some(0),
        Direction::West => Some(1),
        Direction::North => Some(2),
        Direction::East => Some(3),
        _ => None,
    }
}

/// Copies entities the way [`ExtentBlockCopy`] copies blocks. The copy is
/// a new entity with its own id.
pub struct ExtentEntityCopy<'d> {
    from: BlockVector3,
    destination: &'d mut dyn Extent,
    to: BlockVector3,
    transform: Transform,
}

impl<'d> ExtentEntityCopy<'d> {
    /// `from` and `to` are block positions; entities pivot around their centers.
    pub fn new(from: BlockVector3, destination: &'d mut dyn Extent, to: BlockVector3, transform: Transform) -> Self {
        ExtentEntityCopy {
            from,
            destination,
            to,
            transform,
        }
    }

    fn transform_direction(&self, direction: Vector3) -> Vector3 {
        if self.transform.is_identity() {
            return direction;
        }
        (self.transform.apply(direction) - self.transform.apply(Vector3::ZERO)).normalize()
    }

    fn transform_location(&self, location: &Location) -> Location {
        let pivot = self.from.to_center();
        let position = self.transform.apply(location.position - pivot) + self.to.to_center();
        let direction = self.transform_direction(location.direction());
        Location::new(position).with_direction(direction)
    }

    fn transform_nbt(&self, nbt: &NbtCompound) -> NbtCompound {
        let mut nbt = nbt.clone();
        let tile = (
            nbt.get::<_, i32>("TileX"),
            nbt.get::<_, i32>("TileY"),
            nbt.get::<_, i32>("TileZ"),
        );
        if let (Ok(x), Ok(y), Ok(z)) = tile {
            let relative = (BlockVector3::new(x, y, z) - self.from).to_vector3();
            let moved = self.transform.apply(relative).round().to_block_point() + self.to;
            nbt.insert("TileX", NbtTag::Int(moved.x));
            nbt.insert("TileY", NbtTag::Int(moved.y));
            nbt.insert("TileZ", NbtTag::Int(moved.z));

            let facing = nbt.get::<_, i8>("Facing").ok().and_then(hanging_direction);
            if let Some(facing) = facing {
                let turned = self.transform_direction(facing.to_vector());
                if let Some(index) = Direction::find_closest(turned, flag::CARDINAL).and_then(hanging_index) {
                    nbt.insert("Facing", NbtTag::Byte(index));
                }
            }
        }
        nbt
    }

    /// Spawns the transformed copy and returns its id.
    pub fn apply(&mut self, snapshot: &EntitySnapshot) -> Option<Uuid> {
        let location = self.transform_location(&snapshot.location);
        let entity = BaseEntity {
            id: snapshot.entity.id.clone(),
            nbt: snapshot.entity.nbt.as_ref().map(|nbt| self.transform_nbt(nbt)),
        };
        self.destination.create_entity(location, entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_state::BlockState;
    use crate::extent::MemoryWorld;
    use crate::math::AffineTransform;

    #[test]
    fn test_block_copy_with_rotation_and_offset() {
        let mut source = MemoryWorld::default();
        let mut destination = MemoryWorld::default();
        let stairs = BlockState::new("minecraft:oak_stairs").with_property("facing", "north");
        source.set_block(BlockVector3::new(1, 0, 0), stairs.into()).unwrap();

        let rotate = Transform::Affine(AffineTransform::new().rotate_y(90.0));
        let mut copy = ExtentBlockCopy::new(&source, BlockVector3::ZERO, &mut destination, BlockVector3::new(10, 0, 10), rotate);
        assert_eq!(copy.target_of(BlockVector3::new(1, 0, 0)), BlockVector3::new(10, 0, 9));
        assert!(copy.apply(BlockVector3::new(1, 0, 0)).unwrap());

        let placed = destination.get_block(BlockVector3::new(10, 0, 9));
        assert_eq!(placed.name, "minecraft:oak_stairs");
        assert_eq!(placed.get_property("facing").map(|s| s.as_str()), Some("west"));
    }

    #[test]
    fn test_entity_copy_moves_hanging_entities() {
        let mut destination = MemoryWorld::default();
        let mut nbt = NbtCompound::new();
        nbt.insert("TileX", NbtTag::Int(2));
        nbt.insert("TileY", NbtTag::Int(0));
        nbt.insert("TileZ", NbtTag::Int(0));
        nbt.insert("Facing", NbtTag::Byte(2));
        let painting = EntitySnapshot::new(
            Location::new(Vector3::new(2.5, 0.5, 0.5)),
            BaseEntity::new("minecraft:painting").with_nbt(nbt),
        );

        let rotate = Transform::Affine(AffineTransform::new().rotate_y(90.0));
        let mut copy = ExtentEntityCopy::new(BlockVector3::ZERO, &mut destination, BlockVector3::ZERO, rotate);
        let id = copy.apply(&painting).unwrap();
        assert_ne!(id, painting.uuid);

        let copied = destination.entity(id).unwrap();
        assert!((copied.location.position - Vector3::new(0.5, 0.5, -1.5)).length() < 1e-9);
        let nbt = copied.entity.nbt.unwrap();
        assert_eq!(nbt.get::<_, i32>("TileX").unwrap(), 0);
        assert_eq!(nbt.get::<_, i32>("TileZ").unwrap(), -2);
        assert_eq!(nbt.get::<_, i8>("Facing").unwrap(), 1);
    }
}
