use smol_str::SmolStr;

use super::Extent;
use crate::block_state::{BaseBlock, BlockState};
use crate::error::EditError;
use crate::math::{flag, BlockVector3, Direction, Transform, Vector3};

const CONNECTIONS: [(&str, Direction); 4] = [
    ("north", Direction::North),
    ("south", Direction::South),
    ("east", Direction::East),
    ("west", Direction::West),
];

/// Rewrites the directional properties of blocks passing through it:
/// reads come back transformed, writes go down with the inverse applied.
/// Positions are left alone.
pub struct BlockTransformExtent<E> {
    extent: E,
    transform: Transform,
    inverse: Transform,
}

impl<E: Extent> BlockTransformExtent<E> {
    /// A singular transform has no inverse; writes then pass through as-is.
    pub fn new(extent: E, transform: Transform) -> Self {
        let inverse = transform.inverse().unwrap_or_default();
        BlockTransformExtent {
            extent,
            transform,
            inverse,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn inner(&self) -> &E {
        &self.extent
    }

    pub fn into_inner(self) -> E {
        self.extent
    }
}

impl<E: Extent> Extent for BlockTransformExtent<E> {
    forward_extent!(extent:
        minimum_point, maximum_point, get_biome, set_biome,
        entities, entity, add_entity, remove_entity, commit,
    );

    fn get_full_block(&self, position: BlockVector3) -> BaseBlock {
        let mut block = self.extent.get_full_block(position);
        block.state = transform_block(&block.state, &self.transform);
        block
    }

    fn get_block(&self, position: BlockVector3) -> BlockState {
        transform_block(&self.extent.get_block(position), &self.transform)
    }

    fn set_block(&mut self, position: BlockVector3, mut block: BaseBlock) -> Result<bool, EditError> {
        block.state = transform_block(&block.state, &self.inverse);
        self.extent.set_block(position, block)
    }
}

/// Direction after applying only the linear part of `transform`.
fn transform_direction(transform: &Transform, direction: Vector3) -> Vector3 {
    (transform.apply(direction) - transform.apply(Vector3::ZERO)).normalize()
}

fn axis_direction(axis: &str) -> Option<Direction> {
    match axis {
        "x" => Some(Direction::East),
        "y" => Some(Direction::Up),
        "z" => Some(Direction::North),
        _ => None,
    }
}

fn direction_axis(direction: Direction) -> Option<&'static str> {
    match direction {
        Direction::North | Direction::South => Some("z"),
        Direction::East | Direction::West => Some("x"),
        Direction::Up | Direction::Down => Some("y"),
        _ => None,
    }
}

fn swap<'a>(value: &'a str, pairs: &[(&'a str, &'a str)]) -> &'a str {
    for (a, b) in pairs {
        if value == *a {
            return b;
        }
        if value == *b {
            return a;
        }
    }
    value
}

/// Returns `state` with its orientation properties rotated and flipped the
/// way `transform` moves the block. Blocks without such properties come
/// back unchanged.
pub fn transform_block(state: &BlockState, transform: &Transform) -> BlockState {
    if transform.is_identity() || state.properties.is_empty() {
        return state.clone();
    }
    let affine = transform.as_affine();
    let mut result = state.clone();

    if let Some(facing) = state.get_property("facing").and_then(|v| Direction::from_name(v)) {
        let new_dir = transform_direction(transform, facing.to_vector());
        if let Some(closest) = Direction::find_closest(new_dir, flag::CARDINAL | flag::UPRIGHT) {
            result.set_property("facing", closest.name());
        }
    }

    if let Some(axis) = state.get_property("axis").and_then(|v| axis_direction(v)) {
        let new_dir = transform_direction(transform, axis.to_vector());
        if let Some(name) = Direction::find_closest(new_dir, flag::UPRIGHT | flag::CARDINAL)
            .and_then(direction_axis)
        {
            result.set_property("axis", name);
        }
    }

    if let Some(rotation) = state
        .get_property("rotation")
        .and_then(|v| v.parse::<i32>().ok())
        .and_then(Direction::from_rotation_index)
    {
        let new_dir = transform_direction(transform, rotation.to_vector());
        let flags = flag::CARDINAL | flag::ORDINAL | flag::SECONDARY_ORDINAL;
        if let Some(index) = Direction::find_closest(new_dir, flags).and_then(Direction::to_rotation_index) {
            result.set_property("rotation", index.to_string());
        }
    }

    let horizontal_flip = affine.is_horizontal_flip();
    let vertical_flip = affine.is_vertical_flip();

    if let Some(kind) = state.get_property("type") {
        let mut value = kind.as_str();
        if horizontal_flip {
            value = swap(value, &[("left", "right")]);
        }
        if vertical_flip {
            value = swap(value, &[("top", "bottom")]);
        }
        if value != kind.as_str() {
            result.set_property("type", value);
        }
    }

    if vertical_flip {
        if let Some(half) = state.get_property("half") {
            result.set_property("half", swap(half, &[("top", "bottom")]));
        }
    }

    if horizontal_flip {
        if let Some(shape) = state.get_property("shape") {
            let flipped = swap(
                shape,
                &[("outer_left", "outer_right"), ("inner_left", "inner_right")],
            );
            result.set_property("shape", flipped);
        }
    }

    transform_connections(state, transform, &mut result);
    result
}

fn transform_connections(state: &BlockState, transform: &Transform, result: &mut BlockState) {
    let mut moved: Vec<(&'static str, SmolStr)> = Vec::new();
    let mut present = false;
    for (name, direction) in CONNECTIONS {
        let Some(value) = state.get_property(name) else {
            continue;
        };
        present = true;
        if value == "false" || value == "none" {
            continue;
        }
        let new_dir = transform_direction(transform, direction.to_vector());
        if let Some(closest) = Direction::find_closest(new_dir, flag::CARDINAL) {
            moved.push((closest.name(), value.clone()));
        }
    }
    if !present {
        return;
    }
    for (name, _) in CONNECTIONS {
        let Some(old) = state.get_property(name) else {
            continue;
        };
        let value = match moved.iter().find(|(target, _)| *target == name) {
            Some((_, v)) => v.clone(),
            None if is_boolean(old) => SmolStr::new("false"),
            None => SmolStr::new("none"),
        };
        result.set_property(name, value);
    }
}

fn is_boolean(value: &str) -> bool {
    value == "true" || value == "false"
}
