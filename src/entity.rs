use quartz_nbt::NbtCompound;
use smol_str::SmolStr;
use std::f64::consts::TAU;
use uuid::Uuid;

use crate::math::Vector3;

/// Entity type plus its saved data, detached from any world.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseEntity {
    pub id: SmolStr,
    pub nbt: Option<NbtCompound>,
}

impl BaseEntity {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        BaseEntity {
            id: id.into(),
            nbt: None,
        }
    }

    pub fn with_nbt(mut self, nbt: NbtCompound) -> Self {
        self.nbt = Some(nbt);
        self
    }
}

/// Position plus facing, with yaw and pitch in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
    pub position: Vector3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Location {
    pub fn new(position: Vector3) -> Self {
        Location {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn with_rotation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    /// Unit vector the location faces. Yaw 0 faces south (+Z).
    pub fn direction(&self) -> Vector3 {
        let yaw = (self.yaw as f64).to_radians();
        let pitch = (self.pitch as f64).to_radians();
        let xz = pitch.cos();
        Vector3::new(-xz * yaw.sin(), -pitch.sin(), xz * yaw.cos())
    }

    pub fn with_direction(mut self, direction: Vector3) -> Self {
        let (x, y, z) = (direction.x, direction.y, direction.z);
        if x == 0.0 && z == 0.0 {
            self.pitch = if y > 0.0 { -90.0 } else { 90.0 };
            return self;
        }
        let theta = (-x).atan2(z);
        self.yaw = ((theta + TAU) % TAU).to_degrees() as f32;
        let xz = (x * x + z * z).sqrt();
        self.pitch = (-y / xz).atan().to_degrees() as f32;
        self
    }
}

/// An entity living in an extent.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    pub uuid: Uuid,
    pub location: Location,
    pub entity: BaseEntity,
}

impl EntitySnapshot {
    pub fn new(location: Location, entity: BaseEntity) -> Self {
        EntitySnapshot {
            uuid: Uuid::new_v4(),
            location,
            entity,
        }
    }
}
