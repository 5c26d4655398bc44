use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;
use voxedit::function::BlockPattern;
use voxedit::math::{AffineTransform, BlockVector2, Vector2};
use voxedit::regions::{ConvexPolyhedralRegion, CuboidRegion, CylinderRegion, Polygonal2DRegion};
use voxedit::{
    BlockArrayClipboard, BlockVector3, EditSession, Extent, History, MemoryWorld, Region,
    RegionShape, Transform,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn cube(size: i32) -> Region {
    Region::Cuboid(CuboidRegion::new(
        BlockVector3::ZERO,
        BlockVector3::new(size - 1, size - 1, size - 1),
    ))
}

fn make_world_solid(size: i32) -> MemoryWorld {
    let mut world = MemoryWorld::default();
    for p in cube(size).iter() {
        let _ = world.set_block(p, "minecraft:stone".into());
    }
    world
}

// ── Benchmarks ───────────────────────────────────────────────────────────────

fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains");
    group.measurement_time(Duration::from_secs(3));

    let regions = [
        ("cuboid", cube(32)),
        (
            "cylinder",
            Region::Cylinder(CylinderRegion::new(BlockVector2::ZERO, Vector2::new(16.0, 16.0), 0, 31)),
        ),
        (
            "polygon",
            Region::Polygon(Polygonal2DRegion::new(
                vec![
                    BlockVector2::new(0, 0),
                    BlockVector2::new(31, 4),
                    BlockVector2::new(24, 31),
                    BlockVector2::new(3, 20),
                ],
                0,
                31,
            )),
        ),
        ("polyhedron", {
            let mut hull = ConvexPolyhedralRegion::new();
            for v in [(0, 0, 0), (31, 0, 0), (0, 31, 0), (0, 0, 31), (31, 31, 31)] {
                hull.add_vertex(v.into());
            }
            Region::Polyhedron(hull)
        }),
    ];

    for (name, region) in &regions {
        group.bench_function(*name, |b| {
            b.iter(|| black_box(region.volume()));
        });
    }
    group.finish();
}

fn bench_set_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_blocks");
    group.measurement_time(Duration::from_secs(3));

    for &size in &[16, 32] {
        for batching in [false, true] {
            let label = format!("{}_{}", size, if batching { "batched" } else { "direct" });
            group.bench_function(&label, |b| {
                b.iter(|| {
                    let mut world = MemoryWorld::default();
                    let mut edit = EditSession::new(&mut world, None, History::default(), batching);
                    edit.set_blocks(&cube(size), BlockPattern::new("minecraft:stone")).unwrap();
                    black_box(edit.finish().unwrap());
                });
            });
        }
    }
    group.finish();
}

fn bench_undo(c: &mut Criterion) {
    let mut group = c.benchmark_group("undo");
    group.measurement_time(Duration::from_secs(3));

    for optimized in [false, true] {
        let label = if optimized { "block_optimized" } else { "array_list" };
        group.bench_function(label, |b| {
            let mut world = make_world_solid(16);
            let mut edit = EditSession::new(&mut world, None, History::new(optimized), false);
            edit.set_blocks(&cube(16), BlockPattern::new("minecraft:dirt")).unwrap();
            edit.set_blocks(&cube(16), BlockPattern::new("minecraft:glass")).unwrap();
            let history = edit.finish().unwrap();
            b.iter(|| {
                let mut edit = EditSession::new(&mut world, None, History::default(), true);
                edit.undo(&history).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_copy_paste(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_paste");
    group.measurement_time(Duration::from_secs(3));

    let mut world = make_world_solid(16);
    let clipboard: BlockArrayClipboard = EditSession::new(&mut world, None, History::default(), false)
        .copy(&cube(16))
        .unwrap();

    for (name, transform) in [
        ("identity", Transform::Identity),
        ("rotate_y", Transform::Affine(AffineTransform::new().rotate_y(90.0))),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut target = MemoryWorld::default();
                let mut edit = EditSession::new(&mut target, None, History::default(), false);
                edit.paste(&clipboard, BlockVector3::new(100, 0, 100), transform).unwrap();
                black_box(edit.get_block(BlockVector3::new(100, 0, 100)));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_contains, bench_set_blocks, bench_undo, bench_copy_paste);
criterion_main!(benches);
