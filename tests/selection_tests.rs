use voxedit::config::{AllPermissions, NoPermissions};
use voxedit::math::{BlockVector2, Vector2};
use voxedit::regions::{ConvexPolyhedralRegion, CuboidRegion, CylinderRegion};
use voxedit::{
    BlockVector3, IncompleteRegionError, LocalConfiguration, LocalSession, Region,
    RegionOperationError, RegionSelector, RegionShape, SelectorType,
};

#[test]
fn test_cuboid_size_follows_corners() {
    let region = CuboidRegion::new(BlockVector3::new(-3, 10, 4), BlockVector3::new(2, 5, -1));
    assert_eq!(region.dimensions(), BlockVector3::new(6, 6, 6));
    assert_eq!(region.volume(), 216);
    assert_eq!(region.iter().count(), 216);
    assert!(region.contains(BlockVector3::new(2, 5, -1)));
    assert!(!region.contains(BlockVector3::new(3, 5, -1)));
}

#[test]
fn test_cylinder_rim_is_inside() {
    let cylinder = CylinderRegion::new(BlockVector2::ZERO, Vector2::new(5.0, 5.0), 0, 0);
    assert!(cylinder.contains(BlockVector3::new(5, 0, 0)));
    assert!(!cylinder.contains(BlockVector3::new(6, 0, 0)));
    assert!(!cylinder.contains(BlockVector3::new(0, 1, 0)));
    for point in cylinder.iter() {
        assert!(point.contained_within(cylinder.minimum_point(), cylinder.maximum_point()));
    }
}

#[test]
fn test_odd_cylinder_resize_is_rejected() {
    let mut region = Region::Cylinder(CylinderRegion::new(BlockVector2::ZERO, Vector2::new(3.0, 3.0), 0, 4));
    let before = region.clone();
    assert_eq!(
        region.expand(&[BlockVector3::new(3, 0, 0)]),
        Err(RegionOperationError::OddCylinderResize { delta: 3 })
    );
    assert_eq!(region, before);
    region.expand(&[BlockVector3::new(0, 2, 0)]).unwrap();
    assert_eq!(region.maximum_point().y, 6);
}

#[test]
fn test_polyhedron_tetrahedron() {
    let mut region = ConvexPolyhedralRegion::new();
    for vertex in [(0, 0, 0), (6, 0, 0), (0, 6, 0), (0, 0, 6)] {
        assert!(region.add_vertex(vertex.into()));
    }
    assert!(region.contains(BlockVector3::new(1, 1, 1)));
    assert!(!region.contains(BlockVector3::new(5, 5, 5)));
    assert!(!region.add_vertex(BlockVector3::new(1, 1, 1)));
    assert!(region.iter().all(|p| region.contains(p)));
}

#[test]
fn test_cuboid_selection_state_machine() {
    let mut session = LocalSession::default();
    assert_eq!(session.selection(), Err(IncompleteRegionError));
    assert!(session.select_primary(BlockVector3::new(0, 0, 0), &AllPermissions));
    assert!(!session.select_primary(BlockVector3::new(0, 0, 0), &AllPermissions));
    assert_eq!(session.selection(), Err(IncompleteRegionError));
    assert!(session.select_secondary(BlockVector3::new(4, 4, 4), &AllPermissions));
    assert_eq!(session.selection().unwrap().volume(), 125);

    session.selector_mut().expand(&[BlockVector3::new(0, 3, 0)]).unwrap();
    assert_eq!(session.selection().unwrap().maximum_point().y, 7);
}

#[test]
fn test_switching_shape_keeps_the_bounds() {
    let mut session = LocalSession::default();
    session.select_primary(BlockVector3::new(0, 0, 0), &AllPermissions);
    session.select_secondary(BlockVector3::new(8, 3, 8), &AllPermissions);

    session.set_selector_type(SelectorType::Cylinder);
    assert_eq!(session.selector().selector_type(), SelectorType::Cylinder);
    let cylinder = session.selection().unwrap();
    assert!(cylinder.contains(BlockVector3::new(4, 0, 4)));
    assert_eq!(cylinder.minimum_point().y, 0);
    assert_eq!(cylinder.maximum_point().y, 3);

    session.set_selector_type(SelectorType::Polygon);
    let polygon = session.selection().unwrap();
    assert!(polygon.contains(BlockVector3::new(4, 2, 4)));
}

#[test]
fn test_polygon_vertex_limit_from_config() {
    let config = LocalConfiguration {
        default_max_polygonal_points: Some(3),
        ..Default::default()
    };
    let mut session = LocalSession::new(config);
    session.set_selector_type(SelectorType::Polygon);

    assert!(session.select_primary(BlockVector3::new(0, 0, 0), &NoPermissions));
    assert!(session.select_secondary(BlockVector3::new(6, 0, 0), &NoPermissions));
    assert!(session.select_secondary(BlockVector3::new(6, 0, 6), &NoPermissions));
    assert!(!session.select_secondary(BlockVector3::new(0, 0, 6), &NoPermissions));
    assert!(session.selector().is_defined());

    // unrestricted actors use the hard maximum of 20
    assert!(session.select_secondary(BlockVector3::new(0, 0, 6), &AllPermissions));
}

#[test]
fn test_clear_resets_selection() {
    let mut session = LocalSession::default();
    session.select_primary(BlockVector3::new(1, 1, 1), &AllPermissions);
    session.select_secondary(BlockVector3::new(2, 2, 2), &AllPermissions);
    session.selector_mut().clear();
    assert!(!session.selector().is_defined());
    assert!(session.selector().primary_position().is_err());
}
