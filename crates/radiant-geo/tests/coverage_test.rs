use geo::algorithm::area::Area;
use geo::{BooleanOps, MultiPolygon};
use proptest::prelude::*;
use radiant_core::error::RadiantError;
use radiant_core::models::{Bbox, DatasourceRef, Geometry, KnownDatasource, Scene};
use radiant_geo::models::to_multi_polygon;
use radiant_geo::{fill_aoi, Coverage, CoverageAccumulator};

fn sentinel(id: &str, ring: Vec<[f64; 2]>) -> Scene {
    let ds = KnownDatasource::Sentinel2;
    Scene::new(
        id,
        DatasourceRef::new(ds.id(), ds.display_name()),
        Geometry::from_exterior(ring),
    )
}

fn square_aoi() -> Geometry {
    Geometry::from_exterior(vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]])
}

fn three_quadrants() -> Vec<Scene> {
    vec![
        sentinel("sw", vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
        sentinel("se", vec![[1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0]]),
        sentinel("nw", vec![[0.0, 1.0], [1.0, 1.0], [1.0, 2.0], [0.0, 2.0]]),
    ]
}

#[test]
fn test_missing_quadrant_is_insufficient() {
    let result = fill_aoi(&three_quadrants(), &square_aoi(), KnownDatasource::Sentinel2.id()).unwrap();
    assert_eq!(result, Coverage::InsufficientImagery);
}

#[test]
fn test_fourth_quadrant_completes_coverage() {
    let mut scenes = three_quadrants();
    scenes.push(sentinel("ne", vec![[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0]]));

    let result = fill_aoi(&scenes, &square_aoi(), KnownDatasource::Sentinel2.id()).unwrap();
    assert_eq!(
        result,
        Coverage::Covered(vec!["sw".into(), "se".into(), "nw".into(), "ne".into()])
    );
}

#[test]
fn test_datasource_mismatch_fails_before_union() {
    let mut scenes = three_quadrants();
    let landsat = KnownDatasource::Landsat8;
    // an invalid footprint after the mismatch proves no union was attempted
    scenes.push(Scene::new(
        "ls",
        DatasourceRef::new(landsat.id(), landsat.display_name()),
        Geometry::point(0.0, 0.0),
    ));

    let err = fill_aoi(&scenes, &square_aoi(), KnownDatasource::Sentinel2.id()).unwrap_err();
    match err {
        RadiantError::DatasourceMismatch { scene_id, found, expected } => {
            assert_eq!(scene_id, "ls");
            assert_eq!(found, landsat.id());
            assert_eq!(expected, KnownDatasource::Sentinel2.id());
        }
        other => panic!("unexpected error {other:?}"),
    }
}

/// Around Antigua, in the coordinates a map client produces
fn antigua() -> Bbox {
    Bbox::new(-62.32131958007813, 17.472502452750295, -61.60720825195313, 17.746070780233786)
}

fn footprint(id: &str, bbox: Bbox) -> Scene {
    let ds = KnownDatasource::Sentinel2;
    Scene::new(id, DatasourceRef::new(ds.id(), ds.display_name()), bbox.to_polygon())
}

#[test]
fn test_footprint_equal_to_aoi_covers_it() {
    let aoi = antigua();
    let result = fill_aoi(&[footprint("exact", aoi)], &aoi.to_polygon(), KnownDatasource::Sentinel2.id()).unwrap();
    assert_eq!(result, Coverage::Covered(vec!["exact".into()]));
}

#[test]
fn test_halves_sharing_an_edge_cover_aoi() {
    let aoi = antigua();
    let split = -61.97;
    let west = Bbox::new(aoi.min_x, aoi.min_y, split, aoi.max_y);
    let east = Bbox::new(split, aoi.min_y, aoi.max_x, aoi.max_y);

    let only_west = fill_aoi(&[footprint("west", west)], &aoi.to_polygon(), KnownDatasource::Sentinel2.id()).unwrap();
    assert_eq!(only_west, Coverage::InsufficientImagery);

    let result = fill_aoi(
        &[footprint("west", west), footprint("east", east)],
        &aoi.to_polygon(),
        KnownDatasource::Sentinel2.id(),
    )
    .unwrap();
    assert_eq!(result, Coverage::Covered(vec!["west".into(), "east".into()]));
}

#[test]
fn test_overlapping_tiles_with_matching_outer_edges() {
    let aoi = antigua();
    let west = Bbox::new(aoi.min_x, aoi.min_y, aoi.min_x + 0.45, aoi.max_y);
    let east = Bbox::new(aoi.max_x - 0.45, aoi.min_y, aoi.max_x, aoi.max_y);

    let result = fill_aoi(
        &[footprint("west", west), footprint("east", east)],
        &aoi.to_polygon(),
        KnownDatasource::Sentinel2.id(),
    )
    .unwrap();
    assert_eq!(result, Coverage::Covered(vec!["west".into(), "east".into()]));
}

#[test]
fn test_thin_gap_between_real_tiles_is_insufficient() {
    let aoi = antigua();
    let west = Bbox::new(aoi.min_x, aoi.min_y, -61.97, aoi.max_y);
    let east = Bbox::new(-61.96, aoi.min_y, aoi.max_x, aoi.max_y);

    let result = fill_aoi(
        &[footprint("west", west), footprint("east", east)],
        &aoi.to_polygon(),
        KnownDatasource::Sentinel2.id(),
    )
    .unwrap();
    assert_eq!(result, Coverage::InsufficientImagery);
}

#[test]
fn test_incremental_union_matches_full_recompute() {
    let aoi = antigua();
    let tiles = [
        Bbox::new(-62.4, 17.4, -62.1, 17.6),
        Bbox::new(-62.15, 17.45, -61.85, 17.8),
        Bbox::new(-61.9, 17.3, -61.5, 17.65),
    ];

    let mut acc = CoverageAccumulator::new(&aoi.to_polygon()).unwrap();
    let mut footprints = Vec::new();
    for (i, tile) in tiles.iter().enumerate() {
        acc.push(&footprint(&format!("t{i}"), *tile)).unwrap();
        footprints.push(to_multi_polygon(&tile.to_polygon(), "tile").unwrap());
    }

    let recomputed = footprints.iter().fold(MultiPolygon::new(vec![]), |union, next| union.union(next));
    let relative = (acc.union().unsigned_area() - recomputed.unsigned_area()).abs() / recomputed.unsigned_area();
    assert!(relative < 1e-9, "incremental and recomputed unions differ by {relative}");
}

fn strip(cells: usize) -> Geometry {
    let w = cells as f64;
    Geometry::from_exterior(vec![[0.0, 0.0], [w, 0.0], [w, 1.0], [0.0, 1.0]])
}

fn cell(i: usize) -> Scene {
    let x = i as f64;
    sentinel(
        &format!("cell-{i}"),
        vec![[x, 0.0], [x + 1.0, 0.0], [x + 1.0, 1.0], [x, 1.0]],
    )
}

proptest! {
    #[test]
    fn prop_every_cell_needed_in_any_order(order in Just((0..5usize).collect::<Vec<_>>()).prop_shuffle()) {
        let scenes: Vec<Scene> = order.iter().map(|&i| cell(i)).collect();
        let expected: Vec<String> = scenes.iter().map(|s| s.id.clone()).collect();

        let result = fill_aoi(&scenes, &strip(5), KnownDatasource::Sentinel2.id()).unwrap();
        prop_assert_eq!(result, Coverage::Covered(expected));
    }

    #[test]
    fn prop_fractional_tiles_cover_matching_aoi(
        origin in (-170.0f64..170.0, -80.0f64..80.0),
        width in 0.01f64..2.0,
        cells in 1..6usize,
    ) {
        let (x0, y0) = origin;
        let step = width / cells as f64;
        let edge = |i: usize| if i == cells { x0 + width } else { x0 + step * i as f64 };
        let scenes: Vec<Scene> = (0..cells)
            .map(|i| footprint(&format!("tile-{i}"), Bbox::new(edge(i), y0, edge(i + 1), y0 + step)))
            .collect();
        let expected: Vec<String> = scenes.iter().map(|s| s.id.clone()).collect();

        let aoi = Bbox::new(x0, y0, x0 + width, y0 + step).to_polygon();
        let result = fill_aoi(&scenes, &aoi, KnownDatasource::Sentinel2.id()).unwrap();
        prop_assert_eq!(result, Coverage::Covered(expected));
    }

    #[test]
    fn prop_dropping_a_cell_leaves_gap(skip in 0..5usize) {
        let scenes: Vec<Scene> = (0..5).filter(|&i| i != skip).map(cell).collect();
        let result = fill_aoi(&scenes, &strip(5), KnownDatasource::Sentinel2.id()).unwrap();
        prop_assert_eq!(result, Coverage::InsufficientImagery);
    }
}
