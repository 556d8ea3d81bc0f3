//! Randomised cross-checks between the arrangement engine and `geo`.

#![allow(clippy::unwrap_used)]

use geo::{Area, BooleanOps, MultiPolygon};
use proptest::prelude::*;

use super::convert::to_geo_polygon;
use super::{total_area, LibrarySubtract, SubtractPolygons};
use crate::geometry::PolygonWithHoles;

fn rect(x: f64, y: f64, w: f64, h: f64) -> PolygonWithHoles {
    PolygonWithHoles::from_coords(&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)], &[]).unwrap()
}

fn arb_rect() -> impl Strategy<Value = PolygonWithHoles> {
    (0.0f64..100.0, 0.0f64..100.0, 1.0f64..50.0, 1.0f64..50.0)
        .prop_map(|(x, y, w, h)| rect(x, y, w, h))
}

/// Triangles with arbitrary edge slopes; near-degenerate ones are skipped.
fn arb_triangle() -> impl Strategy<Value = PolygonWithHoles> {
    prop::array::uniform6(0.0f64..100.0).prop_filter_map("degenerate triangle", |c| {
        let t = PolygonWithHoles::from_coords(&[(c[0], c[1]), (c[2], c[3]), (c[4], c[5])], &[]).ok()?;
        (t.area() > 1.0).then_some(t)
    })
}

/// Area of `base` covered by the union of `subtract`.
fn covered_area(base: &PolygonWithHoles, subtract: &[PolygonWithHoles]) -> f64 {
    let union = subtract.iter().fold(MultiPolygon::new(vec![]), |acc, s| {
        acc.union(&to_geo_polygon(s))
    });
    union.intersection(&to_geo_polygon(base)).unsigned_area()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn engine_and_library_agree_on_area(
        base in arb_rect(),
        subtract in prop::collection::vec(arb_rect(), 0..5),
    ) {
        let engine = SubtractPolygons::new(base.clone(), subtract.clone()).execute().unwrap();
        let library = LibrarySubtract::new(base.clone(), subtract).execute().unwrap();
        let (a, b) = (total_area(&engine), total_area(&library));
        prop_assert!((a - b).abs() <= 1e-6 * base.area(), "engine {a} vs library {b}");
    }

    #[test]
    fn subtraction_conserves_area(
        base in arb_rect(),
        subtract in prop::collection::vec(arb_rect(), 1..5),
    ) {
        let remainder = SubtractPolygons::new(base.clone(), subtract.clone()).execute().unwrap();
        let covered = covered_area(&base, &subtract);
        let total = total_area(&remainder) + covered;
        prop_assert!(
            (total - base.area()).abs() <= 1e-6 * base.area(),
            "remainder + covered = {total}, base = {}",
            base.area()
        );
    }

    #[test]
    fn engine_and_library_agree_on_sloped_edges(
        base in arb_triangle(),
        subtract in prop::collection::vec(arb_triangle(), 0..5),
    ) {
        let engine = SubtractPolygons::new(base.clone(), subtract.clone()).execute().unwrap();
        let library = LibrarySubtract::new(base.clone(), subtract).execute().unwrap();
        let (a, b) = (total_area(&engine), total_area(&library));
        prop_assert!((a - b).abs() <= 1e-6 * base.area(), "engine {a} vs library {b}");
    }

    #[test]
    fn subtraction_conserves_area_on_sloped_edges(
        base in arb_triangle(),
        subtract in prop::collection::vec(arb_triangle(), 1..5),
    ) {
        let remainder = SubtractPolygons::new(base.clone(), subtract.clone()).execute().unwrap();
        let total = total_area(&remainder) + covered_area(&base, &subtract);
        prop_assert!(
            (total - base.area()).abs() <= 1e-6 * base.area(),
            "remainder + covered = {total}, base = {}",
            base.area()
        );
    }

    #[test]
    fn remainder_lies_inside_base_and_outside_subtrahends(
        base in arb_rect(),
        subtract in prop::collection::vec(arb_rect(), 1..4),
    ) {
        let remainder = SubtractPolygons::new(base.clone(), subtract.clone()).execute().unwrap();
        for piece in &remainder {
            let p = piece.interior_point().unwrap();
            prop_assert!(base.contains_point(&p));
            prop_assert!(subtract.iter().all(|s| !s.contains_point(&p)));
        }
    }
}
