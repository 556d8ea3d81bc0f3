use spade::handles::FixedUndirectedEdgeHandle;
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{OperationError, Result};
use crate::geometry::{PolygonWithHoles, SimplePolygon};
use crate::math::Point2;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates a polygon with holes.
///
/// Inserts every ring as a closed loop of constraint edges and keeps the
/// triangles at odd constraint depth, i.e. inside the outer ring and
/// outside all holes.
///
/// # Errors
///
/// Returns `OperationError::Failed` if a vertex cannot be inserted.
pub fn triangulate(polygon: &PolygonWithHoles) -> Result<Vec<[Point2; 3]>> {
    let mut cdt = Cdt::new();
    for ring in polygon.rings() {
        insert_constraint_loop(&mut cdt, ring)?;
    }

    let depths = constraint_depths(&cdt);

    let triangles = cdt
        .inner_faces()
        .filter(|f| depths[f.fix().index()].is_some_and(|d| d % 2 == 1))
        .map(|f| {
            let [a, b, c] = f.vertices();
            [to_point(a.position()), to_point(b.position()), to_point(c.position())]
        })
        .collect();
    Ok(triangles)
}

fn to_point(p: SpadePoint2<f64>) -> Point2 {
    Point2::new(p.x, p.y)
}

/// Inserts a closed ring as constraint edges into the CDT.
///
/// Constraints that would cross an existing one (self-touching input) are
/// skipped.
fn insert_constraint_loop(cdt: &mut Cdt, ring: &SimplePolygon) -> Result<()> {
    let mut handles = Vec::with_capacity(ring.len());
    for p in ring.points() {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| OperationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to && cdt.can_add_constraint(from, to) {
            cdt.add_constraint(from, to);
        }
    }

    Ok(())
}

/// Number of constraint edges crossed to reach each face from outside the
/// convex hull, indexed by face. The outer face and unreachable faces stay
/// `None`. Odd depth means inside the polygon.
fn constraint_depths(cdt: &Cdt) -> Vec<Option<u32>> {
    let mut depths: Vec<Option<u32>> = vec![None; cdt.num_all_faces()];
    let mut stack = Vec::new();

    // Hull triangles: one step in from the outer face.
    for edge in cdt.directed_edges().filter(|e| e.face().is_outer()) {
        let Some(face) = edge.rev().face().as_inner() else {
            continue;
        };
        let slot = &mut depths[face.fix().index()];
        if slot.is_none() {
            let depth = crossings(cdt, edge.as_undirected().fix());
            *slot = Some(depth);
            stack.push((face.fix(), depth));
        }
    }

    while let Some((face, depth)) = stack.pop() {
        for edge in cdt.face(face).adjacent_edges() {
            let Some(neighbour) = edge.rev().face().as_inner() else {
                continue;
            };
            let slot = &mut depths[neighbour.fix().index()];
            if slot.is_none() {
                let next = depth + crossings(cdt, edge.as_undirected().fix());
                *slot = Some(next);
                stack.push((neighbour.fix(), next));
            }
        }
    }

    depths
}

fn crossings(cdt: &Cdt, edge: FixedUndirectedEdgeHandle) -> u32 {
    u32::from(cdt.is_constraint_edge(edge))
}
