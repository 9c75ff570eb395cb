//! Per-container free-space model: a 1cm-resolution voxel occupancy grid
//! (§4.1, representation option (a) — adequate for the station's container
//! sizes, roughly 100x100x200).
//!
//! A `SpaceModel` is always transient: the core rebuilds one from the
//! current store state at the start of a planning call and discards it
//! afterwards (§3 Ownership). All iteration here is in coordinate
//! lexicographic order so placement plans are reproducible (§4.1
//! Determinism).

use bitvec::vec::BitVec;

use crate::geometry::{Aabb, Dimensions, Position};
use crate::ids::ItemId;

/// One cell is exactly 1cm x 1cm x 1cm; coordinates below this module
/// boundary are integer, in centimeters, rounded from the `f64` world.
fn to_cells(v: f64) -> i64 {
    v.round() as i64
}

#[derive(Debug, Clone)]
pub struct SpaceModel {
    dims: Dimensions,
    w: i64,
    d: i64,
    h: i64,
    occupied: BitVec,
    /// Items already placed in this container, for retrieval-depth queries.
    placed: Vec<(ItemId, Aabb)>,
}

impl SpaceModel {
    /// Builds an empty model for a container of `dims`, then places every
    /// `(item, box)` pair already resident in it.
    pub fn new(dims: Dimensions, existing: impl IntoIterator<Item = (ItemId, Aabb)>) -> Self {
        let w = to_cells(dims.w).max(0);
        let d = to_cells(dims.d).max(0);
        let h = to_cells(dims.h).max(0);
        let mut model = SpaceModel {
            dims,
            w,
            d,
            h,
            occupied: BitVec::repeat(false, (w * d * h).max(0) as usize),
            placed: Vec::new(),
        };
        for (item_id, bbox) in existing {
            model.mark_occupied(&bbox);
            model.placed.push((item_id, bbox));
        }
        model
    }

    fn index(&self, x: i64, y: i64, z: i64) -> usize {
        (x + y * self.w + z * self.w * self.d) as usize
    }

    fn mark_occupied(&mut self, bbox: &Aabb) {
        let (x0, y0, z0) = (to_cells(bbox.min.x), to_cells(bbox.min.y), to_cells(bbox.min.z));
        let (x1, y1, z1) = (to_cells(bbox.max_x()), to_cells(bbox.max_y()), to_cells(bbox.max_z()));
        for z in z0..z1.min(self.h) {
            for y in y0..y1.min(self.d) {
                for x in x0..x1.min(self.w) {
                    if x >= 0 && y >= 0 && z >= 0 {
                        let idx = self.index(x, y, z);
                        self.occupied.set(idx, true);
                    }
                }
            }
        }
    }

    fn region_is_free(&self, x0: i64, y0: i64, z0: i64, w: i64, d: i64, h: i64) -> bool {
        for z in z0..z0 + h {
            for y in y0..y0 + d {
                for x in x0..x0 + w {
                    if self.occupied[self.index(x, y, z)] {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Returns the lowest `y`, then lowest `z`, then lowest `x` corner at
    /// which a box of `dims` fits entirely inside the container and does
    /// not intersect any occupied cell; `None` if no such corner exists.
    pub fn find_position(&self, dims: Dimensions) -> Option<Position> {
        let (bw, bd, bh) = (to_cells(dims.w), to_cells(dims.d), to_cells(dims.h));
        if bw <= 0 || bd <= 0 || bh <= 0 || bw > self.w || bd > self.d || bh > self.h {
            return None;
        }
        for y in 0..=(self.d - bd) {
            for z in 0..=(self.h - bh) {
                for x in 0..=(self.w - bw) {
                    if self.region_is_free(x, y, z, bw, bd, bh) {
                        return Some(Position::new(x as f64, y as f64, z as f64));
                    }
                }
            }
        }
        None
    }

    /// Marks `dims` at `position` as occupied. Precondition: `position` was
    /// produced by [`SpaceModel::find_position`] or otherwise verified
    /// clear; this does not re-check for overlap.
    pub fn place(&mut self, item_id: ItemId, position: Position, dims: Dimensions) {
        let bbox = Aabb::new(position, dims);
        self.mark_occupied(&bbox);
        self.placed.push((item_id, bbox));
    }

    /// Counts distinct other items whose bounding boxes intersect the
    /// forward projection of `bbox` along `-y` toward the access face
    /// (§4.1). `exclude` lets a caller omit the target item itself when the
    /// model already has it placed (as during a retrieval preview).
    pub fn retrieval_depth(&self, bbox: Aabb, exclude: Option<&ItemId>) -> usize {
        self.placed
            .iter()
            .filter(|(id, other)| {
                exclude.map_or(true, |e| id != e)
                    && other.overlaps_x(&bbox)
                    && other.overlaps_z(&bbox)
                    && other.max_y() >= bbox.min.y
            })
            .count()
    }

    /// Vacates `item_id`'s cells, e.g. when a rearrangement step moves it
    /// out of this container. Rebuilds occupancy from the remaining placed
    /// items rather than trying to track holes incrementally.
    pub fn remove(&mut self, item_id: &ItemId) {
        if let Some(pos) = self.placed.iter().position(|(id, _)| id == item_id) {
            self.placed.remove(pos);
        }
        self.occupied.fill(false);
        let placed = self.placed.clone();
        for (_, bbox) in &placed {
            self.mark_occupied(bbox);
        }
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }
}
