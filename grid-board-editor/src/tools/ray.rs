use bevy::prelude::*;
use constants::board::TILE_HEIGHT;

use crate::board::geometry::{Cell, world_to_cell};

/// Ray against an oriented box of edge lengths `size` placed by `xf`.
pub fn ray_hits_obb(origin: Vec3, dir: Vec3, xf: &GlobalTransform, size: Vec3) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    let he = size * 0.5;
    ray_aabb_hit_t(o_local, d_local, -he, he)
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for axis in 0..3 {
        let (lo, hi) = ((min[axis] - ray_origin[axis]) * inv[axis], (max[axis] - ray_origin[axis]) * inv[axis]);
        // Parallel ray: inside the slab gives NaN/inf pairs, outside gives same-signed infinities.
        if lo.is_nan() || hi.is_nan() {
            continue;
        }
        let (near, far) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        tmin = tmin.max(near);
        tmax = tmax.min(far);
        if tmin > tmax { return None; }
    }

    if tmax < 0.0 { return None; }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

/// Where the ray meets the top face of the tiles, as a board cell.
pub fn ray_to_cell(origin: Vec3, dir: Vec3, size: u32) -> Option<Cell> {
    let plane_y = TILE_HEIGHT * 0.5;
    if dir.y.abs() < 1e-4 {
        return None;
    }
    let t = (plane_y - origin.y) / dir.y;
    if t <= 0.0 {
        return None;
    }
    let hit = origin + dir * t;
    world_to_cell(hit.x, hit.z, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geometry::cell_to_world;

    #[test]
    fn straight_down_ray_hits_box_top() {
        let t = ray_aabb_hit_t(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y, Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(t, Some(9.0));
    }

    #[test]
    fn ray_beside_box_misses() {
        let t = ray_aabb_hit_t(Vec3::new(3.0, 10.0, 0.0), Vec3::NEG_Y, Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(t, None);
    }

    #[test]
    fn box_behind_ray_misses() {
        let t = ray_aabb_hit_t(Vec3::new(0.0, 10.0, 0.0), Vec3::Y, Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(t, None);
    }

    #[test]
    fn obb_hit_respects_translation() {
        let xf = GlobalTransform::from(Transform::from_xyz(5.0, 0.0, 5.0));
        let origin = Vec3::new(5.0, 10.0, 5.0);
        assert!(ray_hits_obb(origin, Vec3::NEG_Y, &xf, Vec3::ONE).is_some());
        assert!(ray_hits_obb(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y, &xf, Vec3::ONE).is_none());
    }

    #[test]
    fn downward_ray_picks_cell_under_it() {
        let size = 8;
        let cell = Cell::new(2, 6);
        let centre = cell_to_world(cell, size);
        let origin = Vec3::new(centre.x, 20.0, centre.y);
        assert_eq!(ray_to_cell(origin, Vec3::NEG_Y, size), Some(cell));
    }

    #[test]
    fn oblique_ray_off_the_board_picks_nothing() {
        let dir = Vec3::new(1.0, -0.1, 0.0).normalize();
        assert_eq!(ray_to_cell(Vec3::new(0.0, 5.0, 0.0), dir, 4), None);
        assert_eq!(ray_to_cell(Vec3::new(0.0, 5.0, 0.0), Vec3::X, 4), None);
    }
}
