//! Hover picking against the plotted point cloud.

use crate::{Entry, EntryId, Ray};

/// Returns the entry under the cursor ray.
///
/// Entries count as hit when their perpendicular distance to the ray is at
/// most `threshold` and they lie in front of the ray origin. The hit nearest
/// to the origin along the ray wins; ties keep the earlier entry.
pub fn pick_entry(entries: &[Entry], ray: &Ray, threshold: f32) -> Option<EntryId> {
    let mut closest: Option<(EntryId, f32)> = None;

    for entry in entries {
        let (t, distance) = ray.closest_approach(entry.position);
        if t < 0.0 || distance > threshold {
            continue;
        }
        if closest.is_none_or(|(_, best)| t < best) {
            closest = Some((entry.id, t));
        }
    }

    closest.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn ray() -> Ray {
        Ray::new(Point3::new(0.0, 0.0, 10.0), -Vector3::z())
    }

    #[test]
    fn picks_nearest_hit_along_ray() {
        let entries = vec![
            Entry::at(0, Point3::new(0.1, 0.0, 0.0)),
            Entry::at(1, Point3::new(0.0, 0.2, 4.0)),
            Entry::at(2, Point3::new(3.0, 0.0, 6.0)),
        ];
        assert_eq!(pick_entry(&entries, &ray(), 0.5), Some(1));
    }

    #[test]
    fn ignores_points_behind_origin_or_too_far() {
        let entries = vec![
            Entry::at(0, Point3::new(0.0, 0.0, 12.0)),
            Entry::at(1, Point3::new(2.0, 0.0, 0.0)),
        ];
        assert_eq!(pick_entry(&entries, &ray(), 0.5), None);
    }

    #[test]
    fn ties_keep_earlier_entry() {
        let entries = vec![
            Entry::at(4, Point3::new(0.1, 0.0, 2.0)),
            Entry::at(5, Point3::new(-0.1, 0.0, 2.0)),
        ];
        assert_eq!(pick_entry(&entries, &ray(), 0.5), Some(4));
    }
}
