//! Containment queries and selection resolution.

use std::collections::HashSet;

use nalgebra::Point3;

use crate::{Entry, EntryId, Frustum, Winding};

/// How a finished lasso combines with the existing selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionModifier {
    /// Replace the selection.
    #[default]
    None,
    /// Union with the selection.
    Add,
    /// Remove from the selection.
    Subtract,
}

/// Entries found inside a lasso and the winding that found them.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub ids: Vec<EntryId>,
    pub winding: Winding,
}

/// Returns the ids of all entries inside the frustum, in entry order.
pub fn find_inside(entries: &[Entry], frustum: &Frustum) -> Vec<EntryId> {
    entries
        .iter()
        .filter(|entry| frustum.contains(entry.position))
        .map(|entry| entry.id)
        .collect()
}

/// Finds entries inside the lasso, falling back to the inverted winding once
/// if the normal winding finds nothing.
///
/// The fallback result is returned as-is, even when it is empty too.
pub fn find_with_fallback(
    entries: &[Entry],
    lasso_points: &[Point3<f32>],
    apex: Point3<f32>,
) -> Lookup {
    let frustum = Frustum::build(apex, lasso_points, Winding::Normal);
    let ids = find_inside(entries, &frustum);
    if !ids.is_empty() {
        return Lookup {
            ids,
            winding: Winding::Normal,
        };
    }

    log::debug!("lasso found nothing, retrying with inverted winding");
    let frustum = Frustum::build(apex, lasso_points, Winding::Inverted);
    Lookup {
        ids: find_inside(entries, &frustum),
        winding: Winding::Inverted,
    }
}

/// Combines freshly found ids with the prior selection.
///
/// - `None`: exactly `found`.
/// - `Add`: `prior` followed by new ids from `found`, without duplicates.
/// - `Subtract`: `prior` minus everything in `found`, keeping prior order.
pub fn apply_modifier(
    prior: &[EntryId],
    found: &[EntryId],
    modifier: SelectionModifier,
) -> Vec<EntryId> {
    match modifier {
        SelectionModifier::None => found.to_vec(),
        SelectionModifier::Add => {
            let mut seen = HashSet::with_capacity(prior.len() + found.len());
            prior
                .iter()
                .chain(found)
                .copied()
                .filter(|id| seen.insert(*id))
                .collect()
        }
        SelectionModifier::Subtract => {
            let removed: HashSet<EntryId> = found.iter().copied().collect();
            prior
                .iter()
                .copied()
                .filter(|id| !removed.contains(id))
                .collect()
        }
    }
}

/// Resolves a completed lasso into the new selection.
///
/// The caller is responsible for updating `is_selected` on the entries,
/// usually through [`crate::EntryStore::replace_selection`].
pub fn resolve_selection(
    entries: &[Entry],
    lasso_points: &[Point3<f32>],
    apex: Point3<f32>,
    prior: &[EntryId],
    modifier: SelectionModifier,
) -> Vec<EntryId> {
    let lookup = find_with_fallback(entries, lasso_points, apex);
    let result = apply_modifier(prior, &lookup.ids, modifier);
    log::debug!(
        "lasso matched {} entries ({:?} winding), {:?} selection now has {}",
        lookup.ids.len(),
        lookup.winding,
        modifier,
        result.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apex() -> Point3<f32> {
        Point3::new(0.0, 0.0, 10.0)
    }

    /// Clockwise as seen from the apex: inward-facing normals need no fallback.
    fn clockwise_square() -> Vec<Point3<f32>> {
        vec![
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(-1.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
        ]
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry::at(0, Point3::new(0.0, 0.0, 5.0)),
            Entry::at(1, Point3::new(5.0, 5.0, 5.0)),
            Entry::at(2, Point3::new(-0.5, 0.5, 1.0)),
        ]
    }

    #[test]
    fn find_inside_keeps_entry_order() {
        let frustum = Frustum::build(apex(), &clockwise_square(), Winding::Normal);
        assert_eq!(find_inside(&entries(), &frustum), vec![0, 2]);
    }

    #[test]
    fn find_inside_empty_entries() {
        let frustum = Frustum::build(apex(), &clockwise_square(), Winding::Normal);
        assert!(find_inside(&[], &frustum).is_empty());
    }

    #[test]
    fn no_fallback_when_first_pass_finds_something() {
        let lookup = find_with_fallback(&entries(), &clockwise_square(), apex());
        assert_eq!(lookup.winding, Winding::Normal);
        assert_eq!(lookup.ids, vec![0, 2]);
    }

    #[test]
    fn fallback_runs_when_first_pass_is_empty() {
        let mut points = clockwise_square();
        points.reverse();
        let lookup = find_with_fallback(&entries(), &points, apex());
        assert_eq!(lookup.winding, Winding::Inverted);
        assert_eq!(lookup.ids, vec![0, 2]);
    }

    #[test]
    fn fallback_result_kept_even_when_empty() {
        let far_away = vec![Entry::at(7, Point3::new(50.0, 50.0, 0.0))];
        let lookup = find_with_fallback(&far_away, &clockwise_square(), apex());
        assert_eq!(lookup.winding, Winding::Inverted);
        assert!(lookup.ids.is_empty());
    }

    #[test]
    fn modifier_none_returns_found() {
        let replaced = apply_modifier(&[1, 2, 3], &[3, 4], SelectionModifier::None);
        assert_eq!(replaced, vec![3, 4]);
    }

    #[test]
    fn modifier_add_unions_without_duplicates() {
        let result = apply_modifier(&[1, 2, 3], &[3, 4], SelectionModifier::Add);
        assert_eq!(result, vec![1, 2, 3, 4]);

        let result = apply_modifier(&[5, 5, 1], &[1, 6, 6], SelectionModifier::Add);
        assert_eq!(result, vec![5, 1, 6]);
    }

    #[test]
    fn modifier_subtract_preserves_prior_order() {
        let subtract = SelectionModifier::Subtract;
        assert_eq!(apply_modifier(&[1, 2, 3], &[3, 4], subtract), vec![1, 2]);
        assert_eq!(apply_modifier(&[9, 4, 7, 1], &[7], subtract), vec![9, 4, 1]);
    }

    #[test]
    fn resolve_selection_applies_modifier() {
        let result = resolve_selection(
            &entries(),
            &clockwise_square(),
            apex(),
            &[1, 2],
            SelectionModifier::Add,
        );
        assert_eq!(result, vec![1, 2, 0]);

        let result = resolve_selection(
            &entries(),
            &clockwise_square(),
            apex(),
            &[1, 2],
            SelectionModifier::Subtract,
        );
        assert_eq!(result, vec![1]);
    }
}
