//! Data records and the store interface the selection engine talks to.

use std::collections::HashSet;

use nalgebra::Point3;
use serde_json::{Map, Value};

/// Stable identifier of an entry, assigned at ingestion.
pub type EntryId = usize;

/// One data record placed in the 3D graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Assigned once, in input order from 0; never reused within a dataset.
    pub id: EntryId,
    pub attributes: Map<String, Value>,
    /// Derived from the axis mappings and scales.
    pub position: Point3<f32>,
    pub is_selected: bool,
}

impl Entry {
    /// Creates an unselected entry at the origin.
    pub fn new(id: EntryId, attributes: Map<String, Value>) -> Self {
        Self {
            id,
            attributes,
            position: Point3::origin(),
            is_selected: false,
        }
    }

    /// Creates an attribute-less entry at a fixed position.
    pub fn at(id: EntryId, position: Point3<f32>) -> Self {
        Self {
            position,
            ..Self::new(id, Map::new())
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

/// Live entry list and current selection, owned by the application.
pub trait EntryStore {
    /// All entries currently plotted.
    fn entries(&self) -> &[Entry];

    /// Ids of the selected entries, in selection order.
    fn selection(&self) -> &[EntryId];

    /// Replaces the selection. Implementations set `is_selected` on every
    /// entry whose id is listed and clear it on all others.
    fn replace_selection(&mut self, ids: Vec<EntryId>);
}

/// Sets `is_selected` on `entries` to match `ids`.
pub fn mark_selected(entries: &mut [Entry], ids: &[EntryId]) {
    let selected: HashSet<EntryId> = ids.iter().copied().collect();
    for entry in entries {
        entry.is_selected = selected.contains(&entry.id);
    }
}
