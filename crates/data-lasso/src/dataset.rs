//! In-memory dataset: entries, axis mappings, scales and zoom history.

use std::collections::BTreeMap;

use nalgebra::Point3;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::entry::mark_selected;
use crate::{Entry, EntryId, EntryStore, LassoError, Scale};

/// Key under which the entry id is written on export.
pub const ID_FIELD: &str = "__id";

/// Hue used for points when no color attribute is mapped.
pub const DEFAULT_HUE: f32 = 0.15;

/// Attribute assigned to each plotted channel. Unmapped axes sit at 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxisMappings {
    pub x: Option<String>,
    pub y: Option<String>,
    pub z: Option<String>,
    pub color: Option<String>,
}

impl AxisMappings {
    fn names(&self) -> impl Iterator<Item = &str> {
        [&self.x, &self.y, &self.z, &self.color]
            .into_iter()
            .filter_map(|name| name.as_deref())
    }
}

/// State saved before zooming in.
#[derive(Debug, Clone)]
struct Snapshot {
    entries: Vec<Entry>,
    mappings: AxisMappings,
    selection: Vec<EntryId>,
}

/// The plotted records plus everything derived from them.
///
/// Entry ids are assigned once at load time and survive re-mapping and
/// zooming, so selections can always be joined back to entries by id.
#[derive(Debug, Clone)]
pub struct Dataset {
    graph_size: f32,
    entries: Vec<Entry>,
    scales: BTreeMap<String, Scale>,
    mappings: AxisMappings,
    selection: Vec<EntryId>,
    snapshots: Vec<Snapshot>,
}

impl Dataset {
    /// Creates a dataset from flat records, numbering them from 0.
    pub fn from_records(records: Vec<Map<String, Value>>, graph_size: f32) -> Self {
        let entries = records
            .into_iter()
            .enumerate()
            .map(|(id, attributes)| Entry::new(id, attributes))
            .collect();

        let mut dataset = Self {
            graph_size,
            entries,
            scales: BTreeMap::new(),
            mappings: AxisMappings::default(),
            selection: Vec::new(),
            snapshots: Vec::new(),
        };
        dataset.rescale();
        log::info!(
            "loaded {} entries with {} attributes",
            dataset.entries.len(),
            dataset.scales.len()
        );
        dataset
    }

    /// Parses a JSON array of flat objects.
    pub fn from_json_str(text: &str, graph_size: f32) -> Result<Self, LassoError> {
        let Value::Array(items) = serde_json::from_str::<Value>(text)? else {
            return Err(LassoError::InvalidData(
                "expected a JSON array of records".to_string(),
            ));
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(LassoError::InvalidData(format!(
                    "record {index} is not an object: {other}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_records(records, graph_size))
    }

    #[inline]
    pub fn graph_size(&self) -> f32 {
        self.graph_size
    }

    #[inline]
    pub fn mappings(&self) -> &AxisMappings {
        &self.mappings
    }

    /// Names of all attributes present in the current entries, sorted.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.scales.keys().map(String::as_str)
    }

    pub fn scale(&self, attribute: &str) -> Option<&Scale> {
        self.scales.get(attribute)
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Number of zoom levels that can be undone.
    pub fn zoom_depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Maps attributes to axes and recomputes positions.
    pub fn set_mappings(&mut self, mappings: AxisMappings) -> Result<(), LassoError> {
        if let Some(unknown) = mappings.names().find(|name| !self.scales.contains_key(*name)) {
            return Err(LassoError::UnknownAttribute(unknown.to_string()));
        }
        log::debug!("axis mappings changed to {mappings:?}");
        self.mappings = mappings;
        self.rescale();
        Ok(())
    }

    /// Hue in `[0, 0.25]` for an entry's color attribute, or the default hue.
    pub fn hue(&self, entry: &Entry) -> f32 {
        match self.mapped_value(&self.mappings.color, entry) {
            Some(value) => value / self.graph_size * 0.25,
            None => DEFAULT_HUE,
        }
    }

    /// Point size for rendering; shrinks as the graph fills up.
    pub fn point_size(&self) -> f32 {
        let count = self.entries.len().max(2) as f32;
        (self.graph_size / count.ln()).powi(2) / 1000.0
    }

    /// Narrows the dataset to the selected entries.
    ///
    /// The current state is pushed onto the zoom history; kept entries retain
    /// their ids but are deselected, and scales are recomputed for them.
    pub fn zoom_in(&mut self) -> Result<(), LassoError> {
        if self.selection.is_empty() {
            return Err(LassoError::EmptySelection);
        }

        let kept: Vec<Entry> = self
            .entries
            .iter()
            .filter(|entry| entry.is_selected)
            .cloned()
            .map(|mut entry| {
                entry.is_selected = false;
                entry
            })
            .collect();

        self.snapshots.push(Snapshot {
            entries: std::mem::replace(&mut self.entries, kept),
            mappings: self.mappings.clone(),
            selection: std::mem::take(&mut self.selection),
        });
        self.rescale();
        log::debug!(
            "zoomed in to {} entries (depth {})",
            self.entries.len(),
            self.snapshots.len()
        );
        Ok(())
    }

    /// Restores the state from before the last zoom-in.
    pub fn zoom_out(&mut self) -> Result<(), LassoError> {
        let snapshot = self.snapshots.pop().ok_or(LassoError::NoSnapshot)?;
        self.entries = snapshot.entries;
        self.mappings = snapshot.mappings;
        self.selection = snapshot.selection;
        self.rescale();
        log::debug!(
            "zoomed out to {} entries (depth {})",
            self.entries.len(),
            self.snapshots.len()
        );
        Ok(())
    }

    /// Selected entries, in entry order.
    pub fn selected_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|entry| entry.is_selected)
    }

    /// Serializes the selected records, with their ids, as a JSON array.
    pub fn export_selected_json(&self) -> Result<String, LassoError> {
        let records: Vec<Value> = self
            .selected_entries()
            .map(|entry| {
                let mut record = entry.attributes.clone();
                record.insert(ID_FIELD.to_string(), Value::from(entry.id));
                Value::Object(record)
            })
            .collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }

    /// Recomputes scales from the current entries and re-places every entry.
    fn rescale(&mut self) {
        let mut columns: BTreeMap<&str, Vec<&Value>> = BTreeMap::new();
        for entry in &self.entries {
            for (name, value) in &entry.attributes {
                columns.entry(name.as_str()).or_default().push(value);
            }
        }

        self.scales = columns
            .into_iter()
            .map(|(name, values)| {
                let scale = Scale::from_values(values, self.graph_size);
                (name.to_string(), scale)
            })
            .collect();

        let positions: Vec<Point3<f32>> = self
            .entries
            .iter()
            .map(|entry| {
                Point3::new(
                    self.mapped_value(&self.mappings.x, entry).unwrap_or(0.0),
                    self.mapped_value(&self.mappings.y, entry).unwrap_or(0.0),
                    self.mapped_value(&self.mappings.z, entry).unwrap_or(0.0),
                )
            })
            .collect();

        for (entry, position) in self.entries.iter_mut().zip(positions) {
            entry.position = position;
        }
    }

    /// Scaled value of the attribute mapped to a channel, if any. Entries
    /// missing the attribute map to 0.
    fn mapped_value(&self, mapping: &Option<String>, entry: &Entry) -> Option<f32> {
        let name = mapping.as_deref()?;
        let scale = self.scales.get(name)?;
        Some(entry.attribute(name).map_or(0.0, |value| scale.map(value)))
    }
}

impl EntryStore for Dataset {
    fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn selection(&self) -> &[EntryId] {
        &self.selection
    }

    fn replace_selection(&mut self, ids: Vec<EntryId>) {
        mark_selected(&mut self.entries, &ids);
        self.selection = ids;
    }
}
