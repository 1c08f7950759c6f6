//! Plot data model
//!
//! A plot is a parcel of land drawn on the site plan. Only the boundary and
//! the status matter to the editor; every other descriptive field is carried
//! through untouched.

use crate::point::Polygon;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub type PlotId = Uuid;

/// Sales status of a plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStatus {
    #[default]
    Available,
    Reserved,
    Hold,
    Sold,
}

impl PlotStatus {
    pub fn display_name(self) -> &'static str {
        match self {
            PlotStatus::Available => "Available",
            PlotStatus::Reserved => "Reserved",
            PlotStatus::Hold => "On Hold",
            PlotStatus::Sold => "Sold",
        }
    }

    /// Fill colour as RGB
    pub fn color(self) -> [u8; 3] {
        match self {
            PlotStatus::Available => [34, 197, 94],
            PlotStatus::Reserved => [234, 179, 8],
            PlotStatus::Hold => [249, 115, 22],
            PlotStatus::Sold => [239, 68, 68],
        }
    }

    pub fn all() -> &'static [PlotStatus] {
        &[
            PlotStatus::Available,
            PlotStatus::Reserved,
            PlotStatus::Hold,
            PlotStatus::Sold,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plot {
    pub id: PlotId,
    /// Normalized boundary; may be empty for a plot not yet drawn
    #[serde(default)]
    pub boundary: Polygon,
    #[serde(default)]
    pub status: PlotStatus,
    #[serde(default)]
    pub display_label: String,
    /// Descriptive fields the editor does not interpret
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl Plot {
    pub fn new(display_label: impl Into<String>, boundary: Polygon) -> Self {
        Self {
            id: Uuid::new_v4(),
            boundary,
            status: PlotStatus::default(),
            display_label: display_label.into(),
            details: serde_json::Map::new(),
        }
    }

    pub fn has_boundary(&self) -> bool {
        !self.boundary.is_empty()
    }
}

/// Fields supplied when creating a plot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotDraft {
    pub boundary: Polygon,
    #[serde(default)]
    pub status: PlotStatus,
    #[serde(default)]
    pub display_label: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl PlotDraft {
    pub fn new(boundary: Polygon) -> Self {
        Self {
            boundary,
            ..Default::default()
        }
    }

    pub fn into_plot(self) -> Plot {
        Plot {
            id: Uuid::new_v4(),
            boundary: self.boundary,
            status: self.status,
            display_label: self.display_label,
            details: self.details,
        }
    }
}

/// Immutable snapshot of the plot list shared with the editor and viewer
///
/// List order is the rendering order; later plots draw on top and win hover
/// resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotSet(Arc<Vec<Plot>>);

impl PlotSet {
    pub fn new(plots: Vec<Plot>) -> Self {
        Self(Arc::new(plots))
    }

    pub fn get(&self, id: PlotId) -> Option<&Plot> {
        self.0.iter().find(|plot| plot.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plot> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Plot] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// New snapshot with `plot` replacing the entry of the same id, or
    /// appended if there is none
    pub fn with_replaced(&self, plot: Plot) -> Self {
        let mut plots = self.0.as_ref().clone();
        match plots.iter_mut().find(|existing| existing.id == plot.id) {
            Some(existing) => *existing = plot,
            None => plots.push(plot),
        }
        Self::new(plots)
    }

    /// New snapshot without the given plot
    pub fn without(&self, id: PlotId) -> Self {
        Self::new(self.0.iter().filter(|plot| plot.id != id).cloned().collect())
    }
}

impl From<Vec<Plot>> for PlotSet {
    fn from(plots: Vec<Plot>) -> Self {
        Self::new(plots)
    }
}

impl<'a> IntoIterator for &'a PlotSet {
    type Item = &'a Plot;
    type IntoIter = std::slice::Iter<'a, Plot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::NormalizedPoint;

    #[test]
    fn test_plot_json_keeps_unknown_fields() {
        let json = r#"{
            "id": "6f1c2a0e-8d5b-4a43-9a6e-0c3f1b2d4e5f",
            "boundary": [{"x": 0.1, "y": 0.1}, {"x": 0.4, "y": 0.1}, {"x": 0.4, "y": 0.3}],
            "status": "reserved",
            "displayLabel": "A-12",
            "areaSqm": 412.5,
            "facing": "east"
        }"#;
        let plot: Plot = serde_json::from_str(json).unwrap();
        assert_eq!(plot.status, PlotStatus::Reserved);
        assert_eq!(plot.display_label, "A-12");
        assert_eq!(plot.boundary[1], NormalizedPoint::new(0.4, 0.1));
        assert_eq!(plot.details["facing"], "east");

        let value = serde_json::to_value(&plot).unwrap();
        assert_eq!(value["areaSqm"], 412.5);
        assert_eq!(value["displayLabel"], "A-12");
    }

    #[test]
    fn test_missing_boundary_is_empty() {
        let plot: Plot =
            serde_json::from_str(r#"{"id": "6f1c2a0e-8d5b-4a43-9a6e-0c3f1b2d4e5f"}"#).unwrap();
        assert!(!plot.has_boundary());
        assert_eq!(plot.status, PlotStatus::Available);
    }

    #[test]
    fn test_with_replaced() {
        let first = Plot::new("1", Vec::new());
        let second = Plot::new("2", Vec::new());
        let plots = PlotSet::new(vec![first.clone(), second.clone()]);

        let mut renamed = first.clone();
        renamed.display_label = "1a".to_string();
        let updated = plots.with_replaced(renamed);
        assert_eq!(updated.get(first.id).unwrap().display_label, "1a");
        assert_eq!(plots.get(first.id).unwrap().display_label, "1");
        assert_eq!(updated.len(), 2);

        let appended = plots.with_replaced(Plot::new("3", Vec::new()));
        assert_eq!(appended.len(), 3);
        assert_eq!(appended.without(second.id).len(), 2);
    }
}
