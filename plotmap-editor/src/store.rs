/// Plot file persistence
///
/// Plots live in a single JSON file holding an array of plot objects. Every
/// change rewrites the whole file atomically (temp file, then rename); the
/// app config is written the same way.

use plotmap_core::store::{PlotStore, StoreError};
use plotmap_core::{Plot, PlotDraft, PlotId, Polygon};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub struct JsonFilePlotStore {
    path: PathBuf,
    plots: Vec<Plot>,
}

impl JsonFilePlotStore {
    /// Open a plot file; a missing file is an empty plot list
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let plots = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            log::info!("{} does not exist yet, starting with no plots", path.display());
            Vec::new()
        };

        log::info!("Loaded {} plots from {}", plots.len(), path.display());
        Ok(Self { path, plots })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `plots` to disk, and adopt them only once that succeeded
    fn commit(&mut self, plots: Vec<Plot>) -> Result<(), StoreError> {
        write_json_atomic::<_, StoreError>(&self.path, &plots)?;
        self.plots = plots;
        Ok(())
    }
}

/// Pretty-print `value` to a sibling temp file, then rename it over `path`
pub fn write_json_atomic<T, E>(path: &Path, value: &T) -> Result<(), E>
where
    T: Serialize + ?Sized,
    E: From<std::io::Error> + From<serde_json::Error>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(value)?;
    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, json)?;
    std::fs::rename(&temp_path, path)?;
    Ok(())
}

impl PlotStore for JsonFilePlotStore {
    fn list(&self) -> Result<Vec<Plot>, StoreError> {
        Ok(self.plots.clone())
    }

    fn create(&mut self, draft: PlotDraft) -> Result<Plot, StoreError> {
        let mut plot = draft.into_plot();
        if plot.display_label.is_empty() {
            plot.display_label = format!("Plot {}", self.plots.len() + 1);
        }

        let mut plots = self.plots.clone();
        plots.push(plot.clone());
        self.commit(plots)?;
        Ok(plot)
    }

    fn save(&mut self, id: PlotId, boundary: Polygon) -> Result<Plot, StoreError> {
        let mut plots = self.plots.clone();
        let plot = plots
            .iter_mut()
            .find(|plot| plot.id == id)
            .ok_or(StoreError::NotFound(id))?;
        plot.boundary = boundary;
        let saved = plot.clone();

        self.commit(plots)?;
        Ok(saved)
    }

    fn delete(&mut self, id: PlotId) -> Result<(), StoreError> {
        if !self.plots.iter().any(|plot| plot.id == id) {
            return Err(StoreError::NotFound(id));
        }
        let plots = self.plots.iter().filter(|plot| plot.id != id).cloned().collect();
        self.commit(plots)
    }
}
