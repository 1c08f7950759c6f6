//! Plot persistence collaborator
//!
//! The editor never saves anything itself. Whoever owns the plots implements
//! [`PlotStore`] and receives committed boundaries through it.

use crate::editor::CommitRequest;
use crate::plot::{Plot, PlotDraft, PlotId, PlotSet};
use crate::point::Polygon;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("plot {0} not found")]
    NotFound(PlotId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid plot data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save rejected: {0}")]
    Rejected(String),
}

pub trait PlotStore {
    /// All plots, in rendering order
    fn list(&self) -> Result<Vec<Plot>, StoreError>;

    fn create(&mut self, draft: PlotDraft) -> Result<Plot, StoreError>;

    /// Replace the boundary of an existing plot
    fn save(&mut self, id: PlotId, boundary: Polygon) -> Result<Plot, StoreError>;

    fn delete(&mut self, id: PlotId) -> Result<(), StoreError>;

    /// Persist a committed boundary, creating a plot when the session was
    /// drawing a new one
    fn submit(&mut self, request: CommitRequest) -> Result<Plot, StoreError> {
        match request.plot_id {
            Some(id) => self.save(id, request.boundary),
            None => self.create(PlotDraft::new(request.boundary)),
        }
    }

    fn snapshot(&self) -> Result<PlotSet, StoreError> {
        self.list().map(PlotSet::new)
    }
}

/// Store keeping plots in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryPlotStore {
    plots: Vec<Plot>,
}

impl MemoryPlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plots(plots: Vec<Plot>) -> Self {
        Self { plots }
    }

    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    fn find_mut(&mut self, id: PlotId) -> Result<&mut Plot, StoreError> {
        self.plots
            .iter_mut()
            .find(|plot| plot.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}

impl PlotStore for MemoryPlotStore {
    fn list(&self) -> Result<Vec<Plot>, StoreError> {
        Ok(self.plots.clone())
    }

    fn create(&mut self, draft: PlotDraft) -> Result<Plot, StoreError> {
        let plot = draft.into_plot();
        self.plots.push(plot.clone());
        Ok(plot)
    }

    fn save(&mut self, id: PlotId, boundary: Polygon) -> Result<Plot, StoreError> {
        let plot = self.find_mut(id)?;
        plot.boundary = boundary;
        Ok(plot.clone())
    }

    fn delete(&mut self, id: PlotId) -> Result<(), StoreError> {
        let before = self.plots.len();
        self.plots.retain(|plot| plot.id != id);
        if self.plots.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
