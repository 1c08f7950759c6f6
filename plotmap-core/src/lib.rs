// Plotmap Core Library
// Boundary editing and plot lookup for site plans

pub mod point;
pub mod transform;
pub mod geometry;
pub mod history;
pub mod tool;
pub mod session;
pub mod input;
pub mod error;
pub mod settings;
pub mod viewport;
pub mod tool_machine;
pub mod plot;
pub mod hover;
pub mod store;
pub mod viewer;
pub mod editor;

pub use editor::{BoundaryEditor, CommitRequest, EditorResponse};
pub use error::{CommitError, EditorError};
pub use input::{EditorEvent, PointerEvent, Shortcut};
pub use plot::{Plot, PlotDraft, PlotId, PlotSet, PlotStatus};
pub use point::{NormalizedPoint, Polygon};
pub use settings::EditorSettings;
pub use store::{MemoryPlotStore, PlotStore, StoreError};
pub use tool::Tool;
pub use transform::{Projection, ViewTransform};
pub use viewer::{PlotViewer, ViewerResponse};
