pub mod app_core;
pub mod audit;
pub mod domain;
pub mod kernel;
pub mod pipeline;
pub mod ports;
pub mod render;
pub mod session;
pub mod viewmodel;

pub use app_core::*;
pub use audit::{AuditClass, AuditEntry, AuditTrail};
pub use domain::{AppState, CloseReason, ControlsState, SessionId, SessionPhase, SessionState};
pub use kernel::AppKernel;
pub use pipeline::{gauge_fraction, NodeState, PipelineView};
pub use ports::*;
pub use render::{diff, RenderError, RenderSink, RenderTable, RenderUpdate};
pub use session::SessionManager;
pub use viewmodel::*;
