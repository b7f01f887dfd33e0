// src/export/mod.rs

pub mod backend;
mod excel_date;
mod fs_utils;
pub mod logic;
pub mod payload;
pub mod store;
mod subprocess;
pub mod template;
pub mod worker;
mod writer;

pub use backend::{Artifact, RenderedSegment, SegmentRenderer};
pub use logic::{ArtifactRef, ExportLogic, FinalReport, WeekExport};
pub use payload::{ExportRow, PreparedSegment, SegmentPayload, build_prepared_segments};
pub use store::{ArtifactStore, FsArtifactStore};
pub use subprocess::SubprocessBackend;
pub use worker::{WorkerBackend, WorkerSegmentResult};
pub use writer::EmbeddedWriter;

pub(crate) use fs_utils::ensure_writable;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Helper for export completion messages.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Pdf,
    Both,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Both => "both",
        }
    }

    pub fn wants_pdf(&self) -> bool {
        matches!(self, ExportFormat::Pdf | ExportFormat::Both)
    }
}
