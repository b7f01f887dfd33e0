// src/export/backend.rs

//! Backend abstraction: each deployment renders segments through exactly
//! one implementation of this trait, chosen from the configuration at
//! startup.

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::payload::PreparedSegment;
use std::path::PathBuf;

/// A rendered artifact, either in memory or already on disk.
#[derive(Clone, Debug)]
pub enum Artifact {
    Bytes(Vec<u8>),
    File(PathBuf),
}

/// Backend result for one segment, before normalization into a FinalReport.
#[derive(Clone, Debug)]
pub struct RenderedSegment {
    pub base_name: String,
    pub spreadsheet: Artifact,
    pub pdf: Option<Artifact>,
    pub warnings: Vec<String>,
    pub rows_written: Option<u32>,
    pub rows_truncated: Option<u32>,
}

/// Render all prepared segments of one week into spreadsheet (and
/// optionally PDF) artifacts. A call-level error aborts the request.
pub trait SegmentRenderer {
    fn render(
        &self,
        format: &ExportFormat,
        segments: &[PreparedSegment],
    ) -> AppResult<Vec<RenderedSegment>>;
}
