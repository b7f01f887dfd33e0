// src/export/logic.rs

//! High-level export orchestration: validate the request, prepare the
//! segment payloads, render them through the configured backend and
//! normalize the results into FinalReports.

use crate::calendar;
use crate::config::{BackendKind, Config};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::backend::{Artifact, RenderedSegment, SegmentRenderer};
use crate::export::payload::{PreparedSegment, build_prepared_segments};
use crate::export::store::ArtifactStore;
use crate::export::subprocess::SubprocessBackend;
use crate::export::worker::WorkerBackend;
use crate::export::writer::EmbeddedWriter;
use crate::models::WeekData;
use crate::ui::messages::warning;
use crate::utils::date::iso_string;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Download reference of a rendered artifact.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ArtifactRef {
    /// Uploaded to the artifact store.
    Url { url: String },
    /// Served relative path below the export directory.
    Path { path: String },
    /// Embedded bytes, used when no store reference could be produced.
    Inline { filename: String, base64: String },
}

/// One rendered artifact of a week export.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    pub base_name: String,
    pub segment_key: String,
    pub month: u32,
    pub dates: Vec<String>,
    pub report_year: i32,
    pub report_kw: u32,
    pub is_carry_over_to_next_year: bool,
    pub spreadsheet: ArtifactRef,
    pub pdf: Option<ArtifactRef>,
    pub warnings: Vec<String>,
    pub rows_written: Option<u32>,
    pub rows_truncated: Option<u32>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekExport {
    pub week_dates: Vec<String>,
    pub is_month_split: bool,
    pub reports: Vec<FinalReport>,
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export one ISO week's reports through the configured backend.
    pub fn export_week_reports(
        cfg: &Config,
        store: &dyn ArtifactStore,
        year: i32,
        week: u32,
        format: &ExportFormat,
        week_data: &WeekData,
    ) -> AppResult<WeekExport> {
        if year < cfg.min_year || year > cfg.max_year {
            return Err(AppError::InvalidWeek { year, week });
        }
        if week < 1 || week > calendar::weeks_in_year(year) {
            return Err(AppError::InvalidWeek { year, week });
        }

        let week_dates = calendar::iso_week_dates(year, week);
        let segments = build_prepared_segments(
            year,
            week,
            &week_data.entries,
            &week_data.profile,
            &week_data.car_usage,
        );

        // Exactly one backend per call, chosen from configuration.
        let backend_kind = cfg.backend_kind();
        let renderer = Self::make_renderer(cfg, backend_kind)?;
        let rendered = renderer.render(format, &segments)?;

        let matched = Self::match_reports(&segments, rendered)?;

        let mut reports = Vec::with_capacity(segments.len());
        for (segment, result) in segments.iter().zip(matched) {
            reports.push(Self::normalize(
                cfg,
                store,
                backend_kind,
                format,
                segment,
                result,
            )?);
        }

        Ok(WeekExport {
            week_dates: week_dates.iter().copied().map(iso_string).collect(),
            is_month_split: segments.len() > 1,
            reports,
        })
    }

    fn make_renderer(cfg: &Config, kind: BackendKind) -> AppResult<Box<dyn SegmentRenderer>> {
        match kind {
            BackendKind::Worker => Ok(Box::new(WorkerBackend::from_config(cfg)?)),
            BackendKind::Subprocess => Ok(Box::new(SubprocessBackend::from_config(cfg)?)),
            BackendKind::Embedded => Ok(Box::new(EmbeddedWriter::new())),
        }
    }

    /// Match backend results back to their originating segments by base
    /// filename, in segment order. An unrecognized name is a hard error,
    /// as is a segment the backend did not answer for.
    pub fn match_reports(
        segments: &[PreparedSegment],
        rendered: Vec<RenderedSegment>,
    ) -> AppResult<Vec<RenderedSegment>> {
        let mut by_name: HashMap<String, RenderedSegment> = HashMap::new();
        for result in rendered {
            by_name.insert(result.base_name.clone(), result);
        }

        for name in by_name.keys() {
            if !segments.iter().any(|s| &s.base_name == name) {
                return Err(AppError::UnknownSegment(name.clone()));
            }
        }

        segments
            .iter()
            .map(|segment| {
                by_name.remove(&segment.base_name).ok_or_else(|| {
                    AppError::Export(format!(
                        "backend returned no result for segment '{}'",
                        segment.base_name
                    ))
                })
            })
            .collect()
    }

    fn normalize(
        cfg: &Config,
        store: &dyn ArtifactStore,
        kind: BackendKind,
        format: &ExportFormat,
        segment: &PreparedSegment,
        rendered: RenderedSegment,
    ) -> AppResult<FinalReport> {
        let mut warnings = rendered.warnings;

        let xlsx_name = format!("{}.xlsx", segment.base_name);
        let spreadsheet =
            Self::reference_artifact(cfg, store, &rendered.spreadsheet, &xlsx_name, &mut warnings);

        let pdf = rendered.pdf.as_ref().map(|artifact| {
            let pdf_name = format!("{}.pdf", segment.base_name);
            Self::reference_artifact(cfg, store, artifact, &pdf_name, &mut warnings)
        });

        // The in-process writer never produces PDF; a requested PDF is
        // reported as a warning on the affected report.
        if format.wants_pdf() && pdf.is_none() && kind == BackendKind::Embedded {
            warnings.push("PDF export is not available for the in-process writer.".to_string());
        }

        Ok(FinalReport {
            base_name: segment.base_name.clone(),
            segment_key: segment.segment_key.clone(),
            month: segment.month,
            dates: segment.dates.clone(),
            report_year: segment.report_year,
            report_kw: segment.report_kw,
            is_carry_over_to_next_year: segment.is_carry_over_to_next_year,
            spreadsheet,
            pdf,
            warnings,
            rows_written: rendered.rows_written,
            rows_truncated: rendered.rows_truncated,
        })
    }

    /// Turn a backend artifact into a download reference. Upload failure
    /// never fails the request: it is logged, recorded as a warning and
    /// the bytes fall back to an inline reference.
    fn reference_artifact(
        cfg: &Config,
        store: &dyn ArtifactStore,
        artifact: &Artifact,
        name: &str,
        warnings: &mut Vec<String>,
    ) -> ArtifactRef {
        match artifact {
            Artifact::File(path) => ArtifactRef::Path {
                path: served_path(cfg, path),
            },
            Artifact::Bytes(bytes) => match store.put(name, bytes) {
                Ok(url) => ArtifactRef::Url { url },
                Err(e) => {
                    warning(format!("Artifact upload failed for {name}: {e}"));
                    warnings.push(format!("Upload failed for {name}; embedding bytes instead."));
                    ArtifactRef::Inline {
                        filename: name.to_string(),
                        base64: BASE64.encode(bytes),
                    }
                }
            },
        }
    }
}

/// Path under which a file below the export directory is served.
fn served_path(cfg: &Config, path: &Path) -> String {
    let relative = path.strip_prefix(&cfg.export_dir).unwrap_or(path);
    format!("exports/{}", relative.display())
}
