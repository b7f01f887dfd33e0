// src/export/subprocess.rs

//! Local subprocess backend: one external exporter process per segment,
//! plus a best-effort PDF conversion through LibreOffice.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::backend::{Artifact, RenderedSegment, SegmentRenderer};
use crate::export::payload::{PreparedSegment, SegmentPayload};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub struct SubprocessBackend {
    exporter_cmd: String,
    template: PathBuf,
    export_dir: PathBuf,
    soffice_path: Option<String>,
    enable_pdf: bool,
}

/// JSON the exporter prints on stdout. Non-JSON stdout is tolerated and
/// treated as a single warning string.
#[derive(Debug, Default, Deserialize)]
struct ExporterOutput {
    #[serde(default)]
    rows_written: Option<u32>,
    #[serde(default)]
    rows_truncated: Option<u32>,
    #[serde(default)]
    warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PayloadWrapper<'a> {
    template_path: String,
    payload: &'a SegmentPayload,
}

impl SubprocessBackend {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let exporter_cmd = cfg
            .exporter_cmd
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                AppError::Config("allow_subprocess is set but exporter_cmd is missing".to_string())
            })?;

        Ok(Self {
            exporter_cmd: exporter_cmd.to_string(),
            template: PathBuf::from(&cfg.template),
            export_dir: PathBuf::from(&cfg.export_dir),
            soffice_path: cfg.soffice_path.clone(),
            enable_pdf: cfg.enable_pdf,
        })
    }

    /// Run the exporter for one segment; non-zero exit is a hard failure
    /// naming the segment.
    fn run_exporter(&self, segment: &PreparedSegment) -> AppResult<(PathBuf, ExporterOutput)> {
        fs::create_dir_all(&self.export_dir)?;

        let payload_path = self.export_dir.join(format!("{}.json", segment.base_name));
        let xlsx_path = self.export_dir.join(format!("{}.xlsx", segment.base_name));

        let wrapper = PayloadWrapper {
            template_path: self.template.to_string_lossy().to_string(),
            payload: &segment.payload,
        };
        fs::write(&payload_path, serde_json::to_vec(&wrapper)?)?;

        let output = Command::new(&self.exporter_cmd)
            .arg("--payload-file")
            .arg(&payload_path)
            .arg("--output")
            .arg(&xlsx_path)
            .output();

        fs::remove_file(&payload_path).ok();
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let msg = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(AppError::Subprocess(format!(
                "exporter failed for '{}' ({}): {msg}",
                segment.base_name, output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let parsed = match serde_json::from_str::<ExporterOutput>(stdout.trim()) {
            Ok(parsed) => parsed,
            Err(_) => {
                let mut fallback = ExporterOutput::default();
                if !stdout.trim().is_empty() {
                    fallback.warnings.push(stdout.trim().to_string());
                }
                fallback
            }
        };

        Ok((xlsx_path, parsed))
    }

    /// Probe the converter candidates in order. Unavailability is a
    /// warning, not an error.
    fn try_pdf_convert(&self, xlsx_path: &Path) -> (Option<PathBuf>, Option<String>) {
        if !self.enable_pdf {
            return (None, Some("PDF export disabled for the local exporter.".to_string()));
        }

        let mut candidates: Vec<String> = Vec::new();
        if let Some(configured) = self.soffice_path.as_deref() {
            if !configured.trim().is_empty() {
                candidates.push(configured.to_string());
            }
        }
        candidates.extend(
            [
                "soffice",
                "/usr/bin/soffice",
                "/usr/lib/libreoffice/program/soffice",
                r"C:\Program Files\LibreOffice\program\soffice.exe",
                r"C:\Program Files (x86)\LibreOffice\program\soffice.exe",
            ]
            .map(String::from),
        );

        let outdir = xlsx_path.parent().unwrap_or(Path::new("."));

        for candidate in &candidates {
            let result = Command::new(candidate)
                .args(["--headless", "--convert-to", "pdf", "--outdir"])
                .arg(outdir)
                .arg(xlsx_path)
                .output();

            if let Ok(output) = result {
                if output.status.success() {
                    let pdf_path = xlsx_path.with_extension("pdf");
                    if pdf_path.exists() {
                        return (Some(pdf_path), None);
                    }
                }
            }
        }

        (None, Some("PDF export requires LibreOffice (soffice).".to_string()))
    }
}

impl SegmentRenderer for SubprocessBackend {
    fn render(
        &self,
        format: &ExportFormat,
        segments: &[PreparedSegment],
    ) -> AppResult<Vec<RenderedSegment>> {
        let mut rendered = Vec::with_capacity(segments.len());

        for segment in segments {
            let (xlsx_path, result) = self.run_exporter(segment)?;
            let mut warnings = result.warnings;

            let mut pdf = None;
            if format.wants_pdf() {
                let (pdf_path, warning) = self.try_pdf_convert(&xlsx_path);
                match pdf_path {
                    Some(path) => pdf = Some(Artifact::File(path)),
                    None => {
                        if let Some(warning) = warning {
                            warnings.push(warning);
                        }
                    }
                }
            }

            rendered.push(RenderedSegment {
                base_name: segment.base_name.clone(),
                spreadsheet: Artifact::File(xlsx_path),
                pdf,
                warnings,
                rows_written: result.rows_written,
                rows_truncated: result.rows_truncated,
            });
        }

        Ok(rendered)
    }
}
