// src/export/worker.rs

//! Remote worker backend: one HTTP round-trip renders all segments of the
//! request. Failure aborts every segment (no partial results).

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::backend::{Artifact, RenderedSegment, SegmentRenderer};
use crate::export::payload::{PreparedSegment, SegmentPayload};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub struct WorkerBackend {
    url: String,
    token: Option<String>,
    template: PathBuf,
    timeout: Duration,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkerRequest<'a> {
    format: &'a str,
    template_filename: String,
    template_base64: String,
    segments: Vec<WorkerSegment<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkerSegment<'a> {
    base_name: &'a str,
    segment_key: &'a str,
    month: u32,
    dates: &'a [String],
    report_year: i32,
    report_kw: u32,
    is_carry_over_to_next_year: bool,
    payload: &'a SegmentPayload,
}

#[derive(Deserialize)]
struct WorkerResponse {
    reports: Option<Vec<WorkerSegmentResult>>,
}

#[derive(Deserialize)]
struct WorkerErrorBody {
    error: Option<String>,
}

/// Wire-level worker result for one segment, before normalization.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSegmentResult {
    pub base_name: String,
    pub xlsx_base64: String,
    #[serde(default)]
    pub pdf_base64: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub rows_written: Option<u32>,
    #[serde(default)]
    pub rows_truncated: Option<u32>,
}

impl WorkerBackend {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let url = cfg
            .worker_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| AppError::Config("worker_url is not configured".to_string()))?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            token: cfg.worker_token.clone(),
            template: PathBuf::from(&cfg.template),
            timeout: Duration::from_secs(cfg.worker_timeout_secs),
        })
    }
}

impl SegmentRenderer for WorkerBackend {
    fn render(
        &self,
        format: &ExportFormat,
        segments: &[PreparedSegment],
    ) -> AppResult<Vec<RenderedSegment>> {
        let template_bytes = fs::read(&self.template)?;
        let template_filename = self
            .template
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "template.xlsx".to_string());

        let request = WorkerRequest {
            format: format.as_str(),
            template_filename,
            template_base64: BASE64.encode(&template_bytes),
            segments: segments
                .iter()
                .map(|s| WorkerSegment {
                    base_name: &s.base_name,
                    segment_key: &s.segment_key,
                    month: s.month,
                    dates: &s.dates,
                    report_year: s.report_year,
                    report_kw: s.report_kw,
                    is_carry_over_to_next_year: s.is_carry_over_to_next_year,
                    payload: &s.payload,
                })
                .collect(),
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let mut req = client
            .post(format!("{}/export-week", self.url))
            .json(&request);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send()?;
        let status = resp.status();
        let body = resp.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<WorkerErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| body.trim().to_string());
            return Err(AppError::Worker(format!(
                "worker returned {status}: {message}"
            )));
        }

        parse_worker_response(&body)?
            .into_iter()
            .map(decode_report)
            .collect()
    }
}

/// Parse the worker response body. A body missing the `reports` array is an
/// invalid response, not an empty report list.
pub fn parse_worker_response(body: &str) -> AppResult<Vec<WorkerSegmentResult>> {
    let parsed: WorkerResponse = serde_json::from_str(body)
        .map_err(|e| AppError::InvalidWorkerResponse(e.to_string()))?;

    parsed
        .reports
        .ok_or_else(|| AppError::InvalidWorkerResponse("missing 'reports' field".to_string()))
}

/// Decode one wire result into a RenderedSegment (base64 -> bytes).
pub fn decode_report(report: WorkerSegmentResult) -> AppResult<RenderedSegment> {
    let xlsx = BASE64.decode(report.xlsx_base64.as_bytes()).map_err(|e| {
        AppError::InvalidWorkerResponse(format!(
            "bad xlsx payload for '{}': {e}",
            report.base_name
        ))
    })?;

    let pdf = match report.pdf_base64.as_deref() {
        Some(b64) if !b64.is_empty() => Some(Artifact::Bytes(BASE64.decode(b64.as_bytes()).map_err(
            |e| {
                AppError::InvalidWorkerResponse(format!(
                    "bad pdf payload for '{}': {e}",
                    report.base_name
                ))
            },
        )?)),
        _ => None,
    };

    Ok(RenderedSegment {
        base_name: report.base_name,
        spreadsheet: Artifact::Bytes(xlsx),
        pdf,
        warnings: report.warnings,
        rows_written: report.rows_written,
        rows_truncated: report.rows_truncated,
    })
}
