use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{
    ArtifactRef, ExportLogic, FinalReport, FsArtifactStore, ensure_writable,
    notify_export_success,
};
use crate::models::WeekData;
use crate::ui::messages::{info, warning};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::fs;
use std::path::{Path, PathBuf};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        year,
        week,
        format,
        week_file,
        out,
        force,
    } = cmd
    {
        let week_data = load_week_file(week_file)?;

        info(format!(
            "Exporting KW {:02}/{} ({} backend)",
            week,
            year,
            backend_label(cfg)
        ));

        let store = FsArtifactStore::new(&cfg.export_dir);
        let result =
            ExportLogic::export_week_reports(cfg, &store, *year, *week, format, &week_data)?;

        if result.is_month_split {
            info("Week crosses a month boundary: one report per month segment.");
        }

        let out_dir = out.clone().unwrap_or_else(|| cfg.export_dir.clone());
        for report in &result.reports {
            announce_report(report, &out_dir, *force)?;
        }
    }
    Ok(())
}

fn backend_label(cfg: &Config) -> &'static str {
    match cfg.backend_kind() {
        crate::config::BackendKind::Worker => "remote worker",
        crate::config::BackendKind::Subprocess => "local exporter",
        crate::config::BackendKind::Embedded => "in-process writer",
    }
}

fn load_week_file(path: &str) -> AppResult<WeekData> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Report one rendered artifact; inline bytes are materialized into the
/// output directory.
fn announce_report(report: &FinalReport, out_dir: &str, force: bool) -> AppResult<()> {
    describe_ref("XLSX", &report.spreadsheet, out_dir, force)?;
    if let Some(pdf) = &report.pdf {
        describe_ref("PDF", pdf, out_dir, force)?;
    }

    if let Some(truncated) = report.rows_truncated {
        if truncated > 0 {
            warning(format!(
                "{}: {} line(s) did not fit the template.",
                report.base_name, truncated
            ));
        }
    }
    for w in &report.warnings {
        warning(format!("{}: {}", report.base_name, w));
    }

    Ok(())
}

fn describe_ref(label: &str, artifact: &ArtifactRef, out_dir: &str, force: bool) -> AppResult<()> {
    match artifact {
        ArtifactRef::Url { url } => {
            info(format!("{label} available at {url}"));
        }
        ArtifactRef::Path { path } => {
            info(format!("{label} written to {path}"));
        }
        ArtifactRef::Inline { filename, base64 } => {
            let path = materialize_inline(filename, base64, out_dir, force)?;
            notify_export_success(label, &path);
        }
    }
    Ok(())
}

fn materialize_inline(
    filename: &str,
    base64: &str,
    out_dir: &str,
    force: bool,
) -> AppResult<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let path = Path::new(out_dir).join(filename);
    ensure_writable(&path, force)?;

    let bytes = BASE64
        .decode(base64.as_bytes())
        .map_err(|e| crate::errors::AppError::Export(format!("bad inline artifact: {e}")))?;
    fs::write(&path, bytes)?;

    Ok(path)
}
