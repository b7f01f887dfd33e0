#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use wochenbericht::config::Config;
use wochenbericht::models::{CarUsage, DailyEntry, DailyLine, WeekData, WeekProfile};

pub fn wb() -> Command {
    cargo_bin_cmd!("wochenbericht")
}

/// Create a unique, empty test directory inside the system temp dir.
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{name}_wochenbericht"));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test dir");
    path
}

pub fn line(site: &str, beginn: &str, ende: &str) -> DailyLine {
    DailyLine {
        site_name_ort: site.to_string(),
        beginn: beginn.to_string(),
        ende: ende.to_string(),
        ..Default::default()
    }
}

pub fn entry(date: &str, lines: Vec<DailyLine>) -> DailyEntry {
    DailyEntry {
        date: date.to_string(),
        lines,
        ..Default::default()
    }
}

pub fn profile() -> WeekProfile {
    WeekProfile {
        name: "Muster".to_string(),
        vorname: "Max".to_string(),
        arbeitsstaette_projekte: "Berlin Netz".to_string(),
        art_der_arbeit: "Tiefbau".to_string(),
    }
}

/// Week data for KW 09/2026 (Mon 2026-02-23 .. Sun 2026-03-01): one line on
/// the Monday, one on the Sunday across the month boundary.
pub fn sample_week_data() -> WeekData {
    let mut data = WeekData {
        profile: profile(),
        ..Default::default()
    };
    data.entries.insert(
        "2026-02-23".to_string(),
        entry("2026-02-23", vec![line("Baustelle Nord", "08:00", "16:30")]),
    );
    data.entries.insert(
        "2026-03-01".to_string(),
        entry("2026-03-01", vec![line("Baustelle Süd", "07:00", "15:00")]),
    );
    data.car_usage = CarUsage {
        kennzeichen: "B-AB 123".to_string(),
        kennzeichen2: String::new(),
        km_stand: "45210".to_string(),
        gefahrene_km: "320".to_string(),
    };
    data
}

/// Embedded-backend configuration rooted in a fresh temp dir.
pub fn embedded_config(name: &str) -> (Config, PathBuf) {
    let dir = temp_dir(name);
    let mut cfg = Config::default();
    cfg.template = dir.join("template.xlsx").to_string_lossy().to_string();
    cfg.export_dir = dir.join("exports").to_string_lossy().to_string();
    cfg.worker_url = None;
    cfg.allow_subprocess = false;
    (cfg, dir)
}

pub fn write_config_file(dir: &Path, cfg: &Config) -> String {
    let path = dir.join("wochenbericht.conf");
    fs::write(&path, serde_yaml::to_string(cfg).expect("serialize config")).expect("write config");
    path.to_string_lossy().to_string()
}

pub fn write_week_file(dir: &Path, data: &WeekData) -> String {
    let path = dir.join("week.json");
    fs::write(&path, serde_json::to_string_pretty(data).expect("serialize week"))
        .expect("write week file");
    path.to_string_lossy().to_string()
}
