// src/models/entry.rs

use crate::models::line::DailyLine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One calendar day of the week report. A day with no entry is represented
/// as an absent map key, never as an empty entry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyEntry {
    /// ISO date, "YYYY-MM-DD".
    pub date: String,
    pub arbeitsstaette_projekte: String,
    pub art_der_arbeit: String,
    pub lines: Vec<DailyLine>,
    pub updated_at: String,
}

/// Header fields of the report owner, also the fallback for the
/// site/work-type header cells.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeekProfile {
    pub name: String,
    pub vorname: String,
    pub arbeitsstaette_projekte: String,
    pub art_der_arbeit: String,
}

/// Week-scoped vehicle usage, rendered into the report footer.
/// All fields are free text; numeric parsing happens at render time.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarUsage {
    pub kennzeichen: String,
    pub kennzeichen2: String,
    pub km_stand: String,
    pub gefahrene_km: String,
}

/// Everything the persistence boundary hands over for one week:
/// profile defaults, daily entries keyed by ISO date, and vehicle usage.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeekData {
    pub profile: WeekProfile,
    pub entries: BTreeMap<String, DailyEntry>,
    pub car_usage: CarUsage,
}
