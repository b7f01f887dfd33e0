// src/models/line.rs

use crate::hours::{DecimalField, parse_decimal};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Wire sentinel meaning "derive the day value from begin/end times".
const AUTO_FROM_TIME: &str = "__AUTO_FROM_TIME__";

/// Default wage-type code; a line carrying only this code counts as empty.
pub const DEFAULT_LOHN_TYPE: &str = "S";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    #[default]
    Arbeitszeit,
    Baustelle,
}

/// Day-hours override of a line. The wire format is the raw form field
/// (empty, the auto sentinel, decimal text, or an opaque marker like "x");
/// internally it is kept as a tagged value so no call site compares magic
/// strings.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HoursOverride {
    /// Numeric override, used verbatim.
    Explicit(f64),
    /// Non-numeric marker, written through to the day cell (e.g. "x").
    Marker(String),
    /// Derive the day value from begin/end times.
    DeriveFromTime,
    #[default]
    Absent,
}

impl HoursOverride {
    pub fn parse(raw: &str) -> Self {
        let txt = raw.trim();
        if txt.is_empty() {
            return HoursOverride::Absent;
        }
        if txt == AUTO_FROM_TIME {
            return HoursOverride::DeriveFromTime;
        }
        match parse_decimal(txt) {
            DecimalField::Number(n) => HoursOverride::Explicit(n),
            _ => HoursOverride::Marker(txt.to_string()),
        }
    }

    /// The wire form of the override.
    pub fn as_wire(&self) -> String {
        match self {
            HoursOverride::Explicit(n) => format!("{n}"),
            HoursOverride::Marker(m) => m.clone(),
            HoursOverride::DeriveFromTime => AUTO_FROM_TIME.to_string(),
            HoursOverride::Absent => String::new(),
        }
    }
}

impl Serialize for HoursOverride {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_wire())
    }
}

impl<'de> Deserialize<'de> for HoursOverride {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(HoursOverride::parse(&raw))
    }
}

/// One row of a day's report.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyLine {
    pub id: String,
    pub line_type: LineType,
    pub site_name_ort: String,
    pub beginn: String,
    pub ende: String,
    pub pause_override: String,
    pub day_hours_override: HoursOverride,
    pub lohn_type: String,
    pub ausloese: String,
    pub zulage: String,
    pub projektnummer: String,
    pub kabelschacht_info: String,
    pub sm_nr: String,
    pub bauleiter: String,
    pub arbeitskollege: String,
}

impl Default for DailyLine {
    fn default() -> Self {
        Self {
            id: String::new(),
            line_type: LineType::default(),
            site_name_ort: String::new(),
            beginn: String::new(),
            ende: String::new(),
            pause_override: String::new(),
            day_hours_override: HoursOverride::Absent,
            lohn_type: DEFAULT_LOHN_TYPE.to_string(),
            ausloese: String::new(),
            zulage: String::new(),
            projektnummer: String::new(),
            kabelschacht_info: String::new(),
            sm_nr: String::new(),
            bauleiter: String::new(),
            arbeitskollege: String::new(),
        }
    }
}

impl DailyLine {
    pub fn new(id: impl Into<String>, line_type: LineType) -> Self {
        DailyLine {
            id: id.into(),
            line_type,
            ..Default::default()
        }
        .normalize()
    }

    /// Enforce the line invariant: a Baustelle line never carries
    /// time-of-day values.
    pub fn normalize(mut self) -> Self {
        if self.line_type == LineType::Baustelle {
            self.beginn.clear();
            self.ende.clear();
            self.pause_override.clear();
        }
        self
    }
}
