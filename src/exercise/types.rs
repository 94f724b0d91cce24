use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Device or file format the exercise was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseFileType {
    #[serde(rename = "S710RAW")]
    S710Raw,
    #[serde(rename = "S610RAW")]
    S610Raw,
    #[serde(rename = "S510RAW")]
    S510Raw,
    #[serde(rename = "HRM")]
    Hrm,
    #[serde(rename = "HAC4TUR")]
    Hac4Tur,
    #[serde(rename = "RS200SDRAW")]
    Rs200SdRaw,
    #[serde(rename = "F6RAW")]
    F6Raw,
    #[serde(rename = "SSCSV")]
    SsCsv,
    #[serde(rename = "GARMIN_TCX")]
    GarminTcx,
}

impl ExerciseFileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseFileType::S710Raw => "S710RAW",
            ExerciseFileType::S610Raw => "S610RAW",
            ExerciseFileType::S510Raw => "S510RAW",
            ExerciseFileType::Hrm => "HRM",
            ExerciseFileType::Hac4Tur => "HAC4TUR",
            ExerciseFileType::Rs200SdRaw => "RS200SDRAW",
            ExerciseFileType::F6Raw => "F6RAW",
            ExerciseFileType::SsCsv => "SSCSV",
            ExerciseFileType::GarminTcx => "GARMIN_TCX",
        }
    }
}

impl fmt::Display for ExerciseFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the device captured during the exercise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingMode {
    pub speed: bool,
    pub cadence: bool,
    pub altitude: bool,
    pub power: bool,
    pub temperature: bool,
    pub location: bool,
    pub interval_exercise: bool,
    /// Bike the speed sensor was assigned to, when the device tracks several.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bike_number: Option<u8>,
}

/// Speed block, present only when speed was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSpeed {
    /// km/h
    pub speed_avg: f32,
    /// km/h
    pub speed_max: f32,
    /// Total distance in metres. Authoritative for the sample distances.
    pub distance: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseCadence {
    pub cadence_avg: u16,
    pub cadence_max: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseAltitude {
    pub altitude_min: i16,
    pub altitude_avg: i16,
    pub altitude_max: i16,
    pub ascent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTemperature {
    pub temperature_min: i16,
    pub temperature_avg: i16,
    pub temperature_max: i16,
}

/// A heart rate training zone and the time spent relative to it (seconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateLimit {
    pub lower_heart_rate: u16,
    pub upper_heart_rate: u16,
    pub time_below: u32,
    pub time_within: u32,
    pub time_above: u32,
    /// `false` when the limits are percentages of the maximum heart rate.
    #[serde(default = "default_absolute_range")]
    pub absolute_range: bool,
}

fn default_absolute_range() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapSpeed {
    pub speed_end: f32,
    pub speed_avg: f32,
    /// Distance from exercise start to the end of the lap, in metres.
    pub distance: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapAltitude {
    pub altitude: i16,
    pub ascent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapTemperature {
    pub temperature: i16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lap {
    /// Elapsed time at the end of the lap, in tenths of a second.
    pub time_split: u32,
    pub heart_rate_split: u16,
    pub heart_rate_avg: u16,
    pub heart_rate_max: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<LapSpeed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<LapAltitude>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<LapTemperature>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// One data point recorded at the exercise's recording interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseSample {
    /// Milliseconds since the start of the exercise.
    pub timestamp: u64,
    pub heart_rate: u16,
    pub altitude: i16,
    pub speed: f32,
    pub cadence: u16,
    /// Cumulative distance in metres; only meaningful when speed was recorded.
    pub distance: u32,
    pub temperature: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A single recorded exercise as handed over by a format decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub file_type: ExerciseFileType,
    /// 0 - 99
    pub user_id: u8,
    pub date: NaiveDateTime,
    /// 0 - 5
    pub exercise_type: u8,
    #[serde(default)]
    pub type_label: String,
    #[serde(default)]
    pub recording_mode: RecordingMode,
    /// Tenths of a second.
    pub duration: u32,
    /// Seconds between two samples (5, 15 or 60 on most devices).
    pub recording_interval: u16,
    pub heart_rate_avg: u16,
    pub heart_rate_max: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<ExerciseSpeed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<ExerciseCadence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<ExerciseAltitude>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<ExerciseTemperature>,
    /// kcal
    #[serde(default)]
    pub energy: u32,
    /// Cumulative kcal over all exercises.
    #[serde(default)]
    pub energy_total: u32,
    /// Cumulative workout time in minutes.
    #[serde(default)]
    pub sum_exercise_time: u32,
    /// Cumulative ride time in minutes.
    #[serde(default)]
    pub sum_ride_time: u32,
    /// Cumulative ride distance in km.
    #[serde(default)]
    pub odometer: u32,
    #[serde(default)]
    pub heart_rate_limits: Vec<HeartRateLimit>,
    #[serde(default)]
    pub laps: Vec<Lap>,
    #[serde(default)]
    pub samples: Vec<ExerciseSample>,
}

impl Exercise {
    /// Total distance from the speed block, if speed was recorded.
    pub fn total_distance(&self) -> Option<u32> {
        self.speed.as_ref().map(|speed| speed.distance)
    }

    /// Number of samples a gap-free recording of `duration` would contain.
    ///
    /// Returns `None` when the recording interval is zero.
    pub fn expected_sample_count(&self) -> Option<usize> {
        let seconds = self.duration / 10;
        seconds
            .checked_div(u32::from(self.recording_interval))
            .map(|count| count as usize)
    }
}

/// Result of a sample distance repair pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepairOutcome {
    /// Distances were divided by `relation` (last sample distance / total distance).
    Repaired { relation: f64 },
    MissingSpeed,
    NoSamples,
    IncompleteSamples { expected: usize, actual: usize },
    ZeroRecordingInterval,
    ZeroLastDistance,
}

impl RepairOutcome {
    pub fn is_repaired(&self) -> bool {
        matches!(self, RepairOutcome::Repaired { .. })
    }
}

impl fmt::Display for RepairOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairOutcome::Repaired { relation } => {
                write!(f, "sample distances rescaled (relation {relation:.4})")
            }
            RepairOutcome::MissingSpeed => f.write_str("no speed data or zero total distance"),
            RepairOutcome::NoSamples => f.write_str("no samples recorded"),
            RepairOutcome::IncompleteSamples { expected, actual } => write!(
                f,
                "samples do not cover the exercise ({actual} of {expected} expected)"
            ),
            RepairOutcome::ZeroRecordingInterval => f.write_str("recording interval is zero"),
            RepairOutcome::ZeroLastDistance => f.write_str("last sample has no distance"),
        }
    }
}

/// Simplified representation of a field for display in the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayField {
    pub name: String,
    pub value: String,
}

/// Human-readable wrapper around one part of an exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecord {
    pub record_type: String,
    /// Position within its sequence (heart rate limits, laps, samples).
    pub index: Option<usize>,
    pub fields: Vec<DisplayField>,
}

/// Processed exercise returned to the web handler.
#[derive(Debug, Clone)]
pub struct ProcessedExercise {
    pub exercise: Exercise,
    /// `None` when repair was not requested.
    pub outcome: Option<RepairOutcome>,
    /// Fields formatted for rendering.
    pub records: Vec<DisplayRecord>,
    /// Diagnostic text dump of the exercise.
    pub dump: String,
    pub summary: ExerciseSummary,
}

/// User-facing toggles for processing an uploaded exercise.
#[derive(Debug, Clone)]
pub struct ProcessingOptions {
    /// Rescale sample distances to the exercise's total distance.
    pub repair_samples: bool,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            repair_samples: true,
        }
    }
}

/// Overview values taken from the stored exercise fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseSummary {
    pub duration_seconds: Option<f64>,
    pub exercise_type: Option<String>,
    pub distance_meters: Option<u32>,
    pub speed_avg: Option<f32>,
    pub speed_max: Option<f32>,
    pub heart_rate_avg: Option<u16>,
    pub heart_rate_max: Option<u16>,
    pub energy: Option<u32>,
    pub sample_count: usize,
    pub expected_sample_count: Option<usize>,
}

#[derive(Debug, Error)]
pub enum ExerciseProcessError {
    #[error("Failed to decode exercise: {0}")]
    ParseError(String),
}
