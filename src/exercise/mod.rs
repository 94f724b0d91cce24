pub mod display;
pub mod repair;
pub mod summary;
pub mod types;

use display::{dump_exercise, to_display_records};
use summary::summarize_exercise;

pub use repair::repaired_samples;
pub use types::{
    DisplayField, DisplayRecord, Exercise, ExerciseAltitude, ExerciseCadence, ExerciseFileType,
    ExerciseProcessError, ExerciseSample, ExerciseSpeed, ExerciseSummary, ExerciseTemperature,
    HeartRateLimit, Lap, LapAltitude, LapSpeed, LapTemperature, Position, ProcessedExercise,
    ProcessingOptions, RecordingMode, RepairOutcome,
};

/// Decode an exercise document, repair it once, and feed downstream display.
///
/// The function performs four stages:
/// 1. [`serde_json`] decodes the document produced by a format decoder.
/// 2. [`Exercise::repair_samples`] rescales the sample distances when
///    [`ProcessingOptions::repair_samples`] is set.
/// 3. [`summary::summarize_exercise`] picks the overview values.
/// 4. [`display::to_display_records`] and [`display::dump_exercise`] format
///    the same exercise for UI rendering.
pub fn process_exercise_bytes(
    bytes: &[u8],
    options: &ProcessingOptions,
) -> Result<ProcessedExercise, ExerciseProcessError> {
    let mut exercise: Exercise = serde_json::from_slice(bytes)
        .map_err(|err| ExerciseProcessError::ParseError(err.to_string()))?;

    let outcome = options
        .repair_samples
        .then(|| exercise.repair_samples());

    Ok(ProcessedExercise {
        records: to_display_records(&exercise),
        dump: dump_exercise(&exercise),
        summary: summarize_exercise(&exercise),
        outcome,
        exercise,
    })
}
