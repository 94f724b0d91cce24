use crate::exercise::types::{Exercise, ExerciseSummary};

/// Collect overview values for rendering.
///
/// Only values the device already stored are used; zero heart rates and
/// energy count as "not recorded".
pub fn summarize_exercise(exercise: &Exercise) -> ExerciseSummary {
    let type_label = exercise.type_label.trim();

    ExerciseSummary {
        duration_seconds: Some(f64::from(exercise.duration) / 10.0),
        exercise_type: if type_label.is_empty() {
            None
        } else {
            Some(type_label.to_string())
        },
        distance_meters: exercise.total_distance().filter(|distance| *distance > 0),
        speed_avg: exercise.speed.as_ref().map(|speed| speed.speed_avg),
        speed_max: exercise.speed.as_ref().map(|speed| speed.speed_max),
        heart_rate_avg: non_zero(exercise.heart_rate_avg),
        heart_rate_max: non_zero(exercise.heart_rate_max),
        energy: Some(exercise.energy).filter(|energy| *energy > 0),
        sample_count: exercise.samples.len(),
        expected_sample_count: exercise.expected_sample_count(),
    }
}

fn non_zero(value: u16) -> Option<u16> {
    (value > 0).then_some(value)
}
