use crate::exercise::types::{
    DisplayField, DisplayRecord, Exercise, ExerciseSample, HeartRateLimit, Lap,
};
use std::fmt::Write;

/// Build UI-friendly records for every part of the exercise.
///
/// Heart rate limits, laps and samples produce one record each, tagged with
/// their position in the sequence.
pub fn to_display_records(exercise: &Exercise) -> Vec<DisplayRecord> {
    let mut records = vec![header_record(exercise), recording_mode_record(exercise)];

    if let Some(speed) = &exercise.speed {
        records.push(record(
            "ExerciseSpeed",
            None,
            vec![
                field("speedAVG", speed.speed_avg),
                field("speedMax", speed.speed_max),
                field("distance", speed.distance),
            ],
        ));
    }
    if let Some(cadence) = &exercise.cadence {
        records.push(record(
            "ExerciseCadence",
            None,
            vec![
                field("cadenceAVG", cadence.cadence_avg),
                field("cadenceMax", cadence.cadence_max),
            ],
        ));
    }
    if let Some(altitude) = &exercise.altitude {
        records.push(record(
            "ExerciseAltitude",
            None,
            vec![
                field("altitudeMin", altitude.altitude_min),
                field("altitudeAVG", altitude.altitude_avg),
                field("altitudeMax", altitude.altitude_max),
                field("ascent", altitude.ascent),
            ],
        ));
    }
    if let Some(temperature) = &exercise.temperature {
        records.push(record(
            "ExerciseTemperature",
            None,
            vec![
                field("temperatureMin", temperature.temperature_min),
                field("temperatureAVG", temperature.temperature_avg),
                field("temperatureMax", temperature.temperature_max),
            ],
        ));
    }

    records.extend(
        exercise
            .heart_rate_limits
            .iter()
            .enumerate()
            .map(|(idx, limit)| heart_rate_limit_record(idx, limit)),
    );
    records.extend(
        exercise
            .laps
            .iter()
            .enumerate()
            .map(|(idx, lap)| lap_record(idx, lap)),
    );
    records.extend(
        exercise
            .samples
            .iter()
            .enumerate()
            .map(|(idx, sample)| sample_record(idx, sample)),
    );

    records
}

/// Render the exercise as a human-readable text dump for debugging.
pub fn dump_exercise(exercise: &Exercise) -> String {
    let mut out = String::new();
    for display in to_display_records(exercise) {
        if let Some(idx) = display.index {
            let _ = write!(out, "arrayIndex {idx}: ");
        }
        let _ = writeln!(out, "{}:", display.record_type);

        let last = display.fields.len().saturating_sub(1);
        for (pos, entry) in display.fields.iter().enumerate() {
            let open = if pos == 0 { " [" } else { "  " };
            let close = if pos == last { "]" } else { "" };
            let _ = writeln!(out, "{open}{}={}{close}", entry.name, entry.value);
        }
    }
    out
}

fn header_record(exercise: &Exercise) -> DisplayRecord {
    record(
        "Exercise",
        None,
        vec![
            field("fileType", exercise.file_type),
            field("userID", exercise.user_id),
            field("date", exercise.date),
            field("type", exercise.exercise_type),
            field("typeLabel", &exercise.type_label),
            field("duration", exercise.duration),
            field("recordingInterval", exercise.recording_interval),
            field("heartRateAVG", exercise.heart_rate_avg),
            field("heartRateMax", exercise.heart_rate_max),
            field("energy", exercise.energy),
            field("energyTotal", exercise.energy_total),
            field("sumExerciseTime", exercise.sum_exercise_time),
            field("sumRideTime", exercise.sum_ride_time),
            field("odometer", exercise.odometer),
        ],
    )
}

fn recording_mode_record(exercise: &Exercise) -> DisplayRecord {
    let mode = &exercise.recording_mode;
    let mut fields = vec![
        field("speed", mode.speed),
        field("cadence", mode.cadence),
        field("altitude", mode.altitude),
        field("power", mode.power),
        field("temperature", mode.temperature),
        field("location", mode.location),
        field("intervalExercise", mode.interval_exercise),
    ];
    if let Some(bike) = mode.bike_number {
        fields.push(field("bikeNumber", bike));
    }
    record("RecordingMode", None, fields)
}

fn heart_rate_limit_record(idx: usize, limit: &HeartRateLimit) -> DisplayRecord {
    record(
        "HeartRateLimit",
        Some(idx),
        vec![
            field("lowerHeartRate", limit.lower_heart_rate),
            field("upperHeartRate", limit.upper_heart_rate),
            field("timeBelow", limit.time_below),
            field("timeWithin", limit.time_within),
            field("timeAbove", limit.time_above),
            field("absoluteRange", limit.absolute_range),
        ],
    )
}

fn lap_record(idx: usize, lap: &Lap) -> DisplayRecord {
    let mut fields = vec![
        field("timeSplit", lap.time_split),
        field("heartRateSplit", lap.heart_rate_split),
        field("heartRateAVG", lap.heart_rate_avg),
        field("heartRateMax", lap.heart_rate_max),
    ];
    if let Some(speed) = &lap.speed {
        fields.push(field("speedEnd", speed.speed_end));
        fields.push(field("speedAVG", speed.speed_avg));
        fields.push(field("distance", speed.distance));
    }
    if let Some(altitude) = &lap.altitude {
        fields.push(field("altitude", altitude.altitude));
        fields.push(field("ascent", altitude.ascent));
    }
    if let Some(temperature) = &lap.temperature {
        fields.push(field("temperature", temperature.temperature));
    }
    record("Lap", Some(idx), fields)
}

fn sample_record(idx: usize, sample: &ExerciseSample) -> DisplayRecord {
    let mut fields = vec![
        field("timestamp", sample.timestamp),
        field("heartRate", sample.heart_rate),
        field("altitude", sample.altitude),
        field("speed", sample.speed),
        field("cadence", sample.cadence),
        field("distance", sample.distance),
        field("temperature", sample.temperature),
    ];
    if let Some(position) = &sample.position {
        fields.push(field(
            "position",
            format!("{:.6},{:.6}", position.latitude, position.longitude),
        ));
    }
    record("ExerciseSample", Some(idx), fields)
}

fn record(record_type: &str, index: Option<usize>, fields: Vec<DisplayField>) -> DisplayRecord {
    DisplayRecord {
        record_type: record_type.to_string(),
        index,
        fields,
    }
}

fn field(name: &str, value: impl ToString) -> DisplayField {
    DisplayField {
        name: name.to_string(),
        value: value.to_string(),
    }
}
