use rustyexercise::exercise::{
    Exercise, ExerciseProcessError, ProcessingOptions, RepairOutcome, process_exercise_bytes,
    repaired_samples,
};
use rustyexercise::templates::render_processed_exercise;

fn fixture_bytes() -> Vec<u8> {
    std::fs::read("tests/fixtures/exercise.json").expect("fixture should be present")
}

fn fixture_exercise() -> Exercise {
    serde_json::from_slice(&fixture_bytes()).expect("fixture should decode")
}

fn sample_distances(exercise: &Exercise) -> Vec<u32> {
    exercise.samples.iter().map(|sample| sample.distance).collect()
}

#[test]
fn fixture_distances_are_rescaled_to_total() {
    let processed = process_exercise_bytes(&fixture_bytes(), &ProcessingOptions::default())
        .expect("processing should succeed");

    assert_eq!(
        sample_distances(&processed.exercise),
        vec![83, 167, 250, 333, 417, 500, 583, 667, 750, 833, 917, 1000]
    );
    match processed.outcome {
        Some(RepairOutcome::Repaired { relation }) => assert!((relation - 0.96).abs() < 1e-12),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn repair_touches_nothing_but_sample_distances() {
    let original = fixture_exercise();
    let processed = process_exercise_bytes(&fixture_bytes(), &ProcessingOptions::default())
        .expect("processing should succeed");

    let mut repaired = processed.exercise.clone();
    for (sample, before) in repaired.samples.iter_mut().zip(&original.samples) {
        sample.distance = before.distance;
    }

    assert_eq!(repaired, original);
    assert_eq!(processed.exercise.laps, original.laps);
    assert_eq!(processed.exercise.heart_rate_limits, original.heart_rate_limits);
}

#[test]
fn pure_rescale_matches_in_place_repair() {
    let exercise = fixture_exercise();
    let (repaired, _) = exercise.repaired();

    let total = exercise.total_distance().expect("fixture records speed");
    assert_eq!(repaired_samples(&exercise.samples, total), repaired.samples);
}

#[test]
fn gap_in_recording_leaves_samples_untouched() {
    let mut exercise = fixture_exercise();
    exercise.samples.truncate(6);
    let bytes = serde_json::to_vec(&exercise).expect("exercise should encode");

    let processed = process_exercise_bytes(&bytes, &ProcessingOptions::default())
        .expect("processing should succeed");

    assert_eq!(
        processed.outcome,
        Some(RepairOutcome::IncompleteSamples {
            expected: 12,
            actual: 6
        })
    );
    assert_eq!(processed.exercise, exercise);
}

#[test]
fn exercise_without_speed_keeps_samples() {
    let mut exercise = fixture_exercise();
    exercise.speed = None;
    exercise.recording_mode.speed = false;
    let bytes = serde_json::to_vec(&exercise).expect("exercise should encode");

    let processed = process_exercise_bytes(&bytes, &ProcessingOptions::default())
        .expect("processing should succeed");

    assert_eq!(processed.outcome, Some(RepairOutcome::MissingSpeed));
    assert_eq!(processed.exercise.samples, exercise.samples);
    assert_eq!(processed.summary.distance_meters, None);
}

#[test]
fn optional_blocks_and_sequences_may_be_omitted() {
    let document = br#"{
        "file_type": "GARMIN_TCX",
        "user_id": 0,
        "date": "2009-05-01T07:00:00",
        "exercise_type": 0,
        "duration": 0,
        "recording_interval": 1,
        "heart_rate_avg": 0,
        "heart_rate_max": 0
    }"#;

    let processed = process_exercise_bytes(document, &ProcessingOptions::default())
        .expect("minimal exercise should decode");

    assert_eq!(processed.outcome, Some(RepairOutcome::MissingSpeed));
    assert!(processed.exercise.samples.is_empty());
    assert!(processed.exercise.laps.is_empty());
    assert!(processed.dump.starts_with("Exercise:\n [fileType=GARMIN_TCX\n"));
}

#[test]
fn dump_lists_every_indexed_element() {
    let processed = process_exercise_bytes(&fixture_bytes(), &ProcessingOptions::default())
        .expect("processing should succeed");

    for idx in 0..2 {
        assert!(processed.dump.contains(&format!("arrayIndex {idx}: HeartRateLimit:")));
        assert!(processed.dump.contains(&format!("arrayIndex {idx}: Lap:")));
    }
    for idx in 0..12 {
        assert!(processed.dump.contains(&format!("arrayIndex {idx}: ExerciseSample:")));
    }
    assert!(processed.dump.contains("position=52.520008,13.404954"));
}

#[test]
fn summary_reports_stored_values() {
    let processed = process_exercise_bytes(&fixture_bytes(), &ProcessingOptions::default())
        .expect("processing should succeed");
    let summary = &processed.summary;

    assert_eq!(summary.duration_seconds, Some(60.0));
    assert_eq!(summary.exercise_type.as_deref(), Some("Bike"));
    assert_eq!(summary.distance_meters, Some(1000));
    assert_eq!(summary.heart_rate_avg, Some(137));
    assert_eq!(summary.heart_rate_max, Some(153));
    assert_eq!(summary.sample_count, 12);
    assert_eq!(summary.expected_sample_count, Some(12));
}

#[test]
fn rendered_report_shows_units_and_repair_outcome() {
    let processed = process_exercise_bytes(&fixture_bytes(), &ProcessingOptions::default())
        .expect("processing should succeed");

    let rendered = render_processed_exercise(&processed, "report-1");

    assert!(rendered.contains("1.00 km"));
    assert!(rendered.contains("137 bpm"));
    assert!(rendered.contains("60.0 km/h"));
    assert!(rendered.contains("12 / 12"));
    assert!(rendered.contains("sample distances rescaled"));
}

#[test]
fn rendering_handles_missing_exercise_fields() {
    let mut processed = process_exercise_bytes(
        &fixture_bytes(),
        &ProcessingOptions {
            repair_samples: false,
        },
    )
    .expect("processing should succeed");
    processed.summary = Default::default();

    let rendered = render_processed_exercise(&processed, "report-2");

    assert!(rendered.contains("Exercise Overview"));
    assert!(rendered.contains("Unknown"));
    assert!(rendered.contains("—"));
    assert!(rendered.contains("not requested"));
}

#[test]
fn malformed_document_surfaces_an_error() {
    let error = process_exercise_bytes(b"{\"file_type\": \"S710RAW\"", &ProcessingOptions::default())
        .expect_err("processing should fail for truncated JSON");

    match error {
        ExerciseProcessError::ParseError(message) => assert!(!message.is_empty()),
    }
}

#[test]
fn unknown_file_type_is_rejected() {
    let mut document: serde_json::Value =
        serde_json::from_slice(&fixture_bytes()).expect("fixture is JSON");
    document["file_type"] = serde_json::Value::from("FIT");
    let bytes = serde_json::to_vec(&document).expect("document should encode");

    assert!(process_exercise_bytes(&bytes, &ProcessingOptions::default()).is_err());
}
