use crate::exercise::types::{Exercise, ExerciseSample, RepairOutcome};

impl Exercise {
    /// Rescale the sample distances so the last sample matches the total
    /// distance of the speed block.
    ///
    /// Most decoders have no per-sample distance and derive it from sample
    /// time and speed, which drifts from the distance the device reports for
    /// the whole exercise. Call this once after the samples are populated;
    /// running it again compounds rounding unless the relation is exactly 1.
    ///
    /// Nothing is changed when speed data or samples are missing, or when the
    /// samples do not cover the whole duration (e.g. after connection
    /// problems), since rescaling would then distort the unrecorded gap.
    ///
    /// Rescaled distances saturate at `u32::MAX`. This only happens when an
    /// earlier sample is far beyond the last one, i.e. the distances were
    /// not non-decreasing to begin with.
    pub fn repair_samples(&mut self) -> RepairOutcome {
        let (last_distance, total_distance) = match check_repairable(self) {
            Ok(distances) => distances,
            Err(skipped) => {
                tracing::debug!(reason = %skipped, "sample repair skipped");
                return skipped;
            }
        };

        let relation = f64::from(last_distance) / f64::from(total_distance);
        for sample in &mut self.samples {
            sample.distance = rescale_distance(sample.distance, relation);
        }

        tracing::debug!(
            relation,
            samples = self.samples.len(),
            total_distance,
            "sample distances repaired"
        );
        RepairOutcome::Repaired { relation }
    }

    /// Like [`Exercise::repair_samples`], but leaves `self` untouched.
    pub fn repaired(&self) -> (Exercise, RepairOutcome) {
        let mut exercise = self.clone();
        let outcome = exercise.repair_samples();
        (exercise, outcome)
    }
}

/// Rescale `samples` so the last distance equals `total_distance`.
///
/// Unlike [`Exercise::repair_samples`] this does not check whether the
/// samples cover the full exercise. The input is returned as-is when the
/// total, the sample list or the last distance is zero.
///
/// Distances are rounded to the nearest metre with ties rounding up, and
/// saturate at `u32::MAX` when an out-of-order sample would overflow.
pub fn repaired_samples(samples: &[ExerciseSample], total_distance: u32) -> Vec<ExerciseSample> {
    let last_distance = samples.last().map(|sample| sample.distance).unwrap_or(0);
    if total_distance == 0 || last_distance == 0 {
        return samples.to_vec();
    }

    let relation = f64::from(last_distance) / f64::from(total_distance);
    samples
        .iter()
        .map(|sample| ExerciseSample {
            distance: rescale_distance(sample.distance, relation),
            ..sample.clone()
        })
        .collect()
}

/// Returns the last sample distance and the total distance, or the reason the
/// samples must be left alone.
fn check_repairable(exercise: &Exercise) -> Result<(u32, u32), RepairOutcome> {
    let total_distance = match exercise.total_distance() {
        Some(distance) if distance > 0 => distance,
        _ => return Err(RepairOutcome::MissingSpeed),
    };

    let last_distance = match exercise.samples.last() {
        Some(sample) => sample.distance,
        None => return Err(RepairOutcome::NoSamples),
    };

    let expected = exercise
        .expected_sample_count()
        .ok_or(RepairOutcome::ZeroRecordingInterval)?;
    let actual = exercise.samples.len();
    if actual < expected {
        return Err(RepairOutcome::IncompleteSamples { expected, actual });
    }

    if last_distance == 0 {
        return Err(RepairOutcome::ZeroLastDistance);
    }

    Ok((last_distance, total_distance))
}

// Ties round away from zero, which is round-half-up for distances.
fn rescale_distance(distance: u32, relation: f64) -> u32 {
    (f64::from(distance) / relation)
        .round()
        .min(f64::from(u32::MAX)) as u32
}
