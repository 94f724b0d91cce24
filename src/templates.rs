use crate::exercise::{ProcessedExercise, RepairOutcome};

fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(total) => {
            let rounded = total.round().max(0.0) as u64;
            let hours = rounded / 3600;
            let minutes = (rounded % 3600) / 60;
            let seconds = rounded % 60;

            if hours > 0 {
                format!("{}h {:02}m {:02}s", hours, minutes, seconds)
            } else {
                format!("{}m {:02}s", minutes, seconds)
            }
        }
        None => "—".to_string(),
    }
}

fn format_distance(meters: Option<u32>) -> String {
    match meters {
        Some(distance) if distance >= 1000 => format!("{:.2} km", f64::from(distance) / 1000.0),
        Some(distance) => format!("{} m", distance),
        None => "—".to_string(),
    }
}

fn format_speed(speed: Option<f32>) -> String {
    match speed {
        Some(value) if value.is_finite() && value > 0.0 => format!("{:.1} km/h", value),
        _ => "—".to_string(),
    }
}

fn format_heart_rate(value: Option<u16>) -> String {
    match value {
        Some(hr) => format!("{} bpm", hr),
        None => "—".to_string(),
    }
}

fn format_coverage(actual: usize, expected: Option<usize>) -> String {
    match expected {
        Some(expected) => format!("{} / {}", actual, expected),
        None => format!("{} / —", actual),
    }
}

fn format_outcome(outcome: Option<&RepairOutcome>) -> String {
    match outcome {
        Some(outcome) => escape_html(&outcome.to_string()),
        None => "not requested".to_string(),
    }
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn render_landing_page() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>RustyExercise</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 0; padding: 0; background: #f7f7f7; }
    header { background: #20232a; color: white; padding: 1rem 2rem; }
    main { padding: 2rem; max-width: 960px; margin: 0 auto; }
    form { border: 2px dashed #888; padding: 2rem; background: white; }
    button { background: #2563eb; color: white; border: none; padding: 0.75rem 1.5rem; border-radius: 4px; cursor: pointer; }
  </style>
</head>
<body>
  <header><h1>RustyExercise</h1></header>
  <main>
    <p>Upload a decoded exercise (JSON) to inspect it and repair its sample distances.</p>
    <form action="/upload" method="post" enctype="multipart/form-data">
      <input type="file" name="file" accept=".json" />
      <label><input type="checkbox" name="repair_samples" checked /> Repair sample distances</label>
      <button type="submit">Upload</button>
    </form>
  </main>
</body>
</html>"#
        .to_string()
}

pub fn render_processed_exercise(processed: &ProcessedExercise, report_id: &str) -> String {
    let mut body = String::new();

    let summary = &processed.summary;

    body.push_str("<section class=\"results-card\">");
    body.push_str(&format!(
        "<div class=\"results-header\"><div><p class=\"eyebrow\">Exercise Overview</p><h2>Report {}</h2></div></div>",
        escape_html(report_id)
    ));

    let cards = [
        ("Duration", format_duration(summary.duration_seconds)),
        (
            "Exercise Type",
            summary
                .exercise_type
                .as_deref()
                .map(escape_html)
                .unwrap_or_else(|| "Unknown".into()),
        ),
        ("Distance", format_distance(summary.distance_meters)),
        ("Speed (avg)", format_speed(summary.speed_avg)),
        ("Speed (max)", format_speed(summary.speed_max)),
        ("Heart Rate (avg)", format_heart_rate(summary.heart_rate_avg)),
        ("Heart Rate (max)", format_heart_rate(summary.heart_rate_max)),
        (
            "Energy",
            summary
                .energy
                .map(|kcal| format!("{} kcal", kcal))
                .unwrap_or_else(|| "—".into()),
        ),
        (
            "Samples",
            format_coverage(summary.sample_count, summary.expected_sample_count),
        ),
        ("Sample Repair", format_outcome(processed.outcome.as_ref())),
    ];

    body.push_str("<div class=\"summary-grid\">");
    for (label, value) in cards {
        body.push_str(&format!(
            "<div class=\"summary-card\"><p class=\"label\">{}</p><p class=\"value\">{}</p></div>",
            label, value
        ));
    }
    body.push_str("</div>");
    body.push_str("</section>");

    body.push_str("<section class=\"records\"><table>");
    body.push_str("<tr><th>Record</th><th>Index</th><th>Fields</th></tr>");
    for record in &processed.records {
        let fields = record
            .fields
            .iter()
            .map(|field| format!("{}={}", escape_html(&field.name), escape_html(&field.value)))
            .collect::<Vec<_>>()
            .join(", ");
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&record.record_type),
            record
                .index
                .map(|idx| idx.to_string())
                .unwrap_or_default(),
            fields
        ));
    }
    body.push_str("</table></section>");

    body.push_str(&format!(
        "<section class=\"dump\"><pre>{}</pre></section>",
        escape_html(&processed.dump)
    ));

    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\" /><title>RustyExercise report</title></head><body><main>{}</main></body></html>",
        body
    )
}
