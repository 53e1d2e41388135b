use crate::types::{GroupResult, SweepReport};

/// Header printed before the groups of one cutoff value.
pub fn format_cutoff_header(cutoff: u64) -> String {
    format!("cutoff value = {}", cutoff)
}

/// Seconds rendered the way a float prints in a REPL: shortest round-trip
/// digits, always with a decimal point (`1.0`, `0.125`).
pub fn format_seconds(seconds: f64) -> String {
    format!("{:?}", seconds)
}

/// One line per group: the minimum, or `nan` for a group that failed.
pub fn format_group(group: &GroupResult) -> String {
    match group.min_seconds {
        Some(seconds) => format_seconds(seconds),
        None => "nan".to_string(),
    }
}

pub fn format_json(report: &SweepReport) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

/// Shell lines a dry run would execute, grouped under cutoff headers.
pub fn format_dry_run<I>(lines: I) -> String
where
    I: IntoIterator<Item = (u64, String)>,
{
    let mut out = String::new();
    let mut current: Option<u64> = None;
    for (cutoff, line) in lines {
        if current != Some(cutoff) {
            out.push_str(&format_cutoff_header(cutoff));
            out.push('\n');
            current = Some(cutoff);
        }
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}
