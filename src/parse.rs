use crate::errors::SweepError;

/// Token the benchmark prints directly after the elapsed seconds.
pub const SECONDS_TOKEN: &str = "(s)";

/// Extract the elapsed seconds from a benchmark timing line.
///
/// The number is located relative to the first `(s)` token rather than at a
/// fixed column: whitespace before the token is skipped, then the longest run
/// of numeric characters ending there is parsed.
pub fn extract_timing(line: &str) -> Result<f64, SweepError> {
    let token_pos = line.find(SECONDS_TOKEN).ok_or_else(|| SweepError::TimingParse {
        line: line.to_string(),
        detail: format!("missing \"{}\" token", SECONDS_TOKEN),
    })?;

    let head = line[..token_pos].trim_end();
    let start = head
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_numeric_char(*c))
        .last()
        .map(|(i, _)| i)
        .unwrap_or(head.len());

    // An exponent marker cannot start a number; it belongs to a preceding word.
    let mut field_start = head.len() - head[start..].trim_start_matches(['e', 'E']).len();
    // A sign glued to a preceding word (`time-1.5`) is punctuation, not a sign.
    if head[field_start..].starts_with(['+', '-'])
        && !sign_may_follow(head[..field_start].chars().next_back())
    {
        field_start += 1;
    }
    let field = &head[field_start..];
    if field.is_empty() {
        return Err(SweepError::TimingParse {
            line: line.to_string(),
            detail: format!("no number before \"{}\"", SECONDS_TOKEN),
        });
    }

    field.parse::<f64>().map_err(|e| SweepError::TimingParse {
        line: line.to_string(),
        detail: format!("{:?}: {}", field, e),
    })
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')
}

fn sign_may_follow(prev: Option<char>) -> bool {
    match prev {
        None | Some(':') => true,
        Some(c) => c.is_whitespace(),
    }
}

/// Parse every line containing `marker`, in order. Lines without the marker
/// are ignored, so raw benchmark output and pre-filtered output both work.
pub fn timings_for_marker<S: AsRef<str>>(
    lines: &[S],
    marker: &str,
) -> Result<Vec<f64>, SweepError> {
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| line.contains(marker))
        .map(extract_timing)
        .collect()
}
