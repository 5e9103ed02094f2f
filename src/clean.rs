use crate::error::{KnnError, Result};
use crate::structs::{CleanedInput, Feature, N_FEATURES};
use log::debug;
use std::io::{BufRead, Write};

/// Reads one line from `input`, without the trailing newline.
///
/// # Errors
///
/// Returns `KnnError::Input` when the input is exhausted.
fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(KnnError::Input("Unexpected end of input".to_string()));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Prompts once for every feature and collects the raw answers in feature order.
///
/// Nothing is validated here; see [`clean_input`].
pub fn prompt_raw_input<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<[String; N_FEATURES]> {
    let mut raw: [String; N_FEATURES] = Default::default();
    for (feature, value) in Feature::ALL.iter().zip(raw.iter_mut()) {
        write!(out, "{}", feature.prompt())?;
        out.flush()?;
        *value = read_line(input)?;
    }
    Ok(raw)
}

/// Prompts for `feature` until a number inside its range is entered.
///
/// # Errors
///
/// Returns `KnnError::Input` if the input ends before a valid value arrives.
pub fn prompt_in_range<R: BufRead, W: Write>(
    feature: Feature,
    input: &mut R,
    out: &mut W,
) -> Result<f64> {
    let (min, max) = feature.range();
    loop {
        write!(
            out,
            "{} (từ {} đến {}, mặc định {:?}): ",
            feature.name(),
            min,
            max,
            feature.default_value()
        )?;
        out.flush()?;

        match read_line(input)?.trim().parse::<f64>() {
            Ok(value) if feature.contains(value) => return Ok(value),
            Ok(_) => writeln!(
                out,
                "Giá trị phải nằm trong khoảng từ {} đến {}. Hãy nhập lại.",
                min, max
            )?,
            Err(_) => writeln!(out, "Giá trị không hợp lệ! Hãy nhập lại bằng số.")?,
        }
    }
}

/// Validates the raw answers collected by [`prompt_raw_input`].
///
/// Each field is handled in feature order:
/// - not a number: the feature's default value is substituted
/// - a number outside the feature's range: the user is asked again via
///   [`prompt_in_range`] until the value is acceptable
///
/// After every field the values accepted so far are written to `out`.
///
/// # Arguments
///
/// * `raw` - Raw answers, one per feature in `Feature::ALL` order
/// * `input` - Source of re-prompt answers
/// * `out` - Destination for prompts and progress messages
///
/// # Errors
///
/// Returns `KnnError::Input` if the input ends while re-prompting, or an I/O
/// error if `out` cannot be written.
pub fn clean_input<R: BufRead, W: Write>(
    raw: &[String; N_FEATURES],
    input: &mut R,
    out: &mut W,
) -> Result<CleanedInput> {
    let mut cleaned = [0.0; N_FEATURES];

    for (i, (feature, value)) in Feature::ALL.iter().zip(raw).enumerate() {
        cleaned[i] = match value.trim().parse::<f64>() {
            Ok(number) if feature.contains(number) => number,
            Ok(number) => {
                writeln!(out, "{} vượt quá giới hạn cho phép.", feature.name())?;
                debug!("{} value {} out of range, re-prompting", feature.name(), number);
                prompt_in_range(*feature, input, out)?
            }
            Err(_) => {
                writeln!(out, "{} không hợp lệ! Sử dụng giá trị mặc định.", feature.name())?;
                debug!(
                    "{} value '{}' not numeric, using default {}",
                    feature.name(),
                    value,
                    feature.default_value()
                );
                feature.default_value()
            }
        };

        writeln!(out, "\nDữ liệu đã nhập hợp lệ cho đến thời điểm này:")?;
        for (accepted, value) in Feature::ALL.iter().zip(&cleaned).take(i + 1) {
            writeln!(out, "{}: {:?}", accepted.name(), value)?;
        }
        writeln!(out, "{}", "-".repeat(30))?;
    }

    Ok(CleanedInput::from_features(cleaned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn raw(values: [&str; N_FEATURES]) -> [String; N_FEATURES] {
        values.map(str::to_string)
    }

    fn run(values: [&str; N_FEATURES], answers: &str) -> (Result<CleanedInput>, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = clean_input(&raw(values), &mut input, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn valid_values_pass_through() {
        let (result, _) = run(["35", "22.5", "10", "40", "80"], "");
        assert_eq!(
            result.unwrap().features(),
            [35.0, 22.5, 10.0, 40.0, 80.0]
        );
    }

    #[test]
    fn out_of_range_max_temperature_is_reprompted() {
        let (result, output) = run(["50", "20", "5", "50", "70"], "35\n");
        assert_eq!(result.unwrap().max_temp, 35.0);
        assert!(output.contains("Max Temperature vượt quá giới hạn cho phép."));
        assert!(output.contains("Max Temperature (từ -10 đến 42, mặc định 30.0): "));
    }

    #[test]
    fn reprompt_repeats_until_value_is_valid() {
        let (result, output) = run(["20", "20", "75", "50", "70"], "abc\n61\n60\n");
        assert_eq!(result.unwrap().wind_speed, 60.0);
        assert!(output.contains("Giá trị không hợp lệ! Hãy nhập lại bằng số."));
        assert!(output.contains("Giá trị phải nằm trong khoảng từ 0 đến 60. Hãy nhập lại."));
    }

    #[test]
    fn unparsable_value_uses_default() {
        let (result, output) = run(["30", "twenty", "5", "", "70"], "");
        let cleaned = result.unwrap();
        assert_eq!(cleaned.min_temp, 20.0);
        assert_eq!(cleaned.cloud_cover, 50.0);
        assert!(output.contains("Min Temperature không hợp lệ! Sử dụng giá trị mặc định."));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let (result, _) = run([" 30 ", "20\t", "5", "50", "70"], "");
        assert_eq!(result.unwrap().max_temp, 30.0);
    }

    #[test]
    fn progress_is_printed_after_each_field() {
        let (_, output) = run(["30", "20", "5", "50", "70"], "");
        assert_eq!(
            output
                .matches("Dữ liệu đã nhập hợp lệ cho đến thời điểm này:")
                .count(),
            N_FEATURES
        );
        assert_eq!(output.matches("Max Temperature: 30.0").count(), N_FEATURES);
        assert_eq!(output.matches("Relative Humidity: 70.0").count(), 1);
    }

    #[test]
    fn end_of_input_while_reprompting_is_an_error() {
        let (result, _) = run(["100", "20", "5", "50", "70"], "");
        assert!(matches!(result, Err(KnnError::Input(_))));
    }

    #[test]
    fn raw_input_is_collected_in_feature_order() {
        let mut input = Cursor::new(b"31\n21\r\n7\n\n66\n".to_vec());
        let mut out = Vec::new();
        let raw = prompt_raw_input(&mut input, &mut out).unwrap();

        assert_eq!(raw, ["31", "21", "7", "", "66"]);
        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("Nhập nhiệt độ cao nhất: "));
    }

    #[test]
    fn raw_input_requires_five_answers() {
        let mut input = Cursor::new(b"31\n21\n".to_vec());
        let mut out = Vec::new();
        assert!(matches!(
            prompt_raw_input(&mut input, &mut out),
            Err(KnnError::Input(_))
        ));
    }
}
