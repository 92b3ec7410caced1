use colored::Colorize;
use serde_json::Value;

/// Compare `actual` against `expected`, skipping any path that ends with one of `ignore_fields`
pub fn compare_json(actual: &Value, expected: &Value, ignore_fields: &[&str]) -> ComparisonResult {
    let mut differences = Vec::new();

    compare_json_recursive(actual, expected, ignore_fields, "", &mut differences);

    if differences.is_empty() {
        ComparisonResult::Match
    } else {
        ComparisonResult::Mismatch { differences }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Difference {
    ValueMismatch {
        path: String,
        expected: Value,
        actual: Value,
    },
    MissingField {
        path: String,
    },
    ExtraField {
        path: String,
    },
    ArrayLengthMismatch {
        path: String,
        expected_len: usize,
        actual_len: usize,
    },
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn is_ignored(path: &str, ignore_fields: &[&str]) -> bool {
    ignore_fields
        .iter()
        .any(|&field| path == field || path.ends_with(&format!(".{}", field)))
}

fn compare_json_recursive(
    actual: &Value,
    expected: &Value,
    ignore_fields: &[&str],
    path: &str,
    differences: &mut Vec<Difference>,
) {
    match (actual, expected) {
        (Value::Object(actual_obj), Value::Object(expected_obj)) => {
            for (key, expected_val) in expected_obj.iter() {
                let current_path = join_path(path, key);
                if is_ignored(&current_path, ignore_fields) {
                    continue;
                }

                match actual_obj.get(key) {
                    Some(actual_val) => compare_json_recursive(
                        actual_val,
                        expected_val,
                        ignore_fields,
                        &current_path,
                        differences,
                    ),
                    None => differences.push(Difference::MissingField { path: current_path }),
                }
            }

            // Omitted optional fields are part of the output contract, so extras fail too
            for key in actual_obj.keys() {
                let current_path = join_path(path, key);
                if !expected_obj.contains_key(key) && !is_ignored(&current_path, ignore_fields) {
                    differences.push(Difference::ExtraField { path: current_path });
                }
            }
        }
        (Value::Array(actual_arr), Value::Array(expected_arr)) => {
            if actual_arr.len() != expected_arr.len() {
                differences.push(Difference::ArrayLengthMismatch {
                    path: path.to_string(),
                    expected_len: expected_arr.len(),
                    actual_len: actual_arr.len(),
                });
            }

            // Compare overlapping elements even if lengths differ
            for (i, (actual_val, expected_val)) in
                actual_arr.iter().zip(expected_arr.iter()).enumerate()
            {
                let current_path = format!("{}[{}]", path, i);
                compare_json_recursive(
                    actual_val,
                    expected_val,
                    ignore_fields,
                    &current_path,
                    differences,
                );
            }
        }
        (actual_val, expected_val) => {
            if actual_val != expected_val {
                differences.push(Difference::ValueMismatch {
                    path: path.to_string(),
                    expected: expected_val.clone(),
                    actual: actual_val.clone(),
                });
            }
        }
    }
}

#[derive(Debug)]
pub enum ComparisonResult {
    Match,
    Mismatch { differences: Vec<Difference> },
}

impl ComparisonResult {
    pub fn is_match(&self) -> bool {
        matches!(self, ComparisonResult::Match)
    }

    pub fn differences(&self) -> &[Difference] {
        match self {
            ComparisonResult::Match => &[],
            ComparisonResult::Mismatch { differences } => differences,
        }
    }

    /// One colored line per difference: `-` for the actual side, `+` for the fixture
    pub fn format_diff(&self) -> String {
        let differences = self.differences();
        if differences.is_empty() {
            return String::new();
        }

        let mut output = Vec::new();
        output.push(format!("\n{}", "=".repeat(80).bright_white()));
        output.push(format!("{}", "OUTPUT MISMATCH".bright_yellow().bold()));
        output.push(format!("{}", "=".repeat(80).bright_white()));

        for diff in differences {
            match diff {
                Difference::ValueMismatch {
                    path,
                    expected,
                    actual,
                } => {
                    output.push(format!("{}", path.bright_cyan()));
                    output.push(format!("- {}", actual).red().to_string());
                    output.push(format!("+ {}", expected).green().to_string());
                }
                Difference::MissingField { path } => {
                    output.push(format!("+ {} (missing from output)", path).green().to_string());
                }
                Difference::ExtraField { path } => {
                    output.push(format!("- {} (not in fixture)", path).red().to_string());
                }
                Difference::ArrayLengthMismatch {
                    path,
                    expected_len,
                    actual_len,
                } => {
                    output.push(format!(
                        "{} length {} != {}",
                        path.bright_cyan(),
                        actual_len.to_string().red(),
                        expected_len.to_string().green()
                    ));
                }
            }
        }

        output.push(format!("{}", "=".repeat(80).bright_white()));
        output.push(format!(
            "{} {}",
            "Total differences:".bright_cyan().bold(),
            differences.len().to_string().bright_white()
        ));
        output.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identical_documents_match() {
        let doc = json!({ "a": 1, "b": [ { "c": "x" } ] });
        assert!(compare_json(&doc, &doc, &[]).is_match());
    }

    #[test]
    fn test_reports_each_kind_of_difference() {
        let actual = json!({ "a": 2, "extra": true, "list": [1] });
        let expected = json!({ "a": 1, "gone": null, "list": [1, 2] });

        let result = compare_json(&actual, &expected, &[]);
        let diffs = result.differences();
        assert_eq!(diffs.len(), 4);
        assert!(diffs.contains(&Difference::MissingField { path: "gone".to_string() }));
        assert!(diffs.contains(&Difference::ExtraField { path: "extra".to_string() }));
        assert!(diffs.contains(&Difference::ArrayLengthMismatch {
            path: "list".to_string(),
            expected_len: 2,
            actual_len: 1,
        }));
        assert!(!result.format_diff().is_empty());
    }

    #[test]
    fn test_ignored_fields_match_path_suffix() {
        let actual = json!({ "inMsg": { "rawBody": "aa", "value": "1" } });
        let expected = json!({ "inMsg": { "rawBody": "bb", "value": "1" } });

        assert!(!compare_json(&actual, &expected, &[]).is_match());
        assert!(compare_json(&actual, &expected, &["rawBody"]).is_match());
        assert!(!compare_json(&actual, &expected, &["Body"]).is_match());
    }
}
