use crate::ReactorsIVP::reactor_IVP_utils::{ReactorError, SimulationConfig};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Kinetic task as written in a task document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KineticTask {
    #[serde(default)]
    pub problem_name: Option<String>,
    pub reactions: Vec<String>,
    pub rate_constants: Vec<f64>,
    pub initial_concentrations: HashMap<String, f64>,
    #[serde(default)]
    pub settings: SimulationConfig,
}

pub struct LoadData {
    pub file_name: String,
}

impl LoadData {
    pub fn new(file_name: String) -> Self {
        LoadData { file_name }
    }
    pub fn load_task(&self) -> Result<KineticTask, ReactorError> {
        load_and_validate_task(&self.file_name)
    }
}

/// Lines of the section that follows the first line equal to one of `headers`
/// (case-insensitive) up to the next all-uppercase header line.
/// Returns the section text and the index of its first line in the file.
fn read_section(file_name: &str, headers: &[&str]) -> Result<(Vec<String>, usize), ReactorError> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(ReactorError::TaskFile(format!(
            "File '{}' does not exist",
            file_name
        )));
    }
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let lines = reader.lines().collect::<Result<Vec<String>, _>>()?;

    let start_index = lines
        .iter()
        .position(|line| {
            let trimmed = line.trim().to_uppercase();
            headers.iter().any(|h| trimmed == *h)
        })
        .map(|i| i + 1)
        .ok_or_else(|| {
            ReactorError::TaskFile(format!(
                "No '{}' header found in file '{}'",
                headers.join("' or '"),
                file_name
            ))
        })?;

    // the section ends at the next header (or end of file)
    let end_index = (start_index..lines.len())
        .find(|&i| {
            let trimmed = lines[i].trim();
            !trimmed.is_empty() && trimmed.chars().all(|c| c.is_uppercase() || c == '_')
        })
        .unwrap_or(lines.len());

    Ok((lines[..end_index].to_vec(), start_index))
}

/// Parses a document for a kinetic task under the "KINETICS" or "REACTIONS" header.
/// The section is one JSON object:
/// ```text
/// KINETICS
/// {
///   "reactions": ["A+B=C", "B+C=D"],
///   "rate_constants": [1.0, 1.5],
///   "initial_concentrations": {"A": 1.0, "B": 1.0, "C": 0.0, "D": 0.0},
///   "settings": {"t_final": 10.0, "n_points": 1000}
/// }
/// ```
/// `settings` and any of its fields may be omitted.
pub fn load_task_from_file(file_name: &str) -> Result<KineticTask, ReactorError> {
    let (lines, start_index) = read_section(file_name, &["KINETICS", "REACTIONS"])?;
    let section = lines[start_index..].join("\n");

    match serde_json::from_str::<KineticTask>(&section) {
        Ok(task) => {
            info!("Successfully parsed kinetic task from file '{}'", file_name);
            Ok(task)
        }
        Err(e) => {
            let error_line = e.line();
            let error_column = e.column();
            // serde_json counts lines from 1
            let actual_line = start_index + error_line.max(1) - 1;

            let error_msg = format!(
                "Error parsing kinetic task at line {}, column {} (line {} in file): {}",
                error_line,
                error_column,
                actual_line + 1,
                e
            );
            error!("{}", error_msg);

            if actual_line < lines.len() {
                let problem_line = &lines[actual_line];
                error!("Problematic line: {}", problem_line);
                if error_column >= 1 && error_column <= problem_line.len() {
                    let pointer = " ".repeat(error_column - 1) + "^";
                    error!("{}", pointer);
                }
            }

            Err(ReactorError::TaskFile(error_msg))
        }
    }
}

/// Loads the task and warns about suspicious but legal content
pub fn load_and_validate_task(file_name: &str) -> Result<KineticTask, ReactorError> {
    let task = load_task_from_file(file_name)?;

    if task.reactions.is_empty() {
        warn!("Task in '{}' contains no reactions", file_name);
    }
    if task.reactions.len() != task.rate_constants.len() {
        warn!(
            "Task in '{}' has {} reactions but {} rate constants",
            file_name,
            task.reactions.len(),
            task.rate_constants.len()
        );
    }
    for (substance, c) in &task.initial_concentrations {
        if *c < 0.0 {
            warn!(
                "Negative initial concentration of {} in '{}'",
                substance, file_name
            );
        }
    }

    info!("Loaded and validated kinetic task from file '{}'", file_name);
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_task(content: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        for line in content {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_load_task_from_file() {
        let temp_file = write_task(&[
            "Some header text",
            "KINETICS",
            "{",
            "  \"problem_name\": \"two steps\",",
            "  \"reactions\": [\"A+B=C\", \"B+C=D\"],",
            "  \"rate_constants\": [1.0, 1.5],",
            "  \"initial_concentrations\": {\"A\": 1.0, \"B\": 1.0, \"C\": 0.0, \"D\": 0.0},",
            "  \"settings\": {\"t_final\": 5.0, \"output_path\": \"out.svg\"}",
            "}",
            "ANOTHER_HEADER",
            "Some other content",
        ]);
        let file_path = temp_file.path().to_str().unwrap();

        let task = load_task_from_file(file_path).unwrap();
        assert_eq!(task.problem_name.as_deref(), Some("two steps"));
        assert_eq!(task.reactions, vec!["A+B=C", "B+C=D"]);
        assert_eq!(task.rate_constants, vec![1.0, 1.5]);
        assert_eq!(task.initial_concentrations["B"], 1.0);
        assert_eq!(task.settings.t_final, 5.0);
        assert_eq!(task.settings.output_path, "out.svg");
        assert_eq!(task.settings.n_points, 1000);
    }

    #[test]
    fn test_load_task_with_reactions_header_and_no_settings() {
        let temp_file = write_task(&[
            "reactions",
            "{\"reactions\": [\"A=B\"], \"rate_constants\": [2.0], \"initial_concentrations\": {\"A\": 1.0, \"B\": 0.0}}",
        ]);
        let task = LoadData::new(temp_file.path().to_str().unwrap().to_string())
            .load_task()
            .unwrap();
        assert_eq!(task.problem_name, None);
        assert_eq!(task.settings, SimulationConfig::default());
    }

    #[test]
    fn test_load_task_no_header() {
        let temp_file = write_task(&["{\"reactions\": []}"]);
        let result = load_task_from_file(temp_file.path().to_str().unwrap());
        match result {
            Err(ReactorError::TaskFile(msg)) => assert!(msg.contains("No 'KINETICS'")),
            other => panic!("expected TaskFile error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_task_invalid_json_reports_line() {
        let temp_file = write_task(&[
            "KINETICS",
            "{",
            "  \"reactions\": [\"A=B\"],",
            "  \"rate_constants\": [1.0,,],",
            "  \"initial_concentrations\": {}",
            "}",
        ]);
        match load_task_from_file(temp_file.path().to_str().unwrap()) {
            Err(ReactorError::TaskFile(msg)) => assert!(msg.contains("line 4 in file")),
            other => panic!("expected TaskFile error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_task_missing_field() {
        let temp_file = write_task(&["KINETICS", "{\"reactions\": [\"A=B\"]}"]);
        assert!(matches!(
            load_task_from_file(temp_file.path().to_str().unwrap()),
            Err(ReactorError::TaskFile(_))
        ));
    }

    #[test]
    fn test_load_task_file_not_found() {
        assert!(matches!(
            load_and_validate_task("no_such_task_file.txt"),
            Err(ReactorError::TaskFile(_))
        ));
    }
}
