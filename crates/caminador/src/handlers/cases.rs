//! Cases command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{OutputFormat, Reporter};
use crate::CasesArgs;
use caminar::{Case, Form, Priority, Seed, ValueRng};
use std::path::Path;

/// Execute the cases command
pub fn execute_cases(config: &CliConfig, args: &CasesArgs) -> CliResult<()> {
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let priority = Priority::clamped(args.priority);
    let cases = generate_cases(&args.file, priority, args.seed)?;

    match args.format {
        OutputFormat::Text => {
            for case in &cases {
                reporter.line(&case.to_string());
            }
            reporter.info(&format!("{} case(s) at {priority}", cases.len()));
        }
        OutputFormat::Json => reporter.line(&serde_json::to_string_pretty(&cases)?),
    }
    Ok(())
}

/// Load a form description and list its cases
pub fn generate_cases(path: &Path, priority: Priority, seed: Option<u64>) -> CliResult<Vec<Case>> {
    let text = std::fs::read_to_string(path)?;
    let form = Form::from_yaml(&text)?;
    tracing::debug!(fields = form.field_count(), %priority, "loaded form");

    let mut rng = seed.map_or_else(ValueRng::from_entropy, |s| ValueRng::new(Seed::from_u64(s)));
    Ok(form.cases_with(priority, &mut rng).collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FORM: &str = r"
name: example
fields:
  - name: ef
    kind: enumerated
    values:
      - { label: a, value: 1 }
      - { label: b, value: 2 }
    invalid:
      - { label: bad, value: 9 }
  - name: nf
    kind: integer
    min: 4
    max: 9
";

    fn form_file(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_generate_cases_by_priority() {
        let file = form_file(FORM);
        let baseline = generate_cases(file.path(), Priority::BASELINE, Some(1)).unwrap();
        assert_eq!(baseline.len(), 1);

        let invalid = generate_cases(file.path(), Priority::INVALID, Some(1)).unwrap();
        assert_eq!(invalid.len(), 9);
    }

    #[test]
    fn test_seed_makes_output_stable() {
        let file = form_file(FORM);
        let a = generate_cases(file.path(), Priority::EXHAUSTIVE, Some(8)).unwrap();
        let b = generate_cases(file.path(), Priority::EXHAUSTIVE, Some(8)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_form_is_an_error() {
        let file = form_file("fields: []\n");
        let err = generate_cases(file.path(), Priority::BASELINE, None).unwrap_err();
        assert!(matches!(err, CliError::Caminar(_)));
    }
}
