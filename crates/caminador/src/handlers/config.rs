//! Config command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use crate::ConfigArgs;
use caminar::WalkConfig;

/// Execute the config command
pub fn execute_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let walk = effective_config(args)?;

    if config.verbosity.is_verbose() {
        reporter.info(&format!("verbosity: {:?}", config.verbosity));
        reporter.info(&format!("color: {:?}", config.color));
    }
    reporter.line(walk.to_yaml()?.trim_end());
    Ok(())
}

/// Configuration the walk command would start from
pub fn effective_config(args: &ConfigArgs) -> CliResult<WalkConfig> {
    match &args.config {
        Some(path) if !args.defaults => Ok(WalkConfig::from_path(path)?),
        _ => Ok(WalkConfig::default()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use caminar::Priority;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let args = ConfigArgs {
            config: None,
            defaults: false,
        };
        assert_eq!(effective_config(&args).unwrap(), WalkConfig::default());
    }

    #[test]
    fn test_loads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "priority: 0").unwrap();
        let args = ConfigArgs {
            config: Some(file.path().to_path_buf()),
            defaults: false,
        };
        assert_eq!(effective_config(&args).unwrap().priority, Priority::BASELINE);
    }

    #[test]
    fn test_defaults_flag_ignores_file() {
        let args = ConfigArgs {
            config: Some("/nonexistent/walk.yaml".into()),
            defaults: true,
        };
        assert_eq!(effective_config(&args).unwrap(), WalkConfig::default());
    }
}
