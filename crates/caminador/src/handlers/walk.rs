//! Walk command handler

use crate::checkout::Checkout;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{summary_json, OutputFormat, Reporter};
use crate::WalkArgs;
use caminar::{CaminarError, Flow, Graph, Priority, Seed, WalkConfig, WalkSummary};
use std::panic;

/// Execute the walk command
pub fn execute_walk(config: &CliConfig, args: &WalkArgs) -> CliResult<()> {
    let walk = resolve_walk_config(args)?;
    tracing::debug!(?walk, "effective walk configuration");

    let mut reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let checkout = Checkout::new()?;
    let mut flow = checkout.flow();
    if let Some(seed) = walk.seed {
        flow = flow.with_seed(seed);
    }

    reporter.start_spinner(&format!("walking checkout at {}", walk.priority));
    walk_quietly(&mut flow, walk.priority);
    reporter.finish_spinner();
    let summary = flow.summary();

    match args.format {
        OutputFormat::Text => {
            if args.routes || config.verbosity.is_verbose() {
                reporter.header("Routes");
                reporter.routes(flow.routes());
            }
            reporter.summary(&summary);
        }
        OutputFormat::Json => reporter.line(&summary_json(&summary)?),
    }

    draw_graph(&reporter, &flow.build_graph(), &walk)?;

    check_defects(&reporter, &summary, args.fail_on_defect)
}

/// Walk with step panics sent to the debug log instead of stderr
///
/// The walker already turns a panicking step into a fault route; the default
/// hook would still print each panic over the spinner. The previous hook is
/// restored once the walk returns.
pub fn walk_quietly(flow: &mut Flow, priority: Priority) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        tracing::debug!(%info, "step panicked");
    }));
    flow.walk(priority);
    panic::set_hook(previous);
}

/// Fail the run when asked to and the walk found defects
pub fn check_defects(
    reporter: &Reporter,
    summary: &WalkSummary,
    fail_on_defect: bool,
) -> CliResult<()> {
    if fail_on_defect && summary.has_defects() {
        reporter.failure(&format!(
            "{} of {} routes ended in a defect",
            summary.faults(),
            summary.routes
        ));
        return Err(CliError::defects(summary.faults()));
    }
    Ok(())
}

/// Merge the config file with flags; flags win
pub fn resolve_walk_config(args: &WalkArgs) -> CliResult<WalkConfig> {
    let mut walk = match &args.config {
        Some(path) => WalkConfig::from_path(path)?,
        None => WalkConfig::default(),
    };
    if let Some(priority) = args.priority {
        walk.priority = Priority::clamped(priority);
    }
    if let Some(seed) = args.seed {
        walk.seed = Some(Seed::from_u64(seed));
    }
    if let Some(output) = &args.output {
        walk.output.clone_from(output);
    }
    if let Some(program) = &args.graphviz {
        walk.graphviz = Some(program.clone());
    }
    if let Some(font) = &args.font {
        walk.font.clone_from(font);
    }
    if args.no_render {
        walk.render = false;
    }
    Ok(walk)
}

/// Write the DOT description and render it when enabled
///
/// A missing or failing Graphviz is reported as a warning; the description
/// stays on disk.
pub fn draw_graph(reporter: &Reporter, graph: &Graph, walk: &WalkConfig) -> CliResult<()> {
    let renderer = walk.renderer();
    let dot = graph.to_dot();

    if !walk.render {
        let description = renderer.write_description(&dot, &walk.output)?;
        reporter.info(&format!("wrote {}", description.display()));
        return Ok(());
    }

    match renderer.render(&dot, &walk.output) {
        Ok(rendered) => {
            reporter.success(&format!("rendered {}", rendered.image.display()));
            Ok(())
        }
        Err(CaminarError::Render {
            description,
            message,
        }) => {
            reporter.warning(&format!(
                "{message}; graph description kept at {}",
                description.display()
            ));
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
