use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, Command};
use dossier_engine::{
    MemoryCheckpointStore, NullRenderer, StubChecker, StubMaker, WorkflowOrchestrator,
};
use dossier_plan::{PlanBuilder, SectionGraph};
use dossier_types::EngineConfig;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Command::new("dossier")
        .version(dossier_engine::VERSION)
        .about("Dependency-ordered document assembly engine")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("plan")
                .about("Validate a plan and print its execution order")
                .arg(
                    Arg::new("project")
                        .long("project")
                        .default_value("demo")
                        .help("Project identifier"),
                )
                .arg(
                    Arg::new("doc-type")
                        .long("doc-type")
                        .default_value("SIC")
                        .help("Document type selecting the catalog"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the plan as JSON"),
                ),
        )
        .subcommand(
            Command::new("run")
                .about("Execute a full run with deterministic stub collaborators")
                .arg(
                    Arg::new("project")
                        .long("project")
                        .default_value("demo")
                        .help("Project identifier"),
                )
                .arg(
                    Arg::new("doc-type")
                        .long("doc-type")
                        .default_value("SIC")
                        .help("Document type selecting the catalog"),
                )
                .arg(
                    Arg::new("workers")
                        .long("workers")
                        .default_value("4")
                        .value_parser(value_parser!(usize))
                        .help("Maximum concurrently executing sections"),
                )
                .arg(
                    Arg::new("timeout-secs")
                        .long("timeout-secs")
                        .value_parser(value_parser!(u64))
                        .help("Run-level timeout; unfinished sections degrade to missing"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the run manifest as JSON"),
                ),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("plan", args)) => {
            let project = args
                .get_one::<String>("project")
                .context("missing project")?;
            let doc_type = args
                .get_one::<String>("doc-type")
                .context("missing doc-type")?;

            let plan = PlanBuilder::new()
                .generate_plan(project, doc_type)
                .context("plan validation failed")?;

            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&plan)?);
                return Ok(());
            }

            let order = SectionGraph::from_sections(&plan.sections)?.topological_sort()?;
            println!("Plan for {} ({} sections):", doc_type, plan.sections.len());
            for id in order {
                let deps = plan
                    .section(&id)
                    .map(|s| s.dependency_ids.clone())
                    .unwrap_or_default();
                if deps.is_empty() {
                    println!("  {}", id);
                } else {
                    let deps: Vec<String> = deps.iter().map(ToString::to_string).collect();
                    println!("  {} <- {}", id, deps.join(", "));
                }
            }
        }
        Some(("run", args)) => {
            let project = args
                .get_one::<String>("project")
                .context("missing project")?;
            let doc_type = args
                .get_one::<String>("doc-type")
                .context("missing doc-type")?;
            let workers = args
                .get_one::<usize>("workers")
                .copied()
                .context("missing workers")?;

            let mut config = EngineConfig::default().with_max_concurrent_sections(workers);
            if let Some(secs) = args.get_one::<u64>("timeout-secs") {
                config = config.with_run_timeout(Duration::from_secs(*secs));
            }

            let orchestrator = WorkflowOrchestrator::new(
                PlanBuilder::new(),
                Arc::new(StubMaker),
                Arc::new(StubChecker::default()),
                config,
            )
            .with_renderer(Arc::new(NullRenderer))
            .with_checkpoints(Arc::new(MemoryCheckpointStore::new()));

            let result = orchestrator
                .run(project, doc_type)
                .await
                .context("run failed")?;

            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&result.manifest)?);
            } else {
                println!("Run {} finished", result.run_id);
                println!(
                    "  Sections: {}/{}",
                    result.sections_generated(),
                    result.states.len()
                );
                println!("  Aggregate score: {:.2}", result.aggregate_score);
                println!("  Complete: {}", result.completeness);
                println!("  Approved: {}", result.global_approved);
            }

            if !result.global_approved {
                std::process::exit(2);
            }
        }
        _ => unreachable!("subcommand required"),
    }
    Ok(())
}
