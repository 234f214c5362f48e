//! CLI entrypoint for rollcall
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use rollcall_application::{
    AuditLog, AutoApproveConfirmation, ConfirmInvocationUseCase, ConfirmationDecision,
    ConfirmationPort, DiscoverAgentsUseCase, NoAuditLog, PlanInvocationUseCase, PlanningContext,
    VerifyInvocationUseCase,
};
use rollcall_domain::{ConfirmationLevel, ExecutionReport, InvocationPlan, OutputFormat};
use rollcall_infrastructure::{
    AgentDiscovery, ConfigLoader, FileConfig, JsonlAuditLog, TeamRosterSource,
    YamlInvocationConfigSource, save_discovery_cache,
};
use rollcall_presentation::{Cli, Command, ConsoleFormatter, InteractiveConfirmation};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let settings = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load settings: {}", e))?
    };

    let log_dir = cli.log_file.then_some(settings.paths.log_dir.as_path());
    let _guard = init_tracing(cli.verbose, log_dir)?;

    info!("Starting rollcall");
    for issue in settings.validate() {
        warn!("Settings issue: {}", issue);
    }
    if !settings.output.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Command::Plan { request, output } => {
            let format = output
                .map(Into::into)
                .or(settings.output.format)
                .unwrap_or_default();
            run_plan(&settings, &request, format)
        }
        Command::Verify {
            request,
            invoked,
            failed,
            report,
            elapsed,
            yes,
            no_audit,
            output,
        } => {
            let report = build_report(report.as_deref(), invoked, failed, elapsed)?;
            let format = output
                .map(Into::into)
                .or(settings.output.format)
                .unwrap_or_default();
            run_verify(&settings, &request, &report, yes, no_audit, format)
        }
        Command::Discover {
            expected,
            save_cache,
        } => run_discover(&settings, expected, save_cache),
        Command::ShowConfig => run_show_config(&settings, cli.config.as_ref()),
    }
}

/// Console logging to stderr, plus a daily-rolling file when `log_dir` is set.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let Some(dir) = log_dir else {
        tracing_subscriber::registry().with(filter).with(console).init();
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, "rollcall.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();
    Ok(Some(guard))
}

fn roster_source(settings: &FileConfig) -> TeamRosterSource {
    let discovery = AgentDiscovery::new(&settings.paths.team_dir)
        .with_excluded_patterns(settings.discovery.excluded_patterns.iter().cloned());
    TeamRosterSource::new(discovery, &settings.paths.manifest)
        .with_fallback_critical_agents(settings.discovery.fallback_critical_agents.iter().cloned())
}

fn config_source(settings: &FileConfig) -> YamlInvocationConfigSource {
    let (policy, _) = settings.planning_policy();
    YamlInvocationConfigSource::new(&settings.paths.orchestration).with_policy(policy)
}

fn load_context(settings: &FileConfig) -> Result<PlanningContext> {
    PlanningContext::load(&roster_source(settings), &config_source(settings))
        .context("Failed to load roster and orchestration config")
}

fn run_plan(settings: &FileConfig, request: &str, format: OutputFormat) -> Result<ExitCode> {
    let context = load_context(settings)?;
    let output = PlanInvocationUseCase::new(&context).execute(request);

    let rendered = match format {
        OutputFormat::Full => ConsoleFormatter::format_plan(
            &output.plan,
            &context.roster,
            output.confirmation,
            settings.output.group_by_domain,
        ),
        OutputFormat::Summary => {
            ConsoleFormatter::format_plan_summary(&output.plan, output.confirmation)
        }
        OutputFormat::Json => ConsoleFormatter::format_json(&output),
    };
    println!("{}", rendered);
    Ok(ExitCode::SUCCESS)
}

/// Execution report from `--report`, extended with the command-line lists.
fn build_report(
    path: Option<&Path>,
    invoked: Vec<String>,
    failed: Vec<String>,
    elapsed: Option<f64>,
) -> Result<ExecutionReport> {
    let mut report = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read execution report {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Malformed execution report {}", path.display()))?
        }
        None => ExecutionReport::default(),
    };
    report.invoked.extend(invoked);
    report.failed.extend(failed);
    if elapsed.is_some() {
        report.elapsed_minutes = elapsed;
    }
    Ok(report)
}

fn confirm<C: ConfirmationPort>(
    port: C,
    plan: &InvocationPlan,
    level: ConfirmationLevel,
) -> Result<ConfirmationDecision> {
    ConfirmInvocationUseCase::new(Arc::new(port))
        .execute(plan, level)
        .map_err(|e| anyhow!("Confirmation failed: {}", e))
}

fn audit_log(settings: &FileConfig, disabled: bool) -> Arc<dyn AuditLog> {
    if disabled {
        return Arc::new(NoAuditLog);
    }
    let path = settings.paths.audit_log();
    match JsonlAuditLog::open(&path) {
        Ok(log) => Arc::new(log),
        Err(e) => {
            warn!("Could not open audit log {}: {}", path.display(), e);
            Arc::new(NoAuditLog)
        }
    }
}

fn run_verify(
    settings: &FileConfig,
    request: &str,
    report: &ExecutionReport,
    yes: bool,
    no_audit: bool,
    format: OutputFormat,
) -> Result<ExitCode> {
    let context = load_context(settings)?;
    let planned = PlanInvocationUseCase::new(&context).execute(request);

    let decision = if yes {
        confirm(AutoApproveConfirmation, &planned.plan, planned.confirmation)?
    } else {
        confirm(InteractiveConfirmation::new(), &planned.plan, planned.confirmation)?
    };
    if !decision.approved {
        eprintln!("Invocation not confirmed; nothing verified.");
        return Ok(ExitCode::FAILURE);
    }

    let use_case = VerifyInvocationUseCase::new(&context, audit_log(settings, no_audit));
    let output = use_case.execute(&planned.plan, report);

    let rendered = match format {
        OutputFormat::Json => ConsoleFormatter::format_json(&output.result),
        _ => ConsoleFormatter::format_result(&output.result, &context.roster),
    };
    println!("{}", rendered);

    if !no_audit && format != OutputFormat::Json {
        match &output.audit_error {
            None => println!(
                "Invocation logged to: {} ({})",
                settings.paths.audit_log().display(),
                output.audit_record.id
            ),
            Some(e) => eprintln!("Audit record was not written: {}", e),
        }
    }

    Ok(if output.result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_discover(
    settings: &FileConfig,
    expected: Option<usize>,
    save_cache: bool,
) -> Result<ExitCode> {
    let use_case = DiscoverAgentsUseCase::new(Arc::new(roster_source(settings)));
    let report = use_case
        .execute(expected)
        .context("Failed to discover agents")?;

    let team_dir = settings.paths.team_dir.display().to_string();
    println!("{}", ConsoleFormatter::format_discovery(&report, &team_dir));

    if save_cache {
        let cache_path = settings.paths.discovery_cache();
        save_discovery_cache(&report.roster, &settings.paths.team_dir, &cache_path)
            .with_context(|| format!("Failed to write {}", cache_path.display()))?;
        println!("Discovery cache saved to: {}", cache_path.display());
    }

    if report.has_critical_gaps() {
        println!("Discovery completed with critical issues");
        Ok(ExitCode::FAILURE)
    } else {
        println!("Discovery completed successfully");
        Ok(ExitCode::SUCCESS)
    }
}

fn run_show_config(settings: &FileConfig, explicit: Option<&PathBuf>) -> Result<ExitCode> {
    ConfigLoader::print_config_sources(explicit);
    println!();
    println!("Resolved settings:");
    println!("{}", ConsoleFormatter::format_json(settings));

    let source = config_source(settings);
    println!();
    println!("Orchestration config: {}", settings.paths.orchestration.display());
    match rollcall_application::InvocationConfigSource::load_config(&source) {
        Ok(config) => {
            let safety = &config.safety_checks;
            println!("  Rules:           {}", config.invocation_rules.len());
            println!("  Presets:         {}", config.presets.len());
            println!("  Aliases:         {}", config.invocation_aliases.len());
            println!("  Complete groups: {}", safety.complete_groups.len());
            println!(
                "  Confirmation:    above {} agents (double above {})",
                safety.require_confirmation_above, safety.require_double_confirmation_above
            );
            for issue in config.load_issues.iter().chain(&config.validate()) {
                println!("  [{:?}] {}", issue.severity, issue);
            }
        }
        Err(e) => println!("  {}", e),
    }
    Ok(ExitCode::SUCCESS)
}
