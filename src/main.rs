use anyhow::{Context, Result};
use pipeline_editor::cli::commands::{EditCommand, OutputFormat, ShowCommand, ValidateCommand};
use pipeline_editor::cli::output::*;
use pipeline_editor::cli::script::run_script;
use pipeline_editor::cli::{Cli, Command};
use pipeline_editor::core::config::{EditorConfig, PipelineConfig};
use pipeline_editor::core::seed::sample_pipeline;
use pipeline_editor::core::Pipeline;
use pipeline_editor::editor::EditorSession;
use std::io::Read;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; RUST_LOG takes precedence over --verbose
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let editor_config = match &cli.config {
        Some(path) => EditorConfig::from_file(path).context("Failed to load editor config")?,
        None => EditorConfig::default(),
    };

    match &cli.command {
        Command::Show(cmd) => show_pipeline(cmd)?,
        Command::Validate(cmd) => validate_pipeline(cmd)?,
        Command::Edit(cmd) => edit_pipeline(cmd, editor_config)?,
    }

    Ok(())
}

fn load_pipeline(file: Option<&str>) -> Result<Pipeline> {
    match file {
        Some(path) => {
            let config = PipelineConfig::from_file(path).context("Failed to load pipeline")?;
            debug!("Loaded pipeline {} from {}", config.name, path);
            Ok(config.to_pipeline())
        }
        None => Ok(sample_pipeline()),
    }
}

fn print_pipeline(pipeline: &Pipeline, selected: Option<&str>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_pipeline(pipeline, selected, terminal_width())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(pipeline)?),
        OutputFormat::Yaml => print!("{}", PipelineConfig::from_pipeline(pipeline).to_yaml()?),
    }
    Ok(())
}

fn show_pipeline(cmd: &ShowCommand) -> Result<()> {
    let pipeline = load_pipeline(cmd.file.as_deref())?;
    print_pipeline(&pipeline, None, cmd.format)
}

fn validate_pipeline(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating pipeline...", INFO);

    match PipelineConfig::from_file(&cmd.file) {
        Ok(config) => {
            let jobs: usize = config.stages.iter().map(|s| s.jobs.len()).sum();
            println!("{} Pipeline is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Stages: {}", style(config.stages.len()).cyan());
            println!("  Jobs: {}", style(jobs).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}

fn edit_pipeline(cmd: &EditCommand, mut editor_config: EditorConfig) -> Result<()> {
    if let Some(ids) = cmd.ids {
        editor_config.id_style = ids.into();
    }

    let pipeline = load_pipeline(cmd.file.as_deref())?;
    let script = match &cmd.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read edit script {}", path))?,
        None => {
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("Failed to read edit script from stdin")?;
            script
        }
    };

    let text = cmd.format == OutputFormat::Text;
    let mut session = EditorSession::with_config(pipeline, &editor_config);
    if text && !cmd.quiet {
        session.add_event_handler(|event| println!("{}", format_edit_event(event)));
    }

    let width = terminal_width();
    let report = run_script(&mut session, &script, |session| {
        if !text {
            return;
        }
        println!();
        print!(
            "{}",
            render_pipeline(session.pipeline(), session.selection().job_id(), width)
        );
        if let Some(job) = session.selected_job() {
            println!("{}", render_panel(job));
        }
    })?;

    if text {
        println!();
    }
    print_pipeline(
        session.pipeline(),
        session.selection().job_id(),
        cmd.format,
    )?;

    if text {
        if report.no_ops > 0 {
            println!(
                "{} {} command(s) referenced missing stages or jobs",
                WARN,
                style(report.no_ops).yellow()
            );
        }
        if report.reverted > 0 {
            println!(
                "{} {} stage rename(s) were blank or unchanged and reverted",
                WARN,
                style(report.reverted).yellow()
            );
        }
        println!("{}", format_summary(&session.summary()));
    }

    session.finish();
    Ok(())
}
