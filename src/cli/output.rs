//! CLI output formatting

use crate::{
    core::{Job, JobType, Pipeline, Stage},
    editor::{
        panel::{self, PanelForm, LANGUAGES},
        EditEvent, EditSummary,
    },
};
use console::{measure_text_width, pad_str, Alignment, Emoji};

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static PENCIL: Emoji<'_, '_> = Emoji("✏️  ", "* ");

/// Width of one stage column
const COLUMN_WIDTH: usize = 30;
/// Gap between columns, holding the connector arrow
const GUTTER: &str = "  ──▶  ";
const GUTTER_BLANK: &str = "       ";

/// Terminal width, 80 when unknown
pub fn terminal_width() -> usize {
    term_size::dimensions_stdout()
        .map(|(w, _)| w)
        .unwrap_or(80)
}

/// Short tag for a job type
pub fn job_type_tag(job_type: JobType) -> String {
    let tag = job_type.as_str();
    match job_type {
        JobType::Source => style(tag).blue().to_string(),
        JobType::Test => style(tag).green().to_string(),
        JobType::Build => style(tag).yellow().to_string(),
        JobType::Scan => style(tag).magenta().to_string(),
        JobType::Deploy => style(tag).cyan().to_string(),
        JobType::Custom => style(tag).dim().to_string(),
    }
}

/// Serial/parallel label for a stage
pub fn parallel_label(stage: &Stage) -> String {
    if stage.is_parallel() {
        style("并行").blue().to_string()
    } else {
        style("串行").dim().to_string()
    }
}

fn cell(text: &str) -> String {
    pad_str(text, COLUMN_WIDTH, Alignment::Left, Some("…")).into_owned()
}

/// Lines of one job card
fn job_card(job: &Job, selected: bool) -> Vec<String> {
    let marker = if selected {
        style("▶").red().bold().to_string()
    } else {
        " ".to_string()
    };
    let name = if selected {
        style(&job.name).bold().to_string()
    } else {
        job.name.clone()
    };

    let mut lines = vec![cell(&format!("{} {} {}", marker, job_type_tag(job.job_type), name))];
    let subtitle = match &job.description {
        Some(description) => format!("    {} · {}", description, job.id),
        None => format!("    {}", job.id),
    };
    lines.push(cell(&style(subtitle).dim().to_string()));
    lines
}

/// Lines of one stage column
fn stage_column(stage: &Stage, selected: Option<&str>) -> Vec<String> {
    let header = format!("{} [{}]", style(&stage.name).bold(), parallel_label(stage));
    let mut lines = vec![
        cell(&header),
        cell(&style(&stage.id).dim().to_string()),
        cell(&"─".repeat(COLUMN_WIDTH - 2)),
    ];
    for job in &stage.jobs {
        lines.extend(job_card(job, selected == Some(job.id.as_str())));
    }
    if panel::accepts_new_jobs(&stage.id) {
        lines.push(cell(&style("  [+]").dim().to_string()));
    }
    lines
}

/// Render a pipeline as rows of stage columns fitted to `width`
pub fn render_pipeline(pipeline: &Pipeline, selected: Option<&str>, width: usize) -> String {
    let mut out = format!(
        "{} {}\n\n",
        style(&pipeline.name).bold().underlined(),
        style(format!("({})", pipeline.id)).dim()
    );

    if pipeline.stages.is_empty() {
        out.push_str(&format!("{} No stages\n", INFO));
        return out;
    }

    let gutter = measure_text_width(GUTTER);
    let per_row = ((width + gutter) / (COLUMN_WIDTH + gutter)).max(1);
    let columns: Vec<Vec<String>> = pipeline
        .stages
        .iter()
        .map(|s| stage_column(s, selected))
        .collect();

    let row_count = columns.len().div_ceil(per_row);
    for (row_index, row) in columns.chunks(per_row).enumerate() {
        let height = row.iter().map(Vec::len).max().unwrap_or(0);
        let is_last_row = row_index + 1 == row_count;

        for line in 0..height {
            let mut text = String::new();
            for (col, column) in row.iter().enumerate() {
                let content = column.get(line).cloned().unwrap_or_else(|| cell(""));
                text.push_str(&content);

                let more_in_row = col + 1 < row.len();
                let wraps = !more_in_row && !is_last_row;
                if more_in_row || wraps {
                    text.push_str(if line == 0 { GUTTER } else { GUTTER_BLANK });
                }
            }
            out.push_str(text.trim_end());
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

/// Render the edit panel for a job
pub fn render_panel(job: &Job) -> String {
    let form = PanelForm::for_job(job);
    let mut out = format!(
        "{}{} {}\n",
        PENCIL,
        style(form.title()).bold(),
        style(format!("({})", job.id)).dim()
    );

    for field in form.fields() {
        let value = field.value(job);
        let shown = if value.is_empty() {
            style("<empty>").dim().to_string()
        } else {
            value.to_string()
        };
        let suffix = if field.is_read_only() {
            style(" (read-only)").dim().to_string()
        } else {
            String::new()
        };
        out.push_str(&format!("  {:<10} {}{}\n", field.to_string(), shown, suffix));
    }

    if form == PanelForm::Source {
        let choices: Vec<String> = LANGUAGES
            .iter()
            .map(|lang| {
                if job.config_value(crate::core::LANGUAGE) == *lang {
                    format!("(•) {}", lang)
                } else {
                    format!("( ) {}", lang)
                }
            })
            .collect();
        out.push_str(&format!("  {}\n", style(choices.join("  ")).dim()));
    }

    out
}

/// Format an edit event for display
pub fn format_edit_event(event: &EditEvent) -> String {
    match event {
        EditEvent::StageAdded { stage_id, name } => format!(
            "{}Added stage {} {}",
            CHECK,
            style(name).bold(),
            style(format!("({})", stage_id)).dim()
        ),
        EditEvent::StageRenamed { stage_id, name } => format!(
            "{}Renamed {} → {}",
            CHECK,
            style(stage_id).dim(),
            style(name).bold()
        ),
        EditEvent::ParallelToggled {
            stage_id,
            is_parallel,
        } => format!(
            "{}{} is now {}",
            CHECK,
            style(stage_id).cyan(),
            if *is_parallel { "parallel" } else { "serial" }
        ),
        EditEvent::JobAdded { stage_id, job_id } => format!(
            "{}Added job {} to {}",
            CHECK,
            style(job_id).cyan(),
            style(stage_id).dim()
        ),
        EditEvent::JobUpdated { job_id } => {
            format!("{}Updated {}", PENCIL, style(job_id).cyan())
        }
        EditEvent::JobDeleted { stage_id, job_id } => format!(
            "{}Deleted {} from {}",
            CROSS,
            style(job_id).red(),
            style(stage_id).dim()
        ),
        EditEvent::JobSelected { job_id } => {
            format!("{}Editing {}", INFO, style(job_id).cyan())
        }
        EditEvent::SelectionCleared => format!("{}Closed edit panel", INFO),
    }
}

/// Format a session summary for display
pub fn format_summary(summary: &EditSummary) -> String {
    let elapsed = std::time::Duration::from_millis(summary.elapsed_ms.max(0) as u64);
    format!(
        "{}{} - {} stages, {} jobs - {} edits in {}",
        INFO,
        style(&summary.pipeline_name).bold(),
        style(summary.stages).cyan(),
        style(summary.jobs).cyan(),
        style(summary.edits).green(),
        style(format_duration(elapsed)).dim()
    )
}

/// Human-readable duration
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    if secs == 0 {
        format!("{}ms", duration.as_millis())
    } else if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
