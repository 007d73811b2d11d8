//! Terminal rendering of store events.

use aura_protocol::ipc::Event;
use aura_protocol::log_models::{LogEntry, LogKind};
use aura_protocol::project_models::ProjectData;
use aura_protocol::stage_models::PipelineStage;
use colored::{ColoredString, Colorize};

/// Prints log lines and stage changes as they are published.
#[derive(Debug, Default)]
pub struct Console {
    stage: PipelineStage,
}

impl Console {
    pub fn handle(&mut self, event: &Event) {
        match event {
            Event::LogAppended { entry } => println!("{}", log_line(entry)),
            Event::ProjectUpdated { project, .. } if project.status != self.stage => {
                self.stage = project.status;
                if project.status != PipelineStage::Idle {
                    println!("{}", stage_line(project));
                }
            }
            Event::ProjectReset => self.stage = PipelineStage::Idle,
            _ => {}
        }
    }
}

fn log_line(entry: &LogEntry) -> String {
    let time = entry.timestamp.format("%H:%M:%S").to_string();
    format!(
        "{} {} {}",
        time.dimmed(),
        format!("[{}]", entry.stage.label()).cyan(),
        paint(&entry.message, entry.kind)
    )
}

fn paint(message: &str, kind: LogKind) -> ColoredString {
    match kind {
        LogKind::Info => message.normal(),
        LogKind::Success => message.green(),
        LogKind::Warning => message.yellow(),
        LogKind::Error => message.red().bold(),
    }
}

fn stage_line(project: &ProjectData) -> String {
    let filled = usize::from(project.progress) / 5;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(20 - filled));
    format!(
        "==> {} [{bar}] {}%",
        project.status.label().bold(),
        project.progress
    )
}

/// Final summary after a run.
pub fn summary(project: &ProjectData) -> Vec<String> {
    let status = match project.status {
        PipelineStage::Completed => project.status.label().green().bold(),
        PipelineStage::Error => project.status.label().red().bold(),
        _ => project.status.label().yellow(),
    };

    let mut lines = vec![
        format!("{} {}", "Topic:".bold(), project.topic),
        format!("{} {}", "Task:".bold(), project.id),
        format!("{} {status} ({}%)", "Status:".bold(), project.progress),
    ];
    if let Some(script) = &project.script {
        lines.push(format!("{} {}", "Intro:".bold(), script.intro));
    }
    if let Some(code) = &project.generated_code {
        lines.push(format!(
            "{} {} lines of scene code",
            "Code:".bold(),
            code.lines().count()
        ));
    }
    if let Some(url) = &project.video_url {
        lines.push(format!("{} {url}", "Video:".bold()));
    }
    lines
}
