use chrono::Utc;
use clap::Parser;
use colored::*;
use relearn::api::RelearnApi;
use relearn::commands::snapshot::Outcome;
use relearn::commands::{CmdMessage, MessageLevel};
use relearn::config::RelearnConfig;
use relearn::diff::ChangeKind;
use relearn::error::{RelearnError, Result};
use relearn::render;
use relearn::store::fs::FileVault;
use std::path::PathBuf;
use uuid::Uuid;

mod args;
use args::{Cli, Commands, QuestionCommands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let root = match &cli.vault {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().map_err(RelearnError::Io)?,
    };
    let mut api = RelearnApi::open(FileVault::new(root))?;

    match cli.command {
        Commands::Init => handle_init(&mut api),
        Commands::Convert { path } => handle_convert(&mut api, &path),
        Commands::Snapshot { path } => handle_snapshot(&mut api, &path),
        Commands::Changed => handle_changed(&api),
        Commands::Diff { path, html } => handle_diff(&api, &path, html),
        Commands::Review { path, undo } => handle_review(&mut api, &path, undo),
        Commands::Question(cmd) => handle_question(&mut api, cmd),
        Commands::Quiz { count, tags, html } => handle_quiz(&mut api, count, tags, html),
        Commands::Migrate => handle_migrate(&mut api),
        Commands::Gc => handle_gc(&mut api),
        Commands::Config { key, value } => handle_config(&mut api, key, value),
    }
}

fn handle_init(api: &mut RelearnApi<FileVault>) -> Result<()> {
    api.set_config(api.config().clone())?;
    println!("{} {}", "Initialized vault at".green(), api.vault().root().display());
    Ok(())
}

fn handle_convert(api: &mut RelearnApi<FileVault>, path: &str) -> Result<()> {
    let converted = api.convert_note(path)?;
    if converted.already_tracked {
        println!(
            "{} {} (id {})",
            "Already tracked:".yellow(),
            path,
            converted.note_id
        );
    } else {
        println!("{} {} (id {})", "Converted:".green(), path, converted.note_id);
    }
    Ok(())
}

fn handle_snapshot(api: &mut RelearnApi<FileVault>, path: &str) -> Result<()> {
    match api.note_modified(path)? {
        Outcome::Ignored => println!("{} {}", "Ignored (not a tracked note):".yellow(), path),
        Outcome::Created => println!("{} {}", "Created revision for:".green(), path),
        Outcome::Unchanged => println!("Revision for {} unchanged", path),
        Outcome::Rolled => println!("{} {}", "Rolled revision forward for:".green(), path),
    }
    Ok(())
}

fn handle_changed(api: &RelearnApi<FileVault>) -> Result<()> {
    let changed = api.changed_notes()?;
    if changed.is_empty() {
        println!("No notes with unreviewed changes.");
        return Ok(());
    }
    println!("{}", "Notes with unreviewed changes:".bold());
    for note in changed {
        println!(
            "  {}  {}",
            note.path,
            format!("modified {}", ago(note.modified)).dimmed()
        );
    }
    Ok(())
}

fn handle_diff(api: &RelearnApi<FileVault>, path: &str, html: bool) -> Result<()> {
    let result = api.diff_note(path)?;
    if html {
        println!("{}", result.to_html());
        return Ok(());
    }
    println!("{}", format!("--- {}", result.revision_path).bold());
    println!("{}", format!("+++ {}", result.note_path).bold());
    for span in &result.spans {
        for line in span.text.lines() {
            match span.kind {
                ChangeKind::Added => println!("{}", format!("+ {}", line).green()),
                ChangeKind::Removed => println!("{}", format!("- {}", line).red()),
                ChangeKind::Unchanged => println!("  {}", line),
            }
        }
    }
    Ok(())
}

fn handle_review(api: &mut RelearnApi<FileVault>, path: &str, undo: bool) -> Result<()> {
    api.mark_reviewed(path, !undo)?;
    if undo {
        println!("{} {}", "Unmarked review on:".yellow(), path);
    } else {
        println!("{} {}", "Reviewed:".green(), path);
    }
    Ok(())
}

fn handle_question(api: &mut RelearnApi<FileVault>, cmd: QuestionCommands) -> Result<()> {
    match cmd {
        QuestionCommands::Add {
            path,
            question,
            answer,
            categories,
        } => {
            let qa = api.add_question(&path, question, answer, categories)?;
            println!(
                "{} {} ({})",
                "Added question:".green(),
                qa.question,
                qa.id.map(|id| id.to_string()).unwrap_or_default()
            );
        }
        QuestionCommands::List { path } => {
            let questions = api.questions_for(&path)?;
            if questions.is_empty() {
                println!("No questions for {}", path);
                return Ok(());
            }
            for qa in questions {
                let id = qa
                    .id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "unmigrated".to_string());
                let seen = qa
                    .last_seen
                    .map(|t| format!("seen {}", ago(t)))
                    .unwrap_or_else(|| "never seen".to_string());
                println!("{}  {}", id.dimmed(), qa.question);
                println!("    {}", seen.dimmed());
                if !qa.categories.is_empty() {
                    println!("    {}", qa.categories.join(", ").cyan());
                }
            }
        }
        QuestionCommands::Edit {
            path,
            id,
            question,
            answer,
        } => {
            let note_id = api.note_id(&path)?;
            api.update_question(note_id, parse_id(&id)?, question, answer)?;
            println!("{}", "Question updated.".green());
        }
        QuestionCommands::Rm { path, id } => {
            let note_id = api.note_id(&path)?;
            api.delete_question(note_id, parse_id(&id)?)?;
            println!("{}", "Question deleted.".green());
        }
    }
    Ok(())
}

fn handle_quiz(
    api: &mut RelearnApi<FileVault>,
    count: Option<usize>,
    tags: Vec<String>,
    html: bool,
) -> Result<()> {
    let tags = tags.into_iter().collect();
    let round = api.quiz(&tags, count)?;
    if round.questions.is_empty() {
        println!("No questions to quiz on.");
        return Ok(());
    }
    if round.unmigrated > 0 {
        println!(
            "{}",
            format!(
                "{} question(s) lack ids; run 'relearn migrate' to track their staleness.",
                round.unmigrated
            )
            .yellow()
        );
    }
    for (i, q) in round.questions.iter().enumerate() {
        println!();
        println!(
            "{} {}  {}",
            format!("{}.", i + 1).bold(),
            q.qa.question,
            format!("({})", q.note_path).dimmed()
        );
        if html {
            println!("{}", render::render_markdown(&q.qa.answer));
        } else {
            println!("   {}", q.qa.answer);
        }
    }
    Ok(())
}

fn handle_migrate(api: &mut RelearnApi<FileVault>) -> Result<()> {
    let report = api.migrate()?;
    print_messages(&report.messages);
    if report.pairs_backfilled == 0 {
        println!("All question records already migrated.");
    } else {
        println!(
            "{} {} record(s) across {} bank(s)",
            "Backfilled".green(),
            report.pairs_backfilled,
            report.banks_touched
        );
    }
    Ok(())
}

fn handle_gc(api: &mut RelearnApi<FileVault>) -> Result<()> {
    let report = api.sweep()?;
    print_messages(&report.messages);
    for path in &report.removed {
        println!("{} {}", "Removed:".yellow(), path);
    }
    if report.migrated > 0 {
        println!("{} {} legacy revision(s)", "Migrated".green(), report.migrated);
    }
    if report.removed.is_empty() && report.migrated == 0 {
        println!("Nothing to clean up.");
    }
    Ok(())
}

fn handle_config(
    api: &mut RelearnApi<FileVault>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    match (key.as_deref(), value) {
        (None, _) => {
            println!("num-quiz-questions = {}", api.config().num_quiz_questions);
        }
        (Some("num-quiz-questions"), None) => {
            println!("{}", api.config().num_quiz_questions);
        }
        (Some("num-quiz-questions"), Some(value)) => {
            let parsed: usize = value
                .parse()
                .map_err(|_| RelearnError::Store(format!("Not a number: {}", value)))?;
            api.set_config(RelearnConfig {
                num_quiz_questions: parsed,
            })?;
            println!("{} num-quiz-questions = {}", "Set".green(), parsed);
        }
        (Some(other), _) => {
            return Err(RelearnError::Store(format!("Unknown config key: {}", other)));
        }
    }
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| RelearnError::Store(format!("Not a question id: {}", raw)))
}

fn ago(t: chrono::DateTime<Utc>) -> String {
    let elapsed = (Utc::now() - t).to_std().unwrap_or_default();
    timeago::Formatter::new().convert(elapsed)
}
