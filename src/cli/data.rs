//! Data management CLI commands
//!
//! `elemental data stats`  - show record counts and file size
//! `elemental data import` / `export` - snapshot JSON files
//! `elemental data import --participants` - replace participants only
//! `elemental data clear`  - clear data (all or one collection)

use super::{ClearTarget, DataCommands};
use anyhow::{Context, Result};
use elemental_core::Participant;
use elemental_store::{ProfileBook, Snapshot, SnapshotStore};
use std::path::Path;
use tracing::info;

/// Run a data subcommand.
pub async fn run<S: SnapshotStore>(
    book: &mut ProfileBook<S>,
    cmd: DataCommands,
    db_path: &Path,
) -> Result<()> {
    match cmd {
        DataCommands::Stats => {
            stats(book, db_path);
            Ok(())
        }
        DataCommands::Import {
            file,
            participants: true,
        } => import_participants(book, &file).await,
        DataCommands::Import { file, .. } => import(book, &file).await,
        DataCommands::Export { file } => export(book, &file),
        DataCommands::Clear { target, force } => clear(book, target, force).await,
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn file_size_display(path: &Path) -> String {
    match std::fs::metadata(path) {
        Ok(m) => format_bytes(m.len()),
        Err(_) => "not found".to_string(),
    }
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

fn confirm(prompt: &str) -> bool {
    use std::io::{self, Write};
    print!("{prompt} [y/N] ");
    io::stdout().flush().ok();
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_ok() {
        matches!(input.trim(), "y" | "Y" | "yes" | "YES")
    } else {
        false
    }
}

// ── Stats ────────────────────────────────────────────────────────────

fn stats<S: SnapshotStore>(book: &ProfileBook<S>, db_path: &Path) {
    let snap = book.snapshot();

    println!("\n📊 Elemental Data Statistics");
    println!("────────────────────────────");
    println!(
        "Database:       {} ({})",
        db_path.display(),
        file_size_display(db_path)
    );
    println!("Participants:   {}", snap.participants.len());
    println!("Mappings:       {}", snap.mappings.len());
    println!("Archetypes:     {}", snap.archetypes.len());
    println!("Mode:           {}", snap.settings.distribution_mode);
    match snap.saved_at {
        Some(at) => println!("Last saved:     {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("Last saved:     never"),
    }
    println!();
}

// ── Import / export ──────────────────────────────────────────────────

async fn import<S: SnapshotStore>(book: &mut ProfileBook<S>, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let snapshot = book
        .snapshot()
        .merge_json(&json)
        .with_context(|| format!("Invalid snapshot file {}", file.display()))?;
    let counts = (
        snapshot.participants.len(),
        snapshot.mappings.len(),
        snapshot.archetypes.len(),
    );

    book.replace_snapshot(snapshot)
        .await
        .context("Failed to import snapshot")?;
    info!(file = %file.display(), "Snapshot imported");
    println!(
        "✅ Imported {} participant(s), {} mapping(s), {} archetype(s).",
        counts.0, counts.1, counts.2
    );
    Ok(())
}

async fn import_participants<S: SnapshotStore>(
    book: &mut ProfileBook<S>,
    file: &Path,
) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let participants: Vec<Participant> = serde_json::from_str(&json)
        .with_context(|| format!("Invalid participant file {}", file.display()))?;
    let count = participants.len();

    book.replace_participants(participants)
        .await
        .context("Failed to import participants")?;
    info!(file = %file.display(), count, "Participants imported");
    println!("✅ Imported {count} participant(s).");
    Ok(())
}

fn export<S: SnapshotStore>(book: &ProfileBook<S>, file: &Path) -> Result<()> {
    let json = book.snapshot().to_json()?;
    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(file, json).with_context(|| format!("Failed to write {}", file.display()))?;
    println!("✅ Exported snapshot to {}", file.display());
    Ok(())
}

// ── Clear ────────────────────────────────────────────────────────────

async fn clear<S: SnapshotStore>(
    book: &mut ProfileBook<S>,
    target: ClearTarget,
    force: bool,
) -> Result<()> {
    let prompt = match target {
        ClearTarget::Participants => "Clear all participants?",
        ClearTarget::Mappings => "Clear all question mappings?",
        ClearTarget::Archetypes => "Clear all archetypes?",
        ClearTarget::All => "⚠️  This will delete ALL Elemental data. Continue?",
    };
    if !force && !confirm(prompt) {
        println!("Aborted.");
        return Ok(());
    }

    match target {
        ClearTarget::Participants => {
            book.reset_participants().await?;
            println!("  ✅ Cleared participants.");
        }
        ClearTarget::Mappings => {
            book.reset_mappings().await?;
            println!("  ✅ Cleared mappings.");
        }
        ClearTarget::Archetypes => {
            book.reset_archetypes().await?;
            println!("  ✅ Cleared archetypes.");
        }
        ClearTarget::All => {
            // Settings survive a full clear.
            let settings = book.snapshot().settings;
            book.replace_snapshot(Snapshot {
                settings,
                ..Snapshot::default()
            })
            .await?;
            println!("\n✅ All data cleared.");
        }
    }
    Ok(())
}
