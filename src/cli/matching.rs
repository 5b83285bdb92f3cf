//! `elemental match` and `elemental stats`

use anyhow::{Context, Result};
use elemental_core::{match_profiles, DistributionMode, DistributionStats, MatchedProfile};
use elemental_store::{ProfileBook, SnapshotStore};
use std::borrow::Cow;

/// Print profiles and the distribution summary.
pub fn run_match<S: SnapshotStore>(
    book: &ProfileBook<S>,
    mode: Option<DistributionMode>,
    json: bool,
) -> Result<()> {
    let snapshot = book.snapshot();
    let stored_mode = snapshot.settings.distribution_mode;

    // A one-off mode is computed here without touching stored settings.
    let profiles: Cow<'_, [MatchedProfile]> = match mode {
        Some(mode) if mode != stored_mode => Cow::Owned(match_profiles(
            &snapshot.participants,
            &snapshot.mappings,
            &snapshot.archetypes,
            mode,
        )),
        _ => Cow::Borrowed(book.profiles()),
    };
    let mode = mode.unwrap_or(stored_mode);

    if json {
        let out = serde_json::to_string_pretty(profiles.as_ref())
            .context("Failed to serialize profiles")?;
        println!("{out}");
        return Ok(());
    }

    if profiles.is_empty() {
        println!("No results yet. Import participants, mappings and archetypes first.");
        return Ok(());
    }

    println!("\n🔥 Profiles ({} participants, {mode} mode)", profiles.len());
    println!("──────────────────────────────────────────────────────────────────");
    println!(
        "{:<8} {:<16} {:>6} {:>6} {:>6} {:>6}  {:<16} {:>8}",
        "ID", "Name", "Fire", "Water", "Air", "Earth", "Archetype", "Distance"
    );
    for p in profiles.iter() {
        println!("{}", profile_row(p));
    }

    let stats = DistributionStats::from_profiles(&profiles);
    print_distribution(&stats, snapshot.settings.concentration_threshold);
    Ok(())
}

/// Print only the distribution summary.
pub fn run_stats<S: SnapshotStore>(book: &ProfileBook<S>) -> Result<()> {
    let threshold = book.snapshot().settings.concentration_threshold;
    print_distribution(&book.stats(), threshold);
    Ok(())
}

fn profile_row(p: &MatchedProfile) -> String {
    let s = &p.element_scores;
    let archetype = p
        .matched
        .as_ref()
        .map(|a| a.label())
        .unwrap_or_else(|| "—".to_string());
    let distance = if p.distance.is_finite() {
        format!("{:.2}", p.distance)
    } else {
        "∞".to_string()
    };
    format!(
        "{:<8} {:<16} {:>6.1} {:>6.1} {:>6.1} {:>6.1}  {:<16} {:>8}",
        p.id,
        truncate(p.name.as_deref().unwrap_or(""), 16),
        s.fire,
        s.water,
        s.air,
        s.earth,
        truncate(&archetype, 16),
        distance
    )
}

fn print_distribution(stats: &DistributionStats, threshold: f64) {
    println!("\n📊 Distribution ({} participants)", stats.total);
    println!("─────────────────────────────────");
    if stats.entries.is_empty() {
        println!("No matched archetypes.");
    }
    for entry in &stats.entries {
        let label = match &entry.name {
            Some(name) => format!("#{} {}", entry.number, name),
            None => format!("#{}", entry.number),
        };
        println!(
            "{:<20} {:>5}  {:>6.1}%",
            truncate(&label, 20),
            entry.count,
            entry.percentage
        );
    }
    if stats.unmatched > 0 {
        println!("{:<20} {:>5}", "(unmatched)", stats.unmatched);
    }
    if stats.is_high_concentration(threshold) {
        println!(
            "\n⚠️  High concentration: {:.1}% share one archetype (threshold {:.0}%).",
            stats.concentration(),
            threshold
        );
        println!("   Consider `elemental settings set --mode wide`.");
    }
    println!();
}

fn truncate(s: &str, max: usize) -> Cow<'_, str> {
    if s.chars().count() <= max {
        Cow::Borrowed(s)
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        Cow::Owned(format!("{cut}…"))
    }
}
