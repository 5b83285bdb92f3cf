//! `elemental archetype` and `elemental mapping`

use anyhow::{Context, Result};
use elemental_core::{Archetype, ElementMapping, ElementScores};
use elemental_store::{ProfileBook, SnapshotStore};

use super::{ArchetypeCommands, MappingCommands};

/// Run an archetype subcommand.
pub async fn run_archetype<S: SnapshotStore>(
    book: &mut ProfileBook<S>,
    cmd: ArchetypeCommands,
) -> Result<()> {
    match cmd {
        ArchetypeCommands::List => {
            list_archetypes(book.snapshot().archetypes.as_slice());
            Ok(())
        }
        ArchetypeCommands::Add {
            number,
            fire,
            water,
            air,
            earth,
            name,
            description,
        } => {
            let mut archetype = Archetype::new(number, ElementScores::new(fire, water, air, earth))
                .with_description(description);
            if let Some(name) = name {
                archetype = archetype.with_name(name);
            }
            let label = archetype.label();
            let id = book.add_archetype(archetype).await?;
            println!("✅ Added archetype {label} ({id})");
            Ok(())
        }
        ArchetypeCommands::Edit {
            id,
            number,
            fire,
            water,
            air,
            earth,
            name,
            description,
        } => {
            let mut archetype = book
                .snapshot()
                .archetype(&id)
                .cloned()
                .with_context(|| format!("Archetype not found: {id}"))?;
            if let Some(number) = number {
                archetype.number = number;
            }
            let p = &mut archetype.percentages;
            p.fire = fire.unwrap_or(p.fire);
            p.water = water.unwrap_or(p.water);
            p.air = air.unwrap_or(p.air);
            p.earth = earth.unwrap_or(p.earth);
            if let Some(name) = name {
                archetype.name = (!name.trim().is_empty()).then_some(name);
            }
            if let Some(description) = description {
                archetype.description = description;
            }
            let label = archetype.label();
            book.update_archetype(archetype).await?;
            println!("✅ Updated archetype {label}");
            Ok(())
        }
        ArchetypeCommands::Remove { id } => {
            book.remove_archetype(&id).await?;
            println!("🗑️  Removed archetype {id}");
            Ok(())
        }
    }
}

/// Run a mapping subcommand.
pub async fn run_mapping<S: SnapshotStore>(
    book: &mut ProfileBook<S>,
    cmd: MappingCommands,
) -> Result<()> {
    match cmd {
        MappingCommands::List => {
            list_mappings(book.snapshot().mappings.as_slice());
            Ok(())
        }
        MappingCommands::Add {
            question,
            answer1,
            answer2,
            answer3,
            answer4,
        } => {
            let mapping = ElementMapping::new(question, [answer1, answer2, answer3, answer4]);
            book.add_mapping(mapping).await?;
            println!("✅ Mapped question {question}: 1={answer1} 2={answer2} 3={answer3} 4={answer4}");
            Ok(())
        }
        MappingCommands::Edit {
            question,
            answer,
            element,
        } => {
            book.update_mapping(question, answer, element).await?;
            println!("✅ Question {question}: answer {answer} now maps to {element}");
            Ok(())
        }
        MappingCommands::Remove { question } => {
            book.remove_mapping(question).await?;
            println!("🗑️  Removed mapping for question {question}");
            Ok(())
        }
    }
}

fn list_archetypes(archetypes: &[Archetype]) {
    if archetypes.is_empty() {
        println!("No archetypes defined.");
        return;
    }
    println!("\n🧭 Archetypes ({})", archetypes.len());
    println!("──────────────────────────────────────────────────────────────────");
    for a in archetypes {
        let p = &a.percentages;
        println!(
            "{:<20} fire {:>5.1}  water {:>5.1}  air {:>5.1}  earth {:>5.1}",
            a.label(),
            p.fire,
            p.water,
            p.air,
            p.earth
        );
        println!("    id: {}", a.id);
        if !a.description.is_empty() {
            println!("    {}", a.description);
        }
    }
    println!();
}

fn list_mappings(mappings: &[ElementMapping]) {
    if mappings.is_empty() {
        println!("No mappings defined.");
        return;
    }
    println!("\n🗺️  Mappings ({})", mappings.len());
    println!("─────────────────────────────────");
    for m in mappings {
        let answers: Vec<String> = m
            .answers
            .iter()
            .map(|(value, element)| format!("{value}={element}"))
            .collect();
        println!("Q{:<6} {}", m.question_id, answers.join("  "));
    }
    println!();
}
