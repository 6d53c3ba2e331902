use clap::Parser;
use internal_linker::{Linker, LinkerConfig, LinkerError, Snapshot};
use std::process::ExitCode;

mod args;
use args::{Args, Command, EventArg};

fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), LinkerError> {
    let mut config = match &args.config {
        Some(path) => {
            ::log::info!("Loading configuration from {}", path.display());
            LinkerConfig::from_file(path)?
        }
        None => LinkerConfig::default(),
    };
    if args.no_default_rules {
        config.use_default_rules = false;
    }

    let snapshot = match &args.data {
        Some(path) => Snapshot::from_file(path)?,
        None => {
            ::log::warn!("No --data file given, starting with no pages");
            Snapshot::default()
        }
    };

    let mut linker = Linker::new(config).with_snapshot(snapshot);

    match args.command {
        Command::Suggest { slug, max_links } => {
            let max_links = max_links.unwrap_or(linker.config().max_links);
            let links = linker.suggest(&slug, max_links);
            if links.is_empty() {
                ::log::info!("No suggestions for {}", slug);
            }
            for link in links {
                println!(
                    "{}\t{}\t{}\t(priority {})",
                    link.id,
                    link.href(),
                    link.anchor_text,
                    link.priority
                );
            }
        }
        Command::Insert {
            slug,
            content_file,
            max_insertions,
        } => {
            let content =
                std::fs::read_to_string(&content_file).map_err(|source| LinkerError::Read {
                    path: content_file.clone(),
                    source,
                })?;
            let max_insertions = max_insertions.unwrap_or(linker.config().max_insertions);

            let result = linker.insert(&content, &slug, max_insertions);
            ::log::info!(
                "Inserted {} links into {}",
                result.inserted_links.len(),
                content_file.display()
            );
            for link in &result.inserted_links {
                ::log::debug!("{} -> {} ({:?})", link.id, link.href(), link.anchor_text);
            }
            print!("{}", result.content);
        }
        Command::Validate {
            from,
            to,
            anchor_text,
        } => {
            let result = linker.validate(&from, &to, &anchor_text);
            println!("valid: {}", result.valid);
            println!("score: {}", result.score);
            for issue in &result.issues {
                println!("  - {}", issue);
            }
        }
        Command::Report => print!("{}", linker.stats_report()),
        Command::Rules => print!("{}", linker.rules_report()),
        Command::Performance => print!("{}", linker.performance_report()),
        Command::Track {
            link_id,
            event,
            save,
        } => {
            match event {
                EventArg::Impression => linker.record_impression(&link_id),
                EventArg::Click => linker.record_click(&link_id),
            }
            if let Some(record) = linker.performance(&link_id) {
                println!(
                    "{}: {} impressions, {} clicks, CTR {:.2}%",
                    record.link_id,
                    record.impressions,
                    record.clicks,
                    record.ctr()
                );
            }

            if save {
                match &args.data {
                    Some(path) => linker.snapshot().save(path)?,
                    None => ::log::warn!("--save needs a --data file, counters not persisted"),
                }
            }
        }
    }

    Ok(())
}
