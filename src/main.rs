mod browse;
mod cli;
mod logging;
mod render;

use std::fs::File;
use std::io;
use std::process;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, FilterArgs};
use cmdref_core::facet::{categories, difficulties};
use cmdref_core::{
    copy_text, filter, AppConfig, BrowseSession, Catalog, ClipboardSink, Command, Difficulty, Error,
    FacetChoice, FilterCriteria, Record, RecordStore, Scenario, WriterSink,
};
use colored::*;
use dotenv::dotenv;
use render::Presentable;
use tracing::{error, info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match cmdref_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    let Some(command) = args.command else {
        let _ = Cli::command().print_long_help();
        return Ok(());
    };

    if let Commands::PrintConfig = command {
        println!("Configuration: {:?}", config);
        return Ok(());
    }

    let catalog = match Catalog::load(&config) {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("Error loading catalog: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = run(command, &catalog, &config) {
        error!("Error: {}", err);
        process::exit(1);
    }

    Ok(())
}

fn run(command: Commands, catalog: &Catalog, config: &AppConfig) -> Result<(), Error> {
    match command {
        Commands::Commands { filter: args } => {
            let store = command_store(catalog, args.collection.as_deref())?;
            let criteria = criteria_from(&args, None);
            print_results(store, &criteria);
        }
        Commands::Scenarios {
            filter: args,
            difficulty,
        } => {
            let store = scenario_store(catalog, args.collection.as_deref())?;
            let criteria = criteria_from(&args, difficulty);
            print_results(store, &criteria);
        }
        Commands::Categories {
            scenarios,
            collection,
        } => {
            let values = if scenarios {
                categories(scenario_store(catalog, collection.as_deref())?.records())
            } else {
                categories(command_store(catalog, collection.as_deref())?.records())
            };
            for value in values {
                println!("{}", value);
            }
        }
        Commands::Difficulties { collection } => {
            for value in difficulties(scenario_store(catalog, collection.as_deref())?.records()) {
                println!("{}", value);
            }
        }
        Commands::Collections => {
            for collection in catalog.collections() {
                println!(
                    "{:<12} {:<12} {} commands, {} scenarios",
                    collection.key.bold(),
                    collection.name,
                    collection.commands.len(),
                    collection.scenarios.len()
                );
            }
        }
        Commands::Show { id } => {
            if let Some(command) = catalog.commands().get(&id) {
                println!("{}", command.detail());
            } else if let Some(scenario) = catalog.scenarios().get(&id) {
                println!("{}", scenario.detail());
            } else {
                return Err(Error::UnknownRecord(id));
            }
        }
        Commands::Copy { id, step, to } => {
            let text = copy_target_for(catalog, &id, step)?;
            let mut sink: Box<dyn ClipboardSink> = match to {
                Some(path) => Box::new(WriterSink::new(File::create(path)?)),
                None => Box::new(WriterSink::new(io::stdout())),
            };
            if !copy_text(sink.as_mut(), text) {
                eprintln!("{}", "Copy failed.".red());
            }
        }
        Commands::Browse {
            scenarios,
            collection,
        } => {
            if scenarios {
                let store = scenario_store(catalog, collection.as_deref())?;
                browse::run(BrowseSession::new(store.clone()))?;
            } else {
                let store = command_store(catalog, collection.as_deref())?;
                browse::run(BrowseSession::new(store.clone()))?;
            }
        }
        Commands::Validate => {
            info!(
                "Catalog OK: {} collections, {} commands, {} scenarios (bundled: {}, paths: {:?})",
                catalog.collections().len(),
                catalog.commands().len(),
                catalog.scenarios().len(),
                config.include_bundled,
                config.catalog_paths,
            );
            for scenario in catalog.scenarios().iter().filter(|s| !s.is_complete()) {
                println!("{} scenario '{}' has no steps", "warning:".yellow(), scenario.id);
            }
        }
        Commands::PrintConfig => unreachable!("print-config is handled before the catalog loads"),
    }

    Ok(())
}

/// Text the `copy` subcommand hands to its sink. Scenarios need an existing step.
fn copy_target_for<'a>(catalog: &'a Catalog, id: &str, step: Option<u32>) -> Result<&'a str, Error> {
    if let Some(command) = catalog.commands().get(id) {
        return command
            .copy_target(step)
            .ok_or_else(|| Error::UnknownRecord(id.to_string()));
    }
    let scenario = catalog
        .scenarios()
        .get(id)
        .ok_or_else(|| Error::UnknownRecord(id.to_string()))?;
    scenario
        .copy_target(step)
        .ok_or_else(|| Error::MissingStep(id.to_string()))
}

fn criteria_from(args: &FilterArgs, difficulty: Option<String>) -> FilterCriteria {
    if let Some(value) = difficulty.as_deref().filter(|v| *v != cmdref_core::ALL) {
        if let Err(err) = value.parse::<Difficulty>() {
            warn!("{}", err);
        }
    }

    FilterCriteria::new()
        .with_search_term(args.term.clone().unwrap_or_default())
        .with_category(FacetChoice::from(args.category.clone()))
        .with_difficulty(FacetChoice::from(difficulty))
}

fn command_store<'a>(
    catalog: &'a Catalog,
    collection: Option<&str>,
) -> Result<&'a RecordStore<Command>, Error> {
    match collection {
        Some(key) => catalog
            .collection(key)
            .map(|c| &c.commands)
            .ok_or_else(|| Error::UnknownCollection(key.to_string())),
        None => Ok(catalog.commands()),
    }
}

fn scenario_store<'a>(
    catalog: &'a Catalog,
    collection: Option<&str>,
) -> Result<&'a RecordStore<Scenario>, Error> {
    match collection {
        Some(key) => catalog
            .collection(key)
            .map(|c| &c.scenarios)
            .ok_or_else(|| Error::UnknownCollection(key.to_string())),
        None => Ok(catalog.scenarios()),
    }
}

fn print_results<T: Record + Presentable>(store: &RecordStore<T>, criteria: &FilterCriteria) {
    let visible = filter(store.records(), criteria);
    for record in &visible {
        println!("{}\n", record.card());
    }

    if visible.is_empty() {
        if let Some(state) = cmdref_core::session::empty_state_for(T::KIND, criteria) {
            println!("{}", render::empty_state(&state));
        }
    }
    info!("{} of {} {} shown", visible.len(), store.len(), T::KIND.plural());
}
