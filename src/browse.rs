use crate::render::{self, Presentable};
use cmdref_core::{copy_text, BrowseSession, Record, RecordKind, WriterSink};
use colored::*;
use std::io::{self, BufRead, Write};
use tracing::{debug, error};

/// One line of user input in the browse loop.
#[derive(Debug, PartialEq, Eq)]
pub enum BrowseInput {
    Search(String),
    Category(String),
    Difficulty(String),
    Open(String),
    Close,
    Copy(Option<u32>),
    Reset,
    Help,
    Quit,
}

pub fn parse_input(line: &str) -> BrowseInput {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix('/') else {
        return BrowseInput::Search(line.to_string());
    };
    // "//" escapes a search term that itself starts with a slash
    if rest.starts_with('/') {
        return BrowseInput::Search(rest.to_string());
    }

    let (verb, arg) = match rest.split_once(' ') {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (rest, ""),
    };
    let or_all = |arg: &str| {
        if arg.is_empty() {
            cmdref_core::ALL.to_string()
        } else {
            arg.to_string()
        }
    };

    match verb {
        "c" | "category" => BrowseInput::Category(or_all(arg)),
        "d" | "difficulty" => BrowseInput::Difficulty(or_all(arg)),
        "o" | "open" if !arg.is_empty() => BrowseInput::Open(arg.to_string()),
        "x" | "close" => BrowseInput::Close,
        "y" | "copy" => BrowseInput::Copy(arg.parse().ok()),
        "r" | "reset" => BrowseInput::Reset,
        "q" | "quit" | "exit" => BrowseInput::Quit,
        _ => BrowseInput::Help,
    }
}

fn print_help(kind: RecordKind) {
    println!("{}", "Type text to search, an empty line clears the search.".dimmed());
    println!("{}", "Start with // to search for text beginning with /.".dimmed());
    println!("  /c <category>    filter by category (/c alone for All)");
    if kind == RecordKind::Scenario {
        println!("  /d <difficulty>  filter by difficulty (/d alone for All)");
    }
    println!("  /open <id>       show details");
    println!("  /close           close details");
    if kind == RecordKind::Scenario {
        println!("  /copy <step>     copy a step's command");
    } else {
        println!("  /copy            copy the open command");
    }
    println!("  /reset           clear all filters");
    println!("  /quit");
}

fn print_view<T: Record + Presentable>(session: &mut BrowseSession<T>) {
    let criteria = session.criteria().clone();
    let facets = session.facets().clone();

    println!();
    println!("{}", render::category_row(&facets, &criteria.category));
    if T::KIND == RecordKind::Scenario {
        println!("{}", render::difficulty_row(&facets, &criteria.difficulty));
    }
    if !criteria.search_term.is_empty() {
        println!("{} \"{}\"", "Search:".bold(), criteria.search_term);
    }
    println!();

    let visible = session.visible();
    for record in &visible {
        println!("{}", record.card());
    }
    if let Some(state) = session.empty_state() {
        println!("{}", render::empty_state(&state));
    }
    println!("{}", format!("{} of {} shown", visible.len(), session.store().len()).dimmed());
}

/// Read criteria updates from stdin until `/quit` or end of input.
pub fn run<T: Record + Presentable>(mut session: BrowseSession<T>) -> io::Result<()> {
    print_help(T::KIND);
    print_view(&mut session);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{} ", ">".cyan());
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let input = parse_input(&line);
        debug!("Browse input: {:?}", input);
        match input {
            BrowseInput::Search(term) => session.set_search_term(term),
            BrowseInput::Category(category) => session.set_category(category),
            BrowseInput::Difficulty(difficulty) => session.set_difficulty(difficulty),
            BrowseInput::Open(id) => match session.select(&id) {
                Ok(record) => {
                    println!("\n{}", record.detail());
                    continue;
                }
                Err(err) => error!("{}", err),
            },
            BrowseInput::Close => session.clear_selection(),
            BrowseInput::Copy(step) => {
                copy_selected(&session, step);
                continue;
            }
            BrowseInput::Reset => session.reset_filters(),
            BrowseInput::Help => {
                print_help(T::KIND);
                continue;
            }
            BrowseInput::Quit => break,
        }
        print_view(&mut session);
    }

    Ok(())
}

fn copy_selected<T: Record + Presentable>(session: &BrowseSession<T>, step: Option<u32>) {
    let Some(record) = session.selected().filter(|_| session.is_detail_open()) else {
        println!("{}", "Open a record first.".yellow());
        return;
    };
    let Some(text) = record.copy_target(step) else {
        println!("{}", "Nothing to copy; pick a step number.".yellow());
        return;
    };

    let mut sink = WriterSink::new(io::stdout());
    if !copy_text(&mut sink, text) {
        println!("{}", "Copy failed.".red());
    }
}
