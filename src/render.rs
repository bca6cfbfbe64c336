use cmdref_core::{Command, Difficulty, EmptyState, FacetChoice, Facets, Scenario};
use colored::*;
use std::fmt::Write;

const CARD_TAG_LIMIT: usize = 3;

/// Terminal rendering for a record type.
pub trait Presentable {
    fn card(&self) -> String;
    fn detail(&self) -> String;
    /// Text handed to the copy action. Scenarios copy a single step.
    fn copy_target(&self, step: Option<u32>) -> Option<&str>;
}

impl Presentable for Command {
    fn card(&self) -> String {
        format!(
            "{} {} {}\n    {}\n    {}",
            self.title.bold(),
            format!("[{}]", self.category).cyan(),
            self.id.dimmed(),
            self.command.green(),
            self.description,
        )
    }

    fn detail(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}  {}", self.title.bold().underline(), self.category.cyan());
        let _ = writeln!(out, "\n  {}\n", self.command.green());
        let _ = writeln!(out, "{}", self.description);
        if !self.examples.is_empty() {
            let _ = writeln!(out, "\n{}", "Examples".bold());
            for example in &self.examples {
                let _ = writeln!(out, "  {}", example.green());
            }
        }
        if !self.options.is_empty() {
            let _ = writeln!(out, "\n{}", "Options".bold());
            for option in &self.options {
                let _ = writeln!(out, "  {}", option);
            }
        }
        out
    }

    fn copy_target(&self, _step: Option<u32>) -> Option<&str> {
        Some(&self.command)
    }
}

fn difficulty_badge(difficulty: Difficulty) -> ColoredString {
    match difficulty {
        Difficulty::Beginner => difficulty.as_str().green(),
        Difficulty::Intermediate => difficulty.as_str().yellow(),
        Difficulty::Advanced => difficulty.as_str().red(),
    }
}

/// First few tags plus a `+N` marker for the rest.
pub fn tag_preview(tags: &[String], limit: usize) -> String {
    let mut shown: Vec<String> = tags.iter().take(limit).map(|t| format!("#{}", t)).collect();
    if tags.len() > limit {
        shown.push(format!("+{}", tags.len() - limit));
    }
    shown.join(" ")
}

impl Presentable for Scenario {
    fn card(&self) -> String {
        format!(
            "{} {} {} {}\n    {}  {} steps  {}\n    {}",
            self.title.bold(),
            difficulty_badge(self.difficulty),
            format!("[{}]", self.category).cyan(),
            self.id.dimmed(),
            self.estimated_time,
            self.steps.len(),
            tag_preview(&self.tags, CARD_TAG_LIMIT).magenta(),
            self.description,
        )
    }

    fn detail(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}  {}",
            self.title.bold().underline(),
            difficulty_badge(self.difficulty)
        );
        let _ = writeln!(out, "{}  ~{}", self.category.cyan(), self.estimated_time);
        let _ = writeln!(out, "\n{}", self.description);

        if !self.prerequisites.is_empty() {
            let _ = writeln!(out, "\n{}", "Prerequisites".bold());
            for item in &self.prerequisites {
                let _ = writeln!(out, "  - {}", item);
            }
        }
        if !self.warnings.is_empty() {
            let _ = writeln!(out, "\n{}", "Important Warnings".bold().red());
            for item in &self.warnings {
                let _ = writeln!(out, "  ! {}", item.yellow());
            }
        }

        let _ = writeln!(out, "\n{}", "Step-by-Step Guide".bold());
        for step in &self.steps {
            let _ = writeln!(out, "\n  {}. {}", step.step_number, step.title.bold());
            let _ = writeln!(out, "     {}", step.command.green());
            let _ = writeln!(out, "     {}", step.description);
            let _ = writeln!(out, "     {} {}", "Explanation:".dimmed(), step.explanation);
        }

        if !self.related_commands.is_empty() {
            let _ = writeln!(out, "\n{}", "Related Commands".bold());
            let _ = writeln!(out, "  {}", self.related_commands.join("  ").green());
        }
        if !self.tags.is_empty() {
            let _ = writeln!(out, "\n{}", "Tags".bold());
            let _ = writeln!(out, "  {}", tag_preview(&self.tags, self.tags.len()).magenta());
        }
        out
    }

    fn copy_target(&self, step: Option<u32>) -> Option<&str> {
        self.step(step?).map(|s| s.command.as_str())
    }
}

/// One row of filter controls: `All (N)` followed by each value, with the
/// current choice highlighted.
pub fn facet_row(label: &str, all_label: &str, values: &[String], current: &FacetChoice) -> String {
    let mark = |text: &str, active: bool| {
        if active {
            format!("[{}]", text).reversed().to_string()
        } else {
            format!("[{}]", text)
        }
    };

    let mut parts = vec![mark(all_label, current.is_all())];
    parts.extend(values.iter().map(|v| mark(v, current.as_str() == v && !current.is_all())));
    format!("{} {}", label.bold(), parts.join(" "))
}

pub fn category_row(facets: &Facets, current: &FacetChoice) -> String {
    facet_row(
        "Filter by category:",
        &facets.all_categories_label(),
        &facets.categories,
        current,
    )
}

pub fn difficulty_row(facets: &Facets, current: &FacetChoice) -> String {
    facet_row("Difficulty:", "All Levels", &facets.difficulties, current)
}

pub fn empty_state(state: &EmptyState) -> String {
    match &state.hint {
        Some(hint) => format!("{}\n{}", state.message.bold(), hint.dimmed()),
        None => state.message.bold().to_string(),
    }
}
