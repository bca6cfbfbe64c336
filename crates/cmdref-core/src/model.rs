use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the two record pipelines a type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Command,
    Scenario,
}

impl RecordKind {
    pub fn singular(self) -> &'static str {
        match self {
            RecordKind::Command => "command",
            RecordKind::Scenario => "scenario",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            RecordKind::Command => "commands",
            RecordKind::Scenario => "scenarios",
        }
    }
}

/// Shared surface of everything that can live in a [`RecordStore`](crate::RecordStore).
///
/// The filter engine only ever talks to records through this trait, so the set of
/// fields a search term is matched against is decided here, per record type.
pub trait Record {
    const KIND: RecordKind;

    fn id(&self) -> &str;
    fn category(&self) -> &str;

    /// Records without a difficulty pass through the difficulty stage untouched.
    fn difficulty(&self) -> Option<Difficulty> {
        None
    }

    /// Text fields inspected by the search stage.
    fn search_fields(&self) -> impl Iterator<Item = &str>;

    /// False when the record loads fine but is not useful to a reader.
    fn is_complete(&self) -> bool {
        true
    }
}

impl<T: Record> Record for &T {
    const KIND: RecordKind = T::KIND;

    fn id(&self) -> &str {
        (**self).id()
    }

    fn category(&self) -> &str {
        (**self).category()
    }

    fn difficulty(&self) -> Option<Difficulty> {
        (**self).difficulty()
    }

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        (**self).search_fields()
    }

    fn is_complete(&self) -> bool {
        (**self).is_complete()
    }
}

/// A flat reference entry for one CLI command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: String,
    pub title: String,
    pub command: String,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Record for Command {
    const KIND: RecordKind = RecordKind::Command;

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> &str {
        &self.category
    }

    // examples and options are deliberately not searched
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.title.as_str(),
            self.command.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDifficulty(pub String);

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown difficulty '{}' (expected Beginner, Intermediate or Advanced)",
            self.0
        )
    }
}

impl std::error::Error for UnknownDifficulty {}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

/// One step of a [`Scenario`]. `step_number` is display metadata only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(alias = "stepNumber")]
    pub step_number: u32,
    pub title: String,
    pub command: String,
    pub description: String,
    pub explanation: String,
}

/// A multi-step guide walking through a task with several commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(alias = "estimatedTime")]
    pub estimated_time: String,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default, alias = "relatedCommands")]
    pub related_commands: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Scenario {
    pub fn step(&self, step_number: u32) -> Option<&Step> {
        self.steps.iter().find(|s| s.step_number == step_number)
    }
}

impl Record for Scenario {
    const KIND: RecordKind = RecordKind::Scenario;

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn difficulty(&self) -> Option<Difficulty> {
        Some(self.difficulty)
    }

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ]
        .into_iter()
        .chain(self.tags.iter().map(String::as_str))
        .chain(self.steps.iter().flat_map(|step| {
            [
                step.title.as_str(),
                step.description.as_str(),
                step.command.as_str(),
            ]
        }))
    }

    fn is_complete(&self) -> bool {
        !self.steps.is_empty()
    }
}
