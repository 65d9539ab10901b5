use serde::{Deserialize, Deserializer, Serialize};

/// Every input of the work-log form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    WorkDescription,
    FilesChanged,
    SolutionApproach,
    TestingDone,
    TestingInstructions,
    BlockersEncountered,
    TimeSpent,
}

impl FieldId {
    pub const COUNT: usize = 7;

    pub const ALL: [FieldId; Self::COUNT] = [
        FieldId::WorkDescription,
        FieldId::FilesChanged,
        FieldId::SolutionApproach,
        FieldId::TestingDone,
        FieldId::TestingInstructions,
        FieldId::BlockersEncountered,
        FieldId::TimeSpent,
    ];

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Form/wire name of the field.
    pub fn id(self) -> &'static str {
        match self {
            FieldId::WorkDescription => "work_description",
            FieldId::FilesChanged => "files_changed",
            FieldId::SolutionApproach => "solution_approach",
            FieldId::TestingDone => "testing_done",
            FieldId::TestingInstructions => "testing_instructions",
            FieldId::BlockersEncountered => "blockers_encountered",
            FieldId::TimeSpent => "time_spent",
        }
    }

    /// Human label used in validation messages: the id with underscores as spaces.
    pub fn label(self) -> String {
        self.id().replace('_', " ")
    }

    pub fn title(self) -> &'static str {
        match self {
            FieldId::WorkDescription => "Work Description",
            FieldId::FilesChanged => "Files Changed",
            FieldId::SolutionApproach => "Solution Approach",
            FieldId::TestingDone => "Testing Done",
            FieldId::TestingInstructions => "Testing Instructions",
            FieldId::BlockersEncountered => "Blockers Encountered (optional)",
            FieldId::TimeSpent => "Time Spent (hours)",
        }
    }

    pub fn is_multiline(self) -> bool {
        self != FieldId::TimeSpent
    }

    pub fn next(self) -> FieldId {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> FieldId {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Raw snapshot of the work-log form. Also the persisted draft shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkLogValues {
    #[serde(deserialize_with = "null_as_empty")]
    pub work_description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub files_changed: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub solution_approach: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub testing_done: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub testing_instructions: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub blockers_encountered: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub time_spent: String,
}

/// Drafts written by other clients may store cleared fields as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl WorkLogValues {
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::WorkDescription => &self.work_description,
            FieldId::FilesChanged => &self.files_changed,
            FieldId::SolutionApproach => &self.solution_approach,
            FieldId::TestingDone => &self.testing_done,
            FieldId::TestingInstructions => &self.testing_instructions,
            FieldId::BlockersEncountered => &self.blockers_encountered,
            FieldId::TimeSpent => &self.time_spent,
        }
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let slot = match field {
            FieldId::WorkDescription => &mut self.work_description,
            FieldId::FilesChanged => &mut self.files_changed,
            FieldId::SolutionApproach => &mut self.solution_approach,
            FieldId::TestingDone => &mut self.testing_done,
            FieldId::TestingInstructions => &mut self.testing_instructions,
            FieldId::BlockersEncountered => &mut self.blockers_encountered,
            FieldId::TimeSpent => &mut self.time_spent,
        };
        *slot = value.into();
    }
}
