use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named group of raw cut lengths, as supplied by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartInput {
    pub name: String,
    pub cuts: Vec<f64>,
}

/// Input: What user provides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutListInput {
    /// Stock board length in whole feet
    pub board_length_ft: f64,
    /// Length reserved at the end of each board for measurement slack, in inches
    pub margin: f64,
    /// Blade width in inches, added to every cut before packing
    pub kerf: f64,
    #[serde(default)]
    pub parts: Vec<PartInput>,
    /// Cuts that belong to no part, used to fill leftover space
    #[serde(default)]
    pub cuts: Vec<f64>,
}

/// A single kerf-padded piece to cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cut {
    pub length: f64,
    /// `None` for ungrouped cuts
    pub part: Option<String>,
}

impl Cut {
    pub fn new(length: f64, part: Option<String>) -> Self {
        Self { length, part }
    }

    pub fn ungrouped(length: f64) -> Self {
        Self { length, part: None }
    }

    pub fn for_part(length: f64, part: impl Into<String>) -> Self {
        Self {
            length,
            part: Some(part.into()),
        }
    }
}

/// Padded cut lengths of one part, or of the miscellaneous pile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartCuts {
    Grouped { name: String, cuts: Vec<f64> },
    Ungrouped { cuts: Vec<f64> },
}

impl PartCuts {
    pub fn name(&self) -> Option<&str> {
        match self {
            PartCuts::Grouped { name, .. } => Some(name),
            PartCuts::Ungrouped { .. } => None,
        }
    }

    pub fn lengths(&self) -> &[f64] {
        match self {
            PartCuts::Grouped { cuts, .. } | PartCuts::Ungrouped { cuts } => cuts,
        }
    }

    /// Builds tagged cuts for the packing engine.
    pub fn to_cuts(&self) -> Vec<Cut> {
        let part = self.name().map(str::to_string);
        self.lengths()
            .iter()
            .map(|&length| Cut::new(length, part.clone()))
            .collect()
    }
}

/// Validated request consumed by the allocation strategies.
///
/// Built by [`CutRequest::from_input`]; every padded cut is guaranteed to fit
/// within `usable_length`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutRequest {
    /// Raw stock length in inches
    pub board_length: f64,
    pub usable_length: f64,
    pub kerf: f64,
    pub parts: Vec<PartCuts>,
}

impl CutRequest {
    /// Named parts in input order.
    pub fn named_parts(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.parts.iter().filter_map(|part| match part {
            PartCuts::Grouped { name, cuts } => Some((name.as_str(), cuts.as_slice())),
            PartCuts::Ungrouped { .. } => None,
        })
    }

    /// Padded lengths of the ungrouped cuts.
    pub fn ungrouped(&self) -> &[f64] {
        self.parts
            .iter()
            .find_map(|part| match part {
                PartCuts::Ungrouped { cuts } => Some(cuts.as_slice()),
                PartCuts::Grouped { .. } => None,
            })
            .unwrap_or(&[])
    }

    /// Every cut of the request, tagged with its part.
    pub fn all_cuts(&self) -> Vec<Cut> {
        self.parts.iter().flat_map(PartCuts::to_cuts).collect()
    }

    pub fn cut_count(&self) -> usize {
        self.parts.iter().map(|p| p.lengths().len()).sum()
    }
}

/// Which allocation strategy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Fewest boards, ignoring parts
    Global,
    /// Keep each part on as few boards as possible
    Grouped,
}

/// A cut as placed on a board, with kerf removed for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedCut {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub part: Option<String>,
    pub length: f64,
    pub padded_length: f64,
}

/// Layout of a single board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardLayout {
    pub board_number: u32,
    pub cuts: Vec<PlacedCut>,
    /// Usable length still free on this board
    pub leftover: f64,
}

/// Summary statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_boards: u32,
    pub total_cuts: u32,
    pub total_length: f64,
    pub used_length: f64,
    pub waste_length: f64,
    pub waste_percentage: f64,
    /// How many distinct boards each named part is spread across
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub boards_per_part: BTreeMap<String, u32>,
}

/// Result of one strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    pub strategy: StrategyKind,
    pub boards: Vec<BoardLayout>,
    pub summary: Summary,
}

/// Output: What the planner returns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutPlan {
    pub board_length: f64,
    pub usable_length: f64,
    pub kerf: f64,
    pub global: Allocation,
    pub grouped: Allocation,
}

/// Error type for cut planning
#[derive(Debug, thiserror::Error)]
pub enum CutlistError {
    #[error("Invalid numeric input: {0}")]
    InvalidNumericInput(String),

    #[error("Duplicate part name '{0}'")]
    DuplicatePartName(String),

    #[error("Invalid part name: {0}")]
    InvalidPartName(String),

    #[error("Cut of {length} in {part} does not fit on a board with {usable} usable")]
    OversizedCut {
        part: String,
        length: f64,
        usable: f64,
    },

    #[error("Invalid cut reached the packing engine: {0}")]
    InvalidCut(String),
}

impl CutlistError {
    /// True for errors the user can fix by editing the input.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, CutlistError::InvalidCut(_))
    }
}

pub type Result<T> = std::result::Result<T, CutlistError>;
