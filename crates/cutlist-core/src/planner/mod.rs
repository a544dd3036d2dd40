use crate::bins::Bin;
use crate::types::*;
use tracing::debug;

mod summary;
mod validation;

/// Allocates requested cuts to stock boards with both strategies.
pub struct Planner {
    request: CutRequest,
}

impl Planner {
    /// Validates the input and builds a new planner instance.
    pub fn new(input: CutListInput) -> Result<Self> {
        let request = CutRequest::from_input(&input)?;
        debug!(
            board_length = request.board_length,
            usable_length = request.usable_length,
            cuts = request.cut_count(),
            "validated cut list"
        );
        Ok(Self { request })
    }

    /// Wraps an already validated request.
    pub fn from_request(request: CutRequest) -> Self {
        Self { request }
    }

    pub fn request(&self) -> &CutRequest {
        &self.request
    }

    /// Runs a single strategy and reports its boards.
    pub fn allocate(&self, kind: StrategyKind) -> Result<Allocation> {
        let bins = kind.strategy().solve(&self.request)?;
        let boards = self.build_layouts(&bins);
        let summary = self.calculate_summary(&boards);

        Ok(Allocation {
            strategy: kind,
            boards,
            summary,
        })
    }

    /// Runs the global and grouped strategies on the same request.
    pub fn plan(&self) -> Result<CutPlan> {
        let global = self.allocate(StrategyKind::Global)?;
        let grouped = self.allocate(StrategyKind::Grouped)?;

        Ok(CutPlan {
            board_length: self.request.board_length,
            usable_length: self.request.usable_length,
            kerf: self.request.kerf,
            global,
            grouped,
        })
    }
}
