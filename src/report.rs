//! Text snapshots of the entity collection.

use crate::entity::Entity;

/// Significant digits used when none are requested, as in the default
/// precision of a C++ output stream.
pub const DEFAULT_DIGITS: usize = 6;

/// Separator between entities on one report line.
const SEPARATOR: &str = "  ";

/// Renders one entity as `p<x>,<y>, v<speed>∠<angle>` with the angle in degrees.
pub fn format_entity(entity: &Entity, digits: usize) -> String {
    format!(
        "p{},{}, v{}∠{}",
        entity.x.to_general(digits),
        entity.y.to_general(digits),
        entity.speed().to_general(digits),
        entity.heading_degrees().to_general(digits),
    )
}

/// Renders every entity in collection order, two spaces apart.
pub fn format_report(entities: &[Entity], digits: usize) -> String {
    entities
        .iter()
        .map(|entity| format_entity(entity, digits))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// When reports are due during a run of `total_steps` steps.
///
/// One report precedes the first step, one follows every step whose
/// zero-based index is a multiple of `interval`, and one follows the last step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportSchedule {
    pub total_steps: usize,
    pub interval: usize,
}

impl ReportSchedule {
    /// Spreads `reports` interior reports over `total_steps` steps.
    pub fn new(total_steps: usize, reports: usize) -> Self {
        let interval = (total_steps / reports.max(1)).max(1);
        Self { total_steps, interval }
    }

    /// Whether a report follows the step with zero-based index `step`.
    pub fn is_due(&self, step: usize) -> bool {
        step % self.interval == 0
    }

    /// Number of report lines a complete run emits.
    pub fn line_count(&self) -> usize {
        2 + self.total_steps.div_ceil(self.interval)
    }
}
