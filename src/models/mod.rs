//! Data models for floors, equipment and utilization

pub mod enums;
pub mod equipment_type;
pub mod floor;
pub mod floor_segment;
pub mod report;
pub mod utilization;

use validator::ValidationError;

/// Length check on the name as it will be stored (surrounding whitespace dropped)
pub(crate) fn trimmed_length(
    value: &str,
    max: usize,
    message: &'static str,
) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len == 0 || len > max {
        return Err(ValidationError::new("length").with_message(message.into()));
    }
    Ok(())
}

// Re-export commonly used types
pub use enums::{EquipmentCategory, OwnershipType};
pub use equipment_type::EquipmentType;
pub use floor::Floor;
pub use floor_segment::{FloorSegment, SegmentInput};
pub use report::{ActiveFilter, HistoryFilter, HistorySort, RecordQuery};
pub use utilization::{UtilizationRecord, UtilizationView};
