//! Project record — the questionnaire answers for one project.
//!
//! Every field is total: empty string means "unanswered", an empty
//! [`Selection`] means nothing was ticked. Field names double as the
//! persistence keys.

use crate::selection::Selection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRecord {
    pub general: General,
    pub fire: FireSafety,
    pub accessibility: Accessibility,
}

/// Identification of the project and the establishment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct General {
    pub project_name: String,
    pub owner: String,
    pub address: String,
    pub design_team: String,
    /// Free text, typically an ISO date from the form's date picker.
    pub drafting_date: String,
    pub program: String,
    /// Code from the establishment-type catalog.
    pub establishment_type: String,
    /// Code from the establishment-category catalog.
    pub establishment_category: String,
    pub floor_area: String,
    pub building_height: String,
    pub occupant_load: String,
    pub environment: String,
    pub remarks: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireSafety {
    /// `faible`, `modere` or `eleve`; empty until answered.
    pub risk_level: String,
    pub alarm_system_type: String,
    pub alarm_system_category: String,
    pub material_reaction: String,
    pub structural_resistance: String,
    pub evacuation: Selection,
    pub suppression: Selection,
    pub detection: Selection,
    pub compartmentation: Selection,
    pub smoke_extraction: Selection,
    pub emergency_access: String,
    pub emergency_organization: String,
    pub supplementary_measures: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Accessibility {
    pub reception: Selection,
    pub horizontal_circulation: Selection,
    pub vertical_circulation: Selection,
    pub sanitary: Selection,
    pub parking: Selection,
    pub signage: Selection,
    pub comfort: Selection,
    pub management: String,
    pub specific_arrangements: String,
}

impl ProjectRecord {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_blank() {
        let record = ProjectRecord::new();
        assert!(record.general.project_name.is_empty());
        assert!(record.fire.risk_level.is_empty());
        assert!(record.fire.alarm_system_type.is_empty());
        assert!(record.fire.evacuation.is_empty());
        assert!(record.accessibility.comfort.is_empty());
        assert!(record.accessibility.management.is_empty());
    }
}
