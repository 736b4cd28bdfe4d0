//! Record files: flat key-value text, one TOML table per section.
//!
//! ```toml
//! [general]
//! project_name = "Centre Culturel"
//!
//! [fire]
//! risk_level = "modere"
//! evacuation = ["eclairage_securite", "signaletique_evac"]
//! ```
//!
//! Missing keys load as blank, so a partial file is a valid record.

use crate::error::RecordError;
use crate::model::ProjectRecord;
use tracing::debug;

/// Parse a record. Blank input yields the empty record.
pub fn from_toml(input: &str) -> Result<ProjectRecord, RecordError> {
    if input.trim().is_empty() {
        return Ok(ProjectRecord::default());
    }
    let record: ProjectRecord = toml::from_str(input)?;
    debug!(project = %record.general.project_name, "record loaded");
    Ok(record)
}

pub fn to_toml(record: &ProjectRecord) -> Result<String, RecordError> {
    Ok(toml::to_string_pretty(record)?)
}

/// The empty record, ready to be filled in.
pub fn template() -> Result<String, RecordError> {
    to_toml(&ProjectRecord::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_the_empty_record() {
        assert_eq!(from_toml("").unwrap(), ProjectRecord::default());
        assert_eq!(from_toml("  \n\t").unwrap(), ProjectRecord::default());
    }

    #[test]
    fn partial_file_fills_missing_keys() {
        let record = from_toml(
            "[general]\nproject_name = \"Centre Culturel\"\n\n[fire]\nevacuation = [\"signaletique_evac\", \"eclairage_securite\"]\n",
        )
        .unwrap();
        assert_eq!(record.general.project_name, "Centre Culturel");
        assert!(record.general.owner.is_empty());
        assert!(record.fire.evacuation.contains("eclairage_securite"));
        assert_eq!(record.fire.evacuation.len(), 2);
        assert!(record.accessibility.reception.is_empty());
    }

    #[test]
    fn saved_record_loads_back_unchanged() {
        let mut record = ProjectRecord::default();
        record.general.project_name = "Médiathèque".to_string();
        record.general.program = "Rez-de-chaussée : accueil\nÉtage : salles de lecture".to_string();
        record.fire.risk_level = "eleve".to_string();
        record.accessibility.parking.insert("largeur_330");

        let text = to_toml(&record).unwrap();
        assert!(text.contains("[general]"));
        assert!(text.contains("[accessibility]"));
        assert_eq!(from_toml(&text).unwrap(), record);
    }

    #[test]
    fn template_lists_every_section() {
        let text = template().unwrap();
        assert!(text.contains("[general]"));
        assert!(text.contains("[fire]"));
        assert!(text.contains("[accessibility]"));
        assert!(text.contains("project_name = \"\""));
    }

    #[test]
    fn malformed_input_is_an_error() {
        let err = from_toml("[general\nproject_name = 1").unwrap_err();
        assert!(matches!(err, RecordError::Parse(_)));
    }

    #[test]
    fn wrong_value_type_is_an_error() {
        assert!(from_toml("[fire]\nevacuation = \"alarme_sonore\"\n").is_err());
    }
}
