//! Record lens — field table plus update operations keyed by `section.field`.
//!
//! Each record field is declared once in [`fields`], with its display label
//! and kind; [`FIELDS`] lists them all. Edits address fields through a
//! [`FieldPath`], the notice generator lays out the statics directly.

use crate::catalog::CatalogId;
use crate::error::RecordError;
use crate::model::{Accessibility, FireSafety, General, ProjectRecord};
use crate::selection::Selection;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    General,
    Fire,
    Accessibility,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::General, Section::Fire, Section::Accessibility];

    pub fn key(self) -> &'static str {
        match self {
            Section::General => "general",
            Section::Fire => "fire",
            Section::Accessibility => "accessibility",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.key() == s)
            .ok_or_else(|| RecordError::UnknownSection(s.to_string()))
    }
}

/// How a field stores its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// One code from a closed enumeration, stored as a string.
    Choice(CatalogId),
    /// A set of codes from a catalog.
    Multi(CatalogId),
}

impl FieldKind {
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Choice(_) => "choice",
            FieldKind::Multi(_) => "multi-select",
        }
    }

    pub fn catalog(self) -> Option<CatalogId> {
        match self {
            FieldKind::Text => None,
            FieldKind::Choice(id) | FieldKind::Multi(id) => Some(id),
        }
    }
}

#[derive(Debug)]
pub struct FieldSpec {
    pub section: Section,
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Dotted path, e.g. `fire.evacuation`.
    pub fn path(&self) -> String {
        format!("{}.{}", self.section.key(), self.key)
    }
}

const fn text(section: Section, key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { section, key, label, kind: FieldKind::Text }
}

const fn one_of(
    section: Section,
    key: &'static str,
    label: &'static str,
    catalog: CatalogId,
) -> FieldSpec {
    FieldSpec { section, key, label, kind: FieldKind::Choice(catalog) }
}

const fn many_of(
    section: Section,
    key: &'static str,
    label: &'static str,
    catalog: CatalogId,
) -> FieldSpec {
    FieldSpec { section, key, label, kind: FieldKind::Multi(catalog) }
}

/// One static per record field, so layouts can refer to fields by value.
pub mod fields {
    use super::{many_of, one_of, text, FieldSpec};
    use crate::catalog::CatalogId;
    use crate::lens::Section::{Accessibility as A, Fire as F, General as G};

    pub static PROJECT_NAME: FieldSpec = text(G, "project_name", "Nom du projet");
    pub static OWNER: FieldSpec = text(G, "owner", "Maître d'ouvrage");
    pub static ADDRESS: FieldSpec = text(G, "address", "Adresse de l'opération");
    pub static DESIGN_TEAM: FieldSpec = text(G, "design_team", "Architecte / MOE");
    pub static DRAFTING_DATE: FieldSpec = text(G, "drafting_date", "Date de rédaction");
    pub static PROGRAM: FieldSpec = text(G, "program", "Programme et description");
    pub static ESTABLISHMENT_TYPE: FieldSpec =
        one_of(G, "establishment_type", "Type d'ERP", CatalogId::EstablishmentType);
    pub static ESTABLISHMENT_CATEGORY: FieldSpec =
        one_of(G, "establishment_category", "Catégorie d'ERP", CatalogId::EstablishmentCategory);
    pub static FLOOR_AREA: FieldSpec = text(G, "floor_area", "Surface totale");
    pub static BUILDING_HEIGHT: FieldSpec = text(G, "building_height", "Hauteur du bâtiment");
    pub static OCCUPANT_LOAD: FieldSpec = text(G, "occupant_load", "Effectif pris en compte");
    pub static ENVIRONMENT: FieldSpec = text(G, "environment", "Environnement urbain");
    pub static REMARKS: FieldSpec = text(G, "remarks", "Observations complémentaires");

    pub static RISK_LEVEL: FieldSpec =
        one_of(F, "risk_level", "Niveau de risque retenu", CatalogId::RiskLevel);
    pub static ALARM_SYSTEM_TYPE: FieldSpec =
        one_of(F, "alarm_system_type", "Type de SSI", CatalogId::AlarmSystemType);
    pub static ALARM_SYSTEM_CATEGORY: FieldSpec =
        one_of(F, "alarm_system_category", "Catégorie SSI", CatalogId::AlarmSystemCategory);
    pub static MATERIAL_REACTION: FieldSpec =
        text(F, "material_reaction", "Réaction au feu des matériaux");
    pub static STRUCTURAL_RESISTANCE: FieldSpec =
        text(F, "structural_resistance", "Résistance au feu de la structure");
    pub static EVACUATION: FieldSpec =
        many_of(F, "evacuation", "Moyens d'évacuation", CatalogId::Evacuation);
    pub static SUPPRESSION: FieldSpec =
        many_of(F, "suppression", "Moyens d'extinction", CatalogId::Suppression);
    pub static DETECTION: FieldSpec =
        many_of(F, "detection", "Détection et alarme", CatalogId::Detection);
    pub static COMPARTMENTATION: FieldSpec =
        many_of(F, "compartmentation", "Compartimentage", CatalogId::Compartmentation);
    pub static SMOKE_EXTRACTION: FieldSpec =
        many_of(F, "smoke_extraction", "Désenfumage", CatalogId::SmokeExtraction);
    pub static EMERGENCY_ACCESS: FieldSpec =
        text(F, "emergency_access", "Accès des services de secours");
    pub static EMERGENCY_ORGANIZATION: FieldSpec =
        text(F, "emergency_organization", "Organisation interne des secours");
    pub static SUPPLEMENTARY_MEASURES: FieldSpec =
        text(F, "supplementary_measures", "Mesures complémentaires");

    pub static RECEPTION: FieldSpec =
        many_of(A, "reception", "Accueil du public", CatalogId::Reception);
    pub static HORIZONTAL_CIRCULATION: FieldSpec = many_of(
        A,
        "horizontal_circulation",
        "Cheminements horizontaux",
        CatalogId::HorizontalCirculation,
    );
    pub static VERTICAL_CIRCULATION: FieldSpec = many_of(
        A,
        "vertical_circulation",
        "Cheminements verticaux",
        CatalogId::VerticalCirculation,
    );
    pub static SANITARY: FieldSpec = many_of(A, "sanitary", "Sanitaires", CatalogId::Sanitary);
    pub static PARKING: FieldSpec = many_of(A, "parking", "Stationnement", CatalogId::Parking);
    pub static SIGNAGE: FieldSpec = many_of(A, "signage", "Signalétique", CatalogId::Signage);
    pub static COMFORT: FieldSpec = many_of(A, "comfort", "Confort d'usage", CatalogId::Comfort);
    pub static MANAGEMENT: FieldSpec = text(A, "management", "Gestion et suivi");
    pub static SPECIFIC_ARRANGEMENTS: FieldSpec =
        text(A, "specific_arrangements", "Aménagements spécifiques");
}

use fields::*;

/// Every record field, in declaration order.
pub static FIELDS: &[&FieldSpec] = &[
    &PROJECT_NAME,
    &OWNER,
    &ADDRESS,
    &DESIGN_TEAM,
    &DRAFTING_DATE,
    &PROGRAM,
    &ESTABLISHMENT_TYPE,
    &ESTABLISHMENT_CATEGORY,
    &FLOOR_AREA,
    &BUILDING_HEIGHT,
    &OCCUPANT_LOAD,
    &ENVIRONMENT,
    &REMARKS,
    &RISK_LEVEL,
    &ALARM_SYSTEM_TYPE,
    &ALARM_SYSTEM_CATEGORY,
    &MATERIAL_REACTION,
    &STRUCTURAL_RESISTANCE,
    &EVACUATION,
    &SUPPRESSION,
    &DETECTION,
    &COMPARTMENTATION,
    &SMOKE_EXTRACTION,
    &EMERGENCY_ACCESS,
    &EMERGENCY_ORGANIZATION,
    &SUPPLEMENTARY_MEASURES,
    &RECEPTION,
    &HORIZONTAL_CIRCULATION,
    &VERTICAL_CIRCULATION,
    &SANITARY,
    &PARKING,
    &SIGNAGE,
    &COMFORT,
    &MANAGEMENT,
    &SPECIFIC_ARRANGEMENTS,
];

/// Find the field `key` of `section`.
pub fn field(section: Section, key: &str) -> Result<&'static FieldSpec, RecordError> {
    FIELDS
        .iter()
        .copied()
        .find(|spec| spec.section == section && spec.key == key)
        .ok_or_else(|| RecordError::UnknownField {
            section: section.key().to_string(),
            field: key.to_string(),
        })
}

/// A resolved `section.field` path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath {
    pub section: Section,
    pub spec: &'static FieldSpec,
}

impl FieldPath {
    /// Resolve a dotted path such as `fire.evacuation`.
    pub fn parse(path: &str) -> Result<Self, RecordError> {
        let (section, key) = path
            .split_once('.')
            .ok_or_else(|| RecordError::MalformedPath(path.to_string()))?;
        let section: Section = section.parse()?;
        Ok(Self { section, spec: field(section, key)? })
    }
}

impl From<&'static FieldSpec> for FieldPath {
    fn from(spec: &'static FieldSpec) -> Self {
        Self { section: spec.section, spec }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.spec.key)
    }
}

impl FromStr for FieldPath {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A code that its catalog does not define, found while checking a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedCode {
    pub path: FieldPath,
    pub catalog: CatalogId,
    pub code: String,
}

impl UnresolvedCode {
    pub fn into_error(self) -> RecordError {
        RecordError::UnknownCode {
            path: self.path.to_string(),
            catalog: self.catalog,
            code: self.code,
        }
    }
}

impl PartialEq for FieldSpec {
    fn eq(&self, other: &Self) -> bool {
        self.section == other.section && self.key == other.key
    }
}

impl Eq for FieldSpec {}

// -- Record access ------------------------------------------------------------

enum Slot<'a> {
    Text(&'a String),
    Multi(&'a Selection),
}

enum SlotMut<'a> {
    Text(&'a mut String),
    Multi(&'a mut Selection),
}

impl ProjectRecord {
    /// Text or enumeration code at `path`.
    pub fn text(&self, path: &str) -> Result<&str, RecordError> {
        let spec = FieldPath::parse(path)?.spec;
        self.text_of(spec).ok_or_else(|| wrong_kind(spec, "text"))
    }

    /// Selection at `path`.
    pub fn selection(&self, path: &str) -> Result<&Selection, RecordError> {
        let spec = FieldPath::parse(path)?.spec;
        self.selection_of(spec).ok_or_else(|| wrong_kind(spec, "multi-select"))
    }

    /// Text or enumeration code stored in `spec`; `None` for multi-selects.
    pub(crate) fn text_of(&self, spec: &FieldSpec) -> Option<&str> {
        match self.slot(spec)? {
            Slot::Text(value) => Some(value.as_str()),
            Slot::Multi(_) => None,
        }
    }

    /// Selection stored in `spec`; `None` for text and enumeration fields.
    pub(crate) fn selection_of(&self, spec: &FieldSpec) -> Option<&Selection> {
        match self.slot(spec)? {
            Slot::Multi(selection) => Some(selection),
            Slot::Text(_) => None,
        }
    }

    /// Set a text or enumeration field.
    ///
    /// Enumeration codes are stored as given; [`ProjectRecord::unresolved_codes`]
    /// reports the ones the catalog does not define.
    pub fn set_text(&mut self, path: &str, value: impl Into<String>) -> Result<(), RecordError> {
        let spec = FieldPath::parse(path)?.spec;
        let slot = self.text_slot_mut(spec)?;
        *slot = value.into();
        debug!(field = path, "field updated");
        Ok(())
    }

    /// Flip `code` in a multi-select field. Returns whether it is now selected.
    pub fn toggle(&mut self, path: &str, code: &str) -> Result<bool, RecordError> {
        let selected = self.selection_slot_mut(path)?.toggle(code);
        debug!(field = path, code, selected, "option toggled");
        Ok(selected)
    }

    /// Add `code` to a multi-select field. Returns `false` if already present.
    pub fn select(&mut self, path: &str, code: &str) -> Result<bool, RecordError> {
        Ok(self.selection_slot_mut(path)?.insert(code))
    }

    /// Remove `code` from a multi-select field. Returns `false` if absent.
    pub fn deselect(&mut self, path: &str, code: &str) -> Result<bool, RecordError> {
        Ok(self.selection_slot_mut(path)?.remove(code))
    }

    /// Every stored code its catalog does not define, in field order.
    ///
    /// Blank enumeration values mean "unanswered" and are not reported.
    pub fn unresolved_codes(&self) -> Vec<UnresolvedCode> {
        let mut unresolved = Vec::new();
        for &spec in FIELDS {
            match spec.kind {
                FieldKind::Text => {}
                FieldKind::Choice(id) => {
                    if let Some(code) = self.text_of(spec) {
                        if !code.trim().is_empty() && !id.catalog().contains(code) {
                            unresolved.push(UnresolvedCode {
                                path: spec.into(),
                                catalog: id,
                                code: code.to_string(),
                            });
                        }
                    }
                }
                FieldKind::Multi(id) => {
                    if let Some(selection) = self.selection_of(spec) {
                        for code in selection.unknown_in(id.catalog()) {
                            unresolved.push(UnresolvedCode {
                                path: spec.into(),
                                catalog: id,
                                code: code.to_string(),
                            });
                        }
                    }
                }
            }
        }
        unresolved
    }

    /// Fail on the first code its catalog does not define.
    pub fn check_codes(&self) -> Result<(), RecordError> {
        match self.unresolved_codes().into_iter().next() {
            Some(unresolved) => Err(unresolved.into_error()),
            None => Ok(()),
        }
    }

    fn selection_slot_mut(&mut self, path: &str) -> Result<&mut Selection, RecordError> {
        let spec = FieldPath::parse(path)?.spec;
        match self.slot_mut(spec) {
            Some(SlotMut::Multi(selection)) => Ok(selection),
            _ => Err(wrong_kind(spec, "multi-select")),
        }
    }

    fn text_slot_mut(&mut self, spec: &FieldSpec) -> Result<&mut String, RecordError> {
        match self.slot_mut(spec) {
            Some(SlotMut::Text(value)) => Ok(value),
            _ => Err(wrong_kind(spec, "text")),
        }
    }

    fn slot(&self, spec: &FieldSpec) -> Option<Slot<'_>> {
        match spec.section {
            Section::General => self.general.slot(spec.key),
            Section::Fire => self.fire.slot(spec.key),
            Section::Accessibility => self.accessibility.slot(spec.key),
        }
    }

    fn slot_mut(&mut self, spec: &FieldSpec) -> Option<SlotMut<'_>> {
        match spec.section {
            Section::General => self.general.slot_mut(spec.key),
            Section::Fire => self.fire.slot_mut(spec.key),
            Section::Accessibility => self.accessibility.slot_mut(spec.key),
        }
    }
}

fn wrong_kind(spec: &FieldSpec, expected: &'static str) -> RecordError {
    RecordError::WrongKind {
        path: spec.path(),
        expected,
        actual: spec.kind.name(),
    }
}

impl General {
    fn slot(&self, key: &str) -> Option<Slot<'_>> {
        let value = match key {
            "project_name" => &self.project_name,
            "owner" => &self.owner,
            "address" => &self.address,
            "design_team" => &self.design_team,
            "drafting_date" => &self.drafting_date,
            "program" => &self.program,
            "establishment_type" => &self.establishment_type,
            "establishment_category" => &self.establishment_category,
            "floor_area" => &self.floor_area,
            "building_height" => &self.building_height,
            "occupant_load" => &self.occupant_load,
            "environment" => &self.environment,
            "remarks" => &self.remarks,
            _ => return None,
        };
        Some(Slot::Text(value))
    }

    fn slot_mut(&mut self, key: &str) -> Option<SlotMut<'_>> {
        let value = match key {
            "project_name" => &mut self.project_name,
            "owner" => &mut self.owner,
            "address" => &mut self.address,
            "design_team" => &mut self.design_team,
            "drafting_date" => &mut self.drafting_date,
            "program" => &mut self.program,
            "establishment_type" => &mut self.establishment_type,
            "establishment_category" => &mut self.establishment_category,
            "floor_area" => &mut self.floor_area,
            "building_height" => &mut self.building_height,
            "occupant_load" => &mut self.occupant_load,
            "environment" => &mut self.environment,
            "remarks" => &mut self.remarks,
            _ => return None,
        };
        Some(SlotMut::Text(value))
    }
}

impl FireSafety {
    fn slot(&self, key: &str) -> Option<Slot<'_>> {
        Some(match key {
            "risk_level" => Slot::Text(&self.risk_level),
            "alarm_system_type" => Slot::Text(&self.alarm_system_type),
            "alarm_system_category" => Slot::Text(&self.alarm_system_category),
            "material_reaction" => Slot::Text(&self.material_reaction),
            "structural_resistance" => Slot::Text(&self.structural_resistance),
            "evacuation" => Slot::Multi(&self.evacuation),
            "suppression" => Slot::Multi(&self.suppression),
            "detection" => Slot::Multi(&self.detection),
            "compartmentation" => Slot::Multi(&self.compartmentation),
            "smoke_extraction" => Slot::Multi(&self.smoke_extraction),
            "emergency_access" => Slot::Text(&self.emergency_access),
            "emergency_organization" => Slot::Text(&self.emergency_organization),
            "supplementary_measures" => Slot::Text(&self.supplementary_measures),
            _ => return None,
        })
    }

    fn slot_mut(&mut self, key: &str) -> Option<SlotMut<'_>> {
        Some(match key {
            "risk_level" => SlotMut::Text(&mut self.risk_level),
            "alarm_system_type" => SlotMut::Text(&mut self.alarm_system_type),
            "alarm_system_category" => SlotMut::Text(&mut self.alarm_system_category),
            "material_reaction" => SlotMut::Text(&mut self.material_reaction),
            "structural_resistance" => SlotMut::Text(&mut self.structural_resistance),
            "evacuation" => SlotMut::Multi(&mut self.evacuation),
            "suppression" => SlotMut::Multi(&mut self.suppression),
            "detection" => SlotMut::Multi(&mut self.detection),
            "compartmentation" => SlotMut::Multi(&mut self.compartmentation),
            "smoke_extraction" => SlotMut::Multi(&mut self.smoke_extraction),
            "emergency_access" => SlotMut::Text(&mut self.emergency_access),
            "emergency_organization" => SlotMut::Text(&mut self.emergency_organization),
            "supplementary_measures" => SlotMut::Text(&mut self.supplementary_measures),
            _ => return None,
        })
    }
}

impl Accessibility {
    fn slot(&self, key: &str) -> Option<Slot<'_>> {
        Some(match key {
            "reception" => Slot::Multi(&self.reception),
            "horizontal_circulation" => Slot::Multi(&self.horizontal_circulation),
            "vertical_circulation" => Slot::Multi(&self.vertical_circulation),
            "sanitary" => Slot::Multi(&self.sanitary),
            "parking" => Slot::Multi(&self.parking),
            "signage" => Slot::Multi(&self.signage),
            "comfort" => Slot::Multi(&self.comfort),
            "management" => Slot::Text(&self.management),
            "specific_arrangements" => Slot::Text(&self.specific_arrangements),
            _ => return None,
        })
    }

    fn slot_mut(&mut self, key: &str) -> Option<SlotMut<'_>> {
        Some(match key {
            "reception" => SlotMut::Multi(&mut self.reception),
            "horizontal_circulation" => SlotMut::Multi(&mut self.horizontal_circulation),
            "vertical_circulation" => SlotMut::Multi(&mut self.vertical_circulation),
            "sanitary" => SlotMut::Multi(&mut self.sanitary),
            "parking" => SlotMut::Multi(&mut self.parking),
            "signage" => SlotMut::Multi(&mut self.signage),
            "comfort" => SlotMut::Multi(&mut self.comfort),
            "management" => SlotMut::Text(&mut self.management),
            "specific_arrangements" => SlotMut::Text(&mut self.specific_arrangements),
            _ => return None,
        })
    }
}
