//! Notice generator — renders a project record as the plain-text notice.
//!
//! Pure and total: the output depends only on the record and the fixed
//! catalogs, and every record (including a fresh one) produces a document.
//! Layout:
//!
//! 1. title block, with the project name
//! 2. `1. IDENTIFICATION DU PROJET`
//! 3. `2. SÉCURITÉ INCENDIE` with its sub-sections
//! 4. `3. ACCESSIBILITÉ` with its sub-sections
//! 5. closing paragraph
//!
//! Headers are always emitted. Each field renders as `<Label> : <value>`,
//! with [`NOT_SPECIFIED`] standing in for anything left blank.

use crate::catalog::label_of;
use crate::lens::fields::*;
use crate::lens::{FieldKind, FieldSpec};
use crate::model::ProjectRecord;
use std::borrow::Cow;

/// Placeholder for blank answers and empty selections.
pub const NOT_SPECIFIED: &str = "Non renseigné";

pub const TITLE: &str = "NOTICE DE SÉCURITÉ INCENDIE ET D'ACCESSIBILITÉ";

/// Separator between the labels of a multi-select field.
pub const LIST_SEPARATOR: &str = "; ";

const CLOSING: &str = "Les annexes graphiques (plans, schémas SSI, tableaux de surfaces) \
sont jointes séparément à la présente notice.";

/// A numbered part of the notice.
struct Part {
    heading: &'static str,
    blocks: &'static [Block],
}

/// A group of fields under an optional sub-heading.
struct Block {
    heading: Option<&'static str>,
    fields: &'static [&'static FieldSpec],
}

static PARTS: &[Part] = &[
    Part {
        heading: "1. IDENTIFICATION DU PROJET",
        blocks: &[Block {
            heading: None,
            fields: &[
                &PROJECT_NAME,
                &OWNER,
                &ADDRESS,
                &DESIGN_TEAM,
                &DRAFTING_DATE,
                &ESTABLISHMENT_TYPE,
                &ESTABLISHMENT_CATEGORY,
                &FLOOR_AREA,
                &BUILDING_HEIGHT,
                &OCCUPANT_LOAD,
                &PROGRAM,
                &ENVIRONMENT,
                &REMARKS,
            ],
        }],
    },
    Part {
        heading: "2. SÉCURITÉ INCENDIE",
        blocks: &[
            Block {
                heading: Some("2.1 Classement"),
                fields: &[&RISK_LEVEL, &ALARM_SYSTEM_TYPE, &ALARM_SYSTEM_CATEGORY],
            },
            Block {
                heading: Some("2.2 Comportement au feu"),
                fields: &[&MATERIAL_REACTION, &STRUCTURAL_RESISTANCE],
            },
            Block {
                heading: Some("2.3 Évacuation"),
                fields: &[&EVACUATION],
            },
            Block {
                heading: Some("2.4 Moyens de secours"),
                fields: &[&SUPPRESSION, &DETECTION],
            },
            Block {
                heading: Some("2.5 Compartimentage et désenfumage"),
                fields: &[&COMPARTMENTATION, &SMOKE_EXTRACTION],
            },
            Block {
                heading: Some("2.6 Intervention et organisation"),
                fields: &[
                    &EMERGENCY_ACCESS,
                    &EMERGENCY_ORGANIZATION,
                    &SUPPLEMENTARY_MEASURES,
                ],
            },
        ],
    },
    Part {
        heading: "3. ACCESSIBILITÉ",
        blocks: &[
            Block {
                heading: Some("3.1 Accueil du public"),
                fields: &[&RECEPTION],
            },
            Block {
                heading: Some("3.2 Cheminements"),
                fields: &[&HORIZONTAL_CIRCULATION, &VERTICAL_CIRCULATION],
            },
            Block {
                heading: Some("3.3 Sanitaires"),
                fields: &[&SANITARY],
            },
            Block {
                heading: Some("3.4 Stationnement"),
                fields: &[&PARKING],
            },
            Block {
                heading: Some("3.5 Signalétique et confort d'usage"),
                fields: &[&SIGNAGE, &COMFORT],
            },
            Block {
                heading: Some("3.6 Gestion et suivi"),
                fields: &[&MANAGEMENT, &SPECIFIC_ARRANGEMENTS],
            },
        ],
    },
];

/// Generate the notice for `record`.
pub fn generate(record: &ProjectRecord) -> String {
    let mut lines: Vec<String> = Vec::new();

    push_heading(&mut lines, TITLE, '=');
    lines.push(render_field(record, &PROJECT_NAME));
    lines.push(String::new());

    for part in PARTS {
        push_heading(&mut lines, part.heading, '-');
        for block in part.blocks {
            if let Some(heading) = block.heading {
                lines.push(String::new());
                lines.push(heading.to_string());
            }
            for spec in block.fields {
                lines.push(render_field(record, spec));
            }
        }
        lines.push(String::new());
    }

    lines.push(CLOSING.to_string());

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// Render one field as `<Label> : <value>`.
pub fn render_field(record: &ProjectRecord, spec: &FieldSpec) -> String {
    let value = field_value(record, spec);
    format!("{} : {}", spec.label, value.as_deref().unwrap_or(NOT_SPECIFIED))
}

/// Display value of a field, or `None` when it is blank.
fn field_value<'a>(record: &'a ProjectRecord, spec: &FieldSpec) -> Option<Cow<'a, str>> {
    match spec.kind {
        FieldKind::Text => record.text_of(spec).filter(|v| !is_blank(v)).map(Cow::Borrowed),
        FieldKind::Choice(id) => record
            .text_of(spec)
            .filter(|v| !is_blank(v))
            .map(|code| Cow::Borrowed(label_of(id, code))),
        FieldKind::Multi(id) => record
            .selection_of(spec)
            .filter(|selection| !selection.is_empty())
            .map(|selection| Cow::Owned(selection.labels_in(id.catalog()).join(LIST_SEPARATOR))),
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Push `text` followed by an underline of the same width.
fn push_heading(lines: &mut Vec<String>, text: &str, underline: char) {
    lines.push(text.to_string());
    lines.push(underline.to_string().repeat(text.chars().count()));
}
