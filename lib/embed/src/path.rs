//! Typed field paths and their `skills[i].name` style rendering

use std::fmt;

/// Top-level scalar fields of an agent card that are embedded on their own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardField {
    Name,
    Description,
}

impl CardField {
    pub const ALL: [CardField; 2] = [CardField::Name, CardField::Description];

    pub fn key(self) -> &'static str {
        match self {
            CardField::Name => "name",
            CardField::Description => "description",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillField {
    Name,
    Description,
    Tags,
    Examples,
}

impl SkillField {
    pub const ALL: [SkillField; 4] = [
        SkillField::Name,
        SkillField::Description,
        SkillField::Tags,
        SkillField::Examples,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SkillField::Name => "name",
            SkillField::Description => "description",
            SkillField::Tags => "tags",
            SkillField::Examples => "examples",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionField {
    Description,
    Params,
}

impl ExtensionField {
    pub const ALL: [ExtensionField; 2] = [ExtensionField::Description, ExtensionField::Params];

    pub fn key(self) -> &'static str {
        match self {
            ExtensionField::Description => "description",
            ExtensionField::Params => "params",
        }
    }
}

/// Address of an embedded field inside an agent card.
///
/// Renders as `name`, `skills[0]`, `skills[0].tags`, `extensions[1].params`
/// and so on; the rendered string is what gets stored on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Card(CardField),
    /// Combined representation of a whole skill
    Skill { index: usize },
    SkillField { index: usize, field: SkillField },
    /// Combined representation of a whole extension
    Extension { index: usize },
    ExtensionField { index: usize, field: ExtensionField },
    Query,
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Card(field) => f.write_str(field.key()),
            FieldPath::Skill { index } => write!(f, "skills[{}]", index),
            FieldPath::SkillField { index, field } => {
                write!(f, "skills[{}].{}", index, field.key())
            }
            FieldPath::Extension { index } => write!(f, "extensions[{}]", index),
            FieldPath::ExtensionField { index, field } => {
                write!(f, "extensions[{}].{}", index, field.key())
            }
            FieldPath::Query => f.write_str(cardvec_core::QUERY_FIELD_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendering() {
        assert_eq!(FieldPath::Card(CardField::Description).to_string(), "description");
        assert_eq!(FieldPath::Skill { index: 2 }.to_string(), "skills[2]");
        assert_eq!(
            FieldPath::SkillField { index: 0, field: SkillField::Examples }.to_string(),
            "skills[0].examples"
        );
        assert_eq!(FieldPath::Extension { index: 1 }.to_string(), "extensions[1]");
        assert_eq!(
            FieldPath::ExtensionField { index: 3, field: ExtensionField::Params }.to_string(),
            "extensions[3].params"
        );
        assert_eq!(FieldPath::Query.to_string(), "query");
    }
}
