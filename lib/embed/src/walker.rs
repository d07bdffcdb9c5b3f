//! Field path extraction
//!
//! Walks the known substructures of an agent card and yields one
//! `(path, text)` pair per embeddable field. Per skill the sub-fields come
//! first, followed by the combined `skills[i]` pair; extensions follow the
//! same pattern. Anything absent or flattening to an empty string is skipped.

use crate::flatten::flatten;
use crate::path::{CardField, ExtensionField, FieldPath, SkillField};
use serde_json::Value;
use std::iter;

/// Key of the skill sequence on an agent card
pub const SKILLS_KEY: &str = "skills";

/// JSON pointer to the extension sequence on an agent card
pub const EXTENSIONS_POINTER: &str = "/capabilities/extensions";

/// One extracted field, ready to be embedded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldText {
    pub path: FieldPath,
    pub text: String,
}

/// Lazy, order-preserving iterator over the embeddable fields of a document
pub struct FieldPathWalker<'a> {
    inner: Box<dyn Iterator<Item = FieldText> + 'a>,
}

impl<'a> FieldPathWalker<'a> {
    pub fn new(document: &'a Value) -> Self {
        let card = CardField::ALL
            .into_iter()
            .filter_map(move |field| emit(FieldPath::Card(field), document.get(field.key())));

        let skills = sequence(document.get(SKILLS_KEY))
            .enumerate()
            .flat_map(|(index, skill)| skill_fields(index, skill));

        let extensions = sequence(document.pointer(EXTENSIONS_POINTER))
            .enumerate()
            .flat_map(|(index, extension)| extension_fields(index, extension));

        Self {
            inner: Box::new(card.chain(skills).chain(extensions)),
        }
    }
}

impl Iterator for FieldPathWalker<'_> {
    type Item = FieldText;

    fn next(&mut self) -> Option<FieldText> {
        self.inner.next()
    }
}

impl std::fmt::Debug for FieldPathWalker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldPathWalker").finish_non_exhaustive()
    }
}

/// Resolve the identity of a document.
///
/// Strings are taken verbatim, other scalars use their flattened text and a
/// missing or composite identity field yields an empty string.
pub fn document_identifier(document: &Value, id_field: &str) -> String {
    match document.get(id_field) {
        Some(Value::String(id)) => id.clone(),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => flatten(value),
        _ => String::new(),
    }
}

fn skill_fields(index: usize, skill: &Value) -> impl Iterator<Item = FieldText> + '_ {
    SkillField::ALL
        .into_iter()
        .map(move |field| (FieldPath::SkillField { index, field }, skill.get(field.key())))
        .chain(iter::once((FieldPath::Skill { index }, Some(skill))))
        .filter_map(|(path, value)| emit(path, value))
}

fn extension_fields(index: usize, extension: &Value) -> impl Iterator<Item = FieldText> + '_ {
    ExtensionField::ALL
        .into_iter()
        .map(move |field| {
            (
                FieldPath::ExtensionField { index, field },
                extension.get(field.key()),
            )
        })
        .chain(iter::once((FieldPath::Extension { index }, Some(extension))))
        .filter_map(|(path, value)| emit(path, value))
}

fn sequence(value: Option<&Value>) -> std::slice::Iter<'_, Value> {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
}

fn emit(path: FieldPath, value: Option<&Value>) -> Option<FieldText> {
    let text = flatten(value?);
    if text.is_empty() {
        return None;
    }
    Some(FieldText { path, text })
}
