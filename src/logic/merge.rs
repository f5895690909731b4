use std::collections::HashSet;

use indexmap::map::Entry;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::model::{
    Document, ExampleObject, Operation, ResponseContent, SchemaNode, SchemaType, APPLICATION_JSON,
};

/// Fold one staged Operation into the persisted document. Pure: takes the
/// loaded document, returns the merged one, so every branch is unit
/// testable in isolation.
///
/// Branch order: new path, new method on an existing path, then field-level
/// reconciliation (responses, parameters, request body run independently).
/// The canonicalization pass runs on every write regardless of branch.
pub fn fold(mut document: Document, path: &str, method: &str, staged: &Operation) -> Document {
    let operations = document.paths.entry(path.to_string()).or_default();
    match operations.entry(method.to_string()) {
        // New path, or a new method on a known path: the staged operation
        // goes in wholesale: parameters, request body and a responses map
        // holding only the just-observed status.
        Entry::Vacant(slot) => {
            slot.insert(staged.clone());
        }
        Entry::Occupied(mut slot) => {
            let existing = slot.get_mut();
            reconcile_responses(existing, staged);
            reconcile_parameters(existing, staged);
            reconcile_request_body(existing, staged);
        }
    }

    if let Some(operation) = operations.get_mut(method) {
        canonicalize(operation);
    }
    document
}

/// Status-level reconciliation. An unseen status is inserted wholesale; a
/// known status gains a new `example-N` entry only when the observed value
/// differs from every example already recorded, which makes replaying an
/// identical exchange a no-op.
pub fn reconcile_responses(existing: &mut Operation, staged: &Operation) {
    for (status, staged_entry) in &staged.responses {
        let entry = match existing.responses.entry(status.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(staged_entry.clone());
                continue;
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };
        let Some(staged_content) = staged_entry.content.get(APPLICATION_JSON) else {
            continue;
        };
        let Some(observed) = staged_content.examples.values().next() else {
            continue;
        };
        let content = entry
            .content
            .entry(APPLICATION_JSON.to_string())
            .or_insert_with(|| ResponseContent {
                schema: SchemaNode::scalar(SchemaType::Object),
                examples: IndexMap::new(),
            });
        let already_recorded = content
            .examples
            .values()
            .any(|example| example.value == observed.value);
        if !already_recorded {
            let name = next_example_name(&content.examples);
            content.examples.insert(name, observed.clone());
        }
    }
}

/// Parameter union. Identity is the name alone; location does not
/// participate, so a query parameter shadows a path parameter of the same
/// name (inherited ambiguity, preserved on purpose). Existing entries are
/// never reordered or removed; new names append in observation order.
pub fn reconcile_parameters(existing: &mut Operation, staged: &Operation) {
    if existing.parameters.is_empty() {
        existing.parameters = staged.parameters.clone();
        return;
    }
    let known: HashSet<String> = existing
        .parameters
        .iter()
        .map(|parameter| parameter.name.clone())
        .collect();
    for parameter in &staged.parameters {
        if !known.contains(&parameter.name) {
            existing.parameters.push(parameter.clone());
        }
    }
}

/// Request body union. A body attaches wholesale when the operation has
/// none; otherwise new leaf fields are added per media type and existing
/// leaves are left untouched. First write wins per field, and a body is
/// never removed once attached.
pub fn reconcile_request_body(existing: &mut Operation, staged: &Operation) {
    let Some(staged_body) = &staged.request_body else {
        return;
    };
    let body = match &mut existing.request_body {
        Some(body) => body,
        None => {
            existing.request_body = Some(staged_body.clone());
            return;
        }
    };
    for (media_type, staged_content) in &staged_body.content {
        let content = match body.content.entry(media_type.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(staged_content.clone());
                continue;
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };
        let Some(staged_properties) = &staged_content.schema.properties else {
            continue;
        };
        let properties = content
            .schema
            .properties
            .get_or_insert_with(IndexMap::new);
        for (field, property) in staged_properties {
            if !properties.contains_key(field) {
                properties.insert(field.clone(), property.clone());
            }
        }
    }
}

/// Canonicalization pass, run on every write. Key order and stray-key
/// removal are structural (struct field order plus typed deserialization);
/// what remains is enforcing the name-deduplicated parameter invariant,
/// first occurrence wins.
pub fn canonicalize(operation: &mut Operation) {
    let parameters = std::mem::take(&mut operation.parameters);
    operation.parameters = parameters
        .into_iter()
        .unique_by(|parameter| parameter.name.clone())
        .collect();
}

fn next_example_name(examples: &IndexMap<String, ExampleObject>) -> String {
    let next = examples
        .keys()
        .filter_map(|name| {
            name.rsplit_once('-')
                .and_then(|(_, suffix)| suffix.parse::<u32>().ok())
        })
        .max()
        .map(|max| max + 1);
    match next {
        Some(n) => format!("example-{n}"),
        None => "example-0".to_string(),
    }
}
