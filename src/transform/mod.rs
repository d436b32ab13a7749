//! Conversions between the edit-form and wire shapes of skills/knowledge.

use std::cmp::Ordering;

use serde_json::Value;

use crate::types::{Weight, WeightMap, WeightedEntry};

/// Sequence -> mapping. A repeated name keeps its first position and takes the last weight.
pub fn to_mapping(sequence: &[WeightedEntry]) -> WeightMap {
    let mut mapping = WeightMap::with_capacity(sequence.len());
    for entry in sequence {
        mapping.insert(entry.name.clone(), entry.weight.clone());
    }
    mapping
}

/// Mapping -> sequence, in the mapping's iteration order
pub fn to_sequence(mapping: &WeightMap) -> Vec<WeightedEntry> {
    mapping
        .iter()
        .map(|(name, weight)| WeightedEntry {
            name: name.clone(),
            weight: weight.clone(),
        })
        .collect()
}

// Descending by value; anything non-numeric goes after every number
fn by_weight_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Keys ordered by descending weight; ties keep mapping order
pub fn ranked_keys(mapping: &WeightMap) -> Vec<String> {
    let mut entries: Vec<(&String, Option<f64>)> =
        mapping.iter().map(|(k, w)| (k, w.as_f64())).collect();
    entries.sort_by(|a, b| by_weight_desc(a.1, b.1));
    entries.into_iter().map(|(k, _)| k.clone()).collect()
}

fn value_weight(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Weight::Text(s.clone()).as_f64(),
        _ => None,
    }
}

/// Replace every project's `knowledge` map with its keys ranked by weight.
/// Projects without an object-valued `knowledge` pass through untouched.
pub fn sort_knowledge_descending(projects: Vec<Value>) -> Vec<Value> {
    projects
        .into_iter()
        .map(|mut project| {
            let ranked = match project.get("knowledge") {
                Some(Value::Object(knowledge)) => {
                    let mut entries: Vec<(&String, Option<f64>)> =
                        knowledge.iter().map(|(k, v)| (k, value_weight(v))).collect();
                    entries.sort_by(|a, b| by_weight_desc(a.1, b.1));
                    Some(
                        entries
                            .into_iter()
                            .map(|(k, _)| Value::String(k.clone()))
                            .collect::<Vec<_>>(),
                    )
                }
                _ => None,
            };
            if let (Some(ranked), Some(obj)) = (ranked, project.as_object_mut()) {
                obj.insert("knowledge".to_string(), Value::Array(ranked));
            }
            project
        })
        .collect()
}
