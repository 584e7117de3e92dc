//! # Label Map
//!
//! A deterministic bijection between IOB2 tag strings and [`LabelId`]s.
//!
//! For entity labels `[L0, L1, ...]`:
//! * `O` is `0`,
//! * `B-Li` is `2 * i + 1`,
//! * `I-Li` is `2 * i + 2`.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::{
    errors::{IobError, IobResult},
    labels::{DEFAULT_ENTITY_LABEL, IobPrefix, IobTag, format_entity_label},
    support::json::json_type_name,
    types::{IobHashMap, LabelId, hash_map_with_capacity},
};

/// A bijection between IOB2 tags and label ids.
///
/// Immutable once built; clones are independent copies.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMap {
    /// Upper-cased entity labels, in input order.
    entities: Vec<String>,

    /// Tags, indexed by label id.
    tags: Vec<IobTag>,

    /// Tag string to label id.
    index: IobHashMap<String, LabelId>,
}

impl Default for LabelMap {
    /// A map with the single placeholder entity type [`DEFAULT_ENTITY_LABEL`].
    fn default() -> Self {
        Self::build(vec![DEFAULT_ENTITY_LABEL.to_string()])
    }
}

impl LabelMap {
    /// Build a label map from an ordered list of entity labels.
    ///
    /// ## Arguments
    /// * `labels` - entity labels; case-folded to upper case.
    ///
    /// ## Returns
    /// The map, or [`IobError::DuplicateLabel`] if two labels are
    /// equal after upper-casing.
    pub fn new<I, S>(labels: I) -> IobResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entities: Vec<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_uppercase())
            .collect();

        for (second, label) in entities.iter().enumerate() {
            if let Some(first) = entities[..second].iter().position(|prior| prior == label) {
                return Err(IobError::DuplicateLabel {
                    label: label.clone(),
                    first,
                    second,
                });
            }
        }

        Ok(Self::build(entities))
    }

    /// Build a label map from an untyped (JSON) label list.
    ///
    /// Fails with [`IobError::InvalidLabelType`] on the first non-string entry.
    pub fn try_from_values(values: &[Value]) -> IobResult<Self> {
        let labels = values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value.as_str().ok_or(IobError::InvalidLabelType {
                    index,
                    found: json_type_name(value),
                })
            })
            .collect::<IobResult<Vec<&str>>>()?;

        Self::new(labels)
    }

    fn build(entities: Vec<String>) -> Self {
        let mut tags = Vec::with_capacity(2 * entities.len() + 1);
        tags.push(IobTag::Outside);
        for label in &entities {
            tags.push(IobTag::Beginning(label.clone()));
            tags.push(IobTag::Inside(label.clone()));
        }

        let mut index = hash_map_with_capacity(tags.len());
        for (id, tag) in tags.iter().enumerate() {
            index.insert(tag.to_string(), id as LabelId);
        }

        Self {
            entities,
            tags,
            index,
        }
    }

    /// The number of tags, including `O`.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// A label map always contains `O`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The upper-cased entity labels, in construction order.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// Is `id` a tag in this map?
    pub fn contains_id(
        &self,
        id: LabelId,
    ) -> bool {
        id >= 0 && (id as usize) < self.tags.len()
    }

    /// Look up the label id for a tag string, e.g. `"B-ACTOR"`.
    pub fn get(
        &self,
        tag: &str,
    ) -> Option<LabelId> {
        self.index.get(tag).copied()
    }

    /// Look up the tag for a label id.
    ///
    /// Returns `None` for ids outside the map; e.g. the ignore marker.
    pub fn tag(
        &self,
        id: LabelId,
    ) -> Option<&IobTag> {
        if self.contains_id(id) {
            self.tags.get(id as usize)
        } else {
            None
        }
    }

    /// The `O` label id.
    pub fn outside(&self) -> LabelId {
        0
    }

    /// The `B-`/`I-` label ids for an entity label (any case).
    pub fn entity_ids(
        &self,
        label: &str,
    ) -> Option<(LabelId, LabelId)> {
        let begin = self.get(&format_entity_label(IobPrefix::Beginning, label))?;
        let inside = self.get(&format_entity_label(IobPrefix::Inside, label))?;
        Some((begin, inside))
    }

    /// Iterate `(tag, id)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&IobTag, LabelId)> + '_ {
        self.tags
            .iter()
            .enumerate()
            .map(|(id, tag)| (tag, id as LabelId))
    }

    /// The `{tag: id}` mapping, as used in model configs.
    pub fn label2id(&self) -> BTreeMap<String, LabelId> {
        self.iter().map(|(tag, id)| (tag.to_string(), id)).collect()
    }

    /// The `{id: tag}` mapping, as used in model configs.
    pub fn id2label(&self) -> BTreeMap<LabelId, String> {
        self.iter().map(|(tag, id)| (id, tag.to_string())).collect()
    }
}

impl Serialize for LabelMap {
    /// Serializes as a `{tag: id}` object, in id order.
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (tag, id) in self.iter() {
            map.serialize_entry(&tag.to_string(), &id)?;
        }
        map.end()
    }
}
