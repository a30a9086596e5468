//! Domain types shared by the fetch phase and the storage engines.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::traits::SegmentReader;

/// Segment-local document address.
pub type DocOrdinal = u32;

/// Field name used for parent references unless a mapping overrides it.
pub const PARENT_FIELD_NAME: &str = "_parent";

/// Sentinel stored-field name that turns field fetching off for a request.
pub const STORED_FIELDS_NONE: &str = "_none_";

/// A named, ordered list of values materialized on a hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentField {
    pub name: String,
    pub values: Vec<serde_json::Value>,
}

impl DocumentField {
    pub fn new(name: impl Into<String>, values: Vec<serde_json::Value>) -> Self {
        Self { name: name.into(), values }
    }

    pub fn single(name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self { name: name.into(), values: vec![value.into()] }
    }

    pub fn first_str(&self) -> Option<&str> {
        self.values.first().and_then(|v| v.as_str())
    }
}

/// One document returned by the query phase.
///
/// `fields` stays `None` until some fetch sub-phase has something to attach,
/// so a response can tell "no fields requested" apart from "no fields found".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub doc_type: String,
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, DocumentField>>,
}

impl SearchHit {
    pub fn new(id: impl Into<String>, doc_type: impl Into<String>, score: f32) -> Self {
        Self { id: id.into(), doc_type: doc_type.into(), score, fields: None }
    }

    pub fn fields_or_none(&self) -> Option<&BTreeMap<String, DocumentField>> {
        self.fields.as_ref()
    }

    pub fn fields_mut_or_insert(&mut self) -> &mut BTreeMap<String, DocumentField> {
        self.fields.get_or_insert_with(BTreeMap::new)
    }

    pub fn field(&self, name: &str) -> Option<&DocumentField> {
        self.fields.as_ref().and_then(|f| f.get(name))
    }
}

/// A hit in flight through the fetch phase, bound to the segment it lives in.
pub struct HitContext<'a> {
    hit: SearchHit,
    reader: &'a dyn SegmentReader,
    doc: DocOrdinal,
}

impl<'a> HitContext<'a> {
    pub fn new(hit: SearchHit, reader: &'a dyn SegmentReader, doc: DocOrdinal) -> Self {
        Self { hit, reader, doc }
    }

    pub fn hit(&self) -> &SearchHit { &self.hit }

    pub fn hit_mut(&mut self) -> &mut SearchHit { &mut self.hit }

    pub fn reader(&self) -> &'a dyn SegmentReader { self.reader }

    pub fn doc(&self) -> DocOrdinal { self.doc }

    pub fn into_hit(self) -> SearchHit { self.hit }
}

fn default_parent_field_name() -> String {
    PARENT_FIELD_NAME.to_string()
}

/// Parent-child settings of one document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentFieldConfig {
    #[serde(default)]
    pub active: bool,
    #[serde(default = "default_parent_field_name")]
    pub field_name: String,
}

impl ParentFieldConfig {
    pub fn active(field_name: impl Into<String>) -> Self {
        Self { active: true, field_name: field_name.into() }
    }

    pub fn inactive() -> Self {
        Self::default()
    }
}

impl Default for ParentFieldConfig {
    fn default() -> Self {
        Self { active: false, field_name: default_parent_field_name() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMapping {
    #[serde(default)]
    pub parent: ParentFieldConfig,
}

/// Document type name → mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    #[serde(default)]
    pub types: HashMap<String, TypeMapping>,
}

impl MappingConfig {
    pub fn new() -> Self { Self::default() }

    pub fn with_type(mut self, doc_type: impl Into<String>, mapping: TypeMapping) -> Self {
        self.types.insert(doc_type.into(), mapping);
        self
    }

    pub fn with_parent(self, doc_type: impl Into<String>, parent: ParentFieldConfig) -> Self {
        self.with_type(doc_type, TypeMapping { parent })
    }

    pub fn parent_field(&self, doc_type: &str) -> Option<&ParentFieldConfig> {
        self.types.get(doc_type).map(|m| &m.parent)
    }
}

/// Which stored fields a request asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFieldsContext {
    pub field_names: Vec<String>,
    pub fetch_fields: bool,
}

impl StoredFieldsContext {
    /// Builds the context from a request's stored-field list. A list holding
    /// only `_none_` disables fetching; `_none_` next to other names is
    /// rejected.
    pub fn from_list<I, S>(names: I) -> crate::error::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let field_names: Vec<String> = names.into_iter().map(Into::into).collect();
        if field_names.iter().any(|n| n == STORED_FIELDS_NONE) {
            if field_names.len() > 1 {
                return Err(crate::error::Error::InvalidConfig(format!(
                    "cannot combine [{}] with other stored fields",
                    STORED_FIELDS_NONE
                )));
            }
            return Ok(Self { field_names: vec![], fetch_fields: false });
        }
        Ok(Self { field_names, fetch_fields: true })
    }

    pub fn fetch_fields(&self) -> bool { self.fetch_fields }
}

/// Request-scoped state visible to every fetch sub-phase.
#[derive(Debug, Clone, Default)]
pub struct SearchExecutionContext {
    pub mappings: MappingConfig,
    pub stored_fields: Option<StoredFieldsContext>,
}

impl SearchExecutionContext {
    pub fn new(mappings: MappingConfig) -> Self {
        Self { mappings, stored_fields: None }
    }

    pub fn with_stored_fields(mut self, stored_fields: StoredFieldsContext) -> Self {
        self.stored_fields = Some(stored_fields);
        self
    }

    /// True only when the request carries a stored-fields context that turns
    /// fetching off. No context at all means fetching is on.
    pub fn fetch_fields_disabled(&self) -> bool {
        self.stored_fields.as_ref().is_some_and(|s| !s.fetch_fields())
    }
}

/// A document as handed to an indexer. `parent` is stored out of band from
/// the body, in the parent field's value column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub id: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub body: String,
}
