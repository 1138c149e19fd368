use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::relation::Relation;

/// A link from a JRD `links` array that mapped onto a known [`Relation`].
///
/// Every field of the source entry is kept verbatim, so extension members
/// (`titles`, `properties`, ...) survive indexing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    #[serde(skip)]
    relation: Relation,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Link {
    /// Build a link from a raw `links` entry.
    ///
    /// Returns `None` for entries that are not objects, have no string `rel`,
    /// or whose `rel` is not in the relation table.
    pub(crate) fn from_entry(entry: &Value) -> Option<Link> {
        let fields = entry.as_object()?;
        let relation = Relation::from_rel(fields.get("rel")?.as_str()?)?;
        Some(Link {
            relation,
            fields: fields.clone(),
        })
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// The `rel` exactly as the server sent it.
    pub fn rel(&self) -> &str {
        self.fields
            .get("rel")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn href(&self) -> Option<&str> {
        self.fields.get("href").and_then(Value::as_str)
    }

    /// The link's media type (the JRD `type` member).
    pub fn media_type(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    pub fn titles(&self) -> Option<&Map<String, Value>> {
        self.fields.get("titles").and_then(Value::as_object)
    }

    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.fields.get("properties").and_then(Value::as_object)
    }

    /// Look up any member of the source entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All members of the source entry.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Links grouped by relation.
///
/// Every [`Relation`] is always present; a relation with no links maps to an
/// empty sequence. Within a relation, links keep their source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LinkIndex(BTreeMap<Relation, Vec<Link>>);

impl LinkIndex {
    pub(crate) fn new() -> Self {
        Self(
            Relation::ALL
                .into_iter()
                .map(|relation| (relation, Vec::new()))
                .collect(),
        )
    }

    pub(crate) fn push(&mut self, link: Link) {
        self.0.entry(link.relation).or_default().push(link);
    }

    pub fn get(&self, relation: Relation) -> &[Link] {
        self.0.get(&relation).map(Vec::as_slice).unwrap_or_default()
    }

    /// The first link under `relation`, if any.
    pub fn first(&self, relation: Relation) -> Option<&Link> {
        self.get(relation).first()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Relation, &[Link])> {
        self.0.iter().map(|(relation, links)| (*relation, links.as_slice()))
    }

    /// Total number of indexed links across all relations.
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Properties extracted from the JRD `properties` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JrdProperties {
    /// Value of the `http://packetizer.com/ns/name` property.
    pub name: Option<Value>,
}

impl JrdProperties {
    /// The display name, when the server sent it as a string.
    pub fn name_str(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JrdIndex {
    pub links: LinkIndex,
    pub properties: JrdProperties,
}

/// A normalized WebFinger response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResult {
    /// The parsed JRD document.
    pub object: Value,
    /// The response body as received.
    pub json: String,
    pub idx: JrdIndex,
}
