//! Store-neutral filter and update values.
//!
//! Repositories describe *what* to match or change with [`Filter`] and
//! [`UpdateOp`]; each [`DocumentStore`](super::DocumentStore) decides *how*.
//! The MongoDB store renders them to BSON query documents, the in-memory store
//! evaluates them directly against serialized documents.

use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use regex::RegexBuilder;

/// A deferred, composable predicate over stored documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document.
    All,
    /// Exact equality on a (dotted) field path.
    Eq { field: String, value: Bson },
    /// Regular-expression match on a string field.
    Regex {
        field: String,
        pattern: String,
        case_insensitive: bool,
    },
    /// Matches when any member matches. An empty list matches nothing.
    Or(Vec<Filter>),
    /// Matches when every member matches. An empty list matches everything.
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Exact match on the `_id` field.
    ///
    /// Identifiers are strings above the storage layer but stored as ObjectIds;
    /// a string that is not a valid ObjectId is kept as-is and simply matches
    /// nothing in MongoDB.
    pub fn id(id: &str) -> Self {
        let value = ObjectId::parse_str(id)
            .map(Bson::ObjectId)
            .unwrap_or_else(|_| Bson::String(id.to_owned()));
        Self::eq("_id", value)
    }

    /// Case-insensitive substring match. The needle is matched literally.
    pub fn contains(field: impl Into<String>, needle: &str) -> Self {
        Self::Regex {
            field: field.into(),
            pattern: regex::escape(needle),
            case_insensitive: true,
        }
    }

    /// OR-combines `filters`, unwrapping a single member.
    pub fn any_of(mut filters: Vec<Filter>) -> Self {
        if filters.len() == 1 {
            return filters.remove(0);
        }
        Self::Or(filters)
    }

    /// AND-combines `filters`, dropping [`Filter::All`] members.
    pub fn all_of(filters: Vec<Filter>) -> Self {
        let mut filters: Vec<Filter> = filters
            .into_iter()
            .filter(|f| !matches!(f, Filter::All))
            .collect();
        match filters.len() {
            0 => Self::All,
            1 => filters.remove(0),
            _ => Self::And(filters),
        }
    }

    /// Renders the filter as a MongoDB query document.
    pub fn to_bson(&self) -> Document {
        match self {
            Filter::All => Document::new(),
            Filter::Eq { field, value } => {
                let mut query = Document::new();
                query.insert(field.clone(), value.clone());
                query
            }
            Filter::Regex {
                field,
                pattern,
                case_insensitive,
            } => {
                let mut condition = doc! { "$regex": pattern.clone() };
                if *case_insensitive {
                    condition.insert("$options", "i");
                }
                let mut query = Document::new();
                query.insert(field.clone(), condition);
                query
            }
            // `$or` rejects an empty array; every document has an `_id`.
            Filter::Or(filters) if filters.is_empty() => doc! { "_id": { "$exists": false } },
            Filter::Or(filters) => {
                doc! { "$or": filters.iter().map(Filter::to_bson).collect::<Vec<_>>() }
            }
            Filter::And(filters) if filters.is_empty() => Document::new(),
            Filter::And(filters) => {
                doc! { "$and": filters.iter().map(Filter::to_bson).collect::<Vec<_>>() }
            }
        }
    }

    /// Evaluates the filter against a serialized document.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => {
                lookup(document, field).is_some_and(|found| bson_eq(found, value))
            }
            Filter::Regex {
                field,
                pattern,
                case_insensitive,
            } => {
                let Some(Bson::String(text)) = lookup(document, field) else {
                    return false;
                };
                RegexBuilder::new(pattern)
                    .case_insensitive(*case_insensitive)
                    .build()
                    .is_ok_and(|re| re.is_match(text))
            }
            Filter::Or(filters) => filters.iter().any(|f| f.matches(document)),
            Filter::And(filters) => filters.iter().all(|f| f.matches(document)),
        }
    }
}

/// A single field-level update operation.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOp {
    /// Sets the value at a (dotted) field path.
    Set { path: String, value: Bson },
}

impl UpdateOp {
    pub fn set(path: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::Set {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            UpdateOp::Set { path, .. } => path,
        }
    }

    /// Applies the operation in place. Returns `true` when the document changed.
    pub fn apply(&self, document: &mut Document) -> bool {
        match self {
            UpdateOp::Set { path, value } => set_path(document, path, value.clone()),
        }
    }
}

/// Combines update operations into a single MongoDB update document.
pub fn to_update_document(updates: &[UpdateOp]) -> Document {
    let mut set = Document::new();
    for update in updates {
        match update {
            UpdateOp::Set { path, value } => {
                set.insert(path.clone(), value.clone());
            }
        }
    }
    doc! { "$set": set }
}

fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut segments = path.split('.');
    let mut current = document.get(segments.next()?)?;
    for segment in segments {
        current = current.as_document()?.get(segment)?;
    }
    Some(current)
}

fn set_path(document: &mut Document, path: &str, value: Bson) -> bool {
    match path.split_once('.') {
        None => {
            let previous = document.insert(path, value.clone());
            previous.as_ref() != Some(&value)
        }
        Some((head, rest)) => {
            if !matches!(document.get(head), Some(Bson::Document(_))) {
                document.insert(head, Document::new());
            }
            match document.get_mut(head) {
                Some(Bson::Document(inner)) => set_path(inner, rest, value),
                _ => false,
            }
        }
    }
}

/// Equality that treats an ObjectId and its hex string as the same value.
pub(crate) fn bson_eq(left: &Bson, right: &Bson) -> bool {
    match (left, right) {
        (Bson::ObjectId(oid), Bson::String(s)) | (Bson::String(s), Bson::ObjectId(oid)) => {
            oid.to_hex() == *s
        }
        _ => left == right,
    }
}
