//! Single-hop resolution - one relation name against one record or collection

use std::sync::Arc;

use tracing::{debug, trace};

use super::registry::ModelType;
use super::related::Related;
use crate::error::RelationResult;
use crate::store::{Collection, Record};

/// Anything a relation can be resolved from
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Record(&'a Arc<Record>),
    Collection(&'a Arc<Collection>),
}

impl<'a> Source<'a> {
    /// Model type of the source
    pub fn model(&self) -> &'a Arc<ModelType> {
        match *self {
            Source::Record(record) => record.model(),
            Source::Collection(collection) => collection.model(),
        }
    }
}

impl<'a> From<&'a Arc<Record>> for Source<'a> {
    fn from(record: &'a Arc<Record>) -> Self {
        Source::Record(record)
    }
}

impl<'a> From<&'a Arc<Collection>> for Source<'a> {
    fn from(collection: &'a Arc<Collection>) -> Self {
        Source::Collection(collection)
    }
}

/// Resolve a single relation name against `source`
pub fn resolve_hop(source: Source<'_>, relation: &str) -> RelationResult<Related> {
    match source {
        Source::Record(record) => resolve_record_hop(record, relation),
        Source::Collection(collection) => resolve_collection_hop(collection, relation),
    }
}

/// Resolve a relation on a record: belongs-to first, then has-many.
///
/// Unknown names resolve to `Related::None`.
pub fn resolve_record_hop(record: &Arc<Record>, relation: &str) -> RelationResult<Related> {
    let model = record.model();
    let Some(relations) = model.relations() else {
        debug!("Model '{}' declares no relations, '{}' is null", model.name(), relation);
        return Ok(Related::None);
    };

    if let Some(belongs_to) = relations.get_belongs_to(relation) {
        let related = Related::from(belongs_to.resolve(record, relation)?);
        trace!(
            "{}#{} belongs_to '{}' -> {:?}",
            model.name(),
            record.id(),
            relation,
            related.ids()
        );
        return Ok(related);
    }

    if let Some(has_many) = relations.get_has_many(relation) {
        let related = Related::Many(has_many.resolve(record, relation)?);
        trace!(
            "{}#{} has_many '{}' -> {} records",
            model.name(),
            record.id(),
            relation,
            related.len()
        );
        return Ok(related);
    }

    debug!("Unknown relation '{}' on model '{}'", relation, model.name());
    Ok(Related::None)
}

/// Resolve a relation on a collection.
///
/// Only the collection context's belongs-to declarations apply. Has-many
/// names, even ones the record type declares, resolve to `Related::None`.
pub fn resolve_collection_hop(collection: &Arc<Collection>, relation: &str) -> RelationResult<Related> {
    let model = collection.model();

    if let Some(belongs_to) = collection.context().and_then(|context| context.get(relation)) {
        let related = Related::from(belongs_to.resolve(collection, relation)?);
        trace!(
            "{} collection belongs_to '{}' -> {:?}",
            model.name(),
            relation,
            related.ids()
        );
        return Ok(related);
    }

    if model.kind_of(relation).is_some() {
        debug!(
            "Relation '{}' of model '{}' is per record, collection resolves it to null",
            relation,
            model.name()
        );
    } else {
        debug!("Unknown relation '{}' on '{}' collection", relation, model.name());
    }
    Ok(Related::None)
}
