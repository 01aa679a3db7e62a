//! Path resolution - dotted multi-hop relation paths
//!
//! `"tasks.comments"` resolves `tasks` against the source, then `comments`
//! against every task in order, concatenating the results. A null anywhere
//! ends its branch: a single null context yields null, while a null produced
//! by one element of a sequence simply contributes nothing.

use std::sync::Arc;

use tracing::trace;

use super::related::Related;
use super::resolver::{resolve_hop, resolve_record_hop, Source};
use crate::error::RelationResult;
use crate::store::{Collection, Record};

/// Resolve `path` starting at `source`
pub fn resolve_path(source: Source<'_>, path: &str) -> RelationResult<Related> {
    let separator = *source.model().config().get_path_separator();
    let mut hops = path.split(separator);
    let first = hops.next().unwrap_or_default();
    let current = resolve_hop(source, first)?;
    follow(current, hops)
}

/// Resolve `path` starting at a record
pub fn resolve_record_path(record: &Arc<Record>, path: &str) -> RelationResult<Related> {
    resolve_path(Source::Record(record), path)
}

/// Resolve `path` starting at a collection
pub fn resolve_collection_path(collection: &Arc<Collection>, path: &str) -> RelationResult<Related> {
    resolve_path(Source::Collection(collection), path)
}

/// Resolve `path` starting from an earlier result
pub(crate) fn continue_path(current: &Related, path: &str) -> RelationResult<Related> {
    let separator = match current {
        Related::None => return Ok(Related::None),
        Related::One(record) => *record.model().config().get_path_separator(),
        Related::Many(records) => match records.first() {
            Some(record) => *record.model().config().get_path_separator(),
            None => return Ok(Related::Many(Vec::new())),
        },
    };
    follow(current.clone(), path.split(separator))
}

fn follow<'p>(mut current: Related, hops: impl Iterator<Item = &'p str>) -> RelationResult<Related> {
    for hop in hops {
        current = match current {
            Related::None => {
                trace!("Path short-circuits on null before '{}'", hop);
                return Ok(Related::None);
            }
            Related::One(record) => resolve_record_hop(&record, hop)?,
            Related::Many(records) => {
                let mut flattened = Vec::with_capacity(records.len());
                for record in &records {
                    match resolve_record_hop(record, hop)? {
                        Related::None => {}
                        Related::One(related) => flattened.push(related),
                        Related::Many(related) => flattened.extend(related),
                    }
                }
                Related::Many(flattened)
            }
        };
    }

    Ok(current)
}
