//! Combining schema objects into versioned groups and collections
//!
//! The pipeline runs leaves first:
//!
//! ```text
//! [ObjectSchema] --version_schemas--> VersionedSchema
//! [VersionedSchema] --combine_schemas--> SchemaCollection
//! SchemaCollection --set_package_name--> SchemaCollection (stamped)
//! ```
//!
//! Grouping takes the schema objects by value: the `required` expansion
//! happens on documents the caller has handed over, and nothing is
//! touched when a check fails.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SchemaError};
use crate::names::normalize_name;
use crate::objects::{ObjectSchema, SchemaCollection, VersionedSchema};
use crate::version::semver_to_string;

/// What to do when two entries land on the same key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Later entry silently replaces the earlier one
    #[default]
    Overwrite,
    /// Fail with [`SchemaError::Collision`]
    Reject,
}

/// Returns single map with every schema object under its semver key.
///
/// All schema objects must share one title. `required: true` is expanded
/// into the list of declared properties. Duplicate versions: last one wins.
pub fn version_schemas(schemas: Vec<ObjectSchema>) -> Result<VersionedSchema> {
    version_schemas_with(CollisionPolicy::Overwrite, schemas)
}

/// Same as [`version_schemas`], with an explicit policy for duplicate versions
pub fn version_schemas_with(
    policy: CollisionPolicy,
    schemas: Vec<ObjectSchema>,
) -> Result<VersionedSchema> {
    let first = schemas.first().ok_or(SchemaError::EmptyInput)?;
    let title = first.schema.title.clone();

    if schemas.iter().any(|s| s.schema.title != title) {
        return Err(SchemaError::TitleMismatch {
            titles: schemas.iter().map(|s| s.schema.title.clone()).collect(),
        });
    }

    if policy == CollisionPolicy::Reject {
        let mut seen = HashSet::with_capacity(schemas.len());
        for s in &schemas {
            if !seen.insert(s.version) {
                return Err(SchemaError::Collision {
                    name: format!("{}@{}", title, s.version),
                });
            }
        }
    }

    let mut result = VersionedSchema::with_capacity(schemas.len());
    for mut schema in schemas {
        if schema.schema.expand_required() {
            debug!(title = %title, version = %schema.version, "expanded required: true");
        }
        let version = semver_to_string(&schema.version);
        if result.insert(version.clone(), schema).is_some() {
            warn!(title = %title, version = %version, "duplicate version replaced");
        }
    }

    debug!(title = %title, versions = result.len(), "versioned schemas");
    Ok(result)
}

/// Collection key for a versioned group: the normalized title of its first
/// member. `None` for an empty group.
pub fn group_name(versioned: &VersionedSchema) -> Option<String> {
    versioned
        .values()
        .next()
        .map(|schema| normalize_name(&schema.schema.title))
}

/// Combines multiple versioned schemas into single collection.
///
/// Groups that normalize to the same name overwrite each other.
pub fn combine_schemas<I>(versioned: I) -> SchemaCollection
where
    I: IntoIterator<Item = VersionedSchema>,
{
    let mut result = SchemaCollection::new();
    for group in versioned {
        // cannot fail under Overwrite
        let _ = insert_group(&mut result, group, CollisionPolicy::Overwrite);
    }
    result
}

/// Same as [`combine_schemas`], with an explicit policy for name collisions
pub fn combine_schemas_with<I>(policy: CollisionPolicy, versioned: I) -> Result<SchemaCollection>
where
    I: IntoIterator<Item = VersionedSchema>,
{
    let mut result = SchemaCollection::new();
    for group in versioned {
        insert_group(&mut result, group, policy)?;
    }
    Ok(result)
}

/// Insert one versioned group under its normalized name.
///
/// Returns the key used, or `None` when the group was empty and skipped.
pub(crate) fn insert_group(
    collection: &mut SchemaCollection,
    group: VersionedSchema,
    policy: CollisionPolicy,
) -> Result<Option<String>> {
    let Some(name) = group_name(&group) else {
        warn!("skipping empty versioned schema");
        return Ok(None);
    };

    if collection.contains_key(&name) {
        match policy {
            CollisionPolicy::Reject => return Err(SchemaError::Collision { name }),
            CollisionPolicy::Overwrite => warn!(name = %name, "schema replaced by later definition"),
        }
    }

    debug!(name = %name, versions = group.len(), "combined schema");
    collection.insert(name.clone(), group);
    Ok(Some(name))
}

/// Sets package name for each schema in the collection that has none.
///
/// Existing package names are never overwritten, so stamping is idempotent.
/// Returns the collection for convenience.
pub fn set_package_name<'a>(
    schemas: &'a mut SchemaCollection,
    package_name: &str,
) -> &'a mut SchemaCollection {
    let mut stamped = 0usize;
    for versioned in schemas.values_mut() {
        for schema in versioned.values_mut() {
            if !schema.has_package() {
                schema.package = Some(package_name.to_string());
                stamped += 1;
            }
        }
    }
    debug!(package = package_name, stamped, "set package name");
    schemas
}
