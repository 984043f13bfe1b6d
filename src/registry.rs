//! Schema Registry
//!
//! Query facade over a combined [`SchemaCollection`]: look up schemas by
//! name and version, find the latest version, register more groups.

use tracing::debug;

use crate::combine::{insert_group, set_package_name, version_schemas_with, CollisionPolicy};
use crate::error::{Result, SchemaError};
use crate::names::normalize_name;
use crate::objects::{NameVersion, ObjectSchema, SchemaCollection, Semver, VersionedSchema};

/// The main schema registry
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    /// Combined schemas
    collection: SchemaCollection,
    /// How name and version collisions are handled on register
    collisions: CollisionPolicy,
}

impl SchemaRegistry {
    /// Create an empty registry that overwrites on collision
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with an explicit collision policy
    pub fn with_policy(collisions: CollisionPolicy) -> Self {
        Self {
            collection: SchemaCollection::new(),
            collisions,
        }
    }

    /// Wrap an already combined collection
    pub fn from_collection(collection: SchemaCollection) -> Self {
        Self {
            collection,
            collisions: CollisionPolicy::default(),
        }
    }

    /// Group schema objects of one title and add them under their
    /// normalized name. Returns that name.
    pub fn register(&mut self, schemas: Vec<ObjectSchema>) -> Result<String> {
        let versioned = version_schemas_with(self.collisions, schemas)?;
        self.register_versioned(versioned)
    }

    /// Add an already versioned group. Returns its normalized name.
    pub fn register_versioned(&mut self, versioned: VersionedSchema) -> Result<String> {
        insert_group(&mut self.collection, versioned, self.collisions)?.ok_or(SchemaError::EmptyInput)
    }

    /// Fill in the package name on every schema that has none
    pub fn stamp(&mut self, package_name: &str) -> &mut Self {
        set_package_name(&mut self.collection, package_name);
        self
    }

    /// Number of distinct schema names
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Schema names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collection.keys().map(String::as_str)
    }

    /// All versions of a schema
    pub fn get_versioned(&self, name: &str) -> Option<&VersionedSchema> {
        self.collection
            .get(name)
            .or_else(|| self.collection.get(&normalize_name(name)))
    }

    /// Version strings of a schema, lowest first
    pub fn versions(&self, name: &str) -> Vec<&str> {
        let Some(versioned) = self.get_versioned(name) else {
            return Vec::new();
        };
        let mut versions: Vec<(&str, Semver)> = versioned
            .iter()
            .map(|(key, schema)| (key.as_str(), schema.version))
            .collect();
        versions.sort_by_key(|(_, version)| *version);
        versions.into_iter().map(|(key, _)| key).collect()
    }

    /// Get a schema by name and version.
    ///
    /// The name may be a raw title; the version may carry a leading `v`.
    pub fn get(&self, name: &str, version: &str) -> Option<&ObjectSchema> {
        let version = version.strip_prefix('v').unwrap_or(version);
        self.get_versioned(name)?.get(version)
    }

    /// Like [`get`](Self::get), but a missing schema is an error
    pub fn require(&self, name: &str, version: &str) -> Result<&ObjectSchema> {
        self.get(name, version).ok_or_else(|| SchemaError::NotFound {
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    /// Highest version of a schema
    pub fn latest(&self, name: &str) -> Option<&ObjectSchema> {
        self.get_versioned(name)?
            .values()
            .max_by_key(|schema| schema.version)
    }

    /// Every (name, version) pair in the registry
    pub fn entries(&self) -> Vec<NameVersion> {
        self.collection
            .iter()
            .flat_map(|(name, versioned)| {
                versioned.keys().map(move |version| NameVersion {
                    name: name.clone(),
                    version: version.clone(),
                })
            })
            .collect()
    }

    /// Borrow the combined collection
    pub fn collection(&self) -> &SchemaCollection {
        &self.collection
    }

    /// Hand the combined collection to the caller
    pub fn into_collection(self) -> SchemaCollection {
        debug!(schemas = self.collection.len(), "registry released");
        self.collection
    }
}

impl From<SchemaCollection> for SchemaRegistry {
    fn from(collection: SchemaCollection) -> Self {
        Self::from_collection(collection)
    }
}
