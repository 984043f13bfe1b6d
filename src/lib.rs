//! Schema Collection
//!
//! Combines versioned JSON-Schema object definitions into a single
//! collection keyed by schema name, then by version.
//!
//! ## Pipeline
//!
//! - **Versioning**: schema objects sharing one title are grouped under
//!   their semver string, with `required: true` expanded to the declared
//!   properties
//! - **Combining**: groups are keyed by the camelCase form of their title
//! - **Provenance**: every schema without a package gets a default one
//!
//! ```
//! use schema_collection::*;
//!
//! let v1 = ObjectSchema::new(
//!     Semver::new(1, 0, 0),
//!     JsonSchema::object("membership_invitation"),
//!     PlainObject::new(),
//! );
//!
//! let mut collection = combine_schemas([version_schemas(vec![v1])?]);
//! set_package_name(&mut collection, "my-pkg");
//!
//! let schema = &collection["membershipInvitation"]["1.0.0"];
//! assert_eq!(schema.package.as_deref(), Some("my-pkg"));
//! # Ok::<(), SchemaError>(())
//! ```

pub mod combine;
pub mod config;
pub mod error;
pub mod loader;
pub mod names;
pub mod objects;
pub mod registry;
pub mod version;

pub use combine::{
    combine_schemas, combine_schemas_with, group_name, set_package_name, version_schemas,
    version_schemas_with, CollisionPolicy,
};
pub use config::{CollectionConfig, OutputFormat};
pub use error::{Result, SchemaError};
pub use loader::{group_by_title, load_documents, load_file};
pub use names::normalize_name;
pub use objects::{
    DefaultValue, JsonProperties, JsonProperty, JsonPropertyType, JsonSchema, NameVersion,
    ObjectSchema, PlainObject, PlainValue, Required, SchemaCollection, SchemaVersion, See,
    Semver, TypeName, VersionedSchema,
};
pub use registry::SchemaRegistry;
pub use version::semver_to_string;
