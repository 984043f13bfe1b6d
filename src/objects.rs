//! Schema object types
//!
//! Data shapes shared by producers and consumers of a [`SchemaCollection`].
//! Everything here serializes to the JSON-Schema field names
//! (`additionalProperties`, `minItems`, ...).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Semantic version of a single schema definition
///
/// ```
/// use schema_collection::Semver;
///
/// let v = Semver::new(1, 0, 2);
/// assert_eq!(v.to_string(), "1.0.2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Semver {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Canonical version string like "1.1.0"
pub type SchemaVersion = String;

/// Name and version pair identifying one entry of a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameVersion {
    pub name: String,
    pub version: SchemaVersion,
}

/// Primitive JSON type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeName {
    Number,
    Integer,
    String,
    Object,
    Boolean,
    Array,
}

/// Value of a `type` keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonPropertyType {
    Named(TypeName),
    Strings(Vec<String>),
    Numbers(Vec<f64>),
}

impl From<TypeName> for JsonPropertyType {
    fn from(name: TypeName) -> Self {
        JsonPropertyType::Named(name)
    }
}

/// Explicit default used when filling an object to match its schema.
/// Limited to primitive values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

/// The `required` keyword.
///
/// `true` means every declared property is required and is expanded into
/// an explicit list when schemas are grouped by version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RequiredRepr", into = "RequiredRepr")]
pub enum Required {
    /// `true`
    All,
    /// `false`
    None,
    /// Explicit list of property names
    Fields(Vec<String>),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RequiredRepr {
    Flag(bool),
    Fields(Vec<String>),
}

impl From<RequiredRepr> for Required {
    fn from(repr: RequiredRepr) -> Self {
        match repr {
            RequiredRepr::Flag(true) => Required::All,
            RequiredRepr::Flag(false) => Required::None,
            RequiredRepr::Fields(fields) => Required::Fields(fields),
        }
    }
}

impl From<Required> for RequiredRepr {
    fn from(required: Required) -> Self {
        match required {
            Required::All => RequiredRepr::Flag(true),
            Required::None => RequiredRepr::Flag(false),
            Required::Fields(fields) => RequiredRepr::Fields(fields),
        }
    }
}

/// Named property schemas, in declaration order
pub type JsonProperties = IndexMap<String, JsonProperty>;

/// Pointer from a property to related documentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum See {
    Name(String),
    Schema(Box<ObjectSchema>),
}

/// Schema of a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonProperty {
    #[serde(rename = "type")]
    pub kind: JsonPropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Required>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<JsonProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JsonProperty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub see: Option<See>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_properties: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Deprecation message shown to users of this property
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
}

impl JsonProperty {
    /// Create a property of the given type with every other keyword unset
    pub fn new(kind: impl Into<JsonPropertyType>) -> Self {
        Self {
            kind: kind.into(),
            format: None,
            minimum: None,
            maximum: None,
            min_items: None,
            max_items: None,
            min_length: None,
            max_length: None,
            description: None,
            required: None,
            properties: None,
            items: None,
            see: None,
            title: None,
            pattern_properties: None,
            additional_properties: None,
            enum_values: None,
            deprecated: None,
            default_value: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Top-level JSON schema, roughly http://json-schema.org/examples.html
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSchema {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: JsonPropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<JsonProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JsonProperty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_properties: Option<serde_json::Map<String, serde_json::Value>>,
    /// Which properties must be present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Required>,
    /// Whether unknown properties are allowed
    #[serde(default = "default_true")]
    pub additional_properties: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

fn default_true() -> bool {
    true
}

impl JsonSchema {
    /// Create an object schema with no properties
    pub fn object(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: JsonPropertyType::Named(TypeName::Object),
            description: None,
            properties: None,
            items: None,
            pattern_properties: None,
            required: None,
            additional_properties: false,
            deprecated: None,
        }
    }

    /// Add a property, keeping declaration order
    pub fn with_property(mut self, name: impl Into<String>, property: JsonProperty) -> Self {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), property);
        self
    }

    /// Set the `required` keyword
    pub fn with_required(mut self, required: Required) -> Self {
        self.required = Some(required);
        self
    }

    /// Names of the declared properties, in declaration order
    pub fn property_names(&self) -> Vec<String> {
        self.properties
            .as_ref()
            .map(|props| props.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Replace `required: true` with the explicit list of declared properties.
    ///
    /// Returns `true` when the schema was changed.
    pub fn expand_required(&mut self) -> bool {
        if self.required != Some(Required::All) {
            return false;
        }
        self.required = Some(Required::Fields(self.property_names()));
        true
    }
}

/// A value in an example payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlainValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<PlainValue>),
    Object(PlainObject),
}

/// Object made of strings, numbers and other plain objects
pub type PlainObject = IndexMap<String, PlainValue>;

/// One version of one schema, with an example and its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    pub version: Semver,
    pub schema: JsonSchema,
    #[serde(default)]
    pub example: PlainObject,
    /// Usually the name of the package this schema is defined in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

impl ObjectSchema {
    /// Create an unstamped schema object
    pub fn new(version: Semver, schema: JsonSchema, example: PlainObject) -> Self {
        Self {
            version,
            schema,
            example,
            package: None,
        }
    }

    /// Set the package this schema is defined in
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Title shared by every version of this schema
    pub fn title(&self) -> &str {
        &self.schema.title
    }

    /// Whether a non-empty package has been recorded
    pub fn has_package(&self) -> bool {
        self.package.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Semver string to schema object
pub type VersionedSchema = IndexMap<SchemaVersion, ObjectSchema>;

/// Normalized schema name to every version of that schema
pub type SchemaCollection = IndexMap<String, VersionedSchema>;
