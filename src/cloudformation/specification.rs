//! Resource specification JSON schema.
//!
//! Property and attribute type information is spread over optional
//! `PrimitiveType`, `Type`, `ItemType` and `PrimitiveItemType` keys. Those are
//! folded into a single [`ValueType`] during deserialization, so a decoded
//! specification never holds a combination the schema does not allow.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::SpecificationError;

/// Scalar types of the resource specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PrimitiveType {
    String,
    Long,
    Integer,
    Double,
    Boolean,
    Timestamp,
    Json,
}

/// Scalar types allowed as list or map items. `Json` is not one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PrimitiveItemType {
    String,
    Long,
    Integer,
    Double,
    Boolean,
    Timestamp,
}

/// Element type of a list or map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemType {
    Primitive(PrimitiveItemType),
    /// A property type of the same resource.
    Named(String),
}

/// Resolved type of a property or attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    Primitive(PrimitiveType),
    List(ItemType),
    Map(ItemType),
    /// A property type of the same resource.
    Named(String),
}

/// Type keys that don't describe a valid [`ValueType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueTypeError {
    #[error("no PrimitiveType or Type given")]
    Missing,
    #[error("{container} without an item type")]
    MissingItemType { container: String },
    #[error("both ItemType and PrimitiveItemType given")]
    AmbiguousItemType,
    #[error("PrimitiveType combined with Type {0:?}")]
    Conflicting(String),
    #[error("item type given for non-container Type {0:?}")]
    UnexpectedItemType(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawValueType {
    primitive_type: Option<PrimitiveType>,
    #[serde(rename = "Type")]
    kind: Option<String>,
    item_type: Option<String>,
    primitive_item_type: Option<PrimitiveItemType>,
}

impl TryFrom<RawValueType> for ValueType {
    type Error = ValueTypeError;

    fn try_from(raw: RawValueType) -> Result<Self, Self::Error> {
        let item = match (raw.item_type, raw.primitive_item_type) {
            (Some(_), Some(_)) => return Err(ValueTypeError::AmbiguousItemType),
            (Some(named), None) => Some(ItemType::Named(named)),
            (None, Some(primitive)) => Some(ItemType::Primitive(primitive)),
            (None, None) => None,
        };

        match (raw.primitive_type, raw.kind, item) {
            (Some(primitive), None, None) => Ok(Self::Primitive(primitive)),
            (Some(_), Some(kind), _) => Err(ValueTypeError::Conflicting(kind)),
            (Some(_), None, Some(_)) => Err(ValueTypeError::UnexpectedItemType("primitive".to_string())),
            (None, Some(kind), item) => match (kind.as_str(), item) {
                ("List", Some(item)) => Ok(Self::List(item)),
                ("Map", Some(item)) => Ok(Self::Map(item)),
                ("List" | "Map", None) => Err(ValueTypeError::MissingItemType { container: kind }),
                (_, Some(_)) => Err(ValueTypeError::UnexpectedItemType(kind)),
                (_, None) => Ok(Self::Named(kind)),
            },
            // Primitive lists may omit `Type`.
            (None, None, Some(ItemType::Primitive(primitive))) => Ok(Self::List(ItemType::Primitive(primitive))),
            (None, None, Some(ItemType::Named(_))) => Err(ValueTypeError::MissingItemType {
                container: "ItemType".to_string(),
            }),
            (None, None, None) => Err(ValueTypeError::Missing),
        }
    }
}

/// How a stack update treats a change to the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum UpdateType {
    Mutable,
    Immutable,
    Conditional,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawProperty {
    documentation: String,
    required: bool,
    update_type: UpdateType,
    #[serde(flatten)]
    value_type: RawValueType,
}

/// A resource or property-type property.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawProperty")]
pub struct Property {
    pub documentation: String,
    pub required: bool,
    pub update_type: UpdateType,
    pub value_type: ValueType,
}

impl TryFrom<RawProperty> for Property {
    type Error = ValueTypeError;

    fn try_from(raw: RawProperty) -> Result<Self, Self::Error> {
        Ok(Self {
            documentation: raw.documentation,
            required: raw.required,
            update_type: raw.update_type,
            value_type: raw.value_type.try_into()?,
        })
    }
}

/// A resource attribute available through `Fn::GetAtt`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawValueType")]
pub struct Attribute {
    pub value_type: ValueType,
}

impl TryFrom<RawValueType> for Attribute {
    type Error = ValueTypeError;

    fn try_from(raw: RawValueType) -> Result<Self, Self::Error> {
        Ok(Self {
            value_type: raw.try_into()?,
        })
    }
}

/// A property type made of named sub-properties.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StructType {
    pub documentation: String,
    pub properties: BTreeMap<String, Property>,
}

/// Entry of `PropertyTypes`: a structure, or a bare typed property.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PropertyType {
    Struct(StructType),
    Value(Property),
}

/// Entry of `ResourceTypes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceType {
    pub documentation: String,
    pub properties: BTreeMap<String, Property>,
    pub attributes: Option<BTreeMap<String, Attribute>>,
}

/// A regional CloudFormation resource specification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Specification {
    pub property_types: BTreeMap<String, PropertyType>,
    pub resource_types: BTreeMap<String, ResourceType>,
    pub resource_specification_version: String,
}

impl Specification {
    /// Decode a specification file.
    ///
    /// # Errors
    ///
    /// Returns [`SpecificationError::Json`] when the text is not JSON or does
    /// not match the schema.
    pub fn from_json(json: &str) -> Result<Self, SpecificationError> {
        let specification: Self = serde_json::from_str(json)?;
        tracing::debug!(
            version = %specification.resource_specification_version,
            resource_types = specification.resource_types.len(),
            property_types = specification.property_types.len(),
            "specification decoded"
        );
        Ok(specification)
    }

    /// Property types belonging to `resource`, keyed by their short name.
    ///
    /// Property type keys have the form `AWS::Service::Resource.Name`.
    pub fn property_types_of<'s>(&'s self, resource: &'s str) -> impl Iterator<Item = (&'s str, &'s PropertyType)> + 's {
        self.property_types.iter().filter_map(move |(key, value)| {
            key.strip_prefix(resource)
                .and_then(|rest| rest.strip_prefix('.'))
                .map(|name| (name, value))
        })
    }
}
