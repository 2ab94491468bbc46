//! Property schema entities.
//!
//! These describe which properties a statedef header, a state controller
//! block, or a specific controller type accepts. They are loaded once and
//! are read-only afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type of one positional slot in a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropType {
    Int,
    Float,
    /// Quote-enclosed text
    String,
    /// 0 / non-0
    Bool,
    /// Hit attribute spec such as `SCA, NA`
    HitAttr,
    /// One value out of the option list
    Enum,
    /// Any combination of the option list
    MultiEnum,
    /// Unrecognized type token
    None,
}

impl PropType {
    /// Maps one schema type token; unknown tokens become [`PropType::None`].
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "int" => Self::Int,
            "float" => Self::Float,
            "string" => Self::String,
            "bool" => Self::Bool,
            "hitattr" => Self::HitAttr,
            "enum" => Self::Enum,
            "multienum" => Self::MultiEnum,
            _ => Self::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::String => "String",
            Self::Bool => "Bool",
            Self::HitAttr => "HitAttr",
            Self::Enum => "Enum",
            Self::MultiEnum => "MultiEnum",
            Self::None => "None",
        }
    }

    pub fn is_enum_like(&self) -> bool {
        matches!(self, Self::Enum | Self::MultiEnum)
    }
}

impl fmt::Display for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A property accepted by a section or controller type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidProperty {
    pub name: String,
    /// Positional type slots of the value (at least one).
    pub types: Vec<PropType>,
    pub optional: bool,
    /// Permitted literals; only meaningful when an enum slot is present.
    #[serde(default)]
    pub enum_options: Vec<String>,
}

impl ValidProperty {
    pub fn new(name: impl Into<String>, types: Vec<PropType>, optional: bool) -> Self {
        Self {
            name: name.into(),
            types,
            optional,
            enum_options: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_enum_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn first_type(&self) -> Option<PropType> {
        self.types.first().copied()
    }

    /// True when the value is exactly one [`PropType::Enum`] slot.
    pub fn is_single_enum(&self) -> bool {
        self.types.len() == 1 && self.types[0] == PropType::Enum
    }

    pub fn has_enum_slot(&self) -> bool {
        self.types.iter().any(PropType::is_enum_like)
    }

    /// Case-insensitive membership test against the enum options.
    pub fn permits_option(&self, value: &str) -> bool {
        let value = value.trim();
        self.enum_options
            .iter()
            .any(|opt| opt.eq_ignore_ascii_case(value))
    }

    /// One-line description of the type signature, e.g.
    /// `Enum (S C A L U), Int (optional)`.
    pub fn describe(&self) -> String {
        let mut parts = Vec::with_capacity(self.types.len());
        for ty in &self.types {
            if ty.is_enum_like() && !self.enum_options.is_empty() {
                parts.push(format!("{} ({})", ty, self.enum_options.join(" ")));
            } else {
                parts.push(ty.to_string());
            }
        }
        let mut desc = parts.join(", ");
        if self.optional {
            desc.push_str(" (optional)");
        }
        desc
    }
}

/// Schema of a section kind (`[Statedef N]` or `[State N]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSection {
    pub name: String,
    /// Type of the value written after the name inside the header.
    pub header_type: PropType,
    /// Whether the header allows a `, comment` suffix.
    pub allows_comment: bool,
    pub properties: Vec<ValidProperty>,
}

impl SchemaSection {
    pub fn new(name: impl Into<String>, header_type: PropType, allows_comment: bool) -> Self {
        Self {
            name: name.into(),
            header_type,
            allows_comment,
            properties: Vec::new(),
        }
    }

    pub fn add_property(&mut self, property: ValidProperty) {
        self.properties.push(property);
    }

    pub fn property(&self, name: &str) -> Option<&ValidProperty> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    pub fn required(&self) -> impl Iterator<Item = &ValidProperty> {
        self.properties.iter().filter(|p| !p.optional)
    }
}

/// Schema of one controller type, e.g. `ChangeState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidController {
    pub name: String,
    pub properties: Vec<ValidProperty>,
}

impl ValidController {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn add_property(&mut self, property: ValidProperty) {
        self.properties.push(property);
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_enum_property() {
        let prop = ValidProperty::new("type", vec![PropType::Enum], true)
            .with_enum_options(["S", "C", "A"]);
        assert_eq!(prop.describe(), "Enum (S C A) (optional)");
        assert!(prop.is_single_enum());
        assert!(prop.permits_option("s"));
        assert!(!prop.permits_option("X"));
    }

    #[test]
    fn describe_tuple_property() {
        let prop = ValidProperty::new("velset", vec![PropType::Float, PropType::Float], false);
        assert_eq!(prop.describe(), "Float, Float");
        assert!(!prop.is_single_enum());
        assert!(!prop.has_enum_slot());
    }

    #[test]
    fn section_property_lookup_ignores_case() {
        let mut section = SchemaSection::new("statedef", PropType::Int, true);
        section.add_property(ValidProperty::new("MoveType", vec![PropType::Enum], true));
        section.add_property(ValidProperty::new("anim", vec![PropType::Int], false));
        assert!(section.has_property("movetype"));
        assert_eq!(section.required().count(), 1);
    }

    #[test]
    fn unknown_token_maps_to_none() {
        assert_eq!(PropType::from_token("HITATTR"), PropType::HitAttr);
        assert_eq!(PropType::from_token("vector"), PropType::None);
    }
}
