use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Key under which a participant's character selection is replicated and
/// persisted locally.
pub const CHARACTER_INDEX_KEY: &str = "characterIndex";

/// Room-wide key carrying the session identifier chosen by the leader.
pub const SESSION_SCENE_KEY: &str = "scene";

/// A value stored in a replicated property set.
///
/// Session services replicate loosely typed values, so a character index may
/// arrive as an integer or as its textual form depending on who wrote it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Text value.
    Str(String),
}

impl PropertyValue {
    /// Coerce the value to an `i32`.
    ///
    /// Integers within range and strings holding an integer are accepted.
    /// Floats and booleans are not.
    ///
    /// ```
    /// use sessionspawn_common::PropertyValue;
    ///
    /// assert_eq!(PropertyValue::Int(2).as_int(), Some(2));
    /// assert_eq!(PropertyValue::Str(" 7 ".into()).as_int(), Some(7));
    /// assert_eq!(PropertyValue::Bool(true).as_int(), None);
    /// ```
    pub fn as_int(&self) -> Option<i32> {
        match self {
            PropertyValue::Int(value) => i32::try_from(*value).ok(),
            PropertyValue::Str(text) => text.trim().parse::<i32>().ok(),
            PropertyValue::Float(_) | PropertyValue::Bool(_) => None,
        }
    }

    /// The text of a [`PropertyValue::Str`], `None` for other variants.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(text) => Some(text),
            _ => None,
        }
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(i64::from(value))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Str(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Int(value) => write!(f, "{}", value),
            PropertyValue::Float(value) => write!(f, "{}", value),
            PropertyValue::Bool(value) => write!(f, "{}", value),
            PropertyValue::Str(value) => write!(f, "{:?}", value),
        }
    }
}

/// A batch of property writes, ordered by key.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// Identifier of the shared context every participant transitions into when the
/// leader starts the session.
#[derive(Serialize, Deserialize, Hash, PartialEq, Eq, Clone, Debug)]
pub struct SessionIdentifier(String);

impl SessionIdentifier {
    /// Wrap the name of a shared context.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The context name as the session service knows it.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Property batch that announces this identifier under `key`.
    pub fn to_properties(&self, key: &str) -> PropertyMap {
        let mut props = PropertyMap::new();
        props.insert(key.to_string(), PropertyValue::Str(self.0.clone()));
        props
    }
}

impl Default for SessionIdentifier {
    fn default() -> Self {
        Self::new("SessionScene")
    }
}

impl fmt::Display for SessionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_coercion() {
        assert_eq!(PropertyValue::Int(2).as_int(), Some(2));
        assert_eq!(PropertyValue::from(-1).as_int(), Some(-1));
        // Out of i32 range is not coercible
        assert_eq!(PropertyValue::Int(i64::MAX).as_int(), None);
    }

    #[test]
    fn test_string_coercion() {
        assert_eq!(PropertyValue::from("3").as_int(), Some(3));
        assert_eq!(PropertyValue::from(" 12\n").as_int(), Some(12));
        assert_eq!(PropertyValue::from("knight").as_int(), None);
        assert_eq!(PropertyValue::from("").as_int(), None);
    }

    #[test]
    fn test_non_integer_values_are_not_coercible() {
        assert_eq!(PropertyValue::Float(2.0).as_int(), None);
        assert_eq!(PropertyValue::Bool(false).as_int(), None);
    }

    #[test]
    fn test_session_identifier_properties() {
        let id = SessionIdentifier::new("Arena");
        let props = id.to_properties(SESSION_SCENE_KEY);

        assert_eq!(props.len(), 1);
        assert_eq!(
            props.get(SESSION_SCENE_KEY).and_then(|v| v.as_str()),
            Some("Arena")
        );
    }

    #[test]
    fn test_default_session_identifier() {
        assert_eq!(SessionIdentifier::default().as_str(), "SessionScene");
    }
}
