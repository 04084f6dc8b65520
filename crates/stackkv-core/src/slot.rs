//! Pending write recorded in a transaction frame
//!
//! A frame maps each key it touched to a `Slot`. A key missing from the
//! frame was not written in that frame; `Slot::Unset` means it was written
//! and the write was an UNSET. The two are never conflated.

use std::fmt;

/// A single write recorded in a transaction frame
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// SET key value
    Value(String),
    /// UNSET key
    Unset,
}

impl Slot {
    /// The written value, or `None` for an unset.
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Slot::Value(v) => Some(v.as_str()),
            Slot::Unset => None,
        }
    }

    /// Consume the slot, yielding the written value or `None` for an unset.
    pub fn into_value(self) -> Option<String> {
        match self {
            Slot::Value(v) => Some(v),
            Slot::Unset => None,
        }
    }

    /// Returns true if this slot records an unset.
    pub fn is_unset(&self) -> bool {
        matches!(self, Slot::Unset)
    }
}

impl From<Option<String>> for Slot {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) => Slot::Value(v),
            None => Slot::Unset,
        }
    }
}

impl From<&str> for Slot {
    fn from(value: &str) -> Self {
        Slot::Value(value.to_string())
    }
}

impl From<String> for Slot {
    fn from(value: String) -> Self {
        Slot::Value(value)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Value(v) => write!(f, "{}", v),
            Slot::Unset => write!(f, "<unset>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        let slot = Slot::from("10");
        assert_eq!(slot.as_value(), Some("10"));
        assert!(!slot.is_unset());
        assert_eq!(slot.into_value(), Some("10".to_string()));
    }

    #[test]
    fn test_unset_accessors() {
        let slot = Slot::Unset;
        assert_eq!(slot.as_value(), None);
        assert!(slot.is_unset());
        assert_eq!(slot.into_value(), None);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Slot::from(Some("a".to_string())), Slot::Value("a".to_string()));
        assert_eq!(Slot::from(None), Slot::Unset);
    }

    #[test]
    fn test_literal_null_is_a_value() {
        // "NULL" is display-only at the protocol boundary; stored as-is it is data
        let slot = Slot::from("NULL");
        assert_eq!(slot.as_value(), Some("NULL"));
    }
}
