//! Manifest types for the generated manual list.

use serde::{Deserialize, Serialize};

/// A single versioned manual within a product group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualEntry {
    /// Version label with the folder prefix stripped
    pub version: String,

    /// Browsable URL of the manual's entry page
    pub path: String,
}

/// All manuals discovered for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualGroup {
    /// Product identifier, taken from the product directory name
    pub group_name: String,

    /// Manuals for this product, newest version first
    pub manuals: Vec<ManualEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_group_name_as_camel_case() {
        let group = ManualGroup {
            group_name: "raibo".to_string(),
            manuals: vec![ManualEntry {
                version: "1.0".to_string(),
                path: "/documentation/raibo/v_1.0/index.html".to_string(),
            }],
        };

        let json = serde_json::to_string(&group).unwrap();

        assert!(json.contains(r#""groupName":"raibo""#));
        assert!(json.contains(r#""version":"1.0""#));
    }

    #[test]
    fn round_trips_through_json() {
        let group = ManualGroup {
            group_name: "raion-x".to_string(),
            manuals: vec![],
        };

        let json = serde_json::to_string(&group).unwrap();
        let back: ManualGroup = serde_json::from_str(&json).unwrap();

        assert_eq!(back, group);
    }
}
