//! Generators for layer ids and attribute values.

use catalog_common::LayerId;
use serde_json::{json, Value};

/// Layer ids for one name across a zoom range.
///
/// # Example
///
/// ```
/// use test_utils::layer_pyramid;
///
/// let ids = layer_pyramid("elevation", 0..3);
/// assert_eq!(ids.len(), 3);
/// assert_eq!(ids[2].zoom, 2);
/// ```
pub fn layer_pyramid(name: &str, zooms: std::ops::Range<u32>) -> Vec<LayerId> {
    zooms.map(|z| LayerId::new(name, z)).collect()
}

/// JSON values covering every JSON type, including nesting and unicode.
pub fn sample_attribute_values() -> Vec<Value> {
    vec![
        json!(null),
        json!(true),
        json!(0),
        json!(-42),
        json!(1.5e-7),
        json!("plain text"),
        json!("ünïcødé ✓"),
        json!([]),
        json!([1, "two", null, [3.0]]),
        json!({}),
        json!({"xmin": 0, "ymin": -90.5, "nested": {"list": [1, 2, 3], "flag": false}}),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_values_are_distinct() {
        let values = sample_attribute_values();
        for (i, a) in values.iter().enumerate() {
            for b in values.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
