//! Attribute scales mapping record values onto graph coordinates.

use std::collections::BTreeSet;

use serde_json::Value;

/// Maps the values of one attribute onto `[0, size]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Scale {
    /// Every value is a number: linear interpolation over `[min, max]`.
    Linear { min: f64, max: f64, size: f32 },
    /// Anything else: sorted distinct values spread evenly over the range.
    Ordinal { categories: Vec<String>, size: f32 },
}

impl Scale {
    /// Builds the scale for an attribute from all of its values.
    pub fn from_values<'a, I>(values: I, size: f32) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let values: Vec<&Value> = values.into_iter().collect();
        let numbers: Option<Vec<f64>> = values.iter().map(|v| v.as_f64()).collect();

        match numbers {
            Some(numbers) if !numbers.is_empty() => {
                let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
                let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                Scale::Linear { min, max, size }
            }
            _ => {
                let categories: BTreeSet<String> = values.iter().map(|v| category_key(v)).collect();
                Scale::Ordinal {
                    categories: categories.into_iter().collect(),
                    size,
                }
            }
        }
    }

    /// Maps a value to a coordinate. Values outside the scale's domain map to 0.
    pub fn map(&self, value: &Value) -> f32 {
        match self {
            Scale::Linear { min, max, size } => {
                let Some(v) = value.as_f64() else {
                    return 0.0;
                };
                let span = max - min;
                if span == 0.0 {
                    return 0.0;
                }
                ((v - min) / span) as f32 * size
            }
            Scale::Ordinal { categories, size } => {
                let key = category_key(value);
                let Ok(index) = categories.binary_search(&key) else {
                    return 0.0;
                };
                if categories.len() < 2 {
                    return size * 0.5;
                }
                index as f32 * size / (categories.len() - 1) as f32
            }
        }
    }
}

/// String form used to group values into categories.
pub fn category_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_values_get_linear_scale() {
        let values = [json!(10), json!(20.5), json!(30)];
        let scale = Scale::from_values(&values, 100.0);
        assert!(matches!(scale, Scale::Linear { .. }));
        assert_eq!(scale.map(&json!(10)), 0.0);
        assert_eq!(scale.map(&json!(30)), 100.0);
        assert!((scale.map(&json!(20)) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn constant_numbers_map_to_zero() {
        let values = [json!(4), json!(4)];
        let scale = Scale::from_values(&values, 100.0);
        assert_eq!(scale.map(&json!(4)), 0.0);
    }

    #[test]
    fn mixed_values_get_sorted_categories() {
        let values = [json!("pear"), json!("apple"), json!(3), json!("pear")];
        let scale = Scale::from_values(&values, 100.0);
        let Scale::Ordinal { categories, .. } = &scale else {
            panic!("expected ordinal scale");
        };
        assert_eq!(categories, &["3", "apple", "pear"]);
        assert_eq!(scale.map(&json!(3)), 0.0);
        assert_eq!(scale.map(&json!("apple")), 50.0);
        assert_eq!(scale.map(&json!("pear")), 100.0);
        assert_eq!(scale.map(&json!("plum")), 0.0);
    }

    #[test]
    fn single_category_sits_in_the_middle() {
        let values = [json!("only")];
        let scale = Scale::from_values(&values, 100.0);
        assert_eq!(scale.map(&json!("only")), 50.0);
    }
}
