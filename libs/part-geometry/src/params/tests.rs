//! Tests for parameters, maps and schemas.

use super::*;
use proptest::prelude::*;

// =============================================================================
// PART TYPE TESTS
// =============================================================================

#[test]
fn test_part_type_display_and_parse() {
    for part in PartType::ALL {
        let name = part.to_string();
        assert_eq!(name.parse::<PartType>().unwrap(), part);
    }
    assert_eq!("GEAR".parse::<PartType>().unwrap(), PartType::Gear);
    assert!("washer".parse::<PartType>().is_err());
}

#[test]
fn test_part_type_serde_lowercase() {
    let json = serde_json::to_string(&PartType::Spring).unwrap();
    assert_eq!(json, "\"spring\"");
}

// =============================================================================
// PARAMETER TESTS
// =============================================================================

#[test]
fn test_parameter_swaps_reversed_bounds() {
    let p = Parameter::new("x", 5.0, 10.0, 0.0, 1.0);
    assert_eq!((p.min, p.max), (0.0, 10.0));
}

#[test]
fn test_parameter_bounds_normalized_after_deserialize() {
    let p: Parameter =
        serde_json::from_str(r#"{"id":"x","value":3,"min":2,"max":1}"#).unwrap();
    assert_eq!(p.bounds(), (1.0, 2.0));
    assert_eq!(p.clamped(), 2.0);
    assert_eq!(p.step, 0.0);
}

#[test]
fn test_parameter_nan_clamps_to_min() {
    let p = Parameter::new("x", f64::NAN, -1.0, 1.0, 0.1);
    assert_eq!(p.clamped(), -1.0);
    assert!(p.is_out_of_range());
}

#[test]
fn test_parameter_in_range_untouched() {
    let p = Parameter::new("x", 0.25, 0.0, 1.0, 0.05);
    assert_eq!(p.clamped(), 0.25);
    assert!(!p.is_out_of_range());
}

proptest! {
    #[test]
    fn test_clamp_is_idempotent(value in any::<f64>(), a in -1e6f64..1e6, b in -1e6f64..1e6) {
        let p = Parameter::new("x", value, a, b, 0.0);
        let once = p.clamped();
        let twice = p.clamp(once);
        prop_assert_eq!(once.to_bits(), twice.to_bits());
        let (low, high) = p.bounds();
        prop_assert!(once >= low && once <= high);
    }
}

// =============================================================================
// PARAMETER MAP TESTS
// =============================================================================

#[test]
fn test_from_values_ignores_unknown_ids() {
    let schema = schema::default_parameters(PartType::Nut);
    let map = ParameterMap::from_values(&schema, [("sides", 8.0), ("teeth", 3.0)]);
    assert_eq!(map.value("sides"), Some(8.0));
    assert!(!map.contains("teeth"));
    assert_eq!(map.len(), schema.len());
}

#[test]
fn test_set_value_unknown_id() {
    let mut map = ParameterMap::new();
    assert!(!map.set_value("radius", 1.0));
    assert!(map.is_empty());
}

#[test]
fn test_map_clamped() {
    let mut map = schema::default_parameters(PartType::Gear);
    map.set_value("teeth", 1000.0);
    let clamped = map.clamped();
    assert_eq!(clamped.value("teeth"), Some(36.0));
    assert_eq!(map.value("teeth"), Some(1000.0));
}

#[test]
fn test_map_json_shape() {
    let map: ParameterMap = [Parameter::new("radius", 1.0, 0.0, 2.0, 0.1)]
        .into_iter()
        .collect();
    let json = serde_json::to_value(&map).unwrap();
    assert_eq!(json["radius"]["max"], 2.0);
}

// =============================================================================
// SCHEMA TESTS
// =============================================================================

#[test]
fn test_schema_defaults_within_bounds() {
    for part in PartType::ALL {
        let map = schema::default_parameters(part);
        assert!(!map.is_empty(), "{part} schema is empty");
        for p in map.iter() {
            assert!(!p.is_out_of_range(), "{part}.{} default out of range", p.id);
        }
    }
}

#[test]
fn test_gear_schema_matches_store_defaults() {
    let map = schema::default_parameters(PartType::Gear);
    let teeth = map.get("teeth").unwrap();
    assert_eq!((teeth.value, teeth.min, teeth.max), (20.0, 8.0, 36.0));
    assert_eq!(map.value("toothDepthRatio"), Some(0.15));
}

#[test]
fn test_part_spec_with_defaults() {
    let spec = PartSpec::with_defaults(PartType::Bolt);
    assert_eq!(spec.part_type, PartType::Bolt);
    assert!(spec.parameters.contains("headType"));
}
