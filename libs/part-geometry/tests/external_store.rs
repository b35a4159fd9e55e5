//! Round trips through the JSON shapes used by the external parameter store
//! and the renderer.

use part_geometry::params::schema;
use part_geometry::{generate, Material, Mesh, PartSpec, PartType};
use serde_json::json;

#[test]
fn part_spec_from_store_json_generates() {
    let body = json!({
        "partType": "gear",
        "parameters": {
            "teeth": { "id": "teeth", "value": 12, "min": 8, "max": 36, "step": 1 },
            "radius": { "id": "radius", "value": 3, "min": 1, "max": 10, "step": 0.1 },
            "thickness": { "id": "thickness", "value": 0.5, "min": 0.1, "max": 2, "step": 0.1 },
            "hole": { "id": "hole", "value": 0.8, "min": 0, "max": 3, "step": 0.1 }
        }
    });

    let spec: PartSpec = serde_json::from_value(body).unwrap();
    assert_eq!(spec.part_type, PartType::Gear);
    assert_eq!(spec.parameters.value("teeth"), Some(12.0));

    let mesh = generate(spec.part_type, &spec.parameters).unwrap();
    assert!(mesh.validate());
    assert!(mesh.signed_volume() > 0.0);
}

#[test]
fn default_specs_survive_json() {
    for part in PartType::ALL {
        let spec = PartSpec::with_defaults(part);
        let text = serde_json::to_string(&spec).unwrap();
        let back: PartSpec = serde_json::from_str(&text).unwrap();
        assert_eq!(back, spec);
        assert!(text.contains(&format!("\"partType\":\"{}\"", part.as_str())));
    }
}

#[test]
fn reversed_store_bounds_still_clamp() {
    let body = json!({
        "partType": "pipe",
        "parameters": {
            "length": { "id": "length", "value": 50, "min": 20, "max": 1 },
            "radius": { "id": "radius", "value": 1, "min": 0.2, "max": 5 },
            "thickness": { "id": "thickness", "value": 0.1, "min": 0.01, "max": 1 }
        }
    });

    let spec: PartSpec = serde_json::from_value(body).unwrap();
    let length = spec.parameters.get("length").unwrap();
    assert_eq!(length.bounds(), (1.0, 20.0));
    assert_eq!(length.clamped(), 20.0);

    let mesh = generate(spec.part_type, &spec.parameters).unwrap();
    let (min, max) = mesh.bounding_box();
    assert!((max.y - min.y - 20.0).abs() < 1e-9);
}

#[test]
fn unknown_part_type_is_rejected() {
    let body = json!({ "partType": "washer", "parameters": {} });
    assert!(serde_json::from_value::<PartSpec>(body).is_err());
}

#[test]
fn materials_use_lowercase_ids() {
    for material in Material::ALL {
        let text = serde_json::to_string(&material).unwrap();
        assert_eq!(text, format!("\"{}\"", material.id()));
        assert_eq!(material.id().parse::<Material>().unwrap(), material);
    }
    let brass: Material = serde_json::from_str("\"brass\"").unwrap();
    assert_eq!(brass.hex(), "#CFB53B");
}

#[test]
fn mesh_json_keeps_buffers() {
    let mesh = generate(PartType::Nut, &schema::default_parameters(PartType::Nut)).unwrap();
    let text = serde_json::to_string(&mesh).unwrap();
    let back: Mesh = serde_json::from_str(&text).unwrap();

    assert_eq!(back.triangles(), mesh.triangles());
    assert_eq!(back.vertex_count(), mesh.vertex_count());
    for (a, b) in back.vertices().iter().zip(mesh.vertices()) {
        assert!(a.abs_diff_eq(*b, 1e-12));
    }
}

#[test]
fn renderer_buffers_are_flat() {
    let mesh = generate(PartType::Spring, &schema::default_parameters(PartType::Spring)).unwrap();
    let positions = mesh.vertices_f32();
    let normals = mesh.normals_f32();
    let indices = mesh.indices_u32();

    assert_eq!(positions.len(), mesh.vertex_count() * 3);
    assert_eq!(normals.len(), positions.len());
    assert_eq!(indices.len(), mesh.triangle_count() * 3);
    assert!(indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
}
