//! # Materials
//!
//! Material to display-color lookup for the rendering collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Surface material of a part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    #[default]
    Steel,
    Aluminum,
    Brass,
    Copper,
}

impl Material {
    /// All materials in display order.
    pub const ALL: [Material; 4] = [
        Material::Steel,
        Material::Aluminum,
        Material::Brass,
        Material::Copper,
    ];

    /// Lowercase identifier.
    pub fn id(self) -> &'static str {
        match self {
            Material::Steel => "steel",
            Material::Aluminum => "aluminum",
            Material::Brass => "brass",
            Material::Copper => "copper",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Material::Steel => "Steel",
            Material::Aluminum => "Aluminum",
            Material::Brass => "Brass",
            Material::Copper => "Copper",
        }
    }

    /// Display color as `#RRGGBB`.
    pub fn hex(self) -> &'static str {
        match self {
            Material::Steel => "#A5A5A5",
            Material::Aluminum => "#D6D6D6",
            Material::Brass => "#CFB53B",
            Material::Copper => "#B87333",
        }
    }

    /// Display color as 8-bit RGB.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Material::Steel => [0xA5, 0xA5, 0xA5],
            Material::Aluminum => [0xD6, 0xD6, 0xD6],
            Material::Brass => [0xCF, 0xB5, 0x3B],
            Material::Copper => [0xB8, 0x73, 0x33],
        }
    }

    /// Display color as normalized RGBA for GPU upload.
    ///
    /// # Example
    ///
    /// ```rust
    /// use part_geometry::Material;
    ///
    /// let [r, _, _, a] = Material::Copper.rgba();
    /// assert!((r - 184.0 / 255.0).abs() < 1e-6);
    /// assert_eq!(a, 1.0);
    /// ```
    pub fn rgba(self) -> [f32; 4] {
        let [r, g, b] = self.rgb();
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a material name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown material: '{0}'")]
pub struct UnknownMaterial(pub String);

impl FromStr for Material {
    type Err = UnknownMaterial;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Material::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMaterial(s.to_string()))
    }
}
