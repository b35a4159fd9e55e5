//! # Default Schemas
//!
//! Reference parameter sets for each part family. The real schema is owned
//! by the external parameter store; these defaults mirror it so a session
//! can start without one.

use super::{Parameter, ParameterMap, PartType};

/// `(id, value, min, max, step)`
type Row = (&'static str, f64, f64, f64, f64);

const GEAR: &[Row] = &[
    ("teeth", 20.0, 8.0, 36.0, 1.0),
    ("radius", 5.0, 3.0, 10.0, 0.1),
    ("thickness", 1.0, 0.5, 3.0, 0.1),
    ("hole", 1.0, 0.5, 3.0, 0.1),
    ("toothDepthRatio", 0.15, 0.05, 0.3, 0.01),
    ("toothWidth", 0.5, 0.2, 0.8, 0.05),
    ("bevelSize", 0.02, 0.0, 0.2, 0.01),
];

const PIPE: &[Row] = &[
    ("length", 5.0, 1.0, 20.0, 0.5),
    ("radius", 1.0, 0.2, 5.0, 0.1),
    ("thickness", 0.2, 0.0, 1.0, 0.05),
    ("segments", 32.0, 8.0, 64.0, 1.0),
    ("taper", 0.0, -0.5, 0.5, 0.05),
];

const SPRING: &[Row] = &[
    ("radius", 1.0, 0.2, 5.0, 0.1),
    ("thickness", 0.1, 0.02, 0.5, 0.01),
    ("coils", 5.0, 2.0, 20.0, 1.0),
    ("height", 5.0, 1.0, 15.0, 0.5),
    ("tension", 0.0, -0.5, 0.5, 0.05),
    ("resolution", 256.0, 32.0, 512.0, 16.0),
    ("waveAmplitude", 0.0, 0.0, 0.5, 0.05),
    ("radialSegments", 16.0, 3.0, 32.0, 1.0),
    ("taper", 0.0, -0.4, 0.4, 0.05),
];

const BOLT: &[Row] = &[
    ("headRadius", 0.8, 0.4, 2.0, 0.1),
    ("shaftRadius", 0.4, 0.1, 1.0, 0.05),
    ("length", 3.0, 0.5, 10.0, 0.5),
    ("headHeight", 0.6, 0.2, 1.5, 0.1),
    ("threadDepth", 0.08, 0.0, 0.2, 0.01),
    ("threadPitch", 0.2, 0.05, 0.5, 0.05),
    ("threadSegments", 32.0, 8.0, 64.0, 4.0),
    ("headType", 0.0, 0.0, 2.0, 1.0),
    ("countersink", 0.0, 0.0, 1.0, 0.1),
];

const NUT: &[Row] = &[
    ("radius", 0.8, 0.3, 3.0, 0.1),
    ("height", 0.6, 0.2, 2.0, 0.1),
    ("holeRadius", 0.4, 0.1, 0.8, 0.05),
    ("chamferSize", 0.1, 0.0, 0.3, 0.05),
    ("sides", 6.0, 4.0, 8.0, 2.0),
    ("texture", 0.0, 0.0, 1.0, 0.1),
    ("threadPitch", 0.2, 0.05, 0.5, 0.05),
    ("threadDepth", 0.05, 0.0, 0.1, 0.01),
];

/// Returns the reference parameters for a part family.
pub fn default_parameters(part: PartType) -> ParameterMap {
    let rows = match part {
        PartType::Gear => GEAR,
        PartType::Pipe => PIPE,
        PartType::Spring => SPRING,
        PartType::Bolt => BOLT,
        PartType::Nut => NUT,
    };

    rows.iter()
        .map(|&(id, value, min, max, step)| Parameter::new(id, value, min, max, step))
        .collect()
}
