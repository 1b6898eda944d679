//! Decides which brushes are worth exporting

use crate::geometry::PolyBrush;
use crate::materials::MarkerMaterial;
use crate::types::ExportFlags;

/// Fewest faces a closed convex solid can have.
pub const MIN_BRUSH_FACES: usize = 4;

/// Why a brush was left out of the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullReason {
    /// Not enough faces survived to enclose a volume
    TooFewFaces,

    /// Hint, skip, portal, etc. Only meaningful to the Quake 3 compiler.
    VisibilityMarker,

    Trigger,
    Clip,
}

/// The reason `brush` shouldn't be exported with the given flags, if there is one.
pub fn cull_reason(brush: &PolyBrush, flags: ExportFlags) -> Option<CullReason> {
    if brush.faces.len() < MIN_BRUSH_FACES {
        return Some(CullReason::TooFewFaces);
    }

    brush
        .materials()
        .filter_map(MarkerMaterial::from_name)
        .find_map(|marker| match marker {
            m if m.is_visibility_marker() => Some(CullReason::VisibilityMarker),
            MarkerMaterial::Trigger if flags.contains(ExportFlags::NO_TRIGGER) => {
                Some(CullReason::Trigger)
            }
            MarkerMaterial::Clip if flags.contains(ExportFlags::NO_CLIP) => Some(CullReason::Clip),
            _ => None,
        })
}

pub fn is_exportable(brush: &PolyBrush, flags: ExportFlags) -> bool {
    cull_reason(brush, flags).is_none()
}

#[cfg(test)]
fn brush_with_materials(materials: &[&str]) -> PolyBrush {
    use crate::geometry::PolyBrushFace;
    use crate::types::TexParams;

    PolyBrush {
        vertices: vec![],
        faces: materials
            .iter()
            .map(|m| PolyBrushFace {
                material: m.to_string(),
                tex: TexParams::default(),
                indices: vec![0, 1, 2],
            })
            .collect(),
    }
}

#[test]
fn three_faces_is_too_few() {
    let brush = brush_with_materials(&["a", "a", "a"]);
    assert_eq!(
        cull_reason(&brush, ExportFlags::empty()),
        Some(CullReason::TooFewFaces)
    );

    let brush = brush_with_materials(&["a", "a", "a", "a"]);
    assert!(is_exportable(&brush, ExportFlags::empty()));
}

#[test]
fn visibility_markers_always_culled() {
    let brush = brush_with_materials(&["a", "common/hint", "a", "a"]);
    assert_eq!(
        cull_reason(&brush, ExportFlags::empty()),
        Some(CullReason::VisibilityMarker)
    );
}

#[test]
fn triggers_and_clips_culled_on_request() {
    let trigger = brush_with_materials(&["common/trigger"; 6]);
    let clip = brush_with_materials(&[crate::materials::REFLEX_CLIP; 6]);

    assert!(is_exportable(&trigger, ExportFlags::NO_CLIP));
    assert!(is_exportable(&clip, ExportFlags::NO_TRIGGER));

    assert_eq!(
        cull_reason(&trigger, ExportFlags::NO_TRIGGER),
        Some(CullReason::Trigger)
    );
    assert_eq!(
        cull_reason(&clip, ExportFlags::NO_CLIP | ExportFlags::ALL_CAULK),
        Some(CullReason::Clip)
    );
}
