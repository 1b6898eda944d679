//! Well-known material names that change how a brush is treated.

/// Reflex's editor clip material. Quake clip materials are renamed to this when parsed.
pub const REFLEX_CLIP: &str = "internal/editor/textures/editor_clip";

/// Reflex's editor material for faces that are never lit or seen.
pub const REFLEX_NOLIGHT: &str = "internal/editor/textures/editor_nolight";

/// A material with special meaning to the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerMaterial {
    Hint,
    HintSkip,
    Skip,
    AreaPortal,
    ClusterPortal,
    DoNotEnter,
    Trigger,
    Clip,
    NoLight,
}

impl MarkerMaterial {
    pub const ALL: [MarkerMaterial; 9] = [
        MarkerMaterial::Hint,
        MarkerMaterial::HintSkip,
        MarkerMaterial::Skip,
        MarkerMaterial::AreaPortal,
        MarkerMaterial::ClusterPortal,
        MarkerMaterial::DoNotEnter,
        MarkerMaterial::Trigger,
        MarkerMaterial::Clip,
        MarkerMaterial::NoLight,
    ];

    /// Look up a material by name. Names are matched exactly, as they appear after parsing.
    pub fn from_name(name: &str) -> Option<MarkerMaterial> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }

    pub fn name(self) -> &'static str {
        use MarkerMaterial::*;
        match self {
            Hint => "common/hint",
            HintSkip => "common/hintskip",
            Skip => "common/skip",
            AreaPortal => "common/areaportal",
            ClusterPortal => "common/clusterportal",
            DoNotEnter => "common/donotenter",
            Trigger => "common/trigger",
            Clip => REFLEX_CLIP,
            NoLight => REFLEX_NOLIGHT,
        }
    }

    /// Compiler-only materials. Brushes using these never make it into the output.
    pub fn is_visibility_marker(self) -> bool {
        use MarkerMaterial::*;
        matches!(
            self,
            Hint | HintSkip | Skip | AreaPortal | ClusterPortal | DoNotEnter
        )
    }
}

/// Rename Quake materials that have a direct Reflex counterpart.
pub fn substitute_material(name: &str) -> String {
    match name {
        // "clip" is the quake 1 spelling
        "common/clip" | "clip" => REFLEX_CLIP.to_string(),
        _ => name.to_string(),
    }
}

#[test]
fn marker_lookup() {
    assert_eq!(MarkerMaterial::from_name("common/hint"), Some(MarkerMaterial::Hint));
    assert_eq!(MarkerMaterial::from_name(REFLEX_CLIP), Some(MarkerMaterial::Clip));
    assert_eq!(MarkerMaterial::from_name("base_wall/concrete"), None);

    for marker in MarkerMaterial::ALL.iter() {
        assert_eq!(MarkerMaterial::from_name(marker.name()), Some(*marker));
    }
}

#[test]
fn clip_is_substituted() {
    assert_eq!(substitute_material("common/clip"), REFLEX_CLIP);
    assert_eq!(substitute_material("clip"), REFLEX_CLIP);
    assert_eq!(substitute_material("common/trigger"), "common/trigger");
}
