use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Ingredient archetypes
// ---------------------------------------------------------------------------

/// Mesh family for a topping archetype.
#[derive(Serialize, Deserialize, Reflect, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Cylinder,
    Mushroom,
    Torus,
    Leaf,
    Cube,
    #[default]
    Sphere,
}

/// Immutable definition of a topping kind. The full record doubles as the
/// palette drop payload, serialized at drag start and parsed on drop.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Archetype {
    pub id: String,
    pub name: String,
    /// Packed 0xRRGGBB.
    pub color: u32,
    pub shape: ShapeKind,
}

impl Archetype {
    pub fn color(&self) -> Color {
        Color::srgb_u8(
            (self.color >> 16) as u8,
            (self.color >> 8) as u8,
            self.color as u8,
        )
    }
}

/// The six built-in archetypes, in palette order.
pub fn builtin_archetypes() -> Vec<Archetype> {
    fn archetype(id: &str, name: &str, color: u32, shape: ShapeKind) -> Archetype {
        Archetype {
            id: id.to_owned(),
            name: name.to_owned(),
            color,
            shape,
        }
    }
    vec![
        archetype("pepperoni", "Pepperoni", 0xb23d3d, ShapeKind::Cylinder),
        archetype("mushroom", "Mushroom", 0xdcd2c1, ShapeKind::Mushroom),
        archetype("olive", "Olive", 0x2a3a2a, ShapeKind::Torus),
        archetype("basil", "Basil", 0x3c7a3c, ShapeKind::Leaf),
        archetype("pineapple", "Pineapple", 0xffe7a3, ShapeKind::Cube),
        archetype("onion", "Onion", 0xe6b0ff, ShapeKind::Sphere),
    ]
}

/// Archetype lookup table, populated at plugin init.
#[derive(Resource, Clone, Debug)]
pub struct ArchetypeRegistry {
    archetypes: Vec<Archetype>,
}

impl Default for ArchetypeRegistry {
    fn default() -> Self {
        Self {
            archetypes: builtin_archetypes(),
        }
    }
}

impl ArchetypeRegistry {
    pub fn get(&self, id: &str) -> Option<&Archetype> {
        self.archetypes.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Archetype> {
        self.archetypes.iter()
    }
}

// ---------------------------------------------------------------------------
// Placed topping component
// ---------------------------------------------------------------------------

/// One placed topping instance. Position lives on the entity's `Transform`;
/// this component ties it back to its archetype.
#[derive(Component, Reflect, Clone, Debug, Default)]
#[reflect(Component, Default)]
pub struct Topping {
    pub archetype_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_every_builtin() {
        let registry = ArchetypeRegistry::default();
        for archetype in builtin_archetypes() {
            let found = registry.get(&archetype.id).expect("missing archetype");
            assert_eq!(*found, archetype);
        }
        assert!(registry.get("anchovy").is_none());
    }

    #[test]
    fn payload_round_trips_through_json() {
        let payload = builtin_archetypes().remove(0);
        let text = serde_json::to_string(&payload).unwrap();
        assert!(text.contains("\"pepperoni\""));
        assert!(text.contains("\"cylinder\""));
        let back: Archetype = serde_json::from_str(&text).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn color_unpacks_srgb_bytes() {
        let pepperoni = builtin_archetypes().remove(0);
        assert_eq!(pepperoni.color(), Color::srgb_u8(0xb2, 0x3d, 0x3d));
    }
}
