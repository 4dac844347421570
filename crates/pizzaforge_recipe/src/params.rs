use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const CHEESE_MIN: u32 = 200;
pub const CHEESE_MAX: u32 = 750;
pub const CHEESE_STEP: u32 = 50;

/// Dough thickness. Heights are fixed per variant.
#[derive(Serialize, Deserialize, Reflect, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    Thin,
    #[default]
    Medium,
    Thick,
}

impl BaseType {
    pub const ALL: [BaseType; 3] = [BaseType::Thin, BaseType::Medium, BaseType::Thick];

    pub fn height(self) -> f32 {
        match self {
            BaseType::Thin => 0.04,
            BaseType::Medium => 0.08,
            BaseType::Thick => 0.15,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BaseType::Thin => "Thin",
            BaseType::Medium => "Medium",
            BaseType::Thick => "Thick",
        }
    }
}

/// Pizza diameter in centimeters. Serialized as the bare number, radii are
/// fixed per variant.
#[derive(Serialize, Deserialize, Reflect, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(into = "u32", try_from = "u32")]
pub enum BaseSize {
    Cm28,
    #[default]
    Cm33,
    Cm40,
}

impl BaseSize {
    pub const ALL: [BaseSize; 3] = [BaseSize::Cm28, BaseSize::Cm33, BaseSize::Cm40];

    pub fn radius(self) -> f32 {
        match self {
            BaseSize::Cm28 => 1.9,
            BaseSize::Cm33 => 2.2,
            BaseSize::Cm40 => 2.7,
        }
    }

    pub fn centimeters(self) -> u32 {
        u32::from(self)
    }
}

impl From<BaseSize> for u32 {
    fn from(size: BaseSize) -> u32 {
        match size {
            BaseSize::Cm28 => 28,
            BaseSize::Cm33 => 33,
            BaseSize::Cm40 => 40,
        }
    }
}

impl TryFrom<u32> for BaseSize {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            28 => Ok(BaseSize::Cm28),
            33 => Ok(BaseSize::Cm33),
            40 => Ok(BaseSize::Cm40),
            other => Err(format!("unknown base size {other} cm")),
        }
    }
}

/// Current dough configuration. Base or size changes rebuild the base and
/// sauce meshes; cheese changes rebuild the cheese group.
#[derive(Resource, Reflect, Clone, Debug, PartialEq)]
#[reflect(Resource)]
pub struct BaseParams {
    pub base_type: BaseType,
    pub base_size: BaseSize,
    pub cheese_amount: u32,
}

impl Default for BaseParams {
    fn default() -> Self {
        Self {
            base_type: BaseType::default(),
            base_size: BaseSize::default(),
            cheese_amount: 250,
        }
    }
}

impl BaseParams {
    pub fn height(&self) -> f32 {
        self.base_type.height()
    }

    pub fn radius(&self) -> f32 {
        self.base_size.radius()
    }
}
