//! Body landmarks delivered to the recognizers once per tick.
//!
//! Landmarks are a closed set resolved when the tracking source is wired up;
//! recognizers never look bones up by name.

use std::collections::HashMap;
use std::fmt;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Named body landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landmark {
    Head,
    RightHand,
    LeftHand,
    RightFoot,
    LeftFoot,
}

impl Landmark {
    pub const COUNT: usize = 5;

    pub const ALL: [Landmark; Landmark::COUNT] = [
        Landmark::Head,
        Landmark::RightHand,
        Landmark::LeftHand,
        Landmark::RightFoot,
        Landmark::LeftFoot,
    ];

    fn index(self) -> usize {
        match self {
            Landmark::Head => 0,
            Landmark::RightHand => 1,
            Landmark::LeftHand => 2,
            Landmark::RightFoot => 3,
            Landmark::LeftFoot => 4,
        }
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Landmark::Head => write!(f, "Head"),
            Landmark::RightHand => write!(f, "Right Hand"),
            Landmark::LeftHand => write!(f, "Left Hand"),
            Landmark::RightFoot => write!(f, "Right Foot"),
            Landmark::LeftFoot => write!(f, "Left Foot"),
        }
    }
}

/// Fixed-size table of optional landmark positions (world space)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<Landmark, Vec3>", into = "HashMap<Landmark, Vec3>")]
pub struct LandmarkSet {
    positions: [Option<Vec3>; Landmark::COUNT],
}

impl LandmarkSet {
    pub fn get(&self, landmark: Landmark) -> Option<Vec3> {
        self.positions[landmark.index()]
    }

    pub fn set(&mut self, landmark: Landmark, position: Vec3) {
        self.positions[landmark.index()] = Some(position);
    }

    pub fn clear(&mut self, landmark: Landmark) {
        self.positions[landmark.index()] = None;
    }
}

impl From<HashMap<Landmark, Vec3>> for LandmarkSet {
    fn from(map: HashMap<Landmark, Vec3>) -> Self {
        let mut set = LandmarkSet::default();
        for (landmark, position) in map {
            set.set(landmark, position);
        }
        set
    }
}

impl From<LandmarkSet> for HashMap<Landmark, Vec3> {
    fn from(set: LandmarkSet) -> Self {
        Landmark::ALL
            .iter()
            .filter_map(|&lm| set.get(lm).map(|p| (lm, p)))
            .collect()
    }
}

fn identity_rotation() -> Quat {
    Quat::IDENTITY
}

/// Reference frame (usually the avatar root) that landmarks are measured in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    #[serde(default = "identity_rotation")]
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Transform a world-space point into this frame's local space
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Everything the recognizers see for one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// True once the motion source has delivered its first full pose
    #[serde(default)]
    pub ready: bool,

    #[serde(default)]
    pub landmarks: LandmarkSet,

    /// Avatar root; landmarks are measured in world space when absent
    #[serde(default)]
    pub reference: Option<Pose>,
}

impl Frame {
    /// An empty frame with tracking marked as ready
    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }

    /// Builder-style landmark assignment
    pub fn with(mut self, landmark: Landmark, position: Vec3) -> Self {
        self.landmarks.set(landmark, position);
        self
    }

    pub fn with_reference(mut self, reference: Pose) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Landmark position in the reference frame (or world space)
    pub fn local(&self, landmark: Landmark) -> Option<Vec3> {
        let world = self.landmarks.get(landmark)?;
        Some(match &self.reference {
            Some(pose) => pose.to_local(world),
            None => world,
        })
    }
}
