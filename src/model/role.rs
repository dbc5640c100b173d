use glam::DVec3;

use crate::foundation::value::PathValue;
use crate::path::tree::PathTree;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Payload carried by a channel.
pub enum Payload {
    /// `f64` values (`"double"` in documents).
    Scalar,
    /// `DVec3` values (`"dvec3"` in documents).
    Vector,
}

impl Payload {
    /// Tag written in the `Data` field of a path document.
    pub fn data_tag(self) -> &'static str {
        match self {
            Self::Scalar => <f64 as PathValue>::DATA_TAG,
            Self::Vector => <DVec3 as PathValue>::DATA_TAG,
        }
    }

    /// Inverse of [`Self::data_tag`].
    pub fn from_data_tag(tag: &str) -> Option<Self> {
        [Self::Scalar, Self::Vector]
            .into_iter()
            .find(|p| p.data_tag() == tag)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Well-known animation roles driven by the stage.
pub enum Role {
    /// Point the camera looks at.
    CameraTo,
    /// Camera eye position.
    CameraEye,
    /// Camera field of view.
    CameraFoV,
    /// Position of the tracked fruit object.
    TheFruit,
    /// Position of the cloud layer.
    Clouds,
    /// Time of day driving the sun.
    DayTime,
    /// Hall light intensity.
    HallLight,
    /// Room light intensity.
    RoomLight,
}

impl Role {
    /// Every well-known role, in document order.
    pub const ALL: [Role; 8] = [
        Role::CameraTo,
        Role::CameraEye,
        Role::CameraFoV,
        Role::TheFruit,
        Role::Clouds,
        Role::DayTime,
        Role::HallLight,
        Role::RoomLight,
    ];

    /// Name under which the role is registered.
    pub fn name(self) -> &'static str {
        match self {
            Self::CameraTo => "CameraTo",
            Self::CameraEye => "CameraEye",
            Self::CameraFoV => "CameraFoV",
            Self::TheFruit => "TheFruit",
            Self::Clouds => "Clouds",
            Self::DayTime => "DayTime",
            Self::HallLight => "HallLight",
            Self::RoomLight => "RoomLight",
        }
    }

    /// Fixed payload of the role.
    pub fn payload(self) -> Payload {
        match self {
            Self::CameraTo | Self::CameraEye | Self::TheFruit | Self::Clouds => Payload::Vector,
            Self::CameraFoV | Self::DayTime | Self::HallLight | Self::RoomLight => Payload::Scalar,
        }
    }

    /// Look a role up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A path tree registered under a role, tagged by payload.
pub enum Channel {
    /// Scalar path.
    Scalar(PathTree<f64>),
    /// Vector path.
    Vector(PathTree<DVec3>),
}

impl Channel {
    /// Payload of the channel.
    pub fn payload(&self) -> Payload {
        match self {
            Self::Scalar(_) => Payload::Scalar,
            Self::Vector(_) => Payload::Vector,
        }
    }

    /// Total duration of the channel's path.
    pub fn duration(&self) -> f64 {
        match self {
            Self::Scalar(t) => t.duration(),
            Self::Vector(t) => t.duration(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/role.rs"]
mod tests;
