//! Enumerated layout choices.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use colorbar_common::Error;

use crate::schema::AttrValue;

/// Wire literals accepted for `orientation`.
pub const ORIENTATIONS: &[&str] = &["vertical", "horizontal"];

/// Wire literals accepted for `side`.
pub const SIDES: &[&str] = &["bottomright", "topleft"];

/// Direction along which the color bar runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" => Ok(Orientation::Vertical),
            "horizontal" => Ok(Orientation::Horizontal),
            other => Err(Error::constraint(
                "orientation",
                format!("expected one of {:?}, got '{}'", ORIENTATIONS, other),
            )),
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Orientation> for AttrValue {
    fn from(v: Orientation) -> Self {
        AttrValue::Text(v.as_str().to_string())
    }
}

/// Side of the bar the axis is drawn on.
///
/// `BottomRight` puts the axis below a horizontal bar or right of a vertical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    BottomRight,
    TopLeft,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::BottomRight => "bottomright",
            Side::TopLeft => "topleft",
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottomright" => Ok(Side::BottomRight),
            "topleft" => Ok(Side::TopLeft),
            other => Err(Error::constraint(
                "side",
                format!("expected one of {:?}, got '{}'", SIDES, other),
            )),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Side> for AttrValue {
    fn from(v: Side) -> Self {
        AttrValue::Text(v.as_str().to_string())
    }
}
