//! Display styles derived from event classification.

use std::fmt;

use serde::{Serialize, Serializer};

/// Background color for events that have already ended.
pub const PAST_COLOR: Rgb = Rgb(222, 105, 135);

/// Background color for events that have not ended yet.
pub const UPCOMING_COLOR: Rgb = Rgb(140, 189, 76);

/// An sRGB color. Displays and serializes as CSS, e.g. `rgb(222, 105, 135)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Style metadata handed to the presentation layer with each visible event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStyle {
    pub background_color: Rgb,
}
