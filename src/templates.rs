//! Static template registry: canvas geometry and safe zones.
//!
//! A [`Template`] describes one promotional frame: the output canvas size,
//! the rectangular safe zone where the user's photo is visible (the overlay
//! graphic has a matching transparent window), the overlay asset it pairs
//! with, and the default export filename.
//!
//! Templates are compile-time constants — there is no runtime mutation. The
//! compositor consumes them purely as configuration.
//!
//! ## Live templates
//!
//! | id | canvas | safe zone | pan |
//! |---|---|---|---|
//! | `feed` | 1080×1350 | 810×922 at (136, 134) | no |
//! | `story` | 1080×1920 | 904×1129 at (87, 262) | yes |
//! | `story-centered` | 1080×1920 | 840×840 at (120, 205) | yes |
//!
//! `story-centered` is the square-window story variant. Its overlay asset
//! keeps the opaque upload name it shipped under.
//!
//! The feed export filename deliberately reuses the generic
//! `MetodoIP_Confirmation.png` — the campaign never shipped a
//! feed-specific name. Override it via [`config`](crate::config) if needed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The rectangular region of the canvas where user content may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafeZone {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SafeZone {
    /// Centroid of the zone in canvas pixels.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// Identifier for a registered template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    Feed,
    Story,
    StoryCentered,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [
        TemplateId::Feed,
        TemplateId::Story,
        TemplateId::StoryCentered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Feed => "feed",
            TemplateId::Story => "story",
            TemplateId::StoryCentered => "story-centered",
        }
    }

    /// Whether the editor for this template exposes a pan (drag) control.
    ///
    /// The feed editor exposes zoom only — recentered zoom, no translation.
    /// This asymmetry is intentional product behavior, not a missing feature.
    pub fn pan_enabled(&self) -> bool {
        match self {
            TemplateId::Feed => false,
            TemplateId::Story | TemplateId::StoryCentered => true,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feed" => Ok(TemplateId::Feed),
            "story" => Ok(TemplateId::Story),
            "story-centered" => Ok(TemplateId::StoryCentered),
            other => Err(format!(
                "unknown template '{other}' (expected feed, story, or story-centered)"
            )),
        }
    }
}

/// One promotional frame configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: TemplateId,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub safe_zone: SafeZone,
    /// Overlay asset filename, resolved against the configured asset base.
    pub overlay_asset: &'static str,
    /// Default filename for the exported artifact.
    pub export_filename: &'static str,
}

impl Template {
    /// Look up a registered template. Total — every id has an entry.
    pub fn get(id: TemplateId) -> &'static Template {
        match id {
            TemplateId::Feed => &FEED,
            TemplateId::Story => &STORY,
            TemplateId::StoryCentered => &STORY_CENTERED,
        }
    }

    pub fn all() -> impl Iterator<Item = &'static Template> {
        TemplateId::ALL.iter().map(|id| Template::get(*id))
    }

    /// Invariant: the safe zone lies entirely within the canvas.
    pub fn safe_zone_in_bounds(&self) -> bool {
        self.safe_zone.x + self.safe_zone.width <= self.canvas_width
            && self.safe_zone.y + self.safe_zone.height <= self.canvas_height
    }
}

pub static FEED: Template = Template {
    id: TemplateId::Feed,
    canvas_width: 1080,
    canvas_height: 1350,
    safe_zone: SafeZone {
        x: 136,
        y: 134,
        width: 810,
        height: 922,
    },
    overlay_asset: "SDC_Embaixador_feed.png",
    export_filename: "MetodoIP_Confirmation.png",
};

pub static STORY: Template = Template {
    id: TemplateId::Story,
    canvas_width: 1080,
    canvas_height: 1920,
    safe_zone: SafeZone {
        x: 87,
        y: 262,
        width: 904,
        height: 1129,
    },
    overlay_asset: "SDC_Embaixador_Story.png",
    export_filename: "MetodoIP_Story_Confirmation.png",
};

pub static STORY_CENTERED: Template = Template {
    id: TemplateId::StoryCentered,
    canvas_width: 1080,
    canvas_height: 1920,
    safe_zone: SafeZone {
        x: 120,
        y: 205,
        width: 840,
        height: 840,
    },
    // Retains its original upload name.
    overlay_asset: "e77661f0-ee92-47aa-ba3b-055b36b8a166.png",
    export_filename: "MetodoIP_Confirmation.png",
};
