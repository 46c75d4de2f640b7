pub use macroquad::math::{Rect, Vec2};

/// Axis-aligned box stored as its two extreme corners, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundingBox {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box covering the rect at `xy` with size `wh`.
    pub fn from_xy_wh(xy: Vec2, wh: Vec2) -> Self {
        Self::new(xy, xy + wh)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Grows this box so it also covers `other`.
    pub fn expand_to(&mut self, other: &BoundingBox) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Overlap of the two boxes. The result may be inverted (min > max) when they don't touch.
    pub fn intersect(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }

    /// True for an inverted box, as left by intersecting boxes that don't touch.
    /// A zero-sized box is not empty.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// True when nothing of `start..end` lies in this box: the box is empty or
    /// the range is completely outside it on some axis. Edges that merely touch
    /// count as inside.
    pub fn excludes(&self, start: Vec2, end: Vec2) -> bool {
        self.is_empty()
            || start.x > self.max.x
            || start.y > self.max.y
            || end.x < self.min.x
            || end.y < self.min.y
    }

    /// The same box as an `(x, y, w, h)` rect divided by `root`.
    pub fn normalized(&self, root: Vec2) -> Rect {
        let xy = self.min / root;
        let wh = self.size() / root;
        Rect::new(xy.x, xy.y, wh.x, wh.y)
    }
}

/// Inclusive point-in-rect test; `Rect::contains` excludes the far edges.
pub fn point_is_inside_rect(point: Vec2, rect: Rect) -> bool {
    point.x >= rect.x
        && point.x <= rect.x + rect.w
        && point.y >= rect.y
        && point.y <= rect.y + rect.h
}

/// `Vec2` as a `[x, y]` pair, for `#[serde(with = ...)]` fields.
#[cfg(feature = "serde")]
pub(crate) mod serde_vec2 {
    use super::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(v: &Vec2, serializer: S) -> Result<S::Ok, S::Error> {
        [v.x, v.y].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec2, D::Error> {
        let [x, y] = <[f32; 2]>::deserialize(deserializer)?;
        Ok(Vec2::new(x, y))
    }
}
