use crate::color::Color;
use crate::id::AssetId;
use crate::math::{Rect, Vec2};
use crate::ElemIdx;

/// Curve data of a resolved curve primitive, in normalized screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCurve {
    /// The element's control points mapped onto its on-screen rect.
    pub control_points: [Vec2; 4],
    pub segments: u32,
    pub width: f32,
    /// Clip rect of the owning element. Curves are not clamped by the resolver,
    /// so the renderer has to clip the tessellated curve against this.
    pub clip_rect_nrm: Rect,
}

impl ResolvedCurve {
    /// Flattens the curve into `segments + 1` evenly parameterised points.
    #[cfg(feature = "curves")]
    pub fn sample_points(&self) -> Vec<Vec2> {
        use lyon::geom::CubicBezierSegment;
        use lyon::math::point;

        let [from, ctrl1, ctrl2, to] = self.control_points.map(|p| point(p.x, p.y));
        let segment = CubicBezierSegment { from, ctrl1, ctrl2, to };
        let steps = self.segments.max(1);
        (0..=steps)
            .map(|i| {
                let p = segment.sample(i as f32 / steps as f32);
                Vec2::new(p.x, p.y)
            })
            .collect()
    }
}

/// One drawable primitive in normalized `0..=1` screen space.
///
/// Each drawn element yields one background primitive, followed by one
/// primitive per glyph of its text.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub elem_idx: ElemIdx,
    pub colour: Color,
    /// Top-left of the clamped rect. Zero for curves.
    pub pos: Vec2,
    /// Size of the clamped rect. Zero for curves.
    pub scale: Vec2,
    /// Fraction of the UV range cut away at the start of each axis.
    /// `y` is measured from the bottom edge.
    pub clip_start: Vec2,
    /// One minus the fraction cut away at the end of each axis.
    /// `y` is measured from the top edge.
    pub clip_end: Vec2,
    /// Set for glyph primitives.
    pub text_char: Option<char>,
    pub font: Option<AssetId>,
    pub bg_img: Option<AssetId>,
    pub rot: f32,
    pub curve: Option<ResolvedCurve>,
}

impl Resolved {
    pub fn is_glyph(&self) -> bool {
        self.text_char.is_some()
    }

    pub fn is_curve(&self) -> bool {
        self.curve.is_some()
    }

    /// Whether the primitive is an element background usable for hit testing.
    pub fn is_background(&self) -> bool {
        !self.is_glyph() && !self.is_curve()
    }
}
