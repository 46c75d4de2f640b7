use crate::align::AnchorType;
use crate::color::Color;
use crate::id::AssetId;
use crate::layout::{Measure, PenDir, PosType, ResolveType};
use crate::math::Vec2;
use crate::ElemIdx;

/// Cubic curve drawn in place of the element's rect.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bezier {
    /// Control points in the element's local `0..=1` space.
    pub control_points: [Vec2; 4],
    /// Tessellation segment count, passed through to the renderer.
    pub segments: u32,
    /// Stroke width, passed through to the renderer.
    pub width: f32,
}

/// One declaratively configured UI element.
///
/// Elements live in a flat slice and are identified by their index in it.
/// Parents are referenced by index too, so the whole tree can be rebuilt
/// from scratch every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Elem {
    /// `None` makes this a root, laid out against the whole screen.
    pub parent_idx: Option<ElemIdx>,
    pub pos_type: PosType,
    pub resolve_type: ResolveType,
    pub anchor_type: AnchorType,
    /// Offset from the anchor point. Ignored for [`PosType::Relative`].
    pub xy: Measure,
    /// Carried to the output untouched; layout ignores it.
    pub rot: f32,
    /// Size. Ignored for [`ResolveType::Flex`].
    pub wh: Measure,
    /// Inset on all four sides, applied to flex sizing and the pen start.
    pub padding: f32,
    pub pen_dir: PenDir,
    /// Gap between consecutive pen-placed children.
    pub pen_spacing: f32,
    pub text: Option<String>,
    pub font: Option<AssetId>,
    pub font_size: f32,
    pub text_col: Color,
    pub bg_img: Option<AssetId>,
    pub bg_col: Color,
    /// Scroll position per axis; `0` shows the start of the content, `1` its end.
    pub scroll_offset: Vec2,
    pub bezier: Option<Bezier>,
}

impl Default for Elem {
    fn default() -> Self {
        Self {
            parent_idx: None,
            pos_type: PosType::Absolute,
            resolve_type: ResolveType::Static,
            anchor_type: AnchorType::TopLeft,
            xy: Measure::default(),
            rot: 0.0,
            wh: Measure::default(),
            padding: 0.0,
            pen_dir: PenDir::Vertical,
            pen_spacing: 0.0,
            text: None,
            font: None,
            font_size: 0.0,
            text_col: Color::WHITE,
            bg_img: None,
            bg_col: Color::TRANSPARENT,
            scroll_offset: Vec2::ZERO,
            bezier: None,
        }
    }
}

impl Elem {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn parent(&mut self, parent_idx: ElemIdx) -> &mut Self {
        self.parent_idx = Some(parent_idx);
        self
    }

    /// Places the element at `xy` from its anchor point.
    #[inline]
    pub fn absolute(&mut self, xy: impl Into<Measure>) -> &mut Self {
        self.pos_type = PosType::Absolute;
        self.xy = xy.into();
        self
    }

    /// Places the element at the parent's pen.
    #[inline]
    pub fn relative(&mut self) -> &mut Self {
        self.pos_type = PosType::Relative;
        self
    }

    #[inline]
    pub fn anchor(&mut self, anchor: impl Into<AnchorType>) -> &mut Self {
        self.anchor_type = anchor.into();
        self
    }

    /// Declares a static size.
    #[inline]
    pub fn size(&mut self, wh: impl Into<Measure>) -> &mut Self {
        self.resolve_type = ResolveType::Static;
        self.wh = wh.into();
        self
    }

    /// Sizes the element around its children, stacking them along `pen_dir`.
    #[inline]
    pub fn flex(&mut self, pen_dir: PenDir) -> &mut Self {
        self.resolve_type = ResolveType::Flex;
        self.pen_dir = pen_dir;
        self
    }

    #[inline]
    pub fn pen(&mut self, pen_dir: PenDir, spacing: f32) -> &mut Self {
        self.pen_dir = pen_dir;
        self.pen_spacing = spacing;
        self
    }

    #[inline]
    pub fn padding(&mut self, padding: f32) -> &mut Self {
        self.padding = padding;
        self
    }

    #[inline]
    pub fn rotation(&mut self, rot: f32) -> &mut Self {
        self.rot = rot;
        self
    }

    #[inline]
    pub fn text(&mut self, text: impl Into<String>, font: impl Into<AssetId>, font_size: f32) -> &mut Self {
        self.text = Some(text.into());
        self.font = Some(font.into());
        self.font_size = font_size;
        self
    }

    #[inline]
    pub fn text_color(&mut self, color: impl Into<Color>) -> &mut Self {
        self.text_col = color.into();
        self
    }

    #[inline]
    pub fn background_color(&mut self, color: impl Into<Color>) -> &mut Self {
        self.bg_col = color.into();
        self
    }

    #[inline]
    pub fn background_image(&mut self, image: impl Into<AssetId>) -> &mut Self {
        self.bg_img = Some(image.into());
        self
    }

    /// Sets the scroll position, each axis clamped to `0..=1`.
    #[inline]
    pub fn scroll(&mut self, x: f32, y: f32) -> &mut Self {
        self.scroll_offset = Vec2::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0));
        self
    }

    #[inline]
    pub fn curve(&mut self, control_points: [Vec2; 4], segments: u32, width: f32) -> &mut Self {
        self.bezier = Some(Bezier {
            control_points,
            segments,
            width,
        });
        self
    }

    /// Finishes a builder chain, returning an owned element.
    #[inline]
    pub fn end(&mut self) -> Elem {
        self.clone()
    }
}
