//! Pure Rust implementation of the zp UI resolver.
//! Turns a flat slice of declared elements into clipped, normalized draw primitives.

use rustc_hash::FxHashMap;
use tracing::{debug, error, trace, warn};

use crate::align::{AlignX, AlignY, AnchorType};
use crate::color::Color;
use crate::elements::{Bezier, Elem};
use crate::errors::{Error, ErrorType};
use crate::id::AssetId;
use crate::layout::{PenDir, PosType, ResolveType};
use crate::math::{BoundingBox, Rect, Vec2};
use crate::render_commands::{Resolved, ResolvedCurve};
use crate::text::{FontMap, MissingGlyph, PlacedGlyph};
use crate::ElemIdx;

// ============================================================================
// Scratch state
// ============================================================================

/// A primitive in screen pixels, before clipping and normalization.
#[derive(Debug, Clone)]
struct Unclipped {
    elem_idx: ElemIdx,
    colour: Color,
    xy: Vec2,
    wh: Vec2,
    text_char: Option<char>,
    font: Option<AssetId>,
    bg_img: Option<AssetId>,
    rot: f32,
    bezier: Option<Bezier>,
}

/// Per-frame working memory. Everything here is rebuilt by every update; the
/// buffers are only kept to reuse their allocations.
///
/// Per-element vectors are indexed by `ElemIdx`.
#[derive(Debug, Default)]
struct Scratch {
    roots: Vec<ElemIdx>,
    children: Vec<Vec<ElemIdx>>,
    /// Depth-first pre-order of every reachable element, as `(depth, idx)`.
    order: Vec<(u32, ElemIdx)>,
    dfs_stack: Vec<(u32, ElemIdx)>,

    // statics are declared, flexes depend on their children
    wh: Vec<Vec2>,
    // for parents: where the next relative child goes
    pens: Vec<Vec2>,
    // for children: where they sit relative to the parent's anchor point
    offsets_to_parents: Vec<Vec2>,
    // final top-left on screen, scroll included once the scroll pass ran
    xy: Vec<Vec2>,

    scrollable_areas: Vec<BoundingBox>,
    scroll_offsets: Vec<Vec2>,
    cum_scroll_offsets: Vec<Vec2>,

    clip_bbs: Vec<BoundingBox>,

    unclippeds: Vec<Unclipped>,
    glyphs: Vec<PlacedGlyph>,
}

impl Scratch {
    fn reset(&mut self, elem_count: usize) {
        self.roots.clear();
        self.children.iter_mut().for_each(Vec::clear);
        self.children.resize_with(elem_count, Vec::new);
        self.order.clear();
        self.dfs_stack.clear();

        for v in [
            &mut self.wh,
            &mut self.pens,
            &mut self.offsets_to_parents,
            &mut self.xy,
            &mut self.scroll_offsets,
            &mut self.cum_scroll_offsets,
        ] {
            v.clear();
            v.resize(elem_count, Vec2::ZERO);
        }
        for v in [&mut self.scrollable_areas, &mut self.clip_bbs] {
            v.clear();
            v.resize(elem_count, BoundingBox::default());
        }

        self.unclippeds.clear();
        self.glyphs.clear();
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn fail(type_: ErrorType, elem_idx: ElemIdx, text: impl Into<String>) -> Error {
    let err = Error::new(type_, Some(elem_idx), text);
    error!(elem_idx, kind = ?err.type_, "{}", err.text);
    err
}

/// Top-left of an element's rect given its parent's rect and the anchor.
pub(crate) fn anchored_xy(anchor: AnchorType, par_xy: Vec2, par_wh: Vec2, offset: Vec2, wh: Vec2) -> Vec2 {
    let x = match anchor.align_x() {
        AlignX::Left => par_xy.x + offset.x,
        AlignX::CenterX => par_xy.x + par_wh.x * 0.5 + offset.x,
        AlignX::Right => par_xy.x + par_wh.x - (offset.x + wh.x),
    };
    let y = match anchor.align_y() {
        AlignY::Top => par_xy.y + offset.y,
        AlignY::CenterY => par_xy.y + par_wh.y * 0.5 + offset.y,
        AlignY::Bottom => par_xy.y + par_wh.y - (offset.y + wh.y),
    };
    Vec2::new(x, y)
}

// ============================================================================
// Resolver
// ============================================================================

/// Owns the scratch memory reused between frames.
#[derive(Debug, Default)]
pub(crate) struct Resolver {
    scratch: Scratch,
}

/// Borrowed inputs of one update plus the scratch memory the passes write to.
struct Frame<'a> {
    root: Vec2,
    elems: &'a [Elem],
    fonts: &'a FontMap,
    s: &'a mut Scratch,
}

impl Resolver {
    /// Runs every pass over `elems` and writes the frame's primitives to `output`.
    ///
    /// `output` is cleared first. On error it may hold nothing useful and the
    /// caller is expected to discard it.
    pub(crate) fn resolve(
        &mut self,
        root: Vec2,
        elems: &[Elem],
        fonts: &FontMap,
        output: &mut Vec<Resolved>,
    ) -> Result<(), Error> {
        output.clear();
        if !(root.x > 0.0 && root.y > 0.0) {
            let err = Error::new(
                ErrorType::InvalidRootSize,
                None,
                format!("root size {}x{} must be positive", root.x, root.y),
            );
            error!(kind = ?err.type_, "{}", err.text);
            return Err(err);
        }

        let mut frame = Frame {
            root,
            elems,
            fonts,
            s: &mut self.scratch,
        };

        frame.build_tree()?;
        frame.validate()?;
        frame.size_statics();
        frame.size_flexes();
        frame.resolve_offsets();
        frame.resolve_rects();
        frame.resolve_scroll();
        frame.resolve_clip_bounds();
        frame.expand_primitives()?;
        frame.clip_and_normalize(output);
        Ok(())
    }
}

impl<'a> Frame<'a> {
    #[inline]
    fn elem(&self, idx: ElemIdx) -> &'a Elem {
        &self.elems[idx as usize]
    }

    /// Size percentages of `elem` are relative to. Roots use the whole screen.
    #[inline]
    fn parent_wh(&self, elem: &Elem) -> Vec2 {
        match elem.parent_idx {
            Some(p) => self.s.wh[p as usize],
            None => self.root,
        }
    }

    // ========================================================================
    // Tree
    // ========================================================================

    fn build_tree(&mut self) -> Result<(), Error> {
        let count = self.elems.len();
        self.s.reset(count);

        let s = &mut *self.s;
        for (i, elem) in self.elems.iter().enumerate() {
            let idx = i as ElemIdx;
            match elem.parent_idx {
                Some(p) if (p as usize) < count => s.children[p as usize].push(idx),
                Some(p) => {
                    return Err(fail(
                        ErrorType::ParentOutOfRange,
                        idx,
                        format!("parent index {p} is out of range for {count} elements"),
                    ))
                }
                None => s.roots.push(idx),
            }
        }

        // pre-order, roots and siblings in array order
        s.dfs_stack.extend(s.roots.iter().rev().map(|&root| (0, root)));
        while let Some((depth, idx)) = s.dfs_stack.pop() {
            s.order.push((depth, idx));
            s.dfs_stack
                .extend(s.children[idx as usize].iter().rev().map(|&child| (depth + 1, child)));
        }

        if s.order.len() < count {
            warn!(
                unreachable = count - s.order.len(),
                "elements with cyclic parent links are not reachable from any root and are skipped"
            );
        }
        trace!(roots = s.roots.len(), reachable = s.order.len(), "built element tree");
        Ok(())
    }

    fn validate(&self) -> Result<(), Error> {
        for &(_, idx) in &self.s.order {
            let elem = self.elem(idx);
            let parent = elem.parent_idx.map(|p| self.elem(p));

            if elem.resolve_type == ResolveType::Flex && self.s.children[idx as usize].is_empty() {
                return Err(fail(ErrorType::FlexWithoutChildren, idx, "flex element has no children"));
            }

            for (name, measure) in [("xy", elem.xy), ("wh", elem.wh)] {
                if !measure.is_percentage() {
                    continue;
                }
                if !measure.in_percentage_range() {
                    return Err(fail(
                        ErrorType::PercentageOutOfRange,
                        idx,
                        format!("percentage {name} {} is outside -1..=1", measure.value()),
                    ));
                }
                if parent.is_some_and(|p| p.resolve_type == ResolveType::Flex) {
                    return Err(fail(
                        ErrorType::PercentageUnderFlexParent,
                        idx,
                        format!("percentage {name} with a flex parent is unsupported"),
                    ));
                }
            }

            if elem.pos_type == PosType::Relative && parent.is_none() {
                return Err(fail(
                    ErrorType::MissingParent,
                    idx,
                    "relative placement needs a parent pen, but the element is a root",
                ));
            }

            if let Some(text) = &elem.text {
                let Some(font) = elem.font else {
                    return Err(fail(ErrorType::TextWithoutFont, idx, format!("text {text:?} has no font")));
                };
                if !self.fonts.contains_key(&font) {
                    return Err(fail(ErrorType::FontNotFound, idx, format!("font {font:?} is not loaded")));
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Sizing
    // ========================================================================

    /// Parents before children, so percentage sizes can read the parent's size.
    fn size_statics(&mut self) {
        for i in 0..self.s.order.len() {
            let idx = self.s.order[i].1;
            let elem = self.elem(idx);
            if elem.resolve_type != ResolveType::Static {
                continue;
            }
            let wh = elem.wh.resolve(self.parent_wh(elem));
            self.s.wh[idx as usize] = wh;
        }
    }

    /// Children before parents.
    ///
    /// For n children a flex is `2 * padding + (n - 1) * pen_spacing + sum of
    /// children` along its pen, and `2 * padding + largest child` across it.
    /// Every child counts, including absolutely placed ones.
    fn size_flexes(&mut self) {
        let s = &mut *self.s;
        for &(_, idx) in s.order.iter().rev() {
            let elem = &self.elems[idx as usize];
            if elem.resolve_type != ResolveType::Flex {
                continue;
            }

            let children = &s.children[idx as usize];
            let mut largest = Vec2::ZERO;
            let mut sum = Vec2::ZERO;
            for &child in children {
                let size = s.wh[child as usize];
                largest = largest.max(size);
                sum += size;
            }
            let spacing = elem.pen_spacing * children.len().saturating_sub(1) as f32;

            let content = match elem.pen_dir {
                PenDir::Vertical => Vec2::new(largest.x, sum.y + spacing),
                PenDir::Horizontal => Vec2::new(sum.x + spacing, largest.y),
            };
            s.wh[idx as usize] = Vec2::splat(2.0 * elem.padding) + content;
        }
        trace!("sized elements");
    }

    // ========================================================================
    // Positioning
    // ========================================================================

    /// Offsets to parents. Relative children read and bump their parent's pen
    /// in traversal order, so siblings stack.
    fn resolve_offsets(&mut self) {
        for i in 0..self.s.order.len() {
            let idx = self.s.order[i].1;
            let elem = self.elem(idx);

            self.s.pens[idx as usize] = Vec2::splat(elem.padding);

            let offset = match (elem.pos_type, elem.parent_idx) {
                (PosType::Relative, Some(p)) => {
                    let parent = self.elem(p);
                    let par_pen = self.s.pens[p as usize];
                    let wh = self.s.wh[idx as usize];

                    let mut next_pen = par_pen;
                    match parent.pen_dir {
                        PenDir::Vertical => next_pen.y += wh.y + parent.pen_spacing,
                        PenDir::Horizontal => next_pen.x += wh.x + parent.pen_spacing,
                    }
                    self.s.pens[p as usize] = next_pen;
                    par_pen
                }
                _ => elem.xy.resolve(self.parent_wh(elem)),
            };
            self.s.offsets_to_parents[idx as usize] = offset;
        }
    }

    fn resolve_rects(&mut self) {
        for i in 0..self.s.order.len() {
            let idx = self.s.order[i].1;
            let elem = self.elem(idx);

            let (par_xy, par_wh) = match elem.parent_idx {
                Some(p) => (self.s.xy[p as usize], self.s.wh[p as usize]),
                None => (Vec2::ZERO, self.root),
            };
            let xy = anchored_xy(
                elem.anchor_type,
                par_xy,
                par_wh,
                self.s.offsets_to_parents[idx as usize],
                self.s.wh[idx as usize],
            );
            self.s.xy[idx as usize] = xy;
        }
        trace!("resolved rects");
    }

    // ========================================================================
    // Scrolling
    // ========================================================================

    /// Each element's scrollable area is its own rect grown by its children's
    /// rects. An element scrolled to `1.0` shifts its descendants by the part of
    /// that area that doesn't fit in its own size; shifts accumulate down the tree.
    fn resolve_scroll(&mut self) {
        let s = &mut *self.s;

        for &(_, idx) in &s.order {
            let bb = BoundingBox::from_xy_wh(s.xy[idx as usize], s.wh[idx as usize]);
            s.scrollable_areas[idx as usize] = bb;
            if let Some(p) = self.elems[idx as usize].parent_idx {
                s.scrollable_areas[p as usize].expand_to(&bb);
            }
        }

        for &(_, idx) in &s.order {
            let elem = &self.elems[idx as usize];
            let area = s.scrollable_areas[idx as usize].size();
            s.scroll_offsets[idx as usize] = -elem.scroll_offset * (area - s.wh[idx as usize]);
        }

        for &(_, idx) in &s.order {
            s.cum_scroll_offsets[idx as usize] = match self.elems[idx as usize].parent_idx {
                Some(p) => s.cum_scroll_offsets[p as usize] + s.scroll_offsets[p as usize],
                None => Vec2::ZERO,
            };
        }

        // Only after every cumulative offset is known, since they read the
        // parent's offsets.
        for &(_, idx) in &s.order {
            s.xy[idx as usize] += s.cum_scroll_offsets[idx as usize];
        }
    }

    // ========================================================================
    // Clipping
    // ========================================================================

    fn resolve_clip_bounds(&mut self) {
        let s = &mut *self.s;
        for &(_, idx) in &s.order {
            let mut bb = BoundingBox::from_xy_wh(s.xy[idx as usize], s.wh[idx as usize]);
            if let Some(p) = self.elems[idx as usize].parent_idx {
                bb = bb.intersect(&s.clip_bbs[p as usize]);
            }
            s.clip_bbs[idx as usize] = bb;
        }
    }

    /// One background primitive per element, then one per glyph of its text.
    fn expand_primitives(&mut self) -> Result<(), Error> {
        let s = &mut *self.s;
        for &(_, idx) in &s.order {
            let elem = &self.elems[idx as usize];
            let xy = s.xy[idx as usize];
            let wh = s.wh[idx as usize];

            s.unclippeds.push(Unclipped {
                elem_idx: idx,
                colour: elem.bg_col,
                xy,
                wh,
                text_char: None,
                font: None,
                bg_img: elem.bg_img,
                rot: elem.rot,
                bezier: elem.bezier,
            });

            // text without a loaded font was rejected by `validate`
            let (Some(text), Some(font_id)) = (&elem.text, elem.font) else {
                continue;
            };
            let Some(font) = self.fonts.get(&font_id) else {
                continue;
            };

            s.glyphs.clear();
            font.layout_words(text, elem.font_size, xy, xy.x + wh.x, &mut s.glyphs)
                .map_err(|MissingGlyph(ch)| {
                    fail(
                        ErrorType::GlyphNotFound,
                        idx,
                        format!("font {font_id:?} has no glyph for {ch:?}"),
                    )
                })?;

            s.unclippeds.extend(s.glyphs.drain(..).map(|glyph| Unclipped {
                elem_idx: idx,
                colour: elem.text_col,
                xy: glyph.xy,
                wh: glyph.wh,
                text_char: Some(glyph.ch),
                font: Some(font_id),
                bg_img: None,
                rot: 0.0,
                bezier: None,
            }));
        }
        trace!(primitives = s.unclippeds.len(), "expanded primitives");
        Ok(())
    }

    /// Culls primitives outside their element's clip box, clamps the rest and
    /// normalizes by the root size.
    fn clip_and_normalize(&self, output: &mut Vec<Resolved>) {
        let root = self.root;
        let mut culled = 0usize;

        for unc in &self.s.unclippeds {
            let mut start = unc.xy;
            let mut end = unc.xy + unc.wh;
            let clip = self.s.clip_bbs[unc.elem_idx as usize];

            if clip.excludes(start, end) {
                culled += 1;
                continue;
            }

            let resolved = match unc.bezier {
                None => {
                    // uv y runs bottom to top, so a cut at the top lowers clip_end.y
                    let mut clip_start = Vec2::ZERO;
                    let mut clip_end = Vec2::ONE;
                    if start.x < clip.min.x {
                        clip_start.x = (clip.min.x - start.x) / unc.wh.x;
                        start.x = clip.min.x;
                    }
                    if start.y < clip.min.y {
                        clip_end.y = 1.0 - (clip.min.y - start.y) / unc.wh.y;
                        start.y = clip.min.y;
                    }
                    if end.x > clip.max.x {
                        clip_end.x = 1.0 - (end.x - clip.max.x) / unc.wh.x;
                        end.x = clip.max.x;
                    }
                    if end.y > clip.max.y {
                        clip_start.y = (end.y - clip.max.y) / unc.wh.y;
                        end.y = clip.max.y;
                    }

                    Resolved {
                        elem_idx: unc.elem_idx,
                        colour: unc.colour,
                        pos: start / root,
                        scale: (end - start) / root,
                        clip_start,
                        clip_end,
                        text_char: unc.text_char,
                        font: unc.font,
                        bg_img: unc.bg_img,
                        rot: unc.rot,
                        curve: None,
                    }
                }
                Some(bezier) => {
                    let start_nrm = start / root;
                    let end_nrm = end / root;
                    let control_points = bezier
                        .control_points
                        .map(|cp| cp * (end_nrm - start_nrm) + start_nrm);

                    Resolved {
                        elem_idx: unc.elem_idx,
                        colour: unc.colour,
                        pos: Vec2::ZERO,
                        scale: Vec2::ZERO,
                        clip_start: Vec2::ZERO,
                        clip_end: Vec2::ZERO,
                        text_char: unc.text_char,
                        font: unc.font,
                        bg_img: unc.bg_img,
                        rot: unc.rot,
                        curve: Some(ResolvedCurve {
                            control_points,
                            segments: bezier.segments,
                            width: bezier.width,
                            clip_rect_nrm: clip.normalized(root),
                        }),
                    }
                }
            };
            output.push(resolved);
        }

        debug!(emitted = output.len(), culled, "resolved ui primitives");
    }
}

/// Normalized hit rect per element, taken from its background primitive.
pub(crate) fn build_collisions(output: &[Resolved], collisions: &mut FxHashMap<ElemIdx, Rect>) {
    collisions.clear();
    for r in output.iter().filter(|r| r.is_background()) {
        collisions.insert(r.elem_idx, Rect::new(r.pos.x, r.pos.y, r.scale.x, r.scale.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Measure;
    use crate::text::{FontData, GlyphData};
    use crate::{abs, pc};

    fn resolve(elems: &[Elem], root: Vec2) -> (Resolver, Result<Vec<Resolved>, Error>) {
        let mut resolver = Resolver::default();
        let mut output = Vec::new();
        let result = resolver
            .resolve(root, elems, &FontMap::default(), &mut output)
            .map(|_| output);
        (resolver, result)
    }

    fn screen() -> Vec2 {
        Vec2::new(400.0, 300.0)
    }

    #[test]
    fn tree_is_depth_first_in_array_order() {
        let elems = [
            Elem::new().size(abs!(10.0, 10.0)).end(),
            Elem::new().parent(0).end(),
            Elem::new().end(),
            Elem::new().parent(1).end(),
            Elem::new().parent(0).end(),
            Elem::new().parent(2).end(),
        ];
        let (resolver, result) = resolve(&elems, screen());
        result.unwrap();

        let s = &resolver.scratch;
        assert_eq!(s.roots, vec![0, 2]);
        assert_eq!(s.children[0], vec![1, 4]);
        assert_eq!(
            s.order,
            vec![(0, 0), (1, 1), (2, 3), (1, 4), (0, 2), (1, 5)]
        );
    }

    #[test]
    fn cyclic_elements_are_skipped() {
        let elems = [
            Elem::new().size(abs!(10.0, 10.0)).end(),
            Elem::new().parent(2).end(),
            Elem::new().parent(1).end(),
        ];
        let (resolver, result) = resolve(&elems, screen());
        let output = result.unwrap();

        assert_eq!(resolver.scratch.order, vec![(0, 0)]);
        assert!(output.iter().all(|r| r.elem_idx == 0));
    }

    #[test]
    fn rejects_parent_out_of_range() {
        let elems = [Elem::new().parent(7).end()];
        let (_, result) = resolve(&elems, screen());
        let err = result.unwrap_err();
        assert_eq!(err.type_, ErrorType::ParentOutOfRange);
        assert_eq!(err.elem_idx, Some(0));
    }

    #[test]
    fn rejects_childless_flex() {
        let elems = [Elem::new().flex(PenDir::Vertical).end()];
        let (_, result) = resolve(&elems, screen());
        assert_eq!(result.unwrap_err().type_, ErrorType::FlexWithoutChildren);
    }

    #[test]
    fn rejects_percentage_under_flex() {
        let elems = [
            Elem::new().flex(PenDir::Vertical).end(),
            Elem::new().parent(0).absolute(pc!(0.5, 0.5)).size(abs!(10.0, 10.0)).end(),
        ];
        let (_, result) = resolve(&elems, screen());
        let err = result.unwrap_err();
        assert_eq!(err.type_, ErrorType::PercentageUnderFlexParent);
        assert_eq!(err.elem_idx, Some(1));

        let elems = [
            Elem::new().flex(PenDir::Vertical).end(),
            Elem::new().parent(0).size(pc!(0.5, 0.5)).end(),
        ];
        let (_, result) = resolve(&elems, screen());
        assert_eq!(result.unwrap_err().type_, ErrorType::PercentageUnderFlexParent);
    }

    #[test]
    fn rejects_percentage_out_of_range() {
        let elems = [
            Elem::new().size(abs!(100.0, 100.0)).end(),
            Elem::new().parent(0).size(Measure::Pc(Vec2::new(0.5, 1.5))).end(),
        ];
        let (_, result) = resolve(&elems, screen());
        assert_eq!(result.unwrap_err().type_, ErrorType::PercentageOutOfRange);
    }

    #[test]
    fn rejects_relative_root() {
        let elems = [Elem::new().relative().size(abs!(10.0, 10.0)).end()];
        let (_, result) = resolve(&elems, screen());
        assert_eq!(result.unwrap_err().type_, ErrorType::MissingParent);
    }

    #[test]
    fn rejects_text_without_font() {
        let mut elem = Elem::new().size(abs!(10.0, 10.0)).end();
        elem.text = Some("hi".into());
        let (_, result) = resolve(&[elem], screen());
        assert_eq!(result.unwrap_err().type_, ErrorType::TextWithoutFont);

        let elem = Elem::new().size(abs!(10.0, 10.0)).text("hi", "missing", 12.0).end();
        let (_, result) = resolve(&[elem], screen());
        assert_eq!(result.unwrap_err().type_, ErrorType::FontNotFound);
    }

    #[test]
    fn rejects_missing_glyph() {
        let font = FontData::new(1.0, 1.0, 0.0).with_glyph(
            'a',
            GlyphData {
                quad_size: Vec2::ONE,
                quad_offset: Vec2::ZERO,
                advance: 1.0,
            },
        );
        let mut fonts = FontMap::default();
        fonts.insert(AssetId::new("f"), font);

        // 'a' exists but the trailing space does not
        let elems = [Elem::new().size(abs!(100.0, 20.0)).text("a", "f", 10.0).end()];
        let mut output = Vec::new();
        let err = Resolver::default()
            .resolve(screen(), &elems, &fonts, &mut output)
            .unwrap_err();
        assert_eq!(err.type_, ErrorType::GlyphNotFound);
    }

    #[test]
    fn percentage_sizes_follow_static_parent() {
        let elems = [
            Elem::new().size(abs!(200.0, 100.0)).end(),
            Elem::new().parent(0).size(pc!(0.5, 0.25)).end(),
            Elem::new().parent(1).size(pc!(0.5, 1.0)).end(),
        ];
        let (resolver, result) = resolve(&elems, screen());
        result.unwrap();
        assert_eq!(resolver.scratch.wh[1], Vec2::new(100.0, 25.0));
        assert_eq!(resolver.scratch.wh[2], Vec2::new(50.0, 25.0));
    }

    #[test]
    fn root_percentages_use_screen_size() {
        let elems = [Elem::new().absolute(pc!(0.25, 0.5)).size(pc!(0.5, 0.5)).end()];
        let (resolver, result) = resolve(&elems, screen());
        result.unwrap();
        assert_eq!(resolver.scratch.wh[0], Vec2::new(200.0, 150.0));
        assert_eq!(resolver.scratch.xy[0], Vec2::new(100.0, 150.0));
    }

    #[test]
    fn flex_wraps_children_with_padding_and_spacing() {
        let elems = [
            Elem::new().flex(PenDir::Horizontal).padding(4.0).pen(PenDir::Horizontal, 2.0).end(),
            Elem::new().parent(0).relative().size(abs!(10.0, 10.0)).end(),
            Elem::new().parent(0).relative().size(abs!(20.0, 5.0)).end(),
            Elem::new().parent(0).relative().size(abs!(6.0, 30.0)).end(),
        ];
        let (resolver, result) = resolve(&elems, screen());
        result.unwrap();
        // x: 2*4 + 10 + 20 + 6 + 2*2, y: 2*4 + 30
        assert_eq!(resolver.scratch.wh[0], Vec2::new(48.0, 38.0));
    }

    #[test]
    fn nested_flexes_size_bottom_up() {
        let elems = [
            Elem::new().flex(PenDir::Vertical).end(),
            Elem::new().parent(0).relative().flex(PenDir::Horizontal).end(),
            Elem::new().parent(1).relative().size(abs!(10.0, 4.0)).end(),
            Elem::new().parent(1).relative().size(abs!(10.0, 6.0)).end(),
            Elem::new().parent(0).relative().size(abs!(5.0, 5.0)).end(),
        ];
        let (resolver, result) = resolve(&elems, screen());
        result.unwrap();
        assert_eq!(resolver.scratch.wh[1], Vec2::new(20.0, 6.0));
        assert_eq!(resolver.scratch.wh[0], Vec2::new(20.0, 11.0));
    }

    #[test]
    fn absolute_children_count_towards_flex_size() {
        let elems = [
            Elem::new().flex(PenDir::Vertical).end(),
            Elem::new().parent(0).relative().size(abs!(10.0, 10.0)).end(),
            Elem::new().parent(0).absolute(abs!(50.0, 50.0)).size(abs!(30.0, 10.0)).end(),
        ];
        let (resolver, result) = resolve(&elems, screen());
        result.unwrap();
        assert_eq!(resolver.scratch.wh[0], Vec2::new(30.0, 20.0));
    }

    #[test]
    fn pen_stacks_relative_siblings() {
        let elems = [
            Elem::new().size(abs!(100.0, 100.0)).padding(5.0).pen(PenDir::Vertical, 3.0).end(),
            Elem::new().parent(0).relative().size(abs!(10.0, 10.0)).end(),
            Elem::new().parent(0).absolute(abs!(70.0, 70.0)).size(abs!(10.0, 10.0)).end(),
            Elem::new().parent(0).relative().size(abs!(10.0, 20.0)).end(),
        ];
        let (resolver, result) = resolve(&elems, screen());
        result.unwrap();

        let s = &resolver.scratch;
        assert_eq!(s.offsets_to_parents[1], Vec2::new(5.0, 5.0));
        assert_eq!(s.offsets_to_parents[2], Vec2::new(70.0, 70.0));
        assert_eq!(s.offsets_to_parents[3], Vec2::new(5.0, 18.0));
        assert_eq!(s.pens[0], Vec2::new(5.0, 41.0));
    }

    #[test]
    fn horizontal_pen_skips_absolute_siblings() {
        let elems = [
            Elem::new().size(abs!(200.0, 50.0)).padding(4.0).pen(PenDir::Horizontal, 2.0).end(),
            Elem::new().parent(0).relative().size(abs!(10.0, 10.0)).end(),
            Elem::new().parent(0).absolute(abs!(100.0, 20.0)).size(abs!(5.0, 5.0)).end(),
            Elem::new().parent(0).relative().size(abs!(20.0, 10.0)).end(),
            Elem::new().parent(0).relative().size(abs!(6.0, 30.0)).end(),
        ];
        let (resolver, result) = resolve(&elems, screen());
        result.unwrap();

        let s = &resolver.scratch;
        assert_eq!(s.offsets_to_parents[1], Vec2::new(4.0, 4.0));
        assert_eq!(s.offsets_to_parents[2], Vec2::new(100.0, 20.0));
        assert_eq!(s.offsets_to_parents[3], Vec2::new(16.0, 4.0));
        assert_eq!(s.offsets_to_parents[4], Vec2::new(38.0, 4.0));
        // the cross axis never moves
        assert_eq!(s.pens[0], Vec2::new(46.0, 4.0));
        assert_eq!(s.xy[4], Vec2::new(38.0, 4.0));
    }

    #[test]
    fn anchors_place_relative_to_parent_rect() {
        let par_xy = Vec2::new(10.0, 20.0);
        let par_wh = Vec2::new(100.0, 50.0);
        let offset = Vec2::new(2.0, 3.0);
        let wh = Vec2::new(10.0, 5.0);

        let xy = |anchor| anchored_xy(anchor, par_xy, par_wh, offset, wh);
        assert_eq!(xy(AnchorType::TopLeft), Vec2::new(12.0, 23.0));
        assert_eq!(xy(AnchorType::TopCenter), Vec2::new(62.0, 23.0));
        assert_eq!(xy(AnchorType::TopRight), Vec2::new(98.0, 23.0));
        assert_eq!(xy(AnchorType::CenterLeft), Vec2::new(12.0, 48.0));
        assert_eq!(xy(AnchorType::Center), Vec2::new(62.0, 48.0));
        assert_eq!(xy(AnchorType::CenterRight), Vec2::new(98.0, 48.0));
        assert_eq!(xy(AnchorType::BottomLeft), Vec2::new(12.0, 62.0));
        assert_eq!(xy(AnchorType::BottomCenter), Vec2::new(62.0, 62.0));
        assert_eq!(xy(AnchorType::BottomRight), Vec2::new(98.0, 62.0));
    }

    #[test]
    fn scroll_shifts_descendants_only() {
        let elems = [
            Elem::new().size(abs!(100.0, 100.0)).scroll(0.0, 1.0).end(),
            Elem::new().parent(0).size(abs!(100.0, 200.0)).end(),
            Elem::new().parent(1).absolute(abs!(0.0, 10.0)).size(abs!(10.0, 10.0)).end(),
        ];
        let (resolver, result) = resolve(&elems, screen());
        result.unwrap();

        let s = &resolver.scratch;
        assert_eq!(s.scrollable_areas[0].size(), Vec2::new(100.0, 200.0));
        assert_eq!(s.scroll_offsets[0], Vec2::new(0.0, -100.0));
        assert_eq!(s.cum_scroll_offsets[0], Vec2::ZERO);
        assert_eq!(s.cum_scroll_offsets[1], Vec2::new(0.0, -100.0));
        assert_eq!(s.cum_scroll_offsets[2], Vec2::new(0.0, -100.0));
        assert_eq!(s.xy[0], Vec2::ZERO);
        assert_eq!(s.xy[1], Vec2::new(0.0, -100.0));
        assert_eq!(s.xy[2], Vec2::new(0.0, -90.0));
    }

    #[test]
    fn clip_bounds_accumulate_from_ancestors() {
        let elems = [
            Elem::new().size(abs!(100.0, 100.0)).end(),
            Elem::new().parent(0).absolute(abs!(50.0, 50.0)).size(abs!(100.0, 100.0)).end(),
            Elem::new().parent(1).absolute(abs!(-60.0, 0.0)).size(abs!(200.0, 20.0)).end(),
        ];
        let (resolver, result) = resolve(&elems, screen());
        result.unwrap();

        let clip = resolver.scratch.clip_bbs[2];
        assert_eq!(clip.min, Vec2::new(50.0, 50.0));
        assert_eq!(clip.max, Vec2::new(100.0, 70.0));
    }

    #[test]
    fn overhang_sets_clip_fractions() {
        let elems = [
            Elem::new().size(abs!(100.0, 100.0)).end(),
            // overhangs left by 10 and top by 20 of a 40x40 rect
            Elem::new().parent(0).absolute(abs!(-10.0, -20.0)).size(abs!(40.0, 40.0)).end(),
            // overhangs right by 10 and bottom by 30
            Elem::new().parent(0).absolute(abs!(70.0, 90.0)).size(abs!(40.0, 40.0)).end(),
        ];
        let (_, result) = resolve(&elems, Vec2::new(100.0, 100.0));
        let output = result.unwrap();

        let top_left = &output[1];
        assert_eq!(top_left.clip_start, Vec2::new(0.25, 0.0));
        assert_eq!(top_left.clip_end, Vec2::new(1.0, 0.5));
        assert_eq!(top_left.pos, Vec2::new(0.0, 0.0));
        assert_eq!(top_left.scale, Vec2::new(0.3, 0.2));

        let bottom_right = &output[2];
        assert_eq!(bottom_right.clip_start, Vec2::new(0.0, 0.75));
        assert_eq!(bottom_right.clip_end, Vec2::new(0.75, 1.0));
    }

    #[test]
    fn descendants_of_clipped_out_elements_are_culled() {
        let elems = [
            Elem::new().size(abs!(100.0, 100.0)).end(),
            // entirely right of the root, so its clip box is empty
            Elem::new().parent(0).absolute(abs!(150.0, 0.0)).size(abs!(20.0, 20.0)).end(),
            // reaches back across the root, but is still inside an empty clip box
            Elem::new().parent(1).absolute(abs!(-150.0, 0.0)).size(abs!(200.0, 20.0)).end(),
        ];
        let (resolver, result) = resolve(&elems, Vec2::new(100.0, 100.0));
        let output = result.unwrap();

        assert!(resolver.scratch.clip_bbs[2].is_empty());
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].elem_idx, 0);
        assert!(output.iter().all(|r| r.scale.x >= 0.0 && r.scale.y >= 0.0));

        let mut collisions = FxHashMap::default();
        build_collisions(&output, &mut collisions);
        assert!(!collisions.contains_key(&1));
        assert!(!collisions.contains_key(&2));
    }

    #[test]
    fn rejects_degenerate_root_size() {
        let elems = [Elem::new().size(abs!(10.0, 10.0)).end()];
        for root in [Vec2::new(0.0, 100.0), Vec2::new(100.0, -1.0), Vec2::new(f32::NAN, 100.0)] {
            let (_, result) = resolve(&elems, root);
            let err = result.unwrap_err();
            assert_eq!(err.type_, ErrorType::InvalidRootSize);
            assert_eq!(err.elem_idx, None);
        }
    }

    #[test]
    fn curves_map_control_points_into_rect() {
        let elems = [
            Elem::new().size(abs!(200.0, 100.0)).end(),
            Elem::new()
                .parent(0)
                .absolute(abs!(100.0, 50.0))
                .size(abs!(100.0, 100.0))
                .curve([Vec2::ZERO, Vec2::new(0.5, 0.0), Vec2::new(0.5, 1.0), Vec2::ONE], 16, 2.0)
                .end(),
        ];
        let (_, result) = resolve(&elems, Vec2::new(200.0, 100.0));
        let output = result.unwrap();

        let curve_prim = &output[1];
        assert!(curve_prim.is_curve());
        assert_eq!(curve_prim.pos, Vec2::ZERO);
        assert_eq!(curve_prim.scale, Vec2::ZERO);

        let curve = curve_prim.curve.unwrap();
        // control points are not clamped even though the rect overhangs the bottom
        assert_eq!(curve.control_points[0], Vec2::new(0.5, 0.5));
        assert_eq!(curve.control_points[1], Vec2::new(0.75, 0.5));
        assert_eq!(curve.control_points[3], Vec2::new(1.0, 1.5));
        assert_eq!(curve.segments, 16);
        assert_eq!(curve.width, 2.0);
        assert_eq!(curve.clip_rect_nrm, Rect::new(0.5, 0.5, 0.5, 0.5));
    }

    #[test]
    fn collisions_skip_glyphs_and_curves() {
        let mut output = vec![
            Resolved {
                elem_idx: 3,
                colour: Color::WHITE,
                pos: Vec2::new(0.1, 0.2),
                scale: Vec2::new(0.3, 0.4),
                clip_start: Vec2::ZERO,
                clip_end: Vec2::ONE,
                text_char: None,
                font: None,
                bg_img: None,
                rot: 0.0,
                curve: None,
            };
            3
        ];
        output[1].text_char = Some('x');
        output[1].pos = Vec2::new(0.9, 0.9);
        output[2].elem_idx = 4;
        output[2].curve = Some(ResolvedCurve {
            control_points: [Vec2::ZERO; 4],
            segments: 1,
            width: 1.0,
            clip_rect_nrm: Rect::new(0.0, 0.0, 1.0, 1.0),
        });

        let mut collisions = FxHashMap::default();
        build_collisions(&output, &mut collisions);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[&3], Rect::new(0.1, 0.2, 0.3, 0.4));
    }

    #[test]
    fn scratch_is_rebuilt_between_frames() {
        let mut resolver = Resolver::default();
        let mut output = Vec::new();
        let fonts = FontMap::default();

        let big = [
            Elem::new().size(abs!(100.0, 100.0)).end(),
            Elem::new().parent(0).size(abs!(10.0, 10.0)).end(),
            Elem::new().parent(0).size(abs!(10.0, 10.0)).end(),
        ];
        resolver.resolve(screen(), &big, &fonts, &mut output).unwrap();
        assert_eq!(output.len(), 3);

        let small = [Elem::new().size(abs!(20.0, 20.0)).end()];
        resolver.resolve(screen(), &small, &fonts, &mut output).unwrap();
        assert_eq!(output.len(), 1);
        assert!(resolver.scratch.children[0].is_empty());
        assert_eq!(resolver.scratch.order, vec![(0, 0)]);
    }
}
