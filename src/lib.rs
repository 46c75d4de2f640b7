//! Retained-description UI resolver.
//!
//! Each frame the host hands [`Ui::update`] a flat slice of [`Elem`]s that form
//! a forest through `parent_idx`. The resolver sizes, positions, scrolls and
//! clips them and emits [`Resolved`] primitives in normalized `0..=1` screen
//! space, plus a hit-test index queried with [`Ui::is_point_inside`] and
//! [`Ui::calc_point_inside`].
//!
//! ```rust
//! use zp_ui::prelude::*;
//!
//! let mut ui = Ui::new(Config::new(200.0, 100.0));
//! let elems = [
//!     Elem::new().size(abs!(200.0, 100.0)).end(),
//!     Elem::new().parent(0).absolute(abs!(10.0, 20.0)).size(abs!(50.0, 40.0)).end(),
//! ];
//! ui.update(&elems, &FontMap::default()).unwrap();
//! assert!(ui.is_point_inside(1, Vec2::new(0.1, 0.3)));
//! ```

pub mod align;
pub mod color;
pub mod elements;
mod engine;
pub mod errors;
pub mod events;
pub mod id;
pub mod layout;
pub mod math;
pub mod prelude;
pub mod render_commands;
pub mod text;

use rustc_hash::FxHashMap;

pub use color::Color;
pub use elements::{Bezier, Elem};
pub use errors::{Error, ErrorType};
use math::{point_is_inside_rect, Rect, Vec2};
pub use render_commands::{Resolved, ResolvedCurve};
use text::FontMap;

/// Index of an element in the slice passed to [`Ui::update`].
pub type ElemIdx = u32;

/// Screen size the output is normalized by, in pixels.
///
/// Both sides have to be positive; [`Ui::update`] fails with
/// [`ErrorType::InvalidRootSize`] otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    pub root_width: f32,
    pub root_height: f32,
}

impl Config {
    pub fn new(root_width: f32, root_height: f32) -> Self {
        Self {
            root_width,
            root_height,
        }
    }

    #[inline]
    pub(crate) fn root_size(&self) -> Vec2 {
        Vec2::new(self.root_width, self.root_height)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// One resolver instance. Holds the last frame's output and hit-test index.
#[derive(Debug)]
pub struct Ui {
    config: Config,
    output: Vec<Resolved>,
    collisions: FxHashMap<ElemIdx, Rect>,
    resolver: engine::Resolver,
}

impl Ui {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            output: Vec::new(),
            collisions: FxHashMap::default(),
            resolver: engine::Resolver::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Changes take effect on the next [`Ui::update`], e.g. after a window resize.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Resolves one frame, replacing the previous output and hit-test index.
    ///
    /// On error both are left empty; nothing of the failed frame is kept.
    pub fn update(&mut self, elems: &[Elem], fonts: &FontMap) -> Result<(), Error> {
        let span = tracing::debug_span!(
            "ui_update",
            elems = elems.len(),
            root_width = self.config.root_width,
            root_height = self.config.root_height,
        );
        let _enter = span.enter();

        let result = self
            .resolver
            .resolve(self.config.root_size(), elems, fonts, &mut self.output);
        match result {
            Ok(()) => {
                engine::build_collisions(&self.output, &mut self.collisions);
                Ok(())
            }
            Err(err) => {
                self.output.clear();
                self.collisions.clear();
                Err(err)
            }
        }
    }

    /// Primitives of the last successful frame, in emission order.
    pub fn output(&self) -> &[Resolved] {
        &self.output
    }

    /// Normalized on-screen rect of `elem_idx`'s background as of the last
    /// frame. `None` if the element was culled, unreachable or out of range.
    pub fn hit_rect(&self, elem_idx: ElemIdx) -> Option<Rect> {
        self.collisions.get(&elem_idx).copied()
    }

    /// Whether `point` (normalized) lies within the element's rect, edges included.
    pub fn is_point_inside(&self, elem_idx: ElemIdx, point: Vec2) -> bool {
        self.hit_rect(elem_idx)
            .is_some_and(|rect| point_is_inside_rect(point, rect))
    }

    /// Maps `point` into the element's local `0..=1` space and writes it to `out`,
    /// returning whether it lies inside.
    ///
    /// `out` is written whenever the element has a hit rect, even if the point
    /// is outside; it is left untouched otherwise.
    pub fn calc_point_inside(&self, elem_idx: ElemIdx, point: Vec2, out: &mut Vec2) -> bool {
        let Some(local) = self.local_point(elem_idx, point) else {
            return false;
        };
        *out = local;
        (0.0..=1.0).contains(&local.x) && (0.0..=1.0).contains(&local.y)
    }

    /// `point` relative to the element's rect, where `(0, 0)` is its top-left and
    /// `(1, 1)` its bottom-right.
    pub fn local_point(&self, elem_idx: ElemIdx, point: Vec2) -> Option<Vec2> {
        let rect = self.hit_rect(elem_idx)?;
        Some((point - rect.point()) / rect.size())
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
