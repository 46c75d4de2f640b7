//! A single import for everything needed to declare and resolve a frame.
//!
//! ```rust
//! use zp_ui::prelude::*;
//! ```

// Core types
pub use crate::{Config, ElemIdx, Ui};
pub use crate::elements::{Bezier, Elem};
pub use crate::errors::{Error, ErrorType};
pub use crate::render_commands::{Resolved, ResolvedCurve};

// Assets
pub use crate::color::Color;
pub use crate::id::AssetId;
pub use crate::text::{FontData, FontMap, GlyphData};

// Geometry
pub use crate::math::{Rect, Vec2};

// Macros
pub use crate::{abs, pc};

// Layout enums, types only
pub use crate::layout::{Measure, PenDir, PosType, ResolveType};

// Alignment and anchors, globbed
pub use crate::align::AlignX::{self, *};
pub use crate::align::AlignY::{self, *};
pub use crate::align::AnchorType::{self, *};

pub use crate::events::{Event, HandlerId};
