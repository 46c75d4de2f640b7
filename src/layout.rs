use crate::math::Vec2;

/// Whether an element is placed by its own `xy` or by its parent's pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PosType {
    /// Placed at `xy`, independent of siblings.
    #[default]
    Absolute,
    /// Placed at the parent's pen, which then advances past this element.
    Relative,
}

/// Whether an element's size is declared or derived from its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ResolveType {
    /// Size comes from `wh`.
    #[default]
    Static,
    /// Size wraps the children plus padding and pen spacing.
    Flex,
}

/// The axis a parent's pen advances along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PenDir {
    /// Children stack top to bottom.
    #[default]
    Vertical,
    /// Children stack left to right.
    Horizontal,
}

/// A position or size, either in pixels or as a fraction of the parent's size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    /// Pixels.
    Abs(Vec2),
    /// Fraction of the parent's size, each component in `-1.0..=1.0`.
    Pc(Vec2),
}

impl Measure {
    pub fn value(self) -> Vec2 {
        match self {
            Measure::Abs(v) | Measure::Pc(v) => v,
        }
    }

    pub fn is_percentage(self) -> bool {
        matches!(self, Measure::Pc(_))
    }

    /// Pixels for this measure given the parent's resolved size.
    pub fn resolve(self, parent_wh: Vec2) -> Vec2 {
        match self {
            Measure::Abs(v) => v,
            Measure::Pc(pc) => pc * parent_wh,
        }
    }

    pub(crate) fn in_percentage_range(self) -> bool {
        let v = self.value();
        (-1.0..=1.0).contains(&v.x) && (-1.0..=1.0).contains(&v.y)
    }
}

impl Default for Measure {
    fn default() -> Self {
        Measure::Abs(Vec2::ZERO)
    }
}

impl From<(f32, f32)> for Measure {
    /// Pixels.
    fn from((x, y): (f32, f32)) -> Self {
        Measure::Abs(Vec2::new(x, y))
    }
}

/// Shorthand macro for [`Measure::Abs`].
#[macro_export]
macro_rules! abs {
    ($x:expr, $y:expr) => {
        $crate::layout::Measure::Abs($crate::math::Vec2::new($x, $y))
    };
}

/// Shorthand macro for [`Measure::Pc`].
/// Both values have to be in range `-1.0..=1.0`.
#[macro_export]
macro_rules! pc {
    ($x:expr, $y:expr) => {{
        const _: () = assert!(
            $x >= -1.0 && $x <= 1.0 && $y >= -1.0 && $y <= 1.0,
            "Percentage values must be between -1.0 and 1.0 inclusive!"
        );
        $crate::layout::Measure::Pc($crate::math::Vec2::new($x, $y))
    }};
}
