/// Horizontal component of an [`AnchorType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlignX {
    #[default]
    Left,
    CenterX,
    Right,
}

/// Vertical component of an [`AnchorType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlignY {
    #[default]
    Top,
    CenterY,
    Bottom,
}

/// Which point of the parent rect an element's offset is measured from.
///
/// Left/top anchors pin the element's top-left corner, right/bottom anchors pin
/// its bottom-right corner and measure the offset inwards. Center anchors add
/// the offset to the parent's midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AnchorType {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl AnchorType {
    pub fn align_x(self) -> AlignX {
        match self {
            AnchorType::TopLeft | AnchorType::CenterLeft | AnchorType::BottomLeft => AlignX::Left,
            AnchorType::TopCenter | AnchorType::Center | AnchorType::BottomCenter => AlignX::CenterX,
            AnchorType::TopRight | AnchorType::CenterRight | AnchorType::BottomRight => AlignX::Right,
        }
    }

    pub fn align_y(self) -> AlignY {
        match self {
            AnchorType::TopLeft | AnchorType::TopCenter | AnchorType::TopRight => AlignY::Top,
            AnchorType::CenterLeft | AnchorType::Center | AnchorType::CenterRight => AlignY::CenterY,
            AnchorType::BottomLeft | AnchorType::BottomCenter | AnchorType::BottomRight => AlignY::Bottom,
        }
    }
}

impl From<(AlignX, AlignY)> for AnchorType {
    fn from((x, y): (AlignX, AlignY)) -> Self {
        match (y, x) {
            (AlignY::Top, AlignX::Left) => AnchorType::TopLeft,
            (AlignY::Top, AlignX::CenterX) => AnchorType::TopCenter,
            (AlignY::Top, AlignX::Right) => AnchorType::TopRight,
            (AlignY::CenterY, AlignX::Left) => AnchorType::CenterLeft,
            (AlignY::CenterY, AlignX::CenterX) => AnchorType::Center,
            (AlignY::CenterY, AlignX::Right) => AnchorType::CenterRight,
            (AlignY::Bottom, AlignX::Left) => AnchorType::BottomLeft,
            (AlignY::Bottom, AlignX::CenterX) => AnchorType::BottomCenter,
            (AlignY::Bottom, AlignX::Right) => AnchorType::BottomRight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_decompose_and_recompose() {
        let all = [
            AnchorType::TopLeft,
            AnchorType::TopCenter,
            AnchorType::TopRight,
            AnchorType::CenterLeft,
            AnchorType::Center,
            AnchorType::CenterRight,
            AnchorType::BottomLeft,
            AnchorType::BottomCenter,
            AnchorType::BottomRight,
        ];
        for anchor in all {
            assert_eq!(AnchorType::from((anchor.align_x(), anchor.align_y())), anchor);
        }
        assert_eq!(AnchorType::BottomCenter.align_x(), AlignX::CenterX);
        assert_eq!(AnchorType::BottomCenter.align_y(), AlignY::Bottom);
    }
}
