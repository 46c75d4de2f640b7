use core::fmt;

use crate::ElemIdx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorType {
    /// A flex element derives its size from its children, so it needs at least one.
    FlexWithoutChildren,
    /// Percentage placement or sizing under a flex parent is unsupported.
    PercentageUnderFlexParent,
    /// Percentage values have to lie in `-1.0..=1.0`.
    PercentageOutOfRange,
    /// Pen placement was used on a root element, which has no parent pen.
    MissingParent,
    /// `parent_idx` points past the end of the element array.
    ParentOutOfRange,
    /// The element has text but no font to lay it out with.
    TextWithoutFont,
    /// The element references a font that is not in the font map.
    FontNotFound,
    /// The font has no glyph for a character of the element's text.
    GlyphNotFound,
    /// `root_width` or `root_height` is not a positive number, so nothing can be normalized.
    InvalidRootSize,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub type_: ErrorType,
    /// The element whose declaration is at fault, if the error concerns one.
    pub elem_idx: Option<ElemIdx>,
    pub text: String,
}

impl Error {
    pub(crate) fn new(type_: ErrorType, elem_idx: Option<ElemIdx>, text: impl Into<String>) -> Self {
        Self {
            type_,
            elem_idx,
            text: text.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.elem_idx {
            Some(idx) => write!(f, "UI error on element {idx} (type: {:?}): {}", self.type_, self.text),
            None => write!(f, "UI error (type: {:?}): {}", self.type_, self.text),
        }
    }
}

impl std::error::Error for Error {}
