//! Style values stored in the model's run lists, and the per-character
//! style they resolve to.
//!
//! Every style dimension is a separate [`RunList`](lumen_core::RunList) in
//! the model. Font description runs are partial: each field is optional and
//! only the fields a run defines override the caller's defaults.

/// RGBA color, each channel in [0.0, 1.0].
pub type Color = [f32; 4];

pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const TRANSPARENT: Color = [0.0, 0.0, 0.0, 0.0];

// ── Font style enum ─────────────────────────────────────────────────

/// Font style (normal, italic, or oblique).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

// ── Font stretch ────────────────────────────────────────────────────

/// Font stretch / width class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStretch {
    UltraCondensed,
    ExtraCondensed,
    Condensed,
    SemiCondensed,
    #[default]
    Normal,
    SemiExpanded,
    Expanded,
    ExtraExpanded,
    UltraExpanded,
}

// ── Font description ────────────────────────────────────────────────

/// A partial font description carried by a font run.
///
/// `None` fields are "not set by this run".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontDescription {
    /// Family name, e.g. `"Noto Sans Arabic"`.
    pub family: Option<String>,
    /// Weight (100–900). 400 = normal, 700 = bold.
    pub weight: Option<u16>,
    pub stretch: Option<FontStretch>,
    pub style: Option<FontStyle>,
    /// Point size.
    pub size: Option<f32>,
}

impl FontDescription {
    /// A description that only sets the family.
    pub fn family(name: impl Into<String>) -> Self {
        Self {
            family: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_stretch(mut self, stretch: FontStretch) -> Self {
        self.stretch = Some(stretch);
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.family.is_none()
            && self.weight.is_none()
            && self.stretch.is_none()
            && self.style.is_none()
            && self.size.is_none()
    }
}

// ── Decorations ─────────────────────────────────────────────────────

/// Underline drawing style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UnderlineKind {
    #[default]
    Solid,
    Dashed,
    Double,
}

/// Underline carried by an underline run. The presence of a run enables it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UnderlineStyle {
    pub kind: UnderlineKind,
    /// `None` draws with the text color.
    pub color: Option<Color>,
    /// Thickness in pixels; `None` uses the font metrics.
    pub height: Option<f32>,
}

/// Strikethrough carried by a strikethrough run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StrikethroughStyle {
    pub color: Option<Color>,
    pub height: Option<f32>,
}

// ── Resolved style ──────────────────────────────────────────────────

/// Style of one character after resolving every run list.
///
/// [`LogicalModel::retrieve_style`](crate::LogicalModel::retrieve_style)
/// only writes the fields that some run overrides, so the caller seeds this
/// with its defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct InputStyle {
    pub text_color: Color,
    pub family: String,
    pub weight: u16,
    pub stretch: FontStretch,
    pub style: FontStyle,
    pub size: f32,
    /// `None` = no underline.
    pub underline: Option<UnderlineStyle>,
    /// `None` = no strikethrough.
    pub strikethrough: Option<StrikethroughStyle>,
    pub background_color: Color,
    /// Extra spacing between characters in pixels (can be negative).
    pub character_spacing: f32,
}

impl Default for InputStyle {
    fn default() -> Self {
        Self {
            text_color: BLACK,
            family: String::from("sans-serif"),
            weight: 400,
            stretch: FontStretch::Normal,
            style: FontStyle::Normal,
            size: 16.0,
            underline: None,
            strikethrough: None,
            background_color: TRANSPARENT,
            character_spacing: 0.0,
        }
    }
}

// ===================================================================
// Tests
// ===================================================================
