//! Palette and theme configuration.
//!
//! A [`Theme`] is built once and then only read. Render passes share it by
//! reference, including passes running on different threads at the same
//! time. Changing the look means building a new theme, either from the
//! defaults or from a [`ThemeConfig`] loaded from TOML.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::color::Color;
use crate::error::{UiError, UiResult};
use crate::text::{MonoShaper, Shaper};
use crate::unit::{Dp, Sp};

/// Color roles shared by all composers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Canvas background.
    pub background: Color,
    /// Text and outlines.
    pub foreground: Color,
    /// Hyperlinks.
    pub link: Color,
    /// Border of floating windows and tooltips.
    pub window_border: Color,
    /// Fill of floating windows and tooltips.
    pub window_background: Color,
}

/// The fixed default palette.
pub const DEFAULT_PALETTE: Palette = Palette {
    background: Color::rgb(0xFF, 0xFF, 0xEA),
    foreground: Color::rgb(0x00, 0x00, 0x00),
    link: Color::rgb(0x00, 0x00, 0xFF),
    window_border: Color::rgb(0x00, 0x00, 0x00),
    window_background: Color::rgb(0xEE, 0xFF, 0xEE),
};

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_PALETTE
    }
}

/// Complete theme for the UI.
#[derive(Clone)]
pub struct Theme {
    /// Text measurement.
    pub shaper: Arc<dyn Shaper>,
    /// Color roles.
    pub palette: Palette,
    /// Base text size.
    pub text_size: Sp,
    /// Text size for headings.
    pub text_size_large: Sp,
    /// Space between a window's border and its content.
    pub window_padding: Dp,
    /// Width of window borders.
    pub window_border: Dp,
}

impl fmt::Debug for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Theme")
            .field("palette", &self.palette)
            .field("text_size", &self.text_size)
            .field("text_size_large", &self.text_size_large)
            .field("window_padding", &self.window_padding)
            .field("window_border", &self.window_border)
            .finish_non_exhaustive()
    }
}

impl Theme {
    /// Default base text size.
    pub const TEXT_SIZE: Sp = Sp(12.0);
    /// Default heading text size.
    pub const TEXT_SIZE_LARGE: Sp = Sp(14.0);
    /// Default window padding.
    pub const WINDOW_PADDING: Dp = Dp(2.0);
    /// Default window border width.
    pub const WINDOW_BORDER: Dp = Dp(1.0);

    /// Builds a theme with the default palette and sizes.
    #[must_use]
    pub fn new(shaper: Arc<dyn Shaper>) -> Self {
        Self {
            shaper,
            palette: DEFAULT_PALETTE,
            text_size: Self::TEXT_SIZE,
            text_size_large: Self::TEXT_SIZE_LARGE,
            window_padding: Self::WINDOW_PADDING,
            window_border: Self::WINDOW_BORDER,
        }
    }

    /// Builds a theme from configuration; unset fields keep their defaults.
    #[must_use]
    pub fn from_config(shaper: Arc<dyn Shaper>, config: &ThemeConfig) -> Self {
        let mut theme = Self::new(shaper);
        let p = &config.palette;
        let palette = &mut theme.palette;
        palette.background = p.background.unwrap_or(palette.background);
        palette.foreground = p.foreground.unwrap_or(palette.foreground);
        palette.link = p.link.unwrap_or(palette.link);
        palette.window_border = p.window_border.unwrap_or(palette.window_border);
        palette.window_background = p.window_background.unwrap_or(palette.window_background);

        theme.text_size = config.text_size.unwrap_or(theme.text_size);
        theme.text_size_large = config.text_size_large.unwrap_or(theme.text_size_large);
        theme.window_padding = config.window_padding.unwrap_or(theme.window_padding);
        theme.window_border = config.window_border.unwrap_or(theme.window_border);
        tracing::debug!(?theme, "theme rebuilt from config");
        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(Arc::new(MonoShaper::default()))
    }
}

/// Palette overrides. Colors are `[r, g, b, a]` arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    /// Canvas background.
    pub background: Option<Color>,
    /// Text and outlines.
    pub foreground: Option<Color>,
    /// Hyperlinks.
    pub link: Option<Color>,
    /// Window border.
    pub window_border: Option<Color>,
    /// Window fill.
    pub window_background: Option<Color>,
}

/// Theme overrides, as read from a TOML file.
///
/// ```toml
/// text_size = 13.0
/// window_padding = 3.0
///
/// [palette]
/// background = [255, 255, 234, 255]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Palette overrides.
    pub palette: PaletteConfig,
    /// Base text size.
    pub text_size: Option<Sp>,
    /// Heading text size.
    pub text_size_large: Option<Sp>,
    /// Window padding.
    pub window_padding: Option<Dp>,
    /// Window border width.
    pub window_border: Option<Dp>,
}

impl ThemeConfig {
    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] if the text is not valid TOML for
    /// this schema or a size is out of range.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| {
            tracing::warn!(error = %e, "rejecting theme config");
            UiError::InvalidConfig(e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Io`] if the file cannot be read, or the errors of
    /// [`ThemeConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| {
            tracing::warn!(path = %path.display(), error = %source, "cannot read theme config");
            UiError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> UiResult<()> {
        let sizes = [
            ("text_size", self.text_size.map(|v| v.0)),
            ("text_size_large", self.text_size_large.map(|v| v.0)),
        ];
        for (name, value) in sizes {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(self.reject(format!("{name} must be positive, got {v}")));
                }
            }
        }

        let spacing = [
            ("window_padding", self.window_padding.map(|v| v.0)),
            ("window_border", self.window_border.map(|v| v.0)),
        ];
        for (name, value) in spacing {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(self.reject(format!("{name} must not be negative, got {v}")));
                }
            }
        }
        Ok(())
    }

    fn reject(&self, reason: String) -> UiError {
        tracing::warn!(%reason, config = ?self, "rejecting theme config");
        UiError::InvalidConfig(reason)
    }
}
