//! Theme-aware color palette for Wharf.
//!
//! This module provides semantic colors that automatically adapt to the
//! current theme. Use these instead of hardcoded Color::from_rgb() values;
//! every view receives its colors through here, so there is no process-wide
//! style state.

use iced::{Color, Theme};

/// Get colors from the theme's extended palette.
/// This provides theme-aware colors for consistent light/dark mode support.
pub struct ThemeColors<'a> {
    theme: &'a Theme,
}

impl<'a> ThemeColors<'a> {
    /// Create a new ThemeColors from a theme reference.
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Get the extended palette from the theme.
    fn palette(&self) -> &iced::theme::palette::Extended {
        self.theme.extended_palette()
    }

    // ========================================================================
    // Background Colors
    // ========================================================================

    /// Primary background color (main content area).
    pub fn background(&self) -> Color {
        self.palette().background.base.color
    }

    /// Weaker background (slightly elevated surfaces).
    pub fn background_weak(&self) -> Color {
        self.palette().background.weak.color
    }

    // ========================================================================
    // Text Colors
    // ========================================================================

    /// Primary text color.
    pub fn text(&self) -> Color {
        self.palette().background.base.text
    }

    /// Muted/secondary text color.
    pub fn text_muted(&self) -> Color {
        self.palette().background.weak.text
    }

    /// Dimmed text (less important, disabled).
    pub fn text_dimmed(&self) -> Color {
        // Use a color between muted and background
        let text = self.text();
        let bg = self.background();
        Color::from_rgb(
            text.r * 0.5 + bg.r * 0.5,
            text.g * 0.5 + bg.g * 0.5,
            text.b * 0.5 + bg.b * 0.5,
        )
    }

    // ========================================================================
    // Semantic Colors (these stay consistent across themes)
    // ========================================================================

    /// Danger/error color (red).
    pub fn danger(&self) -> Color {
        self.palette().danger.base.color
    }

    /// Warning color (amber/orange).
    pub fn warning(&self) -> Color {
        // Iced doesn't have a built-in warning, use a custom amber
        if self.is_dark() {
            Color::from_rgb(0.9, 0.7, 0.2)
        } else {
            Color::from_rgb(0.8, 0.6, 0.0)
        }
    }

    /// Link color.
    pub fn link(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.4, 0.7, 1.0)
        } else {
            Color::from_rgb(0.1, 0.4, 0.8)
        }
    }

    // ========================================================================
    // Border Colors
    // ========================================================================

    /// Subtle border (less prominent).
    pub fn border_subtle(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.2, 0.2, 0.22)
        } else {
            Color::from_rgb(0.85, 0.85, 0.87)
        }
    }

    // ========================================================================
    // Chart Colors
    // ========================================================================

    /// Chart background color.
    pub fn chart_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.08, 0.08, 0.1)
        } else {
            Color::from_rgb(0.98, 0.98, 0.99)
        }
    }

    /// Chart outer background.
    pub fn chart_outer_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.1, 0.1, 0.12)
        } else {
            Color::from_rgb(0.95, 0.95, 0.96)
        }
    }

    /// Chart grid lines.
    pub fn chart_grid(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.2, 0.2, 0.25)
        } else {
            Color::from_rgb(0.85, 0.85, 0.88)
        }
    }

    /// Chart axis labels.
    pub fn chart_label(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.5, 0.5, 0.5)
        } else {
            Color::from_rgb(0.4, 0.4, 0.4)
        }
    }

    /// Chart data line.
    pub fn chart_line(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.2, 0.7, 1.0)
        } else {
            Color::from_rgb(0.1, 0.5, 0.8)
        }
    }

    /// Chart area fill (translucent, under the data line).
    pub fn chart_fill(&self) -> Color {
        let line = self.chart_line();
        Color::from_rgba(line.r, line.g, line.b, 0.15)
    }

    /// Chart point markers.
    pub fn chart_point(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.3, 0.8, 1.0)
        } else {
            Color::from_rgb(0.1, 0.4, 0.7)
        }
    }

    /// Limit annotation line.
    pub fn chart_limit_line(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.95, 0.55, 0.25)
        } else {
            Color::from_rgb(0.85, 0.45, 0.1)
        }
    }

    // ========================================================================
    // Card/Container Colors
    // ========================================================================

    /// Card background color.
    pub fn card_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.12, 0.12, 0.14)
        } else {
            Color::from_rgb(1.0, 1.0, 1.0)
        }
    }

    /// Row/list item background.
    pub fn row_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.13, 0.13, 0.15)
        } else {
            Color::from_rgb(0.98, 0.98, 0.99)
        }
    }

    /// Alternating row background.
    pub fn row_background_alt(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.11, 0.11, 0.13)
        } else {
            Color::from_rgb(0.96, 0.96, 0.97)
        }
    }

    /// Table header background.
    pub fn table_header(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.18, 0.18, 0.2)
        } else {
            Color::from_rgb(0.92, 0.92, 0.94)
        }
    }

    // ========================================================================
    // Code Colors (inline code and code blocks in Markdown)
    // ========================================================================

    /// Code background (fenced blocks and inline chips).
    pub fn code_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.09, 0.09, 0.11)
        } else {
            Color::from_rgb(0.94, 0.94, 0.95)
        }
    }

    /// Default code text color (used when no syntax matches).
    pub fn code_text(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.8, 0.8, 0.82)
        } else {
            Color::from_rgb(0.25, 0.25, 0.3)
        }
    }

    // ========================================================================
    // Utility
    // ========================================================================

    /// Check if the current theme is dark.
    pub fn is_dark(&self) -> bool {
        self.palette().is_dark
    }
}

/// Convenience function to create ThemeColors.
pub fn colors(theme: &Theme) -> ThemeColors<'_> {
    ThemeColors::new(theme)
}
