//! SVG icons for the Wharf UI.
//!
//! All icons are embedded at compile time using `include_bytes!`.
//!
//! Two types of icons are available:
//! - Static icons: Standard SVG icons for general use
//! - Animated icons: SVG icons that animate color on hover (for use in buttons)

use iced::widget::svg::Handle;
use iced::{Element, Length};

// Use iced_anim's animated SVG for hover effects
use iced_anim::widget::svg::Svg as AnimatedSvg;
// Keep standard SVG for static icons
use iced::widget::svg::Svg;

/// Icon size presets.
#[derive(Debug, Clone, Copy, Default)]
pub enum IconSize {
    /// Small icon (12px)
    Small,
    /// Medium icon (16px) - default
    #[default]
    Medium,
    /// Large icon (20px)
    Large,
}

impl IconSize {
    fn pixels(self) -> f32 {
        match self {
            IconSize::Small => 12.0,
            IconSize::Medium => 16.0,
            IconSize::Large => 20.0,
        }
    }
}

/// Create an SVG element from raw bytes.
fn svg_icon<Message: 'static>(data: &'static [u8], size: IconSize) -> Element<'static, Message> {
    let handle = Handle::from_memory(data);
    Svg::new(handle)
        .width(Length::Fixed(size.pixels()))
        .height(Length::Fixed(size.pixels()))
        .into()
}

/// Create an animated SVG element from raw bytes.
/// Animated icons smoothly transition colors on hover - ideal for use in buttons.
fn animated_svg_icon<Message: 'static>(
    data: &'static [u8],
    size: IconSize,
) -> Element<'static, Message> {
    let handle = Handle::from_memory(data);
    AnimatedSvg::new(handle)
        .width(Length::Fixed(size.pixels()))
        .height(Length::Fixed(size.pixels()))
        .into()
}

// ============================================================================
// Action Icons
// ============================================================================

/// External link (opens in the browser).
pub fn external_link<Message: 'static>(size: IconSize) -> Element<'static, Message> {
    svg_icon(include_bytes!("external-link.svg"), size)
}

// ============================================================================
// Connection Icons
// ============================================================================

/// Connected icon (green).
pub fn connected<Message: 'static>(size: IconSize) -> Element<'static, Message> {
    svg_icon(include_bytes!("connected.svg"), size)
}

/// Disconnected icon (red with slash).
pub fn disconnected<Message: 'static>(size: IconSize) -> Element<'static, Message> {
    svg_icon(include_bytes!("disconnected.svg"), size)
}

// ============================================================================
// Theme Icons
// ============================================================================

/// Sun icon (light theme indicator, animated for smooth hover transitions).
pub fn sun<Message: 'static>(size: IconSize) -> Element<'static, Message> {
    animated_svg_icon(include_bytes!("sun.svg"), size)
}

/// Moon icon (dark theme indicator, animated for smooth hover transitions).
pub fn moon<Message: 'static>(size: IconSize) -> Element<'static, Message> {
    animated_svg_icon(include_bytes!("moon.svg"), size)
}
