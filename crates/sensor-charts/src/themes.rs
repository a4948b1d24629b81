use plotters::style::{Color, IntoFont, RGBColor, ShapeStyle, TextStyle};

/// Linear colour ramp sampled in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMap {
    stops: &'static [RGBColor],
}

/// Perceptually uniform blue → green → yellow ramp.
pub const VIRIDIS: ColorMap = ColorMap {
    stops: &[
        RGBColor(0x44, 0x01, 0x54),
        RGBColor(0x48, 0x28, 0x78),
        RGBColor(0x3E, 0x49, 0x89),
        RGBColor(0x31, 0x68, 0x8E),
        RGBColor(0x26, 0x82, 0x8E),
        RGBColor(0x1F, 0x9E, 0x89),
        RGBColor(0x35, 0xB7, 0x79),
        RGBColor(0x6D, 0xCD, 0x59),
        RGBColor(0xB4, 0xDE, 0x2C),
        RGBColor(0xFD, 0xE7, 0x25),
    ],
};

/// Black → purple → orange → pale yellow ramp.
pub const MAGMA: ColorMap = ColorMap {
    stops: &[
        RGBColor(0x00, 0x00, 0x04),
        RGBColor(0x18, 0x0F, 0x3D),
        RGBColor(0x44, 0x0F, 0x76),
        RGBColor(0x72, 0x1F, 0x81),
        RGBColor(0x9E, 0x2F, 0x7F),
        RGBColor(0xCD, 0x40, 0x71),
        RGBColor(0xF1, 0x60, 0x5D),
        RGBColor(0xFD, 0x96, 0x68),
        RGBColor(0xFE, 0xCA, 0x8D),
        RGBColor(0xFC, 0xFD, 0xBF),
    ],
};

impl ColorMap {
    /// Colour at position `t`. Values outside `[0, 1]` are clamped and NaN
    /// maps to the first stop.
    pub fn sample(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let last = self.stops.len() - 1;
        let scaled = t * last as f64;
        let lo = (scaled.floor() as usize).min(last);
        let hi = (lo + 1).min(last);
        let frac = scaled - lo as f64;

        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        let (a, b) = (self.stops[lo], self.stops[hi]);
        RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
    }
}

/// Colours and sizes shared by every chart.
#[derive(Debug, Clone)]
pub struct ChartTheme {
    pub background: RGBColor,
    pub foreground: RGBColor,
    /// Line colours for multi-series charts, used in order.
    pub series: [RGBColor; 3],
    pub temperature: RGBColor,
    pub humidity: RGBColor,
    pub bar: RGBColor,
    /// Colour ramp for the TVOC/ECO2 scatter.
    pub scatter_map: ColorMap,
    /// Colour ramp for the normalised heatmap.
    pub heatmap_map: ColorMap,
    /// Caption font size in pixels.
    pub caption_size: f64,
    /// Axis label font size in pixels.
    pub label_size: f64,
}

impl ChartTheme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// White canvas with the tab10 accent colours (default).
    pub fn light() -> Self {
        Self {
            background: RGBColor(0xFF, 0xFF, 0xFF),
            foreground: RGBColor(0x00, 0x00, 0x00),
            series: [
                RGBColor(0x1F, 0x77, 0xB4),
                RGBColor(0xFF, 0x7F, 0x0E),
                RGBColor(0x2C, 0xA0, 0x2C),
            ],
            temperature: RGBColor(0xD6, 0x27, 0x28),
            humidity: RGBColor(0x1F, 0x77, 0xB4),
            bar: RGBColor(0x1F, 0x77, 0xB4),
            scatter_map: VIRIDIS,
            heatmap_map: MAGMA,
            caption_size: 24.0,
            label_size: 14.0,
        }
    }

    /// Dark canvas for viewing next to a terminal.
    pub fn dark() -> Self {
        Self {
            background: RGBColor(0x1E, 0x1E, 0x1E),
            foreground: RGBColor(0xE0, 0xE0, 0xE0),
            series: [
                RGBColor(0x4F, 0xC3, 0xF7),
                RGBColor(0xFF, 0xB7, 0x4D),
                RGBColor(0x81, 0xC7, 0x84),
            ],
            temperature: RGBColor(0xEF, 0x53, 0x50),
            humidity: RGBColor(0x4F, 0xC3, 0xF7),
            bar: RGBColor(0x4F, 0xC3, 0xF7),
            ..Self::light()
        }
    }

    /// Construct a theme by name. Falls back to `light` for unknown names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }
}

impl ChartTheme {
    // ── Styles ───────────────────────────────────────────────────────────────

    /// Chart title font.
    pub fn caption_font(&self) -> TextStyle<'static> {
        ("sans-serif", self.caption_size)
            .into_font()
            .color(&self.foreground)
    }

    /// Tick label, legend and axis description font.
    pub fn label_font(&self) -> TextStyle<'static> {
        self.label_font_in(self.foreground)
    }

    /// Label font in an accent colour, for axes tied to one series.
    pub fn label_font_in(&self, color: RGBColor) -> TextStyle<'static> {
        ("sans-serif", self.label_size).into_font().color(&color)
    }

    /// Axis lines.
    pub fn axis_style(&self) -> ShapeStyle {
        self.foreground.stroke_width(1)
    }

    /// Major grid lines.
    pub fn grid_style(&self) -> ShapeStyle {
        self.foreground.mix(0.2).stroke_width(1)
    }

    /// Minor grid lines.
    pub fn minor_grid_style(&self) -> ShapeStyle {
        self.foreground.mix(0.05).stroke_width(1)
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::light()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
