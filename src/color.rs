use eframe::egui::Color32;
use palette::{named, Hsl, IntoColor, Lighten, Srgb};

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// Lighten a colour in HSL space; used for text drawn on the dark theme.
pub fn lighten(color: Color32, amount: f32) -> Color32 {
    let srgb = Srgb::new(color.r(), color.g(), color.b()).into_format::<f32>();
    let hsl: Hsl = srgb.into_color();
    let rgb: Srgb = hsl.lighten(amount).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// One colour per chart series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesColors {
    pub observed: Color32,
    pub full_fit: Color32,
    pub recent_fit: Color32,
}

impl Default for SeriesColors {
    fn default() -> Self {
        Self {
            observed: to_color32(named::ROYALBLUE),
            full_fit: to_color32(named::DARKORANGE),
            recent_fit: to_color32(named::FORESTGREEN),
        }
    }
}
