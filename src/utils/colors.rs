use gpui::Rgba;

/// Extension trait for modifying RGBA colors.
pub trait RgbaExt {
    /// Returns a new color with the specified alpha value.
    fn alpha(self, alpha: f32) -> Self;

    /// Moves this color towards `other` by `amount` (0 keeps it, 1 replaces it).
    fn mix(self, other: &Rgba, amount: f32) -> Self;
}

impl RgbaExt for Rgba {
    fn alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    fn mix(self, other: &Rgba, amount: f32) -> Self {
        let amount = amount.clamp(0., 1.);
        let channel = |from: f32, to: f32| from + (to - from) * amount;

        Rgba {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: channel(self.a, other.a),
        }
    }
}
