// src/color.rs
use bevy_color::{ColorToComponents, LinearRgba, Srgba};

/// Parse a hex colour code such as `#f44336`.
pub fn parse_hex(code: &str) -> anyhow::Result<Srgba> {
    Srgba::hex(code).map_err(|e| {
        anyhow::anyhow!("could not convert colour '{code}': {e:?}")
    })
}

/// sRGB from 8-bit channels.
pub fn rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Srgba {
    Srgba::rgba_u8(r, g, b, a)
}

/// Linear-space RGBA components, the form vertex data carries.
pub fn to_linear_array(color: Srgba) -> [f32; 4] {
    LinearRgba::from(color).to_f32_array()
}

/// Linear RGBA with the alpha channel replaced.
pub fn to_linear_array_with_alpha(color: Srgba, alpha: f32) -> [f32; 4] {
    let mut components = to_linear_array(color);
    components[3] = alpha;
    components
}

/// Pick a colour from a palette, wrapping around when there are more categories than colours.
pub fn palette_entry(palette: &[Srgba], index: usize) -> Srgba {
    if palette.is_empty() {
        return Srgba::WHITE;
    }
    palette[index % palette.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_codes() {
        let color = parse_hex("#ff0000").unwrap();
        assert_eq!(color, Srgba::rgb_u8(255, 0, 0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_hex("not a colour").is_err());
    }

    #[test]
    fn palette_wraps() {
        let red = Srgba::new(1.0, 0.0, 0.0, 1.0);
        let green = Srgba::new(0.0, 1.0, 0.0, 1.0);
        let palette = [red, green];
        assert_eq!(palette_entry(&palette, 3), green);
        assert_eq!(palette_entry(&[], 3), Srgba::WHITE);
    }

    #[test]
    fn alpha_override_keeps_rgb() {
        let components = to_linear_array_with_alpha(Srgba::WHITE, 0.0);
        assert_eq!(components, [1.0, 1.0, 1.0, 0.0]);
    }
}
