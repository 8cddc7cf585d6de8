use std::collections::HashMap;
use std::str::FromStr;

use image::Rgba;
use once_cell::sync::Lazy;

use crate::error::GenError;

/// RGBA (各 0–255)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorValue {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for ColorValue {
    fn default() -> Self {
        ColorValue::BLACK // デフォルトは不透明な黒
    }
}

impl ColorValue {
    pub const BLACK: ColorValue = ColorValue::rgb(0, 0, 0);
    pub const WHITE: ColorValue = ColorValue::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// アルファを捨てて不透明にする（JPEG 出力用）
    pub const fn opaque(self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }

    pub const fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }

    /// 16進表記 (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`)
    pub fn from_hex(hex: &str) -> Option<ColorValue> {
        let hex = hex.strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize, n: usize| -> Option<u8> {
            let digits = &hex[i * n..(i + 1) * n];
            if n == 1 {
                u8::from_str_radix(&digits.repeat(2), 16).ok()
            } else {
                u8::from_str_radix(digits, 16).ok()
            }
        };
        match hex.len() {
            3 => Some(ColorValue::rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            4 => Some(ColorValue::rgba(
                channel(0, 1)?,
                channel(1, 1)?,
                channel(2, 1)?,
                channel(3, 1)?,
            )),
            6 => Some(ColorValue::rgb(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
            8 => Some(ColorValue::rgba(
                channel(0, 2)?,
                channel(1, 2)?,
                channel(2, 2)?,
                channel(3, 2)?,
            )),
            _ => None,
        }
    }

    /// 名前付き色（大文字小文字は区別しない）
    pub fn from_named(name: &str) -> Option<ColorValue> {
        let rgb = *NAMED_COLORS.get(name.to_ascii_lowercase().as_str())?;
        Some(ColorValue::rgb(
            (rgb >> 16) as u8,
            (rgb >> 8) as u8,
            rgb as u8,
        ))
    }

    /// `coverage` (0–1) で重み付けした source-over 合成
    pub fn blend_onto(&self, dst: &mut Rgba<u8>, coverage: f32) {
        let src_a = (self.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let dst_a = dst.0[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let mix = |s: u8, d: u8| -> u8 {
            let v = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        dst.0 = [
            mix(self.r, dst.0[0]),
            mix(self.g, dst.0[1]),
            mix(self.b, dst.0[2]),
            (out_a * 255.0).round() as u8,
        ];
    }
}

/// 色指定を解釈する。`#` 付きの16進表記か名前付き色のみ受け付ける
pub fn parse_color(spec: &str) -> Result<ColorValue, GenError> {
    let trimmed = spec.trim();
    let parsed = if trimmed.starts_with('#') {
        ColorValue::from_hex(trimmed)
    } else {
        ColorValue::from_named(trimmed)
    };
    parsed.ok_or_else(|| GenError::InvalidColor(spec.to_string()))
}

impl FromStr for ColorValue {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

static NAMED_COLORS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    [
        ("aliceblue", 0xf0f8ff),
        ("antiquewhite", 0xfaebd7),
        ("aqua", 0x00ffff),
        ("aquamarine", 0x7fffd4),
        ("azure", 0xf0ffff),
        ("beige", 0xf5f5dc),
        ("bisque", 0xffe4c4),
        ("black", 0x000000),
        ("blanchedalmond", 0xffebcd),
        ("blue", 0x0000ff),
        ("blueviolet", 0x8a2be2),
        ("brown", 0xa52a2a),
        ("burlywood", 0xdeb887),
        ("cadetblue", 0x5f9ea0),
        ("chartreuse", 0x7fff00),
        ("chocolate", 0xd2691e),
        ("coral", 0xff7f50),
        ("cornflowerblue", 0x6495ed),
        ("cornsilk", 0xfff8dc),
        ("crimson", 0xdc143c),
        ("cyan", 0x00ffff),
        ("darkblue", 0x00008b),
        ("darkcyan", 0x008b8b),
        ("darkgoldenrod", 0xb8860b),
        ("darkgray", 0xa9a9a9),
        ("darkgrey", 0xa9a9a9),
        ("darkgreen", 0x006400),
        ("darkkhaki", 0xbdb76b),
        ("darkmagenta", 0x8b008b),
        ("darkolivegreen", 0x556b2f),
        ("darkorange", 0xff8c00),
        ("darkorchid", 0x9932cc),
        ("darkred", 0x8b0000),
        ("darksalmon", 0xe9967a),
        ("darkseagreen", 0x8fbc8f),
        ("darkslateblue", 0x483d8b),
        ("darkslategray", 0x2f4f4f),
        ("darkslategrey", 0x2f4f4f),
        ("darkturquoise", 0x00ced1),
        ("darkviolet", 0x9400d3),
        ("deeppink", 0xff1493),
        ("deepskyblue", 0x00bfff),
        ("dimgray", 0x696969),
        ("dimgrey", 0x696969),
        ("dodgerblue", 0x1e90ff),
        ("firebrick", 0xb22222),
        ("floralwhite", 0xfffaf0),
        ("forestgreen", 0x228b22),
        ("fuchsia", 0xff00ff),
        ("gainsboro", 0xdcdcdc),
        ("ghostwhite", 0xf8f8ff),
        ("gold", 0xffd700),
        ("goldenrod", 0xdaa520),
        ("gray", 0x808080),
        ("grey", 0x808080),
        ("green", 0x008000),
        ("greenyellow", 0xadff2f),
        ("honeydew", 0xf0fff0),
        ("hotpink", 0xff69b4),
        ("indianred", 0xcd5c5c),
        ("indigo", 0x4b0082),
        ("ivory", 0xfffff0),
        ("khaki", 0xf0e68c),
        ("lavender", 0xe6e6fa),
        ("lavenderblush", 0xfff0f5),
        ("lawngreen", 0x7cfc00),
        ("lemonchiffon", 0xfffacd),
        ("lightblue", 0xadd8e6),
        ("lightcoral", 0xf08080),
        ("lightcyan", 0xe0ffff),
        ("lightgoldenrodyellow", 0xfafad2),
        ("lightgreen", 0x90ee90),
        ("lightgray", 0xd3d3d3),
        ("lightgrey", 0xd3d3d3),
        ("lightpink", 0xffb6c1),
        ("lightsalmon", 0xffa07a),
        ("lightseagreen", 0x20b2aa),
        ("lightskyblue", 0x87cefa),
        ("lightslategray", 0x778899),
        ("lightslategrey", 0x778899),
        ("lightsteelblue", 0xb0c4de),
        ("lightyellow", 0xffffe0),
        ("lime", 0x00ff00),
        ("limegreen", 0x32cd32),
        ("linen", 0xfaf0e6),
        ("magenta", 0xff00ff),
        ("maroon", 0x800000),
        ("mediumaquamarine", 0x66cdaa),
        ("mediumblue", 0x0000cd),
        ("mediumorchid", 0xba55d3),
        ("mediumpurple", 0x9370db),
        ("mediumseagreen", 0x3cb371),
        ("mediumslateblue", 0x7b68ee),
        ("mediumspringgreen", 0x00fa9a),
        ("mediumturquoise", 0x48d1cc),
        ("mediumvioletred", 0xc71585),
        ("midnightblue", 0x191970),
        ("mintcream", 0xf5fffa),
        ("mistyrose", 0xffe4e1),
        ("moccasin", 0xffe4b5),
        ("navajowhite", 0xffdead),
        ("navy", 0x000080),
        ("oldlace", 0xfdf5e6),
        ("olive", 0x808000),
        ("olivedrab", 0x6b8e23),
        ("orange", 0xffa500),
        ("orangered", 0xff4500),
        ("orchid", 0xda70d6),
        ("palegoldenrod", 0xeee8aa),
        ("palegreen", 0x98fb98),
        ("paleturquoise", 0xafeeee),
        ("palevioletred", 0xdb7093),
        ("papayawhip", 0xffefd5),
        ("peachpuff", 0xffdab9),
        ("peru", 0xcd853f),
        ("pink", 0xffc0cb),
        ("plum", 0xdda0dd),
        ("powderblue", 0xb0e0e6),
        ("purple", 0x800080),
        ("rebeccapurple", 0x663399),
        ("red", 0xff0000),
        ("rosybrown", 0xbc8f8f),
        ("royalblue", 0x4169e1),
        ("saddlebrown", 0x8b4513),
        ("salmon", 0xfa8072),
        ("sandybrown", 0xf4a460),
        ("seagreen", 0x2e8b57),
        ("seashell", 0xfff5ee),
        ("sienna", 0xa0522d),
        ("silver", 0xc0c0c0),
        ("skyblue", 0x87ceeb),
        ("slateblue", 0x6a5acd),
        ("slategray", 0x708090),
        ("slategrey", 0x708090),
        ("snow", 0xfffafa),
        ("springgreen", 0x00ff7f),
        ("steelblue", 0x4682b4),
        ("tan", 0xd2b48c),
        ("teal", 0x008080),
        ("thistle", 0xd8bfd8),
        ("tomato", 0xff6347),
        ("turquoise", 0x40e0d0),
        ("violet", 0xee82ee),
        ("wheat", 0xf5deb3),
        ("white", 0xffffff),
        ("whitesmoke", 0xf5f5f5),
        ("yellow", 0xffff00),
        ("yellowgreen", 0x9acd32),
    ]
    .into_iter()
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_hex_agree() {
        let short = parse_color("#fff").unwrap();
        let long = parse_color("#ffffff").unwrap();
        assert_eq!(short, long);
        assert_eq!(short, ColorValue::rgba(255, 255, 255, 255));
    }

    #[test]
    fn four_digit_hex_carries_alpha() {
        assert_eq!(parse_color("#0000").unwrap(), ColorValue::rgba(0, 0, 0, 0));
        assert_eq!(
            parse_color("#1234").unwrap(),
            ColorValue::rgba(0x11, 0x22, 0x33, 0x44)
        );
    }

    #[test]
    fn eight_digit_hex() {
        assert_eq!(
            parse_color("#CCCCCC80").unwrap(),
            ColorValue::rgba(0xcc, 0xcc, 0xcc, 0x80)
        );
    }

    #[test]
    fn named_colors_are_case_insensitive() {
        assert_eq!(parse_color("red").unwrap(), ColorValue::rgb(255, 0, 0));
        assert_eq!(
            parse_color("CornflowerBlue").unwrap(),
            ColorValue::rgb(0x64, 0x95, 0xed)
        );
        assert_eq!("grey".parse::<ColorValue>().unwrap(), ColorValue::rgb(128, 128, 128));
    }

    #[test]
    fn invalid_input_names_the_offender() {
        for bad in ["notacolor123", "#ggg", "#12345", "fff", "", "#"] {
            match parse_color(bad) {
                Err(GenError::InvalidColor(s)) => assert_eq!(s, bad),
                other => panic!("expected InvalidColor for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn blend_full_coverage_replaces_opaque_pixel() {
        let mut px = Rgba([10, 20, 30, 255]);
        ColorValue::rgb(200, 100, 50).blend_onto(&mut px, 1.0);
        assert_eq!(px.0, [200, 100, 50, 255]);
    }

    #[test]
    fn blend_half_coverage_mixes() {
        let mut px = Rgba([0, 0, 0, 255]);
        ColorValue::WHITE.blend_onto(&mut px, 0.5);
        assert_eq!(px.0, [128, 128, 128, 255]);
    }

    #[test]
    fn blend_zero_coverage_is_noop() {
        let mut px = Rgba([1, 2, 3, 4]);
        ColorValue::WHITE.blend_onto(&mut px, 0.0);
        assert_eq!(px.0, [1, 2, 3, 4]);
    }
}
