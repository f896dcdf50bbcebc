use crate::config::{CustomTheme, ThemeConfig};
use ratatui::style::Color;
use tracing::warn;

pub const CUSTOM_THEME: &str = "procyon";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub neutral: Color,
    pub base: Color,
    pub content: Color,
}

// primary, secondary, accent, neutral, base, content
const BUILTIN: &[(&str, [u32; 6])] = &[
    ("light", [0x570df8, 0xf000b8, 0x37cdbe, 0x3d4451, 0xffffff, 0x1f2937]),
    ("dark", [0x661ae6, 0xd926aa, 0x1fb2a5, 0x191d24, 0x2a303c, 0xa6adbb]),
    ("cupcake", [0x65c3c8, 0xef9fbc, 0xeeaf3a, 0x291334, 0xfaf7f5, 0x291334]),
    ("bumblebee", [0xe0a82e, 0xf9d72f, 0x181830, 0x181830, 0xffffff, 0x181830]),
    ("emerald", [0x66cc8a, 0x377cfb, 0xea5234, 0x333c4d, 0xffffff, 0x333c4d]),
    ("corporate", [0x4b6bfb, 0x7b92b2, 0x67cba0, 0x181a2a, 0xffffff, 0x181a2a]),
    ("synthwave", [0xe779c1, 0x58c7f3, 0xf3cc30, 0x221551, 0x1a103d, 0xf9f7fd]),
    ("retro", [0xef9995, 0xa4cbb4, 0xebdc99, 0x7d7259, 0xe4d8b4, 0x282425]),
    ("cyberpunk", [0xff7598, 0x75d1f0, 0xc07eec, 0x423f00, 0xffee00, 0x1a1a1a]),
    ("valentine", [0xe96d7b, 0xa991f7, 0x88dbdd, 0xaf4670, 0xf0d6e8, 0x632c3b]),
    ("halloween", [0xf28c18, 0x6d3a9c, 0x51a800, 0x1b1d1d, 0x212121, 0xd4d4d4]),
    ("garden", [0x5c7f67, 0xecf4e7, 0xfae5e5, 0x5d5656, 0xe9e7e7, 0x100f0f]),
    ("forest", [0x1eb854, 0x1fd65f, 0x1db990, 0x19362d, 0x171212, 0xd1cccc]),
    ("aqua", [0x09ecf3, 0x966fb3, 0xffe999, 0x3b8ac4, 0x345da7, 0xffffff]),
    ("lofi", [0x0d0d0d, 0x1a1919, 0x262626, 0x000000, 0xffffff, 0x000000]),
    ("pastel", [0xd1c1d7, 0xf6cbd1, 0xb4e9d6, 0x70acc7, 0xffffff, 0x333333]),
    ("fantasy", [0x6e0b75, 0x007ebd, 0xf8860d, 0x1f2937, 0xffffff, 0x1f2937]),
    ("wireframe", [0xb8b8b8, 0xb8b8b8, 0xb8b8b8, 0xebebeb, 0xffffff, 0x282828]),
    ("black", [0x343232, 0x343232, 0x343232, 0x272626, 0x000000, 0xd6d6d6]),
    ("luxury", [0xffffff, 0x152747, 0x513448, 0x171618, 0x09090b, 0xdca54c]),
    ("dracula", [0xff79c6, 0xbd93f9, 0xffb86c, 0x414558, 0x282a36, 0xf8f8f2]),
    ("cmyk", [0x45aeee, 0xe8488a, 0xfff232, 0x1a1a1a, 0xffffff, 0x1a1a1a]),
    ("autumn", [0x8c0327, 0xd85251, 0xd59b6a, 0x826a5c, 0xf1f1f1, 0x141414]),
    ("business", [0x1c4e80, 0x7c909a, 0xea6947, 0x23282e, 0x202020, 0xcdcdcd]),
    ("acid", [0xff00f4, 0xff7400, 0xcbfd03, 0x191a3f, 0xfafafa, 0x191a3f]),
    ("lemonade", [0x519903, 0xe9e92f, 0xf7f9ca, 0x191a3e, 0xffffff, 0x191a3e]),
    ("night", [0x38bdf8, 0x818cf8, 0xf471b5, 0x1e293b, 0x0f172a, 0xb3c5ef]),
    ("coffee", [0xdb924b, 0x263e3f, 0x10576d, 0x120c12, 0x20161f, 0x756e63]),
    ("winter", [0x047aff, 0x463aa2, 0xc148ac, 0x021431, 0xffffff, 0x394e6a]),
];

const FALLBACK_THEME: &str = "business";

fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

fn builtin(name: &str) -> Option<Palette> {
    BUILTIN
        .iter()
        .find(|(theme, _)| *theme == name)
        .map(|(_, c)| Palette {
            primary: rgb(c[0]),
            secondary: rgb(c[1]),
            accent: rgb(c[2]),
            neutral: rgb(c[3]),
            base: rgb(c[4]),
            content: rgb(c[5]),
        })
}

/// Parses `#rrggbb` or `#rgb`.
pub fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    u32::from_str_radix(&expanded, 16).ok().map(rgb)
}

fn is_light(color: Color) -> bool {
    match color {
        Color::Rgb(r, g, b) => {
            (0.299 * r as f64) + (0.587 * g as f64) + (0.114 * b as f64) > 140.0
        }
        _ => false,
    }
}

fn custom_palette(custom: &CustomTheme) -> Palette {
    let defaults = CustomTheme::default();
    let pick = |field: &str, value: &str, fallback: &str| {
        parse_hex(value).unwrap_or_else(|| {
            warn!(field, value, "invalid custom theme colour, using default");
            parse_hex(fallback).unwrap_or(Color::Reset)
        })
    };

    let base = pick("base_100", &custom.base_100, &defaults.base_100);
    Palette {
        primary: pick("primary", &custom.primary, &defaults.primary),
        secondary: pick("secondary", &custom.secondary, &defaults.secondary),
        accent: pick("accent", &custom.accent, &defaults.accent),
        neutral: pick("neutral", &custom.neutral, &defaults.neutral),
        base,
        content: if is_light(base) {
            rgb(0x1f2937)
        } else {
            rgb(0xe5e7eb)
        },
    }
}

/// The themes a user can switch between plus the custom palette.
#[derive(Debug, Clone)]
pub struct ThemeSet {
    names: Vec<String>,
    custom: Palette,
}

impl ThemeSet {
    pub fn new(config: &ThemeConfig) -> Self {
        let names: Vec<String> = config
            .themes
            .iter()
            .filter(|name| {
                let known = name.as_str() == CUSTOM_THEME || builtin(name).is_some();
                if !known {
                    warn!(theme = %name, "unknown theme ignored");
                }
                known
            })
            .cloned()
            .collect();

        Self {
            names,
            custom: custom_palette(&config.custom_theme),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn palette(&self, name: &str) -> Palette {
        if name == CUSTOM_THEME {
            return self.custom;
        }
        builtin(name)
            .or_else(|| builtin(FALLBACK_THEME))
            .unwrap_or(self.custom)
    }

    pub fn next(&self, current: &str) -> String {
        self.step(current, 1)
    }

    pub fn previous(&self, current: &str) -> String {
        self.step(current, -1)
    }

    fn step(&self, current: &str, delta: isize) -> String {
        if self.names.is_empty() {
            return current.to_string();
        }
        let len = self.names.len() as isize;
        let index = match self.names.iter().position(|n| n == current) {
            Some(i) => (i as isize + delta).rem_euclid(len),
            None => 0,
        };
        self.names[index as usize].clone()
    }
}

/// Picks the theme shown at startup.
///
/// An explicit override wins. Otherwise, with `respect_prefers_color_scheme`
/// set, the terminal background reported in `COLORFGBG` selects `light` or
/// `dark`.
pub fn initial_theme(
    config: &ThemeConfig,
    override_theme: Option<&str>,
    colorfgbg: Option<&str>,
) -> String {
    if let Some(theme) = override_theme {
        return theme.to_string();
    }

    if config.respect_prefers_color_scheme {
        if let Some(dark) = colorfgbg.and_then(background_is_dark) {
            return if dark { "dark" } else { "light" }.to_string();
        }
    }

    config.default_theme.clone()
}

/// `COLORFGBG` looks like `15;0` (fg;bg) or `15;default;0`.
fn background_is_dark(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(!matches!(bg, 7 | 9..=15))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(themes: &[&str]) -> ThemeConfig {
        ThemeConfig {
            themes: themes.iter().map(|t| t.to_string()).collect(),
            ..ThemeConfig::default()
        }
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#fc055b"), Some(Color::Rgb(0xfc, 0x05, 0x5b)));
        assert_eq!(parse_hex("#abc"), Some(Color::Rgb(0xaa, 0xbb, 0xcc)));
        assert_eq!(parse_hex("fc055b"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
        assert_eq!(parse_hex("#12345"), None);
    }

    #[test]
    fn test_every_default_theme_has_a_palette() {
        let set = ThemeSet::new(&ThemeConfig::default());
        assert_eq!(set.names().len(), crate::config::DEFAULT_THEMES.len());
    }

    #[test]
    fn test_custom_theme_falls_back_on_bad_hex() {
        let mut cfg = config(&[CUSTOM_THEME]);
        cfg.custom_theme.primary = "red".to_string();
        let palette = ThemeSet::new(&cfg).palette(CUSTOM_THEME);
        assert_eq!(palette.primary, Color::Rgb(0xfc, 0x05, 0x5b));
        // light base gets dark text
        assert_eq!(palette.content, Color::Rgb(0x1f, 0x29, 0x37));
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        let set = ThemeSet::new(&config(&["light", "dark", "dracula"]));
        assert_eq!(set.next("dracula"), "light");
        assert_eq!(set.previous("light"), "dracula");
        assert_eq!(set.next("light"), "dark");
        assert_eq!(set.next("business"), "light");
    }

    #[test]
    fn test_unknown_names_dropped() {
        let set = ThemeSet::new(&config(&["light", "neon-dream"]));
        assert_eq!(set.names(), &["light".to_string()]);
        assert_eq!(set.palette("neon-dream"), set.palette(FALLBACK_THEME));
    }

    #[test]
    fn test_initial_theme() {
        let mut cfg = ThemeConfig::default();
        assert_eq!(initial_theme(&cfg, None, Some("15;0")), "business");
        assert_eq!(initial_theme(&cfg, Some("dracula"), None), "dracula");

        cfg.respect_prefers_color_scheme = true;
        assert_eq!(initial_theme(&cfg, None, Some("15;0")), "dark");
        assert_eq!(initial_theme(&cfg, None, Some("0;default;15")), "light");
        assert_eq!(initial_theme(&cfg, None, None), "business");
    }
}
