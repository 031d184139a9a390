// Translate `data-*` attributes on a canvas into engine configuration.
// Free of DOM types so the host-side tests can include it.

use super::constants::{FX_BACKGROUND, FX_PARTICLES};
use verdant_core::constants::DEFAULT_PARTICLES;
use verdant_core::{ParticleConfig, Theme, Variant};

#[derive(Clone, Debug, PartialEq)]
pub enum FxSpec {
    Particles(ParticleConfig),
    Background(Variant),
}

/// Raw attribute values as read from one element.
#[derive(Clone, Debug, Default)]
pub struct FxAttrs<'a> {
    pub fx: Option<&'a str>,
    pub particle_count: Option<&'a str>,
    pub interactive: Option<&'a str>,
    pub theme: Option<&'a str>,
    pub variant: Option<&'a str>,
}

pub fn parse_count(raw: Option<&str>) -> i64 {
    match raw.map(str::trim) {
        None | Some("") => DEFAULT_PARTICLES as i64,
        Some(s) => s.parse::<f64>().map(|n| n.floor() as i64).unwrap_or_else(|_| {
            log::warn!("[attrs] invalid particle count {:?}", s);
            DEFAULT_PARTICLES as i64
        }),
    }
}

/// HTML boolean-attribute semantics: present means on unless spelled false.
pub fn parse_flag(raw: Option<&str>) -> bool {
    match raw.map(|s| s.trim().to_ascii_lowercase()) {
        None => false,
        Some(s) => !matches!(s.as_str(), "false" | "0" | "no" | "off"),
    }
}

pub fn fx_spec(attrs: &FxAttrs<'_>) -> Option<FxSpec> {
    let kind = attrs.fx?.trim().to_ascii_lowercase();
    match kind.as_str() {
        FX_PARTICLES => Some(FxSpec::Particles(
            ParticleConfig::default()
                .with_count(parse_count(attrs.particle_count))
                .interactive(parse_flag(attrs.interactive))
                .theme(Theme::from_tag(attrs.theme.unwrap_or_default())),
        )),
        FX_BACKGROUND => Some(FxSpec::Background(
            attrs.variant.map(Variant::from_tag).unwrap_or_default(),
        )),
        other => {
            log::warn!("[attrs] unknown data-fx {:?}", other);
            None
        }
    }
}
