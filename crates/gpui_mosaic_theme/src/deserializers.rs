use gpui::{AbsoluteLength, DefiniteLength, Pixels, SharedString, px, rems};
use serde::{Deserialize, Deserializer, de::Error};
use smallvec::SmallVec;

use crate::ThemeVariant;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrFloat {
    String(String),
    Float(f32),
}

fn parse_suffixed(string: &str, suffix: &str) -> Option<f32> {
    string.trim().strip_suffix(suffix)?.trim().parse::<f32>().ok()
}

pub fn de_font_family<'de, D>(deserializer: D) -> Result<SmallVec<[SharedString; 1]>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(SharedString),
        Many(SmallVec<[SharedString; 1]>),
    }

    match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(family) => Ok(SmallVec::from_buf([family])),
        OneOrMany::Many(families) if families.is_empty() => {
            Err(D::Error::custom("font family list can't be empty."))
        }
        OneOrMany::Many(families) => Ok(families),
    }
}

pub fn de_variants<'de, D>(deserializer: D) -> Result<SmallVec<[ThemeVariant; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let variants = SmallVec::<[ThemeVariant; 2]>::deserialize(deserializer)?;

    if variants.is_empty() {
        return Err(D::Error::custom(
            "at least one theme variant needs to be provided.",
        ));
    }

    Ok(variants)
}

pub fn de_pixels<'de, D>(deserializer: D) -> Result<Pixels, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrFloat::deserialize(deserializer)? {
        StringOrFloat::Float(value) => Ok(px(value)),
        StringOrFloat::String(string) => parse_suffixed(&string, "px")
            .map(px)
            .ok_or_else(|| D::Error::custom(format!("expected a pixel value like \"4px\", got \"{string}\""))),
    }
}

pub fn de_abs_length<'de, D>(deserializer: D) -> Result<AbsoluteLength, D::Error>
where
    D: Deserializer<'de>,
{
    let string = match StringOrFloat::deserialize(deserializer)? {
        StringOrFloat::Float(value) => return Ok(AbsoluteLength::Pixels(px(value))),
        StringOrFloat::String(string) => string,
    };

    if let Some(value) = parse_suffixed(&string, "rem") {
        return Ok(AbsoluteLength::Rems(rems(value)));
    }

    if let Some(value) = parse_suffixed(&string, "px") {
        return Ok(AbsoluteLength::Pixels(px(value)));
    }

    Err(D::Error::custom(format!(
        "expected f32 or a string ending with 'rem' or 'px', got \"{string}\""
    )))
}

pub fn de_def_length<'de, D>(deserializer: D) -> Result<DefiniteLength, D::Error>
where
    D: Deserializer<'de>,
{
    let string = match StringOrFloat::deserialize(deserializer)? {
        StringOrFloat::Float(value) => {
            return Ok(DefiniteLength::Absolute(AbsoluteLength::Pixels(px(value))));
        }
        StringOrFloat::String(string) => string,
    };

    if let Some(percent) = parse_suffixed(&string, "%") {
        return Ok(DefiniteLength::Fraction(percent / 100.));
    }

    if let Some(value) = parse_suffixed(&string, "rem") {
        return Ok(DefiniteLength::Absolute(AbsoluteLength::Rems(rems(value))));
    }

    if let Some(value) = parse_suffixed(&string, "px") {
        return Ok(DefiniteLength::Absolute(AbsoluteLength::Pixels(px(value))));
    }

    Err(D::Error::custom(format!(
        "expected f32 or a string ending with '%', 'rem' or 'px', got \"{string}\""
    )))
}
