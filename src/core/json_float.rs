//! Serde adapter for metric `f64` fields.
//!
//! `serde_json` writes `NaN` and infinities as `null`, which then fails to
//! read back as `f64`. Non-finite values are written as the strings `"NaN"`,
//! `"inf"` and `"-inf"` instead; both numbers and those strings are accepted
//! on input.

use serde::{Deserialize, Deserializer, Serializer};

const NAN: &str = "NaN";
const INFINITY: &str = "inf";
const NEG_INFINITY: &str = "-inf";

pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str(NAN)
    } else if value.is_sign_positive() {
        serializer.serialize_str(INFINITY)
    } else {
        serializer.serialize_str(NEG_INFINITY)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FloatRepr {
    Number(f64),
    Text(String),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match FloatRepr::deserialize(deserializer)? {
        FloatRepr::Number(value) => Ok(value),
        FloatRepr::Text(text) => match text.as_str() {
            NAN => Ok(f64::NAN),
            INFINITY => Ok(f64::INFINITY),
            NEG_INFINITY => Ok(f64::NEG_INFINITY),
            other => Err(serde::de::Error::custom(format!(
                "expected a number, `{NAN}`, `{INFINITY}` or `{NEG_INFINITY}`, got `{other}`"
            ))),
        },
    }
}
