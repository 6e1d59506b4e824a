use serde::{Deserialize, Deserializer};

/// Read an optional unix timestamp, truncating fractional seconds.
///
/// Rows recorded through the web form carry fractional seconds.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map(|seconds| seconds.trunc() as i64))
}
