//! Datasource-specific scene metadata.
//!
//! Each known datasource keeps cloud cover and acquisition time under
//! different keys and in different encodings. Scenes from any other
//! datasource yield `None`.

use crate::error::{RadiantError, Result};
use crate::models::{KnownDatasource, Scene};
use chrono::NaiveDate;

/// Cloud cover percentage of a scene, if its datasource reports one.
pub fn cloud_cover(scene: &Scene) -> Option<f64> {
    match KnownDatasource::from_id(&scene.datasource.id)? {
        // Landsat 8 also carries CLOUD_COVER_LAND, computed over land pixels only
        KnownDatasource::Landsat8 => scene.metadata_f64("cloudCover"),
        KnownDatasource::Sentinel2 => scene.metadata_f64("cloudyPixelPercentage"),
        KnownDatasource::ModisTerra | KnownDatasource::ModisAqua => None,
    }
}

/// Acquisition time of a scene as `YYYY-MM-DDTHH:MM:SS.000Z`.
///
/// Returns `Ok(None)` for unknown datasources and for known datasources
/// whose metadata lacks the timestamp field.
pub fn timestamp(scene: &Scene) -> Result<Option<String>> {
    let Some(datasource) = KnownDatasource::from_id(&scene.datasource.id) else {
        return Ok(None);
    };

    match datasource {
        KnownDatasource::Landsat8 => {
            scene.metadata_str("acquisitionDate").map(normalize_date).transpose()
        }
        // already ISO-8601
        KnownDatasource::Sentinel2 => Ok(scene.metadata_str("timeStamp").map(str::to_string)),
        KnownDatasource::ModisTerra | KnownDatasource::ModisAqua => {
            normalize_date(modis_ordinal_date(&scene.name)?).map(Some)
        }
    }
}

/// Extract the `YYYYDDD` part of a MODIS granule name such as
/// `MOD09GA.A2016123.h11v07.006.2016125063537`.
fn modis_ordinal_date(name: &str) -> Result<&str> {
    name.split('.')
        .nth(1)
        .and_then(|part| part.get(1..))
        .filter(|date| !date.is_empty())
        .ok_or_else(|| RadiantError::InvalidTimestamp {
            value: name.to_string(),
            reason: "MODIS scene name has no '.A<YYYYDDD>.' component".to_string(),
        })
}

/// Normalize an ordinal (`YYYYDDD`) or calendar (`YYYY-MM-DD`) date to a
/// midnight UTC timestamp with millisecond precision.
pub fn normalize_date(value: &str) -> Result<String> {
    let invalid = |reason: String| RadiantError::InvalidTimestamp { value: value.to_string(), reason };

    if !value.is_ascii() {
        return Err(invalid("date strings are ASCII".to_string()));
    }

    let bytes = value.as_bytes();
    let digits_except = |dashes: &[usize]| {
        bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if dashes.contains(&i) { *b == b'-' } else { b.is_ascii_digit() })
    };

    let date = match value.len() {
        7 if !digits_except(&[]) => return Err(invalid("YYYYDDD must be seven digits".to_string())),
        10 if !digits_except(&[4, 7]) => {
            return Err(invalid("YYYY-MM-DD must be digits separated by '-'".to_string()))
        }
        7 => {
            let year: i32 = value[..4].parse().map_err(|e| invalid(format!("bad year: {}", e)))?;
            let day: u32 = value[4..].parse().map_err(|e| invalid(format!("bad day of year: {}", e)))?;
            NaiveDate::from_yo_opt(year, day)
                .ok_or_else(|| invalid(format!("day {} does not exist in {}", day, year)))?
        }
        10 => NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| invalid(e.to_string()))?,
        n => {
            return Err(invalid(format!(
                "expected 7 (YYYYDDD) or 10 (YYYY-MM-DD) characters, found {}",
                n
            )))
        }
    };

    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| invalid("midnight is not representable".to_string()))?;
    Ok(midnight.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}
