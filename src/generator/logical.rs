//! Literal construction for logical-type defaults.
//!
//! Avro stores these defaults in their base representation (days, millis,
//! micros, decimal bytes); the generated model wants the Python object.
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::avro::{LogicalSchema, LogicalType};
use crate::common::python::string_literal;
use crate::generator::state::Context;
use crate::generator::types::{DATETIME_IMPORT, DECIMAL_IMPORT};

static DECIMAL_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-]?)(\d+)(?:\.(\d+))?$").unwrap());

const MICROS_PER_DAY: i64 = 86_400_000_000;

/// Digits every `i128` can hold.
const MAX_DECIMAL_DIGITS: usize = 38;

/// Python constructor expression for a logical-type default, or `None` when
/// the default does not fit the logical type.
pub fn logical_default(
    ctx: &mut Context<'_>,
    logical: &LogicalSchema,
    default: &Value,
) -> Option<String> {
    match logical.logical_type {
        LogicalType::Decimal { precision, scale } => {
            let value = decimal_value(default.as_str()?, precision, scale)?;
            ctx.state.add_import(DECIMAL_IMPORT);
            Some(format!("decimal.Decimal('{value}')"))
        }
        LogicalType::Uuid => default.as_str().map(string_literal),
        LogicalType::Date => {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
            let date = epoch.checked_add_signed(TimeDelta::try_days(default.as_i64()?)?)?;
            if !(1..=9999).contains(&date.year()) {
                return None;
            }
            ctx.state.add_import(DATETIME_IMPORT);
            Some(format!(
                "datetime.date({}, {}, {})",
                date.year(),
                date.month(),
                date.day()
            ))
        }
        LogicalType::TimeMillis => time_literal(ctx, default.as_i64()?.checked_mul(1_000)?),
        LogicalType::TimeMicros => time_literal(ctx, default.as_i64()?),
        LogicalType::TimestampMillis => {
            datetime_literal(ctx, DateTime::from_timestamp_millis(default.as_i64()?)?)
        }
        LogicalType::TimestampMicros => {
            datetime_literal(ctx, DateTime::from_timestamp_micros(default.as_i64()?)?)
        }
    }
}

fn time_literal(ctx: &mut Context<'_>, micros: i64) -> Option<String> {
    if !(0..MICROS_PER_DAY).contains(&micros) {
        return None;
    }
    let seconds = u32::try_from(micros / 1_000_000).ok()?;
    let micro = u32::try_from(micros % 1_000_000).ok()?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, micro * 1_000)?;

    ctx.state.add_import(DATETIME_IMPORT);
    let mut args = format!("{}, {}, {}", time.hour(), time.minute(), time.second());
    if micro != 0 {
        args.push_str(&format!(", {micro}"));
    }
    Some(format!("datetime.time({args})"))
}

fn datetime_literal(ctx: &mut Context<'_>, value: DateTime<Utc>) -> Option<String> {
    if !(1..=9999).contains(&value.year()) {
        return None;
    }

    ctx.state.add_import(DATETIME_IMPORT);
    let mut args = format!(
        "{}, {}, {}, {}, {}, {}",
        value.year(),
        value.month(),
        value.day(),
        value.hour(),
        value.minute(),
        value.second()
    );
    let micro = value.timestamp_subsec_micros();
    if micro != 0 {
        args.push_str(&format!(", {micro}"));
    }
    Some(format!("datetime.datetime({args}, tzinfo=datetime.timezone.utc)"))
}

/// Decimal text with exactly `scale` fraction digits.
///
/// The default is either a plain decimal literal (`"10.00"`) or the Avro
/// encoding: a string whose code points are the big-endian two's-complement
/// bytes of the unscaled integer. A plain literal wins when both readings
/// are possible. The unscaled value must fit in an `i128`.
pub fn decimal_value(default: &str, precision: u32, scale: u32) -> Option<String> {
    let scale = usize::try_from(scale).ok()?;
    if scale > MAX_DECIMAL_DIGITS {
        return None;
    }

    let unscaled = match DECIMAL_LITERAL.captures(default) {
        Some(caps) => {
            let integer = caps[2].trim_start_matches('0');
            let fraction = caps.get(3).map_or("", |m| m.as_str());
            if fraction.len() > scale || integer.len() + scale > MAX_DECIMAL_DIGITS {
                return None;
            }
            let mut digits = format!("{integer}{fraction}");
            digits.push_str(&"0".repeat(scale - fraction.len()));
            let magnitude: i128 = if digits.is_empty() { 0 } else { digits.parse().ok()? };
            if &caps[1] == "-" { -magnitude } else { magnitude }
        }
        None => unscaled_from_bytes(default)?,
    };
    format_scaled(unscaled, precision, scale)
}

fn unscaled_from_bytes(encoded: &str) -> Option<i128> {
    let bytes = encoded
        .chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect::<Option<Vec<u8>>>()?;
    if bytes.is_empty() || bytes.len() > 16 {
        return None;
    }

    let negative = bytes[0] & 0x80 != 0;
    let mut value: i128 = if negative { -1 } else { 0 };
    for byte in bytes {
        value = (value << 8) | i128::from(byte);
    }
    Some(value)
}

fn format_scaled(unscaled: i128, precision: u32, scale: usize) -> Option<String> {
    let digits = unscaled.unsigned_abs().to_string();
    if unscaled != 0 && digits.len() > usize::try_from(precision).ok()? {
        return None;
    }

    let mut padded = "0".repeat((scale + 1).saturating_sub(digits.len()));
    padded.push_str(&digits);
    let (int_part, fraction) = padded.split_at(padded.len() - scale);
    let sign = if unscaled < 0 { "-" } else { "" };
    if scale == 0 {
        Some(format!("{sign}{int_part}"))
    } else {
        Some(format!("{sign}{int_part}.{fraction}"))
    }
}
