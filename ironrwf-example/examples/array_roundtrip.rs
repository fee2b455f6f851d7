//! Array encode/decode example.
//!
//! Encodes several arrays (a large variable-width Int array grown from an
//! empty buffer, a fixed-width symbol array, a Real price array, and a
//! DateTime array), decodes them back, and shows how a corrupt entry is
//! reported without stopping iteration.

mod common;

use anyhow::anyhow;
use bytes::Bytes;
use chrono::NaiveDate;
use common::{ExampleConfig, hex, init_logging};
use ironrwf_codec::{ArrayDecoder, ArrayEncoder, Ascii, EncoderConfig, Load};
use ironrwf_core::{DateTime, PrimitiveValue, Real};
use rust_decimal::Decimal;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    init_logging();
    let cfg = ExampleConfig::from_env();

    encode_ints(&cfg)?;
    encode_symbols()?;
    encode_prices()?;
    encode_timestamps()?;
    decode_corrupt();

    Ok(())
}

fn encode_ints(cfg: &ExampleConfig) -> anyhow::Result<()> {
    let config = EncoderConfig::new().with_initial_capacity(cfg.initial_capacity);
    let mut encoder = ArrayEncoder::with_config(config);
    for i in 0..cfg.entries {
        encoder.add(i64::try_from(i)?)?;
    }
    let array = encoder.complete()?;
    info!(
        "Int array: {} entries in {} bytes (buffer capacity {})",
        array.count(),
        array.as_bytes().len(),
        encoder.capacity()
    );

    let mut expected = 0i64;
    for entry in &array.decoder() {
        match entry.load() {
            Load::Value(PrimitiveValue::Int(v)) if v == expected => expected += 1,
            other => return Err(anyhow!("entry {} decoded to {:?}", entry.index(), other)),
        }
    }
    info!("Int array decoded back to 0..{}", expected);
    Ok(())
}

fn encode_symbols() -> anyhow::Result<()> {
    let mut encoder = ArrayEncoder::new();
    encoder.set_fixed_width(8)?;
    for symbol in ["TRI.N", "IBM.N", "VOD.L"] {
        encoder.add(Ascii::from(symbol))?;
    }
    encoder.add_blank::<Ascii>()?;

    if let Err(e) = encoder.add(Ascii::from("TOO.LONG.RIC")) {
        warn!("Rejected entry: {}", e);
    }

    let array = encoder.complete()?;
    info!("Symbol array bytes: {}", hex(array.as_bytes()));

    for entry in &array.decoder() {
        info!(
            "  [{}] code={:?} value={:?}",
            entry.index(),
            entry.code(),
            entry.load().into_value().map(|v| v.to_string())
        );
    }
    Ok(())
}

fn encode_prices() -> anyhow::Result<()> {
    let mut encoder = ArrayEncoder::new();
    for price in [Decimal::new(12_345, 2), Decimal::new(-5, 1), Decimal::new(100, 0)] {
        let real = Real::try_from(price).map_err(|d| anyhow!("{d} has no Real form"))?;
        encoder.add(real)?;
    }
    encoder.add(Real::nan())?;
    encoder.add_blank::<Real>()?;
    let array = encoder.complete()?;

    let decoder = ArrayDecoder::new(array.as_bytes())?;
    for entry in decoder.entries() {
        match entry.load() {
            Load::Value(PrimitiveValue::Real(real)) => {
                info!("  price {} ({:?})", real, real.to_decimal());
            }
            Load::Blank => info!("  price <blank>"),
            other => warn!("  unexpected {:?}", other),
        }
    }
    Ok(())
}

fn encode_timestamps() -> anyhow::Result<()> {
    let naive = NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_milli_opt(9, 30, 0, 250))
        .ok_or_else(|| anyhow!("invalid timestamp"))?;
    let timestamp = DateTime::try_from(naive).map_err(|t| anyhow!("{t} out of range"))?;

    let mut encoder = ArrayEncoder::new();
    encoder.set_fixed_width(9)?;
    encoder.add(timestamp)?;
    let array = encoder.complete()?;

    for entry in &array.decoder() {
        if let Load::Value(PrimitiveValue::DateTime(value)) = entry.load() {
            info!("  timestamp {} -> {:?}", value, value.to_naive());
        }
    }
    Ok(())
}

fn decode_corrupt() {
    // Real array: valid entry, entry with a reserved format byte, valid entry
    let bytes = Bytes::from_static(&[8, 0, 0, 3, 2, 0x0E, 0x05, 2, 0xC0, 0x01, 2, 0x0E, 0x07]);
    let decoder = match ArrayDecoder::new(&bytes) {
        Ok(decoder) => decoder,
        Err(e) => {
            warn!("Header rejected: {}", e);
            return;
        }
    };
    for entry in &decoder {
        match entry.load() {
            Load::Error(e) => info!("  [{}] ERROR {:?}: {}", entry.index(), e.code(), e),
            load => info!("  [{}] {:?}", entry.index(), load),
        }
    }
}
