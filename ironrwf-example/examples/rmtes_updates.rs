//! RMTES partial update example.
//!
//! Caches a text field, applies a sequence of full and partial updates as a
//! market data feed would, and prints the text after each one.

mod common;

use common::{hex, init_logging};
use ironrwf_rmtes::{RmtesBuffer, RmtesUpdateBuilder, has_partial_update};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    init_logging();

    let mut headline = RmtesBuffer::new();
    let mut builder = RmtesUpdateBuilder::new();

    let updates = vec![
        bytes::Bytes::from_static(b"abcdefghijkl"),
        builder.move_to(0).write(b"12").build(),
        builder.move_to(9).write(b" ").repeat(2).build(),
        builder.move_to(4).write(b"\x1b(B").build(),
    ];

    for update in &updates {
        let partial = has_partial_update(update);
        headline.apply(update)?;
        info!(
            "{} update [{}] -> {:?} ({} UTF-16 units)",
            if partial { "partial" } else { "full" },
            hex(update),
            headline.to_string(),
            headline.as_utf16().len()
        );
    }

    let snapshot = headline.clone();

    let bad = builder.move_to(40).write(b"X").build();
    if let Err(e) = headline.apply(&bad) {
        warn!("Rejected update [{}]: {}", hex(&bad), e);
    }
    info!("Cache unchanged: {}", headline == snapshot);

    headline.clear();
    if let Err(e) = headline.apply(b"\x1b[0`Z") {
        warn!("Rejected update on empty cache: {}", e);
    }

    Ok(())
}
