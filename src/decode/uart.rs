// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! 8N1 UART with an idle-high line.
use super::DecodedEvent;
use crate::vcd::signal::{Signal, TimeStamp};
use crate::vcd::types::Timescale;

const DATA_BITS: u64 = 8;
// start + data + stop
const FRAME_BITS: u64 = DATA_BITS + 2;

/// Number of ticks one bit lasts, never less than one tick.
pub fn bit_duration_ticks(baud_rate: u32, timescale: &Timescale) -> TimeStamp {
    let ticks = 1.0 / (baud_rate as f64 * timescale.tick_seconds());
    if ticks.is_finite() && ticks >= 1.0 {
        ticks.round() as TimeStamp
    } else {
        1
    }
}

fn byte_label(byte: u8) -> String {
    if (0x20..=0x7e).contains(&byte) {
        (byte as char).to_string()
    } else {
        format!("\\x{byte:02X}")
    }
}

/// Samples the eight data bits of a frame whose start bit falls at
/// `start`, middle of each bit, LSB first. `None` if any bit is not a
/// clean `0`/`1`.
fn sample_byte(line: &Signal, start: TimeStamp, bit_ticks: TimeStamp) -> Option<u8> {
    (0..DATA_BITS).try_fold(0u8, |byte, bit| {
        // start + bit_ticks * (bit + 1.5)
        let time = start + bit_ticks * (2 * bit + 3) / 2;
        match line.value_at(time) {
            "1" => Some(byte | (1 << bit)),
            "0" => Some(byte),
            _ => None,
        }
    })
}

/// Decodes every byte sent on `line`.
///
/// Each `1 -> 0` transition is a candidate start bit. The line idles high,
/// so a history that opens with `0` starts a frame at its first entry. A
/// candidate whose data bits can't all be read is dropped and the scan
/// moves on to the next transition.
pub fn decode_uart(line: &Signal, baud_rate: u32, timescale: &Timescale) -> Vec<DecodedEvent> {
    let bit_ticks = bit_duration_ticks(baud_rate, timescale);
    let mut events = vec![];
    // changes before this time belong to the previous frame
    let mut resume_at: TimeStamp = 0;

    let idle = std::iter::once("1");
    let previous = idle.chain(line.history.iter().map(|(_, value)| value.as_str()));

    for (prev, (start, curr)) in previous.zip(&line.history) {
        if *start < resume_at || prev != "1" || curr != "0" {
            continue;
        }

        let byte = match sample_byte(line, *start, bit_ticks) {
            Some(byte) => byte,
            None => {
                log::debug!("dropping uart frame at {start}, unreadable data bit");
                continue;
            }
        };

        let end = start + bit_ticks * FRAME_BITS;
        events.push(DecodedEvent::new(
            *start,
            end,
            format!("0x{byte:02X}"),
            byte_label(byte),
        ));
        resume_at = end;
    }

    events
}
