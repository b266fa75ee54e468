// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! part of the vcd parser that walks the value change section and fills
//! in the history of every declared signal
use super::super::reader::{Cursor, WordReader};
use super::super::signal::TimeStamp;
use super::super::types::SignalTable;
use super::scopes::SignalMap;

fn is_scalar_state(chr: u8) -> bool {
    matches!(
        chr.to_ascii_lowercase(),
        b'0' | b'1' | b'x' | b'z' | b'u' | b'w' | b'l' | b'h' | b'-'
    )
}

fn apply_change(
    signals: &mut SignalTable,
    signal_map: &SignalMap,
    time: TimeStamp,
    id_code: &str,
    value: &str,
    cursor: Cursor,
) {
    // producers occasionally emit codes that were never declared
    let names = match signal_map.get(id_code) {
        Some(names) => names,
        None => {
            log::trace!("ignoring change for undeclared id `{id_code}` at {cursor:?}");
            return;
        }
    };

    for name in names {
        if let Some(signal) = signals.get_mut(name) {
            signal.push_change(time, value);
        }
    }
}

/// Walks the value change section one line at a time and returns the
/// largest time marker seen. A line that fits none of the change forms is
/// skipped on its own, so it can't take words from the lines around it.
pub(super) fn parse_events(
    word_reader: &mut WordReader,
    signals: &mut SignalTable,
    signal_map: &SignalMap,
) -> TimeStamp {
    let mut curr_time: TimeStamp = 0;
    let mut max_time: TimeStamp = 0;

    while let Some((words, cursor)) = word_reader.next_line() {
        let first = words[0].as_bytes()[0];
        match (first, words.as_slice()) {
            (b'#', [marker]) => match marker[1..].parse::<TimeStamp>() {
                Ok(time) => {
                    curr_time = time;
                    max_time = max_time.max(time);
                }
                Err(_) => log::debug!("skipping bad time marker `{marker}` at {cursor:?}"),
            },

            // handle the case of an n bit signal whose value must be parsed
            (b'b' | b'B', [value, id_code]) => {
                let bits = &value[1..];
                if bits.is_empty() || !bits.bytes().all(is_scalar_state) {
                    log::debug!("skipping bad vector value `{value}` at {cursor:?}");
                    continue;
                }
                let binary_value = bits.to_ascii_lowercase();
                apply_change(signals, signal_map, curr_time, id_code, &binary_value, cursor);
            }

            // real and string values are not tracked
            (b'r' | b'R' | b's' | b'S', [_, _]) => {}

            (chr, [word]) if is_scalar_state(chr) => {
                let id_code = &word[1..];
                if id_code.is_empty() {
                    log::debug!("scalar value `{word}` without an id at {cursor:?}");
                    continue;
                }
                let value = (chr.to_ascii_lowercase() as char).to_string();
                apply_change(signals, signal_map, curr_time, id_code, &value, cursor);
            }

            // although we don't store comments, we still need to advance
            // past them, and they may run over several lines
            (b'$', ["$comment", rest @ ..]) => {
                if !rest.contains(&"$end") {
                    word_reader.words_until_end();
                }
            }

            // `$dumpvars`, `$end` and friends are transparent
            (b'$', _) => {}

            _ => log::debug!("skipping line `{}` at {cursor:?}", words.join(" ")),
        }
    }

    max_time
}
