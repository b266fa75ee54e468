// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Rebuilds buses that a producer dumped one bit at a time, e.g.
//! `data [0]`, `data [1]`, ... into a single `data[7:0]` vector.
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::parse::combinator_atoms::{digit, take_while};
use super::parse::types::ParseResult;
use super::signal::{Signal, SignalType, TimeStamp};
use super::types::SignalTable;

// wider spans are almost all gaps, and each change would cost this many
// characters per bit
const MAX_VECTOR_WIDTH: u32 = 1 << 16;

/// Number of bits from `min_bit` to `max_bit` inclusive, `None` if it
/// can't be represented or exceeds `MAX_VECTOR_WIDTH`.
fn vector_width(min_bit: u32, max_bit: u32) -> Option<u32> {
    max_bit
        .checked_sub(min_bit)?
        .checked_add(1)
        .filter(|width| *width <= MAX_VECTOR_WIDTH)
}

/// Splits `<base> [<index>]` into its base and bit index.
pub(crate) fn split_bit_index(name: &str) -> Option<(&str, u32)> {
    let inner = name.strip_suffix(']')?;
    let open = inner.rfind('[')?;
    let (base, index) = (&inner[..open], &inner[open + 1..]);

    let ParseResult { matched, residual } = take_while(index, digit);
    if matched.is_empty() || !residual.is_empty() {
        return None;
    }
    let index = matched.parse::<u32>().ok()?;

    let base = base.trim_end();
    if base.is_empty() {
        return None;
    }
    Some((base, index))
}

/// Replaces every group of two or more single-bit signals sharing a base
/// name with one `<base>[<max>:<min>]` vector. Bit positions missing from
/// the group read as `x`. Running this on its own output changes nothing.
pub fn reconstruct_vectors(signals: &mut SignalTable) {
    let mut groups: BTreeMap<String, Vec<(u32, String)>> = BTreeMap::new();

    for (name, signal) in signals.iter() {
        if signal.size != 1 {
            continue;
        }
        if let Some((base, index)) = split_bit_index(name) {
            groups
                .entry(base.to_string())
                .or_default()
                .push((index, name.clone()));
        }
    }

    for (base, members) in groups {
        if members.len() < 2 {
            continue;
        }

        let min_bit = members.iter().map(|(index, _)| *index).min().unwrap_or(0);
        let max_bit = members.iter().map(|(index, _)| *index).max().unwrap_or(0);
        let width = match vector_width(min_bit, max_bit) {
            Some(width) => width,
            None => {
                log::warn!("not rebuilding {base}, bits {min_bit} to {max_bit} are too far apart");
                continue;
            }
        };

        let mut bits: HashMap<u32, Signal> = HashMap::new();
        for (index, name) in &members {
            if let Some(signal) = signals.remove(name) {
                bits.insert(*index, signal);
            }
        }

        let vector = merge_bits(&base, &bits, min_bit, max_bit, width);
        log::debug!(
            "merged {} bit signals into {} ({} changes)",
            members.len(),
            vector.name,
            vector.history.len()
        );
        if signals.contains_key(&vector.name) {
            log::warn!("rebuilt vector {} replaces a declared signal", vector.name);
        }
        signals.insert(vector.name.clone(), vector);
    }
}

fn merge_bits(
    base: &str,
    bits: &HashMap<u32, Signal>,
    min_bit: u32,
    max_bit: u32,
    width: u32,
) -> Signal {

    // msb first, so the vector reads the way it is declared
    let msb_first = (min_bit..=max_bit).rev().collect::<Vec<u32>>();

    let id_code = msb_first
        .iter()
        .filter_map(|index| bits.get(index))
        .map(|signal| signal.id_code.as_str())
        .collect::<Vec<&str>>()
        .join(",");
    let signal_type = msb_first
        .iter()
        .find_map(|index| bits.get(index))
        .map(|signal| signal.signal_type.clone())
        .unwrap_or(SignalType::Wire);

    let mut vector = Signal::new(
        &id_code,
        &format!("{base}[{max_bit}:{min_bit}]"),
        signal_type,
        width as usize,
    );

    let times: BTreeSet<TimeStamp> = bits.values().flat_map(|signal| signal.times()).collect();
    for time in times {
        let value = msb_first
            .iter()
            .map(|index| match bits.get(index) {
                Some(signal) => bit_char(signal.value_at(time)),
                None => 'x',
            })
            .collect::<String>();
        vector.push_change(time, &value);
    }

    vector
}

// single bit signals are occasionally dumped with `b` values, so only
// the least significant character counts
fn bit_char(value: &str) -> char {
    value.chars().last().unwrap_or('x')
}
