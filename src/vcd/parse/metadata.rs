// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use chrono::prelude::*;
use itertools::Itertools;

use super::super::reader::{Cursor, WordReader};
use super::super::types::{Timescale, TimescaleUnit, Version};
use super::combinator_atoms::{digit, take_while};
use super::types::ParseResult;

fn parse_date(
    day: &str,
    month: &str,
    date: &str,
    hh_mm_ss: &str,
    year: &str,
) -> Option<DateTime<Utc>> {
    let days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    if !days.contains(&day) {
        return None;
    }

    let months = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    if !months.contains(&month) {
        return None;
    }

    let date: u8 = date.parse().ok()?;
    if date > 31 {
        return None;
    }

    // hh:mm:ss
    let mut fields = hh_mm_ss.split(':');
    let hh: u8 = fields.next()?.parse().ok()?;
    let mm: u8 = fields.next()?.parse().ok()?;
    let ss: u8 = fields.next()?.parse().ok()?;
    if fields.next().is_some() || hh > 23 || mm > 59 || ss > 60 {
        return None;
    }

    let full_date = format!("{day} {month} {date} {hh}:{mm}:{ss} {year}");
    NaiveDateTime::parse_from_str(&full_date, "%a %b %d %H:%M:%S %Y")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date))
}

/// Consumes a `$date` body up to and including its `$end`.
pub(super) fn parse_date_directive(word_reader: &mut WordReader) -> Option<DateTime<Utc>> {
    let words = word_reader.words_until_end();

    // a date is typically composed of the 5 following words which can
    // occur in any order:
    // {Day, Month, Date(number in month), hh:mm:ss, year}.
    // Thus, we try our date parser on all 5! = 120 orderings of the words.
    if words.len() != 5 {
        log::debug!("ignoring $date with {} words", words.len());
        return None;
    }

    words
        .iter()
        .permutations(words.len())
        .find_map(|words| parse_date(words[0], words[1], words[2], words[3], words[4]))
}

pub(super) fn parse_version(word_reader: &mut WordReader) -> Option<Version> {
    let words = word_reader.words_until_end();
    if words.is_empty() {
        None
    } else {
        Some(Version(words.join(" ")))
    }
}

/// Consumes a `$timescale` body up to and including its `$end`.
///
/// We might see `1ps $end` or `1 ps $end`. Anything unparseable falls back
/// to the `1ns` default.
pub(super) fn parse_timescale(word_reader: &mut WordReader, cursor: Cursor) -> Timescale {
    let words = word_reader.words_until_end();
    let joined = words.concat();

    let ParseResult { matched, residual } = take_while(&joined, digit);
    let magnitude = matched.parse::<u32>().ok().filter(|magnitude| *magnitude > 0);
    let unit = TimescaleUnit::from_word(residual);

    match (magnitude, unit) {
        (Some(magnitude), Some(unit)) => Timescale::new(magnitude, unit),
        _ => {
            let timescale = Timescale::default();
            log::warn!(
                "unable to parse timescale `{}` at {cursor:?}, defaulting to {timescale}",
                words.join(" ")
            );
            timescale
        }
    }
}
