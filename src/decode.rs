// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Protocol decoders that turn signal histories into transactions.
//!
//! Every decoder is a pure function over borrowed [`Signal`]s: it reads
//! values through [`Signal::value_at`] and returns its events ordered by
//! start time. Nothing here mutates the signal table, so decoders may run
//! concurrently against the same parsed dump.
use std::fmt;

use crate::vcd::signal::{Signal, TimeStamp};

pub mod avalon;
pub mod spi;
pub mod uart;

/// One decoded transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    pub start_time: TimeStamp,
    pub end_time: TimeStamp,
    /// Human readable transaction detail.
    pub data: String,
    /// Short form for compact display.
    pub label: String,
}

impl DecodedEvent {
    pub fn new(start_time: TimeStamp, end_time: TimeStamp, data: String, label: String) -> Self {
        DecodedEvent {
            start_time,
            end_time,
            data,
            label,
        }
    }
}

impl fmt::Display for DecodedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] {}  {}",
            self.start_time, self.end_time, self.label, self.data
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}

impl Edge {
    fn matches(&self, prev: &str, curr: &str) -> bool {
        match self {
            Edge::Rising => prev == "0" && curr == "1",
            Edge::Falling => prev == "1" && curr == "0",
        }
    }
}

/// Times of every recorded `edge` transition of `signal`. Only clean
/// `0`/`1` transitions count, so `x -> 1` is not a rising edge.
pub(crate) fn edge_times(signal: &Signal, edge: Edge) -> impl Iterator<Item = TimeStamp> + '_ {
    signal
        .history
        .windows(2)
        .filter(move |pair| edge.matches(&pair[0].1, &pair[1].1))
        .map(|pair| pair[1].0)
}

/// Value of an optional line at `time`, `x` if the line isn't there.
pub(crate) fn line_value_at<'a>(line: Option<&'a Signal>, time: TimeStamp) -> &'a str {
    line.map_or("x", |signal| signal.value_at(time))
}

/// Whether an optional line is present and driven high at `time`.
pub(crate) fn line_is_high(line: Option<&Signal>, time: TimeStamp) -> bool {
    line.is_some_and(|signal| signal.value_at(time) == "1")
}
