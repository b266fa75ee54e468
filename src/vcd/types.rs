// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::collections::BTreeMap;
use std::fmt;

use chrono::prelude::*;

use super::signal::{Signal, TimeStamp};
use super::vectors::reconstruct_vectors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version(pub String);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimescaleUnit {
    Fs,
    Ps,
    Ns,
    Us,
    Ms,
    S,
}

impl TimescaleUnit {
    pub(super) fn from_word(word: &str) -> Option<TimescaleUnit> {
        match word {
            "fs" => Some(TimescaleUnit::Fs),
            "ps" => Some(TimescaleUnit::Ps),
            "ns" => Some(TimescaleUnit::Ns),
            "us" => Some(TimescaleUnit::Us),
            "ms" => Some(TimescaleUnit::Ms),
            "s" => Some(TimescaleUnit::S),
            _ => None,
        }
    }

    /// The number of units per second.
    pub fn divisor(&self) -> u64 {
        match self {
            TimescaleUnit::S => 1,
            TimescaleUnit::Ms => 1_000,
            TimescaleUnit::Us => 1_000_000,
            TimescaleUnit::Ns => 1_000_000_000,
            TimescaleUnit::Ps => 1_000_000_000_000,
            TimescaleUnit::Fs => 1_000_000_000_000_000,
        }
    }
}

impl fmt::Display for TimescaleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self {
            TimescaleUnit::Fs => "fs",
            TimescaleUnit::Ps => "ps",
            TimescaleUnit::Ns => "ns",
            TimescaleUnit::Us => "us",
            TimescaleUnit::Ms => "ms",
            TimescaleUnit::S => "s",
        };
        write!(f, "{unit}")
    }
}

/// Length of one tick of the dump, e.g. `10ps`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timescale {
    pub magnitude: u32,
    pub unit: TimescaleUnit,
}

impl Timescale {
    pub fn new(magnitude: u32, unit: TimescaleUnit) -> Timescale {
        Timescale { magnitude, unit }
    }

    /// Duration of one tick in seconds.
    pub fn tick_seconds(&self) -> f64 {
        self.magnitude as f64 / self.unit.divisor() as f64
    }
}

impl Default for Timescale {
    fn default() -> Self {
        Timescale::new(1, TimescaleUnit::Ns)
    }
}

impl fmt::Display for Timescale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub date: Option<DateTime<Utc>>,
    pub version: Option<Version>,
    pub timescale: Timescale,
    /// Largest time marker seen in the value change section.
    pub max_time: TimeStamp,
}

/// Signals keyed by their fully qualified name.
pub type SignalTable = BTreeMap<String, Signal>;

#[derive(Debug, Clone, Default)]
pub struct VCD {
    pub metadata: Metadata,
    pub signals: SignalTable,
}

impl VCD {
    pub fn signal(&self, name: &str) -> Option<&Signal> {
        self.signals.get(name)
    }

    pub fn signals(&self) -> impl Iterator<Item = &Signal> {
        self.signals.values()
    }

    /// Merges bit-blasted buses back into vectors. See [`reconstruct_vectors`].
    pub fn reconstruct_vectors(&mut self) {
        reconstruct_vectors(&mut self.signals)
    }

    /// Largest recorded change time over every signal.
    pub fn last_change_time(&self) -> Option<TimeStamp> {
        self.signals()
            .filter_map(|signal| signal.history.last().map(|(time, _)| *time))
            .max()
    }
}
