// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

// these are thin type aliases primarily to make code more readable later on
pub type TimeStamp = u64;
pub type ValueChange = (TimeStamp, String);

/// Value reported for a signal that has never been assigned.
pub(crate) const UNKNOWN: &str = "x";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalType {
    Event,
    Integer,
    Parameter,
    Real,
    RealTime,
    Reg,
    Str,
    Supply0,
    Supply1,
    Time,
    Tri,
    TriAnd,
    TriOr,
    TriReg,
    Tri0,
    Tri1,
    WAnd,
    Wire,
    WOr,
    SVInt,
    SVShortInt,
    SVLongInt,
    SVChar,
    SVBit,
    SVLogic,
    SVShortReal,
    /// A var type the parser does not know about, kept verbatim.
    Other(String),
}

impl SignalType {
    pub(super) fn from_keyword(word: &str) -> SignalType {
        match word {
            "event" => SignalType::Event,
            "integer" => SignalType::Integer,
            "parameter" => SignalType::Parameter,
            "real" => SignalType::Real,
            "realtime" => SignalType::RealTime,
            "reg" => SignalType::Reg,
            "string" => SignalType::Str,
            "supply0" => SignalType::Supply0,
            "supply1" => SignalType::Supply1,
            "tri" => SignalType::Tri,
            "triand" => SignalType::TriAnd,
            "trior" => SignalType::TriOr,
            "trireg" => SignalType::TriReg,
            "tri0" => SignalType::Tri0,
            "tri1" => SignalType::Tri1,
            "time" => SignalType::Time,
            "wand" => SignalType::WAnd,
            "wire" => SignalType::Wire,
            "wor" => SignalType::WOr,
            "int" => SignalType::SVInt,
            "int_s" | "shortint" => SignalType::SVShortInt,
            "int_l" | "longint" => SignalType::SVLongInt,
            "logic" => SignalType::SVLogic,
            "bit" => SignalType::SVBit,
            "shortreal" => SignalType::SVShortReal,
            "byte" | "char" => SignalType::SVChar,
            other => SignalType::Other(other.to_string()),
        }
    }

    /// Whether the var holds state (`reg`, `integer`, ...) as opposed to
    /// being a net. Purely informational.
    pub fn is_register_like(&self) -> bool {
        matches!(
            self,
            SignalType::Reg
                | SignalType::Integer
                | SignalType::Real
                | SignalType::RealTime
                | SignalType::Time
                | SignalType::TriReg
                | SignalType::SVInt
                | SignalType::SVShortInt
                | SignalType::SVLongInt
                | SignalType::SVChar
                | SignalType::SVBit
                | SignalType::SVLogic
                | SignalType::SVShortReal
        )
    }
}

#[derive(Debug, Clone)]
pub struct Signal {
    /// Identifier code the dump producer assigned to this var. Vectors
    /// rebuilt from bit-blasted signals carry their members' codes, most
    /// significant first, joined by `,`.
    pub id_code: String,
    /// Dot joined scope path followed by the declared name.
    pub name: String,
    pub signal_type: SignalType,
    pub size: usize,
    /// Value changes in time order. Values are lowercase strings over
    /// `0 1 x z` (and the other nine-state letters some producers emit).
    pub history: Vec<ValueChange>,
}

impl Signal {
    pub fn new(id_code: &str, name: &str, signal_type: SignalType, size: usize) -> Signal {
        Signal {
            id_code: id_code.to_string(),
            name: name.to_string(),
            signal_type,
            size,
            history: vec![],
        }
    }

    /// Records a value change. A second change at the time of the last
    /// recorded entry overwrites it.
    pub fn push_change(&mut self, time: TimeStamp, value: &str) {
        match self.history.last_mut() {
            Some((last_time, last_value)) if *last_time == time => {
                last_value.clear();
                last_value.push_str(value);
            }
            _ => self.history.push((time, value.to_string())),
        }
    }

    pub fn value_at(&self, time: TimeStamp) -> &str {
        value_at(&self.history, time)
    }

    /// Times at which this signal has a recorded change.
    pub fn times(&self) -> impl Iterator<Item = TimeStamp> + '_ {
        self.history.iter().map(|(time, _)| *time)
    }
}

/// Value in effect at `time`: the last change at or before `time`.
///
/// Before the first recorded change, the first value is reported as the
/// state of the signal from time zero onward. An empty history reads as
/// `x`.
pub fn value_at(history: &[ValueChange], time: TimeStamp) -> &str {
    // the history is ordered by time, so the number of entries at or
    // before the desired time gives us the entry to report
    let idx = history.partition_point(|(change_time, _)| *change_time <= time);

    match idx {
        0 => history.first().map_or(UNKNOWN, |(_, value)| value.as_str()),
        idx => history[idx - 1].1.as_str(),
    }
}
