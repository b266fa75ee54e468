// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! SPI, MSB first, eight bit words.
use super::{edge_times, line_value_at, DecodedEvent, Edge};
use crate::vcd::signal::{Signal, TimeStamp};

/// Clock polarity and phase.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SpiMode {
    /// Clock idles high.
    pub cpol: bool,
    /// Data is sampled on the trailing edge of each clock pulse.
    pub cpha: bool,
}

impl SpiMode {
    pub fn new(cpol: bool, cpha: bool) -> SpiMode {
        SpiMode { cpol, cpha }
    }

    /// Edge on which both data lines are sampled.
    pub fn sampling_edge(&self) -> Edge {
        let leading = if self.cpol {
            Edge::Falling
        } else {
            Edge::Rising
        };
        match (leading, self.cpha) {
            (edge, false) => edge,
            (Edge::Rising, true) => Edge::Falling,
            (Edge::Falling, true) => Edge::Rising,
        }
    }
}

/// The bus being decoded. Only the clock is required.
#[derive(Debug, Copy, Clone)]
pub struct SpiLines<'a> {
    pub sclk: &'a Signal,
    pub mosi: Option<&'a Signal>,
    pub miso: Option<&'a Signal>,
    /// Active low chip select.
    pub cs: Option<&'a Signal>,
}

impl<'a> SpiLines<'a> {
    pub fn new(sclk: &'a Signal) -> Self {
        SpiLines {
            sclk,
            mosi: None,
            miso: None,
            cs: None,
        }
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    start_time: Option<TimeStamp>,
    mosi: Vec<bool>,
    miso: Vec<bool>,
}

impl Accumulator {
    fn reset(&mut self) {
        *self = Accumulator::default();
    }

    fn is_full(&self) -> bool {
        self.mosi.len() >= 8 || self.miso.len() >= 8
    }
}

fn assemble(bits: &[bool]) -> u8 {
    bits.iter()
        .fold(0u8, |byte, bit| (byte << 1) | u8::from(*bit))
}

/// Decodes every word shifted over `lines`.
///
/// Any sampling edge seen while chip select isn't low throws away the
/// partially shifted word. A missing data line reads as `0x00`.
pub fn decode_spi(lines: &SpiLines, mode: SpiMode) -> Vec<DecodedEvent> {
    let mut events = vec![];
    if lines.mosi.is_none() && lines.miso.is_none() {
        return events;
    }

    let mut acc = Accumulator::default();

    for time in edge_times(lines.sclk, mode.sampling_edge()) {
        if let Some(cs) = lines.cs {
            if cs.value_at(time) != "0" {
                acc.reset();
                continue;
            }
        }

        let start_time = *acc.start_time.get_or_insert(time);
        if lines.mosi.is_some() {
            acc.mosi.push(line_value_at(lines.mosi, time) == "1");
        }
        if lines.miso.is_some() {
            acc.miso.push(line_value_at(lines.miso, time) == "1");
        }

        if acc.is_full() {
            let mosi = assemble(&acc.mosi);
            let miso = assemble(&acc.miso);
            events.push(DecodedEvent::new(
                start_time,
                time,
                format!("MOSI: 0x{mosi:02X}, MISO: 0x{miso:02X}"),
                format!("{mosi:02X}/{miso:02X}"),
            ));
            acc.reset();
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{clock, signal};
    use super::*;

    /// Data line that holds `bits[i]` across the i-th clock period.
    fn data_line(name: &str, period: u64, bits: &str) -> Signal {
        let changes = bits
            .char_indices()
            .map(|(idx, bit)| (idx as u64 * period, if bit == '1' { "1" } else { "0" }))
            .collect::<Vec<_>>();
        signal(name, 1, &changes)
    }

    #[test]
    fn sampling_edges() {
        assert_eq!(SpiMode::new(false, false).sampling_edge(), Edge::Rising);
        assert_eq!(SpiMode::new(false, true).sampling_edge(), Edge::Falling);
        assert_eq!(SpiMode::new(true, false).sampling_edge(), Edge::Falling);
        assert_eq!(SpiMode::new(true, true).sampling_edge(), Edge::Rising);
    }

    #[test]
    fn mode_0_byte() {
        let sclk = clock("sclk", 10, 8);
        let mosi = data_line("mosi", 10, "10110010");
        let lines = SpiLines {
            mosi: Some(&mosi),
            ..SpiLines::new(&sclk)
        };

        let events = decode_spi(&lines, SpiMode::default());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "MOSI: 0xB2, MISO: 0x00");
        assert_eq!(events[0].label, "B2/00");
        assert_eq!((events[0].start_time, events[0].end_time), (5, 75));
    }

    #[test]
    fn both_lines_mode_1() {
        let sclk = clock("sclk", 10, 8);
        let mosi = data_line("mosi", 10, "11110000");
        let miso = data_line("miso", 10, "00000001");
        let lines = SpiLines {
            mosi: Some(&mosi),
            miso: Some(&miso),
            ..SpiLines::new(&sclk)
        };

        // falling edges at 10, 20, ... 70 only give seven samples
        assert!(decode_spi(&lines, SpiMode::new(false, true)).is_empty());

        let sclk = clock("sclk", 10, 9);
        let lines = SpiLines {
            sclk: &sclk,
            ..lines
        };
        let events = decode_spi(&lines, SpiMode::new(false, true));
        assert_eq!(events.len(), 1);
        // sampled half a period late, so the first bit is bit 1 of the line
        assert_eq!(events[0].label, "E0/03");
    }

    #[test]
    fn chip_select_drops_partial_words() {
        let sclk = clock("sclk", 10, 12);
        let mosi = data_line("mosi", 10, "111010110010");
        // deselected for the first four clocks
        let cs = signal("cs_n", 1, &[(0, "1"), (40, "0")]);
        let lines = SpiLines {
            mosi: Some(&mosi),
            cs: Some(&cs),
            ..SpiLines::new(&sclk)
        };

        let events = decode_spi(&lines, SpiMode::default());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "MOSI: 0xB2, MISO: 0x00");
        assert_eq!(events[0].start_time, 45);
    }

    #[test]
    fn no_data_lines_no_events() {
        let sclk = clock("sclk", 10, 8);
        assert!(decode_spi(&SpiLines::new(&sclk), SpiMode::default()).is_empty());
    }
}
