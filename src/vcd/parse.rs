// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::fs;
use std::path::Path;

use super::reader::WordReader;
use super::types::{Metadata, SignalTable, VCD};

pub(crate) mod combinator_atoms;
use combinator_atoms::tag;

pub(crate) mod types;
use types::ParseResult;

mod metadata;
use metadata::*;

mod scopes;
use scopes::*;

mod events;
use events::*;

const END_OF_HEADER: &str = "$enddefinitions";

fn parse_header(header: &str, metadata: &mut Metadata) -> (SignalTable, SignalMap) {
    let mut word_reader = WordReader::new(header, 1);
    let mut signals = SignalTable::new();
    let mut signal_map = SignalMap::new();
    let mut path = ScopePath::default();

    while let Some((word, cursor)) = word_reader.next_word() {
        let ParseResult { matched, residual } = tag(word, "$");
        // we hope that this word starts with a `$`, anything else in the
        // header is noise
        if matched != "$" {
            log::debug!("ignoring `{word}` in header at {cursor:?}");
            continue;
        }

        match residual {
            "date" => metadata.date = parse_date_directive(&mut word_reader),
            "version" => metadata.version = parse_version(&mut word_reader),
            "timescale" => metadata.timescale = parse_timescale(&mut word_reader, cursor),
            "scope" => parse_scope(&mut word_reader, &mut path, cursor),
            "upscope" => parse_upscope(&mut word_reader, &mut path, cursor),
            "var" => parse_var(
                &mut word_reader,
                &path,
                &mut signals,
                &mut signal_map,
                cursor,
            ),
            // a stray `$end` has nothing to skip over
            "end" => {}
            // `$comment` and anything we don't know about
            _ => {
                word_reader.words_until_end();
            }
        }
    }

    (signals, signal_map)
}

/// Parses the text of a VCD dump.
///
/// Parsing never fails. Lines that can't be understood are skipped, and
/// a dump with no `$enddefinitions` comes back empty.
pub fn parse_vcd(text: &str) -> VCD {
    let mut vcd = VCD::default();

    let header_len = match text.find(END_OF_HEADER) {
        Some(header_len) => header_len,
        None => {
            log::warn!("no {END_OF_HEADER} found, the dump is empty");
            return vcd;
        }
    };
    let header = &text[..header_len];

    // skip the `$end` closing `$enddefinitions`
    let rest = text[header_len + END_OF_HEADER.len()..].trim_start();
    let body = rest.strip_prefix("$end").unwrap_or(rest);

    let (mut signals, signal_map) = parse_header(header, &mut vcd.metadata);

    let body_start = text.len() - body.len();
    let first_body_line = text[..body_start].matches('\n').count() + 1;
    let mut word_reader = WordReader::new(body, first_body_line);

    vcd.metadata.max_time = parse_events(&mut word_reader, &mut signals, &signal_map);
    vcd.signals = signals;

    log::info!(
        "parsed {} signals up to time {} ({})",
        vcd.signals.len(),
        vcd.metadata.max_time,
        vcd.metadata.timescale
    );

    vcd
}

/// Reads and parses the VCD dump at `path`.
pub fn load_vcd(path: &Path) -> Result<VCD, String> {
    let text = fs::read_to_string(path).map_err(|e| {
        format!(
            "Error near {}:{}. Failed to read {}: {e}",
            file!(),
            line!(),
            path.display()
        )
    })?;
    Ok(parse_vcd(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcd::types::{Timescale, TimescaleUnit, Version};

    const CLK_DUMP: &str = "\
$date
    Mon Jan 2 15:04:05 2006
$end
$version Icarus Verilog $end
$timescale 10 ps $end
$comment anything $var wire 1 ? bogus $end $end
$scope module tb $end
$var wire 1 ! clk $end
$scope module dut $end
$var reg 4 \" count [3:0] $end
$upscope $end
$upscope $end
$enddefinitions $end
#0
$dumpvars
0!
b0000 \"
$end
#5
1!
#10
0!
b0001 \"
#15
1!
";

    #[test]
    fn header_and_values() {
        let vcd = parse_vcd(CLK_DUMP);

        assert_eq!(vcd.metadata.timescale, Timescale::new(10, TimescaleUnit::Ps));
        assert_eq!(
            vcd.metadata.version,
            Some(Version("Icarus Verilog".to_string()))
        );
        assert!(vcd.metadata.date.is_some());
        assert_eq!(vcd.metadata.max_time, 15);

        let names = vcd.signals.keys().cloned().collect::<Vec<_>>();
        assert_eq!(names, vec!["tb.clk", "tb.dut.count [3:0]"]);

        let clk = vcd.signal("tb.clk").unwrap();
        assert_eq!(clk.value_at(7), "1");
        assert_eq!(clk.value_at(0), "0");
        assert_eq!(clk.value_at(20), "1");

        let count = vcd.signal("tb.dut.count [3:0]").unwrap();
        assert_eq!(count.size, 4);
        assert_eq!(count.value_at(12), "0001");
    }

    #[test]
    fn max_time_covers_every_change() {
        let vcd = parse_vcd(CLK_DUMP);
        assert!(vcd.last_change_time().unwrap() <= vcd.metadata.max_time);
    }

    #[test]
    fn missing_timescale_defaults_to_1ns() {
        let vcd = parse_vcd("$var wire 1 ! a $end $enddefinitions $end\n#0\n1!\n");
        assert_eq!(vcd.metadata.timescale.to_string(), "1ns");
        assert_eq!(vcd.signal("a").unwrap().history, vec![(0, "1".to_string())]);
    }

    #[test]
    fn no_end_of_definitions_is_an_empty_dump() {
        let vcd = parse_vcd("$var wire 1 ! a $end #0 1!");
        assert!(vcd.signals.is_empty());
        assert_eq!(vcd.metadata.max_time, 0);
        assert_eq!(vcd.metadata.timescale, Timescale::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_vcd(Path::new("./tests/vcd-files/does-not-exist.vcd")).unwrap_err();
        assert!(err.contains("does-not-exist.vcd"));
    }
}
