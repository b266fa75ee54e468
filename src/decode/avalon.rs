// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Avalon memory mapped host interface.
use super::{edge_times, line_is_high, line_value_at, DecodedEvent, Edge};
use crate::vcd::signal::{Signal, TimeStamp};
use crate::vcd::utilities::bin_to_hex;

/// The interface being decoded. Only the clock is required; a missing
/// strobe is never active and a missing address or data bus reads as `X`.
#[derive(Debug, Copy, Clone)]
pub struct AvalonLines<'a> {
    pub clk: &'a Signal,
    pub address: Option<&'a Signal>,
    pub read: Option<&'a Signal>,
    pub write: Option<&'a Signal>,
    pub writedata: Option<&'a Signal>,
    pub readdata: Option<&'a Signal>,
    pub waitrequest: Option<&'a Signal>,
    pub readdatavalid: Option<&'a Signal>,
}

impl<'a> AvalonLines<'a> {
    pub fn new(clk: &'a Signal) -> Self {
        AvalonLines {
            clk,
            address: None,
            read: None,
            write: None,
            writedata: None,
            readdata: None,
            waitrequest: None,
            readdatavalid: None,
        }
    }
}

/// Clock period estimated from the first two rising edges, one tick if
/// there are fewer than two.
fn clock_period(edges: &[TimeStamp]) -> TimeStamp {
    match edges {
        [first, second, ..] if second > first => second - first,
        _ => 1,
    }
}

/// Decodes the transfers on `lines`, checked at every rising clock edge.
///
/// An edge with `waitrequest` high is stalled and produces nothing.
/// Otherwise `write`, `read` and `readdatavalid` are each checked on their
/// own, so one edge may yield up to three events.
pub fn decode_avalon(lines: &AvalonLines) -> Vec<DecodedEvent> {
    let edges = edge_times(lines.clk, Edge::Rising).collect::<Vec<TimeStamp>>();
    let period = clock_period(&edges);
    let mut events = vec![];

    for time in edges {
        if line_is_high(lines.waitrequest, time) {
            continue;
        }

        let end = time + period;
        let address = bin_to_hex(line_value_at(lines.address, time));

        if line_is_high(lines.write, time) {
            let data = bin_to_hex(line_value_at(lines.writedata, time));
            events.push(DecodedEvent::new(
                time,
                end,
                format!("WRITE addr=0x{address} data=0x{data}"),
                format!("WR {address}"),
            ));
        }

        if line_is_high(lines.read, time) {
            events.push(DecodedEvent::new(
                time,
                end,
                format!("READ addr=0x{address}"),
                format!("RD REQ {address}"),
            ));
        }

        if line_is_high(lines.readdatavalid, time) {
            let data = bin_to_hex(line_value_at(lines.readdata, time));
            events.push(DecodedEvent::new(
                time,
                end,
                format!("READ DATA data=0x{data}"),
                format!("RD DATA {data}"),
            ));
        }
    }

    events
}
