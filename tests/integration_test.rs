// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::path::Path;

use wavedecode::{
    bin_to_hex, decode_avalon, decode_spi, decode_uart, load_vcd, AvalonLines, SpiLines, SpiMode,
    Timescale, TimescaleUnit, VCD,
};

mod files;
use files::*;

fn load(file_name: &str) -> VCD {
    let mut vcd = load_vcd(Path::new(file_name)).unwrap();
    vcd.reconstruct_vectors();
    vcd
}

fn labels(events: &[wavedecode::DecodedEvent]) -> Vec<&str> {
    events.iter().map(|event| event.label.as_str()).collect()
}

#[test]
fn parse_all_vcds() {
    for file_name in FILES {
        let vcd = load_vcd(Path::new(file_name)).unwrap();
        assert!(!vcd.signals.is_empty(), "{file_name} has no signals");

        // every change lies within the reported time range
        let last = vcd.last_change_time().unwrap_or(0);
        assert!(last <= vcd.metadata.max_time, "{file_name}");
    }
}

#[test]
fn reconstruction_is_idempotent_on_all_vcds() {
    for file_name in FILES {
        let mut vcd = load(file_name);
        let before = vcd
            .signals()
            .map(|signal| (signal.name.clone(), signal.history.clone()))
            .collect::<Vec<_>>();
        vcd.reconstruct_vectors();
        let after = vcd
            .signals()
            .map(|signal| (signal.name.clone(), signal.history.clone()))
            .collect::<Vec<_>>();
        assert_eq!(before, after, "{file_name}");
    }
}

#[test]
fn uart_dump() {
    let vcd = load(UART);
    assert_eq!(vcd.metadata.timescale, Timescale::new(1, TimescaleUnit::Us));
    assert_eq!(vcd.metadata.max_time, 448);
    assert!(vcd.metadata.date.is_some());

    let tx = vcd.signal("uart_tb.tx").unwrap();
    let events = decode_uart(tx, 115_200, &vcd.metadata.timescale);
    assert_eq!(labels(&events), vec!["H", "i", "!"]);
    assert_eq!(events[0].data, "0x48");
    let spans = events
        .iter()
        .map(|event| (event.start_time, event.end_time))
        .collect::<Vec<_>>();
    assert_eq!(spans, vec![(20, 110), (110, 200), (200, 290)]);

    // never driven
    let rx = vcd.signal("uart_tb.rx").unwrap();
    assert!(decode_uart(rx, 115_200, &vcd.metadata.timescale).is_empty());
}

#[test]
fn spi_dump() {
    let vcd = load(SPI);
    let lines = SpiLines {
        mosi: vcd.signal("spi_tb.mosi"),
        miso: vcd.signal("spi_tb.miso"),
        cs: vcd.signal("spi_tb.cs_n"),
        ..SpiLines::new(vcd.signal("spi_tb.sclk").unwrap())
    };

    let events = decode_spi(&lines, SpiMode::new(false, false));
    assert_eq!(labels(&events), vec!["B2/5A", "01/FF"]);
    assert_eq!(events[0].data, "MOSI: 0xB2, MISO: 0x5A");
    assert_eq!((events[0].start_time, events[0].end_time), (25, 95));
    assert_eq!((events[1].start_time, events[1].end_time), (105, 175));
}

#[test]
fn avalon_dump() {
    let vcd = load(AVALON);

    // the bit-blasted address is merged back into one bus
    assert!(vcd.signal("avmm_tb.address [0]").is_none());
    let address = vcd.signal("avmm_tb.address[3:0]").unwrap();
    assert_eq!(address.size, 4);
    assert_eq!(address.value_at(25), "0100");
    assert_eq!(bin_to_hex(address.value_at(35)), "9");

    let lines = AvalonLines {
        address: Some(address),
        read: vcd.signal("avmm_tb.read"),
        write: vcd.signal("avmm_tb.write"),
        writedata: vcd.signal("avmm_tb.writedata [7:0]"),
        readdata: vcd.signal("avmm_tb.readdata [7:0]"),
        waitrequest: vcd.signal("avmm_tb.waitrequest"),
        readdatavalid: vcd.signal("avmm_tb.readdatavalid"),
        ..AvalonLines::new(vcd.signal("avmm_tb.clk").unwrap())
    };

    let events = decode_avalon(&lines);
    assert_eq!(labels(&events), vec!["WR 4", "RD REQ 9", "RD DATA 3C"]);
    assert_eq!(events[0].data, "WRITE addr=0x4 data=0xA5");
    let starts = events.iter().map(|event| event.start_time).collect::<Vec<_>>();
    assert_eq!(starts, vec![25, 35, 55]);
    assert_eq!(events[2].end_time, 65);
}

#[test]
fn messy_dump_degrades_gracefully() {
    let vcd = load(MESSY);

    assert_eq!(vcd.metadata.timescale.to_string(), "1ns");
    assert!(vcd.metadata.date.is_none());
    assert_eq!(vcd.metadata.max_time, 12);

    let names = vcd.signals.keys().cloned().collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "orphan",
            "top.count",
            "top.flag",
            "top.mirror.flag",
            "top.state [2:0]"
        ]
    );

    let flag = vcd.signal("top.flag").unwrap();
    assert_eq!(
        flag.history,
        vec![
            (0, "x".to_string()),
            (3, "1".to_string()),
            (7, "0".to_string())
        ]
    );
    assert_eq!(vcd.signal("top.mirror.flag").unwrap().history, flag.history);

    let state = vcd.signal("top.state [2:0]").unwrap();
    assert_eq!(state.value_at(1), "0");
    assert_eq!(state.value_at(3), "101");

    let count = vcd.signal("top.count").unwrap();
    assert!(count.signal_type.is_register_like());
    assert_eq!(bin_to_hex(count.value_at(0)), "Z");
    assert_eq!(bin_to_hex(count.value_at(100)), "7");
}

#[test]
fn decoders_share_a_parsed_dump_across_threads() {
    let vcd = load(SPI);
    let sclk = vcd.signal("spi_tb.sclk").unwrap();
    let mosi = vcd.signal("spi_tb.mosi");

    let modes = [
        SpiMode::new(false, false),
        SpiMode::new(false, true),
        SpiMode::new(true, false),
        SpiMode::new(true, true),
    ];
    let results = std::thread::scope(|scope| {
        let handles = modes
            .iter()
            .map(|mode| {
                let lines = SpiLines {
                    mosi,
                    ..SpiLines::new(sclk)
                };
                scope.spawn(move || decode_spi(&lines, *mode))
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    for (mode, events) in modes.iter().zip(&results) {
        assert_eq!(events, &decode_spi(&SpiLines { mosi, ..SpiLines::new(sclk) }, *mode));
    }
    assert_eq!(labels(&results[0]), vec!["B2/00", "01/00"]);
}
