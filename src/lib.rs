// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

mod vcd;
pub use vcd::parse::{load_vcd, parse_vcd};
pub use vcd::signal::{value_at, Signal, SignalType, TimeStamp, ValueChange};
pub use vcd::types::{Metadata, SignalTable, Timescale, TimescaleUnit, Version, VCD};
pub use vcd::utilities::bin_to_hex;
pub use vcd::vectors::reconstruct_vectors;

pub mod decode;
pub use decode::avalon::{decode_avalon, AvalonLines};
pub use decode::spi::{decode_spi, SpiLines, SpiMode};
pub use decode::uart::decode_uart;
pub use decode::{DecodedEvent, Edge};
