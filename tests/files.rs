// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

pub const FILES: [&str; 4] = [
    "./tests/vcd-files/avalon.vcd",
    "./tests/vcd-files/messy.vcd",
    "./tests/vcd-files/spi.vcd",
    "./tests/vcd-files/uart.vcd",
];

pub const AVALON: &str = "./tests/vcd-files/avalon.vcd";
pub const MESSY: &str = "./tests/vcd-files/messy.vcd";
pub const SPI: &str = "./tests/vcd-files/spi.vcd";
pub const UART: &str = "./tests/vcd-files/uart.vcd";
