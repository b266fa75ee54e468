// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use num::{BigUint, Zero};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum BinaryParserErrTypes {
    /// First character that isn't a `0` or `1`.
    NotBinary(char),
    Empty,
}

// We build a quick and not so dirty bit string parser. Bit strings may be
// wider than any native integer so we accumulate into a BigUint.
pub(crate) fn binary_str_to_biguint(binary_str: &str) -> Result<BigUint, BinaryParserErrTypes> {
    if binary_str.is_empty() {
        return Err(BinaryParserErrTypes::Empty);
    }

    let mut val = BigUint::zero();
    for chr in binary_str.bytes() {
        let bit = match chr {
            b'1' => 1u8,
            b'0' => 0u8,
            _ => return Err(BinaryParserErrTypes::NotBinary(chr as char)),
        };
        val <<= 1usize;
        val += bit;
    }

    Ok(val)
}

/// Renders a bit string as uppercase hexadecimal.
///
/// A string holding anything other than `0` and `1` can't be rendered as a
/// number. If every character is the same (an all `x` or all `z` bus) that
/// character is returned uppercased, otherwise the result is `X`. The empty
/// string also renders as `X`.
pub fn bin_to_hex(binary_str: &str) -> String {
    match binary_str_to_biguint(binary_str) {
        Ok(val) => val.to_str_radix(16).to_uppercase(),
        Err(BinaryParserErrTypes::Empty) => "X".to_string(),
        Err(BinaryParserErrTypes::NotBinary(chr)) if binary_str.chars().all(|c| c == chr) => {
            chr.to_uppercase().collect()
        }
        Err(BinaryParserErrTypes::NotBinary(_)) => "X".to_string(),
    }
}
