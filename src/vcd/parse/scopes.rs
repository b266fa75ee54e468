// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! part of the vcd parser that handles `$scope`, `$upscope` and `$var`
//! and builds up the signal table
use std::collections::HashMap;

use super::super::reader::{Cursor, WordReader};
use super::super::signal::{Signal, SignalType};
use super::super::types::SignalTable;

/// Identifier code to the full names of every signal declared with it.
pub(super) type SignalMap = HashMap<String, Vec<String>>;

/// Scope names currently open. A nameless scope is kept as `None` so
/// that its `$upscope` has something to pop.
#[derive(Debug, Default)]
pub(super) struct ScopePath(Vec<Option<String>>);

impl ScopePath {
    pub(super) fn full_name(&self, name: &str) -> String {
        self.0
            .iter()
            .flatten()
            .map(String::as_str)
            .chain([name])
            .collect::<Vec<&str>>()
            .join(".")
    }
}

pub(super) fn parse_scope(word_reader: &mut WordReader, path: &mut ScopePath, cursor: Cursor) {
    // $scope module reg_mag_i $end
    //        ^^^^^^ ^^^^^^^^^
    let words = word_reader.words_until_end();

    // In some cases there are VCD files which have scopes without names.
    // The nameless scope is transparent, i.e.
    // $scope module a $end
    //   $scope module $end
    //     $scope module b $end
    // will create `a.b`
    let name = match words.as_slice() {
        [_, name, ..] => Some(name.to_string()),
        _ => {
            log::debug!("nameless scope at {cursor:?}");
            None
        }
    };
    path.0.push(name);
}

pub(super) fn parse_upscope(word_reader: &mut WordReader, path: &mut ScopePath, cursor: Cursor) {
    word_reader.words_until_end();
    if path.0.pop().is_none() {
        log::debug!("$upscope without an open scope at {cursor:?}");
    }
}

pub(super) fn parse_var(
    word_reader: &mut WordReader,
    path: &ScopePath,
    signals: &mut SignalTable,
    signal_map: &mut SignalMap,
    cursor: Cursor,
) {
    // $var parameter 3 a IDLE $end
    //      ^^^^^^^^^ ^ ^ ^^^^ - var_type, num_bits, id_code, name
    let words = word_reader.words_until_end();
    let (var_type, num_bits, id_code, name) = match words.as_slice() {
        [var_type, num_bits, id_code, name @ ..] if !name.is_empty() => {
            (*var_type, *num_bits, *id_code, name)
        }
        _ => {
            log::warn!("skipping malformed $var at {cursor:?}: {}", words.join(" "));
            return;
        }
    };

    let num_bits = match num_bits.parse::<usize>() {
        Ok(num_bits) if num_bits > 0 => num_bits,
        _ => {
            log::warn!("skipping $var with bad width `{num_bits}` at {cursor:?}");
            return;
        }
    };

    // names may span several words, e.g. `data [3]`; keep them verbatim
    let full_name = path.full_name(&name.join(" "));

    if signals.contains_key(&full_name) {
        log::warn!("{full_name} declared twice, keeping the first declaration ({cursor:?})");
        return;
    }

    let signal = Signal::new(
        id_code,
        &full_name,
        SignalType::from_keyword(var_type),
        num_bits,
    );
    signals.insert(full_name.clone(), signal);

    // an id code that has been seen before is an alias: the dump carries
    // one set of changes for all of the names that share it
    signal_map
        .entry(id_code.to_string())
        .or_default()
        .push(full_name);
}
