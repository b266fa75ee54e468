// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::collections::VecDeque;
use std::str::Lines;

#[derive(Debug, Clone, Copy)]
pub(super) struct Line(pub(super) usize);
#[derive(Debug, Clone, Copy)]
pub(super) struct Word(pub(super) usize);
#[derive(Debug, Clone, Copy)]
pub(super) struct Cursor(pub(super) Line, pub(super) Word);

/// Hands out the whitespace separated words of an in-memory dump, along
/// with the line and word position each one was found at.
pub(super) struct WordReader<'a> {
    lines: Lines<'a>,
    eof: bool,
    curr_line: usize,
    str_slices: VecDeque<(&'a str, Cursor)>,
    curr_slice: Option<(&'a str, Cursor)>,
}

impl<'a> WordReader<'a> {
    /// `first_line` is the line number (1 based) that `text` starts on
    /// within the original dump.
    pub(super) fn new(text: &'a str, first_line: usize) -> WordReader<'a> {
        WordReader {
            lines: text.lines(),
            eof: false,
            curr_line: first_line.saturating_sub(1),
            str_slices: VecDeque::new(),
            curr_slice: None,
        }
    }

    /// Pulls up to ten more lines into the word buffer. Returns `false`
    /// once the buffer is empty and there is nothing left to read.
    fn refill(&mut self) -> bool {
        while self.str_slices.is_empty() {
            if self.eof {
                return false;
            }

            let num_buffers = 10;

            for _ in 0..num_buffers {
                let line = match self.lines.next() {
                    Some(line) => line,
                    None => {
                        self.eof = true;
                        break;
                    }
                };
                self.curr_line += 1;

                for (word_idx, word) in line.split_ascii_whitespace().enumerate() {
                    let position = Cursor(Line(self.curr_line), Word(word_idx + 1));
                    self.str_slices.push_back((word, position))
                }
            }
        }
        true
    }

    pub(super) fn next_word(&mut self) -> Option<(&'a str, Cursor)> {
        if !self.refill() {
            return None;
        }
        let slice = self.str_slices.pop_front()?;
        self.curr_slice = Some(slice);
        Some(slice)
    }

    /// Returns every remaining word of the next non-blank line, with the
    /// position of its first word. Words already handed out by
    /// `next_word` are not repeated.
    pub(super) fn next_line(&mut self) -> Option<(Vec<&'a str>, Cursor)> {
        let (first, cursor) = self.next_word()?;
        let Cursor(Line(line), _) = cursor;
        let mut words = vec![first];

        // a line is always buffered whole, so its words are contiguous
        while let Some(&(word, position)) = self.str_slices.front() {
            let Cursor(Line(word_line), _) = position;
            if word_line != line {
                break;
            }
            self.str_slices.pop_front();
            self.curr_slice = Some((word, position));
            words.push(word);
        }

        Some((words, cursor))
    }

    pub(super) fn curr_word(&self) -> Option<(&'a str, Cursor)> {
        self.curr_slice
    }

    /// Advances past the next `$end`, returning the words seen before it.
    pub(super) fn words_until_end(&mut self) -> Vec<&'a str> {
        let mut words = vec![];
        while let Some((word, _)) = self.next_word() {
            if word == "$end" {
                break;
            }
            words.push(word);
        }
        words
    }
}
