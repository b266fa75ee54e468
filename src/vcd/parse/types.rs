// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
#[derive(Debug)]
pub(crate) struct ParseResult<'a> {
    pub(crate) matched: &'a str,
    pub(crate) residual: &'a str,
}
