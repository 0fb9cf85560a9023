//! A `getopt_long`-style argument scanner.
//!
//! The scanner walks an argument vector left to right, matching tokens
//! against a short-option spec string and a long-option table. Non-option
//! arguments are permuted behind the options as they are passed over, so
//! once the scan ends every positional argument sits at the tail of the
//! vector, starting at [`Scanner::optind`].
//!
//! All cursor state lives in the scanner value; a fresh scanner starts a
//! fresh scan.

use crate::options::table::{HasArg, LongOption};

/// A token recognized (or rejected) by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    /// A long option; `index` points into the long-option table.
    Long { index: usize, arg: Option<String> },
    /// A short option character.
    Short { code: u8, arg: Option<String> },
    /// An unknown option, a missing mandatory argument, or an argument given
    /// to a flag that takes none. `code` is the short character when known.
    Unrecognized { code: Option<u8>, token: String },
}

/// Scanner over a mutable argument vector. Element 0 is the program name.
pub struct Scanner<'a> {
    args: &'a mut [String],
    short_spec: &'a str,
    long: &'a [LongOption],
    optind: usize,
    /// Byte offset of the next short option inside `args[optind]`; 0 when
    /// not inside a bundle.
    nextchar: usize,
    /// Start of the already-skipped non-option run, which always ends at
    /// `optind`.
    first_nonopt: usize,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(args: &'a mut [String], short_spec: &'a str, long: &'a [LongOption]) -> Self {
        let start = args.len().min(1);
        Scanner {
            args,
            short_spec,
            long,
            optind: start,
            nextchar: 0,
            first_nonopt: start,
            done: false,
        }
    }

    /// Index of the next element to scan; after the scan ends, the index of
    /// the first positional argument.
    pub fn optind(&self) -> usize {
        self.optind
    }

    /// Positional arguments left behind by a finished scan.
    pub fn positionals(&self) -> &[String] {
        &self.args[self.optind.min(self.args.len())..]
    }

    /// Arity declared for a short code in the spec string.
    fn short_arity(&self, code: u8) -> Option<HasArg> {
        if code == b':' {
            return None;
        }
        let spec = self.short_spec.as_bytes();
        let pos = spec.iter().position(|&c| c == code)?;
        Some(match (spec.get(pos + 1), spec.get(pos + 2)) {
            (Some(b':'), Some(b':')) => HasArg::Optional,
            (Some(b':'), _) => HasArg::Required,
            _ => HasArg::No,
        })
    }

    /// Consume `n` elements at `optind`, moving them in front of any
    /// skipped non-options.
    fn advance(&mut self, n: usize) {
        let end = (self.optind + n).min(self.args.len());
        let consumed = end - self.optind;
        self.args[self.first_nonopt..end].rotate_right(consumed);
        self.first_nonopt += consumed;
        self.optind = end;
        self.nextchar = 0;
    }

    fn finish(&mut self) -> Option<Match> {
        self.done = true;
        self.optind = self.first_nonopt;
        None
    }

    fn next_short(&mut self) -> Match {
        let token = self.args[self.optind].clone();
        let rest = &token[self.nextchar..];
        let ch = rest.chars().next().unwrap_or_default();
        self.nextchar += ch.len_utf8();
        let at_end = self.nextchar >= token.len();

        let code = ch.is_ascii().then_some(ch as u8);
        tracing::trace!("short option `{}` in `{}`", ch, token);

        let Some((code, arity)) = code.and_then(|c| Some((c, self.short_arity(c)?))) else {
            if at_end {
                self.advance(1);
            }
            return Match::Unrecognized { code, token };
        };

        match arity {
            HasArg::No => {
                if at_end {
                    self.advance(1);
                }
                Match::Short { code, arg: None }
            }
            HasArg::Optional => {
                let arg = (!at_end).then(|| token[self.nextchar..].to_string());
                self.advance(1);
                Match::Short { code, arg }
            }
            HasArg::Required => {
                if !at_end {
                    let arg = token[self.nextchar..].to_string();
                    self.advance(1);
                    Match::Short {
                        code,
                        arg: Some(arg),
                    }
                } else if self.optind + 1 < self.args.len() {
                    let arg = self.args[self.optind + 1].clone();
                    self.advance(2);
                    Match::Short {
                        code,
                        arg: Some(arg),
                    }
                } else {
                    self.advance(1);
                    Match::Unrecognized {
                        code: Some(code),
                        token,
                    }
                }
            }
        }
    }

    fn next_long(&mut self) -> Match {
        let token = self.args[self.optind].clone();
        let body = &token[2..];
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let Some(index) = self.lookup_long(name) else {
            tracing::trace!("no long option matches `{}`", token);
            self.advance(1);
            return Match::Unrecognized { code: None, token };
        };

        match (self.long[index].has_arg, inline) {
            (HasArg::No, Some(_)) => {
                self.advance(1);
                Match::Unrecognized { code: None, token }
            }
            (HasArg::No, None) => {
                self.advance(1);
                Match::Long { index, arg: None }
            }
            (_, Some(value)) => {
                let arg = value.to_string();
                self.advance(1);
                Match::Long {
                    index,
                    arg: Some(arg),
                }
            }
            (HasArg::Optional, None) => {
                self.advance(1);
                Match::Long { index, arg: None }
            }
            (HasArg::Required, None) => {
                if self.optind + 1 < self.args.len() {
                    let arg = self.args[self.optind + 1].clone();
                    self.advance(2);
                    Match::Long {
                        index,
                        arg: Some(arg),
                    }
                } else {
                    self.advance(1);
                    Match::Unrecognized { code: None, token }
                }
            }
        }
    }

    /// Exact match first, then an unambiguous prefix.
    ///
    /// A prefix is ambiguous only when it matches entries of different items,
    /// so `--full` still resolves when `fullscreen` is the only candidate.
    fn lookup_long(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        let entries = self.long.iter().take_while(|o| !o.is_sentinel());

        if let Some(index) = entries.clone().position(|o| o.name == name) {
            return Some(index);
        }

        let mut found: Option<usize> = None;
        for (index, entry) in entries.enumerate() {
            if !entry.name.starts_with(name) {
                continue;
            }
            match found {
                None => found = Some(index),
                Some(first)
                    if self.long[first].item != entry.item
                        || self.long[first].form != entry.form =>
                {
                    return None;
                }
                Some(_) => {}
            }
        }
        found
    }
}

impl Iterator for Scanner<'_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        if self.done {
            return None;
        }

        if self.nextchar > 0 {
            return Some(self.next_short());
        }

        while self.optind < self.args.len() && is_nonoption(&self.args[self.optind]) {
            self.optind += 1;
        }

        if self.optind >= self.args.len() {
            return self.finish();
        }

        if self.args[self.optind] == "--" {
            self.advance(1);
            return self.finish();
        }

        if self.args[self.optind].starts_with("--") {
            return Some(self.next_long());
        }

        self.nextchar = 1;
        Some(self.next_short())
    }
}

fn is_nonoption(arg: &str) -> bool {
    arg == "-" || !arg.starts_with('-')
}
