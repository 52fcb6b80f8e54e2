//! Line-oriented front end for a [`ChoiceSession`].
//!
//! A line read while no target is active is a skeleton (space-separated
//! tokens). Blank lines are skipped there, so the empty skeleton cannot be
//! entered interactively; `cynghanedd search --tokens ""` covers it. While
//! words are on offer a line is one of: a word from the offer, the
//! backtrack token, or an empty line to abandon the target.

use std::io::{BufRead, Write};

use anyhow::Result;
use cynghanedd_core::{ChoiceSession, Config, Error, SessionState, Skeleton, SkeletonIndex};
use tracing::debug;

use crate::dictionary::normalize_word;

pub struct Repl<'a, R, W> {
    session: ChoiceSession<'a>,
    config: &'a Config,
    input: R,
    output: W,
    prompts: bool,
}

impl<'a, R: BufRead, W: Write> Repl<'a, R, W> {
    pub fn new(index: &'a SkeletonIndex, config: &'a Config, input: R, output: W) -> Self {
        Self {
            session: ChoiceSession::new(index),
            config,
            input,
            output,
            prompts: false,
        }
    }

    /// Print `skeleton> ` / `word> ` before each read.
    pub fn with_prompts(mut self, prompts: bool) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn session(&self) -> &ChoiceSession<'a> {
        &self.session
    }

    /// Read lines until end of input.
    pub fn run(&mut self) -> Result<()> {
        let mut line = String::new();
        loop {
            self.prompt()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            self.handle(line.trim_end_matches(['\n', '\r']))?;
        }
        if self.prompts {
            writeln!(self.output)?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Apply one input line to the session and print the outcome.
    pub fn handle(&mut self, line: &str) -> Result<()> {
        match self.session.state() {
            SessionState::OfferingChoice => self.handle_choice(line),
            _ => {
                if line.trim().is_empty() {
                    return Ok(());
                }
                let target = Skeleton::new(line.split_whitespace());
                self.session.start(target);
                self.report()
            }
        }
    }

    fn handle_choice(&mut self, line: &str) -> Result<()> {
        if line.trim().is_empty() {
            debug!(skeleton = %self.session.target(), "target abandoned");
            self.session.restart();
            writeln!(self.output, "abandoned")?;
            return Ok(());
        }
        if self.config.is_backtrack(line) {
            self.session.backtrack(1)?;
            return self.report();
        }
        match self.session.choose(&normalize_word(line)) {
            Ok(_) => {}
            Err(err @ Error::InvalidChoice { .. }) => writeln!(self.output, "{err}")?,
            Err(err) => return Err(err.into()),
        }
        self.report()
    }

    fn report(&mut self) -> Result<()> {
        match self.session.state() {
            SessionState::AwaitingSkeleton => {}
            SessionState::OfferingChoice => {
                writeln!(self.output, "{}", self.session.offer_next_words().join(" "))?;
            }
            SessionState::NoSolutions => {
                writeln!(self.output, "no solutions")?;
                self.session.restart();
            }
            SessionState::Complete => {
                writeln!(self.output, "{}", self.session.sentence())?;
                self.session.restart();
            }
        }
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        if !self.prompts {
            return Ok(());
        }
        let text = match self.session.state() {
            SessionState::OfferingChoice => "word> ",
            _ => "skeleton> ",
        };
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }
}
