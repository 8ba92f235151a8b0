use crate::core::models::segment::{MembraneDomains, Segment, Side};
use thiserror::Error;
use tracing::trace;

const TERMINATOR: char = '-';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Invalid numeric token '{token}' at offset {offset} in topology string")]
    InvalidToken { offset: usize, token: String },
}

/// Result of parsing one topology string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTopology {
    pub domains: MembraneDomains,
    /// Characters left in the accumulator when the input ended without a closing marker.
    pub dangling_token: Option<String>,
}

impl ParsedTopology {
    /// True when any segment reaches beyond the declared sequence length.
    pub fn exceeds_length(&self, length: u32) -> bool {
        self.domains.max_end().is_some_and(|end| end > length)
    }
}

/// Which list the next terminator closes a segment into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No side marker seen yet. A terminator in this state closes into the inside list.
    Accumulating,
    ClosingOutside,
    ClosingInside,
}

impl State {
    fn target(self) -> Side {
        match self {
            State::ClosingOutside => Side::Outside,
            State::Accumulating | State::ClosingInside => Side::Inside,
        }
    }

    fn after_marker(side: Side) -> Self {
        match side {
            Side::Outside => State::ClosingOutside,
            Side::Inside => State::ClosingInside,
        }
    }
}

/// Finite-state tokenizer for the ticker-tape topology notation.
///
/// Digits accumulate into a pending token. A side marker (`o`/`i`) turns the token into the
/// start of the next segment and selects the list the following segment belongs to. A
/// terminator (`-`) turns the token into the end of the current segment and emits it. When
/// the input ends right after a marker, the open segment is closed at the sequence length.
#[derive(Debug)]
pub struct TopologyParser {
    state: State,
    token: String,
    token_offset: usize,
    start: u32,
    boundary_open: bool,
    domains: MembraneDomains,
}

impl Default for TopologyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyParser {
    pub fn new() -> Self {
        Self {
            state: State::Accumulating,
            token: String::new(),
            token_offset: 0,
            start: 0,
            boundary_open: false,
            domains: MembraneDomains::default(),
        }
    }

    pub fn parse(topology: &str, length: u32) -> Result<ParsedTopology, TopologyError> {
        let mut parser = Self::new();
        for (offset, ch) in topology.char_indices() {
            parser.feed(offset, ch)?;
        }
        Ok(parser.finish(length))
    }

    fn feed(&mut self, offset: usize, ch: char) -> Result<(), TopologyError> {
        if let Some(side) = Side::from_marker(ch) {
            self.start = self.take_token()?;
            self.state = State::after_marker(side);
            self.boundary_open = true;
            trace!(offset, start = self.start, ?side, "Opened segment.");
        } else if ch == TERMINATOR {
            let end = self.take_token()?;
            let side = self.state.target();
            self.domains.push(side, Segment::new(self.start, end));
            self.boundary_open = false;
            trace!(offset, start = self.start, end, ?side, "Closed segment.");
        } else {
            if self.token.is_empty() {
                self.token_offset = offset;
            }
            self.token.push(ch);
            self.boundary_open = false;
        }
        Ok(())
    }

    fn finish(mut self, length: u32) -> ParsedTopology {
        if self.boundary_open {
            let side = self.state.target();
            self.domains.push(side, Segment::new(self.start, length));
            trace!(
                start = self.start,
                end = length,
                ?side,
                "Closed final segment at sequence length."
            );
        }
        let dangling_token = (!self.token.is_empty()).then_some(self.token);
        ParsedTopology {
            domains: self.domains,
            dangling_token,
        }
    }

    /// Consumes the pending token as an integer. An empty token reads as zero.
    fn take_token(&mut self) -> Result<u32, TopologyError> {
        let token = std::mem::take(&mut self.token);
        if token.is_empty() {
            return Ok(0);
        }
        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TopologyError::InvalidToken {
                offset: self.token_offset,
                token,
            });
        }
        token.parse().map_err(|_| TopologyError::InvalidToken {
            offset: self.token_offset,
            token,
        })
    }
}

/// Parses `topology` into its outside- and inside-membrane segments.
pub fn parse_topology(topology: &str, length: u32) -> Result<ParsedTopology, TopologyError> {
    TopologyParser::parse(topology, length)
}
