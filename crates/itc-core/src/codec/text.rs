//! Text form: `Display` and a recursive-descent parser.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::DecodeLimits;
use crate::errors::{ItcError, Result};
use crate::event::Event;
use crate::id::Id;
use crate::stamp::Stamp;

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str("0"),
            Self::One => f.write_str("1"),
            Self::Node(l, r) => write!(f, "({l},{r})"),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(n) => write!(f, "{n}"),
            Self::Node(n, l, r) => write!(f, "({n},{l},{r})"),
        }
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.id(), self.event_tree())
    }
}

/// Parse an id
pub fn parse_id(text: &str, limits: &DecodeLimits) -> Result<Id> {
    let mut parser = Parser::new(text, limits)?;
    let id = parser.id()?;
    parser.finish()?;
    Ok(id)
}

/// Parse an event tree
pub fn parse_event(text: &str, limits: &DecodeLimits) -> Result<Event> {
    let mut parser = Parser::new(text, limits)?;
    let event = parser.event()?;
    parser.finish()?;
    check_counter_range(&event, text.len())?;
    Ok(event)
}

/// Parse a stamp
pub fn parse_stamp(text: &str, limits: &DecodeLimits) -> Result<Stamp> {
    let mut parser = Parser::new(text, limits)?;
    parser.expect(b'(')?;
    let id = parser.id()?;
    parser.expect(b',')?;
    let event = parser.event()?;
    parser.expect(b')')?;
    parser.finish()?;
    check_counter_range(&event, text.len())?;
    Ok(Stamp::new(id, event))
}

fn check_counter_range(event: &Event, position: usize) -> Result<()> {
    match event.checked_max() {
        Some(_) => Ok(()),
        None => Err(ItcError::parse(position, "event counter overflows u64")),
    }
}

impl FromStr for Id {
    type Err = ItcError;

    fn from_str(s: &str) -> Result<Self> {
        parse_id(s, &DecodeLimits::default())
    }
}

impl FromStr for Event {
    type Err = ItcError;

    fn from_str(s: &str) -> Result<Self> {
        parse_event(s, &DecodeLimits::default())
    }
}

impl FromStr for Stamp {
    type Err = ItcError;

    fn from_str(s: &str) -> Result<Self> {
        parse_stamp(s, &DecodeLimits::default())
    }
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
    limits: &'a DecodeLimits,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, limits: &'a DecodeLimits) -> Result<Self> {
        limits.check_len(text.len())?;
        Ok(Self {
            input: text.as_bytes(),
            pos: 0,
            depth: 0,
            limits,
        })
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn describe(&self) -> String {
        match self.peek() {
            Some(b) => format!("'{}'", b as char),
            None => "end of input".to_string(),
        }
    }

    fn expect(&mut self, want: u8) -> Result<()> {
        if self.peek() == Some(want) {
            self.pos += 1;
            Ok(())
        } else {
            Err(ItcError::parse(
                self.pos,
                format!("expected '{}', found {}", want as char, self.describe()),
            ))
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        self.limits.check_depth(self.depth)
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn finish(&self) -> Result<()> {
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(ItcError::parse(
                self.pos,
                format!("unexpected trailing input {}", self.describe()),
            ))
        }
    }

    fn number(&mut self) -> Result<u64> {
        let start = self.pos;
        let mut value: u64 = 0;
        while let Some(b @ b'0'..=b'9') = self.peek() {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(b - b'0')))
                .ok_or_else(|| ItcError::parse(start, "event counter overflows u64"))?;
            self.pos += 1;
        }
        if self.pos == start {
            return Err(ItcError::parse(
                start,
                format!("expected a number, found {}", self.describe()),
            ));
        }
        Ok(value)
    }

    fn id(&mut self) -> Result<Id> {
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(Id::Zero)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(Id::One)
            }
            Some(b'(') => {
                self.enter()?;
                self.pos += 1;
                let left = self.id()?;
                self.expect(b',')?;
                let right = self.id()?;
                self.expect(b')')?;
                self.leave();
                Ok(Id::Node(Arc::new(left), Arc::new(right)))
            }
            _ => Err(ItcError::parse(
                self.pos,
                format!("expected id '0', '1' or '(', found {}", self.describe()),
            )),
        }
    }

    fn event(&mut self) -> Result<Event> {
        match self.peek() {
            Some(b'0'..=b'9') => Ok(Event::Leaf(self.number()?)),
            Some(b'(') => {
                self.enter()?;
                self.pos += 1;
                let base = self.number()?;
                self.expect(b',')?;
                let left = self.event()?;
                self.expect(b',')?;
                let right = self.event()?;
                self.expect(b')')?;
                self.leave();
                Ok(Event::Node(base, Arc::new(left), Arc::new(right)))
            }
            _ => Err(ItcError::parse(
                self.pos,
                format!("expected event number or '(', found {}", self.describe()),
            )),
        }
    }
}
