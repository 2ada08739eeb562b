//! Bit-packed binary form
//!
//! Layout, most significant bit first:
//!
//! | Value            | Bits                                   |
//! |------------------|----------------------------------------|
//! | id leaf          | `0` then the ownership bit             |
//! | id node          | `1` then left id, right id             |
//! | event leaf `n`   | `0` then `uint(n)`                     |
//! | event node       | `1` then `uint(base)`, left, right     |
//! | stamp            | id then event                          |
//!
//! `uint` is a variable-width integer starting at width 2: a `0` prefix is
//! followed by the value in the current width; a `1` prefix subtracts
//! `2^width` from the value and retries with the width grown by one. Small
//! counters therefore cost three bits.
//!
//! The final byte is padded with zero bits. Decoders reject non-zero padding
//! and any whole unused byte.

use std::sync::Arc;

use crate::config::DecodeLimits;
use crate::errors::{ItcError, Result};
use crate::event::Event;
use crate::id::Id;
use crate::stamp::Stamp;

const INITIAL_UINT_WIDTH: u32 = 2;

/// Encode an id
pub fn encode_id(id: &Id) -> Vec<u8> {
    let mut writer = BitWriter::default();
    writer.id(id);
    writer.finish()
}

/// Encode an event tree
pub fn encode_event(event: &Event) -> Vec<u8> {
    let mut writer = BitWriter::default();
    writer.event(event);
    writer.finish()
}

/// Encode a stamp
pub fn encode_stamp(stamp: &Stamp) -> Vec<u8> {
    let mut writer = BitWriter::default();
    writer.id(stamp.id());
    writer.event(stamp.event_tree());
    writer.finish()
}

/// Decode an id
pub fn decode_id(bytes: &[u8], limits: &DecodeLimits) -> Result<Id> {
    let mut reader = BitReader::new(bytes, limits)?;
    let id = reader.id()?;
    reader.finish()?;
    Ok(id)
}

/// Decode an event tree
pub fn decode_event(bytes: &[u8], limits: &DecodeLimits) -> Result<Event> {
    let mut reader = BitReader::new(bytes, limits)?;
    let event = reader.event()?;
    reader.finish()?;
    check_counter_range(&event)?;
    Ok(event)
}

/// Decode a stamp
pub fn decode_stamp(bytes: &[u8], limits: &DecodeLimits) -> Result<Stamp> {
    let mut reader = BitReader::new(bytes, limits)?;
    let id = reader.id()?;
    let event = reader.event()?;
    reader.finish()?;
    check_counter_range(&event)?;
    Ok(Stamp::new(id, event))
}

fn check_counter_range(event: &Event) -> Result<()> {
    match event.checked_max() {
        Some(_) => Ok(()),
        None => Err(ItcError::decode("event counter overflows u64")),
    }
}

impl Stamp {
    /// Binary form of this stamp
    pub fn to_binary(&self) -> Vec<u8> {
        encode_stamp(self)
    }

    /// Decode a stamp from its binary form using default limits
    pub fn from_binary(bytes: &[u8]) -> Result<Stamp> {
        decode_stamp(bytes, &DecodeLimits::default()).map_err(|e| {
            tracing::debug!(error = %e, len = bytes.len(), "failed to decode binary stamp");
            e
        })
    }
}

#[derive(Default)]
struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    fn bit(&mut self, bit: bool) {
        let offset = self.bit_len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.bit_len += 1;
    }

    fn bits(&mut self, value: u64, width: u32) {
        for shift in (0..width).rev() {
            self.bit((value >> shift) & 1 == 1);
        }
    }

    fn uint(&mut self, mut value: u64) {
        let mut width = INITIAL_UINT_WIDTH;
        loop {
            if width == u64::BITS || value < (1u64 << width) {
                self.bit(false);
                self.bits(value, width);
                return;
            }
            self.bit(true);
            value -= 1u64 << width;
            width += 1;
        }
    }

    fn id(&mut self, id: &Id) {
        match id {
            Id::Zero => {
                self.bit(false);
                self.bit(false);
            }
            Id::One => {
                self.bit(false);
                self.bit(true);
            }
            Id::Node(l, r) => {
                self.bit(true);
                self.id(l);
                self.id(r);
            }
        }
    }

    fn event(&mut self, event: &Event) {
        match event {
            Event::Leaf(n) => {
                self.bit(false);
                self.uint(*n);
            }
            Event::Node(n, l, r) => {
                self.bit(true);
                self.uint(*n);
                self.event(l);
                self.event(r);
            }
        }
    }

    fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    limits: &'a DecodeLimits,
}

impl<'a> BitReader<'a> {
    fn new(bytes: &'a [u8], limits: &'a DecodeLimits) -> Result<Self> {
        limits.check_len(bytes.len())?;
        Ok(Self {
            bytes,
            pos: 0,
            depth: 0,
            limits,
        })
    }

    fn bit(&mut self) -> Result<bool> {
        let byte = self
            .bytes
            .get(self.pos / 8)
            .ok_or_else(|| ItcError::decode(format!("unexpected end of input at bit {}", self.pos)))?;
        let bit = byte & (0x80 >> (self.pos % 8)) != 0;
        self.pos += 1;
        Ok(bit)
    }

    fn bits(&mut self, width: u32) -> Result<u64> {
        let mut value = 0u64;
        for _ in 0..width {
            value = (value << 1) | u64::from(self.bit()?);
        }
        Ok(value)
    }

    fn uint(&mut self) -> Result<u64> {
        let mut width = INITIAL_UINT_WIDTH;
        let mut offset = 0u64;
        while self.bit()? {
            if width == u64::BITS {
                return Err(ItcError::decode("integer prefix longer than 64 bits"));
            }
            offset = offset
                .checked_add(1u64 << width)
                .ok_or_else(|| ItcError::decode("integer overflows u64"))?;
            width += 1;
        }
        offset
            .checked_add(self.bits(width)?)
            .ok_or_else(|| ItcError::decode("integer overflows u64"))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        self.limits.check_depth(self.depth)
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn id(&mut self) -> Result<Id> {
        if !self.bit()? {
            return Ok(if self.bit()? { Id::One } else { Id::Zero });
        }
        self.enter()?;
        let left = self.id()?;
        let right = self.id()?;
        self.leave();
        Ok(Id::Node(Arc::new(left), Arc::new(right)))
    }

    fn event(&mut self) -> Result<Event> {
        if !self.bit()? {
            return Ok(Event::Leaf(self.uint()?));
        }
        self.enter()?;
        let base = self.uint()?;
        let left = self.event()?;
        let right = self.event()?;
        self.leave();
        Ok(Event::Node(base, Arc::new(left), Arc::new(right)))
    }

    fn finish(mut self) -> Result<()> {
        let total = self.bytes.len() * 8;
        if total - self.pos >= 8 {
            return Err(ItcError::decode(format!(
                "{} unused trailing bytes",
                (total - self.pos) / 8
            )));
        }
        while self.pos < total {
            if self.bit()? {
                return Err(ItcError::decode("non-zero padding bits"));
            }
        }
        Ok(())
    }
}
