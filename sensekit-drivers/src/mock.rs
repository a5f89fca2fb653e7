//! Scripted bus for driver tests
//!
//! Records every primitive call and answers reads from a queue of bytes.

use std::collections::VecDeque;
use std::vec::Vec;

use sensekit_hal::BusDevice;

/// One primitive call as seen on the bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    WriteByte(u8),
    Write(Vec<u8>),
    ReadByte,
    Read(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

#[derive(Debug, Default)]
pub struct MockBus {
    /// Successful operations, in order
    pub ops: Vec<Op>,
    responses: VecDeque<u8>,
    /// Index of the operation that should fail
    fail_at: Option<usize>,
    calls: usize,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(bytes: &[u8]) -> Self {
        let mut bus = Self::new();
        bus.respond(bytes);
        bus
    }

    /// Queue bytes for upcoming reads
    pub fn respond(&mut self, bytes: &[u8]) {
        self.responses.extend(bytes.iter().copied());
    }

    /// Make the `n`th primitive call (0-based, counted from now) fail
    pub fn fail_at(&mut self, n: usize) {
        self.fail_at = Some(self.calls + n);
    }

    fn step(&mut self, op: Op) -> Result<(), MockError> {
        let index = self.calls;
        self.calls += 1;
        if self.fail_at == Some(index) {
            return Err(MockError);
        }
        self.ops.push(op);
        Ok(())
    }

    fn next(&mut self) -> Result<u8, MockError> {
        self.responses.pop_front().ok_or(MockError)
    }
}

impl BusDevice for MockBus {
    type Error = MockError;

    fn write_byte(&mut self, value: u8) -> Result<(), MockError> {
        self.step(Op::WriteByte(value))
    }

    fn write(&mut self, data: &[u8]) -> Result<(), MockError> {
        self.step(Op::Write(data.to_vec()))
    }

    fn read_byte(&mut self) -> Result<u8, MockError> {
        self.step(Op::ReadByte)?;
        self.next()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), MockError> {
        self.step(Op::Read(buf.len()))?;
        for b in buf.iter_mut() {
            *b = self.next()?;
        }
        Ok(())
    }
}
