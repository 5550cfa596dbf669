//! In-memory register file standing in for a chip, for tests and dry runs.

use crate::RegisterBus;
use std::io;

#[derive(Debug, Clone)]
pub struct RegisterMap {
    registers: [u8; 256],
    writes: Vec<(u8, u8)>,
    faulty: bool,
}

impl Default for RegisterMap {
    fn default() -> Self {
        RegisterMap {
            registers: [0; 256],
            writes: Vec::new(),
            faulty: false,
        }
    }
}

impl RegisterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RegisterMap::set_registers`].
    pub fn with_registers(mut self, start: u8, data: &[u8]) -> Self {
        self.set_registers(start, data);
        self
    }

    pub fn set_registers(&mut self, start: u8, data: &[u8]) {
        let start = start as usize;
        self.registers[start..start + data.len()].copy_from_slice(data);
    }

    pub fn register(&self, register: u8) -> u8 {
        self.registers[register as usize]
    }

    /// Every write seen so far, in order.
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }

    /// When set, every access fails as if the chip stopped acknowledging.
    pub fn set_faulty(&mut self, faulty: bool) {
        self.faulty = faulty;
    }

    fn check(&self) -> io::Result<()> {
        if self.faulty {
            return Err(io::Error::new(io::ErrorKind::Other, "no acknowledge from device"));
        }
        Ok(())
    }
}

impl RegisterBus for RegisterMap {
    type Error = io::Error;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        self.check()?;
        Ok(self.registers[register as usize])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.check()?;
        self.registers[register as usize] = value;
        self.writes.push((register, value));
        Ok(())
    }
}
