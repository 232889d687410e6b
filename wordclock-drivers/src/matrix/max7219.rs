//! MAX7219 LED matrix driver
//!
//! Drives a single 8x8 matrix through the MAX7219 serial interface. Every
//! register write is one 16-bit frame (`[register, data]`) in its own SPI
//! transaction, so chip select latches it.

use embedded_hal::spi::SpiDevice;
use wordclock_core::traits::FrameSink;
use wordclock_core::PixelBuffer;

use super::Wiring;

/// MAX7219 registers
#[allow(dead_code)]
mod reg {
    pub const NOOP: u8 = 0x00;
    pub const DIGIT0: u8 = 0x01;
    pub const DECODE_MODE: u8 = 0x09;
    pub const INTENSITY: u8 = 0x0A;
    pub const SCAN_LIMIT: u8 = 0x0B;
    pub const SHUTDOWN: u8 = 0x0C;
    pub const DISPLAY_TEST: u8 = 0x0F;
}

/// Brightest setting of the intensity register
pub const MAX_INTENSITY: u8 = 0x0F;

/// MAX7219 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Max7219Error<E> {
    /// SPI transfer failed
    Spi(E),
}

/// MAX7219 driver
pub struct Max7219<SPI: SpiDevice> {
    spi: SPI,
    wiring: Wiring,
    failed_writes: u32,
    last_error: Option<Max7219Error<SPI::Error>>,
}

impl<SPI: SpiDevice> Max7219<SPI> {
    /// Create a new driver; call [`init`](Self::init) before showing frames
    pub fn new(spi: SPI, wiring: Wiring) -> Self {
        Self {
            spi,
            wiring,
            failed_writes: 0,
            last_error: None,
        }
    }

    /// Configure the chip for raw 8x8 matrix output
    pub fn init(&mut self) -> Result<(), Max7219Error<SPI::Error>> {
        let init_cmds: &[(u8, u8)] = &[
            (reg::SCAN_LIMIT, 7), // all 8 rows
            (reg::DECODE_MODE, 0x00),
            (reg::INTENSITY, MAX_INTENSITY),
            (reg::SHUTDOWN, 0x01), // normal operation
            (reg::DISPLAY_TEST, 0x00),
        ];

        for &(register, data) in init_cmds {
            self.write_register(register, data)?;
        }
        Ok(())
    }

    /// Set brightness, 0-15
    pub fn set_intensity(&mut self, level: u8) -> Result<(), Max7219Error<SPI::Error>> {
        self.write_register(reg::INTENSITY, level.min(MAX_INTENSITY))
    }

    /// Send eight row bytes as they are, row 0 to digit 0
    pub fn write_rows(&mut self, rows: &[u8; 8]) -> Result<(), Max7219Error<SPI::Error>> {
        for (i, &row) in rows.iter().enumerate() {
            self.write_register(reg::DIGIT0 + i as u8, row)?;
        }
        Ok(())
    }

    /// Number of frames that failed to send
    pub fn failed_writes(&self) -> u32 {
        self.failed_writes
    }

    /// Most recent error, if any
    pub fn last_error(&self) -> Option<&Max7219Error<SPI::Error>> {
        self.last_error.as_ref()
    }

    /// Release the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }

    fn write_register(&mut self, register: u8, data: u8) -> Result<(), Max7219Error<SPI::Error>> {
        self.spi
            .write(&[register, data])
            .map_err(Max7219Error::Spi)
    }
}

impl<SPI: SpiDevice> FrameSink for Max7219<SPI> {
    fn show(&mut self, frame: &PixelBuffer) {
        let rows = self.wiring.apply(frame.rows());
        if let Err(e) = self.write_rows(&rows) {
            self.failed_writes = self.failed_writes.saturating_add(1);
            self.last_error = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use embedded_hal::spi::{ErrorKind, ErrorType, Operation};
    use std::vec::Vec;

    /// SPI device recording each transaction's written bytes
    #[derive(Default)]
    struct RecordingSpi {
        writes: Vec<Vec<u8>>,
        fail: bool,
    }

    impl ErrorType for RecordingSpi {
        type Error = ErrorKind;
    }

    impl SpiDevice for RecordingSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), ErrorKind> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(data) = op {
                    self.writes.push(data.to_vec());
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_init_sequence() {
        let mut matrix = Max7219::new(RecordingSpi::default(), Wiring::default());
        matrix.init().unwrap();

        let spi = matrix.release();
        assert_eq!(
            spi.writes,
            [
                [0x0B, 7],
                [0x09, 0],
                [0x0A, 15],
                [0x0C, 1],
                [0x0F, 0],
            ]
        );
    }

    #[test]
    fn test_show_writes_digit_registers() {
        let mut matrix = Max7219::new(RecordingSpi::default(), Wiring::default());
        matrix.show(&PixelBuffer::from_rows([1, 2, 3, 4, 5, 6, 7, 8]));

        let spi = matrix.release();
        assert_eq!(spi.writes.len(), 8);
        for (i, write) in spi.writes.iter().enumerate() {
            assert_eq!(write.as_slice(), &[i as u8 + 1, i as u8 + 1]);
        }
    }

    #[test]
    fn test_show_applies_wiring() {
        let wiring = Wiring {
            reverse_bits: true,
            reverse_rows: true,
        };
        let mut matrix = Max7219::new(RecordingSpi::default(), wiring);
        matrix.show(&PixelBuffer::from_rows([0x01, 0, 0, 0, 0, 0, 0, 0x0F]));

        let spi = matrix.release();
        assert_eq!(spi.writes[0].as_slice(), &[0x01, 0xF0]);
        assert_eq!(spi.writes[7].as_slice(), &[0x08, 0x80]);
    }

    #[test]
    fn test_show_counts_failures() {
        let spi = RecordingSpi {
            fail: true,
            ..Default::default()
        };
        let mut matrix = Max7219::new(spi, Wiring::default());
        assert!(matrix.last_error().is_none());

        matrix.show(&PixelBuffer::full());
        matrix.show(&PixelBuffer::full());

        assert_eq!(matrix.failed_writes(), 2);
        assert_eq!(matrix.last_error(), Some(&Max7219Error::Spi(ErrorKind::Other)));
    }

    #[test]
    fn test_intensity_clamped() {
        let mut matrix = Max7219::new(RecordingSpi::default(), Wiring::default());
        matrix.set_intensity(40).unwrap();
        assert_eq!(matrix.release().writes, [[0x0A, 15]]);
    }
}
