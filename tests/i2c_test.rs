use embedded_hal::blocking::i2c;

use at24::adapters::i2c::{DeviceSelect, Error, I2cTransport16, I2cTransport8};
use at24::{BusTransport, DeviceConfig, Eeprom, Variant, MAX_PAGE_SIZE};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Write(u8, Vec<u8>),
    WriteRead(u8, Vec<u8>, usize),
}

/// Fake bus: logs transactions, fills reads with `0xa5` and stays busy
/// for `busy_polls` zero-length writes after each data write.
#[derive(Debug, Default)]
struct FakeBus {
    ops: Vec<Op>,
    busy_polls: usize,
    busy: usize,
}

impl FakeBus {
    fn busy_for(busy_polls: usize) -> Self {
        Self {
            busy_polls,
            ..Self::default()
        }
    }

    fn data_ops(&self) -> Vec<Op> {
        self.ops
            .iter()
            .filter(|op| !matches!(op, Op::Write(_, data) if data.is_empty()))
            .cloned()
            .collect()
    }

    fn polls(&self) -> usize {
        self.ops.len() - self.data_ops().len()
    }
}

impl i2c::Write for FakeBus {
    type Error = ();

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.ops.push(Op::Write(address, bytes.to_vec()));
        if bytes.is_empty() {
            if self.busy > 0 {
                self.busy -= 1;
                return Err(());
            }
        } else {
            self.busy = self.busy_polls;
        }
        Ok(())
    }
}

impl i2c::WriteRead for FakeBus {
    type Error = ();

    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.ops.push(Op::WriteRead(address, bytes.to_vec(), buffer.len()));
        buffer.iter_mut().for_each(|byte| *byte = 0xa5);
        Ok(())
    }
}

#[test]
fn test_two_byte_address_write() {
    let mut transport = I2cTransport16::new(FakeBus::default());
    transport.write_memory(0x50, 0x0123, b"abc").unwrap();

    let bus = transport.release();
    assert_eq!(
        bus.data_ops(),
        vec![Op::Write(0x50, vec![0x01, 0x23, b'a', b'b', b'c'])]
    );
    assert_eq!(bus.polls(), 1);
}

#[test]
fn test_one_byte_address_write() {
    let mut transport = I2cTransport8::new(FakeBus::default()).with_ack_polling(0);
    transport.write_memory(0x50, 0x42, &[1, 2]).unwrap();

    assert_eq!(
        transport.release().ops,
        vec![Op::Write(0x50, vec![0x42, 1, 2])]
    );
}

#[test]
fn test_two_byte_address_read() {
    let mut transport = I2cTransport16::new(FakeBus::default());
    let mut buf = [0; 4];
    transport.read_memory(0x51, 0x0fe0, &mut buf).unwrap();

    assert_eq!(buf, [0xa5; 4]);
    assert_eq!(
        transport.release().ops,
        vec![Op::WriteRead(0x51, vec![0x0f, 0xe0], 4)]
    );
}

#[test]
fn test_block_select_bits() {
    assert_eq!(I2cTransport8::<FakeBus>::select(0x50, 0x0ff), 0x50);
    assert_eq!(I2cTransport8::<FakeBus>::select(0x50, 0x1ff), 0x51);
    assert_eq!(I2cTransport8::<FakeBus>::select(0x50, 0x7ff), 0x57);
    assert_eq!(I2cTransport16::<FakeBus>::select(0x50, 0x1_0000), 0x51);
    assert_eq!(I2cTransport16::<FakeBus>::select(0x54, 0x3_ffff), 0x57);

    let select = DeviceSelect::from_bytes([0x53]);
    assert_eq!(select.block(), 0b011);
    assert_eq!(select.family(), 0b1010);
}

#[test]
fn test_block_select_on_wire() {
    let mut transport = I2cTransport8::new(FakeBus::default()).with_ack_polling(0);
    transport.write_memory(0x50, 0x310, &[7]).unwrap();
    let mut buf = [0; 1];
    transport.read_memory(0x50, 0x310, &mut buf).unwrap();

    assert_eq!(
        transport.release().ops,
        vec![
            Op::Write(0x53, vec![0x10, 7]),
            Op::WriteRead(0x53, vec![0x10], 1),
        ]
    );
}

#[test]
fn test_ack_polling() {
    let mut transport = I2cTransport16::new(FakeBus::busy_for(3));
    transport.write_memory(0x50, 0, &[1]).unwrap();
    transport.write_memory(0x50, 1, &[2]).unwrap();

    let bus = transport.release();
    assert_eq!(bus.data_ops().len(), 2);
    assert_eq!(bus.polls(), 8);
}

#[test]
fn test_ack_polling_exhausted() {
    let mut transport = I2cTransport16::new(FakeBus::busy_for(10)).with_ack_polling(5);
    let res = transport.write_memory(0x50, 0, &[1]);

    assert!(matches!(res, Err(Error::NotAcknowledged)));
    assert_eq!(transport.release().polls(), 5);
}

#[test]
fn test_segment_overflow() {
    let mut transport = I2cTransport16::new(FakeBus::default());
    let res = transport.write_memory(0x50, 0, &[0; MAX_PAGE_SIZE + 1]);

    assert!(matches!(res, Err(Error::SegmentOverflow)));
    assert!(transport.release().ops.is_empty());
}

#[test]
fn test_store_over_i2c() {
    let transport = I2cTransport16::new(FakeBus::default()).with_ack_polling(0);
    let mut store = Eeprom::new(transport, DeviceConfig::from(Variant::At24c32)).unwrap();

    store.probe().unwrap();
    store.write(30, "abcd").unwrap();
    assert_eq!(store.read(30, 2).unwrap(), vec![0xa5, 0xa5]);

    assert_eq!(
        store.release().release().ops,
        vec![
            Op::Write(0x50, vec![]),
            Op::Write(0x50, vec![0x00, 30, b'a', b'b']),
            Op::Write(0x50, vec![0x00, 32, b'c', b'd']),
            Op::WriteRead(0x50, vec![0x00, 30], 2),
        ]
    );
}
