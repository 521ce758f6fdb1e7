//! CC1101 register map, strobes and SPI access modes.
//!
//! Register addresses follow the CC1101 datasheet (SWRS061). Status registers
//! share the 0x30..=0x3D address range with the command strobes; reading them
//! requires the burst bit, so the composite `REG_*` status constants below
//! already carry `READ_BURST`.

// SPI access mode bits, OR-ed into the register address in the header byte.
pub const WRITE_SINGLE: u8 = 0x00;
pub const WRITE_BURST: u8 = 0x40;
pub const READ_SINGLE: u8 = 0x80;
pub const READ_BURST: u8 = 0xC0;

// Configuration registers (0x00..=0x2E).
pub const REG_IOCFG2: u8 = 0x00;
pub const REG_IOCFG1: u8 = 0x01;
pub const REG_IOCFG0: u8 = 0x02;
pub const REG_FIFOTHR: u8 = 0x03;
pub const REG_SYNC1: u8 = 0x04;
pub const REG_SYNC0: u8 = 0x05;
pub const REG_PKTLEN: u8 = 0x06;
pub const REG_PKTCTRL1: u8 = 0x07;
pub const REG_PKTCTRL0: u8 = 0x08;
pub const REG_ADDR: u8 = 0x09;
pub const REG_CHANNR: u8 = 0x0A;
pub const REG_FSCTRL1: u8 = 0x0B;
pub const REG_FSCTRL0: u8 = 0x0C;
pub const REG_FREQ2: u8 = 0x0D;
pub const REG_FREQ1: u8 = 0x0E;
pub const REG_FREQ0: u8 = 0x0F;
pub const REG_MDMCFG4: u8 = 0x10;
pub const REG_MDMCFG3: u8 = 0x11;
pub const REG_MDMCFG2: u8 = 0x12;
pub const REG_MDMCFG1: u8 = 0x13;
pub const REG_MDMCFG0: u8 = 0x14;
pub const REG_DEVIATN: u8 = 0x15;
pub const REG_MCSM2: u8 = 0x16;
pub const REG_MCSM1: u8 = 0x17;
pub const REG_MCSM0: u8 = 0x18;
pub const REG_FOCCFG: u8 = 0x19;
pub const REG_BSCFG: u8 = 0x1A;
pub const REG_AGCCTRL2: u8 = 0x1B;
pub const REG_AGCCTRL1: u8 = 0x1C;
pub const REG_AGCCTRL0: u8 = 0x1D;
pub const REG_WOREVT1: u8 = 0x1E;
pub const REG_WOREVT0: u8 = 0x1F;
pub const REG_WORCTRL: u8 = 0x20;
pub const REG_FREND1: u8 = 0x21;
pub const REG_FREND0: u8 = 0x22;
pub const REG_FSCAL3: u8 = 0x23;
pub const REG_FSCAL2: u8 = 0x24;
pub const REG_FSCAL1: u8 = 0x25;
pub const REG_FSCAL0: u8 = 0x26;
pub const REG_RCCTRL1: u8 = 0x27;
pub const REG_RCCTRL0: u8 = 0x28;
pub const REG_FSTEST: u8 = 0x29;
pub const REG_PTEST: u8 = 0x2A;
pub const REG_AGCTEST: u8 = 0x2B;
pub const REG_TEST2: u8 = 0x2C;
pub const REG_TEST1: u8 = 0x2D;
pub const REG_TEST0: u8 = 0x2E;

/// Number of configuration registers readable in one burst from 0x00.
pub const CFG_REGISTER_COUNT: usize = 0x2F;

// Command strobes (header byte alone, no data).
pub const STROBE_SRES: u8 = 0x30;
pub const STROBE_SFSTXON: u8 = 0x31;
pub const STROBE_SXOFF: u8 = 0x32;
pub const STROBE_SCAL: u8 = 0x33;
pub const STROBE_SRX: u8 = 0x34;
pub const STROBE_STX: u8 = 0x35;
pub const STROBE_SIDLE: u8 = 0x36;
pub const STROBE_SWOR: u8 = 0x38;
pub const STROBE_SPWD: u8 = 0x39;
pub const STROBE_SFRX: u8 = 0x3A;
pub const STROBE_SFTX: u8 = 0x3B;
pub const STROBE_SWORRST: u8 = 0x3C;
pub const STROBE_SNOP: u8 = 0x3D;

// Status registers, composite: base address OR READ_BURST.
pub const REG_PARTNUM: u8 = 0xF0;
pub const REG_VERSION: u8 = 0xF1;
pub const REG_FREQEST: u8 = 0xF2;
pub const REG_LQI: u8 = 0xF3;
pub const REG_RSSI: u8 = 0xF4;
pub const REG_MARCSTATE: u8 = 0xF5;
pub const REG_WORTIME1: u8 = 0xF6;
pub const REG_WORTIME0: u8 = 0xF7;
pub const REG_PKTSTATUS: u8 = 0xF8;
pub const REG_VCO_VC_DAC: u8 = 0xF9;
pub const REG_TXBYTES: u8 = 0xFA;
pub const REG_RXBYTES: u8 = 0xFB;

/// RXBYTES carries the overflow flag in bit 7; the count is the low 7 bits.
pub const RXBYTES_MASK: u8 = 0x7F;

// Multi-byte access addresses.
pub const REG_PATABLE: u8 = 0x3E;
pub const REG_TX_FIFO: u8 = 0x3F;
pub const REG_RX_FIFO: u8 = 0xBF;

// MARCSTATE values of interest.
pub const MARCSTATE_IDLE: u8 = 0x01;
pub const MARCSTATE_RX: u8 = 0x0D;

/// SPI clock rate in Hz. The CC1101 tolerates up to 6.5 MHz for burst access
/// but 500 kHz keeps long jumper wires reliable.
pub const SPI_SPEED: u32 = 500_000;
