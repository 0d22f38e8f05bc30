use std::io::{ErrorKind, Read, Write};

use crate::constants::{CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_U32};
use crate::error::{Error, Result};

fn next_carrier_byte<R: Read>(carrier: &mut R, phase: &'static str) -> Result<u8> {
    let mut byte = [0u8; 1];
    carrier.read_exact(&mut byte).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => Error::UnexpectedEndOfCarrier { phase },
        _ => Error::Io(e),
    })?;
    Ok(byte[0])
}

pub fn pack_byte<R: Read, W: Write>(
    value: u8,
    carrier: &mut R,
    output: &mut W,
    phase: &'static str,
) -> Result<()> {
    for i in 0..CARRIER_BYTES_PER_BYTE {
        let bit = (value >> (7 - i)) & 1;
        let carrier_byte = next_carrier_byte(carrier, phase)?;
        let stego_byte = if bit == 1 {
            carrier_byte | 1
        } else {
            carrier_byte & !1
        };
        output.write_all(&[stego_byte])?;
    }

    Ok(())
}

pub fn pack_u32<R: Read, W: Write>(
    value: u32,
    carrier: &mut R,
    output: &mut W,
    phase: &'static str,
) -> Result<()> {
    for i in 0..CARRIER_BYTES_PER_U32 {
        let bit = (value >> (31 - i)) & 1;
        let carrier_byte = next_carrier_byte(carrier, phase)?;
        let stego_byte = if bit == 1 {
            carrier_byte | 1
        } else {
            carrier_byte & !1
        };
        output.write_all(&[stego_byte])?;
    }

    Ok(())
}

pub fn unpack_byte<R: Read>(carrier: &mut R, phase: &'static str) -> Result<u8> {
    let mut value: u8 = 0;
    for _ in 0..CARRIER_BYTES_PER_BYTE {
        let carrier_byte = next_carrier_byte(carrier, phase)?;
        value = (value << 1) | (carrier_byte & 1);
    }

    Ok(value)
}

pub fn unpack_u32<R: Read>(carrier: &mut R, phase: &'static str) -> Result<u32> {
    let mut value: u32 = 0;
    for _ in 0..CARRIER_BYTES_PER_U32 {
        let carrier_byte = next_carrier_byte(carrier, phase)?;
        value = (value << 1) | u32::from(carrier_byte & 1);
    }

    Ok(value)
}
