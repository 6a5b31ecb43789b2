//! Byte-level helpers shared by the PLOT3D readers and writers.

use std::io::{self, Read, Write};

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Byte order of a binary PLOT3D file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Record framing of a binary PLOT3D file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryFormat {
    /// Fortran unformatted: each record wrapped in 4-byte length markers.
    Fortran,
    /// Raw stream of values with no record markers.
    Raw,
}

/// Floating point width of coordinate data on disk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FloatPrecision {
    F32,
    F64,
}

impl FloatPrecision {
    #[inline]
    pub fn width(self) -> usize {
        match self {
            FloatPrecision::F32 => 4,
            FloatPrecision::F64 => 8,
        }
    }
}

impl Endian {
    #[inline]
    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endian::Little => LittleEndian::read_u32(buf),
            Endian::Big => BigEndian::read_u32(buf),
        }
    }

    #[inline]
    pub fn write_u32(self, buf: &mut [u8], value: u32) {
        match self {
            Endian::Little => LittleEndian::write_u32(buf, value),
            Endian::Big => BigEndian::write_u32(buf, value),
        }
    }

    /// Decode a whole buffer of floats into f64 values.
    pub fn read_floats(self, buf: &[u8], precision: FloatPrecision) -> Vec<f64> {
        match (self, precision) {
            (Endian::Little, FloatPrecision::F32) => buf
                .chunks_exact(4)
                .map(|c| LittleEndian::read_f32(c) as f64)
                .collect(),
            (Endian::Big, FloatPrecision::F32) => buf
                .chunks_exact(4)
                .map(|c| BigEndian::read_f32(c) as f64)
                .collect(),
            (Endian::Little, FloatPrecision::F64) => {
                buf.chunks_exact(8).map(LittleEndian::read_f64).collect()
            }
            (Endian::Big, FloatPrecision::F64) => {
                buf.chunks_exact(8).map(BigEndian::read_f64).collect()
            }
        }
    }

    /// Encode f64 values at the requested width.
    pub fn write_floats(self, values: &[f64], precision: FloatPrecision) -> Vec<u8> {
        let mut out = vec![0u8; values.len() * precision.width()];
        match (self, precision) {
            (Endian::Little, FloatPrecision::F32) => {
                for (chunk, v) in out.chunks_exact_mut(4).zip(values) {
                    LittleEndian::write_f32(chunk, *v as f32);
                }
            }
            (Endian::Big, FloatPrecision::F32) => {
                for (chunk, v) in out.chunks_exact_mut(4).zip(values) {
                    BigEndian::write_f32(chunk, *v as f32);
                }
            }
            (Endian::Little, FloatPrecision::F64) => {
                LittleEndian::write_f64_into(values, &mut out);
            }
            (Endian::Big, FloatPrecision::F64) => {
                BigEndian::write_f64_into(values, &mut out);
            }
        }
        out
    }
}

/// Read one Fortran unformatted record, validating the trailing marker.
pub fn read_fortran_record<R: Read>(reader: &mut R, endian: Endian) -> io::Result<Vec<u8>> {
    let mut marker = [0u8; 4];
    reader.read_exact(&mut marker)?;
    let len = endian.read_u32(&marker) as usize;
    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload)?;
    reader.read_exact(&mut marker)?;
    let trailing = endian.read_u32(&marker) as usize;
    if trailing != len {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("fortran record markers disagree: {len} vs {trailing}"),
        ));
    }
    Ok(payload)
}

/// Write one Fortran unformatted record with its length markers.
pub fn write_fortran_record<W: Write>(
    writer: &mut W,
    payload: &[u8],
    endian: Endian,
) -> io::Result<()> {
    let mut marker = [0u8; 4];
    endian.write_u32(&mut marker, payload.len() as u32);
    writer.write_all(&marker)?;
    writer.write_all(payload)?;
    writer.write_all(&marker)?;
    Ok(())
}
