//! PLOT3D multi-block mesh readers.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::block::Block;
use crate::utils::{read_fortran_record, BinaryFormat, Endian, FloatPrecision};

/// Read an ASCII PLOT3D file: block count, dims per block, then the x, y
/// and z arrays of each block. Whitespace and line breaks are free form.
pub fn read_plot3d_ascii<P: AsRef<Path>>(path: P) -> io::Result<Vec<Block>> {
    let text = std::fs::read_to_string(path)?;
    let mut tokens = text.split_whitespace();

    let nblocks = next_usize(&mut tokens)?;
    let mut dims = Vec::with_capacity(nblocks);
    for _ in 0..nblocks {
        let imax = next_usize(&mut tokens)?;
        let jmax = next_usize(&mut tokens)?;
        let kmax = next_usize(&mut tokens)?;
        dims.push((imax, jmax, kmax));
    }

    let mut blocks = Vec::with_capacity(nblocks);
    for (imax, jmax, kmax) in dims {
        let n = imax * jmax * kmax;
        let x = next_f64_array(&mut tokens, n)?;
        let y = next_f64_array(&mut tokens, n)?;
        let z = next_f64_array(&mut tokens, n)?;
        blocks.push(Block::new(imax, jmax, kmax, x, y, z));
    }
    Ok(blocks)
}

/// Read a binary PLOT3D file in either raw or Fortran unformatted layout.
///
/// # Arguments
/// * `path` - File to read.
/// * `format` - Record framing on disk.
/// * `precision` - Width of the stored floats.
/// * `endian` - Byte order of integers and floats.
pub fn read_plot3d_binary<P: AsRef<Path>>(
    path: P,
    format: BinaryFormat,
    precision: FloatPrecision,
    endian: Endian,
) -> io::Result<Vec<Block>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    match format {
        BinaryFormat::Raw => read_binary_raw(&mut reader, precision, endian),
        BinaryFormat::Fortran => read_binary_fortran(&mut reader, precision, endian),
    }
}

fn read_binary_raw(
    reader: &mut impl Read,
    precision: FloatPrecision,
    endian: Endian,
) -> io::Result<Vec<Block>> {
    let nblocks = read_u32(reader, endian)? as usize;
    let mut dims = Vec::with_capacity(nblocks);
    for _ in 0..nblocks {
        let imax = read_u32(reader, endian)? as usize;
        let jmax = read_u32(reader, endian)? as usize;
        let kmax = read_u32(reader, endian)? as usize;
        dims.push((imax, jmax, kmax));
    }

    let mut blocks = Vec::with_capacity(nblocks);
    for (imax, jmax, kmax) in dims {
        let n = imax * jmax * kmax;
        let x = read_float_array(reader, n, precision, endian)?;
        let y = read_float_array(reader, n, precision, endian)?;
        let z = read_float_array(reader, n, precision, endian)?;
        blocks.push(Block::new(imax, jmax, kmax, x, y, z));
    }
    Ok(blocks)
}

fn read_binary_fortran(
    reader: &mut impl Read,
    precision: FloatPrecision,
    endian: Endian,
) -> io::Result<Vec<Block>> {
    let header = read_fortran_record(reader, endian)?;
    if header.len() < 4 {
        return Err(ioerr("block count record too short"));
    }
    let nblocks = endian.read_u32(&header[..4]) as usize;

    let mut dims = Vec::with_capacity(nblocks);
    for _ in 0..nblocks {
        let rec = read_fortran_record(reader, endian)?;
        if rec.len() < 12 {
            return Err(ioerr("dims record too short"));
        }
        let imax = endian.read_u32(&rec[0..4]) as usize;
        let jmax = endian.read_u32(&rec[4..8]) as usize;
        let kmax = endian.read_u32(&rec[8..12]) as usize;
        dims.push((imax, jmax, kmax));
    }

    let mut blocks = Vec::with_capacity(nblocks);
    for (imax, jmax, kmax) in dims {
        let n = imax * jmax * kmax;
        let x = read_fortran_array(reader, n, precision, endian)?;
        let y = read_fortran_array(reader, n, precision, endian)?;
        let z = read_fortran_array(reader, n, precision, endian)?;
        blocks.push(Block::new(imax, jmax, kmax, x, y, z));
    }
    Ok(blocks)
}

fn read_u32(reader: &mut impl Read, endian: Endian) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(endian.read_u32(&buf))
}

fn read_float_array(
    reader: &mut impl Read,
    n: usize,
    precision: FloatPrecision,
    endian: Endian,
) -> io::Result<Vec<f64>> {
    let mut buf = vec![0u8; n * precision.width()];
    reader.read_exact(&mut buf)?;
    Ok(endian.read_floats(&buf, precision))
}

fn read_fortran_array(
    reader: &mut impl Read,
    n: usize,
    precision: FloatPrecision,
    endian: Endian,
) -> io::Result<Vec<f64>> {
    let rec = read_fortran_record(reader, endian)?;
    if rec.len() != n * precision.width() {
        return Err(ioerr("coordinate record size mismatch"));
    }
    Ok(endian.read_floats(&rec, precision))
}

fn next_usize<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> io::Result<usize> {
    tokens
        .next()
        .ok_or_else(|| ioerr("unexpected end of file"))?
        .parse()
        .map_err(|_| ioerr("bad integer"))
}

fn next_f64_array<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    n: usize,
) -> io::Result<Vec<f64>> {
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let value = tokens
            .next()
            .ok_or_else(|| ioerr("unexpected end of file"))?
            .parse::<f64>()
            .map_err(|_| ioerr("bad float"))?;
        out.push(value);
    }
    Ok(out)
}

fn ioerr(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}
