//! PLOT3D multi-block mesh writers.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::block::Block;
use crate::utils::{write_fortran_record, BinaryFormat, Endian, FloatPrecision};

/// Write blocks as a PLOT3D file.
///
/// When `binary` is false the file is ASCII and `format`, `precision`
/// and `endian` are ignored. ASCII output keeps full f64 precision.
pub fn write_plot3d<P: AsRef<Path>>(
    path: P,
    blocks: &[Block],
    binary: bool,
    format: BinaryFormat,
    precision: FloatPrecision,
    endian: Endian,
) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    if binary {
        match format {
            BinaryFormat::Raw => write_binary_raw(&mut writer, blocks, precision, endian)?,
            BinaryFormat::Fortran => {
                write_binary_fortran(&mut writer, blocks, precision, endian)?
            }
        }
    } else {
        write_ascii(&mut writer, blocks)?;
    }
    writer.flush()
}

fn write_ascii(w: &mut impl Write, blocks: &[Block]) -> io::Result<()> {
    writeln!(w, "{}", blocks.len())?;
    for b in blocks {
        writeln!(w, "{} {} {}", b.imax, b.jmax, b.kmax)?;
    }
    for b in blocks {
        write_ascii_array(w, &b.x)?;
        write_ascii_array(w, &b.y)?;
        write_ascii_array(w, &b.z)?;
    }
    Ok(())
}

fn write_ascii_array(w: &mut impl Write, values: &[f64]) -> io::Result<()> {
    for chunk in values.chunks(4) {
        let line = chunk
            .iter()
            .map(|v| format!("{:.16e}", v))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(w, "{}", line)?;
    }
    Ok(())
}

fn write_binary_raw(
    w: &mut impl Write,
    blocks: &[Block],
    precision: FloatPrecision,
    endian: Endian,
) -> io::Result<()> {
    let mut buf = [0u8; 4];
    endian.write_u32(&mut buf, blocks.len() as u32);
    w.write_all(&buf)?;
    for b in blocks {
        for extent in [b.imax, b.jmax, b.kmax] {
            endian.write_u32(&mut buf, extent as u32);
            w.write_all(&buf)?;
        }
    }
    for b in blocks {
        w.write_all(&endian.write_floats(&b.x, precision))?;
        w.write_all(&endian.write_floats(&b.y, precision))?;
        w.write_all(&endian.write_floats(&b.z, precision))?;
    }
    Ok(())
}

fn write_binary_fortran(
    w: &mut impl Write,
    blocks: &[Block],
    precision: FloatPrecision,
    endian: Endian,
) -> io::Result<()> {
    let mut buf = [0u8; 4];
    endian.write_u32(&mut buf, blocks.len() as u32);
    write_fortran_record(w, &buf, endian)?;

    for b in blocks {
        let mut rec = [0u8; 12];
        endian.write_u32(&mut rec[0..4], b.imax as u32);
        endian.write_u32(&mut rec[4..8], b.jmax as u32);
        endian.write_u32(&mut rec[8..12], b.kmax as u32);
        write_fortran_record(w, &rec, endian)?;
    }

    for b in blocks {
        write_fortran_record(w, &endian.write_floats(&b.x, precision), endian)?;
        write_fortran_record(w, &endian.write_floats(&b.y, precision), endian)?;
        write_fortran_record(w, &endian.write_floats(&b.z, precision), endian)?;
    }
    Ok(())
}
