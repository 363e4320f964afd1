//! NetCDF classic header parsing.
//!
//! The classic header is a sequence of big-endian tagged lists: magic +
//! version byte, record count, dimension list, global attribute list and
//! variable list. CDF-1 stores variable data offsets as 32-bit values,
//! CDF-2 as 64-bit; everything else is identical between the two.

use crate::app::models::AttrValue;
use crate::constants::netcdf;
use crate::{Error, Result};

/// Classic format flavor, from the version byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    /// CDF-1: 32-bit data offsets
    Classic,
    /// CDF-2: 64-bit data offsets
    Offset64,
}

/// Element type of a variable or attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NcType {
    Byte,
    Char,
    Short,
    Int,
    Float,
    Double,
}

impl NcType {
    /// Decode the on-disk type code
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            1 => Ok(NcType::Byte),
            2 => Ok(NcType::Char),
            3 => Ok(NcType::Short),
            4 => Ok(NcType::Int),
            5 => Ok(NcType::Float),
            6 => Ok(NcType::Double),
            other => Err(Error::invalid_format(format!(
                "unknown element type code {}",
                other
            ))),
        }
    }

    /// Size of one element in bytes
    pub fn size(&self) -> usize {
        match self {
            NcType::Byte | NcType::Char => 1,
            NcType::Short => 2,
            NcType::Int | NcType::Float => 4,
            NcType::Double => 8,
        }
    }

    /// Type name as reported to users ("# Tipo: ..." lines, `info` output)
    pub fn name(&self) -> &'static str {
        match self {
            NcType::Byte => "byte",
            NcType::Char => "char",
            NcType::Short => "short",
            NcType::Int => "int",
            NcType::Float => "float",
            NcType::Double => "double",
        }
    }
}

/// Record count from the header; STREAMING means "derive from file length"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordCount {
    Known(usize),
    Streaming,
}

/// A dimension as declared in the header; size 0 marks the unlimited
/// (record) dimension
#[derive(Debug, Clone)]
pub struct RawDimension {
    pub name: String,
    pub declared_size: usize,
}

/// A variable as declared in the header
#[derive(Debug, Clone)]
pub struct RawVariable {
    pub name: String,
    pub dim_ids: Vec<usize>,
    pub attributes: Vec<(String, AttrValue)>,
    pub nc_type: NcType,
    /// Absolute file offset of the variable's data (first record for
    /// record variables)
    pub begin: u64,
}

/// The fully parsed classic header
#[derive(Debug, Clone)]
pub struct ClassicHeader {
    pub version: Version,
    pub record_count: RecordCount,
    pub dimensions: Vec<RawDimension>,
    pub global_attributes: Vec<(String, AttrValue)>,
    pub variables: Vec<RawVariable>,
}

impl ClassicHeader {
    /// Id of the unlimited dimension, if the file declares one
    pub fn unlimited_dim_id(&self) -> Option<usize> {
        self.dimensions.iter().position(|d| d.declared_size == 0)
    }
}

/// Parse the header section of a classic file
pub fn parse_header(buf: &[u8]) -> Result<ClassicHeader> {
    let mut cursor = ByteCursor::new(buf);

    let magic = cursor.read_bytes(3)?;
    if magic != netcdf::MAGIC.as_slice() {
        return Err(Error::invalid_format(
            "not a NetCDF classic file (bad magic)",
        ));
    }
    let version = match cursor.read_u8()? {
        netcdf::VERSION_CLASSIC => Version::Classic,
        netcdf::VERSION_64BIT_OFFSET => Version::Offset64,
        other => return Err(Error::unsupported_version(other)),
    };

    let record_count = match cursor.read_u32()? {
        netcdf::STREAMING_RECORD_COUNT => RecordCount::Streaming,
        n => RecordCount::Known(n as usize),
    };

    let dimensions = read_dim_list(&mut cursor)?;
    let global_attributes = read_attr_list(&mut cursor)?;
    let variables = read_var_list(&mut cursor, version, dimensions.len())?;

    Ok(ClassicHeader {
        version,
        record_count,
        dimensions,
        global_attributes,
        variables,
    })
}

fn read_dim_list(cursor: &mut ByteCursor) -> Result<Vec<RawDimension>> {
    let count = read_list_count(cursor, netcdf::TAG_DIMENSION, "dimension")?;
    let mut dimensions = Vec::with_capacity(count);
    for _ in 0..count {
        let name = read_name(cursor)?;
        let declared_size = cursor.read_u32()? as usize;
        dimensions.push(RawDimension {
            name,
            declared_size,
        });
    }
    Ok(dimensions)
}

fn read_attr_list(cursor: &mut ByteCursor) -> Result<Vec<(String, AttrValue)>> {
    let count = read_list_count(cursor, netcdf::TAG_ATTRIBUTE, "attribute")?;
    let mut attributes = Vec::with_capacity(count);
    for _ in 0..count {
        let name = read_name(cursor)?;
        let nc_type = NcType::from_code(cursor.read_u32()?)?;
        let nelems = cursor.read_u32()? as usize;
        let byte_len = nelems
            .checked_mul(nc_type.size())
            .ok_or_else(|| Error::invalid_format("attribute length overflow"))?;
        let raw = cursor.read_bytes(byte_len)?;
        let value = match nc_type {
            NcType::Char => AttrValue::Text(decode_text(raw)),
            _ => AttrValue::Numeric(decode_numeric(raw, nc_type)),
        };
        cursor.align()?;
        attributes.push((name, value));
    }
    Ok(attributes)
}

fn read_var_list(
    cursor: &mut ByteCursor,
    version: Version,
    dim_count: usize,
) -> Result<Vec<RawVariable>> {
    let count = read_list_count(cursor, netcdf::TAG_VARIABLE, "variable")?;
    let mut variables = Vec::with_capacity(count);
    for _ in 0..count {
        let name = read_name(cursor)?;
        let ndims = cursor.read_u32()? as usize;
        let mut dim_ids = Vec::with_capacity(ndims);
        for _ in 0..ndims {
            let id = cursor.read_u32()? as usize;
            if id >= dim_count {
                return Err(Error::invalid_format(format!(
                    "variable '{}' references dimension id {} but only {} dimensions are declared",
                    name, id, dim_count
                )));
            }
            dim_ids.push(id);
        }
        let attributes = read_attr_list(cursor)?;
        let nc_type = NcType::from_code(cursor.read_u32()?)?;
        // The declared vsize is redundant (and wraps for very large
        // variables); slab sizes are recomputed from shape and type instead.
        let _vsize = cursor.read_u32()?;
        let begin = match version {
            Version::Classic => u64::from(cursor.read_u32()?),
            Version::Offset64 => cursor.read_u64()?,
        };
        variables.push(RawVariable {
            name,
            dim_ids,
            attributes,
            nc_type,
            begin,
        });
    }
    Ok(variables)
}

/// Read a list tag + element count. Empty lists are encoded as
/// (ABSENT, 0); non-empty lists carry the expected tag.
fn read_list_count(cursor: &mut ByteCursor, expected_tag: u32, label: &str) -> Result<usize> {
    let tag = cursor.read_u32()?;
    let count = cursor.read_u32()? as usize;
    if tag == netcdf::TAG_ABSENT && count == 0 {
        return Ok(0);
    }
    if tag != expected_tag {
        return Err(Error::invalid_format(format!(
            "expected {} list tag 0x{:02X}, found 0x{:02X}",
            label, expected_tag, tag
        )));
    }
    Ok(count)
}

/// Read a length-prefixed name, padded to the 4-byte boundary
fn read_name(cursor: &mut ByteCursor) -> Result<String> {
    let len = cursor.read_u32()? as usize;
    let raw = cursor.read_bytes(len)?;
    let name = String::from_utf8_lossy(raw).into_owned();
    cursor.align()?;
    Ok(name)
}

/// Decode a char payload as text, dropping trailing NUL padding
pub(super) fn decode_text(raw: &[u8]) -> String {
    let trimmed_len = raw
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |pos| pos + 1);
    String::from_utf8_lossy(&raw[..trimmed_len]).into_owned()
}

/// Decode a numeric payload, widening every element to f64
pub(super) fn decode_numeric(raw: &[u8], nc_type: NcType) -> Vec<f64> {
    let step = nc_type.size();
    raw.chunks_exact(step)
        .map(|chunk| match nc_type {
            NcType::Byte => chunk[0] as i8 as f64,
            NcType::Char => chunk[0] as f64,
            NcType::Short => i16::from_be_bytes([chunk[0], chunk[1]]) as f64,
            NcType::Int => i32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as f64,
            NcType::Float => {
                f32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as f64
            }
            NcType::Double => f64::from_be_bytes([
                chunk[0], chunk[1], chunk[2], chunk[3], chunk[4], chunk[5], chunk[6], chunk[7],
            ]),
        })
        .collect()
}

/// Bounds-checked big-endian reader over the raw file bytes
pub(super) struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| {
                Error::invalid_format(format!(
                    "truncated file: need {} bytes at offset {}, have {}",
                    len,
                    self.pos,
                    self.buf.len().saturating_sub(self.pos)
                ))
            })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let b = self.read_bytes(8)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    /// Skip forward to the next 4-byte boundary
    pub fn align(&mut self) -> Result<()> {
        let rem = self.pos % netcdf::ALIGNMENT;
        if rem != 0 {
            self.read_bytes(netcdf::ALIGNMENT - rem)?;
        }
        Ok(())
    }
}
