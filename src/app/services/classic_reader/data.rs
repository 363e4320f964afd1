//! Data-section reading for classic files.
//!
//! Fixed variables live in one contiguous slab at their `begin` offset.
//! Record variables are interleaved: record r of a variable lives at
//! `begin + r * record_size`, where `record_size` is the sum of the padded
//! per-record slabs of every record variable — except that a lone record
//! variable is packed without padding.

use super::header::{ClassicHeader, NcType, RawVariable, RecordCount, decode_numeric, decode_text};
use crate::app::models::{Value, VariableData};
use crate::constants::netcdf;
use crate::{Error, Result};

/// Record-region geometry, computed once per file
#[derive(Debug, Clone, Copy)]
pub struct DataLayout {
    pub record_count: usize,
    pub record_size: usize,
}

/// Whether a variable uses the unlimited dimension (which classic files
/// require to be the variable's first dimension)
pub fn is_record_var(header: &ClassicHeader, var: &RawVariable) -> bool {
    match header.unlimited_dim_id() {
        Some(unlimited) => var.dim_ids.first() == Some(&unlimited),
        None => false,
    }
}

/// Number of elements in one slab of the variable: the product of its
/// dimension sizes, with the unlimited dimension counting as one record
fn slab_elements(header: &ClassicHeader, var: &RawVariable) -> Result<usize> {
    let unlimited = header.unlimited_dim_id();
    var.dim_ids.iter().try_fold(1usize, |acc, &id| {
        let size = if Some(id) == unlimited {
            1
        } else {
            header.dimensions[id].declared_size
        };
        acc.checked_mul(size).ok_or_else(|| {
            Error::invalid_format(format!("variable '{}' shape overflows", var.name))
        })
    })
}

fn slab_bytes(header: &ClassicHeader, var: &RawVariable) -> Result<usize> {
    slab_elements(header, var)?
        .checked_mul(var.nc_type.size())
        .ok_or_else(|| Error::invalid_format(format!("variable '{}' slab overflows", var.name)))
}

fn pad4(len: usize) -> usize {
    len.div_ceil(netcdf::ALIGNMENT) * netcdf::ALIGNMENT
}

/// Compute the record-region geometry. For streaming files (record count
/// 0xFFFFFFFF) the count is derived from the file length.
pub fn compute_layout(header: &ClassicHeader, file_len: usize) -> Result<DataLayout> {
    let record_vars: Vec<&RawVariable> = header
        .variables
        .iter()
        .filter(|v| is_record_var(header, v))
        .collect();

    let record_size = if record_vars.len() == 1 {
        // A lone record variable is packed without inter-record padding
        slab_bytes(header, record_vars[0])?
    } else {
        let mut total = 0usize;
        for var in &record_vars {
            total = total
                .checked_add(pad4(slab_bytes(header, var)?))
                .ok_or_else(|| Error::invalid_format("record size overflows"))?;
        }
        total
    };

    let record_count = match header.record_count {
        RecordCount::Known(n) => n,
        RecordCount::Streaming => {
            if record_size == 0 {
                0
            } else {
                let first_begin = record_vars
                    .iter()
                    .map(|v| v.begin)
                    .min()
                    .unwrap_or(file_len as u64) as usize;
                file_len.saturating_sub(first_begin) / record_size
            }
        }
    };

    Ok(DataLayout {
        record_count,
        record_size,
    })
}

/// Materialize the full data of one variable
pub fn read_variable(
    buf: &[u8],
    header: &ClassicHeader,
    layout: &DataLayout,
    var: &RawVariable,
) -> Result<VariableData> {
    let begin = usize::try_from(var.begin)
        .map_err(|_| Error::invalid_format(format!("variable '{}' offset overflows", var.name)))?;
    let slab_len = slab_bytes(header, var)?;

    if is_record_var(header, var) {
        let mut slabs = Vec::with_capacity(layout.record_count);
        for record in 0..layout.record_count {
            let offset = begin
                .checked_add(record.checked_mul(layout.record_size).ok_or_else(|| {
                    Error::invalid_format(format!("variable '{}' record offset overflows", var.name))
                })?)
                .ok_or_else(|| {
                    Error::invalid_format(format!("variable '{}' record offset overflows", var.name))
                })?;
            slabs.push(read_slab(buf, offset, slab_len, &var.name)?);
        }
        match var.nc_type {
            // A record char variable yields one text value per record
            NcType::Char => Ok(VariableData::Array(
                slabs
                    .into_iter()
                    .map(|slab| Value::Text(decode_text(slab)))
                    .collect(),
            )),
            _ => {
                let mut values = Vec::new();
                for slab in slabs {
                    values.extend(
                        decode_numeric(slab, var.nc_type)
                            .into_iter()
                            .map(Value::Number),
                    );
                }
                Ok(VariableData::Array(values))
            }
        }
    } else {
        let slab = read_slab(buf, begin, slab_len, &var.name)?;
        match var.nc_type {
            // Char data is materialized as one text blob; downstream
            // consumers expect strings, not per-character arrays
            NcType::Char => Ok(VariableData::Scalar(Value::Text(decode_text(slab)))),
            _ => {
                let values = decode_numeric(slab, var.nc_type);
                if var.dim_ids.is_empty() {
                    let value = values
                        .first()
                        .copied()
                        .ok_or_else(|| Error::missing_data(var.name.clone()))?;
                    Ok(VariableData::Scalar(Value::Number(value)))
                } else {
                    Ok(VariableData::Array(
                        values.into_iter().map(Value::Number).collect(),
                    ))
                }
            }
        }
    }
}

fn read_slab<'a>(buf: &'a [u8], offset: usize, len: usize, name: &str) -> Result<&'a [u8]> {
    offset
        .checked_add(len)
        .filter(|&end| end <= buf.len())
        .map(|end| &buf[offset..end])
        .ok_or_else(|| {
            Error::invalid_format(format!(
                "variable '{}' data is truncated (need {} bytes at offset {})",
                name, len, offset
            ))
        })
}
