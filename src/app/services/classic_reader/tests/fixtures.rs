//! Byte-level fixture builder for classic files.
//!
//! Tests assemble real CDF-1/CDF-2 files from dimension and variable
//! definitions; the builder lays out the data region (fixed slabs first,
//! then interleaved records) and patches the begin offsets, so fixtures
//! stay readable while exercising the genuine on-disk layout.

pub const NC_BYTE: u32 = 1;
pub const NC_CHAR: u32 = 2;
pub const NC_SHORT: u32 = 3;
pub const NC_INT: u32 = 4;
pub const NC_FLOAT: u32 = 5;
pub const NC_DOUBLE: u32 = 6;

const TAG_DIMENSION: u32 = 0x0A;
const TAG_VARIABLE: u32 = 0x0B;
const TAG_ATTRIBUTE: u32 = 0x0C;

pub struct AttrDef {
    pub name: String,
    pub type_code: u32,
    pub nelems: u32,
    pub payload: Vec<u8>,
}

pub fn text_attr(name: &str, value: &str) -> AttrDef {
    AttrDef {
        name: name.to_string(),
        type_code: NC_CHAR,
        nelems: value.len() as u32,
        payload: value.as_bytes().to_vec(),
    }
}

pub fn double_attr(name: &str, values: &[f64]) -> AttrDef {
    AttrDef {
        name: name.to_string(),
        type_code: NC_DOUBLE,
        nelems: values.len() as u32,
        payload: f64_bytes(values),
    }
}

pub struct VarDef {
    pub name: String,
    pub dim_ids: Vec<u32>,
    pub type_code: u32,
    pub attrs: Vec<AttrDef>,
    /// Element bytes: one slab for fixed variables, all record slabs
    /// concatenated (unpadded) for record variables
    pub data: Vec<u8>,
}

impl VarDef {
    pub fn new(name: &str, dim_ids: Vec<u32>, type_code: u32, data: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            dim_ids,
            type_code,
            attrs: Vec::new(),
            data,
        }
    }

    pub fn with_attr(mut self, attr: AttrDef) -> Self {
        self.attrs.push(attr);
        self
    }
}

pub fn f64_bytes(values: &[f64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

pub fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

pub fn i32_bytes(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

pub fn i16_bytes(values: &[i16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

fn type_size(code: u32) -> usize {
    match code {
        NC_BYTE | NC_CHAR => 1,
        NC_SHORT => 2,
        NC_INT | NC_FLOAT => 4,
        NC_DOUBLE => 8,
        _ => panic!("unknown type code {code}"),
    }
}

fn pad4(len: usize) -> usize {
    len.div_ceil(4) * 4
}

/// Build a complete classic file. `version` is 1 (CDF-1) or 2 (CDF-2);
/// a dimension of size 0 is the unlimited dimension.
pub fn build_file(version: u8, numrecs: u32, dims: &[(&str, u32)], vars: &[VarDef]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"CDF");
    out.push(version);
    push_u32(&mut out, numrecs);

    // Dimension list
    if dims.is_empty() {
        push_u32(&mut out, 0);
        push_u32(&mut out, 0);
    } else {
        push_u32(&mut out, TAG_DIMENSION);
        push_u32(&mut out, dims.len() as u32);
        for (name, size) in dims {
            push_name(&mut out, name);
            push_u32(&mut out, *size);
        }
    }

    // No global attributes in fixtures
    push_u32(&mut out, 0);
    push_u32(&mut out, 0);

    // Variable list, with begin offsets patched afterwards
    let mut begin_positions = Vec::with_capacity(vars.len());
    if vars.is_empty() {
        push_u32(&mut out, 0);
        push_u32(&mut out, 0);
    } else {
        push_u32(&mut out, TAG_VARIABLE);
        push_u32(&mut out, vars.len() as u32);
        for var in vars {
            push_name(&mut out, &var.name);
            push_u32(&mut out, var.dim_ids.len() as u32);
            for id in &var.dim_ids {
                push_u32(&mut out, *id);
            }
            push_attr_list(&mut out, &var.attrs);
            push_u32(&mut out, var.type_code);
            push_u32(&mut out, pad4(slab_bytes(dims, var)) as u32);
            begin_positions.push(out.len());
            match version {
                1 => push_u32(&mut out, 0),
                2 => out.extend_from_slice(&0u64.to_be_bytes()),
                _ => panic!("unsupported version {version}"),
            }
        }
    }

    // Lay out the data region: fixed variables first, then records
    let is_record: Vec<bool> = vars.iter().map(|v| uses_unlimited(dims, v)).collect();
    let record_slabs: Vec<usize> = vars
        .iter()
        .zip(&is_record)
        .filter(|(_, rec)| **rec)
        .map(|(v, _)| slab_bytes(dims, v))
        .collect();
    let single_record_var = record_slabs.len() == 1;

    let mut begins = vec![0u64; vars.len()];
    let mut cursor = out.len();
    for (i, var) in vars.iter().enumerate() {
        if !is_record[i] {
            begins[i] = cursor as u64;
            cursor += pad4(slab_bytes(dims, var));
        }
    }
    for (i, var) in vars.iter().enumerate() {
        if is_record[i] {
            begins[i] = cursor as u64;
            let slab = slab_bytes(dims, var);
            cursor += if single_record_var { slab } else { pad4(slab) };
        }
    }

    for (pos, begin) in begin_positions.iter().zip(&begins) {
        match version {
            1 => out[*pos..*pos + 4].copy_from_slice(&(*begin as u32).to_be_bytes()),
            _ => out[*pos..*pos + 8].copy_from_slice(&begin.to_be_bytes()),
        }
    }

    // Fixed data
    for (i, var) in vars.iter().enumerate() {
        if !is_record[i] {
            let slab = slab_bytes(dims, var);
            assert_eq!(var.data.len(), slab, "fixed data size for '{}'", var.name);
            out.extend_from_slice(&var.data);
            out.resize(out.len() + pad4(slab) - slab, 0);
        }
    }

    // Interleaved record data
    for record in 0..numrecs as usize {
        for (i, var) in vars.iter().enumerate() {
            if is_record[i] {
                let slab = slab_bytes(dims, var);
                let chunk = &var.data[record * slab..(record + 1) * slab];
                out.extend_from_slice(chunk);
                if !single_record_var {
                    out.resize(out.len() + pad4(slab) - slab, 0);
                }
            }
        }
    }

    out
}

fn uses_unlimited(dims: &[(&str, u32)], var: &VarDef) -> bool {
    var.dim_ids
        .first()
        .is_some_and(|&id| dims[id as usize].1 == 0)
}

/// One slab: product of dimension sizes (unlimited counts as one record)
fn slab_bytes(dims: &[(&str, u32)], var: &VarDef) -> usize {
    let elems: usize = var
        .dim_ids
        .iter()
        .map(|&id| {
            let size = dims[id as usize].1;
            if size == 0 { 1 } else { size as usize }
        })
        .product();
    elems * type_size(var.type_code)
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn push_name(out: &mut Vec<u8>, name: &str) {
    push_u32(out, name.len() as u32);
    out.extend_from_slice(name.as_bytes());
    out.resize(out.len() + pad4(name.len()) - name.len(), 0);
}

fn push_attr_list(out: &mut Vec<u8>, attrs: &[AttrDef]) {
    if attrs.is_empty() {
        push_u32(out, 0);
        push_u32(out, 0);
        return;
    }
    push_u32(out, TAG_ATTRIBUTE);
    push_u32(out, attrs.len() as u32);
    for attr in attrs {
        push_name(out, &attr.name);
        push_u32(out, attr.type_code);
        push_u32(out, attr.nelems);
        out.extend_from_slice(&attr.payload);
        out.resize(out.len() + pad4(attr.payload.len()) - attr.payload.len(), 0);
    }
}
