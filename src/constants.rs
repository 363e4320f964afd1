//! Application constants for the NetCDF converter
//!
//! This module contains the row budgets, legacy output strings, and NetCDF
//! classic container constants used throughout the converter.

// =============================================================================
// Conversion Budgets
// =============================================================================

/// Hard cap on total rows emitted by the structured path, across all
/// variables of one conversion. Enumeration stops once this is reached;
/// rows collected so far are still serialized.
pub const MAX_STRUCTURED_ROWS: usize = 500_000;

/// Per-variable cap on `index,value` lines emitted by the flat fallback.
/// Values beyond the cap are summarized in an "omitted" comment.
pub const MAX_FLAT_VALUES_PER_VARIABLE: usize = 100_000;

// =============================================================================
// Legacy Output Strings
// =============================================================================

/// Output text carried over verbatim (in Portuguese) from the web converter
/// this tool replaces. These strings are part of the produced files, and
/// downstream spreadsheets and scripts already match on them.
pub mod legacy {
    /// Serializer output when there are no rows at all.
    pub const EMPTY_EXPORT_PLACEHOLDER: &str = "Sem dados para exportar";

    /// First comment line of the flat-fallback listing.
    pub const FALLBACK_TITLE: &str = "# Arquivo NetCDF convertido para CSV";

    /// Prefix of the dimension-listing comment (followed by a JSON array).
    pub const FALLBACK_DIMENSIONS_PREFIX: &str = "# Dimensões: ";

    /// Prefix of the per-variable name comment.
    pub const FALLBACK_VARIABLE_PREFIX: &str = "# Variável: ";

    /// Prefix of the per-variable type comment.
    pub const FALLBACK_TYPE_PREFIX: &str = "# Tipo: ";

    /// Format of the truncation comment: `# ... {n} valores adicionais omitidos`.
    pub const FALLBACK_OMITTED_SUFFIX: &str = "valores adicionais omitidos";
}

// =============================================================================
// File Naming
// =============================================================================

/// Extension required on input files (matched case-insensitively).
pub const INPUT_EXTENSION: &str = ".nc";

/// Extension given to converted output files.
pub const OUTPUT_EXTENSION: &str = ".csv";

// =============================================================================
// NetCDF Classic Container
// =============================================================================

/// Constants of the NetCDF classic binary layout (CDF-1 and CDF-2).
pub mod netcdf {
    /// Leading magic bytes, followed by the version byte.
    pub const MAGIC: &[u8; 3] = b"CDF";

    /// Version byte for classic files with 32-bit data offsets.
    pub const VERSION_CLASSIC: u8 = 1;

    /// Version byte for classic files with 64-bit data offsets.
    pub const VERSION_64BIT_OFFSET: u8 = 2;

    /// Record-count value meaning "unknown, derive from file length".
    pub const STREAMING_RECORD_COUNT: u32 = 0xFFFF_FFFF;

    /// Tag introducing a non-empty dimension list.
    pub const TAG_DIMENSION: u32 = 0x0A;

    /// Tag introducing a non-empty variable list.
    pub const TAG_VARIABLE: u32 = 0x0B;

    /// Tag introducing a non-empty attribute list.
    pub const TAG_ATTRIBUTE: u32 = 0x0C;

    /// Tag used for an absent (empty) list.
    pub const TAG_ABSENT: u32 = 0x00;

    /// Header values and data slabs are padded to this alignment.
    pub const ALIGNMENT: usize = 4;
}
