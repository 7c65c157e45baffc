//! Batch entry points - one batch = one consolidation run over a set of
//! files.

use std::fs;
use std::path::Path;

use crate::aggregate::fold;
use crate::error::{Result, SkurollError};
use crate::parser::parse_first_sheet;
use crate::scan::scan;
use crate::types::{SalesTotals, Sheet};

/// Consolidate a batch of already-parsed sheets into per-SKU totals.
///
/// Each element pairs a display name with its file's first sheet. The name
/// is provenance only; aggregation never looks at it. Sheets must be given
/// in upload order — that order fixes the first-seen tie-break used by
/// ranking. Totals start empty for every call; nothing leaks between
/// batches.
///
/// # Errors
/// `EmptyBatch` when given zero files, before any extraction. A batch whose
/// files all yield zero valid pairs is not an error; it completes with
/// empty totals.
pub fn extract(batch: &[(String, Sheet)]) -> Result<SalesTotals> {
    if batch.is_empty() {
        return Err(SkurollError::EmptyBatch);
    }

    let mut totals = SalesTotals::new();
    for (_name, sheet) in batch {
        let entries = scan(sheet);
        fold(&mut totals, &entries);
    }
    Ok(totals)
}

/// Read and consolidate a batch of XLSX files from disk.
///
/// Every file is read and parsed before any aggregation happens, and the
/// aggregation walks the files in argument order — the upload-order
/// invariant holds no matter how the reads complete.
///
/// # Errors
/// `EmptyBatch` for zero paths; otherwise any read or parse failure for an
/// individual file aborts the batch.
pub fn consolidate_paths<P: AsRef<Path>>(paths: &[P]) -> Result<SalesTotals> {
    if paths.is_empty() {
        return Err(SkurollError::EmptyBatch);
    }

    let mut batch = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let sheet = parse_first_sheet(&data)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        batch.push((name, sheet));
    }

    extract(&batch)
}
