//! Random access to the per-document length table.

use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use parking_lot::Mutex;

use crate::document::DocId;
use crate::error::{PilumError, Result};
use crate::query::scorer::DocumentWeights;

const WEIGHT_WIDTH: u64 = 8;

/// `L(d)` values read on demand from `docWeights.bin`.
///
/// The weight of document `d` is the f64 at byte `d * 8`. One file handle
/// is shared behind a mutex, so each seek and read pair happens atomically.
#[derive(Debug)]
pub struct DiskDocumentWeights {
    file: Mutex<File>,
    count: usize,
}

impl DiskDocumentWeights {
    /// Open a weights file; its size must be a whole number of weights.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            PilumError::index(format!("missing index file {}: {e}", path.display()))
        })?;
        let size = file.metadata()?.len();
        if size % WEIGHT_WIDTH != 0 {
            return Err(PilumError::index(format!(
                "malformed {}: {size} bytes is not a multiple of {WEIGHT_WIDTH}",
                path.display()
            )));
        }
        Ok(DiskDocumentWeights {
            file: Mutex::new(file),
            count: (size / WEIGHT_WIDTH) as usize,
        })
    }
}

impl DocumentWeights for DiskDocumentWeights {
    fn document_weight(&self, doc_id: DocId) -> Result<f64> {
        if doc_id as usize >= self.count {
            return Err(PilumError::index(format!("no weight stored for document {doc_id}")));
        }
        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(u64::from(doc_id) * WEIGHT_WIDTH))?;
        Ok(file.read_f64::<LittleEndian>()?)
    }

    fn document_count(&self) -> usize {
        self.count
    }
}
