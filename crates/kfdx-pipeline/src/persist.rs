//! Write-then-swap persistence for run artifacts.
//!
//! Every artifact of a run is first written to a temporary file inside the
//! output directory. Nothing replaces a prior artifact until all of them have
//! been written; dropping an uncommitted batch deletes the temporaries.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use kfdx_common::Result;
use tempfile::NamedTempFile;
use tracing::debug;

pub struct OutputBatch {
    dir: PathBuf,
    staged: Vec<(NamedTempFile, PathBuf)>,
}

impl OutputBatch {
    /// Open a batch targeting `dir`, creating the directory if needed.
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            staged: Vec::new(),
        })
    }

    /// Write one artifact to a temporary file. `write` receives a buffered
    /// writer; the data is flushed and synced before this returns.
    pub fn stage<F>(&mut self, file_name: &str, write: F) -> Result<PathBuf>
    where
        F: FnOnce(&mut dyn Write) -> Result<()>,
    {
        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{file_name}."))
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        {
            let mut buf = BufWriter::new(tmp.as_file_mut());
            write(&mut buf)?;
            buf.flush()?;
        }
        tmp.as_file().sync_all()?;

        let target = self.dir.join(file_name);
        debug!("Staged {:?} at {:?}", target, tmp.path());
        self.staged.push((tmp, target.clone()));
        Ok(target)
    }

    /// Final paths of everything staged so far.
    pub fn targets(&self) -> Vec<PathBuf> {
        self.staged.iter().map(|(_, target)| target.clone()).collect()
    }

    /// Atomically rename every staged file over its target.
    pub fn commit(self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.staged.len());
        for (tmp, target) in self.staged {
            tmp.persist(&target).map_err(|e| e.error)?;
            written.push(target);
        }
        Ok(written)
    }
}
