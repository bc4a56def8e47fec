use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use bytesize::ByteSize;
use log::{info, warn};

use super::{
    duplicate_set::DuplicateSet,
    error::{Error, Result},
    fixup::{FixupPlan, ScriptType},
    pipeline::Diagnostics,
};

pub fn output_error(what: &'static str, path: &Path, source: io::Error) -> Error {
    Error::Output {
        what,
        path: path.to_path_buf(),
        source,
    }
}

/// Where the results of a run go.
pub struct Outputs {
    /// Report file; the console gets the report when unset.
    pub report: Option<PathBuf>,
    pub script: PathBuf,
    pub script_type: ScriptType,
}

impl Outputs {
    /// Writes the report, then the summary, then the removal script. Nothing
    /// after a failed step is written, and a script that cannot be written in
    /// full is removed.
    pub fn write<W: Write>(
        &self,
        duplicates: &DuplicateSet,
        diagnostics: Option<&Diagnostics>,
        console: &mut W,
    ) -> Result<FixupPlan> {
        self.write_report(duplicates, console)?;

        write_summary(console, duplicates, diagnostics).map_err(Error::Console)?;

        let plan = duplicates.fixup();
        if plan.is_empty() {
            info!("Nothing to remove, writing an empty script");
        }
        write_script(&self.script, &plan.script(self.script_type))?;
        writeln!(
            console,
            "Remove duplicates script: {} ({} files)",
            self.script.display(),
            plan.len()
        )
        .map_err(Error::Console)?;
        Ok(plan)
    }

    fn write_report<W: Write>(&self, duplicates: &DuplicateSet, console: &mut W) -> Result<()> {
        let Some(path) = &self.report else {
            return duplicates.report(console).map_err(Error::Console);
        };
        let file = File::create(path).map_err(|source| output_error("report", path, source))?;
        duplicates
            .report(&mut BufWriter::new(file))
            .map_err(|source| output_error("report", path, source))?;
        info!("Report written to {}", path.display());
        Ok(())
    }
}

fn write_summary<W: Write>(
    console: &mut W,
    duplicates: &DuplicateSet,
    diagnostics: Option<&Diagnostics>,
) -> io::Result<()> {
    writeln!(console)?;
    if let Some(diagnostics) = diagnostics {
        write!(console, "{}", diagnostics)?;
    }
    writeln!(console, "Wasted space: {}", ByteSize::b(duplicates.wasted_space()))
}

fn write_script(path: &Path, script: &str) -> Result<()> {
    let mut file = File::create(path).map_err(|source| output_error("script", path, source))?;
    if let Err(source) = file.write_all(script.as_bytes()).and_then(|_| file.sync_all()) {
        drop(file);
        if let Err(error) = fs::remove_file(path) {
            warn!("Failed removing partial script {}: {}", path.display(), error);
        }
        return Err(output_error("script", path, source));
    }
    Ok(())
}
