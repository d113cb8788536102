//! The per-target packaging pipeline and the multi-target driver.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};

use crate::bundle::concat_sources;
use crate::header::render_header;
use crate::target::PackTarget;

/// Outcome of packaging one target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackReport {
    pub target: String,
    pub script_file: PathBuf,
    pub header_file: PathBuf,
    pub script_bytes: usize,
    pub header_bytes: usize,
}

/// Knobs for [`pack_many`].
#[derive(Debug, Default, Clone)]
pub struct PackOptions {
    /// Bound the worker pool; `None` uses rayon's default.
    pub jobs: Option<usize>,
}

/// Run the whole pipeline for one target against `dir`.
///
/// The script file is written before the header is computed, so a failure
/// after that point leaves the script in place without its header, matching
/// the partial-output ordering of the earlier packaging scripts. Both
/// outputs overwrite whatever was at their paths.
pub fn pack_target(dir: &Path, target: &PackTarget) -> Result<PackReport> {
    let body = concat_sources(dir, target.inputs())?;

    let script_file = dir.join(target.script_file());
    fs::write(&script_file, &body)
        .with_context(|| format!("writing script {}", script_file.display()))?;
    tracing::debug!(name = %target.name(), bytes = body.len(), "wrote script bundle");

    let header = render_header(&target.array_name(), &body);
    let header_file = dir.join(target.header_file());
    fs::write(&header_file, &header)
        .with_context(|| format!("writing header {}", header_file.display()))?;
    tracing::debug!(name = %target.name(), bytes = header.len(), "wrote header");

    Ok(PackReport {
        target: target.name().to_string(),
        script_file,
        header_file,
        script_bytes: body.len(),
        header_bytes: header.len(),
    })
}

/// Package every target in `targets` against `dir`.
///
/// Targets read and write disjoint files, so they run in parallel; report
/// order always matches target order. The first error aborts the run, though
/// targets already scheduled may still complete their writes.
pub fn pack_many(
    dir: &Path,
    targets: &[PackTarget],
    opts: &PackOptions,
) -> Result<Vec<PackReport>> {
    let run_pack = || -> Result<Vec<PackReport>> {
        targets
            .par_iter()
            .map(|target| pack_target(dir, target))
            .collect()
    };

    if let Some(jobs) = opts.jobs {
        let pool = ThreadPoolBuilder::new().num_threads(jobs).build()?;
        pool.install(run_pack)
    } else {
        run_pack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_fixture(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).expect("write fixture");
    }

    #[test]
    fn writes_script_and_header() {
        let tmp = tempdir().expect("tempdir");
        write_fixture(tmp.path(), "tool.js", "a();\n");
        let target = PackTarget::new("tool", ["tool.js"]);

        let report = pack_target(tmp.path(), &target).expect("pack");

        assert_eq!(report.target, "tool");
        assert_eq!(report.script_bytes, 5);
        assert_eq!(
            fs::read(tmp.path().join("tool_script.js")).expect("script"),
            b"a();\n"
        );
        let header = fs::read_to_string(tmp.path().join("tool_script.h")).expect("header");
        assert_eq!(
            header,
            "static const char tool_script[] = \\\n\t\"\\x61\\x28\\x29\\x3B\\x0A\";"
        );
        assert_eq!(report.header_bytes, header.len());
    }

    #[test]
    fn missing_input_writes_nothing() {
        let tmp = tempdir().expect("tempdir");
        write_fixture(tmp.path(), "present.js", "p();");
        let target = PackTarget::new("tool", ["present.js", "absent.js"]);

        pack_target(tmp.path(), &target).expect_err("missing input");

        assert!(!tmp.path().join("tool_script.js").exists());
        assert!(!tmp.path().join("tool_script.h").exists());
    }

    #[test]
    fn outputs_overwrite_previous_runs() {
        let tmp = tempdir().expect("tempdir");
        write_fixture(tmp.path(), "tool.js", "old");
        let target = PackTarget::new("tool", ["tool.js"]);
        pack_target(tmp.path(), &target).expect("first pack");

        write_fixture(tmp.path(), "tool.js", "new!");
        pack_target(tmp.path(), &target).expect("second pack");

        assert_eq!(
            fs::read(tmp.path().join("tool_script.js")).expect("script"),
            b"new!"
        );
    }

    #[test]
    fn repacking_unchanged_inputs_is_byte_identical() {
        let tmp = tempdir().expect("tempdir");
        write_fixture(tmp.path(), "tool.js", "stable();\n");
        let target = PackTarget::new("tool", ["tool.js"]);

        pack_target(tmp.path(), &target).expect("first pack");
        let script_one = fs::read(tmp.path().join("tool_script.js")).expect("script");
        let header_one = fs::read(tmp.path().join("tool_script.h")).expect("header");

        pack_target(tmp.path(), &target).expect("second pack");
        assert_eq!(
            fs::read(tmp.path().join("tool_script.js")).expect("script"),
            script_one
        );
        assert_eq!(
            fs::read(tmp.path().join("tool_script.h")).expect("header"),
            header_one
        );
    }

    #[test]
    fn pack_many_reports_follow_target_order() {
        let tmp = tempdir().expect("tempdir");
        write_fixture(tmp.path(), "a.js", "a");
        write_fixture(tmp.path(), "b.js", "b");
        let targets = vec![
            PackTarget::new("beta", ["b.js"]),
            PackTarget::new("alpha", ["a.js"]),
        ];

        let reports =
            pack_many(tmp.path(), &targets, &PackOptions::default()).expect("pack many");

        let names: Vec<&str> = reports.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(names, vec!["beta", "alpha"]);
    }

    #[test]
    fn bounded_jobs_produce_the_same_outputs() {
        let tmp = tempdir().expect("tempdir");
        write_fixture(tmp.path(), "a.js", "alpha();\n");
        write_fixture(tmp.path(), "b.js", "beta();\n");
        let targets = vec![
            PackTarget::new("alpha", ["a.js", "b.js"]),
            PackTarget::new("beta", ["b.js"]),
        ];

        pack_many(tmp.path(), &targets, &PackOptions::default()).expect("parallel");
        let parallel_header = fs::read(tmp.path().join("alpha_script.h")).expect("header");

        pack_many(tmp.path(), &targets, &PackOptions { jobs: Some(1) }).expect("sequential");
        let sequential_header = fs::read(tmp.path().join("alpha_script.h")).expect("header");

        assert_eq!(parallel_header, sequential_header);
    }

    #[test]
    fn pack_many_fails_when_any_target_is_missing_inputs() {
        let tmp = tempdir().expect("tempdir");
        write_fixture(tmp.path(), "a.js", "a");
        let targets = vec![
            PackTarget::new("alpha", ["a.js"]),
            PackTarget::new("broken", ["nowhere.js"]),
        ];

        pack_many(tmp.path(), &targets, &PackOptions::default()).expect_err("broken target");
    }
}
