//! Runs every look over one source image and persists the results.
//!
//! Each look is an independent job: it borrows the source immutably, owns
//! its output, and reports success or failure in its own [`FilterOutcome`].
//! A failing look is logged and skipped; the others still run.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

use crate::error::{FilterError, Result};
use crate::io;
use crate::looks::{self, FilterKind};
use crate::params::ParameterTable;

/// A rendered look and where it should be written.
#[derive(Debug, Clone)]
pub struct FilterResult {
    pub kind: FilterKind,
    pub image: Array3<f32>,
    pub path: PathBuf,
}

/// Destination for rendered looks.
pub trait ImageSink: Sync {
    fn save(&self, result: &FilterResult) -> Result<()>;
}

/// Writes each result as a JPEG file at its path.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegSink;

impl ImageSink for JpegSink {
    fn save(&self, result: &FilterResult) -> Result<()> {
        io::save_jpeg(result.image.view(), &result.path)
    }
}

/// How the looks are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// One after another on the calling thread
    Sequential,
    /// As independent jobs on the rayon pool
    #[default]
    Parallel,
}

/// What happened to one look.
#[derive(Debug)]
pub struct FilterOutcome {
    pub kind: FilterKind,
    pub path: PathBuf,
    pub elapsed: Duration,
    pub result: Result<()>,
}

impl FilterOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a full run, in pipeline order.
#[derive(Debug)]
pub struct RunSummary {
    pub outcomes: Vec<FilterOutcome>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &FilterOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    pub fn total_elapsed(&self) -> Duration {
        self.outcomes.iter().map(|o| o.elapsed).sum()
    }
}

/// `{out_dir}/{NN}_{name}.jpg`, with `NN` the 1-based pipeline position.
pub fn output_path(out_dir: &Path, kind: FilterKind) -> PathBuf {
    out_dir.join(format!("{:02}_{}.jpg", kind.index(), kind.name()))
}

/// Applies every look in [`FilterKind::ALL`] to one image.
pub struct Driver<'a, S: ImageSink> {
    table: &'a ParameterTable,
    sink: S,
    out_dir: PathBuf,
    schedule: Schedule,
}

impl<'a, S: ImageSink> Driver<'a, S> {
    pub fn new(table: &'a ParameterTable, sink: S, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            table,
            sink,
            out_dir: out_dir.into(),
            schedule: Schedule::default(),
        }
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Render and save every look. Never fails as a whole: per-look errors
    /// are carried in the returned outcomes.
    pub fn run(&self, input: ArrayView3<f32>) -> RunSummary {
        let outcomes: Vec<FilterOutcome> = match self.schedule {
            Schedule::Sequential => FilterKind::ALL
                .iter()
                .map(|&kind| self.run_one(kind, input))
                .collect(),
            Schedule::Parallel => FilterKind::ALL
                .par_iter()
                .map(|&kind| self.run_one(kind, input))
                .collect(),
        };

        let summary = RunSummary { outcomes };
        tracing::info!(
            succeeded = summary.succeeded(),
            total = summary.outcomes.len(),
            "run finished"
        );
        summary
    }

    fn run_one(&self, kind: FilterKind, input: ArrayView3<f32>) -> FilterOutcome {
        let path = output_path(&self.out_dir, kind);
        let start = Instant::now();
        tracing::info!(filter = %kind, "applying");

        let result = self.render(kind, input, &path);
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(
                filter = %kind,
                path = %path.display(),
                elapsed_ms = elapsed.as_millis() as u64,
                "saved"
            ),
            Err(e) => tracing::error!(filter = %kind, error = %e, "filter failed"),
        }

        FilterOutcome {
            kind,
            path,
            elapsed,
            result,
        }
    }

    fn render(&self, kind: FilterKind, input: ArrayView3<f32>, path: &Path) -> Result<()> {
        let params = self.table.get(kind)?;
        let image = looks::apply(kind, input, params)?;
        self.sink.save(&FilterResult {
            kind,
            image,
            path: path.to_path_buf(),
        })
    }
}

/// Everything one invocation of the tool needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub schedule: Schedule,
    /// Worker threads for the parallel schedule; rayon's default when `None`
    pub jobs: Option<usize>,
}

/// Load the input, prepare the output directory, then render every look
/// with the built-in parameters.
///
/// # Errors
/// Only load, directory and thread-pool failures are returned; they happen
/// before any look runs. Per-look failures are in the summary.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let image = io::load_image(&config.input)?;
    let (height, width, _) = image.dim();
    tracing::info!(input = %config.input.display(), width, height, "image loaded");

    io::prepare_output_dir(&config.out_dir)?;

    let table = ParameterTable::builtin();
    let driver = Driver::new(&table, JpegSink, &config.out_dir).with_schedule(config.schedule);

    match config.jobs {
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|e| FilterError::invalid("jobs", e.to_string()))?;
            Ok(pool.install(|| driver.run(image.view())))
        }
        None => Ok(driver.run(image.view())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Keeps results in memory, optionally refusing one look.
    #[derive(Default)]
    struct MemorySink {
        saved: Mutex<Vec<(FilterKind, PathBuf, (usize, usize, usize))>>,
        refuse: Option<FilterKind>,
    }

    impl ImageSink for MemorySink {
        fn save(&self, result: &FilterResult) -> Result<()> {
            if self.refuse == Some(result.kind) {
                return Err(FilterError::Io(std::io::Error::other("disk full")));
            }
            self.saved
                .lock()
                .unwrap()
                .push((result.kind, result.path.clone(), result.image.dim()));
            Ok(())
        }
    }

    fn source() -> Array3<f32> {
        Array3::from_shape_fn((24, 32, 3), |(y, x, c)| {
            ((y * 5 + x * 3 + c * 7) % 23) as f32 / 22.0
        })
    }

    #[test]
    fn test_output_path_format() {
        let path = output_path(Path::new("/tmp/out"), FilterKind::SoftPastel);
        assert_eq!(path, Path::new("/tmp/out/10_soft_pastel.jpg"));

        let path = output_path(Path::new("out"), FilterKind::BleachBypass);
        assert_eq!(path, Path::new("out/01_bleach_bypass.jpg"));
    }

    #[test]
    fn test_all_looks_saved_in_both_schedules() {
        let table = ParameterTable::builtin();
        let img = source();

        for schedule in [Schedule::Sequential, Schedule::Parallel] {
            let driver = Driver::new(&table, MemorySink::default(), "out").with_schedule(schedule);
            let summary = driver.run(img.view());

            assert_eq!(summary.succeeded(), 10);
            let kinds: Vec<FilterKind> = summary.outcomes.iter().map(|o| o.kind).collect();
            assert_eq!(kinds, FilterKind::ALL.to_vec());

            let saved = driver.sink.saved.lock().unwrap();
            assert_eq!(saved.len(), 10);
            assert!(saved.iter().all(|(_, _, dim)| *dim == (24, 32, 3)));
        }
    }

    #[test]
    fn test_missing_parameters_isolated() {
        let table = ParameterTable::builtin().without(FilterKind::Duotone);
        let img = source();

        let driver = Driver::new(&table, MemorySink::default(), "out");
        let summary = driver.run(img.view());

        assert_eq!(summary.succeeded(), 9);
        let failed: Vec<&FilterOutcome> = summary.failed().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].kind, FilterKind::Duotone);
        assert!(matches!(
            failed[0].result,
            Err(FilterError::MissingParameters("duotone"))
        ));
    }

    #[test]
    fn test_save_failure_isolated() {
        let table = ParameterTable::builtin();
        let img = source();
        let sink = MemorySink {
            refuse: Some(FilterKind::Tiltshift),
            ..MemorySink::default()
        };

        let driver = Driver::new(&table, sink, "out").with_schedule(Schedule::Sequential);
        let summary = driver.run(img.view());

        assert_eq!(summary.succeeded(), 9);
        assert_eq!(summary.failed().next().map(|o| o.kind), Some(FilterKind::Tiltshift));
        assert_eq!(driver.sink.saved.lock().unwrap().len(), 9);
    }

    #[test]
    fn test_non_rgb_source_fails_every_look() {
        let table = ParameterTable::builtin();
        let rgba = Array3::<f32>::zeros((8, 8, 4));

        let driver = Driver::new(&table, MemorySink::default(), "out");
        let summary = driver.run(rgba.view());

        assert_eq!(summary.succeeded(), 0);
        assert_eq!(summary.outcomes.len(), 10);
    }
}
