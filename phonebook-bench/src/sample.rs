//! Shrunken test inputs: draw a percentage of an existing file's lines uniformly at random
//! (with replacement) and write them next to each other as `directory<p>.txt` / `find<p>.txt`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, ensure};
use rand::Rng;
use tracing::info;

use crate::source::parse_queries;

/// Which samples to produce. `None` skips that file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleSpec {
    pub directory_percent: Option<u32>,
    pub query_percent: Option<u32>,
}

/// Draw `max(1, len * percent / 100)` lines from `lines`.
pub fn sample_lines<R: Rng>(
    lines: &[String],
    percent: u32,
    rng: &mut R,
) -> Result<Vec<String>> {
    ensure!(
        (1..=100).contains(&percent),
        "percentage {percent} out of range 1..=100"
    );
    ensure!(!lines.is_empty(), "nothing to sample from");
    let n = (lines.len() * percent as usize / 100).max(1);
    Ok((0..n)
        .map(|_| lines[rng.gen_range(0..lines.len())].clone())
        .collect())
}

/// Write the requested samples into `out_dir`, returning the files created.
pub fn write_samples<R: Rng>(
    directory: &Path,
    queries: &Path,
    spec: SampleSpec,
    out_dir: &Path,
    rng: &mut R,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;
    let mut written = Vec::new();
    for (input, percent, stem) in [
        (directory, spec.directory_percent, "directory"),
        (queries, spec.query_percent, "find"),
    ] {
        let Some(percent) = percent else { continue };
        let text =
            fs::read_to_string(input).with_context(|| format!("read {}", input.display()))?;
        let picked = sample_lines(&parse_queries(&text), percent, rng)
            .with_context(|| format!("sample {}", input.display()))?;
        let out = out_dir.join(format!("{stem}{percent}.txt"));
        let mut body = picked.join("\n");
        body.push('\n');
        fs::write(&out, body).with_context(|| format!("write {}", out.display()))?;
        info!(input = %input.display(), output = %out.display(), lines = picked.len(), "sample written");
        written.push(out);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::SmallRng};

    use super::*;

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{i} name{i}")).collect()
    }

    #[test]
    fn sample_size_is_percentage_with_floor_of_one() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(sample_lines(&lines(200), 10, &mut rng).unwrap().len(), 20);
        assert_eq!(sample_lines(&lines(5), 1, &mut rng).unwrap().len(), 1);
        assert_eq!(sample_lines(&lines(5), 100, &mut rng).unwrap().len(), 5);
    }

    #[test]
    fn sampled_lines_come_from_the_source() {
        let src = lines(50);
        let mut rng = SmallRng::seed_from_u64(1);
        for l in sample_lines(&src, 40, &mut rng).unwrap() {
            assert!(src.contains(&l));
        }
    }

    #[test]
    fn rejects_bad_percentages_and_empty_sources() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(sample_lines(&lines(5), 0, &mut rng).is_err());
        assert!(sample_lines(&lines(5), 101, &mut rng).is_err());
        assert!(sample_lines(&[], 50, &mut rng).is_err());
    }
}
