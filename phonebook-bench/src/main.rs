use std::{env, ffi::OsString, fs::OpenOptions, path::PathBuf, process};

use anyhow::{Context, Result};
use phonebook_bench::{
    bench::{Benchmark, Progress},
    hash::HashFunction,
    sample::{SampleSpec, write_samples},
    source::{FileSource, read_queries},
};
use rand::{SeedableRng, rngs::SmallRng};
use tracing::info;

const USAGE: &str = "usage:\n  \
    {prog} <directory.txt> <find.txt> [--hash djb2|polynomial|md5] [--log FILE]\n  \
    {prog} sample <directory.txt> <find.txt> <dir-percent> <find-percent> <out-dir> [--seed N] [--log FILE]";

fn usage(prog: &str) -> ! {
    eprintln!("{}", USAGE.replace("{prog}", prog));
    process::exit(2);
}

/// Positional arguments plus the `--flag value` pairs we understand.
#[derive(Debug, Default)]
struct Args {
    positional: Vec<OsString>,
    hash: Option<String>,
    log: Option<PathBuf>,
    seed: Option<u64>,
}

fn parse_args(prog: &str, mut args: impl Iterator<Item = OsString>) -> Args {
    let mut out = Args::default();
    while let Some(arg) = args.next() {
        match arg.to_str() {
            Some("--hash") => out.hash = Some(flag_value(prog, "--hash", args.next())),
            Some("--log") => out.log = Some(flag_value(prog, "--log", args.next()).into()),
            Some("--seed") => {
                let v = flag_value(prog, "--seed", args.next());
                out.seed = Some(v.parse().unwrap_or_else(|_| {
                    eprintln!("error: --seed expects an integer, got {v:?}");
                    usage(prog)
                }));
            }
            Some("-h" | "--help") => usage(prog),
            _ => out.positional.push(arg),
        }
    }
    out
}

fn flag_value(prog: &str, flag: &str, v: Option<OsString>) -> String {
    match v.map(|v| v.into_string()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("error: {flag} needs a value");
            usage(prog)
        }
    }
}

fn setup_tracing(log: Option<&PathBuf>) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("phonebook_bench=info"));

    match log {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut args = env::args_os();
    let prog = args
        .next()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let args = parse_args(&prog, args);
    setup_tracing(args.log.as_ref())?;

    if args.positional.first().is_some_and(|a| a == "sample") {
        return run_sample(&prog, &args);
    }

    // Expect exactly two positional arguments: directory and query files
    let [directory, queries] = args.positional.as_slice() else {
        usage(&prog)
    };
    let hash = match &args.hash {
        Some(h) => h.parse::<HashFunction>()?,
        None => HashFunction::default(),
    };

    let queries = read_queries(&PathBuf::from(queries))?;
    let bench = Benchmark::new(FileSource::new(directory), queries).with_hash(hash);

    let report = bench.run_with(|p| match p {
        Progress::Started(phase) => println!("Start searching ({})...", phase.as_str()),
        Progress::Finished(r) => println!("{r}\n"),
    })?;
    info!(
        deadline = ?report.deadline,
        hash = %report.hash,
        "benchmark finished"
    );
    Ok(())
}

fn run_sample(prog: &str, args: &Args) -> Result<()> {
    let [_, directory, queries, dir_pct, find_pct, out_dir] = args.positional.as_slice() else {
        usage(prog)
    };
    let spec = SampleSpec {
        directory_percent: percent_arg(dir_pct)?,
        query_percent: percent_arg(find_pct)?,
    };
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let written = write_samples(
        &PathBuf::from(directory),
        &PathBuf::from(queries),
        spec,
        &PathBuf::from(out_dir),
        &mut rng,
    )?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

/// Zero or negative means "skip this file".
fn percent_arg(arg: &OsString) -> Result<Option<u32>> {
    let s = arg.to_string_lossy();
    let v: i64 = s
        .parse()
        .with_context(|| format!("percentage {s:?} is not an integer"))?;
    Ok(u32::try_from(v).ok().filter(|&p| p > 0))
}
