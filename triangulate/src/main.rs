use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::process;
use std::time::Instant;

use delaunay::{triangulate, IdEdge};
use glam::DVec2;
use rand::Rng;

const HELP_MESSAGE: &str = "\
usage: triangulate [-r | --random] [-n <int>] [-i | --input file] [-o | --out file]

-r | --random
\tRandomly generate point data
-n <int> = 20
\tThe number of points, only valid when --random is specified
-o | --out   file
\tOutput file path
-i | --input file
\tInput point file path, overrides --random and -n
-t | --time
\tPrint algorithm execution time

Input file format:
<number-of-points : int>
<x1 : double> <y1 : double>
<x2 : double> <y2 : double>
...
";

struct Config {
    input: Option<String>,
    output: Option<String>,
    count: usize,
    time: bool,
}

fn main() {
    let config = parse_args(env::args().skip(1));

    let mut points = match &config.input {
        Some(path) => read_points_from_file(path),
        None => random_points(config.count),
    };
    // `triangulate` reports edges as indices into its own internal pre-sort
    // order; sorting here too keeps the point block we write out in lockstep
    // with those indices.
    points.sort_unstable_by(|a, b| a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y)));

    if cfg!(debug_assertions) {
        eprintln!("---- input points start ----");
        eprintln!("{}", points.len());
        for p in &points {
            eprintln!("{:.3} {:.3}", p.x, p.y);
        }
        eprintln!("---- input points end ----");
    }

    let start = Instant::now();
    let edges = triangulate(points.clone());
    let elapsed = start.elapsed();

    match &config.output {
        Some(path) => {
            let mut f = File::create(path)
                .unwrap_or_else(|err| panic!("cannot open {path} for writing: {err}"));
            write_result(&points, &edges, &mut f).expect("failed to write result");
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_result(&points, &edges, &mut lock).expect("failed to write result");
        }
    }

    if config.time {
        eprintln!(
            "Algorithm Execution Time: {:.2} ms",
            elapsed.as_secs_f64() * 1000.0
        );
    }
}

fn parse_args(args: impl Iterator<Item = String>) -> Config {
    let args: Vec<String> = args.collect();
    let mut input = None;
    let mut output = None;
    let mut count = 20;
    let mut time = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-i" | "--input" => {
                i += 1;
                input = Some(expect_arg(&args, i, "-i/--input"));
            }
            "-r" | "--random" => {}
            "-n" => {
                i += 1;
                let raw = expect_arg(&args, i, "-n");
                count = raw
                    .parse()
                    .unwrap_or_else(|_| panic!("-n expects an integer, got {raw:?}"));
            }
            "-o" | "--out" => {
                i += 1;
                output = Some(expect_arg(&args, i, "-o/--out"));
            }
            "-t" | "--time" => time = true,
            "-h" | "--help" => {
                print!("{HELP_MESSAGE}");
                process::exit(0);
            }
            other => {
                eprintln!("triangulate: invalid option: {other}");
                process::exit(1);
            }
        }
        i += 1;
    }

    Config {
        input,
        output,
        count,
        time,
    }
}

fn expect_arg(args: &[String], i: usize, flag: &str) -> String {
    args.get(i)
        .unwrap_or_else(|| panic!("{flag} expects an argument"))
        .clone()
}

fn random_points(n: usize) -> Vec<DVec2> {
    let max = (n * 5) as f64;
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| DVec2::new(rng.gen_range(0.0..max), rng.gen_range(0.0..max)))
        .collect()
}

fn read_points_from_file(path: &str) -> Vec<DVec2> {
    let f = File::open(path).unwrap_or_else(|err| panic!("cannot open {path}: {err}"));
    let mut lines = BufReader::new(f).lines();

    let count: usize = lines
        .next()
        .expect("input file is empty")
        .expect("failed to read point count")
        .trim()
        .parse()
        .expect("first line must be the point count");

    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        let line = lines
            .next()
            .expect("input file ended before all points were read")
            .expect("failed to read point line");
        let mut parts = line.split_whitespace();
        let x: f64 = parts.next().expect("missing x coordinate").parse().expect("invalid x coordinate");
        let y: f64 = parts.next().expect("missing y coordinate").parse().expect("invalid y coordinate");
        points.push(DVec2::new(x, y));
    }
    points
}

fn write_result(points: &[DVec2], edges: &[IdEdge], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", points.len())?;
    for p in points {
        writeln!(out, "{:.3} {:.3}", p.x, p.y)?;
    }
    for e in edges {
        writeln!(out, "{} {}", e.p1, e.p2)?;
    }
    Ok(())
}
