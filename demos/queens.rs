use clap::Parser;
use log::info;

use circuit_rs::config::SessionConfig;
use circuit_rs::reference::Ref;
use circuit_rs::session::Session;
use circuit_rs::solver::SolveStatus;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of queens.
    #[arg(value_name = "INT", default_value = "8")]
    n: usize,

    /// Enumerate all solutions instead of printing the first one.
    #[clap(long)]
    all: bool,

    /// Wall-clock bound per solve call, in seconds.
    #[clap(long, value_name = "SECONDS")]
    timeout: Option<f64>,

    /// Disable variable elimination in the engine.
    #[clap(long)]
    plain: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let mut config = SessionConfig::default().with_elimination(!args.plain);
    if let Some(seconds) = args.timeout {
        config = config.with_max_time(seconds);
    }
    let mut s = Session::with_config(config);

    // Encode N-queens problem:
    // - at least one queen per row
    // - at most one queen per row, column and diagonal
    let n = args.n;
    println!("Encoding n-queens problem with n = {}", n);
    let queens: Vec<Vec<Ref>> = (0..n).map(|_| (0..n).map(|_| s.var()).collect()).collect();

    for row in &queens {
        let mut some = row[0];
        for &q in &row[1..] {
            some = s.or(some, q)?;
        }
        s.assert(some)?;
    }

    for i in 0..n {
        for j in 0..n {
            for k in i..n {
                for l in 0..n {
                    if (k, l) <= (i, j) {
                        continue;
                    }
                    let (di, dj) = (k - i, l.abs_diff(j));
                    if i == k || j == l || di == dj {
                        let apart = s.nand(queens[i][j], queens[k][l])?;
                        s.assert(apart)?;
                    }
                }
            }
        }
    }
    println!("session = {}", s.stats());

    let cells: Vec<Ref> = queens.iter().flatten().copied().collect();
    let mut count = 0usize;
    loop {
        match s.solve() {
            SolveStatus::Satisfiable => {}
            SolveStatus::Unsatisfiable => break,
            SolveStatus::Unknown => {
                println!("Stopped early: {:?}", s.unknown_cause());
                break;
            }
        }
        count += 1;

        if !args.all || count == 1 {
            for row in &queens {
                let line: Vec<&str> = row
                    .iter()
                    .map(|&q| s.value(q).map(|v| if v { "Q" } else { "." }))
                    .collect::<Result<_, _>>()?;
                println!("{}", line.join(" "));
            }
        }
        if !args.all {
            break;
        }

        let blocker = s.block_solution(cells.iter().copied())?;
        s.assert(blocker)?;
    }

    info!("Found {} solution(s) for n = {}", count, n);
    println!("session = {}", s.stats());

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
