//! Terminal demo: carve a maze, solve it with both modes, print the board.
//!
//! Run: cargo run --bin pathviz [seed]

use std::collections::HashSet;

use warren_core::{GridError, Point};
use warren_demos::{Command, DEFAULT_WIDTH, Session};
use warren_paths::SolveMode;

const WIDTH: i32 = DEFAULT_WIDTH;
// DEFAULT_HEIGHT assumes a window; a terminal wants fewer rows.
const HEIGHT: i32 = 24;

fn run(seed: u64) -> Result<(), GridError> {
    let mut session = Session::new(WIDTH, HEIGHT, seed)?;
    // Last coarse lattice cell, so the end sits in a carved room.
    session.handle(Command::PlaceEnd(Point::new(WIDTH - 2, HEIGHT - 2)))?;
    session.handle(Command::GenerateMaze)?;

    println!("maze {WIDTH}x{HEIGHT}, seed {seed}");
    session.handle(Command::SetMode(SolveMode::Dijkstra))?;
    session.handle(Command::Solve)?;
    print_metrics(&session);

    session.handle(Command::ToggleMode)?;
    session.handle(Command::Solve)?;
    print_metrics(&session);

    print_board(&session);
    Ok(())
}

fn print_metrics(session: &Session) {
    let Some(report) = session.report() else {
        return;
    };
    if report.reachable {
        println!(
            "{:<9} cost {:>4}  settled {:>5}  {:?}",
            session.mode().label(),
            report.path.len() + 1,
            report.cells_settled,
            report.elapsed
        );
    } else {
        println!(
            "{:<9} unreachable  settled {:>5}  {:?}",
            session.mode().label(),
            report.cells_settled,
            report.elapsed
        );
    }
}

fn print_board(session: &Session) {
    let on_path: HashSet<Point> = session.path().iter().copied().collect();
    let grid = session.grid();
    for y in 0..grid.height() {
        let mut row = String::with_capacity(grid.width() as usize);
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            row.push(if p == session.start() {
                'S'
            } else if p == session.end() {
                'E'
            } else if on_path.contains(&p) {
                '*'
            } else if grid.at(p) == Some(true) {
                '#'
            } else {
                ' '
            });
        }
        println!("{row}");
    }
}

fn main() {
    let seed = match std::env::args().nth(1) {
        Some(arg) => match arg.parse() {
            Ok(seed) => seed,
            Err(_) => {
                eprintln!("usage: pathviz [seed]");
                std::process::exit(2);
            }
        },
        None => 42,
    };

    if let Err(e) = run(seed) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
