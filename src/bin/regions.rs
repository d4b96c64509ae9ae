use std::io::{self, BufReader, Read};

use floodgrid::fatal::OrAbort;
use floodgrid::grid::Grid;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut pattern: Option<char> = None;
    let mut debug = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--debug" => {
                debug = true;
                i += 1;
            }
            "--help" | "-h" => {
                usage();
                std::process::exit(2);
            }
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next(), pattern) {
                    (Some(c), None, None) => pattern = Some(c),
                    _ => {
                        eprintln!("pattern must be a single character, got {s:?}\n");
                        usage();
                        std::process::exit(2);
                    }
                }
                i += 1;
            }
        }
    }

    let stdin = io::stdin();
    let mut input = BufReader::new(stdin.lock());

    let (width, height) = match read_dimensions(&mut input) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{e}\n");
            usage();
            std::process::exit(2);
        }
    };

    let mut grid = Grid::with_capacity(width, height);
    grid.init(&mut input).or_abort();

    if debug {
        grid.debug();
    }

    if let Some(p) = pattern {
        println!("stat({p:?}) = {}", grid.stat(p));
    }

    let census = grid.census();
    let mut tiles: Vec<char> = census.keys().copied().collect();
    tiles.sort_unstable();
    for t in tiles {
        let sizes = &census[&t];
        let total: u64 = sizes.iter().sum();
        println!(
            "{t:?}: {total} cells in {} component(s), sizes {sizes:?}",
            sizes.len()
        );
    }
}

fn usage() {
    eprintln!(
        "Usage: regions [pattern] [--debug]\n\n\
         Reads `width height` and a grid block from stdin, then reports the\n\
         connected-component census (and, with a pattern, its cell count)."
    );
}

/// Parse the `width height` header line.
fn read_dimensions<R: Read>(input: &mut R) -> Result<(usize, usize), String> {
    let mut header = Vec::new();
    for b in input.by_ref().bytes() {
        let b = b.map_err(|e| format!("failed to read header: {e}"))?;
        if b == b'\n' {
            break;
        }
        header.push(b);
    }
    let header = String::from_utf8_lossy(&header);

    let mut parts = header.split_whitespace();
    let (Some(w), Some(h)) = (parts.next(), parts.next()) else {
        return Err(format!("expected a `width height` header, got {header:?}"));
    };
    let width = w
        .parse::<usize>()
        .map_err(|e| format!("bad width {w:?}: {e}"))?;
    let height = h
        .parse::<usize>()
        .map_err(|e| format!("bad height {h:?}: {e}"))?;
    Ok((width, height))
}
