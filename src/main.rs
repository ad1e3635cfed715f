extern crate docopt;
#[macro_use]
extern crate error_chain;
extern crate labyrinth;
extern crate rand;
#[macro_use]
extern crate serde_derive;

use docopt::Docopt;
use labyrinth::generators::{self, RecursiveBacktracker};
use labyrinth::renderers;
use labyrinth::units::{Height, KeepChance, Width};
use std::fs::File;
use std::io;
use std::io::Write;

const USAGE: &str = "Labyrinth

Usage:
    labyrinth_driver -h | --help
    labyrinth_driver [--width=<w>] [--height=<h>] [--keep-chance=<p>] [--seed=<s>] [--exits] [--text-out=<path>] [--html-out=<path>] [--show-order] [--show-bits]

Options:
    -h --help            Show this screen.
    --width=<w>          Interior maze width in cells [default: 20].
    --height=<h>         Interior maze height in cells [default: 15].
    --keep-chance=<p>    Probability of trying to keep moving in the same direction first [default: 0.7].
    --seed=<s>           Seed for the maze's random walk. Random when omitted.
    --exits              Punch entrance and exit corridors through the border.
    --text-out=<path>    Write the text rendering to a file instead of stdout.
    --html-out=<path>    Write a standalone HTML rendering, with a visit order replay, to a file.
    --show-order         Print the visitation order array.
    --show-bits          Print the raw bitfield grid dump.
";

#[derive(Debug, Deserialize)]
struct Args {
    flag_width: usize,
    flag_height: usize,
    flag_keep_chance: f64,
    flag_seed: Option<u64>,
    flag_exits: bool,
    flag_text_out: String,
    flag_html_out: String,
    flag_show_order: bool,
    flag_show_bits: bool,
}

mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types.
    // Result is a typedef of std `Result` with the error type our own `Error`.
    error_chain! {
        foreign_links {
            Io(::std::io::Error);
            Build(::labyrinth::generators::BuildError);
        }
    }
}
use errors::*;

fn main() -> Result<()> {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let mut maze = RecursiveBacktracker::new(Width(args.flag_width),
                                             Height(args.flag_height),
                                             KeepChance(args.flag_keep_chance))?;

    let mut rng = match args.flag_seed {
        Some(seed) => generators::seeded_rng(seed),
        None => rand::weak_rng(),
    };
    maze.generate(&mut rng, args.flag_exits);

    let text = renderers::render_text(&maze);
    if args.flag_text_out.is_empty() {
        println!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_html_out.is_empty() {
        write_text_to_file(&renderers::render_html(&maze), &args.flag_html_out)
            .chain_err(|| format!("Failed to write maze to html file {}", args.flag_html_out))?;
    }

    if args.flag_show_bits {
        println!("{}", maze.grid());
    }
    if args.flag_show_order {
        let order = maze.visit_order()
            .iter()
            .map(|index| index.to_string())
            .collect::<Vec<String>>();
        println!("[{}]", order.join(", "));
    }
    println!("max depth reached: {}", maze.max_depth());

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
