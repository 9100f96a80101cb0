use std::path::PathBuf;

use clap::Parser;
use job_browser::{init_logger, Browser, FilterSelection, SortKey};
use tiny_bail::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "list")]
#[command(version)]
#[command(about = "Filter and sort the job postings in a JSON file")]
struct Args {
    /// JSON file containing an array of job postings
    file: PathBuf,

    /// Only show jobs with exactly this level
    #[arg(long)]
    level: Option<String>,

    /// Only show jobs with exactly this type
    #[arg(long = "type")]
    kind: Option<String>,

    /// Only show jobs with exactly this skill
    #[arg(long)]
    skill: Option<String>,

    /// title-asc, title-desc, time-oldest or time-newest (anything else keeps file order)
    #[arg(long, default_value = "")]
    sort: String,

    /// Print each job's full details
    #[arg(long)]
    details: bool,

    /// Print the values available for each filter
    #[arg(long)]
    vocabulary: bool,

    /// Print the view as JSON instead
    #[arg(long)]
    json: bool,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logger(if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    let mut browser = Browser::new();
    // The browser has already logged why the load failed.
    rq!(browser.load_file(&args.file));
    browser.set_filter(FilterSelection {
        level: args.level,
        kind: args.kind,
        skill: args.skill,
    });
    let sort = args.sort.parse::<SortKey>().unwrap_or_default();
    let view = browser.set_sort(sort);

    if args.json {
        println!("{}", r!(serde_json::to_string_pretty(&view)));
        return;
    }
    if args.vocabulary {
        view.print_vocabulary();
    }
    view.print(args.details);
}
