use phase_merge::config::merge_job as cfg;
use phase_merge::diagnostics::LogSink;
use phase_merge::io::write_json_file;
use phase_merge::report::MergeReport;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = cfg::load_config(Path::new(&config_path))?;

    let sink = LogSink::default();
    let report = MergeReport::from_job(&config, Some(&sink))?;
    report.print_text_summary();

    let out = config.output.report_path();
    write_json_file(&out, &report)?;
    println!("Wrote merge report JSON to {}", out.display());
    Ok(())
}

fn usage() -> String {
    "Usage: merge_demo <job.json>".to_string()
}
