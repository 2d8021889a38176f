use clap::Parser;
use web_reader::formatter::{render_error, render_report};
use web_reader::{PageReport, ReaderError, WebReader};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match args.build_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            print_error(&e, args.json);
            return;
        }
    };

    ::log::info!("Reading {}", args.url);
    let max_content_length = config.max_content_length;
    let reader = WebReader::new(args.url.as_str())
        .with_timeout_opt(args.timeout)
        .with_config(config);

    let start_time = std::time::Instant::now();
    let result = reader.read().await;
    ::log::info!(
        "Finished {} in {:.2} seconds",
        args.url,
        start_time.elapsed().as_secs_f64()
    );

    match result {
        Ok(report) if args.json => print_json(report, max_content_length),
        Ok(report) => println!("{}", render_report(&report, max_content_length)),
        Err(e) => print_error(&e, args.json),
    }
}

fn print_json(mut report: PageReport, max_content_length: usize) {
    report.truncate_main_text(max_content_length);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => ::log::error!("Failed to serialize report: {}", e),
    }
}

fn print_error(err: &ReaderError, json: bool) {
    if json {
        let value = serde_json::json!({
            "error": { "kind": err.kind(), "message": err.to_string() }
        });
        println!("{}", value);
    } else {
        println!("{}", render_error(err));
    }
}
