#![cfg(not(tarpaulin_include))]

use report_client::terminal::TerminalRenderer;
use report_client::{ClientConfig, DirectorySink, HttpApi, ReportSession};

use std::env;
use std::io::{self, BufRead, Write};
use std::time::Instant;

fn print_help(page_sizes: &[usize]) {
    println!("Commands:");
    println!("  q: Quit");
    println!("  list: Show questions");
    println!("  t <n>: Toggle question n");
    println!("  all: Select all questions");
    println!("  clear: Clear the selection");
    println!("  gen: Generate the report");
    println!("  n / p: Next / previous page");
    println!("  size <n>: Rows per page (e.g. {:?})", page_sizes);
    println!("  show: Redraw the current page");
    println!("  export: Export the report to the output directory");
    println!("  disable_output: Disable table display");
    println!("  enable_output: Enable table display");
}

/// Terminal front end for the reporting API.
///
/// Usage: `cli [base_url] [output_dir]`. Logging follows `RUST_LOG`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = ClientConfig::default();
    if let Some(base_url) = args.get(1) {
        config = config.with_base_url(base_url.as_str());
    }
    let output_dir = args.get(2).cloned().unwrap_or_else(|| ".".to_string());

    let api = HttpApi::new(&config)?;
    let renderer = TerminalRenderer::new(io::stdout());
    let sink = DirectorySink::new(output_dir);
    let mut session = ReportSession::new(api, renderer, sink, config)?;

    println!("Connecting to {}", session.api().base_url());
    session.start().await;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut start_time = Instant::now();
    let mut status = String::from("ok");

    loop {
        let elapsed_time = start_time.elapsed().as_secs_f64();
        print!("[{:.1}] ({}) > ", elapsed_time, status);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let command = line.trim();

        start_time = Instant::now();

        if command.is_empty() {
            status = String::from("invalid command");
            continue;
        }

        let (name, arg) = match command.split_once(' ') {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        status = match name {
            "q" => break,
            "help" => {
                print_help(&session.config().page_size_options);
                String::from("ok")
            }
            "list" => {
                session.render_questions();
                String::from("ok")
            }
            "t" => match arg.parse::<usize>() {
                Ok(n) if n >= 1 && n <= session.questions().len() => {
                    let question = session.questions()[n - 1].clone();
                    session.toggle(&question);
                    String::from("ok")
                }
                _ => String::from("invalid question"),
            },
            "all" => {
                session.select_all();
                String::from("ok")
            }
            "clear" => {
                session.clear_all();
                String::from("ok")
            }
            "gen" => match session.generate().await {
                Ok(rows) => format!("{} rows", rows),
                Err(_) => String::from("error"),
            },
            "n" => {
                if session.next_page() {
                    String::from("ok")
                } else {
                    String::from("last page")
                }
            }
            "p" => {
                if session.previous_page() {
                    String::from("ok")
                } else {
                    String::from("first page")
                }
            }
            "size" => match arg.parse::<usize>() {
                Ok(size) if session.set_page_size(size).is_ok() => String::from("ok"),
                _ => String::from("invalid size"),
            },
            "show" => {
                session.render();
                String::from("ok")
            }
            "export" => match session.export() {
                Ok(_) => String::from("ok"),
                Err(_) => String::from("error"),
            },
            "disable_output" => {
                session.renderer_mut().show_tables = false;
                String::from("ok")
            }
            "enable_output" => {
                session.renderer_mut().show_tables = true;
                String::from("ok")
            }
            _ => String::from("invalid command"),
        };
    }

    Ok(())
}
