#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use std::rc::Rc;

use clap::{Parser, Subcommand};
use parlvotes::{
    config::Config,
    gateway::Gateway,
    router::{Router, Shell},
    views::{self, Page, ViewSink, Views, NAV_LINKS},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

/// Browse French parliamentary votes from the terminal
#[derive(Parser)]
#[command(name = "pv", about = "Browse French parliamentary votes from the terminal")]
struct Cli {
    /// YAML configuration file (optional; `PV_*` variables override it).
    #[arg(long, default_value = "parlvotes.yaml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one navigation target, e.g. `#/scrutin/1234`, then exit.
    Open { target: String },
    /// Read navigation targets from stdin, one per line, starting at `#/`.
    Browse,
}

struct StdoutSink;

impl ViewSink for StdoutSink {
    fn show(&self, page: Page) {
        println!("{page}");
    }
}

/// Page chrome rendered as a one-line menu above each view.
struct TerminalShell {
    sink: Rc<dyn ViewSink>,
    active: Vec<String>,
}

impl TerminalShell {
    fn new(sink: Rc<dyn ViewSink>) -> Self {
        Self {
            sink,
            active: Vec::new(),
        }
    }
}

impl Shell for TerminalShell {
    fn nav_links(&self) -> Vec<String> {
        NAV_LINKS.iter().map(ToString::to_string).collect()
    }

    fn set_link_active(&mut self, link: &str, active: bool) {
        self.active.retain(|l| l != link);
        if active {
            self.active.push(link.to_string());
        }
    }

    fn render_not_found(&mut self, path: &str) {
        self.sink.show(Page::not_found(path));
    }

    fn scroll_to_top(&mut self) {
        let menu: Vec<String> = NAV_LINKS
            .iter()
            .map(|link| {
                if self.active.iter().any(|a| a == link) {
                    format!("[{link}]")
                } else {
                    (*link).to_string()
                }
            })
            .collect();
        println!("{}", menu.join("  "));
    }

    fn close_mobile_menu(&mut self) {}
}

async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    let sink: Rc<dyn ViewSink> = Rc::new(StdoutSink);
    let views = Rc::new(Views::new(
        Rc::new(Gateway::from_config(config)),
        Rc::clone(&sink),
    ));
    let mut router = Router::new(TerminalShell::new(sink));
    views::register(&mut router, &views)?;

    match command {
        Command::Open { target } => {
            router.navigate(&target);
        }
        Command::Browse => {
            router.navigate("#/");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                let target = line.trim();
                if !target.is_empty() {
                    router.navigate(target);
                }
            }
        }
    }

    views.settle().await;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    let config = Config::load_from(&cli.config).map_err(|e| anyhow::anyhow!("{e}"))?;

    // Logs go to stderr; stdout carries the rendered pages.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        legislature = %config.upstream.legislature,
        proxies = config.proxies.len(),
        ttl_secs = config.cache.ttl_secs,
        "configuration loaded"
    );

    LocalSet::new().run_until(run(cli.command, &config)).await
}
