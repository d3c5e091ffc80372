mod app;
mod config;
mod logging;
mod playlist;
mod runtime;
mod session;
mod sink;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
