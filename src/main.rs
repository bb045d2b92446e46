use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = sidematter::cli::parse();
    app::run(args)
}
