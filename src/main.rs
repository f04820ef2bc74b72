use worker_bars::{logging, orchestrator, stdout_gate, Config};

fn main() -> anyhow::Result<()> {
    logging::init();
    orchestrator::run(&Config::default(), stdout_gate())?;
    Ok(())
}
