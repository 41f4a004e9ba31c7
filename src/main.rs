use anyhow::Result;

fn main() -> Result<()> {
    local_agent::cli::run()
}
