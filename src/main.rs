use color_eyre::eyre::Result;

fn main() -> Result<()> {
    dbdeck::run_cli()
}
