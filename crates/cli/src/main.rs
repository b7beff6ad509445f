use clap::Parser;

fn main() -> anyhow::Result<()> {
    arve_observability::init();

    let args = arve_cli::Args::parse();
    let settings = arve_cli::Settings::load(args.config.as_deref(), |key| std::env::var(key).ok())?;
    let now = chrono::Local::now().naive_local();

    let path = arve_cli::run(&args, settings, now)?;
    println!("{}", path.display());
    Ok(())
}
