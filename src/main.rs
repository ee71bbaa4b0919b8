#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "avro2model", about = "Generate Python models from Avro schemas")]
struct Cli {
    /// Path to the Avro schema (.avsc) input: one record or a list of records
    #[arg(value_name = "AVSC")]
    input: String,

    /// Path to the Python module output file
    #[arg(value_name = "PYTHON")]
    output: String,

    /// Base class of the generated models
    #[arg(long, value_enum, default_value_t = avro2model::BaseClass::AvroModel)]
    base_class: avro2model::BaseClass,
}

#[cfg(feature = "cli")]
fn main() {
    #[cfg(feature = "trace")]
    {
        use tracing_subscriber::EnvFilter;
        use tracing_subscriber::fmt::format::FmtSpan;

        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    if let Err(e) = avro2model::convert_avsc_to_python(&cli.input, &cli.output, cli.base_class) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary is only available with the `cli` feature enabled.");
    std::process::exit(1);
}
