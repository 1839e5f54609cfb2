use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metrocab::booking::BookingInput;
use metrocab::config::{ArtifactLabel, BookingConfig, DEFAULT_MAX_PASSENGERS};
use metrocab::error::BookingError;
use metrocab::export::{self, ExportOptions, ExportedFiles};
use metrocab::fare::{self, RateTable};
use metrocab::model::{CarType, DropLocation, Station};
use metrocab::session::BookingSession;
use metrocab::speech::{GoogleTts, SpeechOptions, SpeechSynthesizer};
use metrocab::ticket::{Ticket, TicketId};
use metrocab::{form, table};

#[derive(Parser)]
#[command(
    name = "metrocab",
    about = "Book metro tickets with an optional last-mile cab",
    version,
    after_help = "\
Examples:
  metrocab book -n Asha -f Ameerpet -t KPHB -p 2
  metrocab book -n Asha -f Ameerpet -t KPHB -p 2 --cab --drop hotel --car suv
  metrocab book -n Asha -f Ameerpet -t KPHB --cab --drop office --pricing flat --label journey
  metrocab quote -p 3 --cab --car sedan
  metrocab form"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    #[command(
        about = "Book a ticket and write its text, QR code and optional voice message",
        after_help = "\
Examples:
  Metro only:   metrocab book -n Asha -f Ameerpet -t KPHB -p 2
  With cab:     metrocab book -n Asha -f Ameerpet -t KPHB -p 2 --cab --drop hotel --car suv
  Flat cab:     metrocab book -n Asha -f Ameerpet -t KPHB --cab --drop office --pricing flat
  Voice:        metrocab book -n Asha -f Ameerpet -t KPHB --voice --lang en
  JSON output:  metrocab book -n Asha -f Ameerpet -t KPHB --json --pretty"
    )]
    Book(BookArgs),
    #[command(about = "Show the fare breakdown without booking")]
    Quote(QuoteArgs),
    #[command(about = "Fill in the booking form interactively")]
    Form(FormArgs),
    #[command(about = "List stations, drop locations and cab rates")]
    Stations(StationsArgs),
    #[command(about = "Start MCP server for AI agents (stdio transport)")]
    Mcp,
}

#[derive(clap::Args)]
struct PricingArgs {
    #[arg(
        long,
        default_value = "tiered",
        value_name = "MODE",
        help = "Cab pricing [tiered, flat]",
        long_help = "Cab pricing. tiered: Mini ₹40, Sedan ₹60, SUV ₹90 per passenger. \
            flat: ₹50 per passenger for any car."
    )]
    pricing: String,

    #[arg(
        long,
        default_value_t = DEFAULT_MAX_PASSENGERS,
        value_name = "N",
        help = "Maximum passengers per booking (0 = no limit)"
    )]
    max_passengers: u32,
}

#[derive(clap::Args)]
struct OutputArgs {
    #[arg(long, default_value = ".", value_name = "DIR", help = "Directory for ticket files")]
    out: PathBuf,

    #[arg(
        long,
        default_value = "ticket",
        value_name = "LABEL",
        help = "File name prefix [ticket, journey]"
    )]
    label: String,
}

#[derive(clap::Args)]
struct BookArgs {
    #[arg(short, long, value_name = "NAME", help = "Passenger full name")]
    name: String,

    #[arg(
        short, long,
        value_name = "STATION",
        help = "Source station",
        long_help = "Source station: Ameerpet, KPHB, Kukatpally, Madhapur, Hitech City, Raidurg. \
            Case and separators are ignored (hitech-city works)."
    )]
    from: String,

    #[arg(short, long, value_name = "STATION", help = "Destination station")]
    to: String,

    #[arg(short, long, default_value = "1", value_name = "N", help = "Number of passengers")]
    passengers: u32,

    #[arg(long, help = "Add a last-mile cab from the destination station")]
    cab: bool,

    #[arg(
        long,
        value_name = "LOCATION",
        help = "Cab drop location (required with --cab)",
        long_help = "Cab drop location: Office, Home, Shopping Mall, Hospital, College, Hotel. \
            Required with --cab."
    )]
    drop: Option<String>,

    #[arg(long, value_name = "TYPE", help = "Cab car type [mini, sedan, suv]")]
    car: Option<String>,

    #[arg(long, value_name = "ID", help = "Use this 8-character booking id", hide = true)]
    booking_id: Option<String>,

    #[command(flatten)]
    pricing: PricingArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[arg(long, help = "Print the ticket without writing files")]
    no_files: bool,

    #[arg(long, help = "Also write a spoken MP3 announcement (needs internet)")]
    voice: bool,

    #[arg(long, default_value = "en", value_name = "CODE", help = "Voice language code")]
    lang: String,

    #[arg(long, value_name = "URL", help = "HTTP or SOCKS5 proxy for the voice request")]
    proxy: Option<String>,

    #[arg(long, default_value = "30", value_name = "SECS", help = "Voice request timeout")]
    timeout: u64,

    #[arg(long, help = "Open the QR image (and voice message) after booking")]
    open: bool,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

#[derive(clap::Args)]
struct QuoteArgs {
    #[arg(short, long, default_value = "1", value_name = "N", help = "Number of passengers")]
    passengers: u32,

    #[arg(long, help = "Include a last-mile cab")]
    cab: bool,

    #[arg(long, value_name = "TYPE", help = "Cab car type [mini, sedan, suv]")]
    car: Option<String>,

    #[command(flatten)]
    pricing: PricingArgs,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

#[derive(clap::Args)]
struct FormArgs {
    #[command(flatten)]
    pricing: PricingArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args)]
struct StationsArgs {
    #[arg(long, default_value = "tiered", value_name = "MODE", help = "Cab pricing [tiered, flat]")]
    pricing: String,

    #[arg(long, help = "Output as JSON")]
    json: bool,
}

fn error_code(err: &BookingError) -> i32 {
    match err {
        e if e.is_input_error() => 2,
        BookingError::Timeout
        | BookingError::ConnectionFailed(_)
        | BookingError::ProxyError(_)
        | BookingError::TlsError(_) => 3,
        BookingError::RateLimited => 4,
        BookingError::HttpStatus(_) => 5,
        _ => 6,
    }
}

fn die(err: &BookingError, json_mode: bool) -> ! {
    if json_mode {
        let json = serde_json::json!({
            "error": {
                "kind": err.kind(),
                "message": err.to_string(),
            }
        });
        println!("{json}");
    } else {
        eprintln!("error: {err}");
    }
    process::exit(error_code(err));
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn build_config(args: &PricingArgs) -> Result<BookingConfig, BookingError> {
    let config = BookingConfig {
        rates: RateTable::from_str_loose(&args.pricing)?,
        ..Default::default()
    };
    Ok(config.with_max_passengers(args.max_passengers))
}

fn build_export(args: &OutputArgs) -> Result<ExportOptions, BookingError> {
    Ok(ExportOptions {
        out_dir: args.out.clone(),
        label: ArtifactLabel::from_str_loose(&args.label)?,
    })
}

fn build_input(args: &BookArgs) -> Result<BookingInput, BookingError> {
    Ok(BookingInput {
        passenger_name: args.name.clone(),
        source: Station::from_str_loose(&args.from)?,
        destination: Station::from_str_loose(&args.to)?,
        passengers: args.passengers,
        cab_requested: args.cab,
        drop: args
            .drop
            .as_deref()
            .map(DropLocation::from_str_loose)
            .transpose()?,
        car_type: args.car.as_deref().map(CarType::from_str_loose).transpose()?,
    })
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), BookingError> {
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| BookingError::Validation(format!("failed to serialize output: {e}")))?;
    println!("{output}");
    Ok(())
}

async fn run_book(args: &BookArgs) -> Result<(), BookingError> {
    let json_mode = args.json || args.pretty;
    let config = build_config(&args.pricing)?;
    let export_options = build_export(&args.output)?;
    let input = build_input(args)?;
    let id = args.booking_id.as_deref().map(TicketId::parse).transpose()?;

    if args.voice && args.no_files {
        return Err(BookingError::Validation(
            "--voice writes an MP3 file and cannot be combined with --no-files".into(),
        ));
    }

    let ticket = metrocab::book(&input, &config, id)?;
    tracing::info!(id = %ticket.id, total = ticket.fare.grand_total, "booking confirmed");

    let mut files = if args.no_files {
        ExportedFiles::default()
    } else {
        export::export(&ticket, &export_options)?
    };

    if args.voice {
        let speech = SpeechOptions {
            lang: args.lang.clone(),
            proxy: args.proxy.clone(),
            timeout: args.timeout,
        };
        let tts = GoogleTts::new(&speech)?;
        let audio = tts.synthesize(&ticket.announcement, &speech.lang).await?;
        files.audio = Some(export::export_audio(&ticket, &audio, &export_options)?);
    }

    if args.open {
        for artifact in [&files.image, &files.audio].into_iter().flatten() {
            export::open_artifact(artifact);
        }
    }

    if json_mode {
        #[derive(serde::Serialize)]
        struct Output<'a> {
            ticket: &'a Ticket,
            files: &'a ExportedFiles,
        }
        return print_json(
            &Output {
                ticket: &ticket,
                files: &files,
            },
            args.pretty,
        );
    }

    println!("{}", ticket.confirmation());
    println!();
    println!("{}", ticket.text);
    println!();
    println!("{}", table::render_quote(&ticket.fare));
    for artifact in files.iter() {
        println!("saved {} ({})", artifact.path.display(), artifact.mime);
    }
    Ok(())
}

fn run_quote(args: &QuoteArgs) -> Result<(), BookingError> {
    let config = build_config(&args.pricing)?;
    let car = args.car.as_deref().map(CarType::from_str_loose).transpose()?;
    let quote = config.validated_quote(args.passengers, args.cab, car)?;
    tracing::debug!(?quote, "computed quote");

    if args.json || args.pretty {
        return print_json(&quote, args.pretty);
    }
    println!("{}", table::render_quote(&quote));
    Ok(())
}

fn run_form(args: &FormArgs) -> Result<(), BookingError> {
    let config = build_config(&args.pricing)?;
    let export_options = build_export(&args.output)?;
    let mut session = BookingSession::new(config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("Metro and Cab Booking (type help for commands)");
    form::run(&mut session, stdin.lock(), &mut stdout, &export_options)?;
    Ok(())
}

fn run_stations(args: &StationsArgs) -> Result<(), BookingError> {
    let rates = RateTable::from_str_loose(&args.pricing)?;
    if args.json {
        let catalog = serde_json::json!({
            "stations": Station::ALL,
            "drop_locations": DropLocation::ALL,
            "car_types": CarType::ALL,
            "metro_rate": fare::METRO_RATE,
            "cab_rates": rates,
        });
        println!("{catalog}");
        return Ok(());
    }
    println!("{}", table::render_catalog(&rates));
    println!(
        "Metro fare: {} per passenger",
        table::format_inr(u64::from(fare::METRO_RATE))
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => {
            if let Err(e) = metrocab::mcp::run().await {
                die(&e, false);
            }
        }
        Commands::Book(args) => {
            if let Err(e) = run_book(&args).await {
                die(&e, args.json || args.pretty);
            }
        }
        Commands::Quote(args) => {
            if let Err(e) = run_quote(&args) {
                die(&e, args.json || args.pretty);
            }
        }
        Commands::Form(args) => {
            if let Err(e) = run_form(&args) {
                die(&e, false);
            }
        }
        Commands::Stations(args) => {
            if let Err(e) = run_stations(&args) {
                die(&e, args.json);
            }
        }
    }
}
