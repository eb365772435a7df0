use clap::Parser;
use log::info;
use risk_client::render::{render, render_json};
use risk_client::{
    build_payload, FormFields, HttpTransport, SubmissionController, SubmissionState, Transport,
};
use std::future::Future;
use std::process::ExitCode;

const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8080";

/// Distinct from clap's usage-error status (2).
const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "risk-client",
    version,
    about = "Submit health metrics and print the predicted maternal risk level",
    after_help = "Exit status: 0 prediction received, 1 request failed, 2 usage error, 3 invalid measurement."
)]
struct Cli {
    #[arg(
        long,
        env = "RISK_SERVICE_URL",
        default_value = DEFAULT_SERVICE_URL,
        help = "Base URL of the application hosting /predict"
    )]
    service_url: String,
    #[arg(long, help = "Output machine-readable JSON")]
    json: bool,
    #[arg(long, help = "Send unparsable values as NaN instead of rejecting them")]
    lenient: bool,
    #[arg(long, allow_hyphen_values = true)]
    age: String,
    #[arg(long, allow_hyphen_values = true)]
    systolic_bp: String,
    #[arg(long, allow_hyphen_values = true)]
    diastolic_bp: String,
    #[arg(long, allow_hyphen_values = true)]
    heart_rate: String,
    #[arg(long, allow_hyphen_values = true, help = "Body temperature in °F")]
    body_temp: String,
    #[arg(long, allow_hyphen_values = true, help = "Blood sugar in mmol/L")]
    blood_sugar: String,
}

impl Cli {
    fn fields(&self) -> FormFields {
        FormFields::new(
            &self.age,
            &self.systolic_bp,
            &self.diastolic_bp,
            &self.heart_rate,
            &self.body_temp,
            &self.blood_sugar,
        )
    }
}

/// Prints the in-flight line (text mode only) and waits for the request to settle.
async fn with_progress<T: Transport>(
    controller: &SubmissionController<T>,
    pending: impl Future<Output = SubmissionState>,
    quiet: bool,
) -> SubmissionState {
    if !quiet && !controller.state().is_terminal() {
        eprintln!("{}", render(&controller.state()));
    }
    pending.await
}

fn exit_code(state: &SubmissionState) -> ExitCode {
    match state {
        SubmissionState::Succeeded(_) => ExitCode::SUCCESS,
        SubmissionState::Invalid(_) => ExitCode::from(EXIT_INVALID_INPUT),
        _ => ExitCode::FAILURE,
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    let cli = Cli::parse();
    let fields = cli.fields();
    let transport = HttpTransport::new(&cli.service_url);
    info!("Prediction endpoint: {}", transport.endpoint());

    let controller = SubmissionController::new(transport);
    let state = if cli.lenient {
        with_progress(&controller, controller.submit(build_payload(&fields)), cli.json).await
    } else {
        with_progress(&controller, controller.submit_form(&fields), cli.json).await
    };

    if cli.json {
        println!("{}", render_json(&state)?);
    } else {
        match state {
            SubmissionState::Succeeded(_) => println!("{}", render(&state)),
            _ => eprintln!("{}", render(&state)),
        }
    }

    Ok(exit_code(&state))
}
