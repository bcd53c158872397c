use clap::{Arg, ArgMatches, Command};
use tracing::{error, info};

use crate::core::session::ChatSession;
use crate::core::ItineraryStore;
use crate::http::{serve, AppState};
use crate::services::assistant::AssistantBridge;
use crate::types::trip::ChatContext;

/// CLI entry point for the lagoon tool
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = Command::new("lagoon")
        .version("0.1.0")
        .about("Mauritius trip planner: itinerary store and AI assistant bridge")
        .subcommand_required(true)
        .subcommand(
            Command::new("serve")
                .about("Run the travel-assistant HTTP service")
                .arg(
                    Arg::new("addr")
                        .short('a')
                        .long("addr")
                        .value_name("ADDR")
                        .help("Socket address to listen on")
                        .default_value("127.0.0.1:8787"),
                )
                .args(bridge_args()),
        )
        .subcommand(
            Command::new("ask")
                .about("Ask the assistant one question against the seed itinerary")
                .arg(
                    Arg::new("prompt")
                        .help("The question to send to the assistant")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("day")
                        .short('d')
                        .long("day")
                        .value_name("DAY")
                        .help("Day currently in focus"),
                )
                .args(bridge_args()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("serve", sub)) => {
            let bridge = build_bridge(sub)?;
            let addr = sub.get_one::<String>("addr").unwrap().parse()?;
            serve(addr, AppState::new(bridge)).await?;
        }
        Some(("ask", sub)) => {
            let bridge = build_bridge(sub)?;
            let prompt = sub.get_one::<String>("prompt").unwrap();
            let selected_day = sub
                .get_one::<String>("day")
                .map(|day| day.parse::<u32>())
                .transpose()?;

            let store = ItineraryStore::seeded();
            let context = ChatContext::snapshot(&store, None, selected_day);
            let mut session = ChatSession::new(bridge);

            info!("Asking assistant: {}", prompt);
            match session.send(prompt, &context).await {
                Some(id) => {
                    let answer = session
                        .log()
                        .messages()
                        .iter()
                        .find(|message| message.id == id)
                        .map(|message| message.text.as_str())
                        .unwrap_or_default();
                    println!("\nAssistant:\n{answer}");
                }
                None => error!("Empty prompt, nothing sent"),
            }
        }
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}

fn bridge_args() -> Vec<Arg> {
    vec![
        Arg::new("api-key")
            .short('k')
            .long("api-key")
            .value_name("KEY")
            .help("Completion API key (or set OPENAI_API_KEY env var)"),
        Arg::new("base-url")
            .short('u')
            .long("base-url")
            .value_name("URL")
            .help("Completion API base URL (or set OPENAI_BASE_URL env var)"),
        Arg::new("model")
            .short('m')
            .long("model")
            .value_name("MODEL")
            .help("Completion model to use")
            .default_value("gpt-4o-mini"),
    ]
}

fn build_bridge(matches: &ArgMatches) -> Result<AssistantBridge, Box<dyn std::error::Error>> {
    let mut bridge = match matches.get_one::<String>("api-key") {
        Some(api_key) => AssistantBridge::new(api_key.clone()),
        None => AssistantBridge::from_env()?,
    };
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        bridge = bridge.with_base_url(base_url.clone());
    }
    bridge = bridge.with_model(matches.get_one::<String>("model").unwrap().as_str());
    Ok(bridge)
}
