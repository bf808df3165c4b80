use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

use rag_gateway::client::{
    ExperimentResult, HttpTransport, RequestState, ResultStateMachine,
};

#[derive(Parser)]
#[command(name = "rag-cli")]
#[command(about = "Submit a query through the RAG gateway", long_about = None)]
struct Cli {
    /// Gateway base URL.
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Give up waiting for the gateway after this many seconds.
    #[arg(short, long, default_value_t = 60)]
    timeout_secs: u64,

    /// Print the raw result as JSON instead of the formatted view.
    #[arg(long)]
    json: bool,

    /// The query text.
    query: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build()?;
    let transport = HttpTransport::new(&cli.url)?.with_client(http);
    let mut machine = ResultStateMachine::new(transport);

    let mut states = machine.subscribe();
    let progress = tokio::spawn(async move {
        while states.changed().await.is_ok() {
            if states.borrow_and_update().is_loading() {
                eprintln!("Searching...");
            }
        }
    });

    if !machine.submit(&cli.query).await {
        eprintln!("Error: query is empty");
        return Ok(ExitCode::from(2));
    }

    let state = machine.state();
    drop(machine);
    let _ = progress.await;

    match state {
        RequestState::Success(result) if cli.json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        RequestState::Success(result) => {
            print_result(&result);
            Ok(ExitCode::SUCCESS)
        }
        RequestState::Error(message) => {
            eprintln!("Error: {}", message);
            Ok(ExitCode::FAILURE)
        }
        RequestState::Idle | RequestState::Loading => Ok(ExitCode::FAILURE),
    }
}

fn print_result(result: &ExperimentResult) {
    if result.requires_review {
        println!("!! Human review required");
        if let Some(review) = result.review() {
            print!("   reason: {}", review.reason);
            if !review.sensitive_keywords.is_empty() {
                print!(" (keywords: {})", review.sensitive_keywords.join(", "));
            }
            println!();
            println!(
                "   query: {} | relevant documents: {}",
                review.query, review.relevant_doc_count
            );
        }
        println!();
    }

    println!("Answer");
    println!(
        "  processing time: {:.0} ms | request id: {}",
        result.processing_time_ms, result.request_id
    );
    println!();
    println!("{}", result.answer);

    if !result.sources.is_empty() {
        println!();
        println!("Sources ({})", result.sources.len());
        for (index, source) in result.sources.iter().enumerate() {
            let mut heading = format!("  #{} {} {}", index + 1, source.speaker, source.date);
            if let Some(house) = source.house() {
                heading.push(' ');
                heading.push_str(house);
            }
            if let Some(meeting) = source.meeting() {
                heading.push(' ');
                heading.push_str(meeting);
            }
            println!("{}  [{:.1}%]", heading, source.score * 100.0);
            println!("     {}", source.content);
        }
    }

    if !result.workflow_steps.is_empty() {
        println!();
        println!("Workflow: {}", result.workflow_steps.join(" → "));
    }
}
