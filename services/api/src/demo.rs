use crate::infra::InMemoryCardRequestStore;
use card_requests::config::DEFAULT_CONTAINER;
use card_requests::error::AppError;
use card_requests::workflows::card_requests::handlers::{
    delete_request_handler, fetch_request_handler, list_requests_handler,
    process_store_event_handler, submit_request_handler,
};
use card_requests::workflows::card_requests::{
    CardRequestLifecycle, FixedScoreSource, HandlerResponse, InboundEvent, LifecycleConfig,
    RandomScoreSource, ScoreSource,
};
use clap::Args;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Container name stamped on the simulated store notifications
    #[arg(long, default_value = DEFAULT_CONTAINER)]
    pub(crate) container: String,
    /// Applicant cpf, also used as the store key
    #[arg(long, default_value = "999.999.999-99")]
    pub(crate) cpf: String,
    /// Declared income of the sample applicant
    #[arg(long, default_value_t = 3000)]
    pub(crate) income: u32,
    /// Use a fixed score instead of a random draw
    #[arg(long)]
    pub(crate) score: Option<u16>,
    /// Currency symbol used when rendering the credit limit
    #[arg(long, default_value = "R$")]
    pub(crate) currency_symbol: String,
}

/// Inbound envelope as the HTTP platform delivers it; only `body` and `path` are read.
fn platform_event(body: Value, path: Value) -> Result<InboundEvent, AppError> {
    let envelope = json!({
        "body": body,
        "method": "POST",
        "stage": "dev",
        "headers": { "Content-Type": "application/json" },
        "query": {},
        "path": path,
        "stageVariables": {},
    });
    Ok(serde_json::from_value(envelope)?)
}

fn print_step(label: &str, value: &impl Serialize) -> Result<(), AppError> {
    println!("\n{label}");
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_response(label: &str, response: &HandlerResponse) -> Result<(), AppError> {
    print_step(&format!("{label} -> {}", response.status), response)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        container,
        cpf,
        income,
        score,
        currency_symbol,
    } = args;

    let scores: Box<dyn ScoreSource> = match score {
        Some(score) => Box::new(FixedScoreSource(score)),
        None => Box::new(RandomScoreSource),
    };

    let (store, mut notifications) = InMemoryCardRequestStore::with_notifications(&container);
    let lifecycle = CardRequestLifecycle::new(
        Arc::new(store),
        Arc::new(scores),
        LifecycleConfig {
            container,
            currency_symbol,
        },
    );

    println!("Card request demo (in-memory store '{}')", lifecycle.container());

    let submit = platform_event(
        json!({
            "name": "Maria Souza",
            "phone": "99999999999",
            "age": 26,
            "cpf": cpf,
            "income": income,
        }),
        json!({}),
    )?;
    print_response("Submit", &submit_request_handler(&lifecycle, &submit))?;

    while let Ok(event) = notifications.try_recv() {
        print_step("Store notification", &event)?;
        let report = process_store_event_handler(&lifecycle, &event);
        print_step("Scoring report", &report)?;
    }

    let by_path = platform_event(json!({}), json!({ "id": cpf }))?;
    print_response("Fetch", &fetch_request_handler(&lifecycle, &by_path))?;
    print_response("List", &list_requests_handler(&lifecycle))?;
    print_response("Delete", &delete_request_handler(&lifecycle, &by_path))?;
    print_response("List after delete", &list_requests_handler(&lifecycle))?;

    Ok(())
}
