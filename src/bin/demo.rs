use anyhow::Result;
use lotto_ticketing::{CheckResultResponse, TicketingClient, config, logger};

#[tokio::main]
async fn main() -> Result<()> {
    logger::init_logger();

    let base_url = config::server_url();
    let user_name = std::env::args().nth(1).unwrap_or_else(|| "alice".to_string());
    let client = TicketingClient::new(&base_url);

    println!("\n🎰 Lottery demo against {}\n", base_url);

    let health = client.health().await?;
    println!("0️⃣  Server status: {} (db: {})", health.status, health.db);

    let receipt = client.buy_ticket(&user_name).await?;
    println!(
        "1️⃣  {} bought ticket #{} with numbers {:?}",
        user_name, receipt.ticket_id, receipt.numbers
    );

    match client.check_result(receipt.ticket_id).await? {
        CheckResultResponse::Report(report) => println!(
            "2️⃣  Before the draw: {} matches (winning numbers: {:?})",
            report.match_count, report.winning_numbers
        ),
        CheckResultResponse::Error(e) => println!("2️⃣  Error: {}", e.error),
    }

    let winning_numbers = client.draw().await?;
    println!("3️⃣  Winning numbers: {:?}", winning_numbers);

    match client.check_result(receipt.ticket_id).await? {
        CheckResultResponse::Report(report) => println!(
            "4️⃣  Ticket #{} matched {:?} ({} numbers)",
            receipt.ticket_id, report.matched_numbers, report.match_count
        ),
        CheckResultResponse::Error(e) => println!("4️⃣  Error: {}", e.error),
    }

    match client.check_result(-1).await? {
        CheckResultResponse::Error(e) => println!("5️⃣  Unknown ticket: {}", e.error),
        CheckResultResponse::Report(_) => println!("5️⃣  Unknown ticket unexpectedly found"),
    }

    println!("\n✅ Demo completed!\n");
    Ok(())
}
