use reqwest::multipart::{Form, Part};
use reqwest::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new();
    let base_url = std::env::var("COACH_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

    println!("Testing Hot Mess Coach at {}", base_url);

    println!("\nHealth Check:");
    let health_response = client.get(format!("{}/health", base_url)).send().await?;
    println!("Status: {}", health_response.status());
    let health_json: serde_json::Value = health_response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&health_json)?);

    println!("\nCoaching request with a CSV attachment:");
    let csv = Part::bytes(b"day,mood\nMon,low\nTue,ok\n".to_vec())
        .file_name("week.csv")
        .mime_str("text/csv")?;
    let form = Form::new()
        .text("user_msg", "My week has been a lot. Any advice?")
        .part("file", csv);

    let coach_response = client.post(format!("{}/", base_url)).multipart(form).send().await?;
    println!("Status: {}", coach_response.status());
    let html = coach_response.text().await?;
    println!("Page length: {} bytes", html.len());
    println!("Has reply: {}", html.contains("Coach says:"));
    println!("Has error: {}", html.contains("<strong>Error:</strong>"));

    Ok(())
}
