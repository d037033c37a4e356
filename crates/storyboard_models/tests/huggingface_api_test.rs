#![cfg(feature = "huggingface")]

use storyboard_core::{GenerateRequest, Message};
use storyboard_interface::TextDriver;
use storyboard_models::HuggingFaceDriver;
use storyboard_rate_limit::{Credentials, StoryboardConfig};

#[test]
fn test_driver_reports_configured_model() {
    let config = StoryboardConfig::bundled().unwrap();
    let driver = HuggingFaceDriver::new("hf_test", &config.llm).unwrap();

    assert_eq!(driver.provider_name(), "huggingface");
    assert_eq!(driver.model_name(), "mistralai/Mistral-7B-Instruct-v0.2");
    assert_eq!(
        driver.endpoint(),
        "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2"
    );
    assert!(!format!("{:?}", driver).contains("hf_test"));
    assert_eq!(
        driver.endpoint_for("HuggingFaceH4/zephyr-7b-beta"),
        "https://api-inference.huggingface.co/models/HuggingFaceH4/zephyr-7b-beta"
    );
}

#[test]
fn test_blank_token_rejected() {
    let config = StoryboardConfig::bundled().unwrap();
    assert!(HuggingFaceDriver::new("", &config.llm).is_err());
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_huggingface_basic_generation() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = StoryboardConfig::bundled()?;
    let credentials = Credentials::from_env()?;
    let driver = HuggingFaceDriver::new(credentials.hf_api_token(), &config.llm)?;

    let request = GenerateRequest::builder()
        .messages(vec![
            Message::system("You are a creative assistant."),
            Message::user("Write one line starting with 'Frame 1:' describing a sunrise."),
        ])
        .max_tokens(Some(40))
        .build()?;

    let response = driver.generate(&request).await?;

    assert!(!response.text().trim().is_empty());
    println!("Response: {}", response.text());

    Ok(())
}
