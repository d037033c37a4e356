//! Type conversions between Storyboard and HuggingFace formats.

use crate::huggingface::{HuggingFaceParameters, HuggingFaceRequest, HuggingFaceResponse};
use storyboard_core::{GenerateRequest, GenerateResponse, Role};
use storyboard_error::{ModelsError, ModelsErrorKind, ModelsResult};
use storyboard_rate_limit::LlmConfig;

const PROVIDER: &str = "huggingface";

/// Model a request is sent to: the request's override, else the configured model.
pub(crate) fn request_model<'a>(req: &'a GenerateRequest, config: &'a LlmConfig) -> &'a str {
    req.model()
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(config.model.as_str())
}

/// Flatten a conversation into the Mistral instruct template.
///
/// System messages are folded into the first instruction block.
///
/// ```
/// use storyboard_core::Message;
/// use storyboard_models::format_instruct_prompt;
///
/// let text = format_instruct_prompt(&[
///     Message::system("You are a creative assistant."),
///     Message::user("Describe a sunrise."),
/// ]);
/// assert_eq!(
///     text,
///     "<s>[INST] You are a creative assistant.\n\nDescribe a sunrise. [/INST]"
/// );
/// ```
pub fn format_instruct_prompt(messages: &[storyboard_core::Message]) -> String {
    let system = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.trim())
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut text = String::from("<s>");
    let mut pending_system = (!system.is_empty()).then_some(system);

    for message in messages.iter().filter(|m| m.role != Role::System) {
        match message.role {
            Role::User => {
                text.push_str("[INST] ");
                if let Some(system) = pending_system.take() {
                    text.push_str(&system);
                    text.push_str("\n\n");
                }
                text.push_str(message.content.trim());
                text.push_str(" [/INST]");
            }
            Role::Assistant => {
                text.push(' ');
                text.push_str(message.content.trim());
                text.push_str("</s>");
            }
            Role::System => {}
        }
    }

    // A system prompt with no user turn still gets sent
    if let Some(system) = pending_system {
        text.push_str("[INST] ");
        text.push_str(&system);
        text.push_str(" [/INST]");
    }

    text
}

/// Converts a Storyboard request to HuggingFace format.
///
/// Request-level token and temperature settings win over the configured defaults.
pub fn to_huggingface_request(
    req: &GenerateRequest,
    config: &LlmConfig,
) -> ModelsResult<HuggingFaceRequest> {
    if req.messages().is_empty() {
        return Err(ModelsError::new(ModelsErrorKind::InvalidConfiguration(
            "request has no messages".to_string(),
        )));
    }

    let parameters = HuggingFaceParameters::builder()
        .max_new_tokens(req.max_tokens().unwrap_or(config.max_new_tokens))
        .temperature(req.temperature().unwrap_or(config.temperature))
        .build()
        .map_err(|e| {
            ModelsError::new(ModelsErrorKind::Builder(format!(
                "Failed to build parameters: {}",
                e
            )))
        })?;

    HuggingFaceRequest::builder()
        .inputs(format_instruct_prompt(req.messages()))
        .parameters(parameters)
        .build()
        .map_err(|e| {
            ModelsError::new(ModelsErrorKind::Builder(format!(
                "Failed to build request: {}",
                e
            )))
        })
}

/// Converts a HuggingFace response body to Storyboard format.
///
/// Some deployments ignore `return_full_text = false` and echo the prompt,
/// so a leading copy of `inputs` is removed.
pub fn from_huggingface_body(body: &str, inputs: &str) -> ModelsResult<GenerateResponse> {
    let response: HuggingFaceResponse = serde_json::from_str(body).map_err(|e| {
        ModelsError::new(ModelsErrorKind::ResponseConversion(format!(
            "{}: unexpected response shape: {}",
            PROVIDER, e
        )))
    })?;

    let text = response
        .into_text()
        .ok_or_else(|| ModelsError::new(ModelsErrorKind::EmptyResponse { provider: PROVIDER }))?;

    let text = text.strip_prefix(inputs).unwrap_or(&text).trim();
    if text.is_empty() {
        return Err(ModelsError::new(ModelsErrorKind::EmptyResponse {
            provider: PROVIDER,
        }));
    }

    Ok(GenerateResponse::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard_core::Message;

    fn config() -> LlmConfig {
        LlmConfig {
            model: "mistralai/Mistral-7B-Instruct-v0.2".to_string(),
            base_url: "https://api-inference.huggingface.co/models".to_string(),
            max_new_tokens: 512,
            temperature: 0.7,
            timeout_secs: 120,
        }
    }

    #[test]
    fn test_request_uses_config_defaults() {
        let req = GenerateRequest::builder()
            .messages(vec![Message::user("Hi")])
            .build()
            .unwrap();

        let hf = to_huggingface_request(&req, &config()).unwrap();

        assert_eq!(hf.inputs(), "<s>[INST] Hi [/INST]");
        assert_eq!(*hf.parameters().max_new_tokens(), 512);
        assert!(*hf.parameters().do_sample());
        assert!(!*hf.parameters().return_full_text());

        let json = serde_json::to_value(&hf).unwrap();
        assert_eq!(json["parameters"]["return_full_text"], false);
    }

    #[test]
    fn test_request_overrides_win() {
        let req = GenerateRequest::builder()
            .messages(vec![Message::user("Hi")])
            .max_tokens(Some(64))
            .temperature(Some(0.2))
            .build()
            .unwrap();

        let hf = to_huggingface_request(&req, &config()).unwrap();

        assert_eq!(*hf.parameters().max_new_tokens(), 64);
        assert!((*hf.parameters().temperature() - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_request_model_override() {
        let default = GenerateRequest::builder()
            .messages(vec![Message::user("Hi")])
            .build()
            .unwrap();
        let blank = GenerateRequest::builder()
            .messages(vec![Message::user("Hi")])
            .model(Some("  ".to_string()))
            .build()
            .unwrap();
        let custom = GenerateRequest::builder()
            .messages(vec![Message::user("Hi")])
            .model(Some("HuggingFaceH4/zephyr-7b-beta".to_string()))
            .build()
            .unwrap();

        let config = config();
        assert_eq!(request_model(&default, &config), "mistralai/Mistral-7B-Instruct-v0.2");
        assert_eq!(request_model(&blank, &config), "mistralai/Mistral-7B-Instruct-v0.2");
        assert_eq!(request_model(&custom, &config), "HuggingFaceH4/zephyr-7b-beta");
    }

    #[test]
    fn test_empty_request_rejected() {
        let req = GenerateRequest::default();
        assert!(to_huggingface_request(&req, &config()).is_err());
    }

    #[test]
    fn test_body_shapes() {
        let array = from_huggingface_body(r#"[{"generated_text":"Frame 1: A"}]"#, "").unwrap();
        let object = from_huggingface_body(r#"{"generated_text":"Frame 1: A"}"#, "").unwrap();
        assert_eq!(array.text(), "Frame 1: A");
        assert_eq!(object.text(), "Frame 1: A");
    }

    #[test]
    fn test_echoed_prompt_stripped() {
        let inputs = "<s>[INST] Hi [/INST]";
        let body = serde_json::json!([{ "generated_text": format!("{} Frame 1: A", inputs) }]);

        let response = from_huggingface_body(&body.to_string(), inputs).unwrap();
        assert_eq!(response.text(), "Frame 1: A");
    }

    #[test]
    fn test_empty_generations() {
        let err = from_huggingface_body("[]", "").unwrap_err();
        assert!(matches!(err.kind, ModelsErrorKind::EmptyResponse { .. }));

        let err = from_huggingface_body(r#"[{"generated_text":"   "}]"#, "").unwrap_err();
        assert!(matches!(err.kind, ModelsErrorKind::EmptyResponse { .. }));
    }

    #[test]
    fn test_unexpected_shape() {
        let err = from_huggingface_body(r#"{"error":"Model is loading"}"#, "").unwrap_err();
        assert!(matches!(err.kind, ModelsErrorKind::ResponseConversion(_)));
    }

    #[test]
    fn test_assistant_turns() {
        let text = format_instruct_prompt(&[
            Message::user("One"),
            Message::new(Role::Assistant, "Two"),
            Message::user("Three"),
        ]);
        assert_eq!(text, "<s>[INST] One [/INST] Two</s>[INST] Three [/INST]");
    }
}
