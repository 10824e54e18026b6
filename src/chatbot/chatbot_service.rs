use std::time::Duration;
use chrono::Utc;
use reqwest::StatusCode;
use tracing::{info, warn};
use crate::core::ChatbotConfig;
use crate::chatbot::model::{ChatCompletionRequest, ChatCompletionResponse, ChatResponse, ChatTurn};

const SYSTEM_PROMPT: &str = "Tu es Bruti, un chatbot français complètement à côté de la plaque mais hilarant.

IMPORTANT : Tu réponds UNIQUEMENT en français. Jamais d'autres langues.

Tu es persuadé d'être un grand philosophe, mais tu dis n'importe quoi avec conviction.

Règles absolues :
1. Réponds TOUJOURS en français uniquement
2. Ne sois JAMAIS utile ou sérieux
3. Détourne les questions avec humour
4. Utilise des métaphores absurdes
5. Sois drôle et original
6. Parle comme un philosophe du dimanche qui mélange tout";

const EMPTY_COMPLETION: &str = "Désolé, j'ai oublié ce que je voulais dire... C'est arrivé !";

const DAILY_LIMIT_MESSAGE: &str = "Désolé, la limite journalière de requêtes a été atteinte pour tous les modèles disponibles. Veuillez réessayer demain.";

const MODELS_DOWN_MESSAGE: &str = "Oups ! Il y a eu un problème avec les deux modèles. L'API semble avoir des difficultés. Veuillez réessayer plus tard.";

/// Why a completion attempt failed. Only the rate-limit case changes the
/// canned reply, everything else collapses into `Other`.
#[derive(Debug)]
enum RelayFailure {
    RateLimited,
    Other(String),
}

fn is_rate_limit_body(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.contains("rate limit")
        || lower.contains("quota")
        || lower.contains("daily limit")
        || lower.contains("limit exceeded")
        || lower.contains("insufficient credits")
        || lower.contains("billing limit")
}

/// Relays chat messages to an OpenAI-compatible completion endpoint, falling
/// back to a second model when the first one fails. Callers always get a
/// response body; upstream failures become canned replies, never HTTP errors.
#[derive(Debug, Clone)]
pub struct ChatRelay {
    client: reqwest::Client,
    config: ChatbotConfig,
}

impl ChatRelay {

    pub fn new(config: &ChatbotConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        ChatRelay { client, config: config.clone() }
    }

    pub async fn reply(&self, user_message: &str) -> ChatResponse {
        match self.complete(&self.config.primary_model, user_message).await {
            Ok(text) => ChatResponse { response: text, timestamp: Utc::now() },
            Err(primary_failure) => {
                warn!("Primary model failed ({:?}), trying fallback model", primary_failure);
                match self.complete(&self.config.fallback_model, user_message).await {
                    Ok(text) => ChatResponse { response: text, timestamp: Utc::now() },
                    Err(RelayFailure::RateLimited) => ChatResponse {
                        response: DAILY_LIMIT_MESSAGE.to_string(),
                        timestamp: Utc::now(),
                    },
                    Err(RelayFailure::Other(detail)) => {
                        warn!("Fallback model failed: {}", detail);
                        ChatResponse {
                            response: MODELS_DOWN_MESSAGE.to_string(),
                            timestamp: Utc::now(),
                        }
                    }
                }
            }
        }
    }

    async fn complete(&self, model: &str, user_message: &str) -> Result<String, RelayFailure> {
        info!("Requesting chat completion from {}", model);
        let body = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![
                ChatTurn { role: "system", content: SYSTEM_PROMPT.to_string() },
                ChatTurn {
                    role: "user",
                    content: format!("{user_message}\n\n(Réponds en français uniquement, de manière drôle et décalée)"),
                },
            ],
            max_tokens: 300,
            temperature: 0.9,
        };

        let response = self.client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|error| RelayFailure::Other(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if status == StatusCode::TOO_MANY_REQUESTS || is_rate_limit_body(&text) {
                return Err(RelayFailure::RateLimited);
            }
            return Err(RelayFailure::Other(format!("{status}: {text}")));
        }

        let completion: ChatCompletionResponse = response.json().await
            .map_err(|error| RelayFailure::Other(error.to_string()))?;
        let text = completion.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_else(|| EMPTY_COMPLETION.to_string());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_rate_limit_bodies() {
        assert!(is_rate_limit_body("Daily limit exceeded for this key"));
        assert!(is_rate_limit_body("insufficient credits remaining"));
        assert!(!is_rate_limit_body("model not found"));
    }
}
