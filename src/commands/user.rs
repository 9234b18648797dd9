use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::json;

use crate::context::AdminContext;
use crate::output::{report, report_err};

pub const SIGNUP_PATH: &str = "/user/signup/";
pub const EMAIL_DOMAIN: &str = "email.com";

const WORDS: &[&str] = &[
    "ability", "account", "action", "address", "agency", "animal", "answer", "article",
    "artist", "author", "balance", "bank", "board", "budget", "camera", "capital", "career",
    "center", "chance", "church", "citizen", "coach", "college", "color", "country", "culture",
    "customer", "dinner", "doctor", "dream", "economy", "energy", "evening", "factor", "family",
    "field", "finger", "garden", "glass", "growth", "history", "hotel", "image", "kitchen",
    "language", "leader", "letter", "machine", "market", "memory", "method", "minute", "model",
    "money", "morning", "mother", "movie", "music", "nature", "network", "office", "painting",
    "paper", "partner", "pattern", "picture", "planet", "player", "police", "radio", "reason",
    "record", "region", "river", "school", "season", "series", "sister", "society", "source",
    "speech", "spring", "station", "story", "street", "student", "summer", "system", "teacher",
    "theory", "thought", "travel", "value", "voice", "water", "window", "winter", "worker",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignupResponse {
    user_id: String,
}

/// Three random words glued together, e.g. `gardenriverpaper@email.com`.
pub fn random_email<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut local = String::new();
    for _ in 0..3 {
        if let Some(word) = WORDS.choose(rng) {
            local.push_str(word);
        }
    }
    format!("{local}@{EMAIL_DOMAIN}")
}

pub fn signup(ctx: &AdminContext) {
    let email = random_email(&mut rand::thread_rng());
    tracing::info!(%email, "signing up test user");

    match ctx.api.post_json(SIGNUP_PATH, &json!({ "email": email })) {
        Ok(resp) => {
            report(&format!("response status: {}", resp.status));
            report(&format!("response body: {}", resp.body));
            if let Ok(parsed) = serde_json::from_str::<SignupResponse>(&resp.body) {
                report(&format!("created user {} for {email}", parsed.user_id));
            }
        }
        Err(e) => report_err(&format!("signing up {email}: {e}")),
    }
}
