//! Topic and stance extraction
//!
//! The debate claim is derived once from the first user message and
//! thereafter recovered from the stored seed turn. `seed_message` and
//! `extract_topic_from_seed` are a hard string contract: the prefix written
//! by one must be exactly what the other strips.

/// Literal prefix of every seed turn.
pub const SEED_PREFIX: &str = "I will prove that ";

// Imperative prefixes stripped from a first message before claim detection,
// matched case-insensitively. Adding a language or phrasing is a data change.
const CLAIM_PREFIXES: &[&str] = &[
    "i will prove that ",
    "convince me that ",
    "demonstrate that ",
    "prove that ",
    "convénceme de que ",
    "convenceme de que ",
    "demuéstrame que ",
    "demuestrame que ",
    "demuestra que ",
    "pruébame que ",
    "pruebame que ",
    "prueba que ",
];

// Comparative markers searched for after prefix stripping. ASCII only, so
// byte offsets into the lowercased haystack are valid in the original.
const COMPARATIVE_MARKERS: &[&str] = &[
    " is better than ",
    " are better than ",
    " es mejor que ",
    " son mejores que ",
];

const QUOTE_CHARS: &[char] = &['"', '\'', '\u{201c}', '\u{201d}', '\u{2018}', '\u{2019}', '«', '»'];

/// Derive `(topic, stance)` from the first user message.
///
/// Ordered rules, first match wins:
/// 1. Strip one known imperative prefix ("prove that", "convince me that",
///    Spanish equivalents, ...).
/// 2. Find a comparative `A <marker> B`; then topic is `"A vs B"` and the
///    stance is the comparative claim itself.
/// 3. Otherwise topic and stance are the cleaned remaining text.
/// 4. If cleaning leaves nothing, both fall back to the trimmed original.
///
/// Never panics; never returns empty strings for non-empty input.
pub fn parse_topic_and_stance(message: &str) -> (String, String) {
    let original = message.trim();
    let remainder = strip_claim_prefix(original);

    if let Some((a, marker, b)) = find_comparative(remainder) {
        let topic = format!("{} vs {}", a, b);
        let stance = format!("{}{}{}", a, marker, b);
        return (topic, stance);
    }

    let claim = clean_claim(remainder);
    if claim.is_empty() {
        return (original.to_string(), original.to_string());
    }
    (claim.clone(), claim)
}

/// Recover the topic from a stored seed turn.
///
/// Exact inverse of `seed_message`: strips the literal prefix and any
/// trailing `!`.
pub fn extract_topic_from_seed(seed: &str) -> String {
    let out = seed.strip_prefix(SEED_PREFIX).unwrap_or(seed);
    out.trim_end_matches('!').to_string()
}

/// Synthetic first bot message announcing the topic.
pub fn seed_message(topic: &str) -> String {
    format!("{}{}!", SEED_PREFIX, topic)
}

/// Templated redirect used when the user drifts off topic.
pub fn ground_reply(topic: &str) -> String {
    format!(
        "Let's stay on our topic: **{}**. I'll address your point strictly in relation to this claim.",
        topic
    )
}

fn strip_claim_prefix(message: &str) -> &str {
    let lowered = message.to_ascii_lowercase();
    for prefix in CLAIM_PREFIXES {
        if lowered.starts_with(prefix) {
            return message[prefix.len()..].trim_start();
        }
    }
    message
}

fn find_comparative(text: &str) -> Option<(String, &'static str, String)> {
    let lowered = text.to_ascii_lowercase();
    for marker in COMPARATIVE_MARKERS {
        if let Some(idx) = lowered.find(marker) {
            let a = clean_claim(&text[..idx]);
            let b = clean_claim(&text[idx + marker.len()..]);
            if !a.is_empty() && !b.is_empty() {
                return Some((a, marker, b));
            }
        }
    }
    None
}

// Strips surrounding quotes and trailing sentence punctuation until stable.
fn clean_claim(text: &str) -> String {
    let mut out = text.trim();
    loop {
        let next = out
            .trim_matches(|c: char| QUOTE_CHARS.contains(&c))
            .trim_end_matches(&['.', '!', '?'][..])
            .trim();
        if next == out {
            break;
        }
        out = next;
    }
    out.to_string()
}
