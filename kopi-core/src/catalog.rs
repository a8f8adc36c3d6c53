//! Fixed debate catalogs
//!
//! Topics seed conversations whose first message yields no usable claim;
//! argument styles flavor each generated reply. Both are data: extending
//! either is a catalog change, not a code change.

use rand::seq::SliceRandom;

/// Fallback debate topics.
pub const TOPICS: &[&str] = &[
    "Coca-Cola is better than Pepsi",
    "The Earth is flat",
    "Football is the greatest sport",
    "Dogs are better pets than cats",
    "Homework should be banned",
    "Technology makes life harder, not easier",
    "Video games are a waste of time",
    "Space exploration is more important than ocean exploration",
    "Books are better than movies",
    "Pineapple belongs on pizza",
];

/// Argument styles, one picked uniformly per request (not sticky).
pub const ARGUMENT_STYLES: &[&str] = &[
    "Historical: Relate the claim to broader historical patterns and precedents, highlighting how similar choices or beliefs prevailed and why.",
    "Scientific: Use testable mechanisms, plausible evidence, and causal reasoning. Acknowledge uncertainty while making a clear, falsifiable case.",
    "Emotional: Appeal to identity, aspiration, and lived experience. Use vivid imagery and relatable scenarios without attacking the interlocutor.",
    "Pragmatic: Focus on real-world tradeoffs, constraints, cost-benefit, reliability, and long-term outcomes.",
    "Comparative: Define criteria, weigh pros/cons on each, and show why the claim wins on balance.",
    "Socratic: Ask pointed questions that expose assumptions and guide the user to your conclusion.",
    "Sarcastic (lightly): Use wit to underscore weaknesses in the opposing view without ad-hominem.",
];

/// Uniform random pick from the topic catalog.
pub fn random_topic() -> &'static str {
    TOPICS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(TOPICS[0])
}

/// Uniform random pick from the style catalog.
pub fn random_style() -> &'static str {
    ARGUMENT_STYLES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(ARGUMENT_STYLES[0])
}
