//! Keyword replies for turns without a configured provider.
//!
//! Groups are checked in priority order and the first one with a matching
//! word wins: data questions, then conservation advice, then greetings,
//! then the capability blurb.

use hydrowatt_types::context::ContextSummary;

use super::command::or_unavailable;

const USAGE_STEMS: &[&str] = &["usage", "consum"];
const BILLING_STEMS: &[&str] = &["bill", "cost", "price", "pay", "charge"];
const DEVICE_STEMS: &[&str] = &["device", "appliance", "sensor", "meter"];
const CONSERVATION_STEMS: &[&str] = &["tip", "sav", "conserv", "reduc", "lower", "cut"];
const GREETINGS: &[&str] = &["hello", "hi", "hey", "hiya", "greetings", "morning", "evening"];

pub const CONSERVATION_TIPS: &str = "A few ways to cut your usage:\n\
- Fix dripping taps and running toilets; small leaks add up fast.\n\
- Run the dishwasher and washing machine only with full loads.\n\
- Shorten showers and fit a low-flow shower head.\n\
- Switch off devices at the wall instead of leaving them on standby.\n\
- Heat water a few degrees lower; the heater is often the biggest load.";

pub const GREETING: &str = "Hello! I'm your Hydrowatt assistant. Ask me about your water and \
electricity usage, your current bill or your devices, or type /help to see the commands.";

pub const CAPABILITIES: &str = "I can summarize your weekly water and electricity usage, break \
it down by room, show your current bill, count your active devices and share tips for saving \
water and energy. Try /usage, /billing or /devices, or ask for a tip.";

/// Produce a reply from keywords in `input` and the turn's context.
///
/// Pure and deterministic: the same input and context always give the same
/// reply.
pub fn fallback_reply(input: &str, context: &ContextSummary) -> String {
    let words = tokenize(input);

    if matches_stem(&words, USAGE_STEMS) {
        return or_unavailable(&context.usage_summary, "Usage data is not available right now.");
    }
    if matches_stem(&words, BILLING_STEMS) {
        return or_unavailable(
            &context.billing_summary,
            "Billing data is not available right now.",
        );
    }
    if matches_stem(&words, DEVICE_STEMS) {
        return or_unavailable(&context.device_summary, "Device data is not available right now.");
    }
    if matches_stem(&words, CONSERVATION_STEMS) {
        return CONSERVATION_TIPS.to_string();
    }
    if words.iter().any(|w| GREETINGS.contains(&w.as_str())) {
        return GREETING.to_string();
    }
    CAPABILITIES.to_string()
}

fn tokenize(input: &str) -> Vec<String> {
    input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn matches_stem(words: &[String], stems: &[&str]) -> bool {
    words
        .iter()
        .any(|w| stems.iter().any(|stem| w.starts_with(stem)))
}
