//! Campaign message composition.
//!
//! Plain-language copy built from the configured business details. The RNG is
//! injected so a seeded generator makes template choice deterministic in
//! tests.

use rand::Rng;

use outreach_core::BotConfig;

/// Produce the campaign body.
///
/// A supplied `template` is passed through verbatim (no substitution).
/// Otherwise one of the built-in templates is chosen uniformly at random,
/// an independent draw each call with no memory of previous cycles.
pub fn compose<R: Rng>(config: &BotConfig, template: Option<&str>, rng: &mut R) -> String {
    if let Some(template) = template {
        return template.to_string();
    }

    let mut templates = builtin_templates(config);
    let index = rng.gen_range(0..templates.len());
    templates.swap_remove(index)
}

fn builtin_templates(config: &BotConfig) -> Vec<String> {
    let BotConfig {
        business_name,
        target_message,
        contact_info,
        ..
    } = config;

    vec![
        format!(
            "🌟 {business_name} - {target_message}\n\n\
             We understand the importance of clear communication and reliable service.\n\
             {contact_info}\n\n\
             Feel free to call or email with any questions!"
        ),
        format!(
            "Hello! 👋 {business_name} here.\n\n\
             {target_message}\n\n\
             We believe in taking time to explain everything clearly.\n\
             {contact_info}\n\n\
             Looking forward to helping you!"
        ),
        format!(
            "Good day! ☀️\n\n\
             {business_name} specializes in {target_message}\n\n\
             • Clear explanations\n• Patient service\n• Fair pricing\n\n\
             {contact_info}"
        ),
    ]
}
