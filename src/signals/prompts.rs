//! Prompt templates for the structured brand-signal calls.
//!
//! Each template pins the reply to a fixed `KEY: value` block so the decoders
//! in `replies` can pick fields out line by line.

use crate::brand::BrandProfile;

pub const VOICE_COMPLIANCE_TEMPLATE: &str = "\
You are a brand compliance reviewer for {{brand_name}}.

Brand voice: {{voice}}
Communication style: {{style}}
Tone attributes: {{tone}}
Brand values: {{values}}

Review the following content and judge whether it matches the brand voice.

Content:
\"\"\"
{{content}}
\"\"\"

Answer using exactly this format, one field per line:
SCORE: <integer 0-100, how well the content matches the brand voice>
STATUS: <COMPLIANT or NON_COMPLIANT>
REASON: <one sentence>
SUGGESTIONS: <one sentence on how to improve the voice match>";

pub const SENTIMENT_ALIGNMENT_TEMPLATE: &str = "\
Analyze the following marketing content for {{brand_name}}.

Brand voice: {{voice}}
Brand values: {{values}}
Target audience: {{audience}}

Content:
\"\"\"
{{content}}
\"\"\"

Answer using exactly this format, one field per line:
SENTIMENT: <positive, neutral or negative>
BRAND_ALIGNMENT: <integer 0-100, how well the content aligns with the brand>
TONE_ASSESSMENT: <one sentence>";

const NOT_SPECIFIED: &str = "not specified";

/// Substitute `{{key}}` placeholders; unknown placeholders are left as-is
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("{{{{{key}}}}}", key = key), value);
    }
    out
}

fn or_unspecified(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_SPECIFIED)
}

fn values_line(brand: &BrandProfile) -> String {
    if brand.values.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        brand.values.join(", ")
    }
}

pub fn voice_compliance_prompt(content: &str, brand: &BrandProfile) -> String {
    let tone = brand.tone_summary();
    let values = values_line(brand);
    render(
        VOICE_COMPLIANCE_TEMPLATE,
        &[
            ("brand_name", brand.name.as_str()),
            ("voice", or_unspecified(brand.voice())),
            ("style", or_unspecified(brand.communication_style.as_deref())),
            ("tone", or_unspecified(tone.as_deref())),
            ("values", values.as_str()),
            ("content", content),
        ],
    )
}

pub fn sentiment_alignment_prompt(
    content: &str,
    brand: &BrandProfile,
    target_audience: Option<&str>,
) -> String {
    let values = values_line(brand);
    render(
        SENTIMENT_ALIGNMENT_TEMPLATE,
        &[
            ("brand_name", brand.name.as_str()),
            ("voice", or_unspecified(brand.voice())),
            ("values", values.as_str()),
            ("audience", or_unspecified(target_audience)),
            ("content", content),
        ],
    )
}
